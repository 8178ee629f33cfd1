//! 密码哈希与强度评估模块
//!
//! 凭证生命周期的两个无状态服务：
//!
//! - **哈希器**: 加盐、带成本因子的单向哈希（bcrypt / Argon2id），
//!   产生与验证 [`Credential`] 摘要
//! - **强度评估**: 注册前的强度门槛，产出档位与改进建议
//!
//! ## 示例
//!
//! ```rust
//! use hashlock::password::{hash_password, verify_password, strength::evaluate};
//!
//! // 注册门槛
//! assert!(evaluate("Tr0ub4dor&9").is_strong());
//!
//! // 哈希与验证
//! let credential = hash_password("Tr0ub4dor&9").unwrap();
//! assert!(verify_password("Tr0ub4dor&9", &credential));
//! ```

mod hasher;
pub mod strength;

pub use hasher::{Algorithm, Credential, PasswordHasher, hash_password, verify_password};
pub use strength::{StrengthTier, StrengthVerdict, evaluate};
