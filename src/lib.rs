//! # HashLock
//!
//! 密码确认保险库：注册时经强度门槛后加盐单向哈希，之后在有界的验证
//! 次数内与存储的摘要比对，摘要值本身只有在一次全新的成功验证之后才会
//! 披露。
//!
//! ## 功能特性
//!
//! - **强度门槛**: 确定性的 Weak / Moderate / Strong 分档与改进建议，
//!   只有 Strong 档位可以注册
//! - **加盐哈希**: bcrypt（默认）与 Argon2id，每次哈希使用全新随机盐
//! - **有界验证**: 每个作用域一台尝试守卫，失败次数耗尽即锁定，
//!   只有重新注册才能解除
//! - **作用域存储**: 进程级（Ephemeral）、会话级（Session）、
//!   单次使用（Transient）三种生命周期策略
//! - **门控披露**: 摘要的规范字符串编码只在验证成功的同一次调用内返回
//! - **审计日志**: 可选的安全事件记录，绝不含密码材料
//!
//! 核心不包含 HTTP 路由、模板或进程入口；适配层通过
//! [`CredentialManager`] 的操作接入。
//!
//! ## 快速上手
//!
//! ```rust
//! use hashlock::{CredentialManager, Error, ManagerConfig};
//!
//! let config = ManagerConfig::new().with_bcrypt_cost(4);
//! let manager = CredentialManager::new(config).unwrap();
//!
//! // 注册（强度门槛）
//! manager.register("Tr0ub4dor&9").unwrap();
//!
//! // 验证（有界尝试）
//! assert!(manager.verify("Tr0ub4dor&9").is_ok());
//!
//! // 披露摘要（需要一次全新的成功验证）
//! let credential = manager.reveal_hash("Tr0ub4dor&9").unwrap();
//! assert!(credential.encoded().starts_with("$2"));
//! ```
//!
//! ## 会话作用域
//!
//! ```rust
//! use hashlock::{CredentialManager, ManagerConfig};
//! use hashlock::store::SessionStore;
//!
//! let sessions = SessionStore::new();
//! let config = ManagerConfig::new().with_bcrypt_cost(4);
//! let manager = CredentialManager::for_session(&sessions, "sess-1", config).unwrap();
//!
//! manager.register("Tr0ub4dor&9").unwrap();
//!
//! // 会话失效后凭证随之消失
//! sessions.invalidate("sess-1").unwrap();
//! assert!(manager.verify("Tr0ub4dor&9").is_err());
//! ```

pub mod audit;
pub mod error;
pub mod guard;
pub mod manager;
pub mod password;
pub mod random;
pub mod store;

pub use error::{Error, Result};

// ============================================================================
// 密码相关导出
// ============================================================================

pub use password::{
    Algorithm, Credential, PasswordHasher, StrengthTier, StrengthVerdict, hash_password,
    verify_password,
};

// ============================================================================
// 守卫与存储导出
// ============================================================================

pub use guard::{AttemptGuard, GuardState};
pub use store::{
    CredentialStore, EphemeralStore, SessionScope, SessionStore, StorageScope, TransientStore,
    generate_scope_id,
};

// ============================================================================
// 管理器与审计导出
// ============================================================================

pub use audit::{AuditLogger, InMemoryAuditLogger, SecurityEvent};
pub use manager::{CredentialManager, ManagerConfig};
