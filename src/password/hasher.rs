//! 密码哈希实现
//!
//! 提供加盐、带成本因子的单向哈希和验证，以及不可逆的凭证摘要类型。

use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, HashError, Result};
use crate::random::constant_time_compare;

/// 支持的哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// bcrypt - 默认算法，原系统使用的算法
    #[default]
    Bcrypt,

    /// Argon2id - 内存硬算法，抵抗 GPU/ASIC 攻击
    Argon2id,
}

/// 凭证摘要
///
/// 密码经加盐单向哈希后的规范字符串编码（盐与哈希一体，可直接用于
/// 后续验证的重建）。一经创建不可变，绝不包含明文。
///
/// 相等比较为常数时间。
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential {
    encoded: String,
}

impl Credential {
    /// 从规范字符串编码重建凭证
    ///
    /// 供适配层从外部存储（cookie、表单往返等）恢复摘要时使用。
    /// 不做格式校验：畸形编码在验证时安静地判为不匹配。
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// 获取规范字符串编码
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// 取出规范字符串编码
    pub fn into_encoded(self) -> String {
        self.encoded
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        constant_time_compare(self.encoded.as_bytes(), other.encoded.as_bytes())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoded)
    }
}

/// 密码哈希器
///
/// 无状态服务，可被多个作用域以引用共享。每次 [`hash`](Self::hash)
/// 调用生成全新的随机盐，因此同一输入两次哈希必然产生不同摘要。
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// 使用的哈希算法
    algorithm: Algorithm,

    /// bcrypt 的 cost 参数 (4-31, 默认 12)
    bcrypt_cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// 创建新的密码哈希器
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashlock::password::{Algorithm, PasswordHasher};
    ///
    /// let hasher = PasswordHasher::new(Algorithm::Bcrypt);
    /// ```
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// 设置 bcrypt 的 cost 参数
    ///
    /// # Panics
    ///
    /// 如果 cost 不在 4-31 范围内会 panic。经 `ManagerConfig` 路径传入的
    /// cost 已在 `validate()` 中检查，不会触发。
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        assert!(
            (4..=31).contains(&cost),
            "bcrypt cost must be between 4 and 31"
        );
        self.bcrypt_cost = cost;
        self
    }

    /// 哈希密码
    ///
    /// 每次调用生成新的随机盐；对相同输入的两次调用产生不同摘要，
    /// 这是必需的性质而非缺陷。
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashlock::password::{Algorithm, PasswordHasher};
    ///
    /// let hasher = PasswordHasher::new(Algorithm::Bcrypt).with_bcrypt_cost(4);
    /// let credential = hasher.hash("my_password").unwrap();
    /// assert!(credential.encoded().starts_with("$2"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<Credential> {
        match self.algorithm {
            Algorithm::Bcrypt => self.hash_bcrypt(password),
            Algorithm::Argon2id => self.hash_argon2(password),
        }
    }

    /// 验证密码
    ///
    /// 使用摘要内嵌的盐重新计算并做常数时间比较。安静地失败：畸形或
    /// 损坏的摘要一律返回 `false` 而不是向调用方抛错，管理器将其与密码
    /// 错误同等对待。
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashlock::password::{Algorithm, PasswordHasher};
    ///
    /// let hasher = PasswordHasher::new(Algorithm::Bcrypt).with_bcrypt_cost(4);
    /// let credential = hasher.hash("my_password").unwrap();
    ///
    /// assert!(hasher.verify("my_password", &credential));
    /// assert!(!hasher.verify("wrong_password", &credential));
    /// ```
    pub fn verify(&self, password: &str, credential: &Credential) -> bool {
        let encoded = credential.encoded();

        // 自动检测摘要格式
        if encoded.starts_with("$argon2") {
            return verify_argon2(password, encoded);
        }
        if encoded.starts_with("$2") {
            return bcrypt::verify(password, encoded).unwrap_or(false);
        }

        // 未知格式视为不匹配
        false
    }

    // ========================================================================
    // bcrypt 实现
    // ========================================================================

    fn hash_bcrypt(&self, password: &str) -> Result<Credential> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map(Credential::from_encoded)
            .map_err(|e| {
                Error::Hash(HashError::HashFailed(format!("bcrypt hash failed: {}", e)))
            })
    }

    // ========================================================================
    // Argon2 实现
    // ========================================================================

    fn hash_argon2(&self, password: &str) -> Result<Credential> {
        let mut salt_bytes = [0u8; 16];
        getrandom::fill(&mut salt_bytes).map_err(|e| {
            Error::Hash(HashError::HashFailed(format!(
                "failed to generate random salt: {}",
                e
            )))
        })?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            Error::Hash(HashError::HashFailed(format!(
                "failed to encode salt: {}",
                e
            )))
        })?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| Credential::from_encoded(h.to_string()))
            .map_err(|e| {
                Error::Hash(HashError::HashFailed(format!("argon2 hash failed: {}", e)))
            })
    }
}

fn verify_argon2(password: &str, encoded: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 使用默认哈希器哈希密码
///
/// # Example
///
/// ```rust
/// use hashlock::password::hash_password;
///
/// let credential = hash_password("my_secure_password").unwrap();
/// assert!(credential.encoded().starts_with("$2"));
/// ```
pub fn hash_password(password: &str) -> Result<Credential> {
    PasswordHasher::default().hash(password)
}

/// 验证密码是否匹配摘要
///
/// 自动检测摘要格式（bcrypt 或 Argon2）。
///
/// # Example
///
/// ```rust
/// use hashlock::password::{hash_password, verify_password};
///
/// let credential = hash_password("my_secure_password").unwrap();
///
/// assert!(verify_password("my_secure_password", &credential));
/// assert!(!verify_password("wrong_password", &credential));
/// ```
pub fn verify_password(password: &str, credential: &Credential) -> bool {
    PasswordHasher::default().verify(password, credential)
}
