//! 统一错误类型模块
//!
//! 提供 hashlock 库中所有操作的错误类型定义。
//!
//! 核心中不存在不可恢复的错误种类：所有预期的失败路径都以带类型的
//! 变体返回，适配层负责将其翻译为用户可见的消息或退出码。

use std::fmt;

/// hashlock 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// hashlock 库的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 密码强度不足，注册被拒绝
    WeakPassword {
        /// 改进建议，按固定优先级排序
        hints: Vec<String>,
    },

    /// 密码不匹配，消耗一次验证机会
    Mismatch {
        /// 剩余验证次数（转入锁定时为 0）
        remaining: u32,
    },

    /// 验证次数耗尽，作用域已锁定，需重新注册才能解除
    LockedOut,

    /// 作用域内没有已注册的凭证
    NoCredential,

    /// 摘要生成错误
    Hash(HashError),

    /// 配置错误
    Config(ConfigError),

    /// 存储错误
    Store(StoreError),

    /// 随机数生成错误
    Crypto(CryptoError),
}

impl Error {
    /// 创建一个配置错误
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config(ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        })
    }

    /// 是否为锁定错误
    ///
    /// 适配层据此停止继续提示输入，展示与 [`Error::Mismatch`] 不同的消息。
    pub fn is_locked_out(&self) -> bool {
        matches!(self, Error::LockedOut)
    }
}

/// 摘要生成相关错误
///
/// 仅覆盖哈希的生成路径；验证路径对畸形输入一律安静地失败（返回不匹配），
/// 不会出现在这里。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// 哈希生成失败
    HashFailed(String),
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

/// 存储相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 锁被污染（持锁线程 panic）
    LockPoisoned,
    /// 操作失败
    OperationFailed(String),
}

/// 随机数相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WeakPassword { hints } => {
                write!(f, "password too weak: {}", hints.join("; "))
            }
            Error::Mismatch { remaining } => {
                write!(f, "password mismatch, {} attempts remaining", remaining)
            }
            Error::LockedOut => {
                write!(f, "too many failed attempts, locked until re-registration")
            }
            Error::NoCredential => write!(f, "no credential registered"),
            Error::Hash(e) => write!(f, "hash error: {}", e),
            Error::Config(e) => write!(f, "config error: {}", e),
            Error::Store(e) => write!(f, "store error: {}", e),
            Error::Crypto(e) => write!(f, "crypto error: {}", e),
        }
    }
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::HashFailed(msg) => write!(f, "hash generation failed: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned => write!(f, "store lock poisoned"),
            StoreError::OperationFailed(msg) => write!(f, "store operation failed: {}", msg),
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => {
                write!(f, "random number generation failed: {}", msg)
            }
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::error::Error for HashError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StoreError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<HashError> for Error {
    fn from(err: HashError) -> Self {
        Error::Hash(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}
