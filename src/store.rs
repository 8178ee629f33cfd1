//! 凭证存储模块
//!
//! 三种可互换的存储实现共享同一契约：`set` / `get` / `clear` /
//! `is_set`。策略差异仅在于底层值何时消失：
//!
//! - [`EphemeralStore`]: 进程内存，进程范围共享，进程重启或显式
//!   `clear()` 才消失
//! - [`SessionStore`]: 按适配层提供的不透明会话标识符划分命名空间，
//!   会话失效时由适配层清除
//! - [`TransientStore`]: `get()` 在单次读取后即清除，后续使用必须
//!   重新注册
//!
//! 所有实现内部同步（`&self` + 内部可变性），可安全地跨线程共享。
//! 核心对 cookie 一无所知，只认识作用域标识符和它的 `clear()` 生命周期。
//!
//! ## 示例
//!
//! ```rust
//! use hashlock::password::Credential;
//! use hashlock::store::{CredentialStore, SessionStore};
//!
//! let sessions = SessionStore::new();
//! let scope = sessions.scope("session-abc");
//!
//! scope.set(Credential::from_encoded("$2b$04$example")).unwrap();
//! assert!(scope.is_set().unwrap());
//!
//! // 适配层让会话失效后，该作用域即为空
//! sessions.invalidate("session-abc").unwrap();
//! assert!(!scope.is_set().unwrap());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result, StoreError};
use crate::password::Credential;
use crate::random::generate_random_base64_url;

/// 存储作用域策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageScope {
    /// 进程范围共享，进程重启即丢失
    #[default]
    Ephemeral,
    /// 绑定单个用户会话，会话结束时清除
    Session,
    /// 首次使用后立即清除
    Transient,
}

/// 凭证存储契约
///
/// 每个作用域实例同一时刻至多持有一个凭证；`set` 覆盖并使先前的凭证
/// 失效。存储独占凭证值的所有权。
pub trait CredentialStore: Send + Sync {
    /// 存入凭证，覆盖已有值
    fn set(&self, credential: Credential) -> Result<()>;

    /// 取出当前凭证
    ///
    /// 对 Transient 策略而言这是消耗性的读取。
    fn get(&self) -> Result<Option<Credential>>;

    /// 清空作用域
    fn clear(&self) -> Result<()>;

    /// 非消耗性地探测凭证是否存在
    fn is_set(&self) -> Result<bool>;
}

fn poisoned() -> Error {
    Error::Store(StoreError::LockPoisoned)
}

// ============================================================================
// Ephemeral 实现
// ============================================================================

/// 进程级存储
///
/// 克隆出的句柄共享同一底层槽位，对应原系统进程全局的内存哈希值。
#[derive(Debug, Clone, Default)]
pub struct EphemeralStore {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl EphemeralStore {
    /// 创建新的进程级存储
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for EphemeralStore {
    fn set(&self, credential: Credential) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| poisoned())?;
        *slot = Some(credential);
        Ok(())
    }

    fn get(&self) -> Result<Option<Credential>> {
        let slot = self.slot.read().map_err(|_| poisoned())?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| poisoned())?;
        *slot = None;
        Ok(())
    }

    fn is_set(&self) -> Result<bool> {
        let slot = self.slot.read().map_err(|_| poisoned())?;
        Ok(slot.is_some())
    }
}

// ============================================================================
// Transient 实现
// ============================================================================

/// 单次使用存储
///
/// `get()` 取走值，验证或披露操作读取一次之后即强制重新注册。
#[derive(Debug, Default)]
pub struct TransientStore {
    slot: RwLock<Option<Credential>>,
}

impl TransientStore {
    /// 创建新的单次使用存储
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for TransientStore {
    fn set(&self, credential: Credential) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| poisoned())?;
        *slot = Some(credential);
        Ok(())
    }

    fn get(&self) -> Result<Option<Credential>> {
        let mut slot = self.slot.write().map_err(|_| poisoned())?;
        Ok(slot.take())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| poisoned())?;
        *slot = None;
        Ok(())
    }

    fn is_set(&self) -> Result<bool> {
        let slot = self.slot.read().map_err(|_| poisoned())?;
        Ok(slot.is_some())
    }
}

// ============================================================================
// Session 实现
// ============================================================================

/// 会话级存储
///
/// 以不透明的会话标识符划分命名空间。标识符的铸造与生命周期由适配层
/// 管理；核心只在适配层调用 [`invalidate`](Self::invalidate) 时清除对应
/// 作用域。克隆出的句柄共享同一底层映射。
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slots: Arc<RwLock<HashMap<String, Credential>>>,
}

impl SessionStore {
    /// 创建新的会话级存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取绑定到单个会话标识符的作用域句柄
    pub fn scope(&self, scope_id: impl Into<String>) -> SessionScope {
        SessionScope {
            scope_id: scope_id.into(),
            slots: Arc::clone(&self.slots),
        }
    }

    /// 使一个会话作用域失效，返回其中是否存有凭证
    pub fn invalidate(&self, scope_id: &str) -> Result<bool> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        Ok(slots.remove(scope_id).is_some())
    }

    /// 清空所有会话作用域，返回清除的凭证数量
    pub fn clear_all(&self) -> Result<usize> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        let count = slots.len();
        slots.clear();
        Ok(count)
    }

    /// 当前持有凭证的作用域数量
    pub fn len(&self) -> Result<usize> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.len())
    }

    /// 是否没有任何作用域持有凭证
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// 绑定单个会话标识符的存储句柄
///
/// 实现 [`CredentialStore`] 契约，供 `CredentialManager` 按作用域持有。
#[derive(Debug, Clone)]
pub struct SessionScope {
    scope_id: String,
    slots: Arc<RwLock<HashMap<String, Credential>>>,
}

impl SessionScope {
    /// 该句柄绑定的会话标识符
    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }
}

impl CredentialStore for SessionScope {
    fn set(&self, credential: Credential) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.insert(self.scope_id.clone(), credential);
        Ok(())
    }

    fn get(&self) -> Result<Option<Credential>> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(&self.scope_id).cloned())
    }

    fn clear(&self) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.remove(&self.scope_id);
        Ok(())
    }

    fn is_set(&self) -> Result<bool> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.contains_key(&self.scope_id))
    }
}

/// 铸造一个新的不透明作用域标识符
///
/// 24 字节 CSPRNG 输出的 URL 安全 Base64 编码，供没有自带会话机制的
/// 适配层使用。
///
/// # Example
///
/// ```rust
/// use hashlock::store::generate_scope_id;
///
/// let a = generate_scope_id().unwrap();
/// let b = generate_scope_id().unwrap();
/// assert_ne!(a, b);
/// ```
pub fn generate_scope_id() -> Result<String> {
    generate_random_base64_url(24)
}
