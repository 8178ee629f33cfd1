//! 凭证管理器模块
//!
//! 编排凭证生命周期的唯一入口：强度门槛 → 哈希 → 作用域存储 →
//! 有界验证 → 受门控的摘要披露。适配层（命令行、Web 请求处理等）
//! 只与 [`CredentialManager`] 交互。
//!
//! 每个管理器绑定一个存储作用域实例并独占该作用域的
//! [`AttemptGuard`](crate::guard::AttemptGuard)；方法都以 `&self`
//! 调用且内部互斥，同一作用域上的并发 register/verify 被串行化，
//! 跨线程共享时以 `Arc<CredentialManager>` 传递即可。
//!
//! ## 示例
//!
//! ```rust
//! use hashlock::{CredentialManager, Error, ManagerConfig};
//!
//! let config = ManagerConfig::new().with_bcrypt_cost(4);
//! let manager = CredentialManager::new(config).unwrap();
//!
//! // 弱密码被拒绝，存储保持为空
//! assert!(matches!(
//!     manager.register("password"),
//!     Err(Error::WeakPassword { .. })
//! ));
//! assert!(!manager.has_credential().unwrap());
//!
//! // 强密码注册后即可验证
//! manager.register("Tr0ub4dor&9").unwrap();
//! assert!(manager.verify("Tr0ub4dor&9").is_ok());
//! assert!(matches!(
//!     manager.verify("wrong"),
//!     Err(Error::Mismatch { remaining: 2 })
//! ));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::audit::{AuditLogger, SecurityEvent};
use crate::error::{Error, Result, StoreError};
use crate::guard::{AttemptGuard, GuardState};
use crate::password::{Algorithm, Credential, PasswordHasher, strength};
use crate::store::{CredentialStore, EphemeralStore, SessionStore, StorageScope, TransientStore};

/// 凭证管理器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// 锁定前允许的最大验证次数
    pub max_attempts: u32,

    /// 使用的哈希算法
    pub algorithm: Algorithm,

    /// bcrypt 的 cost 参数 (4-31)
    pub bcrypt_cost: u32,

    /// 存储作用域策略
    pub storage_scope: StorageScope,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            algorithm: Algorithm::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            storage_scope: StorageScope::default(),
        }
    }
}

impl ManagerConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置最大验证次数
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// 设置哈希算法
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 设置 bcrypt 的 cost 参数
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// 设置存储作用域策略
    pub fn with_storage_scope(mut self, scope: StorageScope) -> Self {
        self.storage_scope = scope;
        self
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::config(
                "max_attempts",
                "must be greater than 0",
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(Error::config(
                "bcrypt_cost",
                "must be between 4 and 31",
            ));
        }
        Ok(())
    }

    fn build_hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.algorithm).with_bcrypt_cost(self.bcrypt_cost)
    }
}

/// 凭证管理器
///
/// 独占持有一个存储作用域与其验证守卫。明文密码只在调用栈上存在，
/// 任何操作返回后都不会被保留或记录。
pub struct CredentialManager {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    guard: Mutex<AttemptGuard>,
    max_attempts: u32,
    audit: Option<Arc<dyn AuditLogger>>,
}

impl CredentialManager {
    /// 按配置的作用域策略创建管理器
    ///
    /// `Ephemeral` 与 `Transient` 策略在此构造自己的存储；`Session`
    /// 策略需要逐作用域的存储句柄，请使用 [`for_session`](Self::for_session)
    /// 或 [`with_store`](Self::with_store)。
    pub fn new(config: ManagerConfig) -> Result<Self> {
        let store: Arc<dyn CredentialStore> = match config.storage_scope {
            StorageScope::Ephemeral => Arc::new(EphemeralStore::new()),
            StorageScope::Transient => Arc::new(TransientStore::new()),
            StorageScope::Session => {
                return Err(Error::config(
                    "storage_scope",
                    "session scope requires a scoped store, use CredentialManager::for_session",
                ));
            }
        };
        Self::with_store(store, config)
    }

    /// 在会话存储中为单个会话标识符创建管理器
    ///
    /// 每个活跃会话作用域持有一个管理器实例（及其守卫）。
    pub fn for_session(
        sessions: &SessionStore,
        scope_id: impl Into<String>,
        config: ManagerConfig,
    ) -> Result<Self> {
        Self::with_store(Arc::new(sessions.scope(scope_id)), config)
    }

    /// 使用显式注入的存储创建管理器
    ///
    /// 测试按例为每个用例实例化全新的存储。
    pub fn with_store(store: Arc<dyn CredentialStore>, config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            hasher: config.build_hasher(),
            guard: Mutex::new(AttemptGuard::new(config.max_attempts)),
            max_attempts: config.max_attempts,
            audit: None,
        })
    }

    /// 挂接审计日志器
    pub fn with_audit(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit = Some(logger);
        self
    }

    /// 注册密码
    ///
    /// 强度未达 Strong 档位时返回 [`Error::WeakPassword`] 并附带改进
    /// 建议，存储保持不变（可幂等地重试）。通过门槛后哈希入库，并将
    /// 守卫复位到 `Open(max_attempts)` —— 这也是解除锁定的唯一途径。
    pub fn register(&self, password: &str) -> Result<()> {
        let verdict = strength::evaluate(password);
        if !verdict.is_strong() {
            self.emit(SecurityEvent::registration_rejected(verdict.hints.len()));
            return Err(Error::WeakPassword {
                hints: verdict.hints,
            });
        }

        // 哈希是 CPU 密集的无状态计算，放在守卫锁之外
        let credential = self.hasher.hash(password)?;

        let mut guard = self.lock_guard()?;
        self.store.set(credential)?;
        guard.reset();
        self.emit(SecurityEvent::credential_registered());
        Ok(())
    }

    /// 验证密码
    ///
    /// 守卫锁定时立即返回 [`Error::LockedOut`]，既不读取存储也不触达
    /// 哈希器；存储为空时返回 [`Error::NoCredential`]（不消耗验证次数）；
    /// 不匹配时返回 [`Error::Mismatch`] 并附带剩余次数（转入锁定的那次
    /// 为 0）。
    pub fn verify(&self, password: &str) -> Result<()> {
        self.verify_gated(password).map(|_| ())
    }

    /// 披露存储的摘要
    ///
    /// 与 [`verify`](Self::verify) 完全相同的门控：只有本次调用内的一次
    /// 全新成功验证才会返回摘要的规范字符串编码，绝不返回原始明文。
    pub fn reveal_hash(&self, password: &str) -> Result<Credential> {
        let credential = self.verify_gated(password)?;
        self.emit(SecurityEvent::hash_revealed());
        Ok(credential)
    }

    /// 清空作用域并复位守卫
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.lock_guard()?;
        self.store.clear()?;
        guard.reset();
        self.emit(SecurityEvent::scope_cleared());
        Ok(())
    }

    /// 作用域内是否存有凭证
    ///
    /// 非消耗性探测，对 Transient 作用域同样安全。
    pub fn has_credential(&self) -> Result<bool> {
        let _guard = self.lock_guard()?;
        self.store.is_set()
    }

    /// 剩余验证次数，锁定时为 `None`
    pub fn remaining_attempts(&self) -> Result<Option<u32>> {
        Ok(self.lock_guard()?.remaining())
    }

    /// 守卫是否已锁定
    pub fn is_locked(&self) -> Result<bool> {
        Ok(self.lock_guard()?.is_locked())
    }

    /// 配置的最大验证次数
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    // ========================================================================
    // 内部实现
    // ========================================================================

    /// 共享的门控验证路径
    ///
    /// 整个状态转移（锁定检查、存储读取、哈希比较、守卫转移）在守卫锁
    /// 内完成，同一作用域上的并发操作由此串行化。
    fn verify_gated(&self, password: &str) -> Result<Credential> {
        let mut guard = self.lock_guard()?;

        if guard.is_locked() {
            return Err(Error::LockedOut);
        }

        let credential = self.store.get()?.ok_or(Error::NoCredential)?;

        if self.hasher.verify(password, &credential) {
            guard.record_success();
            self.emit(SecurityEvent::verify_succeeded());
            Ok(credential)
        } else {
            let state = guard.record_failure();
            let remaining = match state {
                GuardState::Open { remaining } => remaining,
                GuardState::Locked => 0,
            };
            self.emit(SecurityEvent::verify_failed(remaining));
            if state == GuardState::Locked {
                self.emit(SecurityEvent::scope_locked());
            }
            Err(Error::Mismatch { remaining })
        }
    }

    fn lock_guard(&self) -> Result<MutexGuard<'_, AttemptGuard>> {
        self.guard
            .lock()
            .map_err(|_| Error::Store(StoreError::LockPoisoned))
    }

    fn emit(&self, event: SecurityEvent) {
        if let Some(logger) = &self.audit {
            logger.log(event);
        }
    }
}
