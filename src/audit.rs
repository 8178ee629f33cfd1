//! 审计日志模块
//!
//! 记录凭证生命周期中的安全事件：注册、验证成败、锁定、摘要披露、
//! 作用域清除。事件只携带计数和作用域标签，绝不包含明文密码或摘要值。
//!
//! ## 使用示例
//!
//! ```rust
//! use hashlock::audit::{AuditLogger, EventType, InMemoryAuditLogger, SecurityEvent};
//!
//! let logger = InMemoryAuditLogger::new();
//!
//! logger.log(SecurityEvent::verify_succeeded());
//! logger.log(SecurityEvent::verify_failed(2));
//!
//! let events = logger.get_events();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].event_type, EventType::VerifyFailed);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 事件严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventSeverity {
    /// 一般信息
    #[default]
    Info,
    /// 警告
    Warning,
    /// 错误
    Error,
}

impl std::fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSeverity::Info => write!(f, "INFO"),
            EventSeverity::Warning => write!(f, "WARNING"),
            EventSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// 安全事件类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// 凭证注册成功
    CredentialRegistered,
    /// 注册因强度不足被拒绝
    RegistrationRejected,
    /// 验证成功
    VerifySucceeded,
    /// 验证失败
    VerifyFailed,
    /// 作用域转入锁定
    ScopeLocked,
    /// 摘要被披露
    HashRevealed,
    /// 作用域被清除
    ScopeCleared,
    /// 自定义事件
    Custom(String),
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::CredentialRegistered => write!(f, "credential_registered"),
            EventType::RegistrationRejected => write!(f, "registration_rejected"),
            EventType::VerifySucceeded => write!(f, "verify_succeeded"),
            EventType::VerifyFailed => write!(f, "verify_failed"),
            EventType::ScopeLocked => write!(f, "scope_locked"),
            EventType::HashRevealed => write!(f, "hash_revealed"),
            EventType::ScopeCleared => write!(f, "scope_cleared"),
            EventType::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// 安全事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// 事件类型
    pub event_type: EventType,

    /// 严重程度
    pub severity: EventSeverity,

    /// 事件时间
    pub timestamp: DateTime<Utc>,

    /// 额外的元数据（计数、作用域标签等，绝不含密码材料）
    #[serde(default)]
    pub details: HashMap<String, String>,
}

impl SecurityEvent {
    fn new(event_type: EventType, severity: EventSeverity) -> Self {
        Self {
            event_type,
            severity,
            timestamp: Utc::now(),
            details: HashMap::new(),
        }
    }

    /// 凭证注册成功事件
    pub fn credential_registered() -> Self {
        Self::new(EventType::CredentialRegistered, EventSeverity::Info)
    }

    /// 注册被拒绝事件
    pub fn registration_rejected(hint_count: usize) -> Self {
        Self::new(EventType::RegistrationRejected, EventSeverity::Warning)
            .with_detail("hint_count", hint_count.to_string())
    }

    /// 验证成功事件
    pub fn verify_succeeded() -> Self {
        Self::new(EventType::VerifySucceeded, EventSeverity::Info)
    }

    /// 验证失败事件
    pub fn verify_failed(remaining: u32) -> Self {
        Self::new(EventType::VerifyFailed, EventSeverity::Warning)
            .with_detail("remaining", remaining.to_string())
    }

    /// 作用域锁定事件
    pub fn scope_locked() -> Self {
        Self::new(EventType::ScopeLocked, EventSeverity::Error)
    }

    /// 摘要披露事件
    pub fn hash_revealed() -> Self {
        Self::new(EventType::HashRevealed, EventSeverity::Warning)
    }

    /// 作用域清除事件
    pub fn scope_cleared() -> Self {
        Self::new(EventType::ScopeCleared, EventSeverity::Info)
    }

    /// 自定义事件
    pub fn custom(name: impl Into<String>, severity: EventSeverity) -> Self {
        Self::new(EventType::Custom(name.into()), severity)
    }

    /// 添加元数据
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// 审计日志 trait
///
/// 实现此 trait 以接入自定义的日志后端。实现必须吞掉自身的失败：
/// 审计不可用不能让凭证操作失败。
pub trait AuditLogger: Send + Sync {
    /// 记录一个事件
    fn log(&self, event: SecurityEvent);
}

/// 内存审计日志实现
///
/// 用于测试和开发。克隆出的句柄共享同一事件序列。
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLogger {
    events: Arc<RwLock<Vec<SecurityEvent>>>,
}

impl InMemoryAuditLogger {
    /// 创建新的内存日志器
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有事件
    pub fn get_events(&self) -> Vec<SecurityEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// 按类型过滤事件
    pub fn get_events_by_type(&self, event_type: &EventType) -> Vec<SecurityEvent> {
        self.get_events()
            .into_iter()
            .filter(|e| &e.event_type == event_type)
            .collect()
    }

    /// 清空事件
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }

    /// 事件数量
    pub fn len(&self) -> usize {
        self.events.read().map(|events| events.len()).unwrap_or(0)
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLogger for InMemoryAuditLogger {
    fn log(&self, event: SecurityEvent) {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
        }
    }
}
