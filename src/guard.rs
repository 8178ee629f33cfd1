//! 验证尝试守卫模块
//!
//! 每个凭证作用域一台有界重试状态机：`Open(remaining)` 随失败递减，
//! 归零即转入 `Locked`；成功或重新注册将其复位到 `Open(max)`。
//!
//! 守卫与任何输入读取循环解耦：适配层驱动循环，核心只报告状态。
//!
//! ## 状态转移
//!
//! ```text
//! Open(r) --success--> Open(max)
//! Open(r) --failure--> Open(r-1)   (r-1 > 0)
//! Open(1) --failure--> Locked
//! Locked  --register--> Open(max)
//! ```
//!
//! ## 示例
//!
//! ```rust
//! use hashlock::guard::{AttemptGuard, GuardState};
//!
//! let mut guard = AttemptGuard::new(3);
//! assert_eq!(guard.remaining(), Some(3));
//!
//! guard.record_failure();
//! guard.record_failure();
//! assert_eq!(guard.remaining(), Some(1));
//!
//! assert_eq!(guard.record_failure(), GuardState::Locked);
//! assert!(guard.is_locked());
//!
//! // 只有重新注册（reset）才能解除锁定
//! guard.reset();
//! assert_eq!(guard.remaining(), Some(3));
//! ```

use serde::{Deserialize, Serialize};

/// 守卫状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardState {
    /// 开放，剩余 `remaining` 次验证机会
    Open {
        /// 剩余验证次数
        remaining: u32,
    },

    /// 锁定，拒绝一切验证尝试
    Locked,
}

/// 有界重试守卫
///
/// 不变式：计数器只在单个受护作用域内因验证失败而单调递减；归零置为
/// 锁定后，后续验证调用在触达哈希器之前即被拒绝。
#[derive(Debug, Clone)]
pub struct AttemptGuard {
    max_attempts: u32,
    state: GuardState,
}

impl AttemptGuard {
    /// 创建新的守卫，初始状态为 `Open(max_attempts)`
    ///
    /// # Panics
    ///
    /// `max_attempts` 为 0 时 panic。经 `ManagerConfig` 路径传入的值已在
    /// `validate()` 中检查，不会触发。
    pub fn new(max_attempts: u32) -> Self {
        assert!(max_attempts > 0, "max_attempts must be greater than 0");
        Self {
            max_attempts,
            state: GuardState::Open {
                remaining: max_attempts,
            },
        }
    }

    /// 当前状态
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// 是否已锁定
    pub fn is_locked(&self) -> bool {
        matches!(self.state, GuardState::Locked)
    }

    /// 剩余验证次数，锁定时为 `None`
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            GuardState::Open { remaining } => Some(remaining),
            GuardState::Locked => None,
        }
    }

    /// 配置的最大验证次数
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 记录一次成功验证，复位到 `Open(max)`
    pub fn record_success(&mut self) {
        self.reset();
    }

    /// 记录一次失败验证，返回转移后的状态
    ///
    /// 已锁定时保持锁定。
    pub fn record_failure(&mut self) -> GuardState {
        self.state = match self.state {
            GuardState::Open { remaining } if remaining > 1 => GuardState::Open {
                remaining: remaining - 1,
            },
            _ => GuardState::Locked,
        };
        self.state
    }

    /// 复位到初始状态 `Open(max)`
    ///
    /// 对应同一作用域内注册新凭证。
    pub fn reset(&mut self) {
        self.state = GuardState::Open {
            remaining: self.max_attempts,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let guard = AttemptGuard::new(3);
        assert_eq!(guard.state(), GuardState::Open { remaining: 3 });
        assert_eq!(guard.remaining(), Some(3));
        assert!(!guard.is_locked());
    }

    #[test]
    fn test_failure_decrements() {
        let mut guard = AttemptGuard::new(3);

        assert_eq!(guard.record_failure(), GuardState::Open { remaining: 2 });
        assert_eq!(guard.record_failure(), GuardState::Open { remaining: 1 });
        assert_eq!(guard.record_failure(), GuardState::Locked);
        assert!(guard.is_locked());
        assert_eq!(guard.remaining(), None);
    }

    #[test]
    fn test_locked_stays_locked() {
        let mut guard = AttemptGuard::new(1);
        guard.record_failure();
        assert!(guard.is_locked());

        assert_eq!(guard.record_failure(), GuardState::Locked);
        assert!(guard.is_locked());
    }

    #[test]
    fn test_success_resets_counter() {
        let mut guard = AttemptGuard::new(3);
        guard.record_failure();
        guard.record_failure();
        assert_eq!(guard.remaining(), Some(1));

        guard.record_success();
        assert_eq!(guard.remaining(), Some(3));
    }

    #[test]
    fn test_reset_clears_lockout() {
        let mut guard = AttemptGuard::new(2);
        guard.record_failure();
        guard.record_failure();
        assert!(guard.is_locked());

        guard.reset();
        assert_eq!(guard.state(), GuardState::Open { remaining: 2 });
    }

    #[test]
    fn test_single_attempt_guard() {
        let mut guard = AttemptGuard::new(1);
        assert_eq!(guard.record_failure(), GuardState::Locked);
    }

    #[test]
    #[should_panic(expected = "max_attempts must be greater than 0")]
    fn test_zero_attempts_panics() {
        AttemptGuard::new(0);
    }
}
