//! 密码强度评估模块
//!
//! 将候选密码划分为粗粒度的强度档位（Weak / Moderate / Strong），并为
//! 每个未满足的标准生成改进建议。纯函数，无状态，无副作用。
//!
//! 建议按固定优先级生成：长度 → 字符多样性 → 常见密码 → 模式，
//! 因此对同一输入输出完全确定。
//!
//! ## 示例
//!
//! ```rust
//! use hashlock::password::strength::{StrengthTier, evaluate};
//!
//! let verdict = evaluate("Tr0ub4dor&9");
//! assert_eq!(verdict.tier, StrengthTier::Strong);
//! assert!(verdict.hints.is_empty());
//!
//! let verdict = evaluate("password");
//! assert_eq!(verdict.tier, StrengthTier::Weak);
//! ```

use serde::{Deserialize, Serialize};

/// 密码强度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthTier {
    /// 弱 - 注册被拒绝
    Weak = 0,
    /// 一般 - 有未满足的标准，注册仍被拒绝
    Moderate = 1,
    /// 强 - 可以注册
    Strong = 2,
}

impl StrengthTier {
    /// 获取档位的描述
    pub fn description(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak - easily cracked",
            StrengthTier::Moderate => "Moderate - improvements needed",
            StrengthTier::Strong => "Strong - acceptable for registration",
        }
    }
}

/// 密码强度评估结果
///
/// 不变式：`hints` 为空当且仅当 `tier` 为 [`StrengthTier::Strong`]。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthVerdict {
    /// 强度档位
    pub tier: StrengthTier,
    /// 改进建议，按固定优先级排序
    pub hints: Vec<String>,
}

impl StrengthVerdict {
    /// 是否达到注册门槛
    pub fn is_strong(&self) -> bool {
        self.tier == StrengthTier::Strong
    }
}

/// 达到 Strong 所需的最小长度
pub const STRONG_MIN_LENGTH: usize = 10;

/// 低于此长度直接判为 Weak
pub const HARD_MIN_LENGTH: usize = 8;

// ============================================================================
// 常见弱密码列表
// ============================================================================

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "12345678",
    "123456789",
    "qwerty",
    "abc123",
    "password1",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "master",
    "login",
    "princess",
    "starwars",
    "hello",
    "freedom",
    "whatever",
    "trustno1",
    "iloveyou",
    "sunshine",
    "shadow",
    "superman",
    "football",
    "baseball",
    "batman",
];

// ============================================================================
// 特征分析
// ============================================================================

/// 密码的结构特征
#[derive(Debug, Clone, Default)]
struct PasswordFeatures {
    length: usize,
    has_lowercase: bool,
    has_uppercase: bool,
    has_digit: bool,
    has_symbol: bool,
    has_repeats: bool,
    has_sequences: bool,
}

/// 分析密码的结构特征
fn analyze(password: &str) -> PasswordFeatures {
    let chars: Vec<char> = password.chars().collect();
    let mut features = PasswordFeatures {
        length: chars.len(),
        ..Default::default()
    };

    for (i, c) in chars.iter().enumerate() {
        if c.is_lowercase() {
            features.has_lowercase = true;
        }
        if c.is_uppercase() {
            features.has_uppercase = true;
        }
        if c.is_ascii_digit() {
            features.has_digit = true;
        }
        if is_symbol(*c) {
            features.has_symbol = true;
        }

        // 连续三个相同字符 (如 aaa, 111)
        if i >= 2 && chars[i] == chars[i - 1] && chars[i] == chars[i - 2] {
            features.has_repeats = true;
        }

        // 连续三个递增或递减的码点 (如 abc, 321)
        if i >= 2 {
            let c0 = chars[i - 2] as i32;
            let c1 = chars[i - 1] as i32;
            let c2 = chars[i] as i32;
            if (c1 - c0 == 1 && c2 - c1 == 1) || (c0 - c1 == 1 && c1 - c2 == 1) {
                features.has_sequences = true;
            }
        }
    }

    features
}

/// 检查字符是否为符号
fn is_symbol(c: char) -> bool {
    c.is_ascii_punctuation() || (c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace())
}

/// 检查是否命中常见密码列表（忽略大小写的精确匹配）
fn is_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|p| *p == lower)
}

// ============================================================================
// 公共 API
// ============================================================================

/// 评估密码强度
///
/// 确定性的纯函数：对任意正常输入不会失败，空字符串判为 Weak 并给出
/// "must not be empty" 建议。任何单一否决信号（过短、命中常见密码列表）
/// 直接强制档位为 Weak，不论其它信号如何。
///
/// # Example
///
/// ```rust
/// use hashlock::password::strength::evaluate;
///
/// let verdict = evaluate("Tr0ub4dor");
/// assert!(!verdict.is_strong());
/// // 建议顺序固定：长度在前，缺失的字符类在后
/// assert_eq!(verdict.hints[0], "use at least 10 characters");
/// ```
pub fn evaluate(password: &str) -> StrengthVerdict {
    if password.is_empty() {
        return StrengthVerdict {
            tier: StrengthTier::Weak,
            hints: vec!["must not be empty".to_string()],
        };
    }

    let features = analyze(password);
    let mut hints = Vec::new();

    // 1. 长度
    if features.length < STRONG_MIN_LENGTH {
        hints.push(format!("use at least {} characters", STRONG_MIN_LENGTH));
    }

    // 2. 字符多样性
    if !features.has_lowercase {
        hints.push("add lowercase letters".to_string());
    }
    if !features.has_uppercase {
        hints.push("add uppercase letters".to_string());
    }
    if !features.has_digit {
        hints.push("add digits".to_string());
    }
    if !features.has_symbol {
        hints.push("add symbols (e.g. !@#$%^&*)".to_string());
    }

    // 3. 常见密码
    let denylisted = is_common_password(password);
    if denylisted {
        hints.push("avoid well-known passwords".to_string());
    }

    // 4. 模式
    if features.has_repeats {
        hints.push("avoid repeated characters (e.g. aaa, 111)".to_string());
    }
    if features.has_sequences {
        hints.push("avoid sequential characters (e.g. abc, 123)".to_string());
    }

    let disqualified = features.length < HARD_MIN_LENGTH || denylisted;
    let tier = if disqualified {
        StrengthTier::Weak
    } else if hints.is_empty() {
        StrengthTier::Strong
    } else {
        StrengthTier::Moderate
    };

    StrengthVerdict { tier, hints }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let verdict = evaluate("");
        assert_eq!(verdict.tier, StrengthTier::Weak);
        assert_eq!(verdict.hints, vec!["must not be empty".to_string()]);
    }

    #[test]
    fn test_common_password_forces_weak() {
        // 长度和多样性都不能挽救命中列表的密码
        let verdict = evaluate("Password123");
        assert!(!verdict.is_strong());

        let verdict = evaluate("password");
        assert_eq!(verdict.tier, StrengthTier::Weak);
        assert!(
            verdict
                .hints
                .iter()
                .any(|h| h == "avoid well-known passwords")
        );
    }

    #[test]
    fn test_too_short_forces_weak() {
        // 全部四类字符齐备但长度不足 8
        let verdict = evaluate("Ab1!xyz");
        assert_eq!(verdict.tier, StrengthTier::Weak);
        assert_eq!(verdict.hints[0], "use at least 10 characters");
    }

    #[test]
    fn test_moderate_when_criteria_unmet() {
        // 9 个字符且缺少符号：两个未满足的标准，但没有否决信号
        let verdict = evaluate("Tr0ub4dor");
        assert_eq!(verdict.tier, StrengthTier::Moderate);
        assert_eq!(
            verdict.hints,
            vec![
                "use at least 10 characters".to_string(),
                "add symbols (e.g. !@#$%^&*)".to_string(),
            ]
        );
    }

    #[test]
    fn test_strong_password() {
        let verdict = evaluate("Tr0ub4dor&9");
        assert_eq!(verdict.tier, StrengthTier::Strong);
        assert!(verdict.hints.is_empty());
    }

    #[test]
    fn test_hints_empty_iff_strong() {
        for candidate in ["", "abc", "password", "Tr0ub4dor", "Tr0ub4dor&9", "aaa111"] {
            let verdict = evaluate(candidate);
            assert_eq!(
                verdict.hints.is_empty(),
                verdict.is_strong(),
                "invariant violated for {:?}",
                candidate
            );
        }
    }

    #[test]
    fn test_repeated_characters_hint() {
        let verdict = evaluate("Maaa9#qkzL");
        assert!(!verdict.is_strong());
        assert!(
            verdict
                .hints
                .iter()
                .any(|h| h.starts_with("avoid repeated"))
        );
    }

    #[test]
    fn test_sequential_characters_hint() {
        let verdict = evaluate("Mabc9#qkzL");
        assert!(!verdict.is_strong());
        assert!(
            verdict
                .hints
                .iter()
                .any(|h| h.starts_with("avoid sequential"))
        );

        // 递减序列同样被识别
        let verdict = evaluate("M321x#qkzL");
        assert!(
            verdict
                .hints
                .iter()
                .any(|h| h.starts_with("avoid sequential"))
        );
    }

    #[test]
    fn test_deterministic_output() {
        let a = evaluate("Tr0ub4dor");
        let b = evaluate("Tr0ub4dor");
        assert_eq!(a.tier, b.tier);
        assert_eq!(a.hints, b.hints);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(StrengthTier::Weak < StrengthTier::Moderate);
        assert!(StrengthTier::Moderate < StrengthTier::Strong);
    }

    #[test]
    fn test_tier_description() {
        assert!(!StrengthTier::Weak.description().is_empty());
        assert!(!StrengthTier::Strong.description().is_empty());
    }
}
