//! 安全随机数生成模块
//!
//! 提供密码学安全的随机字节生成和常数时间比较，用于作用域标识符的
//! 铸造和摘要值的比较。

use rand::{TryRngCore, rngs::OsRng};

use crate::error::{CryptoError, Error, Result};

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Example
///
/// ```rust
/// use hashlock::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(24).unwrap();
/// assert_eq!(bytes.len(), 24);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;
    Ok(bytes)
}

/// 生成指定字节长度的 Base64 URL 安全随机字符串
///
/// 使用 URL 安全的 Base64 编码（不含填充），可直接用于 cookie 值或
/// URL 参数。
///
/// # Example
///
/// ```rust
/// use hashlock::random::generate_random_base64_url;
///
/// let token = generate_random_base64_url(24).unwrap();
/// assert!(!token.contains('+'));
/// assert!(!token.contains('/'));
/// ```
pub fn generate_random_base64_url(byte_length: usize) -> Result<String> {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    let bytes = generate_random_bytes(byte_length)?;
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}

/// 常数时间比较两个字节切片
///
/// 比较耗时不随内容提前分歧的位置变化，用于摘要等敏感值的比较。
/// 长度不同的输入立即返回 `false`（长度本身不是秘密）。
///
/// # Example
///
/// ```rust
/// use hashlock::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"digest", b"digest"));
/// assert!(!constant_time_compare(b"digest", b"forgery"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;

    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_bytes_length() {
        let bytes = generate_random_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_generate_random_bytes_uniqueness() {
        let a = generate_random_bytes(16).unwrap();
        let b = generate_random_bytes(16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_random_base64_url_charset() {
        let token = generate_random_base64_url(24).unwrap();
        assert!(!token.is_empty());
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"hello", b"hello"));
        assert!(!constant_time_compare(b"hello", b"world"));
        assert!(!constant_time_compare(b"hello", b"hell"));
        assert!(constant_time_compare(b"", b""));
    }
}
