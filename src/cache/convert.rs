//! Converters
//!
//! Functions turning raw stored bytes into typed values, for `Cache::get_with`.

use std::error::Error;

/// Error type a converter may return.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Result of applying a converter.
pub type ConvertResult<T> = std::result::Result<T, BoxError>;

/// Decodes the bytes as UTF-8 text.
pub fn utf8(raw: Vec<u8>) -> ConvertResult<String> {
    Ok(String::from_utf8(raw)?)
}

/// Parses the bytes as a decimal integer, ignoring surrounding whitespace.
pub fn integer(raw: Vec<u8>) -> ConvertResult<i64> {
    let text = std::str::from_utf8(&raw)?;
    Ok(text.trim().parse::<i64>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        assert_eq!(utf8(b"hello".to_vec()).unwrap(), "hello");
        assert_eq!(utf8(Vec::new()).unwrap(), "");
        assert!(utf8(vec![0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(b"42".to_vec()).unwrap(), 42);
        assert_eq!(integer(b"-17".to_vec()).unwrap(), -17);
        assert_eq!(integer(b"+5".to_vec()).unwrap(), 5);
        assert_eq!(integer(b" 8\n".to_vec()).unwrap(), 8);
        assert_eq!(integer(b"0".to_vec()).unwrap(), 0);
    }

    #[test]
    fn test_integer_rejects_non_integers() {
        assert!(integer(b"4.2".to_vec()).is_err());
        assert!(integer(b"abc".to_vec()).is_err());
        assert!(integer(Vec::new()).is_err());
        assert!(integer(vec![0xff]).is_err());
    }
}
