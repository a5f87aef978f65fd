//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its backends.
///
/// A missing key is never an error: lookups return `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend rejected or failed a command
    #[error("Backend error: {0}")]
    Backend(String),

    /// A converter could not turn the stored bytes into the requested type
    #[error("Conversion failed for key {key}: {reason}")]
    Conversion { key: String, reason: String },

    /// A call counter holds something other than a decimal integer
    #[error("Invalid call counter for {name}: {raw:?}")]
    InvalidCounter { name: String, raw: String },

    /// Writing replay output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_names_key() {
        let err = CacheError::Conversion {
            key: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conversion failed for key abc: invalid digit found in string"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: CacheError = io.into();
        assert!(matches!(err, CacheError::Io(_)));
    }
}
