//! Cache Value Module
//!
//! The closed set of value types the cache accepts, and their byte encoding.

use std::fmt;

// == Cache Value ==
/// A value accepted by `Cache::store`.
///
/// The `Debug` form is the literal notation recorded in call history:
/// `"text"`, `b"\x00raw"`, `42`, `2.5`.
#[derive(Clone, PartialEq)]
pub enum CacheValue {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl CacheValue {
    // == Encoding ==
    /// Returns the bytes written to the backend.
    ///
    /// Strings as UTF-8, bytes verbatim, integers in decimal, floats in their
    /// shortest round-trip form with `.0` kept for integral values.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CacheValue::Str(s) => s.as_bytes().to_vec(),
            CacheValue::Bytes(b) => b.clone(),
            CacheValue::Int(i) => i.to_string().into_bytes(),
            CacheValue::Float(f) => format!("{:?}", f).into_bytes(),
        }
    }

    /// Consumes the value, returning its backend encoding.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CacheValue::Str(s) => s.into_bytes(),
            CacheValue::Bytes(b) => b,
            other => other.to_bytes(),
        }
    }
}

impl fmt::Debug for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Str(s) => write!(f, "{:?}", s),
            CacheValue::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            CacheValue::Int(i) => write!(f, "{}", i),
            CacheValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}

// == Conversions ==
impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Str(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Str(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for CacheValue {
    fn from(value: &[u8; N]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        CacheValue::Int(i64::from(value))
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<f32> for CacheValue {
    fn from(value: f32) -> Self {
        CacheValue::Float(f64::from(value))
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}
