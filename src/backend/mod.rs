//! Backend Module
//!
//! The key-value primitives the cache is built on, with an in-process
//! implementation and a Redis-backed one.

mod memory;
mod redis;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

// == Backend Trait ==
/// The primitives consumed by the cache.
///
/// Each call is expected to be atomic on its own. Nothing groups several
/// calls into a transaction.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Removes every key.
    async fn flush(&self) -> Result<()>;

    /// Stores `value` verbatim under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the plain value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer stored under `key` and returns the new value.
    ///
    /// A missing key counts as zero.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list stored under `key`, creating it if needed.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the whole list stored under `key`; a missing key is an empty list.
    async fn lrange_all(&self, key: &str) -> Result<Vec<Vec<u8>>>;
}
