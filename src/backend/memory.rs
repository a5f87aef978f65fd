//! Memory Backend Module
//!
//! In-process backend: a HashMap of plain values and lists behind a shared
//! lock, following Redis semantics for the commands the cache uses.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::backend::Backend;
use crate::error::{CacheError, Result};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

// == Slot ==
/// What a single key holds.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(Vec<u8>),
    List(Vec<Vec<u8>>),
}

// == Memory Backend ==
/// Backend kept entirely in process memory.
///
/// Clones share the same map, so several caches built from clones observe
/// (and flush) the same data, like clients of one server.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no key is held.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

fn parse_counter(raw: &[u8]) -> Result<i64> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            CacheError::Backend("ERR value is not an integer or out of range".to_string())
        })
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn flush(&self) -> Result<()> {
        let mut slots = self.slots.write().await;
        let removed = slots.len();
        slots.clear();
        trace!("FLUSHDB removed {} keys", removed);
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), Slot::Value(value.to_vec()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let slots = self.slots.read().await;
        match slots.get(key) {
            Some(Slot::Value(value)) => Ok(Some(value.clone())),
            Some(Slot::List(_)) => Err(CacheError::Backend(WRONG_TYPE.to_string())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut slots = self.slots.write().await;
        let current = match slots.get(key) {
            Some(Slot::Value(raw)) => parse_counter(raw)?,
            Some(Slot::List(_)) => return Err(CacheError::Backend(WRONG_TYPE.to_string())),
            None => 0,
        };

        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::Backend("ERR increment or decrement would overflow".to_string())
        })?;
        slots.insert(key.to_string(), Slot::Value(next.to_string().into_bytes()));
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut slots = self.slots.write().await;
        match slots
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()))
        {
            Slot::List(items) => {
                items.push(value.to_vec());
                Ok(())
            }
            Slot::Value(_) => Err(CacheError::Backend(WRONG_TYPE.to_string())),
        }
    }

    async fn lrange_all(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        let slots = self.slots.read().await;
        match slots.get(key) {
            Some(Slot::List(items)) => Ok(items.clone()),
            Some(Slot::Value(_)) => Err(CacheError::Backend(WRONG_TYPE.to_string())),
            None => Ok(Vec::new()),
        }
    }
}
