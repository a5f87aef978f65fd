//! Cache Store Module
//!
//! The cache itself: UUID-keyed writes through an instrumented store
//! operation, and plain or converted reads.

use async_trait::async_trait;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::backend::Backend;
use crate::cache::convert::{self, ConvertResult};
use crate::cache::CacheValue;
use crate::error::{CacheError, Result};
use crate::instrument::{instrument, BoundOperation, Instrumented, Operation};

/// Name under which `Cache::store` is counted and history-logged.
pub const STORE_OPERATION: &str = "Cache.store";

// == Store Operation ==
/// Writes one value under a fresh v4 UUID and returns the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOperation;

#[async_trait]
impl<B: Backend> Operation<B> for StoreOperation {
    type Input = (CacheValue,);
    type Output = String;

    fn name(&self) -> &'static str {
        STORE_OPERATION
    }

    async fn call(&self, backend: &B, input: Self::Input) -> Result<Self::Output> {
        let (data,) = input;
        let key = Uuid::new_v4().to_string();
        backend.set(&key, &data.into_bytes()).await?;
        debug!("Stored value under {}", key);
        Ok(key)
    }
}

// == Cache ==
/// Key-value cache over an exclusively owned backend.
///
/// Construction flushes the backend, so each cache starts from an empty
/// store and zeroed call counters. One logical caller per cache is assumed.
#[derive(Debug)]
pub struct Cache<B: Backend> {
    /// Backend holding values, counters and history lists
    backend: B,
    /// Counted and history-logged store operation
    store_op: Instrumented<StoreOperation>,
}

impl<B: Backend> Cache<B> {
    // == Constructor ==
    /// Creates a cache over `backend`, removing every key it holds.
    ///
    /// Any history or counters left by an earlier cache on the same backend
    /// are destroyed. Backend failures are returned unchanged.
    pub async fn new(backend: B) -> Result<Self> {
        backend.flush().await?;
        info!("Cache initialized on a flushed backend");

        Ok(Self {
            backend,
            store_op: instrument(StoreOperation),
        })
    }

    // == Store ==
    /// Stores `data` under a newly generated key and returns that key.
    ///
    /// The call is counted and recorded under `STORE_OPERATION`.
    pub async fn store(&self, data: impl Into<CacheValue>) -> Result<String> {
        self.store_op.call(&self.backend, (data.into(),)).await
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.backend.get(key).await?;
        trace!(
            "get {} -> {}",
            key,
            if value.is_some() { "hit" } else { "miss" }
        );
        Ok(value)
    }

    // == Get With ==
    /// Returns the value stored under `key` passed through `converter`.
    ///
    /// The converter only runs on a hit. Its failure is returned as
    /// `CacheError::Conversion` and leaves the stored value untouched.
    pub async fn get_with<T, F>(&self, key: &str, converter: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> ConvertResult<T> + Send,
    {
        match self.get(key).await? {
            Some(raw) => converter(raw)
                .map(Some)
                .map_err(|err| CacheError::Conversion {
                    key: key.to_string(),
                    reason: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Returns the value under `key` decoded as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, convert::utf8).await
    }

    /// Returns the value under `key` parsed as an integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, convert::integer).await
    }

    // == Instrumented Operations ==
    /// The store operation bound to this cache's backend, for replay.
    pub fn store_operation(&self) -> BoundOperation<'_, B> {
        BoundOperation::new(Operation::<B>::name(&self.store_op), &self.backend)
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::instrument::{inputs_key, outputs_key, replay_to, CallHistory};

    async fn new_cache() -> Cache<MemoryBackend> {
        Cache::new(MemoryBackend::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_new_flushes_backend() {
        let backend = MemoryBackend::new();
        backend.set("leftover", b"x").await.unwrap();

        let cache = Cache::new(backend).await.unwrap();
        assert!(cache.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_store_returns_uuid_key() {
        let cache = new_cache().await;

        let key = cache.store("value").await.unwrap();
        let parsed = Uuid::parse_str(&key).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[tokio::test]
    async fn test_store_keys_are_unique() {
        let cache = new_cache().await;

        let first = cache.store("same").await.unwrap();
        let second = cache.store("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_and_get_each_type() {
        let cache = new_cache().await;

        let s = cache.store("text").await.unwrap();
        let b = cache.store(vec![0u8, 255, 10]).await.unwrap();
        let i = cache.store(123).await.unwrap();
        let f = cache.store(1.5).await.unwrap();

        assert_eq!(cache.get(&s).await.unwrap(), Some(b"text".to_vec()));
        assert_eq!(cache.get(&b).await.unwrap(), Some(vec![0u8, 255, 10]));
        assert_eq!(cache.get(&i).await.unwrap(), Some(b"123".to_vec()));
        assert_eq!(cache.get(&f).await.unwrap(), Some(b"1.5".to_vec()));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = new_cache().await;

        assert_eq!(cache.get("missing").await.unwrap(), None);
        assert_eq!(cache.get_str("missing").await.unwrap(), None);
        assert_eq!(cache.get_int("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_str_and_get_int() {
        let cache = new_cache().await;

        let hello = cache.store("hello").await.unwrap();
        let answer = cache.store("42").await.unwrap();
        let number = cache.store(42).await.unwrap();

        assert_eq!(cache.get_str(&hello).await.unwrap(), Some("hello".to_string()));
        assert_eq!(cache.get_int(&answer).await.unwrap(), Some(42));
        assert_eq!(cache.get_int(&number).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_empty_and_zero_are_not_absent() {
        let cache = new_cache().await;

        let empty = cache.store("").await.unwrap();
        let zero = cache.store(0).await.unwrap();

        assert_eq!(cache.get_str(&empty).await.unwrap(), Some(String::new()));
        assert_eq!(cache.get_int(&zero).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_get_with_custom_converter() {
        let cache = new_cache().await;
        let key = cache.store("abc").await.unwrap();

        let len = cache.get_with(&key, |raw| Ok(raw.len())).await.unwrap();
        assert_eq!(len, Some(3));
    }

    #[tokio::test]
    async fn test_converter_not_called_on_miss() {
        let cache = new_cache().await;

        let result: Option<()> = cache
            .get_with("missing", |_| panic!("converter must not run"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_converter_failure_propagates_and_keeps_value() {
        let cache = new_cache().await;
        let key = cache.store("not a number").await.unwrap();

        let result = cache.get_int(&key).await;
        match result {
            Err(CacheError::Conversion { key: failed, .. }) => assert_eq!(failed, key),
            other => panic!("expected conversion error, got {:?}", other),
        }

        assert_eq!(
            cache.get(&key).await.unwrap(),
            Some(b"not a number".to_vec())
        );
    }

    #[tokio::test]
    async fn test_store_is_counted_and_recorded() {
        let cache = new_cache().await;

        let key = cache.store("a").await.unwrap();
        let backend = cache.backend();

        assert_eq!(backend.get(STORE_OPERATION).await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(
            backend.lrange_all(&inputs_key(STORE_OPERATION)).await.unwrap(),
            vec![b"(\"a\",)".to_vec()]
        );
        assert_eq!(
            backend.lrange_all(&outputs_key(STORE_OPERATION)).await.unwrap(),
            vec![key.into_bytes()]
        );
    }

    #[tokio::test]
    async fn test_get_is_not_instrumented() {
        let cache = new_cache().await;
        let key = cache.store(1).await.unwrap();

        cache.get(&key).await.unwrap();
        cache.get_str(&key).await.unwrap();
        cache.get_int("missing").await.unwrap();

        let history = CallHistory::load(&cache.store_operation()).await.unwrap();
        assert_eq!(history.calls, 1);
        // value, counter and two history lists
        assert_eq!(cache.backend().len().await, 4);
    }

    #[tokio::test]
    async fn test_replay_store() {
        let cache = new_cache().await;

        let first = cache.store("a").await.unwrap();
        let second = cache.store(b"b").await.unwrap();

        let mut out = Vec::new();
        replay_to(&cache.store_operation(), &mut out).await.unwrap();

        let expected = format!(
            "Cache.store was called 2 times:\n\
             Cache.store(*(\"a\",)) -> {}\n\
             Cache.store(*(b\"b\",)) -> {}\n",
            first, second
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_replay_without_calls() {
        let cache = new_cache().await;

        let mut out = Vec::new();
        replay_to(&cache.store_operation(), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Cache.store was called 0 times:\n"
        );
    }
}
