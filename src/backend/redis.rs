//! Redis Backend
//!
//! Maps the backend primitives one-to-one onto Redis commands over a
//! multiplexed async connection.

use async_trait::async_trait;
use ::redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::{info, trace};

use crate::backend::Backend;
use crate::error::Result;

// == Redis Backend ==
/// Backend talking to a Redis server.
///
/// The connection is multiplexed, so each command works on a cheap clone.
#[derive(Clone)]
pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    // == Constructor ==
    /// Opens a connection to the server at `url`.
    ///
    /// Connection failures are returned as-is; there is no retry.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { conn })
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = ::redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        trace!("GET {} -> {}", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1).await?;
        Ok(count)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.rpush(key, value).await?;
        Ok(())
    }

    async fn lrange_all(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn.lrange(key, 0, -1).await?;
        Ok(items)
    }
}
