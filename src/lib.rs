//! Call Ledger - An instrumented key-value cache
//!
//! Stores values under random UUID keys in a key-value backend and keeps a
//! per-operation call counter plus input/output history in the same backend.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;

pub use backend::{Backend, MemoryBackend, RedisBackend};
pub use cache::{Cache, CacheValue, STORE_OPERATION};
pub use config::{BackendKind, Config};
pub use error::{CacheError, Result};
pub use instrument::{replay, replay_to, CallHistory};
