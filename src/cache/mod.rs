//! Cache Module
//!
//! UUID-keyed key-value cache with an instrumented store operation and
//! optional conversion of values on read.

pub mod convert;
mod store;
mod value;


// Re-export public types
pub use store::{Cache, StoreOperation, STORE_OPERATION};
pub use value::CacheValue;
