//! # Data Providers
//!
//! The fetch side of content resolution.
//!
//! * [`DataProvider`]: fetch one record by slug, or select an ordered sequence of records
//!   by schema.
//! * [`MemoryProvider`]: an in-process implementation backed by JSON values.
//! * [`CacheProvider`]: wraps any provider behind the same contract, adding TTL expiry,
//!   least-recently-used eviction and single-flight coalescing of identical requests.
//!
//! # Example
//!
//! ```rust
//! use forma_domain::config::CacheConfig;
//! use forma_provider::{CacheProvider, DataProvider, FetchError, MemoryProvider};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), FetchError> {
//!     let memory = MemoryProvider::new();
//!     memory.insert_record("site", json!({ "title": "Forma" }));
//!
//!     let cache = CacheProvider::new(Arc::new(memory), CacheConfig::default())?;
//!     let first = cache.get("site").await?;
//!     let second = cache.get("site").await?;
//!
//!     assert_eq!(first, second);
//!     assert_eq!(cache.stats().hits, 1);
//!     Ok(())
//! }
//! ```

mod cache;
mod error;
mod key;
mod memory;

pub use cache::{CacheEntry, CacheProvider, CacheStats};
pub use error::{FetchError, FetchErrorExt};
pub use key::{CacheKey, Operation};
pub use memory::MemoryProvider;

use async_trait::async_trait;
use forma_domain::{Lookup, SelectOptions, Selection};
use std::fmt::Debug;

/// Fetch-by-slug / select-by-schema abstraction over a content source.
///
/// Implementations may suspend on I/O. Returned records are owned by the caller.
#[async_trait]
pub trait DataProvider: Debug + Send + Sync {
    /// Fetches a single record identified by `slug`.
    async fn get(&self, slug: &str) -> Result<Lookup, FetchError>;

    /// Selects the ordered records of `schema`, shaped by `options`.
    async fn select(&self, schema: &str, options: &SelectOptions)
    -> Result<Selection, FetchError>;
}
