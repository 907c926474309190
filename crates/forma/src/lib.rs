//! Facade crate for the Forma engine crates.
//! Re-exports domain/kernel primitives, the transform engine and the content resolver.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `forma` (the `logger` feature is on by default).
//! - `use forma::prelude::*;` brings the everyday types into scope.
//!
//! ```rust
//! use forma::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TransformEngine::new();
//! let node = engine.deserialize(r#"{"tagName":"Greeting","data":{"text":"Hi {{ user.name }}"}}"#)?;
//!
//! let memory = MemoryProvider::new();
//! memory.insert_collection("user", vec![json!({ "name": "Ann" })]);
//! let resolver = ContentResolver::builder().data_provider(Arc::new(memory)).build()?;
//!
//! let rendered = resolver.resolve_value(&engine.serialize(&node)).await?;
//! assert_eq!(rendered["data"]["text"], "Hi Ann");
//! # Ok(())
//! # }
//! ```

pub use forma_content as content;
pub use forma_domain as domain;
pub use forma_kernel as kernel;
#[cfg(feature = "logger")]
pub use forma_logger as logger;
pub use forma_provider as provider;
pub use forma_transform as transform;

pub mod prelude {
    pub use forma_content::{CacheMode, ContentError, ContentResolver, ExpressionError, TemplateResolver};
    pub use forma_domain::config::{CacheConfig, FormaConfig};
    pub use forma_domain::{ElementDescriptor, Lookup, SelectOptions, Selection, Version};
    pub use forma_provider::{CacheProvider, DataProvider, FetchError, MemoryProvider};
    pub use forma_transform::prelude::*;
}

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    "transform",
    "content",
    #[cfg(feature = "logger")]
    "logger",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}
