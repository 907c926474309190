//! # Transform
//!
//! Turns live element trees into portable, versioned structural documents and back.
//!
//! ## Architecture
//!
//! 1.  **Capability ([`Element`], [`Serializable`]):** what a concrete element type implements:
//!     an instance snapshot and a type-level reconstruction from the `data` payload.
//! 2.  **Registry ([`ComponentRegistry`]):** tag name to [`Reconstruct`] capability, with an
//!     explicit register/unregister/clear lifecycle.
//! 3.  **Fallback ([`FallbackElement`]):** unregistered but well-formed tags degrade to a
//!     lossless container instead of failing.
//! 4.  **Engine ([`TransformEngine`]):** recursive (de)serialization over elements, sequences
//!     and primitives. Errors are fail-fast.
//!
//! ## Wire format
//!
//! ```text
//! { "tagName": "<string>", "version": "<major.minor.patch>"?, "data": { ... } }
//! ```

mod element;
mod engine;
mod error;
mod fallback;
mod registry;

pub use crate::element::{Capability, Element, Node, Reconstruct, Serializable, decode_data};
pub use crate::engine::{Document, TransformEngine};
pub use crate::error::{TransformError, TransformErrorExt};
pub use crate::fallback::FallbackElement;
pub use crate::registry::{ComponentRegistry, Strategy, is_identifier};

pub mod prelude {
    pub use crate::{
        Element, FallbackElement, Node, Serializable, TransformEngine, TransformError, decode_data,
    };
    pub use forma_domain::{ElementDescriptor, Version};
}
