//! # Content
//!
//! Data binding for templates: `{{ group.path }}` expressions are scanned, the referenced field
//! groups fetched (optionally through a [`CacheProvider`](forma_provider::CacheProvider)), and
//! the template rendered against the assembled context.
//!
//! The three phases are independently usable:
//!
//! 1.  **Scan ([`extract_field_groups`]):** pure and lenient.
//! 2.  **Fetch ([`ContentResolver::build_context`]):** concurrent, failures isolated per group.
//! 3.  **Render ([`TemplateResolver`]):** [`PathExpressionEngine`] by default; syntax errors
//!     propagate unmodified.

mod context;
mod error;
mod expression;
mod resolver;
mod scan;

pub use crate::context::TemplateContext;
pub use crate::error::{ContentError, ContentErrorExt, ExpressionError, ExpressionErrorExt};
pub use crate::expression::{PathExpressionEngine, TemplateResolver};
pub use crate::resolver::{CacheMode, ContentResolver, ContentResolverBuilder, NoProvider, WithProvider};
pub use crate::scan::{extract_field_groups, has_expressions};
