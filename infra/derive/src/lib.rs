#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Forma crates.
//!
//! ## Usage
//! Add the crate under `dependencies` of any crate that declares its own error enum:
//! ```toml
//! [dependencies]
//! forma-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate; the `tests/ui` cases
//! exercise the expansion for real.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// Turns a plain enum into an error type wired into the workspace conventions.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
/// * **Kind Accessor**: Generates `kind()` returning the variant name, for structured logs
///   (`warn!(kind = err.kind(), ...)`).
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping an upstream error (a `source` field, or a field marked
///    `#[source]`/`#[from]`) must also carry a `context` field.
/// 4. One annotated enum per module: the expansion defines the module-level
///    `format_context` helper used by the `#[error]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use forma_derive::forma_error;
/// use std::borrow::Cow;
///
/// #[forma_error]
/// pub enum ParseError {
///     #[error("Invalid JSON{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(text: &str) -> Result<serde_json::Value, ParseError> {
///     serde_json::from_str(text).context("Parsing document")
/// }
/// ```
#[proc_macro_attribute]
pub fn forma_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
