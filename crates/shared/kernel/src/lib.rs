//! Kernel utilities shared across slices.
//! Keep this crate lightweight; today it only owns configuration loading.
//!
//! ## Config loading (non-wasm)
//! ```rust,no_run
//! # #[cfg(not(target_arch = "wasm32"))]
//! # {
//! use forma_kernel::config::load_config;
//! use forma_kernel::domain::config::FormaConfig;
//!
//! let cfg: FormaConfig = load_config(Some("forma.toml")).unwrap_or_default();
//! assert!(cfg.cache.max_size > 0);
//! # }
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use forma_domain as domain;
