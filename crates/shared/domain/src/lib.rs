//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `serde_json`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//!
//! * [`descriptor`]: the portable wire shape of one element node.
//! * [`record`]: what a data provider hands back, and how a selection is parameterised.
//! * [`config`]: serde-loadable settings for the cache, resolver and logging.

pub mod config;
pub mod descriptor;
pub mod record;

pub use descriptor::{DATA_FIELD, ElementDescriptor, TAG_FIELD, VERSION_FIELD, Version};
pub use record::{Lookup, SelectOptions, Selection, SortOrder};
