//! Tag name to reconstruction capability mapping.

use crate::element::Reconstruct;
use crate::error::TransformError;
use fxhash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// How the engine treats a tag, decided once before dispatch.
pub enum Strategy<'a> {
    /// The tag is registered.
    Known(&'a dyn Reconstruct),
    /// Unregistered but a well-formed identifier: rebuilt as a fallback element.
    Fallback,
    /// Empty or not an identifier: rejected.
    Invalid,
}

impl fmt::Debug for Strategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Known(_) => "Known",
            Self::Fallback => "Fallback",
            Self::Invalid => "Invalid",
        })
    }
}

#[derive(Clone)]
struct Registration {
    order: u64,
    capability: Arc<dyn Reconstruct>,
}

/// Mutable registry owned by a [`TransformEngine`](crate::TransformEngine).
///
/// Keys are unique and the last registration for a tag wins. [`list`](Self::list) reports tags in
/// first-registration order.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    entries: FxHashMap<String, Registration>,
    next_order: u64,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry").field("tags", &self.list()).finish()
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capability` under `tag`, returning the capability it replaced.
    ///
    /// # Errors
    /// Returns [`TransformError::UnknownComponent`] if `tag` is not a valid identifier.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        capability: Arc<dyn Reconstruct>,
    ) -> Result<Option<Arc<dyn Reconstruct>>, TransformError> {
        let tag = tag.into();
        if !is_identifier(&tag) {
            return Err(TransformError::UnknownComponent {
                tag,
                context: Some("Registering component".into()),
            });
        }

        if let Some(existing) = self.entries.get_mut(&tag) {
            return Ok(Some(std::mem::replace(&mut existing.capability, capability)));
        }

        self.next_order += 1;
        self.entries.insert(tag, Registration { order: self.next_order, capability });
        Ok(None)
    }

    pub fn unregister(&mut self, tag: &str) -> Option<Arc<dyn Reconstruct>> {
        self.entries.remove(tag).map(|registration| registration.capability)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn resolve(&self, tag: &str) -> Option<&dyn Reconstruct> {
        self.entries.get(tag).map(|registration| registration.capability.as_ref())
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Snapshot of the registered tags.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut tags: Vec<(&String, u64)> =
            self.entries.iter().map(|(tag, registration)| (tag, registration.order)).collect();
        tags.sort_unstable_by_key(|(_, order)| *order);
        tags.into_iter().map(|(tag, _)| tag.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn strategy_for(&self, tag: &str) -> Strategy<'_> {
        match self.resolve(tag) {
            Some(capability) => Strategy::Known(capability),
            None if is_identifier(tag) => Strategy::Fallback,
            None => Strategy::Invalid,
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_.:-]*`
#[must_use]
pub fn is_identifier(tag: &str) -> bool {
    let mut bytes = tag.bytes();
    bytes.next().is_some_and(|first| first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':'))
}
