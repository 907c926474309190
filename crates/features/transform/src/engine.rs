use crate::element::{Capability, Node, Reconstruct, Serializable};
use crate::error::TransformError;
use crate::fallback::FallbackElement;
use crate::registry::{ComponentRegistry, Strategy};
use forma_domain::{DATA_FIELD, ElementDescriptor, TAG_FIELD, VERSION_FIELD, Version};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Input accepted by [`TransformEngine::deserialize`]: JSON text or an already parsed value.
#[derive(Debug, Clone)]
pub enum Document<'a> {
    Text(Cow<'a, str>),
    Value(Value),
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Document<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl From<Value> for Document<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<ElementDescriptor> for Document<'_> {
    fn from(descriptor: ElementDescriptor) -> Self {
        Self::Value(descriptor.into_value())
    }
}

/// Recursive serializer/deserializer between live [`Node`] trees and structural documents.
///
/// Registry mutation needs `&mut self`; deserialization only `&self`, so the registry cannot
/// change while a document is being rebuilt.
///
/// # Example
/// ```rust
/// use forma_transform::{FallbackElement, TransformEngine};
///
/// let engine = TransformEngine::new();
/// let node = engine.deserialize(r#"{"tagName":"Future","data":{"x":1}}"#).unwrap();
///
/// assert!(node.downcast_ref::<FallbackElement>().is_some());
/// assert_eq!(engine.serialize_to_string(&node), r#"{"tagName":"Future","data":{"x":1}}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    registry: ComponentRegistry,
}

impl TransformEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under [`Serializable::TAG`], replacing any previous capability.
    ///
    /// # Errors
    /// Returns [`TransformError::UnknownComponent`] if the tag is not a valid identifier.
    pub fn register<T: Serializable>(&mut self) -> Result<&mut Self, TransformError> {
        self.register_with(T::TAG, Capability::<T>::new())
    }

    /// Registers an arbitrary capability (a closure, or a custom [`Reconstruct`]) under `tag`.
    ///
    /// # Errors
    /// Returns [`TransformError::UnknownComponent`] if `tag` is not a valid identifier.
    pub fn register_with(
        &mut self,
        tag: impl Into<String>,
        capability: impl Reconstruct + 'static,
    ) -> Result<&mut Self, TransformError> {
        let tag = tag.into();
        if self.registry.register(tag.clone(), Arc::new(capability))?.is_some() {
            debug!(%tag, "Component capability replaced");
        }
        Ok(self)
    }

    /// Returns `true` if `tag` was registered.
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.registry.unregister(tag).is_some()
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Snapshot of the registered tag names.
    #[must_use]
    pub fn get_registered_components(&self) -> Vec<String> {
        self.registry.list()
    }

    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Elements become descriptors (recursively, in document order), lists become arrays and
    /// plain values pass through unchanged.
    #[must_use]
    pub fn serialize(&self, node: &Node) -> Value {
        node.to_value()
    }

    /// [`serialize`](Self::serialize) rendered as compact JSON text.
    #[must_use]
    pub fn serialize_to_string(&self, node: &Node) -> String {
        self.serialize(node).to_string()
    }

    /// Rebuilds a live tree from a document, parsing it first when given as text.
    ///
    /// # Errors
    /// * [`TransformError::InvalidInput`] if text input is not JSON.
    /// * [`TransformError::MalformedDescriptor`] if a registered tag lacks `data`, or a
    ///   descriptor field has the wrong shape.
    /// * [`TransformError::UnknownComponent`] for empty or non-identifier tags.
    /// * Any error raised by an element's reconstruction.
    ///
    /// The first failure aborts the whole document.
    pub fn deserialize<'a>(&self, document: impl Into<Document<'a>>) -> Result<Node, TransformError> {
        match document.into() {
            Document::Text(text) => self.deserialize_str(&text),
            Document::Value(value) => self.deserialize_value(value),
        }
    }

    /// # Errors
    /// See [`deserialize`](Self::deserialize).
    pub fn deserialize_str(&self, text: &str) -> Result<Node, TransformError> {
        let value: Value = serde_json::from_str(text)?;
        self.deserialize_value(value)
    }

    /// Rebuilds an already parsed value. Strings are primitives here and never re-parsed.
    ///
    /// # Errors
    /// See [`deserialize`](Self::deserialize).
    pub fn deserialize_value(&self, value: Value) -> Result<Node, TransformError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.deserialize_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::List),
            Value::Object(object) if object.contains_key(TAG_FIELD) => self.deserialize_descriptor(object),
            other => Ok(Node::Value(other)),
        }
    }

    fn deserialize_descriptor(&self, mut object: Map<String, Value>) -> Result<Node, TransformError> {
        let tag = match object.remove(TAG_FIELD) {
            Some(Value::String(tag)) => tag,
            Some(other) => return Err(TransformError::unknown(other.to_string())),
            None => return Err(TransformError::unknown(String::new())),
        };

        match self.registry.strategy_for(&tag) {
            Strategy::Known(capability) => {
                let version = take_version(&tag, &mut object)?;
                let data = take_data(&tag, &mut object)?
                    .ok_or_else(|| TransformError::malformed(&tag, "missing `data` field"))?;

                if let (Some(found), Some(expected)) = (version, capability.version())
                    && found.major > expected.major
                {
                    warn!(%tag, %found, %expected, "Descriptor is newer than the registered component");
                }

                debug!(%tag, "Reconstructing registered component");
                capability.reconstruct(data, self).map(Node::Element)
            },
            Strategy::Fallback => {
                let version = object.remove(VERSION_FIELD);
                if let Some(raw) = &version
                    && parse_version(raw).is_none()
                {
                    debug!(%tag, %raw, "Keeping unparsable fallback version verbatim");
                }
                let data = take_data(&tag, &mut object)?.unwrap_or_default();

                debug!(%tag, "Reconstructing unregistered component with fallback");
                FallbackElement::reconstruct(tag, version, data, self).map(Node::element)
            },
            Strategy::Invalid => Err(TransformError::unknown(tag)),
        }
    }
}

fn take_version(tag: &str, object: &mut Map<String, Value>) -> Result<Option<Version>, TransformError> {
    match object.remove(VERSION_FIELD) {
        None => Ok(None),
        Some(Value::String(raw)) => {
            raw.parse::<Version>().map(Some).map_err(|e| TransformError::malformed(tag, e.to_string()))
        },
        Some(other) => Err(TransformError::malformed(
            tag,
            format!("`version` must be a string, found {other}"),
        )),
    }
}

/// Strict `major.minor.patch` reading of a raw `version` value.
pub(crate) fn parse_version(raw: &Value) -> Option<Version> {
    raw.as_str().and_then(|raw| raw.parse().ok())
}

/// `Ok(None)` when the key is absent; explicit `null` is an empty payload.
fn take_data(
    tag: &str,
    object: &mut Map<String, Value>,
) -> Result<Option<Map<String, Value>>, TransformError> {
    match object.remove(DATA_FIELD) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Map::new())),
        Some(Value::Object(data)) => Ok(Some(data)),
        Some(other) => Err(TransformError::malformed(
            tag,
            format!("`data` must be an object or null, found {other}"),
        )),
    }
}
