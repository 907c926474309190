use crate::element::{Element, Node};
use crate::engine::{TransformEngine, parse_version};
use crate::error::TransformError;
use forma_domain::{DATA_FIELD, ElementDescriptor, TAG_FIELD, VERSION_FIELD, Version};
use serde_json::{Map, Value};
use std::any::Any;

/// Neutral container for a well-formed but unregistered tag.
///
/// Keeps tag, version and payload; nested descriptors inside the payload are resolved as deeply
/// as the registry allows. The `version` is kept verbatim, so producers newer than this build
/// (prerelease strings, other schemes) survive a round-trip through [`Element::to_value`].
#[derive(Debug)]
pub struct FallbackElement {
    tag: String,
    version: Option<Value>,
    fields: Vec<(String, Node)>,
}

impl FallbackElement {
    pub(crate) fn reconstruct(
        tag: String,
        version: Option<Value>,
        data: Map<String, Value>,
        engine: &TransformEngine,
    ) -> Result<Self, TransformError> {
        let fields = data
            .into_iter()
            .map(|(key, value)| engine.deserialize_value(value).map(|node| (key, node)))
            .collect::<Result<_, _>>()?;
        Ok(Self { tag, version, fields })
    }

    /// The version, when it is a `major.minor.patch` string.
    #[must_use]
    pub fn version(&self) -> Option<Version> {
        self.version.as_ref().and_then(parse_version)
    }

    /// The `version` exactly as it appeared in the document.
    #[must_use]
    pub const fn raw_version(&self) -> Option<&Value> {
        self.version.as_ref()
    }

    /// Payload field by name.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Node> {
        self.fields.iter().find_map(|(k, node)| (k == key).then_some(node))
    }

    /// Payload fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(key, node)| (key.as_str(), node))
    }

    fn data(&self) -> Map<String, Value> {
        self.fields.iter().map(|(key, node)| (key.clone(), node.to_value())).collect()
    }
}

impl Element for FallbackElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Typed snapshot; an unparsable version is left out. Use [`Element::to_value`] for the
    /// verbatim descriptor.
    fn serialize(&self) -> ElementDescriptor {
        ElementDescriptor { tag_name: self.tag.clone(), version: self.version(), data: self.data() }
    }

    fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(3);
        object.insert(TAG_FIELD.to_owned(), Value::String(self.tag.clone()));
        if let Some(version) = &self.version {
            object.insert(VERSION_FIELD.to_owned(), version.clone());
        }
        object.insert(DATA_FIELD.to_owned(), Value::Object(self.data()));
        Value::Object(object)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
