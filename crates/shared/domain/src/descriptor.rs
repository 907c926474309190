use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Wire name of the tag field; its presence makes an object descriptor-shaped.
pub const TAG_FIELD: &str = "tagName";
/// Wire name of the optional version field.
pub const VERSION_FIELD: &str = "version";
/// Wire name of the payload field.
pub const DATA_FIELD: &str = "data";

/// Portable structural snapshot of one element node.
///
/// ```text
/// { "tagName": "Card", "version": "1.0.0", "data": { "title": "Hi", "children": [ ... ] } }
/// ```
///
/// `data` may nest further descriptors (or arrays of them) at any depth; the tree is
/// acyclic by construction because descriptors are plain owned values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl ElementDescriptor {
    /// Creates a descriptor with an empty payload.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), version: None, data: Map::new() }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Appends a payload field, keeping insertion order.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Converts the descriptor into its JSON object form.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(3);
        object.insert(TAG_FIELD.to_owned(), Value::String(self.tag_name));
        if let Some(version) = self.version {
            object.insert(VERSION_FIELD.to_owned(), Value::String(version.to_string()));
        }
        object.insert(DATA_FIELD.to_owned(), Value::Object(self.data));
        Value::Object(object)
    }

    /// Returns `true` when `value` is an object carrying a tag field.
    #[must_use]
    pub fn is_descriptor_shaped(value: &Value) -> bool {
        value.as_object().is_some_and(|object| object.contains_key(TAG_FIELD))
    }
}

impl From<ElementDescriptor> for Value {
    fn from(descriptor: ElementDescriptor) -> Self {
        descriptor.into_value()
    }
}

/// `major.minor.patch` schema version of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const INITIAL: Self = Self::new(1, 0, 0);

    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returned when a string is not of the form `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError {
    input: String,
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version '{}', expected major.minor.patch", self.input)
    }
}

impl std::error::Error for VersionParseError {}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError { input: s.to_owned() };
        let mut parts = s.split('.').map(|p| {
            // `u32::from_str` accepts a leading '+', which is not part of the grammar.
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            p.parse::<u32>().map_err(|_| err())
        });

        let major = parts.next().ok_or_else(err)??;
        let minor = parts.next().ok_or_else(err)??;
        let patch = parts.next().ok_or_else(err)??;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self { major, minor, patch })
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
