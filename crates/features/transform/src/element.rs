//! The element capability: what a live element type implements to take part in a document.

use crate::engine::TransformEngine;
use crate::error::TransformError;
use forma_domain::{ElementDescriptor, Version};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// A live, tag-bearing element instance.
pub trait Element: Any + Debug + Send + Sync {
    /// Tag written into [`ElementDescriptor::tag_name`].
    fn tag_name(&self) -> &str;

    /// Complete snapshot of this element, nested elements included, in document order.
    fn serialize(&self) -> ElementDescriptor;

    /// Wire form of this element. Defaults to [`serialize`](Self::serialize) as JSON.
    fn to_value(&self) -> Value {
        self.serialize().into_value()
    }

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// An element type the engine can rebuild from a descriptor payload.
///
/// # Example
///
/// ```rust
/// use forma_domain::ElementDescriptor;
/// use forma_transform::{Element, Serializable, TransformEngine, TransformError, decode_data};
/// use serde_json::{Map, Value};
/// use std::any::Any;
///
/// #[derive(Debug, PartialEq, serde::Deserialize)]
/// struct Badge {
///     label: String,
/// }
///
/// impl Element for Badge {
///     fn tag_name(&self) -> &str {
///         Self::TAG
///     }
///
///     fn serialize(&self) -> ElementDescriptor {
///         Self::descriptor().field("label", self.label.as_str())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// impl Serializable for Badge {
///     const TAG: &'static str = "Badge";
///
///     fn reconstruct(data: Map<String, Value>, _: &TransformEngine) -> Result<Self, TransformError> {
///         decode_data(Self::TAG, data)
///     }
/// }
/// ```
pub trait Serializable: Element + Sized {
    const TAG: &'static str;
    const VERSION: Version = Version::INITIAL;

    /// Builds a new instance from `data` alone. Nested payloads go back through `engine`.
    ///
    /// # Errors
    /// Any error is surfaced to the caller of `deserialize` unchanged.
    fn reconstruct(data: Map<String, Value>, engine: &TransformEngine) -> Result<Self, TransformError>;

    /// An empty descriptor carrying [`Self::TAG`] and [`Self::VERSION`].
    #[must_use]
    fn descriptor() -> ElementDescriptor {
        ElementDescriptor::new(Self::TAG).with_version(Self::VERSION)
    }
}

/// The type-erased reconstruction capability stored in the registry.
///
/// Implemented by [`Capability`] for every [`Serializable`] type and by plain closures.
pub trait Reconstruct: Send + Sync {
    /// # Errors
    /// Whatever the element's reconstruction reports.
    fn reconstruct(
        &self,
        data: Map<String, Value>,
        engine: &TransformEngine,
    ) -> Result<Box<dyn Element>, TransformError>;

    /// Schema version the capability produces, when known.
    fn version(&self) -> Option<Version> {
        None
    }
}

/// Adapts a [`Serializable`] type into a [`Reconstruct`] capability.
pub struct Capability<T>(PhantomData<fn() -> T>);

impl<T> Capability<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Capability<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&std::any::type_name::<T>()).finish()
    }
}

impl<T: Serializable> Reconstruct for Capability<T> {
    fn reconstruct(
        &self,
        data: Map<String, Value>,
        engine: &TransformEngine,
    ) -> Result<Box<dyn Element>, TransformError> {
        Ok(Box::new(T::reconstruct(data, engine)?))
    }

    fn version(&self) -> Option<Version> {
        Some(T::VERSION)
    }
}

impl<F> Reconstruct for F
where
    F: Fn(Map<String, Value>, &TransformEngine) -> Result<Box<dyn Element>, TransformError>
        + Send
        + Sync,
{
    fn reconstruct(
        &self,
        data: Map<String, Value>,
        engine: &TransformEngine,
    ) -> Result<Box<dyn Element>, TransformError> {
        self(data, engine)
    }
}

/// Decodes a descriptor payload into `T` with serde.
///
/// # Errors
/// Returns [`TransformError::Reconstruction`] naming `tag` when the payload does not fit `T`.
pub fn decode_data<T: DeserializeOwned>(tag: &str, data: Map<String, Value>) -> Result<T, TransformError> {
    serde_json::from_value(Value::Object(data))
        .map_err(|e| TransformError::reconstruction(tag, e.to_string()))
}

/// A value in a live tree: an element, a sequence, or a plain JSON primitive/object.
#[derive(Debug)]
pub enum Node {
    Element(Box<dyn Element>),
    List(Vec<Self>),
    Value(Value),
}

impl Node {
    pub fn element(element: impl Element) -> Self {
        Self::Element(Box::new(element))
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&dyn Element> {
        match self {
            Self::Element(element) => Some(element.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the element as `T` if this node holds exactly that type.
    #[must_use]
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_element().and_then(|element| element.as_any().downcast_ref::<T>())
    }

    /// Serialized form: elements become descriptors, lists become arrays, values pass through.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Element(element) => element.to_value(),
            Self::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Value(value) => value.clone(),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}
