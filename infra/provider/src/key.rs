use crate::error::FetchError;
use forma_domain::SelectOptions;
use serde_json::{Map, Value};
use std::fmt;

/// The provider operation a cache entry was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Select,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Select => "select",
        }
    }
}

/// Identity of a cached provider result: `(operation, slug-or-schema, normalized options)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: Operation,
    target: String,
    options: String,
}

impl CacheKey {
    pub fn get(slug: impl Into<String>) -> Self {
        Self { operation: Operation::Get, target: slug.into(), options: String::new() }
    }

    /// Builds a select key; semantically equal options produce equal keys.
    ///
    /// # Errors
    /// Returns [`FetchError::Internal`] if the options cannot be encoded.
    pub fn select(schema: impl Into<String>, options: &SelectOptions) -> Result<Self, FetchError> {
        let options = if options.is_default() {
            String::new()
        } else {
            let encoded = serde_json::to_value(options).map_err(|e| FetchError::Internal {
                message: e.to_string().into(),
                context: Some("Encoding select options for cache key".into()),
            })?;
            canonicalize(encoded).to_string()
        };
        Ok(Self { operation: Operation::Select, target: schema.into(), options })
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// The slug (for `get`) or schema (for `select`).
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation.as_str(), self.target)?;
        if !self.options.is_empty() {
            write!(f, ":{}", self.options)?;
        }
        Ok(())
    }
}

/// Rebuilds every object with its keys sorted so the encoding is order-independent.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, canonicalize(v))).collect::<Map<_, _>>())
        },
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
