use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a fetch-by-slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    pub data: Option<Value>,
    pub found: bool,
}

impl Lookup {
    #[must_use]
    pub const fn found(data: Value) -> Self {
        Self { data: Some(data), found: true }
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self { data: None, found: false }
    }

    /// The record, if the provider reported one.
    #[must_use]
    pub fn into_record(self) -> Option<Value> {
        if self.found { self.data } else { None }
    }
}

/// Result of a select-by-schema; `data` keeps the provider's ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub data: Vec<Value>,
    pub found: bool,
}

impl Selection {
    #[must_use]
    pub fn of(data: Vec<Value>) -> Self {
        let found = !data.is_empty();
        Self { data, found }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { data: Vec::new(), found: false }
    }

    /// First record of a non-empty selection.
    #[must_use]
    pub fn into_first(self) -> Option<Value> {
        if self.found { self.data.into_iter().next() } else { None }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Parameters of a select-by-schema call.
///
/// Field-equality `filter` entries are matched against top-level record fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<(String, SortOrder)>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, Value>,
}

impl SelectOptions {
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
