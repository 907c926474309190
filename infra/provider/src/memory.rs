use crate::DataProvider;
use crate::error::FetchError;
use async_trait::async_trait;
use forma_domain::{Lookup, SelectOptions, Selection, SortOrder};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    records: FxHashMap<String, Value>,
    collections: FxHashMap<String, Vec<Value>>,
}

/// In-process [`DataProvider`] backed by JSON values.
///
/// Records are addressed by slug; collections by schema name and keep insertion order.
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{ "records": { slug: record }, "collections": { schema: [record] } }`.
    ///
    /// Both sections are optional.
    ///
    /// # Errors
    /// Returns [`FetchError::InvalidConfiguration`] when the document has another shape.
    pub fn from_json(document: Value) -> Result<Self, FetchError> {
        let invalid = |message: &'static str| FetchError::InvalidConfiguration {
            message: message.into(),
            context: Some("Loading memory provider".into()),
        };

        let Value::Object(mut root) = document else {
            return Err(invalid("document must be an object"));
        };

        let provider = Self::new();
        match root.remove("records") {
            Some(Value::Object(records)) => {
                for (slug, record) in records {
                    provider.insert_record(slug, record);
                }
            },
            Some(_) => return Err(invalid("`records` must be an object")),
            None => {},
        }
        match root.remove("collections") {
            Some(Value::Object(collections)) => {
                for (schema, items) in collections {
                    let Value::Array(items) = items else {
                        return Err(invalid("every collection must be an array"));
                    };
                    provider.insert_collection(schema, items);
                }
            },
            Some(_) => return Err(invalid("`collections` must be an object")),
            None => {},
        }
        Ok(provider)
    }

    pub fn insert_record(&self, slug: impl Into<String>, record: Value) {
        self.state.write().records.insert(slug.into(), record);
    }

    pub fn insert_collection(&self, schema: impl Into<String>, items: Vec<Value>) {
        self.state.write().collections.insert(schema.into(), items);
    }

    /// Appends one record to a collection, creating it when absent.
    pub fn push(&self, schema: impl Into<String>, record: Value) {
        self.state.write().collections.entry(schema.into()).or_default().push(record);
    }

    pub fn remove_record(&self, slug: &str) -> Option<Value> {
        self.state.write().records.remove(slug)
    }
}

#[async_trait]
impl DataProvider for MemoryProvider {
    async fn get(&self, slug: &str) -> Result<Lookup, FetchError> {
        let state = self.state.read();
        Ok(state.records.get(slug).cloned().map_or_else(Lookup::missing, Lookup::found))
    }

    async fn select(
        &self,
        schema: &str,
        options: &SelectOptions,
    ) -> Result<Selection, FetchError> {
        let mut items: Vec<Value> = {
            let state = self.state.read();
            let Some(collection) = state.collections.get(schema) else {
                return Ok(Selection::empty());
            };
            collection.iter().filter(|item| matches_filter(item, options)).cloned().collect()
        };

        if let Some((field, order)) = &options.sort {
            items.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                if *order == SortOrder::Desc { ordering.reverse() } else { ordering }
            });
        }

        let items = items
            .into_iter()
            .skip(options.offset.unwrap_or(0))
            .take(options.limit.unwrap_or(usize::MAX))
            .collect();
        Ok(Selection::of(items))
    }
}

fn matches_filter(item: &Value, options: &SelectOptions) -> bool {
    options.filter.iter().all(|(field, expected)| item.get(field) == Some(expected))
}

/// Orders missing < null < bool < number < string; other kinds compare by their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    const fn rank(value: Option<&Value>) -> u8 {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_) | Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y @ (Value::Array(_) | Value::Object(_)))) => {
            x.to_string().cmp(&y.to_string())
        },
        _ => rank(a).cmp(&rank(b)),
    }
}
