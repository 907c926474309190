use async_trait::async_trait;
use forma_domain::{Lookup, SelectOptions, Selection};
use forma_provider::{DataProvider, FetchError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Provider with canned answers per identifier, recording every call.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    selections: HashMap<String, Vec<Value>>,
    records: HashMap<String, Value>,
    failing_selects: Vec<String>,
    failing_gets: Vec<String>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
            .with_selection("user", vec![json!({ "name": "Ann", "age": 30 }), json!({ "name": "Bob" })])
            .with_record("site", json!({ "title": "Forma", "links": ["a", "b"] }))
    }

    #[must_use]
    pub fn with_selection(mut self, schema: &str, items: Vec<Value>) -> Self {
        self.selections.insert(schema.to_owned(), items);
        self
    }

    #[must_use]
    pub fn with_record(mut self, slug: &str, record: Value) -> Self {
        self.records.insert(slug.to_owned(), record);
        self
    }

    #[must_use]
    pub fn failing_select(mut self, schema: &str) -> Self {
        self.failing_selects.push(schema.to_owned());
        self
    }

    #[must_use]
    pub fn failing_get(mut self, slug: &str) -> Self {
        self.failing_gets.push(slug.to_owned());
        self
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Calls recorded as `select:<schema>` / `get:<slug>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    async fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn get(&self, slug: &str) -> Result<Lookup, FetchError> {
        self.record(format!("get:{slug}")).await;
        if self.failing_gets.iter().any(|s| s == slug) {
            return Err(FetchError::upstream(format!("get {slug} failed")));
        }
        Ok(self.records.get(slug).cloned().map_or_else(Lookup::missing, Lookup::found))
    }

    async fn select(&self, schema: &str, _: &SelectOptions) -> Result<Selection, FetchError> {
        self.record(format!("select:{schema}")).await;
        if self.failing_selects.iter().any(|s| s == schema) {
            return Err(FetchError::upstream(format!("select {schema} failed")));
        }
        Ok(self.selections.get(schema).cloned().map_or_else(Selection::empty, Selection::of))
    }
}
