use serde_json::{Map, Value};

/// Field-group identifier to resolved record, built fresh for one resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    groups: Map<String, Value>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: impl Into<String>, value: Value) -> Option<Value> {
        self.groups.insert(group.into(), value)
    }

    #[must_use]
    pub fn get(&self, group: &str) -> Option<&Value> {
        self.groups.get(group)
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Walks `segments`: the first selects a group, the rest index objects by key and arrays
    /// by position.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        rest.iter().try_fold(self.groups.get(first.as_ref())?, |value, segment| {
            let segment = segment.as_ref();
            match value {
                Value::Object(object) => object.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.groups)
    }
}

impl FromIterator<(String, Value)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { groups: iter.into_iter().collect() }
    }
}

impl From<Map<String, Value>> for TemplateContext {
    fn from(groups: Map<String, Value>) -> Self {
        Self { groups }
    }
}
