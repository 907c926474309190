use forma_transform::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::any::Any;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Button {
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Element for Button {
    fn tag_name(&self) -> &str {
        Self::TAG
    }

    fn serialize(&self) -> ElementDescriptor {
        Self::descriptor().field("label", self.label.as_str()).field("disabled", self.disabled)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Serializable for Button {
    const TAG: &'static str = "Button";

    fn reconstruct(data: Map<String, Value>, _: &TransformEngine) -> Result<Self, TransformError> {
        decode_data(Self::TAG, data)
    }
}

/// Container element owning an ordered list of child nodes.
#[derive(Debug)]
pub struct Card {
    pub title: String,
    pub children: Vec<Node>,
}

impl Element for Card {
    fn tag_name(&self) -> &str {
        Self::TAG
    }

    fn serialize(&self) -> ElementDescriptor {
        let children: Vec<Value> = self.children.iter().map(Node::to_value).collect();
        Self::descriptor().field("title", self.title.as_str()).field("children", children)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Serializable for Card {
    const TAG: &'static str = "Card";
    const VERSION: Version = Version::new(2, 1, 0);

    fn reconstruct(mut data: Map<String, Value>, engine: &TransformEngine) -> Result<Self, TransformError> {
        let title = match data.remove("title") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(title)) => title,
            Some(other) => {
                return Err(TransformError::reconstruction(Self::TAG, format!("title must be text, found {other}")));
            },
        };
        let children = match data.remove("children") {
            None => Vec::new(),
            Some(children) => match engine.deserialize_value(children)? {
                Node::List(items) => items,
                single => vec![single],
            },
        };
        Ok(Self { title, children })
    }
}

/// Always refuses to reconstruct.
#[derive(Debug)]
pub struct Broken;

impl Element for Broken {
    fn tag_name(&self) -> &str {
        Self::TAG
    }

    fn serialize(&self) -> ElementDescriptor {
        Self::descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Serializable for Broken {
    const TAG: &'static str = "Broken";

    fn reconstruct(_: Map<String, Value>, _: &TransformEngine) -> Result<Self, TransformError> {
        Err(TransformError::reconstruction(Self::TAG, "refusing to build"))
    }
}

/// Engine with `Button`, `Card` and `Broken` registered.
#[must_use]
pub fn engine() -> TransformEngine {
    let mut engine = TransformEngine::new();
    engine
        .register::<Button>()
        .and_then(|e| e.register::<Card>())
        .and_then(|e| e.register::<Broken>())
        .expect("fixture tags are valid identifiers");
    engine
}

#[must_use]
pub fn sample_card() -> Card {
    Card {
        title: "Welcome".to_owned(),
        children: vec![
            Node::element(Button { label: "Ok".to_owned(), disabled: false }),
            Node::element(Card {
                title: "Nested".to_owned(),
                children: vec![Node::element(Button { label: "Deep".to_owned(), disabled: true })],
            }),
            Node::Value(Value::from("plain text")),
        ],
    }
}
