//! `forma inspect`: rebuild a document with an empty registry and show what came back.

use anyhow::{Context, Result};
use forma::transform::{Element, FallbackElement, Node, TransformEngine};
use serde_json::Value;
use std::io::Write;
use tracing::debug;

const INDENT: &str = "  ";
const FALLBACK_MARKER: &str = " (fallback)";

/// # Errors
/// Fails when the document cannot be deserialized or the output cannot be written.
pub fn run(text: &str, emit: bool, pretty: bool, out: &mut impl Write) -> Result<()> {
    let engine = TransformEngine::new();
    let node = engine.deserialize_str(text).context("Document could not be deserialized")?;
    debug!(emit, "Document deserialized");

    if emit {
        let value = engine.serialize(&node);
        let rendered = if pretty { serde_json::to_string_pretty(&value)? } else { value.to_string() };
        writeln!(out, "{rendered}")?;
    } else {
        writeln!(out, "{}", outline(&node))?;
    }
    Ok(())
}

/// One line per node: elements show tag, version and a fallback marker, lists their length,
/// values their JSON. Children are indented under their parent and labelled by field or index.
#[must_use]
pub fn outline(node: &Node) -> String {
    let mut lines = Vec::new();
    walk(node, 0, None, &mut lines);
    lines.join("\n")
}

fn walk(node: &Node, depth: usize, label: Option<&str>, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    let prefix = label.map(|label| format!("{label}: ")).unwrap_or_default();

    match node {
        Node::Element(element) => {
            let fallback = element.as_any().downcast_ref::<FallbackElement>();
            lines.push(format!("{indent}{prefix}{}", heading(element.as_ref(), fallback)));

            match fallback {
                Some(fallback) => {
                    for (key, child) in fallback.fields() {
                        walk(child, depth + 1, Some(key), lines);
                    }
                },
                None => {
                    let child_indent = INDENT.repeat(depth + 1);
                    for (key, value) in element.serialize().data {
                        lines.push(format!("{child_indent}{key}: {value}"));
                    }
                },
            }
        },
        Node::List(items) => {
            lines.push(format!("{indent}{prefix}[{}]", items.len()));
            for (index, item) in items.iter().enumerate() {
                walk(item, depth + 1, Some(&format!("[{index}]")), lines);
            }
        },
        Node::Value(value) => lines.push(format!("{indent}{prefix}{value}")),
    }
}

fn heading(element: &dyn Element, fallback: Option<&FallbackElement>) -> String {
    let version = match fallback {
        Some(fallback) => fallback.raw_version().map(|raw| match raw {
            Value::String(version) => format!(" v{version}"),
            other => format!(" v{other}"),
        }),
        None => element.serialize().version.map(|version| format!(" v{version}")),
    }
    .unwrap_or_default();
    let marker = if fallback.is_some() { FALLBACK_MARKER } else { "" };
    format!("{}{version}{marker}", element.tag_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "tagName": "Card",
        "version": "2.1.0",
        "data": {
            "title": "Hello",
            "children": [
                { "tagName": "Button", "version": "1.1.0-beta", "data": { "label": "Ok" } },
                42
            ]
        }
    }"#;

    #[test]
    fn outline_marks_fallback_elements() {
        let node = TransformEngine::new().deserialize_str(DOCUMENT).unwrap();

        assert_eq!(
            outline(&node),
            [
                "Card v2.1.0 (fallback)",
                "  title: \"Hello\"",
                "  children: [2]",
                "    [0]: Button v1.1.0-beta (fallback)",
                "      label: \"Ok\"",
                "    [1]: 42",
            ]
            .join("\n")
        );
    }

    #[test]
    fn emit_reproduces_the_document() {
        let mut out = Vec::new();
        run(DOCUMENT, true, false, &mut out).unwrap();

        let emitted: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let original: serde_json::Value = serde_json::from_str(DOCUMENT).unwrap();
        assert_eq!(emitted, original);
    }

    #[test]
    fn invalid_tags_fail_the_command() {
        let err = run(r#"{"tagName":"<b>","data":{}}"#, false, false, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("<b>"));
    }
}
