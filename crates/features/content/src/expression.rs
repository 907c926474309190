use crate::context::TemplateContext;
use crate::error::ExpressionError;
use crate::scan::{CLOSE, OPEN, is_field_group};
use serde_json::Value;
use std::fmt::Debug;

/// Renders a template against an assembled context.
pub trait TemplateResolver: Debug + Send + Sync {
    /// # Errors
    /// Returns [`ExpressionError`] for malformed markup or unrenderable expressions.
    fn resolve(&self, template: &str, context: &TemplateContext) -> Result<String, ExpressionError>;
}

/// Built-in engine for `{{ group.path.0.field }}` expressions.
///
/// * Objects are walked by key, arrays by numeric index.
/// * Missing paths and `null` render as the empty string.
/// * Strings render raw, numbers and booleans through `Display`, objects and arrays as compact JSON.
///
/// ```rust
/// use forma_content::{PathExpressionEngine, TemplateContext, TemplateResolver};
/// use serde_json::json;
///
/// let mut context = TemplateContext::new();
/// context.insert("user", json!({ "name": "Ann", "tags": ["a", "b"] }));
///
/// let out = PathExpressionEngine.resolve("{{ user.name }}/{{user.tags.1}}/{{ user.age }}", &context);
/// assert_eq!(out.unwrap(), "Ann/b/");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExpressionEngine;

impl TemplateResolver for PathExpressionEngine {
    fn resolve(&self, template: &str, context: &TemplateContext) -> Result<String, ExpressionError> {
        let mut out = String::with_capacity(template.len());
        let mut cursor = 0;

        while let Some(found) = template[cursor..].find(OPEN) {
            let start = cursor + found;
            out.push_str(&template[cursor..start]);

            let body_start = start + OPEN.len();
            let Some(len) = template[body_start..].find(CLOSE) else {
                return Err(ExpressionError::syntax("unterminated expression, missing `}}`", start));
            };

            let segments = parse_path(&template[body_start..body_start + len], body_start)?;
            if let Some(value) = context.lookup(segments.as_slice()) {
                render(value, &mut out);
            }
            cursor = body_start + len + CLOSE.len();
        }

        out.push_str(&template[cursor..]);
        Ok(out)
    }
}

/// Splits an expression body into segments; `offset` is the body's position in the template.
fn parse_path(body: &str, offset: usize) -> Result<Vec<&str>, ExpressionError> {
    let leading = body.len() - body.trim_start().len();
    let path = body.trim();
    if path.is_empty() {
        return Err(ExpressionError::syntax("empty expression", offset));
    }

    let mut segments = Vec::new();
    let mut position = offset + leading;
    for (index, segment) in path.split('.').enumerate() {
        let valid = if index == 0 { is_field_group(segment) } else { is_path_segment(segment) };
        if !valid {
            return Err(ExpressionError::syntax(format!("invalid path segment '{segment}'"), position));
        }
        segments.push(segment);
        position += segment.len() + 1;
    }
    Ok(segments)
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn render(value: &Value, out: &mut String) {
    match value {
        Value::Null => {},
        Value::String(text) => out.push_str(text),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::Array(_) | Value::Object(_) => out.push_str(&value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> TemplateContext {
        [
            ("user".to_owned(), json!({ "name": "Ann", "age": 30, "admin": false, "nick": null })),
            ("posts".to_owned(), json!([{ "title": "First" }, { "title": "Second" }])),
        ]
        .into_iter()
        .collect()
    }

    fn resolve(template: &str) -> Result<String, ExpressionError> {
        PathExpressionEngine.resolve(template, &context())
    }

    #[test]
    fn renders_scalars_and_paths() {
        assert_eq!(resolve("Hi {{user.name}} ({{ user.age }})").unwrap(), "Hi Ann (30)");
        assert_eq!(resolve("{{user.admin}}|{{user.nick}}|{{user.none}}").unwrap(), "false||");
        assert_eq!(resolve("{{ posts.1.title }}").unwrap(), "Second");
        assert_eq!(resolve("{{ posts.9.title }}{{ ghost.x }}").unwrap(), "");
    }

    #[test]
    fn renders_structures_as_json() {
        assert_eq!(resolve("{{ posts.0 }}").unwrap(), r#"{"title":"First"}"#);
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        assert_eq!(resolve("no markers } here").unwrap(), "no markers } here");
        assert_eq!(resolve("").unwrap(), "");
    }

    #[test]
    fn syntax_errors_carry_offsets() {
        let err = resolve("ok {{ user.name").unwrap_err();
        assert_eq!(err, ExpressionError::syntax("unterminated expression, missing `}}`", 3));

        let err = resolve("ab{{   }}").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { position: 4, .. }));

        let err = resolve("{{ user..name }}").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { position: 8, .. }), "{err:?}");

        let err = resolve("{{ 9lives }}").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { position: 3, .. }));
        assert_eq!(err.kind(), "Syntax");
    }

    #[test]
    fn unicode_around_expressions_is_preserved() {
        assert_eq!(resolve("✓ {{user.name}} → ok").unwrap(), "✓ Ann → ok");
    }
}
