//! Discovery of the field groups a template refers to.

pub(crate) const OPEN: &str = "{{";
pub(crate) const CLOSE: &str = "}}";

/// Returns `true` if `template` contains an expression opener.
#[must_use]
pub fn has_expressions(template: &str) -> bool {
    template.contains(OPEN)
}

/// First path segments of every well-formed `{{ path }}` expression, de-duplicated in
/// first-seen order.
///
/// Lenient: an unterminated `{{` ends the scan and expressions whose first segment is not an
/// identifier are skipped. Rejecting malformed markup is the expression engine's job.
///
/// ```rust
/// use forma_content::extract_field_groups;
///
/// let groups = extract_field_groups("{{ user.name }} on {{site.title}}, {{ user.age }}");
/// assert_eq!(groups, ["user", "site"]);
/// ```
#[must_use]
pub fn extract_field_groups(template: &str) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else { break };

        let group = after_open[..end].trim().split('.').next().unwrap_or_default();
        if is_field_group(group) && !groups.iter().any(|g| g == group) {
            groups.push(group.to_owned());
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    groups
}

/// `[A-Za-z_][A-Za-z0-9_-]*`
pub(crate) fn is_field_group(segment: &str) -> bool {
    let mut bytes = segment.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_groups() {
        assert!(!has_expressions("Hello world"));
        assert!(extract_field_groups("Hello world").is_empty());
    }

    #[test]
    fn groups_are_deduplicated_in_order() {
        let template = "{{b.x}} {{a}} {{ b.y.0 }} {{c.d}} {{a.z}}";
        assert_eq!(extract_field_groups(template), ["b", "a", "c"]);
    }

    #[test]
    fn malformed_markup_is_skipped() {
        assert_eq!(extract_field_groups("{{ }} {{ 1abc.x }} {{ ok }} {{ open"), ["ok"]);
        assert_eq!(extract_field_groups("}} stray {{ user }}"), ["user"]);
    }

    #[test]
    fn multibyte_text_is_safe() {
        assert_eq!(extract_field_groups("héllo {{ wörld }} {{ name }} ✓"), ["name"]);
    }
}
