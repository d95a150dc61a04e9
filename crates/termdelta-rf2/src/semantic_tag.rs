//! Semantic tags: the trailing `(tag)` of a fully specified name.
//!
//! A label ending in `(tag)`, where `tag` holds no parentheses, has semantic
//! tag `tag`. Anything else has none.

use std::sync::OnceLock;

use regex::Regex;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*\(([^()]*)\)\s*$").expect("semantic tag pattern compiles"))
}

/// `"Asthma (disorder)"` → `Some("disorder")`.
pub fn semantic_tag(label: &str) -> Option<&str> {
    pattern()
        .captures(label)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The label without its semantic tag and surrounding whitespace.
pub fn strip_semantic_tag(label: &str) -> &str {
    match pattern().find(label) {
        Some(m) => label[..m.start()].trim_end(),
        None => label.trim_end(),
    }
}
