use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref ACCESSOR_PATTERN: Regex =
        Regex::new(r#"\bget\((?:'([A-Za-z0-9_]+)'|"([A-Za-z0-9_]+)")\)"#).unwrap();
}

/// Keys referenced through `get('key')` / `get("key")`, unique and in order
/// of first appearance.
///
/// Run [`crate::validate`] first; on an invalid expression this still
/// returns whatever matches and the result should be discarded.
pub fn extract_keys(expr: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    ACCESSOR_PATTERN
        .captures_iter(expr)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .filter(|key| seen.insert(*key))
        .map(str::to_string)
        .collect()
}
