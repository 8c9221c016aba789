//! Structural checks on `get(...)` accessor usage.
//!
//! This is a denylist of known-bad accessor shapes rather than a grammar:
//! anything the rules below do not catch is accepted. Rules run in order and
//! only the first violation is reported.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::position;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that fired.
    pub rule: String,
    pub message: String,
    /// Character offset of the start of the offending accessor.
    pub position: usize,
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    message: &'static str,
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule {
            name: "concatenation-in-accessor",
            pattern: Regex::new(r#"\bget\(['"][^)]*\+[^)]*['"]\)"#).unwrap(),
            message: "String concatenation is not allowed inside get(); pass a literal key name",
        },
        Rule {
            name: "nested-accessor",
            pattern: Regex::new(r#"\bget\(\s*(?:['"][^'")]*)?\bget\("#).unwrap(),
            message: "Nested get() calls are not allowed; pass a literal key name",
        },
        Rule {
            name: "non-identifier-key",
            pattern: Regex::new(
                r#"\bget\((?:'[^']*[^A-Za-z0-9'][^']*'|"[^"]*[^A-Za-z0-9"][^"]*")\)"#,
            )
            .unwrap(),
            message: "get() keys must contain only alphanumeric characters (letters and digits)",
        },
    ];
}

/// Check `expr` against the accessor rules.
///
/// Returns `None` when no rule matches.
pub fn validate(expr: &str) -> Option<Diagnostic> {
    RULES.iter().find_map(|rule| {
        rule.pattern.find(expr).map(|m| {
            let position = position::byte_to_char(expr, m.start());
            debug!("rule '{}' matched at {}: {}", rule.name, position, m.as_str());
            Diagnostic {
                rule: rule.name.to_string(),
                message: rule.message.to_string(),
                position,
            }
        })
    })
}
