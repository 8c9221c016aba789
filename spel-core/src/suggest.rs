//! Cursor-aware method completion.

use serde::Serialize;

use crate::literal::is_inside_literal;
use crate::methods::{SpelMethod, SPEL_METHODS};
use crate::position;

/// What the suggestion engine sees at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionContext {
    /// Cursor, in characters.
    pub cursor: usize,
    /// Letters immediately before the cursor.
    pub fragment: String,
    pub inside_literal: bool,
}

/// Result of accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub text: String,
    /// New cursor, in characters, just inside the inserted parentheses.
    pub cursor: usize,
}

pub fn completion_context(expr: &str, cursor: usize) -> CompletionContext {
    let before = position::prefix(expr, cursor);
    let fragment_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic())
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(before.len());

    CompletionContext {
        cursor: before.chars().count(),
        fragment: before[fragment_start..].to_string(),
        inside_literal: is_inside_literal(expr, cursor),
    }
}

/// Catalog methods whose name starts with the fragment before the cursor,
/// ignoring case, in catalog order.
///
/// Nothing is suggested for an empty fragment or while the cursor is inside
/// a string literal.
pub fn suggest(expr: &str, cursor: usize) -> Vec<&'static SpelMethod> {
    let context = completion_context(expr, cursor);
    if context.fragment.is_empty() || context.inside_literal {
        return Vec::new();
    }

    let fragment = context.fragment.to_lowercase();
    SPEL_METHODS
        .iter()
        .filter(|method| method.name.to_lowercase().starts_with(&fragment))
        .collect()
}

/// Replace the fragment before `cursor` with `name()` and place the cursor
/// between the parentheses.
pub fn accept(expr: &str, cursor: usize, method: &SpelMethod) -> Completion {
    let context = completion_context(expr, cursor);
    let fragment_start = context.cursor - context.fragment.chars().count();

    let head = position::prefix(expr, fragment_start);
    let tail = &expr[position::char_to_byte(expr, context.cursor)..];

    Completion {
        text: format!("{}{}(){}", head, method.name, tail),
        cursor: fragment_start + method.name.chars().count() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::find_method;

    fn names(expr: &str, cursor: usize) -> Vec<&'static str> {
        suggest(expr, cursor).into_iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_fragment_filtering() {
        let expr = "get('city').tou";
        assert_eq!(names(expr, expr.len()), vec!["toUpperCase"]);

        let expr = "get('city').to";
        assert_eq!(names(expr, expr.len()), vec!["toUpperCase", "toLowerCase"]);
    }

    #[test]
    fn test_case_insensitive() {
        let expr = "get('city').EQU";
        assert_eq!(names(expr, expr.len()), vec!["equals", "equalsIgnoreCase"]);
    }

    #[test]
    fn test_no_suggestions_inside_literal() {
        let context = completion_context("get('ab", 6);
        assert!(context.inside_literal);
        assert_eq!(context.fragment, "a");
        assert!(suggest("get('ab", 6).is_empty());
    }

    #[test]
    fn test_empty_fragment() {
        assert!(suggest("get('city').", 12).is_empty());
        assert!(suggest("x1", 2).is_empty());
        assert!(suggest("", 0).is_empty());
    }

    #[test]
    fn test_cursor_in_middle() {
        assert_eq!(names("get('city').tri + 1", 15), vec!["trim"]);
    }

    #[test]
    fn test_accept_replaces_fragment() {
        let method = find_method("toUpperCase").unwrap();
        let completion = accept("get('city').tou", 15, method);
        assert_eq!(completion.text, "get('city').toUpperCase()");
        assert_eq!(completion.cursor, 24);
    }

    #[test]
    fn test_accept_keeps_trailing_text() {
        let method = find_method("trim").unwrap();
        let completion = accept("get('a').tr == 'x'", 11, method);
        assert_eq!(completion.text, "get('a').trim() == 'x'");
        assert_eq!(completion.cursor, 14);
    }
}
