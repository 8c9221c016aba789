use crate::position;

/// Whether the cursor at `offset` (in characters) sits inside a quoted
/// literal.
///
/// Quotes toggle without escape handling: `'` only counts outside a
/// double-quoted run and `"` only outside a single-quoted one, so
/// `"it's"` stays balanced. A backslash-escaped quote is not recognised
/// and flips the state for the rest of the text.
pub fn is_inside_literal(text: &str, offset: usize) -> bool {
    let mut in_single = false;
    let mut in_double = false;

    for ch in position::prefix(text, offset).chars() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            _ => {}
        }
    }

    in_single || in_double
}
