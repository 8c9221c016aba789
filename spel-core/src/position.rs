//! Conversions between character offsets (what the editor reports) and byte
//! offsets (what `str` slicing and `regex` matches use).

/// Byte index of the `char_offset`-th character, clamped to `text.len()`.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Number of characters that precede `byte_offset`.
///
/// `byte_offset` must lie on a char boundary; regex match bounds always do.
pub fn byte_to_char(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset.min(text.len())].chars().count()
}

/// The text before the cursor, with the cursor given in characters.
pub fn prefix(text: &str, char_offset: usize) -> &str {
    &text[..char_to_byte(text, char_offset)]
}
