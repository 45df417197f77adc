//! Cursor offset helpers
//!
//! The engine works with byte offsets into UTF-8 text. Hosts rarely do: a
//! browser textarea reports UTF-16 code units. These helpers clamp untrusted
//! offsets and translate between the two encodings.

/// Clamp `offset` to `text.len()` and move it back onto a char boundary.
pub fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Convert a UTF-16 code unit offset into a byte offset.
///
/// Offsets past the end map to `text.len()`. An offset that falls between the
/// two halves of a surrogate pair maps to the start of that character.
pub fn utf16_to_byte(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > utf16_offset {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// Convert a byte offset into a UTF-16 code unit offset.
pub fn byte_to_utf16(text: &str, byte_offset: usize) -> usize {
    let byte_offset = clamp_to_boundary(text, byte_offset);
    text[..byte_offset].encode_utf16().count()
}
