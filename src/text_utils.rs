/// Count codepoints. Cursor offsets are measured in these.
pub(crate) fn char_count(content: &str) -> usize {
    content.chars().count()
}

/// Convert a codepoint index to a byte index in a UTF-8 string.
pub(crate) fn char_to_byte_idx(content: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    match content.char_indices().nth(char_idx) {
        Some((idx, _)) => idx,
        None => content.len(),
    }
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
