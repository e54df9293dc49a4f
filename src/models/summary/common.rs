//! Common summary helpers

/// Keep the first `max_chars` characters, appending "..." when anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
