//! String utilities for the domain layer.

/// Take the first `max_chars` characters of `s`, appending `...` when
/// anything was cut off.
///
/// Counts `char`s rather than bytes, so multi-byte text is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}
