//! Log sanitization utilities
//!
//! Keeps signing material and oversized response bodies out of debug/error logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const MASK_VISIBLE_CHARS: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise the first `TRUNCATE_LIMIT` bytes (cut on a char boundary)
/// followed by the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an identifier or token, keeping only its first few characters.
pub fn mask_secret(s: &str) -> String {
    let visible: String = s.chars().take(MASK_VISIBLE_CHARS).collect();
    if visible.len() == s.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Mask the value of `key=value` pairs in a canonical parameter string.
pub fn mask_params(params: &str, keys: &[&str]) -> String {
    params
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) if keys.contains(&k) => format!("{k}={}", mask_secret(v)),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
