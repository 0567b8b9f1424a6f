/// Lower-case and trim a raw query the way both search channels expect it.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Case-insensitive substring test.
/// `needle` must already be lower-cased (see `normalize_query`).
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle)
}
