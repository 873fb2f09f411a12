/// Canonical matching form: lowercase, whitespace runs collapsed to one space, trimmed.
///
/// Idempotent: `normalize_keyword(&normalize_keyword(s)) == normalize_keyword(s)`.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absent keywords normalize to the empty string.
pub fn normalize_optional(keyword: Option<&str>) -> String {
    keyword.map(normalize_keyword).unwrap_or_default()
}
