//! Case-insensitive text matching shared by the exclusion filter and interest scoring.

/// Returns true when `needle` occurs anywhere in `haystack`, ignoring case.
///
/// Lowercasing is Unicode-aware, so Cyrillic city names and institution
/// codes fold the same way Latin ones do. An empty `needle` is contained in
/// every haystack; callers that must not match everything are expected to
/// drop empty terms before they reach the engine.
pub fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality, used for the desired-city filter.
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// True when either string contains the other, ignoring case.
pub fn overlaps_fold(a: &str, b: &str) -> bool {
    contains_fold(a, b) || contains_fold(b, a)
}
