//! Case-aware character and string comparisons used by the search
//! primitives.
//!
//! Case-insensitive comparison folds one character at a time through
//! `char::to_lowercase`, so a match always spans exactly as many characters
//! as the pattern it came from. Multi-character expansions (ß → "ss") do
//! not match across character boundaries.

/// Compares two characters under the given case rule.
pub fn eq_char(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Full equality of two strings, character by character.
pub fn eq_str(a: &str, b: &str, case_sensitive: bool) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if eq_char(x, y, case_sensitive) => {}
            _ => return false,
        }
    }
}

/// Whether `text` begins with `prefix`.
pub fn starts_with(text: &str, prefix: &str, case_sensitive: bool) -> bool {
    let mut chars = text.chars();
    for expected in prefix.chars() {
        match chars.next() {
            Some(actual) if eq_char(actual, expected, case_sensitive) => {}
            _ => return false,
        }
    }
    true
}

/// Whether `text` ends with `suffix`.
pub fn ends_with(text: &str, suffix: &str, case_sensitive: bool) -> bool {
    let text: Vec<char> = text.chars().collect();
    let suffix: Vec<char> = suffix.chars().collect();
    if suffix.len() > text.len() {
        return false;
    }
    text[text.len() - suffix.len()..]
        .iter()
        .zip(&suffix)
        .all(|(a, b)| eq_char(*a, *b, case_sensitive))
}

/// Single containment check, used to rule out a whole text window before
/// any per-occurrence scanning.
pub fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if needle.is_empty() {
        return true;
    }
    if case_sensitive {
        return haystack.contains(needle);
    }
    let haystack: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    if needle.len() > haystack.len() {
        return false;
    }
    (0..=haystack.len() - needle.len()).any(|start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(a, b)| eq_char(*a, *b, false))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_comparison_respects_case_flag() {
        assert!(eq_char('a', 'A', false));
        assert!(!eq_char('a', 'A', true));
        assert!(eq_char('ß', 'ß', true));
        assert!(eq_char('Ä', 'ä', false));
    }

    #[test]
    fn string_equality_requires_equal_length() {
        assert!(eq_str("Rust", "rust", false));
        assert!(!eq_str("Rust", "rust", true));
        assert!(!eq_str("rust", "rustc", false));
    }

    #[test]
    fn prefix_and_suffix_checks() {
        assert!(starts_with("Hello world", "hello", false));
        assert!(!starts_with("Hello world", "hello", true));
        assert!(ends_with("Hello World", "world", false));
        assert!(!ends_with("Hello World", "word", false));
        assert!(starts_with("abc", "", true));
        assert!(ends_with("abc", "", true));
    }

    #[test]
    fn containment_scans_the_window_once() {
        assert!(contains("one TWO three", "two", false));
        assert!(!contains("one TWO three", "two", true));
        assert!(contains("multi\nline window", "multi\nline", true));
        assert!(!contains("short", "longer needle", false));
    }
}
