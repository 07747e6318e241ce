//! Matching rule - password and confirmation must be identical.

use super::trim_value;

/// Checks that both values are equal once surrounding whitespace is removed.
pub fn values_match(value_one: &str, value_two: &str) -> bool {
    trim_value(value_one) == trim_value(value_two)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_identical() {
        assert!(values_match("aD56#_sb", "aD56#_sb"));
    }

    #[test]
    fn test_matching_ignores_surrounding_whitespace() {
        assert!(values_match("aaa  ", "  aaa"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!values_match("abc", "ABC"));
        assert!(!values_match("abc", "def"));
    }

    #[test]
    fn test_matching_against_empty() {
        assert!(!values_match("aB$6878", ""));
        assert!(values_match("   ", ""));
    }

    #[test]
    fn test_matching_ignores_byte_order_mark() {
        assert!(values_match("\u{FEFF}aaa", "aaa\u{FEFF}"));
    }
}
