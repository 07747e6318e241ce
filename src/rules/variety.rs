//! Character variety rules - special chars, lowercase, uppercase, digits.

/// Characters accepted by the special character rule.
pub const SPECIAL_CHARS: &str = r#"!@#$%^&*()_-+={[}]|:;"'<,>."#;

/// Checks for at least one character from [`SPECIAL_CHARS`].
pub fn has_special_char(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// Checks for at least one ASCII lowercase letter.
pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

/// Checks for at least one ASCII uppercase letter.
pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

/// Checks for at least one ASCII digit.
pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_char_every_accepted_char() {
        for c in SPECIAL_CHARS.chars() {
            assert!(has_special_char(&format!("abc{}", c)), "{:?} should count", c);
        }
    }

    #[test]
    fn test_special_char_outside_set() {
        assert!(!has_special_char("A7DaCD"));
        assert!(!has_special_char("abc?/~`"));
        assert!(!has_special_char("abc def"));
    }

    #[test]
    fn test_lowercase() {
        assert!(has_lowercase("A6%DaCD"));
        assert!(!has_lowercase("A6%DACD"));
        assert!(!has_lowercase("ÉÀ"));
        // non-ASCII lowercase does not count
        assert!(!has_lowercase("ß"));
    }

    #[test]
    fn test_uppercase() {
        assert!(has_uppercase("a6%dAad"));
        assert!(!has_uppercase("a6%daad"));
        assert!(!has_uppercase("É"));
    }

    #[test]
    fn test_digit() {
        assert!(has_digit("A%Da1CD"));
        assert!(!has_digit("A%DaCD"));
        // Arabic-Indic digit
        assert!(!has_digit("\u{0663}"));
    }
}
