//! Length rule - checks password minimum length.

/// Minimum length used when none is configured.
pub const DEFAULT_MIN_LENGTH: usize = 6;

/// Checks if the password has at least `min_length` characters.
///
/// Length is counted in `char`s, so multi-byte characters count once.
pub fn has_min_length(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
}

/// Failure message of the minimum length rule.
pub fn min_length_message(min_length: usize) -> String {
    format!(
        "Password must be at least {} characters in length",
        min_length
    )
}
