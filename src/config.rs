//! Validator configuration
//!
//! Handles construction options, environment defaults and configuration errors.

use thiserror::Error;

use crate::merge::Merge;
use crate::rules::{DEFAULT_MIN_LENGTH, Overrides, RulePatch};

/// Environment variable holding the default minimum password length.
pub const MIN_LENGTH_ENV: &str = "PWD_MIN_LENGTH";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rule '{name}' is new but has no {missing}")]
    IncompleteRule { name: String, missing: &'static str },
    #[error("Invalid minimum length: {value:?}")]
    InvalidMinLength { value: String },
    #[error("Minimum length must be greater than zero")]
    ZeroMinLength,
}

/// Returns the default minimum password length.
///
/// Priority:
/// 1. Environment variable `PWD_MIN_LENGTH`
/// 2. [`DEFAULT_MIN_LENGTH`] (6)
///
/// # Errors
///
/// Returns error if the variable is set but is not a positive integer.
pub fn get_min_length() -> Result<usize, ConfigError> {
    match std::env::var(MIN_LENGTH_ENV) {
        Ok(raw) => parse_min_length(&raw),
        Err(_) => Ok(DEFAULT_MIN_LENGTH),
    }
}

fn parse_min_length(raw: &str) -> Result<usize, ConfigError> {
    let value = raw.trim().parse::<usize>().map_err(|_| {
        #[cfg(feature = "tracing")]
        tracing::warn!("Ignoring configuration: {} is not a length: {:?}", MIN_LENGTH_ENV, raw);
        ConfigError::InvalidMinLength {
            value: raw.to_string(),
        }
    })?;
    check_min_length(value)
}

pub(crate) fn check_min_length(value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroMinLength);
    }
    Ok(value)
}

/// Construction options of a validator.
///
/// `min_length` parameterizes the built-in minimum length rule (predicate and
/// message); `overrides` is merged onto the built-in rules.
///
/// # Example
///
/// ```rust
/// use pwd_validator::{Options, PasswordValidator, RulePatch};
///
/// let options = Options::new()
///     .min_length(8)
///     .rule("number", RulePatch::new().message("Needs a number"));
///
/// let validator = PasswordValidator::with_options(options).unwrap();
/// assert!(validator.validate("Abcdef1!", "Abcdef1!").valid);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub min_length: Option<usize>,
    pub overrides: Overrides,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from the environment (see [`get_min_length`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            min_length: Some(get_min_length()?),
            overrides: Overrides::new(),
        })
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Adds an override for the rule called `name`.
    pub fn rule(mut self, name: impl Into<String>, patch: RulePatch) -> Self {
        self.overrides.insert(name, patch);
        self
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides.merge(overrides);
        self
    }

    /// Minimum length to build the default rules with.
    pub(crate) fn effective_min_length(&self) -> Result<usize, ConfigError> {
        check_min_length(self.min_length.unwrap_or(DEFAULT_MIN_LENGTH))
    }
}

impl Merge for Options {
    fn merge(&mut self, patch: Options) {
        if patch.min_length.is_some() {
            self.min_length = patch.min_length;
        }
        self.overrides.merge(patch.overrides);
    }
}
