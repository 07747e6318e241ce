//! Password form state
//!
//! Tracks the values of up to two registered password fields and the
//! validation result of their latest change or submit.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::{ConfigError, Options};
use crate::validator::{PasswordValidator, ValidationResult};

/// Maximum number of fields a form can register.
pub const MAX_FIELDS: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(
        "Form only works with {max} registered password fields, got {count}; please register only two fields",
        max = MAX_FIELDS
    )]
    TooManyFields { count: usize },
    #[error("Field is not registered: {0}")]
    UnknownField(String),
    #[error("Field is registered more than once: {0}")]
    DuplicateField(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Password form with one field (password) or two (password and confirmation).
///
/// With two fields the matching rule applies; with one it does not.
///
/// # Example
///
/// ```rust
/// use pwd_validator::{Options, PasswordForm};
///
/// let mut form = PasswordForm::new(&[("password", ""), ("confirm", "")], Options::new()).unwrap();
/// assert!(!form.validation().valid);
///
/// form.set_field("password", "aD56#_sb").unwrap();
/// let result = form.set_field("confirm", "aD56#_sb").unwrap();
/// assert!(result.valid);
/// ```
#[derive(Debug)]
pub struct PasswordForm {
    fields: Vec<(String, SecretString)>,
    validator: PasswordValidator,
    validation: ValidationResult,
}

impl PasswordForm {
    /// Registers `fields` (name and initial value, in order).
    ///
    /// # Errors
    ///
    /// Returns [`FormError::TooManyFields`] for more than two fields,
    /// [`FormError::DuplicateField`] if a name is registered twice, or a
    /// configuration error if `options` is rejected.
    pub fn new(fields: &[(&str, &str)], options: Options) -> Result<Self, FormError> {
        if fields.len() > MAX_FIELDS {
            #[cfg(feature = "tracing")]
            tracing::error!("Password form rejected: {} fields registered", fields.len());
            return Err(FormError::TooManyFields {
                count: fields.len(),
            });
        }

        if let Some(index) = (1..fields.len())
            .find(|&i| fields[..i].iter().any(|(name, _)| *name == fields[i].0))
        {
            #[cfg(feature = "tracing")]
            tracing::error!("Password form rejected: field {:?} registered twice", fields[index].0);
            return Err(FormError::DuplicateField(fields[index].0.to_string()));
        }

        let validator = if fields.len() == MAX_FIELDS {
            PasswordValidator::with_options(options)?
        } else {
            PasswordValidator::single_with_options(options)?
        };

        let fields = fields
            .iter()
            .map(|(name, value)| (name.to_string(), SecretString::new(value.to_string().into())))
            .collect();

        Ok(Self {
            fields,
            validator,
            validation: ValidationResult::pending(),
        })
    }

    /// Updates one field and re-validates the form.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<&ValidationResult, FormError> {
        self.store(name, value)?;
        Ok(self.run_validation())
    }

    /// Updates every given field, then validates once.
    ///
    /// Fields that are not given keep their current value. Nothing is updated
    /// if any name is unknown.
    pub fn submit(&mut self, values: &[(&str, &str)]) -> Result<&ValidationResult, FormError> {
        if let Some((unknown, _)) = values.iter().find(|(name, _)| self.position(name).is_none()) {
            return Err(self.unknown(unknown));
        }
        for (name, value) in values {
            self.store(name, value)?;
        }
        Ok(self.run_validation())
    }

    /// Result of the latest validation.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn value(&self, name: &str) -> Option<&SecretString> {
        self.position(name).map(|index| &self.fields[index].1)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn validator(&self) -> &PasswordValidator {
        &self.validator
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }

    fn unknown(&self, name: &str) -> FormError {
        #[cfg(feature = "tracing")]
        tracing::warn!("Password form has no field named {:?}", name);
        FormError::UnknownField(name.to_string())
    }

    fn store(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let index = self.position(name).ok_or_else(|| self.unknown(name))?;
        self.fields[index].1 = SecretString::new(value.to_string().into());
        Ok(())
    }

    fn run_validation(&mut self) -> &ValidationResult {
        let mut values = self.fields.iter().map(|(_, value)| value.expose_secret());
        let value_one = values.next().unwrap_or("");
        let value_two = values.next().unwrap_or("");

        self.validation = self.validator.validate(value_one, value_two);
        &self.validation
    }
}
