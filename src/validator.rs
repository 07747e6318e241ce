//! Password validator - rule evaluation logic.

use secrecy::{ExposeSecret, SecretString};

use crate::config::{ConfigError, Options};
use crate::merge::deep_merge;
use crate::rules::{Rule, RuleSet, trim_value};

/// Outcome of validating one or two password values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// `true` only when every rule passed.
    pub valid: bool,
    /// Messages of the failed rules, in rule order.
    pub messages: Vec<String>,
}

impl ValidationResult {
    /// Result for the state where nothing has been entered yet:
    /// invalid, but without messages.
    pub fn pending() -> Self {
        Self::default()
    }
}

/// Result of a single rule during one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub name: String,
    pub passed: bool,
    /// Resolved failure message, `None` when the rule passed.
    pub message: Option<String>,
}

/// Validates passwords against a fixed, named set of rules.
///
/// Two-field validators ([`PasswordValidator::new`]) also check that the
/// password and its confirmation match; single-field validators
/// ([`PasswordValidator::single`]) only check content.
///
/// Validation never mutates the validator, so an instance can be shared
/// across threads.
#[derive(Clone, Debug)]
pub struct PasswordValidator {
    rules: RuleSet,
}

impl PasswordValidator {
    /// Two-field validator with the built-in rules.
    pub fn new() -> Self {
        Self::from_rules(RuleSet::two_field(crate::rules::DEFAULT_MIN_LENGTH))
    }

    /// Single-field validator with the built-in rules.
    pub fn single() -> Self {
        Self::from_rules(RuleSet::single_field(crate::rules::DEFAULT_MIN_LENGTH))
    }

    /// Two-field validator with `options` merged onto the built-in rules.
    ///
    /// # Errors
    ///
    /// Returns error if the minimum length is zero or a new rule lacks a
    /// message or a predicate.
    pub fn with_options(options: Options) -> Result<Self, ConfigError> {
        let min_length = options.effective_min_length()?;
        Self::build(RuleSet::two_field(min_length), options)
    }

    /// Single-field validator with `options` merged onto the built-in rules.
    ///
    /// # Errors
    ///
    /// Same as [`PasswordValidator::with_options`].
    pub fn single_with_options(options: Options) -> Result<Self, ConfigError> {
        let min_length = options.effective_min_length()?;
        Self::build(RuleSet::single_field(min_length), options)
    }

    /// Validator enforcing exactly `rules`, without any built-in rule.
    pub fn from_rules(rules: RuleSet) -> Self {
        #[cfg(feature = "tracing")]
        tracing::info!("Password validator built with {} rules", rules.len());

        Self { rules }
    }

    fn build(mut rules: RuleSet, options: Options) -> Result<Self, ConfigError> {
        deep_merge(&mut rules, [options.overrides])?;
        Ok(Self::from_rules(rules))
    }

    /// The effective rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Validates a password and its confirmation.
    ///
    /// Both values are trimmed first. When both are empty the result is
    /// [`ValidationResult::pending`]; otherwise every rule runs and the
    /// messages of the failed ones are collected in rule order.
    pub fn validate(&self, value_one: &str, value_two: &str) -> ValidationResult {
        let Some(outcomes) = self.evaluate(value_one, value_two) else {
            return ValidationResult::pending();
        };

        let messages: Vec<String> = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.message)
            .collect();

        ValidationResult {
            valid: messages.is_empty(),
            messages,
        }
    }

    /// Validates a single value, equivalent to `validate(value, "")`.
    ///
    /// On a two-field validator the matching rule fails for any non-blank
    /// value; use [`PasswordValidator::single`] for lone password fields.
    pub fn validate_one(&self, value: &str) -> ValidationResult {
        self.validate(value, "")
    }

    /// Same as [`PasswordValidator::validate`] for secret values.
    pub fn validate_secret(
        &self,
        value_one: &SecretString,
        value_two: &SecretString,
    ) -> ValidationResult {
        self.validate(value_one.expose_secret(), value_two.expose_secret())
    }

    /// Runs every rule and reports each outcome in rule order.
    ///
    /// Returns `None` when both trimmed values are empty.
    pub fn evaluate(&self, value_one: &str, value_two: &str) -> Option<Vec<RuleOutcome>> {
        let value_one = trim_value(value_one);
        let value_two = trim_value(value_two);

        if value_one.is_empty() && value_two.is_empty() {
            return None;
        }

        let outcomes: Vec<RuleOutcome> = self
            .rules
            .iter()
            .map(|(name, rule)| {
                let passed = rule.predicate.test(value_one, value_two);
                RuleOutcome {
                    name: name.to_string(),
                    passed,
                    message: (!passed).then(|| rule.message.resolve()),
                }
            })
            .collect();

        #[cfg(feature = "tracing")]
        {
            let failed: Vec<&str> = outcomes
                .iter()
                .filter(|outcome| !outcome.passed)
                .map(|outcome| outcome.name.as_str())
                .collect();
            tracing::debug!("Password validation finished, failed rules: {:?}", failed);
        }

        Some(outcomes)
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}
