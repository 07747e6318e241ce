//! Password validation library
//!
//! This library checks passwords against a named set of rules (minimum
//! length, character classes, custom predicates) and checks that a password
//! and its confirmation match. Every failed rule contributes a message, so a
//! form can show all problems at once.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_MIN_LENGTH`: Default minimum length picked up by
//!   [`Options::from_env`] (default: `6`)
//!
//! # Example
//!
//! ```rust
//! use pwd_validator::{Options, PasswordValidator, RulePatch};
//!
//! let validator = PasswordValidator::new();
//!
//! let result = validator.validate("aD56#_sb", "aD56#_sb");
//! assert!(result.valid);
//!
//! let result = validator.validate("aB$6", "aB$6");
//! assert_eq!(
//!     result.messages,
//!     vec!["Password must be at least 6 characters in length".to_string()]
//! );
//!
//! // Override a message, add a rule
//! let custom = PasswordValidator::with_options(
//!     Options::new()
//!         .rule("minimumLength", RulePatch::new().message("Not long enough"))
//!         .rule(
//!             "noSpaces",
//!             RulePatch::new()
//!                 .message("Password must not contain spaces")
//!                 .single_predicate(|value| !value.contains(' ')),
//!         ),
//! )
//! .expect("valid options");
//!
//! let result = custom.validate("aB$ 6", "aB$ 6");
//! assert_eq!(
//!     result.messages,
//!     vec!["Not long enough".to_string(), "Password must not contain spaces".to_string()]
//! );
//! ```

// Internal modules
mod config;
mod form;
mod merge;
pub mod rules;
mod validator;

// Public API
pub use config::{ConfigError, MIN_LENGTH_ENV, Options, get_min_length};
pub use form::{FormError, MAX_FIELDS, PasswordForm};
pub use merge::{Merge, deep_merge};
pub use rules::{Message, Overrides, Predicate, Rule, RulePatch, RuleSet};
pub use validator::{PasswordValidator, RuleOutcome, ValidationResult};
