//! Password validation rules
//!
//! A rule pairs a predicate with the message shown when the predicate fails.
//! Built-in predicates live in one file per concern.

mod length;
mod matching;
mod variety;

pub use length::{DEFAULT_MIN_LENGTH, has_min_length, min_length_message};
pub use matching::values_match;
pub use variety::{SPECIAL_CHARS, has_digit, has_lowercase, has_special_char, has_uppercase};

use std::fmt;
use std::sync::Arc;

/// Rule name of the minimum length check.
pub const MINIMUM_LENGTH: &str = "minimumLength";
/// Rule name of the special character check.
pub const SPECIAL_CHAR: &str = "specialChar";
/// Rule name of the lowercase check.
pub const LOWERCASE: &str = "lowercase";
/// Rule name of the uppercase check.
pub const UPPERCASE: &str = "uppercase";
/// Rule name of the digit check.
pub const NUMBER: &str = "number";
/// Rule name of the two-value equality check.
pub const MATCHING: &str = "matching";

const SPECIAL_CHAR_MESSAGE: &str =
    r#"Password must have at least one special character (e.g. !@#$%^&*()_-+={[}]|:;"'<,>.])"#;
const LOWERCASE_MESSAGE: &str = "Password must have at least one lowercase character";
const UPPERCASE_MESSAGE: &str = "Password must have at least one uppercase character";
const NUMBER_MESSAGE: &str = "Password must have at least one number";
const MATCHING_MESSAGE: &str = "Passwords must match exactly";

/// Removes surrounding whitespace, including the byte order mark (U+FEFF).
pub fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Failure message of a rule, either fixed text or computed when the rule fails.
#[derive(Clone)]
pub enum Message {
    Fixed(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Message {
    /// Creates a message produced by `f` each time it is resolved.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Message::Computed(Arc::new(f))
    }

    /// Returns the message text, invoking the closure for computed messages.
    pub fn resolve(&self) -> String {
        match self {
            Message::Fixed(text) => text.clone(),
            Message::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            Message::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Fixed(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Fixed(text)
    }
}

/// Pure check over the trimmed first and second values.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a predicate that looks at both values.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Predicate(Arc::new(f))
    }

    /// Wraps a predicate that only looks at the first value.
    pub fn single<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Predicate(Arc::new(move |value: &str, _: &str| f(value)))
    }

    pub fn test(&self, value_one: &str, value_two: &str) -> bool {
        (self.0)(value_one, value_two)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A predicate together with its failure message.
#[derive(Clone, Debug)]
pub struct Rule {
    pub message: Message,
    pub predicate: Predicate,
}

impl Rule {
    pub fn new(message: impl Into<Message>, predicate: Predicate) -> Self {
        Self {
            message: message.into(),
            predicate,
        }
    }
}

/// Partial rule used to override or extend a rule set.
///
/// Every field is optional; fields left as `None` keep the value of the rule
/// being overridden.
#[derive(Clone, Debug, Default)]
pub struct RulePatch {
    pub message: Option<Message>,
    pub predicate: Option<Predicate>,
}

impl RulePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn computed_message<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.message = Some(Message::computed(f));
        self
    }

    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Predicate::new(f));
        self
    }

    pub fn single_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Predicate::single(f));
        self
    }
}

/// Ordered collection of named rules.
///
/// Iteration follows insertion order, which is also the order of messages in
/// a validation result.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<(String, Rule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rules for a single password field.
    pub fn single_field(min_length: usize) -> Self {
        let mut set = Self::new();
        set.insert(
            MINIMUM_LENGTH,
            Rule::new(
                Message::computed(move || min_length_message(min_length)),
                Predicate::single(move |value| has_min_length(value, min_length)),
            ),
        );
        set.insert(
            SPECIAL_CHAR,
            Rule::new(SPECIAL_CHAR_MESSAGE, Predicate::single(has_special_char)),
        );
        set.insert(
            LOWERCASE,
            Rule::new(LOWERCASE_MESSAGE, Predicate::single(has_lowercase)),
        );
        set.insert(
            UPPERCASE,
            Rule::new(UPPERCASE_MESSAGE, Predicate::single(has_uppercase)),
        );
        set.insert(NUMBER, Rule::new(NUMBER_MESSAGE, Predicate::single(has_digit)));
        set
    }

    /// Built-in rules for a password plus confirmation pair.
    pub fn two_field(min_length: usize) -> Self {
        let mut set = Self::single_field(min_length);
        set.insert(MATCHING, Rule::new(MATCHING_MESSAGE, Predicate::new(values_match)));
        set
    }

    /// Inserts a rule, replacing any rule with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = rule,
            None => self.rules.push((name, rule)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(rule_name, _)| rule_name == name)
            .map(|(_, rule)| rule)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules
            .iter_mut()
            .find(|(rule_name, _)| rule_name == name)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

/// Partial rule set: named patches applied onto a [`RuleSet`].
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    patches: Vec<(String, RulePatch)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a patch for `name`; a second patch for the same name is merged
    /// into the first.
    pub fn rule(mut self, name: impl Into<String>, patch: RulePatch) -> Self {
        self.insert(name, patch);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, patch: RulePatch) {
        use crate::merge::Merge;

        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => existing.merge(patch),
            None => self.patches.push((name, patch)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RulePatch> {
        self.patches
            .iter()
            .find(|(patch_name, _)| patch_name == name)
            .map(|(_, patch)| patch)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut RulePatch> {
        self.patches
            .iter_mut()
            .find(|(patch_name, _)| patch_name == name)
            .map(|(_, patch)| patch)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl IntoIterator for Overrides {
    type Item = (String, RulePatch);
    type IntoIter = std::vec::IntoIter<(String, RulePatch)>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.into_iter()
    }
}
