//! Deep merge of partial rule configuration onto a rule set.
//!
//! Patches are merged key by key: a rule patch merges into the rule with the
//! same name field by field, while leaf values (messages, predicates) are
//! replaced outright.

use crate::config::ConfigError;
use crate::rules::{Overrides, Rule, RulePatch, RuleSet};

/// In-place, field-wise merge of `Patch` into `self`.
pub trait Merge<Patch = Self> {
    fn merge(&mut self, patch: Patch);
}

impl Merge<RulePatch> for Rule {
    fn merge(&mut self, patch: RulePatch) {
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(predicate) = patch.predicate {
            self.predicate = predicate;
        }
    }
}

impl Merge for RulePatch {
    fn merge(&mut self, patch: RulePatch) {
        if patch.message.is_some() {
            self.message = patch.message;
        }
        if patch.predicate.is_some() {
            self.predicate = patch.predicate;
        }
    }
}

impl Merge for Overrides {
    fn merge(&mut self, patch: Overrides) {
        for (name, rule_patch) in patch {
            self.insert(name, rule_patch);
        }
    }
}

/// Merges every source onto `target`, left to right.
///
/// Sources are folded together first so that a rule introduced across several
/// sources only has to be complete once all of them are combined. Existing
/// rules keep their position and any field the patch leaves unset; new rules
/// are appended.
///
/// # Errors
///
/// Returns [`ConfigError::IncompleteRule`] if a rule name unknown to `target`
/// ends up without a message or a predicate. `target` is left untouched in
/// that case.
pub fn deep_merge<I>(target: &mut RuleSet, sources: I) -> Result<&mut RuleSet, ConfigError>
where
    I: IntoIterator<Item = Overrides>,
{
    let mut combined = Overrides::new();
    for source in sources {
        combined.merge(source);
    }

    let mut additions = Vec::new();
    let mut updates = Vec::new();
    for (name, patch) in combined {
        if target.contains(&name) {
            updates.push((name, patch));
        } else {
            let rule = complete_rule(&name, patch)?;
            additions.push((name, rule));
        }
    }

    for (name, patch) in updates {
        if let Some(rule) = target.get_mut(&name) {
            rule.merge(patch);
        }
    }
    for (name, rule) in additions {
        target.insert(name, rule);
    }

    Ok(target)
}

fn complete_rule(name: &str, patch: RulePatch) -> Result<Rule, ConfigError> {
    match (patch.message, patch.predicate) {
        (Some(message), Some(predicate)) => Ok(Rule { message, predicate }),
        (message, _) => {
            let missing = if message.is_none() { "message" } else { "predicate" };
            #[cfg(feature = "tracing")]
            tracing::error!("Rule '{}' rejected: missing {}", name, missing);
            Err(ConfigError::IncompleteRule {
                name: name.to_string(),
                missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{
        DEFAULT_MIN_LENGTH, LOWERCASE, MATCHING, MINIMUM_LENGTH, NUMBER, Predicate,
    };

    fn defaults() -> RuleSet {
        RuleSet::two_field(DEFAULT_MIN_LENGTH)
    }

    #[test]
    fn test_merge_message_keeps_predicate() {
        let mut set = defaults();
        let overrides =
            Overrides::new().rule(MINIMUM_LENGTH, RulePatch::new().message("Not long enough"));

        deep_merge(&mut set, [overrides]).unwrap();

        let rule = set.get(MINIMUM_LENGTH).unwrap();
        assert_eq!(rule.message.resolve(), "Not long enough");
        assert!(!rule.predicate.test("aB$6", ""));
        assert!(rule.predicate.test("aB$678", ""));
    }

    #[test]
    fn test_merge_predicate_keeps_message() {
        let mut set = defaults();
        let overrides = Overrides::new().rule(
            MINIMUM_LENGTH,
            RulePatch::new().single_predicate(|value| value.len() >= 8),
        );

        deep_merge(&mut set, [overrides]).unwrap();

        let rule = set.get(MINIMUM_LENGTH).unwrap();
        assert_eq!(
            rule.message.resolve(),
            "Password must be at least 6 characters in length"
        );
        assert!(!rule.predicate.test("aB$678", ""));
    }

    #[test]
    fn test_merge_leaves_siblings_untouched() {
        let mut set = defaults();
        let overrides = Overrides::new().rule(NUMBER, RulePatch::new().message("Needs a number"));

        deep_merge(&mut set, [overrides]).unwrap();

        assert_eq!(set.len(), 6);
        assert_eq!(
            set.get(LOWERCASE).unwrap().message.resolve(),
            "Password must have at least one lowercase character"
        );
        assert_eq!(
            set.get(MATCHING).unwrap().message.resolve(),
            "Passwords must match exactly"
        );
    }

    #[test]
    fn test_merge_appends_new_rule() {
        let mut set = defaults();
        let overrides = Overrides::new().rule(
            "noSpaces",
            RulePatch::new()
                .message("No spaces allowed")
                .single_predicate(|value| !value.contains(' ')),
        );

        deep_merge(&mut set, [overrides]).unwrap();

        assert_eq!(set.len(), 7);
        assert_eq!(set.names().last(), Some("noSpaces"));
    }

    #[test]
    fn test_merge_sources_left_to_right() {
        let mut set = defaults();
        let first = Overrides::new().rule(NUMBER, RulePatch::new().message("first"));
        let second = Overrides::new().rule(NUMBER, RulePatch::new().message("second"));

        deep_merge(&mut set, [first, second]).unwrap();

        assert_eq!(set.get(NUMBER).unwrap().message.resolve(), "second");
    }

    #[test]
    fn test_merge_new_rule_split_across_sources() {
        let mut set = defaults();
        let first = Overrides::new().rule("custom", RulePatch::new().message("custom failed"));
        let second =
            Overrides::new().rule("custom", RulePatch::new().single_predicate(|_| false));

        deep_merge(&mut set, [first, second]).unwrap();

        let rule = set.get("custom").unwrap();
        assert_eq!(rule.message.resolve(), "custom failed");
        assert!(!rule.predicate.test("x", ""));
    }

    #[test]
    fn test_merge_rejects_incomplete_new_rule() {
        let mut set = defaults();
        let overrides = Overrides::new()
            .rule(NUMBER, RulePatch::new().message("changed"))
            .rule("custom", RulePatch::new().message("no predicate"));

        let result = deep_merge(&mut set, [overrides]);

        match result {
            Err(ConfigError::IncompleteRule { name, missing }) => {
                assert_eq!(name, "custom");
                assert_eq!(missing, "predicate");
            }
            _ => panic!("Expected IncompleteRule error"),
        }
        // nothing applied
        assert_eq!(
            set.get(NUMBER).unwrap().message.resolve(),
            "Password must have at least one number"
        );
        assert!(!set.contains("custom"));
    }

    #[test]
    fn test_merge_rejects_new_rule_without_message() {
        let mut set = defaults();
        let overrides = Overrides::new().rule(
            "custom",
            RulePatch {
                message: None,
                predicate: Some(Predicate::single(|_| true)),
            },
        );

        let result = deep_merge(&mut set, [overrides]);
        assert!(matches!(
            result,
            Err(ConfigError::IncompleteRule { missing: "message", .. })
        ));
    }

    #[test]
    fn test_merge_no_sources_returns_target() {
        let mut set = defaults();
        let merged = deep_merge(&mut set, std::iter::empty::<Overrides>()).unwrap();
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn test_rule_patch_merge_overwrites_present_fields_only() {
        let mut base = RulePatch::new().message("base").single_predicate(|_| true);
        base.merge(RulePatch::new().message("top"));

        assert_eq!(base.message.unwrap().resolve(), "top");
        assert!(base.predicate.unwrap().test("", ""));
    }
}
