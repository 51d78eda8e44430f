//! Enable/disable rule lists as set arithmetic
//!
//! `enabled = (all - disabled) | explicitly_enabled`

use std::collections::BTreeSet;

use crate::config::{ConfigError, ResolvedConfig};

/// Token that stands for every known rule in either list.
pub const ALL_RULES: &str = "all";

pub const DISABLE_KEY: &str = "disable";
pub const ENABLE_KEY: &str = "enable";

/// Compute the enabled rule set.
///
/// `all` in `disabled` clears the base set; `all` in `enabled` re-adds every
/// known rule. Explicitly enabled rules are kept even when unknown.
pub fn select_rules<A, D, E>(all: A, disabled: D, enabled: E) -> BTreeSet<String>
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    D: IntoIterator,
    D::Item: AsRef<str>,
    E: IntoIterator,
    E::Item: AsRef<str>,
{
    let all: BTreeSet<String> = all.into_iter().map(|r| r.as_ref().to_string()).collect();
    let disabled: BTreeSet<String> = disabled
        .into_iter()
        .map(|r| r.as_ref().to_string())
        .collect();

    let mut selected: BTreeSet<String> = if disabled.contains(ALL_RULES) {
        BTreeSet::new()
    } else {
        all.difference(&disabled).cloned().collect()
    };

    for rule in enabled {
        let rule = rule.as_ref();
        if rule == ALL_RULES {
            selected.extend(all.iter().cloned());
        } else {
            selected.insert(rule.to_string());
        }
    }

    selected
}

/// Rule selection for a linter section, reading its `disable` and `enable`
/// lists. Missing options count as empty lists.
pub fn rules_for_section<A>(
    config: &ResolvedConfig,
    section: &str,
    all: A,
) -> Result<BTreeSet<String>, ConfigError>
where
    A: IntoIterator,
    A::Item: AsRef<str>,
{
    let list = |key: &str| -> Result<Vec<String>, ConfigError> {
        if config.contains(section, key) {
            config.get_list(section, key)
        } else {
            Ok(Vec::new())
        }
    };

    let disabled = list(DISABLE_KEY)?;
    let enabled = list(ENABLE_KEY)?;
    Ok(select_rules(all, disabled, enabled))
}
