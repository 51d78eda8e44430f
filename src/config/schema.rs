//! Typed option declarations

use crate::pattern::SectionPattern;

use super::value::OptionKind;

#[derive(Debug, Clone)]
struct SchemaRule {
    section: SectionPattern,
    key: String,
    kind: OptionKind,
}

/// Declares which options carry a type other than plain string.
///
/// Rules are checked in registration order and the first match wins.
/// Options with no matching rule resolve to [`Value::Str`](super::Value::Str).
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<SchemaRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` in every section matching `section_glob` as `kind`.
    pub fn option(mut self, section_glob: &str, key: &str, kind: OptionKind) -> Self {
        self.rules.push(SchemaRule {
            section: SectionPattern::new(section_glob),
            key: key.to_lowercase(),
            kind,
        });
        self
    }

    pub fn kind_of(&self, section: &str, key: &str) -> OptionKind {
        self.rules
            .iter()
            .find(|rule| rule.key == key && rule.section.matches(section))
            .map_or(OptionKind::Str, |rule| rule.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
