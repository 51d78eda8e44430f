//! The merged, read-only view of all loaded documents

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::pattern::ModulePattern;

use super::document::ConfigDocument;
use super::error::{ConfigError, ParseErrorKind, Result};
use super::schema::Schema;
use super::value::Value;

/// Where a resolved option was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub path: PathBuf,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub value: Value,
    pub origin: Origin,
}

/// Options of one section after merging, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSection {
    options: BTreeMap<String, ResolvedOption>,
}

impl ResolvedSection {
    pub fn get(&self, key: &str) -> Option<&ResolvedOption> {
        self.options.get(&key.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedOption)> {
        self.options.iter().map(|(k, o)| (k.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Serialize for ResolvedSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.options.iter().map(|(k, o)| (k, &o.value)))
    }
}

/// Resolved configuration: section name -> option key -> value.
///
/// Built once by [`Loader`](super::Loader) or [`ResolvedConfig::from_documents`]
/// and never mutated afterwards. For any (section, key) defined by several
/// documents, the last document wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    sections: BTreeMap<String, ResolvedSection>,
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.sections.iter())
    }
}

impl ResolvedConfig {
    /// Merge parsed documents in order, converting typed options per `schema`.
    ///
    /// Any conversion failure aborts the merge; no partial result is returned.
    pub fn from_documents<I>(documents: I, schema: &Schema) -> Result<ResolvedConfig>
    where
        I: IntoIterator<Item = ConfigDocument>,
    {
        let mut sections: BTreeMap<String, ResolvedSection> = BTreeMap::new();

        for document in documents {
            trace!(path = %document.path.display(), "merging document");
            for section in document.sections {
                let resolved = sections.entry(section.name.clone()).or_default();

                for entry in section.entries {
                    let kind = schema.kind_of(&section.name, &entry.key);
                    let value =
                        Value::from_raw(&entry.raw, kind).map_err(|message| ConfigError::Parse {
                            path: document.path.clone(),
                            line: entry.line,
                            kind: ParseErrorKind::InvalidValue {
                                key: entry.key.clone(),
                                message,
                            },
                        })?;

                    let option = ResolvedOption {
                        value,
                        origin: Origin {
                            path: document.path.clone(),
                            line: entry.line,
                        },
                    };

                    if let Some(previous) = resolved.options.insert(entry.key.clone(), option) {
                        debug!(
                            section = %section.name,
                            key = %entry.key,
                            from = %previous.origin.path.display(),
                            to = %document.path.display(),
                            "option overridden"
                        );
                    }
                }
            }
        }

        Ok(ResolvedConfig { sections })
    }

    /// Look up an option.
    ///
    /// Falls back to `default` when the option is absent; fails with
    /// [`ConfigError::MissingOption`] when it is absent and no default was given.
    pub fn get<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: Option<&'a Value>,
    ) -> Result<&'a Value> {
        match (self.value(section, key), default) {
            (Some(value), _) => Ok(value),
            (None, Some(default)) => Ok(default),
            (None, None) => Err(ConfigError::MissingOption {
                section: section.to_string(),
                key: key.to_string(),
            }),
        }
    }

    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a Value) -> &'a Value {
        self.value(section, key).unwrap_or(default)
    }

    /// Raw lookup without error reporting.
    pub fn value(&self, section: &str, key: &str) -> Option<&Value> {
        self.option(section, key).map(|o| &o.value)
    }

    pub fn option(&self, section: &str, key: &str) -> Option<&ResolvedOption> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    pub fn origin(&self, section: &str, key: &str) -> Option<&Origin> {
        self.option(section, key).map(|o| &o.origin)
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.option(section, key).is_some()
    }

    pub fn get_str(&self, section: &str, key: &str) -> Result<&str> {
        let value = self.get(section, key, None)?;
        value.as_str().ok_or_else(|| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: format!("expected a string, found '{value}'"),
        })
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        self.typed(section, key, Value::to_bool)
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        self.typed(section, key, Value::to_int)
    }

    pub fn get_list(&self, section: &str, key: &str) -> Result<Vec<String>> {
        self.typed(section, key, Value::to_list)
    }

    fn typed<T>(
        &self,
        section: &str,
        key: &str,
        convert: impl Fn(&Value) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let value = self.get(section, key, None)?;
        convert(value).map_err(|message| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message,
        })
    }

    /// Names of all sections present after merging.
    pub fn sections(&self) -> BTreeSet<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn section(&self, name: &str) -> Option<&ResolvedSection> {
        self.sections.get(name)
    }

    /// Option keys of a section, empty if the section does not exist.
    pub fn keys(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|s| s.options.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedSection)> {
        self.sections.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections named `prefix` + module pattern whose pattern matches `module`.
    ///
    /// Results are ordered from least to most specific pattern, so applying
    /// them in order lets the most specific section win.
    pub fn matching_sections(&self, prefix: &str, module: &str) -> Vec<&str> {
        let mut matches: Vec<(&str, ModulePattern)> = self
            .sections
            .keys()
            .filter_map(|name| {
                let pattern = ModulePattern::new(name.strip_prefix(prefix)?);
                pattern.matches(module).then_some((name.as_str(), pattern))
            })
            .collect();
        matches.sort_by_key(|(_, pattern)| pattern.specificity());
        matches.into_iter().map(|(name, _)| name).collect()
    }
}
