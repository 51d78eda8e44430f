//! INI-style document parsing
//!
//! A document is a sequence of `[section]` headers, each followed by
//! `key = value` (or `key: value`) options. Values may continue on
//! following lines indented deeper than the key line.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ParseErrorKind, Result};

/// One option as it appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Case-folded key
    pub key: String,
    /// Raw value text, continuation lines joined with `\n`
    pub raw: String,
    /// 1-based line number of the key line
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub line: usize,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&Entry> {
        let key = key.to_lowercase();
        self.entries.iter().find(|e| e.key == key)
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub sections: Vec<Section>,
}

/// Option currently accepting continuation lines.
struct OpenOption {
    indent: usize,
}

impl ConfigDocument {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Parse document text. `path` is used only for error reporting and origins.
    pub fn parse(path: impl AsRef<Path>, content: &str) -> Result<ConfigDocument> {
        let path = path.as_ref().to_path_buf();
        let err = |line: usize, kind: ParseErrorKind| ConfigError::Parse {
            path: path.clone(),
            line,
            kind,
        };

        let mut sections: Vec<Section> = Vec::new();
        let mut seen_sections: HashSet<String> = HashSet::new();
        let mut open: Option<OpenOption> = None;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            // Blank lines do not terminate a multi-line value
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = raw_line.len() - raw_line.trim_start().len();

            if let Some(current) = &open {
                if indent > current.indent {
                    if let Some(entry) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                        if !entry.raw.is_empty() {
                            entry.raw.push('\n');
                        }
                        entry.raw.push_str(trimmed);
                    }
                    continue;
                }
            }
            open = None;

            if trimmed.starts_with('[') {
                if !trimmed.ends_with(']') {
                    return Err(err(line_no, ParseErrorKind::UnterminatedSectionHeader));
                }
                let name = trimmed[1..trimmed.len() - 1].trim();
                if name.is_empty() {
                    return Err(err(line_no, ParseErrorKind::EmptySectionName));
                }
                if !seen_sections.insert(name.to_string()) {
                    return Err(err(
                        line_no,
                        ParseErrorKind::DuplicateSection(name.to_string()),
                    ));
                }
                sections.push(Section {
                    name: name.to_string(),
                    line: line_no,
                    entries: Vec::new(),
                });
                continue;
            }

            let (key, value) = match trimmed.find(['=', ':']) {
                Some(pos) => (trimmed[..pos].trim(), trimmed[pos + 1..].trim()),
                None => (trimmed, ""),
            };
            if key.is_empty() {
                return Err(err(line_no, ParseErrorKind::EmptyKey));
            }
            let key = key.to_lowercase();

            let section = sections
                .last_mut()
                .ok_or_else(|| err(line_no, ParseErrorKind::MissingSectionHeader))?;
            if section.entries.iter().any(|e| e.key == key) {
                return Err(err(
                    line_no,
                    ParseErrorKind::DuplicateOption {
                        section: section.name.clone(),
                        key,
                    },
                ));
            }

            section.entries.push(Entry {
                key,
                raw: value.to_string(),
                line: line_no,
            });
            open = Some(OpenOption { indent });
        }

        Ok(ConfigDocument { path, sections })
    }
}
