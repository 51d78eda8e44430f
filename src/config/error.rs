//! Error types for loading and querying configuration

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error type for configuration loading and lookup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required document does not exist
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The document exists but could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The document is malformed
    #[error("{}:{line}: {kind}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        kind: ParseErrorKind,
    },

    /// Option is absent and no default was supplied
    #[error("no option '{key}' in section [{section}]")]
    MissingOption { section: String, key: String },

    #[error("no section [{0}]")]
    MissingSection(String),

    /// A stored value could not be read as the requested type
    #[error("invalid value for '{key}' in section [{section}]: {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// What exactly is wrong with a malformed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("option defined before any section header")]
    MissingSectionHeader,

    #[error("unterminated section header")]
    UnterminatedSectionHeader,

    #[error("empty section name")]
    EmptySectionName,

    #[error("section [{0}] defined more than once")]
    DuplicateSection(String),

    #[error("option '{key}' defined more than once in section [{section}]")]
    DuplicateOption { section: String, key: String },

    #[error("option line has no key")]
    EmptyKey,

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Returns the parse error kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            ConfigError::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
