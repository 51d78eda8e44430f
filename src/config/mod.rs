//! Layered configuration support.
//!
//! This module provides:
//! - Parsing INI-style documents (`setup.cfg`, `tox.ini`, `.pylintrc`)
//! - Config file discovery (search upward from a directory)
//! - Last-writer-wins merging of several documents
//! - Optional typing of options through a [`Schema`]
//! - Rendering the resolved view back to INI or TOML

mod document;
mod error;
mod file;
mod merge;
mod render;
mod resolved;
mod schema;
mod value;

pub use document::{ConfigDocument, Entry, Section};
pub use error::{ConfigError, ParseErrorKind, Result};
pub use file::{discover, find_file_upward, read_document, DEFAULT_CONFIG_NAMES};
pub use merge::{load, Loader, Source};
pub use render::{render_ini, render_option, render_toml};
pub use resolved::{Origin, ResolvedConfig, ResolvedOption, ResolvedSection};
pub use schema::Schema;
pub use value::{parse_bool, split_list, OptionKind, Value};
