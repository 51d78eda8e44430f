//! Loading and merging of configuration sources
//!
//! Priority: later sources > earlier sources. Each (section, key) is
//! replaced whole; values are never combined.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::Result;
use super::file::read_document;
use super::resolved::ResolvedConfig;
use super::schema::Schema;

/// One document location to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    /// A missing required source fails the load; a missing optional one is skipped
    pub required: bool,
}

impl Source {
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }
}

/// Builder for a layered load.
///
/// Sources are merged in the order they were added. A malformed document
/// aborts the whole load; nothing from earlier sources is returned.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    sources: Vec<Source>,
    schema: Schema,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn required(self, path: impl Into<PathBuf>) -> Self {
        self.source(Source::required(path))
    }

    pub fn optional(self, path: impl Into<PathBuf>) -> Self {
        self.source(Source::optional(path))
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Read every source and merge them into a fresh [`ResolvedConfig`].
    pub fn load(&self) -> Result<ResolvedConfig> {
        let mut documents = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            if let Some(document) = read_document(&source.path, source.required)? {
                debug!(
                    path = %source.path.display(),
                    sections = document.sections.len(),
                    "loaded config file"
                );
                documents.push(document);
            }
        }

        let loaded = documents.len();
        let config = ResolvedConfig::from_documents(documents, &self.schema)?;
        info!(
            files = loaded,
            sections = config.sections().len(),
            "configuration resolved"
        );
        Ok(config)
    }
}

/// Load `paths` in order, all required, without a schema.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<ResolvedConfig> {
    paths
        .iter()
        .fold(Loader::new(), |loader, path| loader.required(path.as_ref()))
        .load()
}
