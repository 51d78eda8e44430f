pub mod colors;
pub mod config;
mod output;
pub mod pattern;
pub mod rules;

pub use colors::{should_use_colors, Colors};
pub use config::{
    discover, find_file_upward, load, read_document, render_ini, render_toml, ConfigDocument,
    ConfigError, Loader, OptionKind, Origin, ParseErrorKind, ResolvedConfig, Schema, Source,
    Value, DEFAULT_CONFIG_NAMES,
};
pub use output::{render_query, OutputContext, OutputFormat, Query};
pub use pattern::{ModulePattern, SectionPattern};
pub use rules::{rules_for_section, select_rules};

use std::path::{Path, PathBuf};

/// Turn command-line file arguments into load sources.
///
/// With no explicit files, the default config names are discovered upward
/// from `start_dir`; discovered files always exist, so they are required.
pub fn collect_sources(files: &[PathBuf], allow_missing: bool, start_dir: &Path) -> Vec<Source> {
    if files.is_empty() {
        return discover(start_dir, &DEFAULT_CONFIG_NAMES)
            .into_iter()
            .map(Source::required)
            .collect();
    }

    files
        .iter()
        .map(|path| {
            if allow_missing {
                Source::optional(path)
            } else {
                Source::required(path)
            }
        })
        .collect()
}

/// Main entry point: load all sources in order and answer one query.
pub fn run(sources: Vec<Source>, query: &Query, ctx: &OutputContext) -> config::Result<String> {
    let config = sources
        .into_iter()
        .fold(Loader::new(), Loader::source)
        .load()?;
    render_query(&config, query, ctx)
}
