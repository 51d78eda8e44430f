//! Config file discovery and reading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::document::ConfigDocument;
use super::error::{ConfigError, Result};

/// File names looked up by [`discover`] when no explicit files are given,
/// in merge order.
pub const DEFAULT_CONFIG_NAMES: [&str; 3] = ["setup.cfg", "tox.ini", ".pylintrc"];

/// Search upward from `start_dir` for a file with the given name.
///
/// If `stop_at_git_root` is true, stops searching when a `.git` directory is found.
/// Returns `None` if the file is not found.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let file_path = current.join(filename);
        if file_path.is_file() {
            return Some(file_path);
        }

        if stop_at_git_root && current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find the nearest file for each name, searching upward from `start_dir`
/// and stopping at the git repository root.
///
/// The result follows the order of `names`, which is the merge order.
pub fn discover(start_dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .filter_map(|name| {
            let found = find_file_upward(start_dir, name, true);
            match &found {
                Some(path) => debug!(path = %path.display(), "discovered config file"),
                None => debug!(name = %name, "no config file found"),
            }
            found
        })
        .collect()
}

/// Read and parse one document.
///
/// A missing file is an error when `required`, and `Ok(None)` otherwise.
pub fn read_document(path: &Path, required: bool) -> Result<Option<ConfigDocument>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if required {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "optional config file missing, skipped");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ConfigDocument::parse(path, &content).map(Some)
}
