//! Configuration management for srcmerge
//!
//! Settings are layered with figment (embedded defaults, user config, project
//! config, an explicit `--config` file, then `SRCMERGE_*` environment variables)
//! and extracted into a single [`MergeConfig`].

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod loader;
pub mod smart_load;

pub use loader::{DEFAULT_CONFIG, ENV_PREFIX};

/// Everything the aggregator needs to know about one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Directory tree to walk
    pub root_dir: PathBuf,

    /// Destination file, created or truncated at the start of the run
    pub output_file: PathBuf,

    /// Case-sensitive file name suffix that selects files (e.g. ".java")
    pub extension: String,

    /// Prefix of the Start/End marker lines
    pub comment_prefix: String,

    /// Visit entries in file name order within each directory
    pub sort_by_name: bool,

    /// Follow symbolic links while walking
    pub follow_links: bool,

    /// Glob patterns matched against directory names to prune from the walk
    pub exclude_dirs: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            output_file: PathBuf::from("merged_sources.txt"),
            extension: ".java".to_string(),
            comment_prefix: "//".to_string(),
            sort_by_name: true,
            follow_links: false,
            exclude_dirs: vec![],
        }
    }
}

impl MergeConfig {
    /// Convenience constructor for programmatic use
    pub fn new(root_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_file: output_file.into(),
            ..Self::default()
        }
    }

    /// Replace the extension filter
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            bail!("extension cannot be empty");
        }

        if self.output_file.as_os_str().is_empty() {
            bail!("output_file cannot be empty");
        }

        if self.root_dir.as_os_str().is_empty() {
            bail!("root_dir cannot be empty");
        }

        Ok(())
    }
}
