//! Content configuration loader.

use std::path::Path;

use crate::config::ContentConfig;
use crate::error::LoadError;
use crate::loaders::{LoadResult, read_file};

/// Loader for content configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// ```toml
    /// content_dir = "data"
    /// strict = true
    /// ```
    ///
    /// Missing keys take their [`ContentConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        toml::from_str(&content).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
