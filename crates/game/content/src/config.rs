//! Content directory configuration.
use std::env;
use std::path::PathBuf;

use crate::loaders::LoaderOptions;

/// Where descriptor files live and how strictly they are parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContentConfig {
    pub content_dir: PathBuf,
    pub strict: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("data"),
            strict: false,
        }
    }
}

impl ContentConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CRYSTALS_CONTENT_DIR` - Content directory (default: `data`)
    /// - `CRYSTALS_STRICT` - Reject unknown tags and roots (default: false)
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overrides fields with any of the environment variables that are set.
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = env::var("CRYSTALS_CONTENT_DIR") {
            self.content_dir = PathBuf::from(dir);
        }

        if let Ok(value) = env::var("CRYSTALS_STRICT") {
            match parse_flag(&value) {
                Some(strict) => self.strict = strict,
                None => tracing::warn!(
                    "Ignoring CRYSTALS_STRICT={:?}: expected true/false, 1/0 or yes/no",
                    value
                ),
            }
        }

        self
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            strict: self.strict,
        }
    }
}

/// Boolean flag value. Setting the variable without a value means `true`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("data"));
        assert!(!config.strict);
        assert_eq!(config.loader_options(), LoaderOptions::lenient());
    }

    #[test]
    fn test_parse_flag() {
        for value in ["", "1", "true", "TRUE", "yes", "on"] {
            assert_eq!(parse_flag(value), Some(true), "{value:?}");
        }
        for value in ["0", "false", "No", "off", " no "] {
            assert_eq!(parse_flag(value), Some(false), "{value:?}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }
}
