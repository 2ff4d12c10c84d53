//! Utility functions for xtask commands

use anyhow::{Context, Result};
use clap::Args;
use crystals_content::{ConfigLoader, ContentConfig, ContentFactory};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "content.toml";

/// Options shared by commands that read the content directory.
///
/// Precedence: flags, then environment, then the config file, then defaults.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Content directory (overrides CRYSTALS_CONTENT_DIR and the config file)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Reject unknown tags and unexpected root elements
    #[arg(long)]
    pub strict: bool,

    /// TOML config file (defaults to ./content.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ContentArgs {
    pub fn resolve(&self) -> Result<ContentConfig> {
        let base = match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG).exists() => {
                ConfigLoader::load(Path::new(DEFAULT_CONFIG))
                    .with_context(|| format!("Failed to load config: {DEFAULT_CONFIG}"))?
            }
            None => ContentConfig::default(),
        };

        let mut config = base.with_env();
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if self.strict {
            config.strict = true;
        }

        tracing::debug!(
            "Content dir: {} (strict: {})",
            config.content_dir.display(),
            config.strict
        );
        Ok(config)
    }

    pub fn factory(&self) -> Result<ContentFactory> {
        let config = self.resolve()?;
        if !config.content_dir.is_dir() {
            anyhow::bail!(
                "Content directory not found: {}",
                config.content_dir.display()
            );
        }
        Ok(ContentFactory::from_config(&config))
    }
}

/// Every `.xml` file below `root`, as sorted `/`-separated relative paths.
pub fn find_xml_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(root: &Path, dir: &Path, files: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            walk(root, &path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "xml") {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(name);
        }
    }
    Ok(())
}
