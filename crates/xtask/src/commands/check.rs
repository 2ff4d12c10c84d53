//! Validate every descriptor in the content directory
//!
//! Walks the content directory, loads each `.xml` file with the loader its
//! root element names and prints one line per file.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils::{ContentArgs, find_xml_files};

/// Load every descriptor under the content directory and report failures
#[derive(Parser)]
pub struct Check {
    #[command(flatten)]
    content: ContentArgs,

    /// Only print failures
    #[arg(short, long)]
    quiet: bool,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let factory = self.content.factory()?;
        let files = find_xml_files(factory.content_dir())?;

        let mut loaded = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for file in &files {
            match factory.load_any(file) {
                Ok(Some(descriptor)) => {
                    loaded += 1;
                    if !self.quiet {
                        println!("{} {} ({})", style("OK  ").green().bold(), file, descriptor.kind());
                    }
                }
                Ok(None) => {
                    skipped += 1;
                    if !self.quiet {
                        println!("{} {} (not a descriptor)", style("SKIP").dim(), file);
                    }
                }
                Err(err) => {
                    failed += 1;
                    println!("{} {}", style("FAIL").red().bold(), err);
                }
            }
        }

        println!();
        println!(
            "{} {} loaded, {} skipped, {} failed",
            style("Summary:").bold().cyan(),
            loaded,
            skipped,
            failed
        );

        if failed > 0 {
            anyhow::bail!("{failed} of {} descriptor files failed to load", files.len());
        }
        Ok(())
    }
}
