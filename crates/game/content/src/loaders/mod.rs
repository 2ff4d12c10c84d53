//! Content loaders for reading descriptor files.
//!
//! Each loader turns one XML document into one descriptor. Loaders are
//! stateless: every call reads its input fully, parses it and returns a value.

pub mod actor;
#[cfg(feature = "config")]
pub mod config;
pub mod dialog;
pub mod factory;
pub mod map;
mod xml;

pub use actor::ActorLoader;
#[cfg(feature = "config")]
pub use config::ConfigLoader;
pub use dialog::DialogLoader;
pub use factory::{ContentFactory, detect_kind};
pub use map::MapLoader;

use std::path::Path;

pub use crate::error::LoadResult;
use crate::error::LoadError;

/// Options shared by every loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Reject unknown content tags and unexpected document roots instead of
    /// skipping them.
    pub strict: bool,
}

impl LoaderOptions {
    /// Skip unknown tags and accept any root element.
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    /// Fail on unknown tags and on a root element of the wrong kind.
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
