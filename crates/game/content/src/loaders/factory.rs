//! Content factory for loading descriptors from a content directory.

use std::path::{Component, Path, PathBuf};

use crystals_core::{ActorDescriptor, Descriptor, DescriptorKind, DialogDescriptor, MapDescriptor};

use crate::config::ContentConfig;
use crate::error::LoadError;
use crate::loaders::{
    ActorLoader, DialogLoader, LoadResult, LoaderOptions, MapLoader, read_file,
};

/// Content factory that loads descriptors relative to a content directory.
///
/// Filenames are the references authors write inside descriptor files, for
/// example the `filename` of a map placement or an actor's dialog list.
///
/// # Directory Structure
///
/// ```text
/// content_dir/
/// ├── maps/
/// │   └── mill.xml
/// ├── actors/
/// │   └── miller.xml
/// └── dialogs/
///     └── miller_intro.xml
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    content_dir: PathBuf,
    options: LoaderOptions,
}

impl ContentFactory {
    /// Creates a lenient factory rooted at `content_dir`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(content_dir, LoaderOptions::default())
    }

    pub fn with_options(content_dir: impl Into<PathBuf>, options: LoaderOptions) -> Self {
        Self {
            content_dir: content_dir.into(),
            options,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::with_options(config.content_dir.clone(), config.loader_options())
    }

    /// Resolves a relative filename against the content directory.
    ///
    /// Absolute paths, drive prefixes and `..` components that climb above the
    /// content directory are rejected. `..` that stays inside is allowed.
    pub fn resolve(&self, filename: &str) -> LoadResult<PathBuf> {
        let escapes = || LoadError::PathEscapesBase {
            filename: filename.to_owned(),
        };

        let mut depth = 0usize;
        for component in Path::new(filename).components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(escapes)?,
                Component::RootDir | Component::Prefix(_) => return Err(escapes()),
            }
        }
        if depth == 0 {
            return Err(escapes());
        }

        Ok(self.content_dir.join(filename))
    }

    /// Load a map descriptor.
    pub fn load_map(&self, filename: &str) -> LoadResult<MapDescriptor> {
        let xml = self.read(filename)?;
        MapLoader::parse_str(filename, &xml, self.options)
    }

    /// Load a dialog descriptor.
    pub fn load_dialog(&self, filename: &str) -> LoadResult<DialogDescriptor> {
        let xml = self.read(filename)?;
        DialogLoader::parse_str(filename, &xml, self.options)
    }

    /// Load an actor descriptor. Its dialog references are not followed.
    pub fn load_actor(&self, filename: &str) -> LoadResult<ActorDescriptor> {
        let xml = self.read(filename)?;
        ActorLoader::parse_str(filename, &xml, self.options)
    }

    /// Load a descriptor of whatever kind the document's root element names.
    ///
    /// Returns `Ok(None)` for well-formed documents whose root is not `map`,
    /// `dialog` or `actor`.
    pub fn load_any(&self, filename: &str) -> LoadResult<Option<Descriptor>> {
        let xml = self.read(filename)?;
        let Some(kind) = detect_kind(filename, &xml)? else {
            return Ok(None);
        };

        let descriptor: Descriptor = match kind {
            DescriptorKind::Map => MapLoader::parse_str(filename, &xml, self.options)?.into(),
            DescriptorKind::Dialog => DialogLoader::parse_str(filename, &xml, self.options)?.into(),
            DescriptorKind::Actor => ActorLoader::parse_str(filename, &xml, self.options)?.into(),
        };
        Ok(Some(descriptor))
    }

    fn read(&self, filename: &str) -> LoadResult<String> {
        let path = self.resolve(filename)?;
        tracing::trace!("Reading {}", path.display());
        read_file(&path)
    }

    /// Returns the content directory path.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn options(&self) -> LoaderOptions {
        self.options
    }
}

/// Descriptor kind named by the document's root element, if any.
pub fn detect_kind(filename: &str, xml: &str) -> LoadResult<Option<DescriptorKind>> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| LoadError::Parse {
        file: filename.to_owned(),
        source,
    })?;
    Ok(doc.root_element().tag_name().name().parse().ok())
}
