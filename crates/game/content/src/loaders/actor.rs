//! Actor descriptor loader.
//!
//! ```xml
//! <actor>
//!   <name>Miller</name>
//!   <imageset>miller.png</imageset>
//!   <dialogs>
//!     <dialog>miller_intro.xml</dialog>
//!     <dialog>miller_help.xml</dialog>
//!   </dialogs>
//! </actor>
//! ```

use std::path::Path;

use crystals_core::ActorDescriptor;

use crate::loaders::xml::{Source, elements, text};
use crate::loaders::{LoadResult, LoaderOptions, read_file};

/// Loader for actor descriptors.
pub struct ActorLoader;

impl ActorLoader {
    pub const ROOT: &'static str = "actor";

    /// Load an actor descriptor from a file.
    pub fn load(path: &Path, options: LoaderOptions) -> LoadResult<ActorDescriptor> {
        let xml = read_file(path)?;
        Self::parse_str(&path.to_string_lossy(), &xml, options)
    }

    /// Parse an actor descriptor from an in-memory document.
    ///
    /// Dialog entries are the text of each child of `dialogs`, whatever the
    /// child is called. They stay unresolved filenames.
    pub fn parse_str(
        filename: &str,
        xml: &str,
        options: LoaderOptions,
    ) -> LoadResult<ActorDescriptor> {
        let source = Source::new(filename, options);
        let doc = source.parse(xml, Self::ROOT)?;
        let root = doc.root_element();

        let name = text(source.required_child(root, "name")?);
        let imageset = text(source.required_child(root, "imageset")?);
        let dialogs: Vec<String> = elements(source.required_child(root, "dialogs")?)
            .map(text)
            .collect();

        tracing::debug!("Loaded actor {}: {} dialogs", filename, dialogs.len());

        Ok(ActorDescriptor {
            filename: filename.to_owned(),
            name,
            imageset,
            dialogs,
        })
    }
}
