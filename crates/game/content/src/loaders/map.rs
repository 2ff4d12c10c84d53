//! Map descriptor loader.
//!
//! ```xml
//! <map>
//!   <name>Old Mill</name>
//!   <ground>mill_ground.png</ground>
//!   <player_start_position type="tuple">(4, 12)</player_start_position>
//!   <object>
//!     <filename>well.xml</filename>
//!     <position type="tuple">(2, 3)</position>
//!   </object>
//!   <actor>
//!     <filename>miller.xml</filename>
//!     <position type="tuple">(6, 7)</position>
//!   </actor>
//! </map>
//! ```

use std::path::Path;

use crystals_core::{MapDescriptor, Placement};
use roxmltree::Node;

use crate::loaders::xml::Source;
use crate::loaders::{LoadResult, LoaderOptions, read_file};

/// Loader for map descriptors.
pub struct MapLoader;

impl MapLoader {
    pub const ROOT: &'static str = "map";

    /// Load a map descriptor from a file.
    ///
    /// The descriptor's `filename` is the path as given.
    pub fn load(path: &Path, options: LoaderOptions) -> LoadResult<MapDescriptor> {
        let xml = read_file(path)?;
        Self::parse_str(&path.to_string_lossy(), &xml, options)
    }

    /// Parse a map descriptor from an in-memory document.
    ///
    /// # Errors
    ///
    /// - `Parse` if `xml` is not well-formed
    /// - `MissingElement` if `name`, `ground`, `player_start_position`, or the
    ///   `filename`/`position` of a placement is absent
    /// - `Coercion` if a typed leaf does not match its `type`
    pub fn parse_str(filename: &str, xml: &str, options: LoaderOptions) -> LoadResult<MapDescriptor> {
        let source = Source::new(filename, options);
        let doc = source.parse(xml, Self::ROOT)?;
        let root = doc.root_element();

        let name = source.typed_child(root, "name")?;
        let ground = source.typed_child(root, "ground")?;
        let start_position = source.typed_child(root, "player_start_position")?;

        // Placements may sit at any depth; each list keeps document order.
        let objects = placements(&source, root, "object")?;
        let actors = placements(&source, root, "actor")?;

        tracing::debug!(
            "Loaded map {}: {} objects, {} actors",
            filename,
            objects.len(),
            actors.len()
        );

        Ok(MapDescriptor {
            filename: filename.to_owned(),
            name,
            ground,
            start_position,
            objects,
            actors,
        })
    }
}

fn placements(source: &Source<'_>, root: Node<'_, '_>, kind: &str) -> LoadResult<Vec<Placement>> {
    root.descendants()
        .filter(|n| n.has_tag_name(kind))
        .map(|node| {
            Ok(Placement {
                filename: source.typed_child(node, "filename")?,
                position: source.typed_child(node, "position")?,
            })
        })
        .collect()
}
