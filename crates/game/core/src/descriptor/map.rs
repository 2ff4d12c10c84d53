use crate::value::TypedValue;

/// A map file: its ground layer, where the player starts and what is placed on it.
///
/// `objects` and `actors` keep document order; renderers derive draw order
/// from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDescriptor {
    /// File the descriptor was read from, relative to the content directory.
    pub filename: String,
    pub name: TypedValue,
    /// Reference to the ground image or tileset.
    pub ground: TypedValue,
    pub start_position: TypedValue,
    pub objects: Vec<Placement>,
    pub actors: Vec<Placement>,
}

impl MapDescriptor {
    /// Player start as an `(x, y)` point, when authored as a numeric pair.
    pub fn start_point(&self) -> Option<(f64, f64)> {
        self.start_position.as_point()
    }
}

/// An object or actor file placed at a position on a map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub filename: TypedValue,
    pub position: TypedValue,
}

impl Placement {
    pub fn new(filename: impl Into<TypedValue>, position: impl Into<TypedValue>) -> Self {
        Self {
            filename: filename.into(),
            position: position.into(),
        }
    }
}
