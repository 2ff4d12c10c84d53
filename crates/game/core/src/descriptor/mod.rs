//! Descriptor records produced by the content loaders.
//!
//! One descriptor corresponds to one source file. Descriptors are built in a
//! single pass and handed to the caller by value; nothing in this workspace
//! mutates them afterwards.

mod actor;
mod dialog;
mod map;

pub use actor::ActorDescriptor;
pub use dialog::{
    ChoiceOption, ContentItem, ContentScript, DialogDescriptor, ExtraRequirement, FlagKind,
    QuestRequirement, RequirementSet,
};
pub use map::{MapDescriptor, Placement};

/// The kinds of descriptor file, named after their root element.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DescriptorKind {
    Map,
    Dialog,
    Actor,
}

impl DescriptorKind {
    /// Root element name of files of this kind.
    pub fn root(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Dialog => "dialog",
            Self::Actor => "actor",
        }
    }
}

/// Any loaded descriptor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Descriptor {
    Map(MapDescriptor),
    Dialog(DialogDescriptor),
    Actor(ActorDescriptor),
}

impl Descriptor {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Map(_) => DescriptorKind::Map,
            Self::Dialog(_) => DescriptorKind::Dialog,
            Self::Actor(_) => DescriptorKind::Actor,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Map(map) => &map.filename,
            Self::Dialog(dialog) => &dialog.filename,
            Self::Actor(actor) => &actor.filename,
        }
    }
}

impl From<MapDescriptor> for Descriptor {
    fn from(value: MapDescriptor) -> Self {
        Self::Map(value)
    }
}

impl From<DialogDescriptor> for Descriptor {
    fn from(value: DialogDescriptor) -> Self {
        Self::Dialog(value)
    }
}

impl From<ActorDescriptor> for Descriptor {
    fn from(value: ActorDescriptor) -> Self {
        Self::Actor(value)
    }
}
