//! Content data model shared by the loaders, the engine and offline tools.
//!
//! `crystals-core` defines the descriptor records produced from map, dialog
//! and actor files, and the closed set of typed leaf values those files may
//! declare. It performs no I/O; see `crystals-content` for the loaders.
pub mod descriptor;
pub mod error;
pub mod value;

pub use descriptor::{
    ActorDescriptor, ChoiceOption, ContentItem, ContentScript, Descriptor, DescriptorKind,
    DialogDescriptor, ExtraRequirement, FlagKind, MapDescriptor, Placement, QuestRequirement,
    RequirementSet,
};
pub use error::CoercionError;
pub use value::{TypeTag, TypedValue};
