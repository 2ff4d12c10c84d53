//! Loaders for author-written content descriptors.
//!
//! This crate reads the XML files that describe the game world and turns them
//! into the records defined in `crystals-core`:
//! - Maps (ground, player start, placed objects and actors)
//! - Dialogs (requirements, the main script and named subcontent blocks)
//! - Actors (display name, image set, dialog references)
//!
//! Loading only builds data. Requirements are not evaluated, scripts are not
//! run and references between files are not followed.

pub mod config;
pub mod error;
pub mod loaders;

pub use config::ContentConfig;
pub use error::{ErrorKind, LoadError, LoadResult};
#[cfg(feature = "config")]
pub use loaders::ConfigLoader;
pub use loaders::{
    ActorLoader, ContentFactory, DialogLoader, LoaderOptions, MapLoader, detect_kind,
};
