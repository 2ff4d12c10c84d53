/// An actor file: display name, image set and the dialogs it can start.
///
/// Dialog entries are filenames relative to the content directory. They are
/// not loaded or checked here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorDescriptor {
    pub filename: String,
    pub name: String,
    pub imageset: String,
    pub dialogs: Vec<String>,
}
