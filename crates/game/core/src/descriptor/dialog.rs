//! Dialog descriptors: requirements plus branching content scripts.
//!
//! A dialog has one entry script (`content`) and any number of named
//! subcontent scripts that `goto` items and choices point at. Targets are kept
//! as opaque ids; resolving them is the engine's job.

use std::collections::BTreeMap;

/// Game-state preconditions gating a dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequirementSet {
    /// Event flags, from both `<event>` and `<events><event/></events>`, in document order.
    pub events: Vec<String>,
    pub quests: Vec<QuestRequirement>,
    /// Requirement kinds without a dedicated field, keyed by tag name.
    ///
    /// A repeated tag keeps only its last occurrence.
    pub extra: BTreeMap<String, ExtraRequirement>,
}

impl RequirementSet {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.quests.is_empty() && self.extra.is_empty()
    }
}

/// A quest that must be in `state` for the dialog to be available.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRequirement {
    pub quest: String,
    pub state: String,
}

impl QuestRequirement {
    pub fn new(quest: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            quest: quest.into(),
            state: state.into(),
        }
    }
}

/// An open-ended requirement: element text plus every attribute on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraRequirement {
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

impl ExtraRequirement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Integer attribute such as `amount` on `<item>` or `value` on `<attr>`.
    ///
    /// `None` when the attribute is missing or not an integer.
    pub fn int_attribute(&self, name: &str) -> Option<i64> {
        self.attribute(name)?.trim().parse().ok()
    }

    /// Integer text such as the body of `<level>3</level>`.
    pub fn int_text(&self) -> Option<i64> {
        self.text.trim().parse().ok()
    }
}

/// One instruction in a dialog script.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum ContentItem {
    /// An actor speaks a line.
    Say { speaker: String, text: String },
    /// Jump to a subcontent block.
    Goto { target: String },
    /// Change game state; `kind` is the `type` attribute (event, item, ...).
    ///
    /// `attributes` holds every other attribute of the element, such as
    /// `amount` for items, `value` for attrs and `state` for quests.
    SetFlag {
        kind: String,
        value: String,
        attributes: BTreeMap<String, String>,
    },
    /// Offer the player a choice. Option ids name the block to continue with.
    Choices {
        speaker: Option<String>,
        options: Vec<ChoiceOption>,
    },
}

impl ContentItem {
    /// Classifies a [`ContentItem::SetFlag`] kind. `None` for other items.
    pub fn flag_kind(&self) -> Option<FlagKind> {
        match self {
            Self::SetFlag { kind, .. } => kind.parse().ok(),
            _ => None,
        }
    }

    /// Raw attribute of a [`ContentItem::SetFlag`]. `None` for other items.
    pub fn flag_attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::SetFlag { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Integer attribute of a set item, such as `<set type="item" amount="3">`.
    pub fn int_flag_attribute(&self, name: &str) -> Option<i64> {
        self.flag_attribute(name)?.trim().parse().ok()
    }
}

/// An ordered dialog script.
pub type ContentScript = Vec<ContentItem>;

/// A selectable option inside a `choices` item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The `type` of a `set` item, as the engine understands it.
///
/// Unknown kinds are kept as [`FlagKind::Other`] rather than rejected; the
/// engine decides what to do with them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FlagKind {
    Event,
    Item,
    Attr,
    Quest,
    Exp,
    #[strum(default)]
    Other(String),
}

/// A dialog file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogDescriptor {
    pub filename: String,
    pub requirements: RequirementSet,
    /// Entry script.
    pub content: ContentScript,
    /// Named scripts addressable by `goto` and choice ids.
    pub subcontent: BTreeMap<String, ContentScript>,
}

impl DialogDescriptor {
    /// Looks up a subcontent block by id.
    pub fn script(&self, id: &str) -> Option<&ContentScript> {
        self.subcontent.get(id)
    }

    /// Every `goto` target and choice id. Main content comes first, in
    /// document order, then each subcontent block in id order.
    ///
    /// Ids are returned as written; nothing here checks that they resolve.
    pub fn jump_targets(&self) -> impl Iterator<Item = &str> + '_ {
        core::iter::once(&self.content)
            .chain(self.subcontent.values())
            .flat_map(|script| script.iter())
            .flat_map(item_targets)
    }
}

fn item_targets(item: &ContentItem) -> Box<dyn Iterator<Item = &str> + '_> {
    match item {
        ContentItem::Goto { target } => Box::new(core::iter::once(target.as_str())),
        ContentItem::Choices { options, .. } => Box::new(options.iter().map(|o| o.id.as_str())),
        ContentItem::Say { .. } | ContentItem::SetFlag { .. } => Box::new(core::iter::empty()),
    }
}
