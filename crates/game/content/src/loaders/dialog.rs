//! Dialog descriptor loader.
//!
//! ```xml
//! <dialog>
//!   <requirements>
//!     <events><event>met_miller</event></events>
//!     <quest state="started">FloodedMill</quest>
//!     <level>3</level>
//!   </requirements>
//!   <content>
//!     <say who="miller">The wheel is stuck again.</say>
//!     <choices>
//!       <choice id="help">I'll take a look.</choice>
//!       <choice id="leave">Not my problem.</choice>
//!     </choices>
//!   </content>
//!   <subcontent id="help">
//!     <set type="event">agreed_to_help</set>
//!     <goto id="thanks"/>
//!   </subcontent>
//! </dialog>
//! ```
//!
//! Tag dispatch goes through closed enums. Requirement tags outside the enum
//! land in `RequirementSet::extra`; content tags outside it are skipped, or
//! rejected in strict mode.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use crystals_core::{
    ChoiceOption, ContentItem, ContentScript, DialogDescriptor, ExtraRequirement,
    QuestRequirement, RequirementSet,
};
use roxmltree::Node;

use crate::loaders::xml::{Source, attributes, child, elements, tag, text};
use crate::loaders::{LoadResult, LoaderOptions, read_file};

/// Requirement tags with dedicated handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
enum RequirementTag {
    /// Container of `event` elements.
    Events,
    Event,
    Quest,
}

/// Content instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
enum ContentTag {
    Say,
    Goto,
    Set,
    Choices,
}

/// Tag of a nested script block, collected separately from the item dispatch.
const SUBCONTENT: &str = "subcontent";

/// Loader for dialog descriptors.
pub struct DialogLoader;

impl DialogLoader {
    pub const ROOT: &'static str = "dialog";

    /// Load a dialog descriptor from a file.
    pub fn load(path: &Path, options: LoaderOptions) -> LoadResult<DialogDescriptor> {
        let xml = read_file(path)?;
        Self::parse_str(&path.to_string_lossy(), &xml, options)
    }

    /// Parse a dialog descriptor from an in-memory document.
    ///
    /// `requirements` is optional and defaults to an empty set. `content` is
    /// required. Every `subcontent` element in the document is collected by
    /// its `id`; a repeated id keeps the last block.
    pub fn parse_str(
        filename: &str,
        xml: &str,
        options: LoaderOptions,
    ) -> LoadResult<DialogDescriptor> {
        let source = Source::new(filename, options);
        let doc = source.parse(xml, Self::ROOT)?;
        let root = doc.root_element();

        let requirements = match child(root, "requirements") {
            Some(node) => parse_requirements(&source, node)?,
            None => RequirementSet::default(),
        };

        let content = parse_script(&source, source.required_child(root, "content")?)?;

        let mut subcontent = BTreeMap::new();
        for node in root.descendants().filter(|n| n.has_tag_name(SUBCONTENT)) {
            let id = source.required_attr(node, "id")?;
            let script = parse_script(&source, node)?;
            if subcontent.insert(id.clone(), script).is_some() {
                tracing::debug!("{}: subcontent '{}' redefined, keeping the later block", filename, id);
            }
        }

        tracing::debug!(
            "Loaded dialog {}: {} content items, {} subcontent blocks",
            filename,
            content.len(),
            subcontent.len()
        );

        Ok(DialogDescriptor {
            filename: filename.to_owned(),
            requirements,
            content,
            subcontent,
        })
    }
}

fn parse_requirements(source: &Source<'_>, node: Node<'_, '_>) -> LoadResult<RequirementSet> {
    let mut requirements = RequirementSet::default();

    for req in elements(node) {
        match RequirementTag::from_str(tag(req)) {
            Ok(RequirementTag::Events) => {
                requirements.events.extend(elements(req).map(text));
            }
            Ok(RequirementTag::Event) => requirements.events.push(text(req)),
            Ok(RequirementTag::Quest) => requirements.quests.push(QuestRequirement {
                quest: text(req),
                state: source.required_attr(req, "state")?,
            }),
            Err(_) => {
                requirements.extra.insert(
                    tag(req).to_owned(),
                    ExtraRequirement {
                        text: text(req),
                        attributes: attributes(req, &[]),
                    },
                );
            }
        }
    }

    Ok(requirements)
}

/// Converts the direct children of `content` or `subcontent` into a script.
fn parse_script(source: &Source<'_>, node: Node<'_, '_>) -> LoadResult<ContentScript> {
    let mut script = ContentScript::new();

    for item in elements(node) {
        let Ok(kind) = ContentTag::from_str(tag(item)) else {
            // Nested blocks are picked up by the document-wide subcontent pass.
            if !item.has_tag_name(SUBCONTENT) {
                source.unknown_tag(node, item)?;
            }
            continue;
        };

        tracing::trace!("{}: <{}> -> {:?}", source.file, tag(item), kind);

        script.push(match kind {
            ContentTag::Say => ContentItem::Say {
                speaker: source.required_attr(item, "who")?,
                text: text(item),
            },
            ContentTag::Goto => ContentItem::Goto {
                target: source.required_attr(item, "id")?,
            },
            ContentTag::Set => ContentItem::SetFlag {
                kind: source.required_attr(item, "type")?,
                value: text(item),
                attributes: attributes(item, &["type"]),
            },
            ContentTag::Choices => ContentItem::Choices {
                speaker: item.attribute("who").map(str::to_owned),
                options: parse_choices(source, item)?,
            },
        });
    }

    Ok(script)
}

fn parse_choices(source: &Source<'_>, node: Node<'_, '_>) -> LoadResult<Vec<ChoiceOption>> {
    let mut options = Vec::new();

    for choice in elements(node) {
        if !choice.has_tag_name("choice") {
            source.unknown_tag(node, choice)?;
            continue;
        }
        options.push(ChoiceOption {
            id: source.required_attr(choice, "id")?,
            label: text(choice),
        });
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crystals_core::FlagKind;

    fn parse(xml: &str) -> LoadResult<DialogDescriptor> {
        DialogLoader::parse_str("test.xml", xml, LoaderOptions::default())
    }

    fn say(speaker: &str, text: &str) -> ContentItem {
        ContentItem::Say {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    fn goto(target: &str) -> ContentItem {
        ContentItem::Goto {
            target: target.into(),
        }
    }

    #[test]
    fn test_say_then_goto() {
        let dialog =
            parse(r#"<dialog><content><say who="hero">Hi</say><goto id="next"/></content></dialog>"#)
                .unwrap();
        assert_eq!(dialog.content, vec![say("hero", "Hi"), goto("next")]);
        assert!(dialog.requirements.is_empty());
        assert!(dialog.subcontent.is_empty());
    }

    #[test]
    fn test_event_spellings_are_equivalent() {
        let singular = parse(
            r#"<dialog><requirements><event>A</event><event>B</event></requirements>
               <content/></dialog>"#,
        )
        .unwrap();
        let plural = parse(
            r#"<dialog><requirements><events><event>A</event><event>B</event></events></requirements>
               <content/></dialog>"#,
        )
        .unwrap();

        assert_eq!(singular.requirements.events, ["A", "B"]);
        assert_eq!(singular.requirements, plural.requirements);
    }

    #[test]
    fn test_mixed_event_spellings_keep_document_order() {
        let dialog = parse(
            r#"<dialog><requirements>
                 <event>A</event>
                 <events><event>B</event><event>C</event></events>
                 <event>D</event>
               </requirements><content/></dialog>"#,
        )
        .unwrap();
        assert_eq!(dialog.requirements.events, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_quest_and_extra_requirements() {
        let dialog = parse(
            r#"<dialog><requirements>
                 <quest state="done">MainQuest</quest>
                 <item amount="2">herb</item>
                 <level>1</level>
                 <level>3</level>
               </requirements><content/></dialog>"#,
        )
        .unwrap();
        let reqs = &dialog.requirements;

        assert_eq!(reqs.quests, vec![QuestRequirement::new("MainQuest", "done")]);

        let item = &reqs.extra["item"];
        assert_eq!(item.text, "herb");
        assert_eq!(item.attribute("amount"), Some("2"));

        // Repeated extension tags keep the last occurrence.
        assert_eq!(reqs.extra["level"].int_text(), Some(3));
        assert_eq!(reqs.extra.len(), 2);
    }

    #[test]
    fn test_quest_without_state() {
        let err = parse(r#"<dialog><requirements><quest>Q</quest></requirements><content/></dialog>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingAttribute { attribute: "state", .. }
        ));
    }

    #[test]
    fn test_set_and_choices() {
        let dialog = parse(
            r#"<dialog><content>
                 <set type="event">met_miller</set>
                 <choices who="miller">
                   <choice id="help">Sure</choice>
                   <choice id="leave">No</choice>
                 </choices>
               </content></dialog>"#,
        )
        .unwrap();

        assert_eq!(
            dialog.content,
            vec![
                ContentItem::SetFlag {
                    kind: "event".into(),
                    value: "met_miller".into(),
                    attributes: BTreeMap::new(),
                },
                ContentItem::Choices {
                    speaker: Some("miller".into()),
                    options: vec![
                        ChoiceOption::new("help", "Sure"),
                        ChoiceOption::new("leave", "No"),
                    ],
                },
            ]
        );
        assert_eq!(dialog.content[0].flag_kind(), Some(FlagKind::Event));
    }

    #[test]
    fn test_set_keeps_extra_attributes() {
        let dialog = parse(
            r#"<dialog><content>
                 <set type="item" amount="3">herb</set>
                 <set type="quest" state="done">Mill</set>
                 <set type="attr" value="-2">strength</set>
               </content></dialog>"#,
        )
        .unwrap();

        let [item, quest, attr] = &dialog.content[..] else {
            panic!("expected three items, got {:?}", dialog.content);
        };
        assert_eq!(item.flag_kind(), Some(FlagKind::Item));
        assert_eq!(item.int_flag_attribute("amount"), Some(3));
        assert_eq!(item.flag_attribute("type"), None);
        assert_eq!(quest.flag_attribute("state"), Some("done"));
        assert_eq!(attr.int_flag_attribute("value"), Some(-2));
        assert!(matches!(
            quest,
            ContentItem::SetFlag { value, attributes, .. } if value == "Mill" && attributes.len() == 1
        ));
    }

    #[test]
    fn test_comments_inside_text_are_ignored() {
        let dialog = parse(
            r#"<dialog><content>
                 <say who="a"><!-- draft -->Hello there</say>
                 <say who="b">Hi <!-- x -->you</say>
               </content></dialog>"#,
        )
        .unwrap();
        assert_eq!(
            dialog.content,
            vec![say("a", "Hello there"), say("b", "Hi you")]
        );
    }

    #[test]
    fn test_missing_content() {
        let err = parse("<dialog><requirements/></dialog>").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingElement { element: "content", .. }
        ));
    }

    #[test]
    fn test_subcontent_anywhere_and_last_wins() {
        let dialog = parse(
            r#"<dialog>
                 <content><goto id="branch1"/></content>
                 <subcontent id="branch1"><say who="a">first</say></subcontent>
                 <group>
                   <subcontent id="branch2"><say who="b">nested</say></subcontent>
                 </group>
                 <subcontent id="branch1"><say who="a">second</say></subcontent>
               </dialog>"#,
        )
        .unwrap();

        assert_eq!(dialog.subcontent.len(), 2);
        assert_eq!(dialog.subcontent["branch1"], vec![say("a", "second")]);
        assert_eq!(dialog.subcontent["branch2"], vec![say("b", "nested")]);
    }

    #[test]
    fn test_unknown_content_tag_lenient_and_strict() {
        let xml = r#"<dialog><content>
                       <say who="a">one</say>
                       <shake intensity="3"/>
                       <say who="a">two</say>
                     </content></dialog>"#;

        let dialog = parse(xml).unwrap();
        assert_eq!(dialog.content, vec![say("a", "one"), say("a", "two")]);

        let err = DialogLoader::parse_str("test.xml", xml, LoaderOptions::strict()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownTag { ref tag, ref parent, .. } if tag == "shake" && parent == "content"
        ));
    }

    #[test]
    fn test_nested_subcontent_is_not_an_unknown_tag() {
        let xml = r#"<dialog><content>
                       <say who="a">one</say>
                       <subcontent id="inner"><goto id="out"/></subcontent>
                     </content></dialog>"#;
        let dialog = DialogLoader::parse_str("test.xml", xml, LoaderOptions::strict()).unwrap();
        assert_eq!(dialog.content, vec![say("a", "one")]);
        assert_eq!(dialog.subcontent["inner"], vec![goto("out")]);
    }

    #[test]
    fn test_say_without_speaker() {
        let err = parse(r#"<dialog><content><say>Hi</say></content></dialog>"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingAttribute { attribute: "who", ref element, .. } if element == "say"
        ));
    }

    #[test]
    fn test_empty_text_is_empty_string() {
        let dialog = parse(r#"<dialog><content><say who="a"/></content></dialog>"#).unwrap();
        assert_eq!(dialog.content, vec![say("a", "")]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let xml = r#"<dialog><requirements><event>A</event></requirements>
                     <content><goto id="x"/></content>
                     <subcontent id="x"><say who="a">b</say></subcontent></dialog>"#;
        assert_eq!(parse(xml).unwrap(), parse(xml).unwrap());
    }
}
