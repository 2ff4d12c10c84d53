//! Element access shared by the loaders.
//!
//! Wraps the handful of `roxmltree` lookups the loaders need so that every
//! failure carries the file name and the element it concerns.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

use crystals_core::TypedValue;

use crate::error::{LoadError, LoadResult};
use crate::loaders::LoaderOptions;

/// Per-document parsing context.
pub(crate) struct Source<'f> {
    pub file: &'f str,
    pub options: LoaderOptions,
}

impl<'f> Source<'f> {
    pub fn new(file: &'f str, options: LoaderOptions) -> Self {
        Self { file, options }
    }

    /// Parses `xml` and returns the document, verifying the root in strict mode.
    pub fn parse<'i>(&self, xml: &'i str, root: &'static str) -> LoadResult<Document<'i>> {
        let doc = Document::parse(xml).map_err(|source| LoadError::Parse {
            file: self.file.to_owned(),
            source,
        })?;

        let found = doc.root_element().tag_name().name();
        if self.options.strict && found != root {
            return Err(LoadError::UnexpectedRoot {
                file: self.file.to_owned(),
                expected: root,
                found: found.to_owned(),
            });
        }

        Ok(doc)
    }

    pub fn required_child<'a, 'i>(
        &self,
        node: Node<'a, 'i>,
        name: &'static str,
    ) -> LoadResult<Node<'a, 'i>> {
        child(node, name).ok_or_else(|| LoadError::MissingElement {
            file: self.file.to_owned(),
            parent: tag(node).to_owned(),
            element: name,
        })
    }

    pub fn required_attr(&self, node: Node<'_, '_>, name: &'static str) -> LoadResult<String> {
        node.attribute(name)
            .map(str::to_owned)
            .ok_or_else(|| LoadError::MissingAttribute {
                file: self.file.to_owned(),
                element: tag(node).to_owned(),
                attribute: name,
            })
    }

    /// Coerces an element's text using its `type` attribute.
    pub fn typed_leaf(&self, node: Node<'_, '_>) -> LoadResult<TypedValue> {
        TypedValue::coerce(&text(node), node.attribute("type")).map_err(
            |source| LoadError::Coercion {
                file: self.file.to_owned(),
                element: tag(node).to_owned(),
                source,
            },
        )
    }

    /// Typed leaf of a required child element.
    pub fn typed_child(&self, node: Node<'_, '_>, name: &'static str) -> LoadResult<TypedValue> {
        self.typed_leaf(self.required_child(node, name)?)
    }

    /// Handles a tag the loader has no variant for.
    ///
    /// Lenient mode skips it; strict mode fails.
    pub fn unknown_tag(&self, parent: Node<'_, '_>, node: Node<'_, '_>) -> LoadResult<()> {
        if self.options.strict {
            return Err(LoadError::UnknownTag {
                file: self.file.to_owned(),
                parent: tag(parent).to_owned(),
                tag: tag(node).to_owned(),
            });
        }

        tracing::debug!(
            "{}: skipping unknown tag <{}> inside <{}>",
            self.file,
            tag(node),
            tag(parent)
        );
        Ok(())
    }
}

/// Local tag name, ignoring any namespace.
pub(crate) fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// First direct child element named `name`.
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    elements(node).find(|n| n.has_tag_name(name))
}

/// Direct child elements in document order.
pub(crate) fn elements<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(Node::is_element)
}

/// Direct text children joined together, skipping comments and processing
/// instructions. Empty when there is no text.
pub(crate) fn text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Attributes as an owned map, leaving out the names in `skip`.
pub(crate) fn attributes(node: Node<'_, '_>, skip: &[&str]) -> BTreeMap<String, String> {
    node.attributes()
        .filter(|attr| !skip.contains(&attr.name()))
        .map(|attr| (attr.name().to_owned(), attr.value().to_owned()))
        .collect()
}
