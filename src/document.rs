// src/document.rs
use std::borrow::Cow;

use arbor_sources::{JsonDocument, JsonNode, XmlDocument, XmlNode};
use arbor_tree::{NodeProvider, NodeSet, TreeNode};
use serde_json::Value;

use crate::config::SourceFormat;
use crate::error::ArborError;

/// A tree node of either supported format.
pub type Node<'a, 't> = TreeNode<DocumentNode<'a, 't>>;

/// A query result over either supported format.
pub type Nodes<'a, 't> = NodeSet<DocumentNode<'a, 't>>;

/// Document text with its format settled, ready to be parsed.
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
    format: SourceFormat,
    skip_whitespace: bool,
}

impl Source {
    pub(crate) fn new(text: String, format: SourceFormat, skip_whitespace: bool) -> Self {
        Self {
            text,
            format,
            skip_whitespace,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Parses the text. The returned document borrows from this source.
    pub fn parse(&self) -> Result<Document<'_>, ArborError> {
        let format = self.format.resolve(None, &self.text, "<source>")?;
        let parsed = match format {
            SourceFormat::Json => Parsed::Json(JsonDocument::parse(&self.text)?),
            _ => Parsed::Xml(XmlDocument::parse(&self.text)?.keep_whitespace(!self.skip_whitespace)),
        };
        Ok(Document { parsed })
    }
}

enum Parsed<'t> {
    Xml(XmlDocument<'t>),
    Json(JsonDocument),
}

/// A parsed document, the entry point for queries.
///
/// Every call to [`root`](Document::root) builds a fresh, unmaterialized tree with new
/// node identities. Keep the root around to reuse what has been materialized.
pub struct Document<'t> {
    parsed: Parsed<'t>,
}

impl<'t> Document<'t> {
    pub fn from_xml(text: &'t str) -> Result<Self, ArborError> {
        Ok(Self {
            parsed: Parsed::Xml(XmlDocument::parse(text)?),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ArborError> {
        Ok(Self {
            parsed: Parsed::Json(JsonDocument::parse(text)?),
        })
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            parsed: Parsed::Json(JsonDocument::from_value(value)),
        }
    }

    pub fn format(&self) -> SourceFormat {
        match self.parsed {
            Parsed::Xml(_) => SourceFormat::Xml,
            Parsed::Json(_) => SourceFormat::Json,
        }
    }

    /// The document element for XML, the top-level value for JSON. Level 0.
    pub fn root(&self) -> Node<'_, 't> {
        let provider = match &self.parsed {
            Parsed::Xml(doc) => DocumentNode::Xml(doc.root_node()),
            Parsed::Json(doc) => DocumentNode::Json(doc.root_node()),
        };
        TreeNode::root(provider)
    }

    /// Runs `selector` from a fresh root. The ancestors of the returned nodes are not kept
    /// alive, so `parent()` and sibling lookups on them come back empty; query from a
    /// held [`root`](Document::root) when navigation matters.
    pub fn find(&self, selector: &str) -> Result<Nodes<'_, 't>, ArborError> {
        Ok(self.root().find(selector)?)
    }

    pub fn children(&self) -> Nodes<'_, 't> {
        self.root().children()
    }

    pub fn children_matching(&self, selector: &str) -> Result<Nodes<'_, 't>, ArborError> {
        Ok(self.root().children_matching(selector)?)
    }
}

/// Dispatches [`NodeProvider`] calls to the format-specific provider.
#[derive(Debug, Clone, Copy)]
pub enum DocumentNode<'a, 't> {
    Xml(XmlNode<'a, 't>),
    Json(JsonNode<'a>),
}

impl NodeProvider for DocumentNode<'_, '_> {
    fn name(&self) -> Option<Cow<'_, str>> {
        match self {
            DocumentNode::Xml(n) => n.name(),
            DocumentNode::Json(n) => n.name(),
        }
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        match self {
            DocumentNode::Xml(n) => n.attributes(),
            DocumentNode::Json(n) => n.attributes(),
        }
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        match self {
            DocumentNode::Xml(n) => n.value(),
            DocumentNode::Json(n) => n.value(),
        }
    }

    fn is_element(&self) -> bool {
        match self {
            DocumentNode::Xml(n) => n.is_element(),
            DocumentNode::Json(n) => n.is_element(),
        }
    }

    fn is_data(&self) -> bool {
        match self {
            DocumentNode::Xml(n) => n.is_data(),
            DocumentNode::Json(n) => n.is_data(),
        }
    }

    fn is_comment(&self) -> bool {
        match self {
            DocumentNode::Xml(n) => n.is_comment(),
            DocumentNode::Json(n) => n.is_comment(),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        match self {
            DocumentNode::Xml(n) => Box::new(n.children().map(DocumentNode::Xml)),
            DocumentNode::Json(n) => Box::new(n.children().map(DocumentNode::Json)),
        }
    }

    fn is_retained(&self) -> bool {
        match self {
            DocumentNode::Xml(n) => n.is_retained(),
            DocumentNode::Json(n) => n.is_retained(),
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            DocumentNode::Xml(n) => n.text(),
            DocumentNode::Json(n) => n.text(),
        }
    }
}
