// XML provider implementation using roxmltree
use std::borrow::Cow;

use arbor_tree::NodeProvider;
use roxmltree::Node;

/// Wrapper around roxmltree::Document that hands out providers for its element tree.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
    skip_whitespace: bool,
}

impl<'input> XmlDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        log::debug!("parsed XML document with {} nodes", doc.descendants().count());
        Ok(Self {
            doc,
            skip_whitespace: true,
        })
    }

    /// Keep whitespace-only text nodes as data children instead of dropping them.
    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.skip_whitespace = !keep;
        self
    }

    /// The document element. The XML declaration, prolog comments and PIs sit above it
    /// and are not part of the queried tree.
    pub fn root_node(&self) -> XmlNode<'_, 'input> {
        XmlNode {
            node: self.doc.root_element(),
            skip_whitespace: self.skip_whitespace,
        }
    }
}

/// One roxmltree node seen through [`NodeProvider`].
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input> {
    node: Node<'a, 'input>,
    skip_whitespace: bool,
}

impl<'a, 'input> XmlNode<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            node,
            skip_whitespace: true,
        }
    }

    pub fn inner(&self) -> Node<'a, 'input> {
        self.node
    }
}

impl<'a, 'input: 'a> NodeProvider for XmlNode<'a, 'input> {
    fn name(&self) -> Option<Cow<'_, str>> {
        self.node
            .is_element()
            .then(|| Cow::Borrowed(self.node.tag_name().name()))
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        self.node
            .attributes()
            .map(|attr| (Cow::Borrowed(attr.name()), Cow::Borrowed(attr.value())))
            .collect()
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        if self.node.is_element() {
            return None;
        }
        self.node.text().map(Cow::Borrowed)
    }

    fn is_element(&self) -> bool {
        self.node.is_element()
    }

    fn is_data(&self) -> bool {
        // roxmltree folds CDATA sections into text nodes.
        self.node.is_text()
    }

    fn is_comment(&self) -> bool {
        self.node.is_comment()
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        let skip_whitespace = self.skip_whitespace;
        Box::new(self.node.children().map(move |node| XmlNode {
            node,
            skip_whitespace,
        }))
    }

    fn is_retained(&self) -> bool {
        if self.node.is_element() {
            return true;
        }
        if !self.node.is_text() {
            return false;
        }
        match self.node.text() {
            Some(text) if self.skip_whitespace => !text.trim().is_empty(),
            Some(text) => !text.is_empty(),
            None => false,
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        self.value().map(|v| match v {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        })
    }
}
