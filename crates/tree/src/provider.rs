//! Defines the read-only view a document format offers to the tree layer.
use std::borrow::Cow;
use std::fmt::Debug;

/// The contract between a parsed document and [`TreeNode`](crate::TreeNode).
///
/// A provider is a cheap handle onto one node of an already-parsed document (a
/// roxmltree node, a position inside a `serde_json::Value`, ...). The tree layer
/// never parses anything itself; it only walks providers, once per node.
pub trait NodeProvider: Debug + Clone {
    /// The element or key name. `None` for text and other pure-data nodes.
    fn name(&self) -> Option<Cow<'_, str>>;

    /// Attribute name/value pairs in document order.
    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)>;

    /// The raw scalar value of the node, if it has one.
    fn value(&self) -> Option<Cow<'_, str>>;

    /// True for nodes selectors may test.
    fn is_element(&self) -> bool;

    /// True for nodes that carry text content rather than structure.
    fn is_data(&self) -> bool;

    fn is_comment(&self) -> bool {
        false
    }

    /// Direct children in document order, including data nodes.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + '_>;

    /// Whether materialization keeps this node. Formats override this to drop
    /// whitespace-only text, comments and the like.
    fn is_retained(&self) -> bool {
        true
    }

    /// Text contributed to the parent's data. Defaults to the raw value.
    fn text(&self) -> Option<Cow<'_, str>> {
        self.value()
    }
}

// Test utilities - publicly available for integration testing in downstream crates
pub mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockKind {
        Element,
        Text,
        Comment,
    }

    #[derive(Debug, Clone)]
    struct MockNodeData {
        kind: MockKind,
        name: Option<String>,
        value: Option<String>,
        attributes: Vec<(String, String)>,
        children: Vec<usize>,
    }

    /// An arena of nodes; index 0 is the root once anything has been added.
    #[derive(Debug, Default)]
    pub struct MockTree {
        nodes: Vec<MockNodeData>,
    }

    /// A handle onto one node of a [`MockTree`].
    #[derive(Debug, Clone, Copy)]
    pub struct MockNode<'a> {
        pub id: usize,
        pub tree: &'a MockTree,
    }

    impl MockTree {
        pub fn new() -> Self {
            Self::default()
        }

        fn add(&mut self, parent: Option<usize>, data: MockNodeData) -> usize {
            let id = self.nodes.len();
            self.nodes.push(data);
            if let Some(parent) = parent {
                self.nodes[parent].children.push(id);
            }
            id
        }

        pub fn element(&mut self, parent: Option<usize>, name: &str, attributes: &[(&str, &str)]) -> usize {
            self.add(
                parent,
                MockNodeData {
                    kind: MockKind::Element,
                    name: Some(name.to_string()),
                    value: None,
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    children: Vec::new(),
                },
            )
        }

        pub fn text(&mut self, parent: usize, value: &str) -> usize {
            self.add(
                Some(parent),
                MockNodeData {
                    kind: MockKind::Text,
                    name: None,
                    value: Some(value.to_string()),
                    attributes: Vec::new(),
                    children: Vec::new(),
                },
            )
        }

        pub fn comment(&mut self, parent: usize, value: &str) -> usize {
            self.add(
                Some(parent),
                MockNodeData {
                    kind: MockKind::Comment,
                    name: None,
                    value: Some(value.to_string()),
                    attributes: Vec::new(),
                    children: Vec::new(),
                },
            )
        }

        pub fn root(&self) -> MockNode<'_> {
            self.node(0)
        }

        pub fn node(&self, id: usize) -> MockNode<'_> {
            MockNode { id, tree: self }
        }
    }

    impl<'a> MockNode<'a> {
        fn data(&self) -> &'a MockNodeData {
            &self.tree.nodes[self.id]
        }
    }

    impl NodeProvider for MockNode<'_> {
        fn name(&self) -> Option<Cow<'_, str>> {
            self.data().name.as_deref().map(Cow::Borrowed)
        }

        fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
            self.data()
                .attributes
                .iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str())))
                .collect()
        }

        fn value(&self) -> Option<Cow<'_, str>> {
            self.data().value.as_deref().map(Cow::Borrowed)
        }

        fn is_element(&self) -> bool {
            self.data().kind == MockKind::Element
        }

        fn is_data(&self) -> bool {
            self.data().kind == MockKind::Text
        }

        fn is_comment(&self) -> bool {
            self.data().kind == MockKind::Comment
        }

        fn children(&self) -> Box<dyn Iterator<Item = Self> + '_> {
            let tree = self.tree;
            Box::new(self.data().children.iter().map(move |&id| MockNode { id, tree }))
        }

        fn is_retained(&self) -> bool {
            match self.data().kind {
                MockKind::Element => true,
                MockKind::Text => self
                    .data()
                    .value
                    .as_deref()
                    .is_some_and(|v| !v.trim().is_empty()),
                MockKind::Comment => false,
            }
        }

        fn text(&self) -> Option<Cow<'_, str>> {
            self.value().map(|v| Cow::Owned(v.trim().to_string()))
        }
    }

    /// Builds the tree most engine tests run against:
    /// ```text
    /// <a>
    ///   <b><c>1</c><c>2</c></b>
    ///   <!-- note -->
    ///   <d><c>3</c></d>
    /// </a>
    /// ```
    /// with a whitespace-only text node between `b` and `d`.
    pub fn create_test_tree() -> MockTree {
        let mut tree = MockTree::new();
        let a = tree.element(None, "a", &[("lang", "en")]);
        let b = tree.element(Some(a), "b", &[("class", "first-group")]);
        let c1 = tree.element(Some(b), "c", &[("id", "c1")]);
        tree.text(c1, "1");
        let c2 = tree.element(Some(b), "c", &[("id", "c2")]);
        tree.text(c2, "2");
        tree.text(a, "\n  ");
        tree.comment(a, " note ");
        let d = tree.element(Some(a), "d", &[]);
        let c3 = tree.element(Some(d), "c", &[("id", "c3")]);
        tree.text(c3, "3");
        tree
    }

    #[cfg(test)]
    mod mock_tests {
        use super::*;

        #[test]
        fn mock_tree_shape() {
            let tree = create_test_tree();
            let root = tree.root();
            assert_eq!(root.name().as_deref(), Some("a"));
            let kids: Vec<_> = root.children().collect();
            assert_eq!(kids.len(), 4);
            assert!(kids[0].is_element());
            assert!(!kids[1].is_retained());
            assert!(kids[2].is_comment());
            assert!(!kids[2].is_retained());
            assert_eq!(kids[3].name().as_deref(), Some("d"));
        }

        #[test]
        fn text_is_trimmed_value_is_raw() {
            let mut tree = MockTree::new();
            let p = tree.element(None, "p", &[]);
            let t = tree.text(p, "  hi ");
            let node = tree.node(t);
            assert_eq!(node.value().as_deref(), Some("  hi "));
            assert_eq!(node.text().as_deref(), Some("hi"));
        }
    }
}
