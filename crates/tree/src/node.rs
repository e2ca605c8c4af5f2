//! Tree nodes that wrap a [`NodeProvider`] and materialize their children on first use.

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use arbor_selector::{SelectorList, parse_selector};
use indexmap::IndexMap;

use crate::engine;
use crate::error::QueryError;
use crate::ids::NodeId;
use crate::node_set::NodeSet;
use crate::provider::NodeProvider;

/// A shared handle to one node of a document tree.
///
/// Cloning is cheap and yields another handle to the same node. Children are owned
/// by their parent; the parent link is weak, so dropping the root releases the tree.
pub struct TreeNode<P: NodeProvider> {
    inner: Rc<NodeInner<P>>,
}

struct NodeInner<P: NodeProvider> {
    id: NodeId,
    level: usize,
    name: Option<String>,
    provider: P,
    parent: Weak<NodeInner<P>>,
    /// Index among the parent's element children. `None` for the root and data nodes.
    position: Option<usize>,
    content: OnceCell<Content<P>>,
    attributes: OnceCell<IndexMap<String, String>>,
    data: OnceCell<String>,
}

/// The result of materializing a node: everything retained, and the elements among them.
struct Content<P: NodeProvider> {
    adjacents: Vec<TreeNode<P>>,
    children: Vec<TreeNode<P>>,
}

impl<P: NodeProvider> TreeNode<P> {
    /// Wraps the top node of a document. The root sits at level 0 and has no parent.
    pub fn root(provider: P) -> Self {
        Self::build(provider, 0, Weak::new(), None)
    }

    fn build(provider: P, level: usize, parent: Weak<NodeInner<P>>, position: Option<usize>) -> Self {
        let name = provider.name().map(|n| n.into_owned());
        Self {
            inner: Rc::new(NodeInner {
                id: NodeId::next(),
                level,
                name,
                provider,
                parent,
                position,
                content: OnceCell::new(),
                attributes: OnceCell::new(),
                data: OnceCell::new(),
            }),
        }
    }

    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// Depth in the tree; the root is 0.
    pub fn level(&self) -> usize {
        self.inner.level
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    pub fn is_element(&self) -> bool {
        self.inner.provider.is_element()
    }

    pub fn is_data(&self) -> bool {
        self.inner.provider.is_data()
    }

    pub fn parent(&self) -> Option<TreeNode<P>> {
        self.inner.parent.upgrade().map(|inner| TreeNode { inner })
    }

    /// Whether the children of this node have been built yet.
    pub fn is_materialized(&self) -> bool {
        self.inner.content.get().is_some()
    }

    fn content(&self) -> &Content<P> {
        self.inner.content.get_or_init(|| self.materialize())
    }

    fn materialize(&self) -> Content<P> {
        let mut adjacents = Vec::new();
        let mut children = Vec::new();
        for source in self.inner.provider.children().filter(|c| c.is_retained()) {
            let position = source.is_element().then_some(children.len());
            let node = Self::build(
                source,
                self.inner.level + 1,
                Rc::downgrade(&self.inner),
                position,
            );
            if position.is_some() {
                children.push(node.clone());
            }
            adjacents.push(node);
        }
        log::trace!(
            "materialized {}: {} adjacents, {} element children",
            self,
            adjacents.len(),
            children.len()
        );
        Content {
            adjacents,
            children,
        }
    }

    /// Element children in document order.
    pub(crate) fn element_children(&self) -> &[TreeNode<P>] {
        &self.content().children
    }

    pub fn children(&self) -> NodeSet<P> {
        self.element_children().iter().cloned().collect()
    }

    /// Every retained child, data nodes included.
    pub fn adjacents(&self) -> NodeSet<P> {
        self.content().adjacents.iter().cloned().collect()
    }

    /// Element siblings that come after this node, nearest first.
    pub(crate) fn following_siblings(&self) -> Vec<TreeNode<P>> {
        match (self.parent(), self.inner.position) {
            (Some(parent), Some(position)) => parent
                .element_children()
                .iter()
                .skip(position + 1)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn next_siblings(&self) -> NodeSet<P> {
        self.following_siblings().into_iter().collect()
    }

    /// Attributes in document order. Touching them materializes the node.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        self.content();
        self.inner.attributes.get_or_init(|| {
            self.inner
                .provider
                .attributes()
                .into_iter()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains_key(name)
    }

    /// The provider's raw value, untrimmed.
    pub fn value(&self) -> Option<String> {
        self.inner.provider.value().map(|v| v.into_owned())
    }

    /// Text content: the node's own text for data nodes, otherwise the
    /// concatenation of its adjacents' data in document order.
    pub fn data(&self) -> &str {
        self.inner.data.get_or_init(|| {
            if self.is_data() {
                self.inner
                    .provider
                    .text()
                    .map(|t| t.into_owned())
                    .unwrap_or_default()
            } else {
                self.content()
                    .adjacents
                    .iter()
                    .map(|n| n.data())
                    .collect()
            }
        })
    }

    /// Finds every node matching `selector` in this node and its subtree.
    pub fn find(&self, selector: &str) -> Result<NodeSet<P>, QueryError> {
        let selector = parse_selector(selector)?;
        self.select(&selector)
    }

    pub fn select(&self, selector: &SelectorList) -> Result<NodeSet<P>, QueryError> {
        engine::find(self, selector)
    }

    /// Like [`find`](Self::find), but the first step only tests direct children.
    pub fn children_matching(&self, selector: &str) -> Result<NodeSet<P>, QueryError> {
        let selector = parse_selector(selector)?;
        self.select_children(&selector)
    }

    pub fn select_children(&self, selector: &SelectorList) -> Result<NodeSet<P>, QueryError> {
        engine::children_matching(self, selector)
    }
}

impl<P: NodeProvider> Clone for TreeNode<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: NodeProvider> PartialEq for TreeNode<P> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<P: NodeProvider> Eq for TreeNode<P> {}

impl<P: NodeProvider> Hash for TreeNode<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl<P: NodeProvider> fmt::Debug for TreeNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("level", &self.inner.level)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

impl<P: NodeProvider> fmt::Display for TreeNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NODE {} AT LEVEL {} ({})",
            self.name().unwrap_or("#data"),
            self.inner.level,
            self.inner.id
        )
    }
}
