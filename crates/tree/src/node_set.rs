//! Ordered, identity-deduplicated collections of tree nodes.

use std::collections::HashSet;
use std::fmt;

use arbor_selector::parse_selector;

use crate::error::QueryError;
use crate::ids::NodeId;
use crate::node::TreeNode;
use crate::provider::NodeProvider;

/// Query results: nodes in first-seen order, each identity at most once.
pub struct NodeSet<P: NodeProvider> {
    nodes: Vec<TreeNode<P>>,
    seen: HashSet<NodeId>,
}

impl<P: NodeProvider> NodeSet<P> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Appends `node` unless a node with the same identity is already present.
    /// Returns whether it was added.
    pub fn push(&mut self, node: TreeNode<P>) -> bool {
        if self.seen.insert(node.id()) {
            self.nodes.push(node);
            true
        } else {
            false
        }
    }

    /// Unions `other` into this set, keeping this set's order first.
    pub fn extend(&mut self, other: &NodeSet<P>) {
        for node in &other.nodes {
            self.push(node.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeNode<P>> {
        self.nodes.iter()
    }

    pub fn first(&self) -> Option<&TreeNode<P>> {
        self.nodes.first()
    }

    pub fn get(&self, index: usize) -> Option<&TreeNode<P>> {
        self.nodes.get(index)
    }

    pub fn contains(&self, node: &TreeNode<P>) -> bool {
        self.seen.contains(&node.id())
    }

    /// Concatenated data of every member, or `None` when the set is empty.
    pub fn data(&self) -> Option<String> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes.iter().map(|n| n.data()).collect())
    }

    /// Element children of every member.
    pub fn children(&self) -> NodeSet<P> {
        let mut out = NodeSet::new();
        for node in &self.nodes {
            out.extend(&node.children());
        }
        out
    }

    /// Runs `selector` from every member and unions the results.
    pub fn find(&self, selector: &str) -> Result<NodeSet<P>, QueryError> {
        let selector = parse_selector(selector)?;
        let mut out = NodeSet::new();
        for node in &self.nodes {
            out.extend(&node.select(&selector)?);
        }
        Ok(out)
    }

    pub fn children_matching(&self, selector: &str) -> Result<NodeSet<P>, QueryError> {
        let selector = parse_selector(selector)?;
        let mut out = NodeSet::new();
        for node in &self.nodes {
            out.extend(&node.select_children(&selector)?);
        }
        Ok(out)
    }

    pub fn into_vec(self) -> Vec<TreeNode<P>> {
        self.nodes
    }
}

impl<P: NodeProvider> Default for NodeSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: NodeProvider> Clone for NodeSet<P> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            seen: self.seen.clone(),
        }
    }
}

/// Two sets are equal when they hold the same identities in the same order.
impl<P: NodeProvider> PartialEq for NodeSet<P> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<P: NodeProvider> Eq for NodeSet<P> {}

impl<P: NodeProvider> fmt::Debug for NodeSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.nodes.iter()).finish()
    }
}

impl<P: NodeProvider> FromIterator<TreeNode<P>> for NodeSet<P> {
    fn from_iter<I: IntoIterator<Item = TreeNode<P>>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for node in iter {
            set.push(node);
        }
        set
    }
}

impl<P: NodeProvider> IntoIterator for NodeSet<P> {
    type Item = TreeNode<P>;
    type IntoIter = std::vec::IntoIter<TreeNode<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'s, P: NodeProvider> IntoIterator for &'s NodeSet<P> {
    type Item = &'s TreeNode<P>;
    type IntoIter = std::slice::Iter<'s, TreeNode<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
