//! The single-node test behind every selector step.

use arbor_selector::{PseudoClass, Step};

use crate::node::TreeNode;
use crate::provider::NodeProvider;

/// True when `node` passes the name test, every attribute predicate and every
/// pseudo-class of `step`. The combinator is the engine's concern, not this test's.
pub fn matches_step<P: NodeProvider>(node: &TreeNode<P>, step: &Step) -> bool {
    step.name.matches(node.name())
        && step
            .attributes
            .iter()
            .all(|predicate| predicate.matches(node.attribute(&predicate.name)))
        && step
            .pseudo_classes
            .iter()
            .all(|pseudo| matches_pseudo_class(node, *pseudo))
}

fn matches_pseudo_class<P: NodeProvider>(node: &TreeNode<P>, pseudo: PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => node.level() == 0,
        // Data children don't count.
        PseudoClass::Empty => node.children().is_empty(),
    }
}
