//! Evaluates parsed selectors against a tree.
//!
//! Each chain is walked as a depth-first search over `(node, step)` states. A node
//! that satisfies a non-tail step is a checkpoint: the search moves on to the next
//! step along that step's combinator. Independently, a step reached through the
//! descendant combinator keeps scanning deeper for further checkpoints.

use std::collections::HashSet;

use arbor_selector::{Chain, Combinator, SelectorList};

use crate::error::QueryError;
use crate::ids::NodeId;
use crate::matching::matches_step;
use crate::node::TreeNode;
use crate::node_set::NodeSet;
use crate::provider::NodeProvider;

/// Matches `selector` against `root` and its subtree. `root` itself is the first
/// candidate for every chain.
pub fn find<P: NodeProvider>(
    root: &TreeNode<P>,
    selector: &SelectorList,
) -> Result<NodeSet<P>, QueryError> {
    let mut results = NodeSet::new();
    for chain in selector.chains() {
        let mut search = Search::new(chain, false);
        search.visit(root, 0)?;
        results.extend(&in_document_order(root, search.results));
    }
    log::debug!("'{}' from {} matched {} node(s)", selector, root, results.len());
    Ok(results)
}

/// Matches `selector` with its first step restricted to the direct children of `root`.
pub fn children_matching<P: NodeProvider>(
    root: &TreeNode<P>,
    selector: &SelectorList,
) -> Result<NodeSet<P>, QueryError> {
    ensure_element(root)?;
    let mut results = NodeSet::new();
    for chain in selector.chains() {
        let mut search = Search::new(chain, true);
        for child in root.element_children() {
            search.visit(child, 0)?;
        }
        results.extend(&in_document_order(root, search.results));
    }
    log::debug!(
        "'{}' among children of {} matched {} node(s)",
        selector,
        root,
        results.len()
    );
    Ok(results)
}

/// Reorders `found` by a pre-order walk. Checkpoints nested inside other checkpoints are
/// reached out of order, so the search alone doesn't guarantee it. Sibling steps can leave
/// the subtree of `root`, so the walk starts at its parent when one is held. Every match
/// sits under materialized ancestors, so only those are walked.
fn in_document_order<P: NodeProvider>(root: &TreeNode<P>, found: NodeSet<P>) -> NodeSet<P> {
    if found.len() < 2 {
        return found;
    }
    let mut ordered = NodeSet::new();
    let mut stack = vec![root.parent().unwrap_or_else(|| root.clone())];
    while let Some(node) = stack.pop() {
        if found.contains(&node) {
            ordered.push(node.clone());
            if ordered.len() == found.len() {
                return ordered;
            }
        }
        if node.is_materialized() {
            stack.extend(node.element_children().iter().rev().cloned());
        }
    }
    // Anything the walk missed keeps its search order.
    for node in found.iter() {
        ordered.push(node.clone());
    }
    ordered
}

fn ensure_element<P: NodeProvider>(node: &TreeNode<P>) -> Result<(), QueryError> {
    if node.is_element() {
        Ok(())
    } else {
        Err(QueryError::NotAnElement {
            node: node.to_string(),
        })
    }
}

struct Search<'c, P: NodeProvider> {
    chain: &'c Chain,
    /// The head step may only match the children it was handed.
    anchored: bool,
    visited: HashSet<(NodeId, usize)>,
    results: NodeSet<P>,
}

impl<'c, P: NodeProvider> Search<'c, P> {
    fn new(chain: &'c Chain, anchored: bool) -> Self {
        Self {
            chain,
            anchored,
            visited: HashSet::new(),
            results: NodeSet::new(),
        }
    }

    /// Tests `node` against step `index`, then fans out from it.
    fn visit(&mut self, node: &TreeNode<P>, index: usize) -> Result<(), QueryError> {
        let Some(step) = self.chain.step(index) else {
            return Ok(());
        };
        ensure_element(node)?;
        // Re-entering a state cannot produce anything new.
        if !self.visited.insert((node.id(), index)) {
            return Ok(());
        }
        log::trace!("visit {} at step {} ({})", node, index, step);

        if matches_step(node, step) {
            if self.chain.is_tail(index) {
                self.results.push(node.clone());
            } else {
                self.advance(node, index + 1)?;
            }
        }

        let keeps_descending =
            step.combinator == Combinator::Descendant && !(self.anchored && index == 0);
        if keeps_descending {
            self.search_subtree(node, index)?;
        }
        Ok(())
    }

    /// Moves from checkpoint `node` to step `next` along that step's combinator.
    fn advance(&mut self, node: &TreeNode<P>, next: usize) -> Result<(), QueryError> {
        let Some(step) = self.chain.step(next) else {
            return Ok(());
        };
        match step.combinator {
            Combinator::Descendant | Combinator::Child => self.search_subtree(node, next),
            Combinator::AdjacentSibling => match node.following_siblings().first() {
                Some(sibling) => self.visit(sibling, next),
                None => Ok(()),
            },
            Combinator::GeneralSibling => {
                for sibling in node.following_siblings() {
                    self.visit(&sibling, next)?;
                }
                Ok(())
            }
        }
    }

    /// Hands each element child of `node` to step `index`. Descendant steps carry on
    /// below those children from `visit`; child steps stop there.
    fn search_subtree(&mut self, node: &TreeNode<P>, index: usize) -> Result<(), QueryError> {
        let Some(step) = self.chain.step(index) else {
            return Ok(());
        };
        if step.combinator.is_sibling() {
            return Err(QueryError::UnsupportedCombinator {
                combinator: step.combinator.glyph(),
            });
        }
        for child in node.element_children() {
            self.visit(child, index)?;
        }
        Ok(())
    }
}
