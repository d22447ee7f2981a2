//! Structural edits independent of rooting.
//!
//! Every edit returns a new tree; the input is never modified. Edits on an
//! id that does not exist return an unchanged copy. The `can_*` predicates
//! tell callers (e.g. a UI enabling buttons) whether an edit would change
//! anything, without performing it.

use crate::model::PhyloTree;
use log::debug;

/// Collapses the node `node_id` if it has visible children, or expands it if
/// it has collapsed children.
///
/// Collapsed children stay in the tree and can still be found by id.
///
/// # Example
/// ```
/// use phyroot::model::TreeNode;
/// use phyroot::{PhyloTree, toggle_collapse};
///
/// let record = TreeNode::new("r").with_children(vec![
///     TreeNode::new("x").with_children(vec![TreeNode::new("a"), TreeNode::new("b")]),
///     TreeNode::new("c"),
/// ]);
/// let tree = PhyloTree::try_from(&record).unwrap();
///
/// let collapsed = toggle_collapse(&tree, "x");
/// assert_eq!(collapsed.count_tips(), 3);
/// assert!(collapsed.find_node_by_id("x").unwrap().is_collapsed());
/// assert!(collapsed.find_node_by_id("a").is_some());
/// ```
pub fn toggle_collapse(tree: &PhyloTree, node_id: &str) -> PhyloTree {
    let mut edited = tree.clone();
    match edited.find_index_by_id(node_id) {
        Some(index) => edited.node_mut(index).toggle_collapse(),
        None => debug!("toggle collapse skipped: no node with id '{}'", node_id),
    }
    edited
}

/// Reverses the order of the children of node `node_id`: the visible
/// children if there are at least two, else the collapsed ones if there are
/// at least two. Otherwise nothing changes.
pub fn swap_children(tree: &PhyloTree, node_id: &str) -> PhyloTree {
    let mut edited = tree.clone();
    match edited.find_index_by_id(node_id) {
        Some(index) => edited.node_mut(index).reverse_children(),
        None => debug!("swap skipped: no node with id '{}'", node_id),
    }
    edited
}

/// Returns whether [toggle_collapse] on `node_id` would change the tree.
pub fn can_toggle_collapse(tree: &PhyloTree, node_id: &str) -> bool {
    tree.find_node_by_id(node_id)
        .is_some_and(|node| node.can_toggle_collapse())
}

/// Returns whether [swap_children] on `node_id` would change the tree.
pub fn can_swap(tree: &PhyloTree, node_id: &str) -> bool {
    tree.find_node_by_id(node_id)
        .is_some_and(|node| node.can_swap())
}

/// Returns a copy of `tree` with every collapsed subtree expanded.
pub fn expand_all_collapsed(tree: &PhyloTree) -> PhyloTree {
    tree.expanded()
}
