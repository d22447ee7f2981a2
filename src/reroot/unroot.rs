//! Dissolving a bifurcating root.

use crate::model::{NodeData, PhyloTree, merge_lengths};
use crate::reroot::collapse_unary;
use log::debug;

/// Unroots a tree whose root has exactly two children.
///
/// Of the two root children, the one with more children (the first on a tie)
/// is the pivot: its children are lifted to the root and its sibling is
/// attached next to them, carrying the length of both former root branches.
/// If both root children are tips, the first loses its length and the second
/// carries the merged length. The root keeps its id, name and source span.
///
/// Collapsed subtrees are expanded first. A tree whose root does not have
/// exactly two children is already unrooted by convention and is returned
/// unchanged (but expanded).
///
/// # Example
/// ```
/// use phyroot::model::TreeNode;
/// use phyroot::{PhyloTree, unroot};
///
/// let record = TreeNode::new("r").with_children(vec![
///     TreeNode::new("a").with_length(1.0),
///     TreeNode::new("b").with_length(1.0),
/// ]);
/// let tree = PhyloTree::try_from(&record).unwrap();
///
/// let unrooted = unroot(&tree);
/// assert_eq!(unrooted.find_node_by_id("b").unwrap().length(), Some(2.0));
/// ```
pub fn unroot(tree: &PhyloTree) -> PhyloTree {
    let source = tree.expanded();
    if !source.is_root_set() {
        return source;
    }

    let root_children = source.root().children().to_vec();
    let &[left, right] = root_children.as_slice() else {
        debug!(
            "unroot skipped: root has {} children instead of 2",
            root_children.len()
        );
        return source;
    };

    let (pivot, sibling) = if source[left].children().len() >= source[right].children().len() {
        (left, right)
    } else {
        (right, left)
    };

    let mut out = PhyloTree::with_capacity(source.arena_len());
    let root_data = NodeData {
        length: None,
        ..source.root().data().clone()
    };
    let root = out.push_node(root_data);
    out.set_root(root);

    if source[pivot].children().is_empty() {
        let first = out.graft(&source, left);
        out.node_mut(first).set_length(None);
        out.attach_child(root, first);

        let second = out.graft(&source, right);
        let merged = merge_lengths(source[left].length(), source[right].length());
        out.node_mut(second).set_length(merged);
        out.attach_child(root, second);
    } else {
        for &child in source[pivot].children() {
            let lifted = out.graft(&source, child);
            out.attach_child(root, lifted);
        }
        let lifted_sibling = out.graft(&source, sibling);
        let merged = merge_lengths(source[pivot].length(), source[sibling].length());
        out.node_mut(lifted_sibling).set_length(merged);
        out.attach_child(root, lifted_sibling);
    }

    debug!(
        "unrooted around '{}', root now has {} children",
        source[pivot].id(),
        out.root().children().len()
    );
    collapse_unary(out)
}
