//! Re-materializing rooted trees from a [TreeGraph] and cleaning up unary
//! artifacts.

use crate::graph::TreeGraph;
use crate::model::{NodeIndex, PhyloTree, merge_lengths};

/// Copies the side of the graph reachable from `start` without crossing the
/// edge to `exclude` into `out`, as a subtree hanging below `parent`.
///
/// Every node keeps its payload; its length becomes the length of the edge
/// it was reached by (`incoming_length` for `start`). Children appear in
/// adjacency order, i.e. the former parent (if reached from below) first,
/// then the former children in display order.
///
/// # Returns
/// The index of the copy of `start` in `out`.
pub(crate) fn materialize(
    graph: &TreeGraph,
    start: NodeIndex,
    exclude: NodeIndex,
    incoming_length: Option<f64>,
    out: &mut PhyloTree,
    parent: NodeIndex,
) -> NodeIndex {
    let source = graph.tree();
    let mut visited = vec![false; source.arena_len()];
    visited[exclude] = true;

    let mut top = parent;
    // (node in graph, its incoming length, parent in out)
    let mut stack = vec![(start, incoming_length, parent)];
    while let Some((index, length, new_parent)) = stack.pop() {
        if visited[index] {
            continue;
        }
        visited[index] = true;

        let copy = out.push_node(source[index].data().clone().with_length(length));
        out.attach_child(new_parent, copy);
        if index == start {
            top = copy;
        }

        for edge in graph.neighbors(index).iter().rev() {
            if !visited[edge.to] {
                stack.push((edge.to, edge.length, copy));
            }
        }
    }

    top
}

/// Removes unary nodes from a tree without collapsed slots.
///
/// A non-root node with exactly one child is spliced out: the child takes its
/// place, with the two branch lengths merged (see
/// [merge_lengths]) and the removed node's name
/// if the child has none. If the root ends up with exactly one child, that
/// child becomes the root; its length is dropped and it inherits the root's
/// name if it has none.
///
/// # Returns
/// The cleaned tree, re-indexed in pre-order.
pub fn collapse_unary(mut tree: PhyloTree) -> PhyloTree {
    if !tree.is_root_set() {
        return tree;
    }

    let root = tree.root_index();
    let bottom_up: Vec<NodeIndex> = tree.post_order_iter().map(|node| node.index()).collect();
    for index in bottom_up {
        if index == root || !is_unary(&tree, index) {
            continue;
        }
        let Some(parent) = tree[index].parent() else {
            continue;
        };
        let child = tree[index].children()[0];

        absorb_into_child(&mut tree, index, child);
        if let Some(slot) = tree
            .node_mut(parent)
            .children_mut()
            .iter_mut()
            .find(|slot| **slot == index)
        {
            *slot = child;
        }
        tree.node_mut(child).set_parent(Some(parent));
        tree.node_mut(index).children_mut().clear();
    }

    if is_unary(&tree, root) {
        let child = tree[root].children()[0];
        absorb_into_child(&mut tree, root, child);
        tree.node_mut(child).set_length(None);
        tree.set_root(child);
    }

    tree.compacted()
}

fn is_unary(tree: &PhyloTree, index: NodeIndex) -> bool {
    let node = &tree[index];
    node.children().len() == 1 && node.collapsed_children().is_none()
}

/// Merges branch length and name of the unary node `index` into `child`.
fn absorb_into_child(tree: &mut PhyloTree, index: NodeIndex, child: NodeIndex) {
    let merged = merge_lengths(tree[index].length(), tree[child].length());
    tree.node_mut(child).set_length(merged);
    if tree[child].name().is_empty() && !tree[index].name().is_empty() {
        let name = tree[index].name().to_string();
        tree.node_mut(child).set_name(name);
    }
}
