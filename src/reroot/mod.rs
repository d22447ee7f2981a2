//! Rerooting engine.
//!
//! Rerooting never rewires parent pointers of an existing tree. Instead the
//! tree is projected into a [TreeGraph], a pivot edge `(u, v)` and a split
//! fraction are chosen, and a fresh rooted tree is re-materialized by walking
//! the undirected graph outward from both ends of the pivot:
//!
//! ```text
//!            new root (synthetic)
//!           /                    \
//!    u (length L * f)      v (length L * (1 - f))
//!    ... all of u's side   ... all of v's side
//! ```
//!
//! Afterwards unary nodes, e.g. the old root when it had two children, are
//! removed and their branch lengths merged into their only child
//! (see [`collapse_unary`]).
//!
//! Entry points:
//! * [`reroot_on_edge`] - reroot at a point on a given edge
//! * [`reroot_at_node`] - reroot so that a given node hangs directly below the root
//! * [`unroot`] - dissolve a bifurcating root

mod materialize;
mod unroot;

pub use materialize::collapse_unary;
pub use unroot::unroot;

use crate::config::RootingConfig;
use crate::graph::TreeGraph;
use crate::model::{NodeData, NodeIndex, PhyloTree, numeric_length};
use log::{debug, trace};
use materialize::materialize;

/// Position of a new root: a point on the edge between `u` and `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// One end of the pivot edge
    pub u: NodeIndex,
    /// Other end of the pivot edge
    pub v: NodeIndex,
    /// Position of the root along the edge from `u` (0.0) to `v` (1.0)
    pub fraction: f64,
}

/// Reroots the tree underlying `graph` at a point on the edge `(u, v)`.
///
/// With `L` the edge length (missing lengths count as 1, negative ones as 0),
/// the subtree on `u`'s side gets incoming length `L * fraction` and the one
/// on `v`'s side `L * (1 - fraction)`. Both hang below a new synthetic root
/// with an empty name and no length, which inherits the source span of the
/// old root. Unary nodes are collapsed afterwards.
///
/// # Arguments
/// * `graph` - Undirected view of a fully expanded tree
/// * `u`, `v` - Ends of the pivot edge
/// * `fraction` - Position of the new root, clamped to `[0, 1]`;
///   non-finite values mean the middle of the edge
/// * `config` - Supplies the base id of the synthetic root
///
/// # Returns
/// `None` if `u` or `v` is not in the graph or they are not adjacent.
pub fn reroot_on_edge(
    graph: &TreeGraph,
    u: NodeIndex,
    v: NodeIndex,
    fraction: f64,
    config: &RootingConfig,
) -> Option<PhyloTree> {
    if !graph.contains(u) || !graph.contains(v) {
        return None;
    }
    let edge_length = graph.edge_length(u, v)?;

    let total = numeric_length(edge_length);
    let left_length = total * clamp_fraction(fraction);
    let right_length = total - left_length;
    trace!(
        "reroot on edge '{}'-'{}' at {:.4} ({} | {})",
        graph.tree()[u].id(),
        graph.tree()[v].id(),
        fraction,
        left_length,
        right_length
    );

    let source = graph.tree();
    let root_data = NodeData::new(synthetic_root_id(graph, &config.synthetic_root_prefix))
        .with_span(source.root().span());

    let mut tree = PhyloTree::with_capacity(graph.num_nodes() + 1);
    let root = tree.push_node(root_data);
    tree.set_root(root);
    materialize(graph, u, v, Some(left_length), &mut tree, root);
    materialize(graph, v, u, Some(right_length), &mut tree, root);

    Some(collapse_unary(tree))
}

/// Reroots `tree` so that the node `target_id` hangs directly below the new
/// root.
///
/// The pivot is the edge from the target to its parent and the whole length
/// of that edge goes to the parent's side, so the target sits at distance
/// zero from the new root. If the target is the current root, its first
/// incident edge is used instead. Collapsed subtrees are expanded first.
///
/// Unary nodes are spliced out before the pivot is chosen (see
/// [`rooting_input`]). A unary target is replaced by the descendant that
/// absorbs it.
///
/// # Returns
/// `None` if no node carries `target_id`; a copy of the (expanded) tree if
/// the tree consists of the target alone.
pub fn reroot_at_node(tree: &PhyloTree, target_id: &str, config: &RootingConfig) -> Option<PhyloTree> {
    let expanded = tree.expanded();
    let Some(found) = expanded.find_index_by_id(target_id) else {
        debug!("reroot skipped: no node with id '{}'", target_id);
        return None;
    };
    let target_id = absorbing_id(&expanded, found);
    let working = collapse_unary(expanded.clone());
    let graph = TreeGraph::build(&working);

    let Some(target) = graph.index_of(&target_id) else {
        debug!("reroot skipped: '{}' vanished when splicing unary nodes", target_id);
        return None;
    };

    let first_neighbor = graph.neighbors(target).first().map(|edge| edge.to);
    let Some(anchor) = graph.parent_of(target).or(first_neighbor) else {
        debug!("reroot skipped: '{}' is the only node", target_id);
        return Some(expanded);
    };

    debug!(
        "reroot at '{}' on edge to '{}'",
        target_id,
        working[anchor].id()
    );
    reroot_on_edge(&graph, target, anchor, 0.0, config)
}

/// Prepares `tree` for automatic rooting: expands collapsed subtrees and
/// splices out unary nodes.
///
/// A unary root would otherwise be a degree-one node of the undirected view
/// and come back as an extra tip after rerooting.
pub fn rooting_input(tree: &PhyloTree) -> PhyloTree {
    collapse_unary(tree.expanded())
}

/// Id of the node that survives [collapse_unary] in place of `index`:
/// the first node at or below it that does not have exactly one child.
fn absorbing_id(tree: &PhyloTree, mut index: NodeIndex) -> String {
    while let [only_child] = tree[index].children() {
        index = *only_child;
    }
    tree[index].id().to_string()
}

/// Returns an id not used by any node of `graph`: `prefix` itself if free,
/// else the first free `prefix_1`, `prefix_2`, ...
///
/// An empty prefix falls back to
/// [DEFAULT_SYNTHETIC_ROOT_PREFIX](crate::config::DEFAULT_SYNTHETIC_ROOT_PREFIX).
pub fn synthetic_root_id(graph: &TreeGraph, prefix: &str) -> String {
    let prefix = if prefix.is_empty() {
        crate::config::DEFAULT_SYNTHETIC_ROOT_PREFIX
    } else {
        prefix
    };
    if !graph.contains_id(prefix) {
        return prefix.to_string();
    }
    (1..)
        .map(|suffix| format!("{}_{}", prefix, suffix))
        .find(|candidate| !graph.contains_id(candidate))
        .unwrap_or_default()
}

/// Clamps a split fraction to `[0, 1]`; non-finite values mean the middle.
fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.5
    }
}
