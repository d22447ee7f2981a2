//! Phyroot is a library to reroot, root and edit phylogenetic trees.
//!
//! This crate offers structural transformations on rooted, possibly
//! non-binary, edge-weighted phylogenetic trees. Every transformation keeps
//! tip identities and branch-length mass while changing which node is the
//! root. Core functionality provided:
//! - Rerooting: at any node ([reroot_at_node]) or at any point on an edge
//!   ([Rooter::reroot_on_edge]).
//! - Automatic rooting: midpoint rooting ([midpoint_root]) and least-squares
//!   rooting ([least_squares_root]).
//! - Unrooting: dissolve a bifurcating root ([unroot]).
//! - Clade edits: collapse/expand ([toggle_collapse]), reorder children
//!   ([swap_children]) and the matching `can_*` predicates.
//! - Tree model: [PhyloTree] uses the arena pattern, so no direct node
//!   references are stored, only node indices. See [crate::model].
//!
//! All operations are synchronous and pure: they take a tree by reference and
//! return a new, independent tree, so callers can keep the previous tree
//! (e.g. for undo). Operations that cannot apply (too few tips, root not
//! bifurcating, unknown id) return the tree unchanged or `None`; they never
//! panic on well-formed trees.
//!
//! Limitations:
//! - No text formats: trees come in and go out as [TreeNode] records
//!   (usually JSON), produced and consumed by external parsers and renderers.
//! - Rooting works on the fully expanded tree; results contain no collapsed
//!   subtrees.
//! - Least-squares rooting is O(edges * samples * tips); on trees with
//!   thousands of tips schedule it off any interactive path.
//!
//! # How rerooting works
//! A rooted [PhyloTree] is projected into an undirected [TreeGraph]
//! ([graph]), distances and paths are computed on that view
//! ([graph::paths]), a strategy chooses a pivot edge and split fraction
//! ([rooting]), and the [reroot] engine re-materializes a fresh rooted tree
//! around the pivot, removing unary nodes afterwards.
//!
//! # Usage patterns
//! 1. The functions at the crate root apply default settings.
//! 2. Configure a [Rooter] with a [RootingConfig] for control over the
//!    least-squares sampling and the ids of synthetic roots.
//!
//! ## Example Default Configuration
//! ```
//! use phyroot::{PhyloTree, count_tips, midpoint_root};
//!
//! let json = r#"{"id":"R","children":[
//!     {"id":"X","length":1,"children":[{"id":"A","length":1},{"id":"B","length":1}]},
//!     {"id":"Y","length":3,"children":[{"id":"C","length":1},{"id":"D","length":1}]}
//! ]}"#;
//! let tree = PhyloTree::from_json(json).unwrap();
//!
//! let rooted = midpoint_root(&tree);
//! assert_eq!(count_tips(&rooted), 4);
//! assert_eq!(rooted.find_node_by_id("Y").unwrap().length(), Some(2.0));
//! ```
//!
//! ## Example Rooter Configuration
//! ```
//! use phyroot::{PhyloTree, Rooter, RootingConfig};
//!
//! let tree = PhyloTree::from_json(r#"{"id":"r","children":[{"id":"a"},{"id":"b"},{"id":"c"}]}"#)?;
//! let rooter = Rooter::new(RootingConfig::default().with_least_squares_samples(50));
//! let rooted = rooter.least_squares_root(&tree);
//! assert_eq!(rooted.count_tips(), 3);
//! # Ok::<(), phyroot::TreeError>(())
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod graph;
pub mod model;
pub mod reroot;
pub mod rooter;
pub mod rooting;

pub use config::RootingConfig;
pub use edit::{can_swap, can_toggle_collapse, expand_all_collapsed, swap_children, toggle_collapse};
pub use error::TreeError;
pub use graph::TreeGraph;
pub use model::{Node, NodeData, NodeIndex, PhyloTree, TreeNode};
pub use reroot::unroot;
pub use rooter::Rooter;
pub use rooting::RootingMethod;

// ============================================================================
// Quick Rooting API
// ============================================================================
/// Reroots `tree` so that the node `target_id` hangs directly below a new
/// root, using default settings.
///
/// Returns `None` if no node carries `target_id`.
/// See [`reroot::reroot_at_node`] for full documentation.
pub fn reroot_at_node(tree: &PhyloTree, target_id: &str) -> Option<PhyloTree> {
    Rooter::default().reroot_at_node(tree, target_id)
}

/// Roots `tree` at the midpoint of its longest tip-to-tip path,
/// using default settings.
///
/// See [`rooting::midpoint_root`] for full documentation.
pub fn midpoint_root(tree: &PhyloTree) -> PhyloTree {
    Rooter::default().midpoint_root(tree)
}

/// Roots `tree` where the variance of root-to-tip distances is smallest,
/// using default settings.
///
/// See [`rooting::least_squares_root`] for full documentation.
pub fn least_squares_root(tree: &PhyloTree) -> PhyloTree {
    Rooter::default().least_squares_root(tree)
}

// ============================================================================
// Quick Model API
// ============================================================================
/// Finds a node by id, including nodes inside collapsed subtrees.
pub fn find_node_by_id<'a>(tree: &'a PhyloTree, id: &str) -> Option<&'a Node> {
    tree.find_node_by_id(id)
}

/// Returns the structural children of `node`: visible children if any,
/// else collapsed children.
pub fn structural_children(node: &Node) -> &[NodeIndex] {
    node.structural_children()
}

/// Returns the number of tips of `tree`, counted via structural children.
pub fn count_tips(tree: &PhyloTree) -> usize {
    tree.count_tips()
}

/// Returns the number of nodes of `tree`, counted via structural children.
pub fn count_nodes(tree: &PhyloTree) -> usize {
    tree.count_nodes()
}
