//! Data model for rooted phylogenetic trees of arbitrary degree.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. Each node carries its [NodeData]
//! (id, name, branch length, source span), its parent index, its visible
//! children and optionally a slot of collapsed children.
//!
//! # Structural children
//! Whenever topology matters (counting tips, layout, bifurcation checks),
//! use [`Node::structural_children`]: the visible children if there are any,
//! else the collapsed ones. A node is a tip iff it has no structural children.
//! Lookups by id ([`PhyloTree::find_node_by_id`]) also descend into collapsed
//! subtrees, so collapsed nodes remain addressable.
//!
//! # Exchanging trees
//! Parsers and renderers outside this crate exchange nested [TreeNode]
//! records (usually as JSON), converted with `PhyloTree::try_from` and
//! [`PhyloTree::to_tree_node`].
//!
//! | Type | Role |
//! |------|------|
//! | [PhyloTree] | Arena tree all operations work on |
//! | [Node] | Node inside an arena, addressed by [NodeIndex] |
//! | [NodeData] | Payload copied when a tree is rebuilt |
//! | [TreeNode] | Nested record at the crate boundary |

pub mod node;
pub mod tree;
pub mod tree_node;

pub use node::{DEFAULT_EDGE_LENGTH, Node, NodeData, SourceSpan, merge_lengths, numeric_length};
pub use tree::{AllNodesIter, NodeIndex, PhyloTree, PostOrderIter, PreOrderIter};
pub use tree_node::TreeNode;
