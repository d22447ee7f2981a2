//! Configured entry point for all rooting operations.

use crate::config::RootingConfig;
use crate::error::TreeError;
use crate::graph::TreeGraph;
use crate::model::PhyloTree;
use crate::reroot;
use crate::rooting::{self, RootingMethod};

/// Applies rerooting, unrooting and automatic rooting with one
/// [RootingConfig].
///
/// The crate-level functions ([`crate::reroot_at_node`],
/// [`crate::midpoint_root`], ...) use `Rooter::default()`.
///
/// # Example
/// ```
/// use phyroot::{Rooter, RootingConfig, RootingMethod};
/// use phyroot::model::TreeNode;
/// use phyroot::PhyloTree;
///
/// let record = TreeNode::new("r").with_children(vec![
///     TreeNode::new("a").with_length(1.0),
///     TreeNode::new("b").with_length(3.0),
/// ]);
/// let tree = PhyloTree::try_from(&record).unwrap();
///
/// let rooter = Rooter::new(RootingConfig::default().with_synthetic_root_prefix("mid"));
/// let rooted = rooter.root(&tree, RootingMethod::Midpoint);
/// assert_eq!(rooted.root().id(), "mid");
/// assert_eq!(rooted.find_node_by_id("a").unwrap().length(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rooter {
    config: RootingConfig,
}

impl Rooter {
    /// Creates a rooter with the given configuration.
    pub fn new(config: RootingConfig) -> Self {
        Rooter { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &RootingConfig {
        &self.config
    }

    /// See [reroot::reroot_at_node].
    pub fn reroot_at_node(&self, tree: &PhyloTree, target_id: &str) -> Option<PhyloTree> {
        reroot::reroot_at_node(tree, target_id, &self.config)
    }

    /// Like [`reroot_at_node`](Self::reroot_at_node), but reports a missing
    /// target as [TreeError::NodeNotFound].
    pub fn try_reroot_at_node(&self, tree: &PhyloTree, target_id: &str) -> Result<PhyloTree, TreeError> {
        self.reroot_at_node(tree, target_id)
            .ok_or_else(|| TreeError::NodeNotFound(target_id.to_string()))
    }

    /// Reroots at a point on the edge between the nodes `u_id` and `v_id`,
    /// `fraction` of the way from `u_id` (see [reroot::reroot_on_edge]).
    /// Collapsed subtrees are expanded first.
    ///
    /// # Returns
    /// `None` if either id is missing or the two nodes are not adjacent.
    pub fn reroot_on_edge(&self, tree: &PhyloTree, u_id: &str, v_id: &str, fraction: f64) -> Option<PhyloTree> {
        let expanded = tree.expanded();
        let graph = TreeGraph::build(&expanded);
        let u = graph.index_of(u_id)?;
        let v = graph.index_of(v_id)?;
        reroot::reroot_on_edge(&graph, u, v, fraction, &self.config)
    }

    /// See [rooting::midpoint_root].
    pub fn midpoint_root(&self, tree: &PhyloTree) -> PhyloTree {
        rooting::midpoint_root(tree, &self.config)
    }

    /// See [rooting::least_squares_root].
    pub fn least_squares_root(&self, tree: &PhyloTree) -> PhyloTree {
        rooting::least_squares_root(tree, &self.config)
    }

    /// Roots `tree` with the given strategy.
    pub fn root(&self, tree: &PhyloTree, method: RootingMethod) -> PhyloTree {
        method.apply(tree, &self.config)
    }

    /// See [reroot::unroot].
    pub fn unroot(&self, tree: &PhyloTree) -> PhyloTree {
        reroot::unroot(tree)
    }
}
