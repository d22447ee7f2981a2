//! Undirected view of a rooted tree.
//!
//! A [PhyloTree] is stored rooted and parent-pointing, but rerooting and
//! automatic rooting are questions about the underlying undirected tree.
//! [TreeGraph] projects a tree into an adjacency structure once (O(n)),
//! after which the [paths] engine answers distance and path queries and the
//! [reroot](crate::reroot) engine re-materializes rooted trees from it.
//!
//! Edge lengths are taken verbatim from the child side of every
//! parent-child pair; a missing or non-finite length stays `None` here and
//! is only defaulted when distances are accumulated.

pub mod paths;

pub use paths::PathEdge;

use crate::model::{NodeIndex, PhyloTree};
use std::collections::HashMap;

// =#========================================================================#=
// EDGE
// =#========================================================================#=
/// One direction of an undirected tree edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Node at the other end
    pub to: NodeIndex,
    /// Length of the edge, `None` if unspecified
    pub length: Option<f64>,
}

// =#========================================================================#=
// TREE GRAPH
// =#========================================================================#=
/// Undirected, weighted adjacency view of a [PhyloTree].
///
/// Nodes keep the indices they have in the underlying tree. Both directions
/// of every parent-child edge are stored; for a non-root node the edge to its
/// parent comes first in its adjacency list, followed by the edges to its
/// children in display order.
///
/// The graph follows structural children, so it should be built from a tree
/// whose collapsed subtrees have been expanded
/// (see [`PhyloTree::expanded`]).
#[derive(Debug, Clone)]
pub struct TreeGraph<'a> {
    tree: &'a PhyloTree,
    adjacency: Vec<Vec<Edge>>,
    parents: Vec<Option<NodeIndex>>,
    index_by_id: HashMap<&'a str, NodeIndex>,
    /// Nodes in discovery (pre-)order
    order: Vec<NodeIndex>,
}

impl<'a> TreeGraph<'a> {
    /// Builds the undirected view of `tree` in a single pre-order traversal.
    ///
    /// Nodes are visited at most once, so malformed (cyclic) input cannot
    /// make the traversal loop.
    pub fn build(tree: &'a PhyloTree) -> Self {
        let num_nodes = tree.arena_len();
        let mut graph = TreeGraph {
            tree,
            adjacency: vec![Vec::new(); num_nodes],
            parents: vec![None; num_nodes],
            index_by_id: HashMap::with_capacity(num_nodes),
            order: Vec::with_capacity(num_nodes),
        };
        if !tree.is_root_set() {
            return graph;
        }

        let mut visited = vec![false; num_nodes];
        let mut stack = vec![tree.root_index()];
        while let Some(index) = stack.pop() {
            if visited[index] {
                continue;
            }
            visited[index] = true;

            let node = &tree[index];
            graph.order.push(index);
            graph.index_by_id.insert(node.id(), index);

            for &child in node.structural_children() {
                if visited[child] {
                    continue;
                }
                let length = tree[child].length().filter(|l| l.is_finite());
                graph.adjacency[index].push(Edge { to: child, length });
                graph.adjacency[child].push(Edge { to: index, length });
                graph.parents[child] = Some(index);
            }
            stack.extend(node.structural_children().iter().rev().copied());
        }

        graph
    }

    /// Returns the tree this graph was built from.
    pub fn tree(&self) -> &'a PhyloTree {
        self.tree
    }

    /// Returns the number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.order.len()
    }

    /// Returns all nodes in discovery (pre-)order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Returns whether the node at `index` is part of the graph.
    pub fn contains(&self, index: NodeIndex) -> bool {
        index < self.tree.arena_len()
            && self.index_by_id.get(self.tree[index].id()) == Some(&index)
    }

    /// Looks up the index of the node carrying `id`.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    /// Returns `true` if some node in the graph carries `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Returns the edges incident to the node at `index`.
    pub fn neighbors(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Returns the parent of `index` in the original rooting,
    /// `None` for the root.
    pub fn parent_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(index).copied().flatten()
    }

    /// Returns the length of the edge between `u` and `v`.
    ///
    /// # Returns
    /// `None` if `u` and `v` are not adjacent, otherwise the (possibly
    /// unspecified) edge length.
    pub fn edge_length(&self, u: NodeIndex, v: NodeIndex) -> Option<Option<f64>> {
        self.neighbors(u)
            .iter()
            .find(|edge| edge.to == v)
            .map(|edge| edge.length)
    }

    /// Returns the tips (nodes without structural children) in discovery order.
    pub fn tips(&self) -> Vec<NodeIndex> {
        self.order
            .iter()
            .copied()
            .filter(|&index| self.tree[index].is_tip())
            .collect()
    }

    /// Returns every undirected edge once, as `(parent, child, length)` in
    /// discovery order of the child.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Option<f64>)> + '_ {
        self.order.iter().filter_map(move |&child| {
            let parent = self.parents[child]?;
            let length = self.edge_length(parent, child).flatten();
            Some((parent, child, length))
        })
    }

    /// Returns the sum of all specified edge lengths.
    pub fn total_length(&self) -> f64 {
        self.edges().filter_map(|(_, _, length)| length).sum()
    }
}
