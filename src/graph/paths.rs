//! Distances and paths in a [TreeGraph].
//!
//! A tree has exactly one simple path between any two nodes, so neither
//! query needs Dijkstra: a depth-first walk that never returns along the
//! edge it arrived by finds it. Missing or non-finite edge lengths weigh
//! [DEFAULT_EDGE_LENGTH](crate::model::DEFAULT_EDGE_LENGTH), negative ones
//! weigh zero (see [numeric_length]).
//!
//! Both walks keep a visited set, so malformed input with cycles terminates.

use crate::graph::TreeGraph;
use crate::model::{NodeIndex, numeric_length};

/// One step of a path, oriented from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathEdge {
    /// Node the step starts at
    pub from: NodeIndex,
    /// Node the step ends at
    pub to: NodeIndex,
    /// Weight of the edge as used for distances
    pub length: f64,
}

impl TreeGraph<'_> {
    /// Computes the distance from `source` to every node of the graph.
    ///
    /// # Returns
    /// A vector parallel to the tree arena: entry `i` is `Some(distance)` if
    /// node `i` is reachable from `source` (`Some(0.0)` for `source` itself),
    /// `None` otherwise. All entries are `None` if `source` is not in the graph.
    pub fn distances_from(&self, source: NodeIndex) -> Vec<Option<f64>> {
        let mut distances = vec![None; self.tree().arena_len()];
        if !self.contains(source) {
            return distances;
        }

        let mut stack = vec![(source, 0.0)];
        while let Some((index, distance)) = stack.pop() {
            if distances[index].is_some() {
                continue;
            }
            distances[index] = Some(distance);
            for edge in self.neighbors(index) {
                if distances[edge.to].is_none() {
                    stack.push((edge.to, distance + numeric_length(edge.length)));
                }
            }
        }

        distances
    }

    /// Finds the unique simple path between two nodes.
    ///
    /// # Returns
    /// The edges of the path in order from `from` to `to`; empty if
    /// `from == to`. `None` if either node is not in the graph or `to` is
    /// unreachable.
    pub fn path_between(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<PathEdge>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        // Back-pointer per node: (previous node, weight of edge to it)
        let mut came_from: Vec<Option<(NodeIndex, f64)>> = vec![None; self.tree().arena_len()];
        let mut visited = vec![false; self.tree().arena_len()];
        visited[from] = true;

        let mut stack = vec![from];
        while let Some(index) = stack.pop() {
            if index == to {
                break;
            }
            for edge in self.neighbors(index) {
                if visited[edge.to] {
                    continue;
                }
                visited[edge.to] = true;
                came_from[edge.to] = Some((index, numeric_length(edge.length)));
                stack.push(edge.to);
            }
        }

        if !visited[to] {
            return None;
        }

        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            let (previous, length) = came_from[current]?;
            path.push(PathEdge {
                from: previous,
                to: current,
                length,
            });
            current = previous;
        }
        path.reverse();

        Some(path)
    }

    /// Returns the distance between two nodes, if both are in the graph.
    pub fn distance_between(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.path_between(from, to)
            .map(|path| path.iter().map(|edge| edge.length).sum())
    }
}
