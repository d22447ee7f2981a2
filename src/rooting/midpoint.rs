//! Midpoint rooting.
//!
//! The root is placed halfway along the longest path between any two tips.

use crate::config::RootingConfig;
use crate::graph::TreeGraph;
use crate::model::{NodeIndex, PhyloTree};
use crate::reroot::{Pivot, reroot_on_edge, rooting_input};
use log::debug;

/// Roots `tree` at the midpoint of its longest tip-to-tip path.
///
/// Collapsed subtrees are expanded and unary nodes spliced out first
/// (see [rooting_input]). Trees with fewer than two tips, or
/// whose longest tip-to-tip distance is not positive, are returned unchanged
/// (but expanded).
pub fn midpoint_root(tree: &PhyloTree, config: &RootingConfig) -> PhyloTree {
    let expanded = tree.expanded();
    let rooted = {
        let working = rooting_input(tree);
        let graph = TreeGraph::build(&working);
        midpoint_pivot(&graph).and_then(|p| reroot_on_edge(&graph, p.u, p.v, p.fraction, config))
    };
    rooted.unwrap_or(expanded)
}

/// Finds the two tips furthest apart.
///
/// Tips are compared in discovery order and the first pair reaching the
/// maximum wins.
///
/// # Returns
/// `(a, b, distance)`, or `None` if there are fewer than two tips.
pub fn longest_tip_pair(graph: &TreeGraph) -> Option<(NodeIndex, NodeIndex, f64)> {
    let tips = graph.tips();
    let mut best: Option<(NodeIndex, NodeIndex, f64)> = None;

    for (i, &a) in tips.iter().enumerate() {
        let distances = graph.distances_from(a);
        for &b in &tips[i + 1..] {
            let Some(distance) = distances[b].filter(|d| d.is_finite()) else {
                continue;
            };
            if best.is_none_or(|(_, _, longest)| distance > longest) {
                best = Some((a, b, distance));
            }
        }
    }

    best
}

/// Locates the midpoint of the longest tip-to-tip path.
///
/// Walks the path from its first tip, accumulating edge weights until half
/// of the path length is reached. The edge straddling that point is the
/// pivot, oriented along the walk; the fraction is how far into the edge the
/// midpoint lies (0.5 for an edge of length zero).
///
/// # Returns
/// `None` if there are fewer than two tips or the longest distance is not
/// positive.
pub fn midpoint_pivot(graph: &TreeGraph) -> Option<Pivot> {
    let Some((a, b, distance)) = longest_tip_pair(graph) else {
        debug!("midpoint rooting skipped: fewer than two tips");
        return None;
    };
    if distance <= 0.0 {
        debug!("midpoint rooting skipped: longest tip distance is {}", distance);
        return None;
    }

    let tree = graph.tree();
    debug!(
        "longest tip pair '{}'-'{}' at distance {}",
        tree[a].id(),
        tree[b].id(),
        distance
    );

    let path = graph.path_between(a, b)?;
    let half = distance / 2.0;
    let mut walked = 0.0;
    for edge in &path {
        if walked + edge.length >= half {
            let fraction = if edge.length > 0.0 {
                ((half - walked) / edge.length).clamp(0.0, 1.0)
            } else {
                0.5
            };
            return Some(Pivot {
                u: edge.from,
                v: edge.to,
                fraction,
            });
        }
        walked += edge.length;
    }

    // Only reachable through rounding: fall back to the last edge
    let last = path.last()?;
    Some(Pivot {
        u: last.from,
        v: last.to,
        fraction: 0.5,
    })
}
