//! Least-squares rooting.
//!
//! The root is placed where the root-to-tip distances vary the least.
//! Every edge is sampled at evenly spaced split fractions; for a candidate
//! root at fraction `t` on edge `(u, v)` of length `L`, the distance to a tip
//! is
//!
//! ```text
//! min(t * L + dist(u, tip), (1 - t) * L + dist(v, tip))
//! ```
//!
//! For tips on `u`'s side the first term is the true distance, for tips on
//! `v`'s side the second; the other term routes through the candidate edge
//! and is never smaller. The candidate with the smallest population variance
//! wins.

use crate::config::RootingConfig;
use crate::graph::TreeGraph;
use crate::model::{PhyloTree, numeric_length};
use crate::reroot::{Pivot, reroot_on_edge, rooting_input};
use log::{debug, trace};

/// Roots `tree` at the sampled point minimizing the variance of
/// root-to-tip distances.
///
/// Collapsed subtrees are expanded and unary nodes spliced out first
/// (see [rooting_input]). Trees with fewer than two tips are
/// returned unchanged (but expanded).
pub fn least_squares_root(tree: &PhyloTree, config: &RootingConfig) -> PhyloTree {
    let expanded = tree.expanded();
    let rooted = {
        let working = rooting_input(tree);
        let graph = TreeGraph::build(&working);
        least_squares_pivot(&graph, config.effective_samples())
            .and_then(|(p, _)| reroot_on_edge(&graph, p.u, p.v, p.fraction, config))
    };
    rooted.unwrap_or(expanded)
}

/// Searches all edges for the root position minimizing the variance of
/// root-to-tip distances.
///
/// Each edge is visited once as `(parent, child)` in discovery order of the
/// child, and split fractions `0, 1/samples, ..., 1` are measured from the
/// parent. Only a strictly smaller variance replaces the current best, so
/// ties go to the first candidate.
///
/// # Returns
/// The best pivot together with its variance, or `None` if there are fewer
/// than two tips.
pub fn least_squares_pivot(graph: &TreeGraph, samples: usize) -> Option<(Pivot, f64)> {
    let tips = graph.tips();
    if tips.len() < 2 {
        debug!("least-squares rooting skipped: fewer than two tips");
        return None;
    }

    let samples = samples.max(1);
    let mut best: Option<(Pivot, f64)> = None;
    let mut root_to_tip = Vec::with_capacity(tips.len());
    // Distances per source node, computed once each
    let mut distance_cache: Vec<Option<Vec<Option<f64>>>> = vec![None; graph.tree().arena_len()];

    for (u, v, length) in graph.edges() {
        let edge_length = numeric_length(length);
        for end in [u, v] {
            if distance_cache[end].is_none() {
                distance_cache[end] = Some(graph.distances_from(end));
            }
        }
        let (Some(from_u), Some(from_v)) = (&distance_cache[u], &distance_cache[v]) else {
            continue;
        };

        for step in 0..=samples {
            let t = step as f64 / samples as f64;
            root_to_tip.clear();
            for &tip in &tips {
                let (Some(du), Some(dv)) = (from_u[tip], from_v[tip]) else {
                    continue;
                };
                root_to_tip.push((t * edge_length + du).min((1.0 - t) * edge_length + dv));
            }
            if root_to_tip.len() < 2 {
                continue;
            }

            let score = variance(&root_to_tip);
            if best.is_none_or(|(_, lowest)| score < lowest) {
                trace!("new least-squares best {} at t={} on edge {}-{}", score, t, u, v);
                best = Some((Pivot { u, v, fraction: t }, score));
            }
        }
    }

    if let Some((pivot, score)) = &best {
        let tree = graph.tree();
        debug!(
            "least-squares root on edge '{}'-'{}' at {} (variance {})",
            tree[pivot.u].id(),
            tree[pivot.v].id(),
            pivot.fraction,
            score
        );
    }
    best
}

/// Population variance; zero for fewer than two values.
fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
