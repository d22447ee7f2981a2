mod common;

use common::*;
use phyroot::TreeGraph;
use phyroot::model::TreeNode;
use phyroot::rooting::{least_squares_pivot, longest_tip_pair, midpoint_pivot};
use phyroot::{Rooter, RootingConfig, RootingMethod, least_squares_root, midpoint_root};

// --- TESTS MIDPOINT ---
#[test]
fn test_longest_tip_pair_prefers_first_pair() {
    let tree = sample_tree();
    let graph = TreeGraph::build(&tree);
    let (a, b, distance) = longest_tip_pair(&graph).unwrap();

    // A-C, A-D, B-C and B-D all have length 6
    assert_eq!(tree[a].id(), "A");
    assert_eq!(tree[b].id(), "C");
    assert_close(distance, 6.0);
}

#[test]
fn test_midpoint_pivot() {
    let tree = sample_tree();
    let graph = TreeGraph::build(&tree);
    let pivot = midpoint_pivot(&graph).unwrap();

    assert_eq!(tree[pivot.u].id(), "R");
    assert_eq!(tree[pivot.v].id(), "Y");
    assert_close(pivot.fraction, 1.0 / 3.0);
}

#[test]
fn test_midpoint_root() {
    let tree = sample_tree();
    let rooted = midpoint_root(&tree);

    assert_eq!(rooted.root().id(), "root");
    assert_eq!(child_ids(&rooted, "root"), vec!["X", "Y"]);
    assert_close(length_of(&rooted, "X").unwrap(), 2.0);
    assert_close(length_of(&rooted, "Y").unwrap(), 2.0);
    assert_eq!(child_ids(&rooted, "X"), vec!["A", "B"]);
    assert_eq!(child_ids(&rooted, "Y"), vec!["C", "D"]);

    assert_eq!(rooted.is_ultrametric(), Some(true));
    assert_eq!(sorted_tips(&rooted), sorted_tips(&tree));
    assert_close(rooted.total_branch_length(), tree.total_branch_length());
}

#[test]
fn test_midpoint_on_star_uses_first_tip_pair() {
    let star = tree(clade("r", None, vec![leaf("a", 1.0), leaf("b", 1.0), leaf("c", 1.0)]));
    let rooted = midpoint_root(&star);

    assert_eq!(child_ids(&rooted, "root"), vec!["a", "r"]);
    assert_eq!(length_of(&rooted, "a"), Some(1.0));
    assert_eq!(length_of(&rooted, "r"), Some(0.0));
    assert_eq!(child_ids(&rooted, "r"), vec!["b", "c"]);
}

#[test]
fn test_midpoint_needs_two_tips() {
    let single = tree(leaf("only", 2.0));
    assert_eq!(midpoint_root(&single), single);

    let graph = TreeGraph::build(&single);
    assert!(longest_tip_pair(&graph).is_none());
    assert!(midpoint_pivot(&graph).is_none());
}

#[test]
fn test_midpoint_skips_zero_length_trees() {
    let record = clade(
        "r",
        None,
        vec![clade("x", Some(0.0), vec![leaf("a", 0.0), leaf("b", 0.0)]).collapsed()],
    );
    let tree = tree(record);
    let rooted = midpoint_root(&tree);

    // Unchanged, but expanded
    assert_eq!(rooted, tree.expanded());
    assert!(!rooted.find_node_by_id("x").unwrap().is_collapsed());
}

#[test]
fn test_midpoint_with_missing_lengths() {
    // Missing lengths weigh 1: a-r-x-b is the longest path (length 3)
    let record = TreeNode::new("r").with_children(vec![
        TreeNode::new("a"),
        TreeNode::new("x").with_children(vec![TreeNode::new("b"), TreeNode::new("c")]),
    ]);
    let tree = tree(record);
    let rooted = midpoint_root(&tree);

    // The midpoint halves r-x; r is then merged into a, whose own length is missing
    assert_eq!(child_ids(&rooted, "root"), vec!["a", "x"]);
    assert_close(length_of(&rooted, "a").unwrap(), 0.5);
    assert_close(length_of(&rooted, "x").unwrap(), 0.5);
    assert_eq!(length_of(&rooted, "b"), None);
}

// --- TESTS LEAST SQUARES ---
#[test]
fn test_least_squares_pivot_finds_exact_balance() {
    let tree = sample_tree();
    let graph = TreeGraph::build(&tree);
    let (pivot, variance) = least_squares_pivot(&graph, 3).unwrap();

    assert_eq!(tree[pivot.u].id(), "R");
    assert_eq!(tree[pivot.v].id(), "Y");
    assert_close(pivot.fraction, 1.0 / 3.0);
    assert!(variance < 1e-12);
}

#[test]
fn test_least_squares_root_with_exact_sample() {
    let tree = sample_tree();
    let rooter = Rooter::new(RootingConfig::default().with_least_squares_samples(3));
    let rooted = rooter.least_squares_root(&tree);

    assert_eq!(child_ids(&rooted, "root"), vec!["X", "Y"]);
    assert_close(length_of(&rooted, "X").unwrap(), 2.0);
    assert_close(length_of(&rooted, "Y").unwrap(), 2.0);
}

#[test]
fn test_least_squares_root_with_default_samples() {
    let tree = sample_tree();
    let rooted = least_squares_root(&tree);

    // Closest sample to 1/3 on the R-Y edge is 0.35
    assert_eq!(child_ids(&rooted, "root"), vec!["X", "Y"]);
    assert_close(length_of(&rooted, "X").unwrap(), 2.05);
    assert_close(length_of(&rooted, "Y").unwrap(), 1.95);
    assert_eq!(sorted_tips(&rooted), sorted_tips(&tree));
    assert_close(rooted.total_branch_length(), tree.total_branch_length());
}

#[test]
fn test_least_squares_zero_samples_means_edge_ends() {
    let tree = sample_tree();
    let rooter = Rooter::new(RootingConfig::default().with_least_squares_samples(0));
    let rooted = rooter.least_squares_root(&tree);

    // Ends of R-X and R-Y tie at R; the first edge wins
    assert_eq!(child_ids(&rooted, "root"), vec!["Y", "X"]);
    assert_eq!(length_of(&rooted, "Y"), Some(3.0));
    assert_eq!(length_of(&rooted, "X"), Some(1.0));
}

#[test]
fn test_least_squares_needs_two_tips() {
    let single = tree(leaf("only", 2.0));
    assert_eq!(least_squares_root(&single), single);
    assert!(least_squares_pivot(&TreeGraph::build(&single), 20).is_none());
}

#[test]
fn test_least_squares_on_high_degree_node() {
    // Every edge touches r, so its distances are reused across all four edges
    let star = tree(clade(
        "r",
        None,
        vec![leaf("a", 1.0), leaf("b", 1.0), leaf("c", 1.0), leaf("d", 5.0)],
    ));
    let graph = TreeGraph::build(&star);
    let (pivot, variance) = least_squares_pivot(&graph, 20).unwrap();

    assert_eq!(star[pivot.u].id(), "r");
    assert_eq!(star[pivot.v].id(), "d");
    assert_close(pivot.fraction, 0.4);
    assert!(variance < 1e-12);

    let rooted = least_squares_root(&star);
    assert_eq!(child_ids(&rooted, "root"), vec!["r", "d"]);
    assert_close(length_of(&rooted, "r").unwrap(), 2.0);
    assert_close(length_of(&rooted, "d").unwrap(), 3.0);
    assert_eq!(child_ids(&rooted, "r"), vec!["a", "b", "c"]);
}

// --- TESTS UNARY ROOT ---
/// `((A:1,B:2)X:1)R`
fn unary_root_tree() -> phyroot::PhyloTree {
    tree(clade(
        "R",
        None,
        vec![clade("X", Some(1.0), vec![leaf("A", 1.0), leaf("B", 2.0)])],
    ))
}

#[test]
fn test_midpoint_with_unary_root_keeps_tips() {
    let tree = unary_root_tree();
    let rooted = midpoint_root(&tree);

    assert_eq!(rooted.count_tips(), 2);
    assert_eq!(child_ids(&rooted, "root"), vec!["A", "B"]);
    assert_close(length_of(&rooted, "A").unwrap(), 1.5);
    assert_close(length_of(&rooted, "B").unwrap(), 1.5);
}

#[test]
fn test_least_squares_with_unary_root_keeps_tips() {
    let tree = unary_root_tree();
    let rooted = least_squares_root(&tree);

    assert_eq!(rooted.count_tips(), 2);
    assert_eq!(sorted_tips(&rooted), vec!["A", "B"]);
    assert_close(length_of(&rooted, "A").unwrap(), 1.5);
    assert_close(length_of(&rooted, "B").unwrap(), 1.5);
}

// --- TESTS ROOTING METHOD ---
#[test]
fn test_rooting_method_dispatch() {
    let tree = sample_tree();
    let rooter = Rooter::default();

    assert_eq!(rooter.root(&tree, RootingMethod::Midpoint), midpoint_root(&tree));
    assert_eq!(rooter.root(&tree, RootingMethod::LeastSquares), least_squares_root(&tree));
    assert_eq!(RootingMethod::Midpoint.to_string(), "midpoint");
    assert_eq!(RootingMethod::LeastSquares.to_string(), "least-squares");
}
