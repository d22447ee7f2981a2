mod common;

use common::*;
use phyroot::model::{NodeData, PhyloTree, TreeNode};
use phyroot::{count_nodes, count_tips, find_node_by_id, structural_children};

// --- TESTS BUILDING AND ACCESS ---
#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::new();
    let a = tree.add_node(NodeData::new("a").with_name("A").with_length(Some(1.0)), vec![]);
    let b = tree.add_node(NodeData::new("b").with_length(Some(2.0)), vec![]);
    let x = tree.add_node(NodeData::new("x").with_length(Some(0.5)), vec![a, b]);
    let c = tree.add_node(NodeData::new("c").with_length(None), vec![]);
    let root = tree.add_root(NodeData::new("r"), vec![x, c]);

    // Counts
    assert_eq!(tree.count_tips(), 3);
    assert_eq!(tree.count_nodes(), 5);

    // Root
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree.root().id(), "r");
    assert_eq!(tree.root().parent(), None);

    // Tip
    let tip = &tree[a];
    assert!(tip.is_tip());
    assert_eq!(tip.name(), "A");
    assert_eq!(tip.length(), Some(1.0));
    assert_eq!(tip.parent(), Some(x));

    // Internal
    assert_eq!(tree[x].children(), &[a, b]);
    assert!(!tree[x].is_tip());
    assert_eq!(tree[c].length(), None);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new();
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_node_out_of_bounds() {
    let tree = sample_tree();
    let _ = &tree[55];
}

// --- TESTS LOOKUP ---
#[test]
fn test_find_node_by_id() {
    let tree = sample_tree();
    let y = find_node_by_id(&tree, "Y").unwrap();
    assert_eq!(y.length(), Some(3.0));
    assert_eq!(y.name(), "Y");

    assert!(find_node_by_id(&tree, "Z").is_none());
    assert!(find_node_by_id(&tree, "").is_none());
}

#[test]
fn test_find_node_inside_collapsed_subtree() {
    let record = clade(
        "R",
        None,
        vec![
            clade("X", Some(1.0), vec![leaf("A", 1.0), leaf("B", 1.0)]).collapsed(),
            leaf("C", 2.0),
        ],
    );
    let tree = tree(record);

    let a = tree.find_node_by_id("A").unwrap();
    assert_eq!(a.length(), Some(1.0));
    assert_eq!(tree[a.parent().unwrap()].id(), "X");
    assert_eq!(tree.find_index_by_id("B").map(|i| tree[i].id()), Some("B"));
    assert_eq!(tree.ids().len(), 5);
}

// --- TESTS STRUCTURAL CHILDREN AND COUNTS ---
#[test]
fn test_structural_children_fall_back_to_collapsed() {
    let record = clade(
        "R",
        None,
        vec![
            clade("X", Some(1.0), vec![leaf("A", 1.0), leaf("B", 1.0)]).collapsed(),
            leaf("C", 2.0),
        ],
    );
    let tree = tree(record);
    let x = tree.find_node_by_id("X").unwrap();

    assert!(x.children().is_empty());
    assert!(x.is_collapsed());
    let ids: Vec<&str> = structural_children(x).iter().map(|&i| tree[i].id()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert_eq!(tree.structural_children(x.index()), structural_children(x));

    // Collapsed clades are counted through their hidden children
    assert_eq!(count_tips(&tree), 3);
    assert_eq!(count_nodes(&tree), 5);
    assert!(!x.is_tip());
}

#[test]
fn test_empty_collapsed_slot_is_tip() {
    let mut tree = PhyloTree::new();
    let x = tree.add_collapsed_node(NodeData::new("x"), vec![]);
    let a = tree.add_node(NodeData::new("a"), vec![]);
    tree.add_root(NodeData::new("r"), vec![x, a]);

    assert!(tree[x].is_tip());
    assert!(!tree[x].is_collapsed());
    assert_eq!(tree.count_tips(), 2);
}

#[test]
fn test_counts_on_sample_tree() {
    let tree = sample_tree();
    assert_eq!(count_tips(&tree), 4);
    assert_eq!(count_nodes(&tree), 7);
    assert_eq!(tree.tip_ids(), vec!["A", "B", "C", "D"]);
    assert_close(tree.total_branch_length(), 8.0);
}

#[test]
fn test_counts_on_empty_and_single_node_trees() {
    let empty = PhyloTree::new();
    assert_eq!(empty.count_tips(), 0);
    assert_eq!(empty.count_nodes(), 0);
    assert_eq!(empty.is_bifurcating(), None);

    let single = tree(leaf("only", 1.0));
    assert_eq!(single.count_tips(), 1);
    assert_eq!(single.count_nodes(), 1);
    // The root's own length is not part of the tree
    assert_eq!(single.total_branch_length(), 0.0);
    assert_eq!(single.is_ultrametric(), None);
}

// --- TESTS METRICS ---
#[test]
fn test_is_bifurcating() {
    assert_eq!(sample_tree().is_bifurcating(), Some(true));

    let star = tree(clade("r", None, vec![leaf("a", 1.0), leaf("b", 1.0), leaf("c", 1.0)]));
    assert_eq!(star.is_bifurcating(), Some(false));
}

#[test]
fn test_is_ultrametric() {
    assert_eq!(sample_tree().is_ultrametric(), Some(false));

    let balanced = tree(clade(
        "r",
        None,
        vec![
            clade("x", Some(1.0), vec![leaf("a", 2.0), leaf("b", 2.0)]),
            leaf("c", 3.0),
        ],
    ));
    assert_eq!(balanced.is_ultrametric(), Some(true));

    // Missing lengths count as 1
    let unspecified = tree(clade(
        "r",
        None,
        vec![TreeNode::new("a"), TreeNode::new("b")],
    ));
    assert_eq!(unspecified.is_ultrametric(), Some(true));
}

// --- TESTS EXPANSION ---
#[test]
fn test_expand_all_collapsed() {
    let record = clade(
        "R",
        None,
        vec![
            clade(
                "X",
                Some(1.0),
                vec![clade("Z", Some(1.0), vec![leaf("A", 1.0), leaf("B", 1.0)]).collapsed(), leaf("E", 1.0)],
            )
            .collapsed(),
            leaf("C", 2.0),
        ],
    );
    let tree = tree(record);
    let expanded = tree.expanded();

    for id in ["X", "Z"] {
        let node = expanded.find_node_by_id(id).unwrap();
        assert!(!node.is_collapsed());
        assert!(node.collapsed_children().is_none());
    }
    assert_eq!(child_ids(&expanded, "X"), vec!["Z", "E"]);
    assert_eq!(child_ids(&expanded, "Z"), vec!["A", "B"]);
    assert_eq!(expanded.count_tips(), tree.count_tips());

    // Input stays collapsed
    assert!(tree.find_node_by_id("X").unwrap().is_collapsed());

    let mut in_place = tree.clone();
    in_place.expand_all_collapsed();
    assert_eq!(in_place, expanded);
}

// --- TESTS ITERATORS ---
#[test]
fn test_traversal_orders() {
    let tree = sample_tree();
    let pre: Vec<&str> = tree.pre_order_iter().map(|n| n.id()).collect();
    assert_eq!(pre, vec!["R", "X", "A", "B", "Y", "C", "D"]);

    let post: Vec<&str> = tree.post_order_iter().map(|n| n.id()).collect();
    assert_eq!(post, vec!["A", "B", "X", "C", "D", "Y", "R"]);
}

#[test]
fn test_all_nodes_iter_descends_into_collapsed() {
    let record = clade(
        "R",
        None,
        vec![clade("X", Some(1.0), vec![leaf("A", 1.0), leaf("B", 1.0)]).collapsed(), leaf("C", 1.0)],
    );
    let tree = tree(record);
    let all: Vec<&str> = tree.all_nodes_iter().map(|n| n.id()).collect();
    assert_eq!(all, vec!["R", "X", "A", "B", "C"]);
}

// --- TESTS PRINTING ---
#[test]
fn test_display_outline() {
    let tree = sample_tree();
    let printed = tree.to_string();
    let lines: Vec<&str> = printed.lines().collect();

    assert_eq!(lines[0], "Tree with 4 tips (7 nodes total):");
    assert_eq!(lines[1], "[R] \"R\"");
    assert_eq!(lines[2], "  ├─ [X] \"X\" (length: 1.000)");
    assert_eq!(lines[3], "  │  ├─ [A] \"A\" (length: 1.000)");
    assert_eq!(lines[5], "  └─ [Y] \"Y\" (length: 3.000)");
    assert_eq!(lines[7], "     └─ [D] \"D\" (length: 1.000)");
    assert_eq!(lines.len(), 8);

    assert_eq!(PhyloTree::new().to_string(), "(No root set)\n");
}
