#![allow(dead_code)]

use phyroot::PhyloTree;
use phyroot::model::TreeNode;

/// Tip whose id and name are both `name`.
pub fn leaf(name: &str, length: f64) -> TreeNode {
    TreeNode::new(name).with_name(name).with_length(length)
}

/// Inner node whose id and name are both `name`.
pub fn clade(name: &str, length: Option<f64>, children: Vec<TreeNode>) -> TreeNode {
    let mut node = TreeNode::new(name).with_name(name).with_children(children);
    node.length = length;
    node
}

/// `((A:1,B:1)X:1,(C:1,D:1)Y:3)R`
pub fn sample_record() -> TreeNode {
    clade(
        "R",
        None,
        vec![
            clade("X", Some(1.0), vec![leaf("A", 1.0), leaf("B", 1.0)]),
            clade("Y", Some(3.0), vec![leaf("C", 1.0), leaf("D", 1.0)]),
        ],
    )
}

pub fn sample_tree() -> PhyloTree {
    PhyloTree::try_from(&sample_record()).unwrap()
}

/// Builds a tree from a record, panicking on invalid ids.
pub fn tree(record: TreeNode) -> PhyloTree {
    PhyloTree::try_from(record).unwrap()
}

/// Ids of the children of node `id`, in display order.
pub fn child_ids<'a>(tree: &'a PhyloTree, id: &str) -> Vec<&'a str> {
    let node = tree.find_node_by_id(id).unwrap();
    node.children().iter().map(|&c| tree[c].id()).collect()
}

/// Sorted tip ids.
pub fn sorted_tips(tree: &PhyloTree) -> Vec<String> {
    let mut tips: Vec<String> = tree.tip_ids().into_iter().map(String::from).collect();
    tips.sort();
    tips
}

pub fn length_of(tree: &PhyloTree, id: &str) -> Option<f64> {
    tree.find_node_by_id(id).unwrap().length()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
