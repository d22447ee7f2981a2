//! Provides the arena tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - Main tree structure using the arena pattern,
//!   rooted and parent-pointing, of arbitrary degree
//! * [NodeIndex] as type used to index nodes in tree
//! * Iterators over structural children ([PreOrderIter], [PostOrderIter])
//!   and over all nodes including collapsed ones ([AllNodesIter])

use crate::model::node::{Node, NodeData, numeric_length};
use std::collections::HashSet;
use std::fmt;

/// Relative tolerance for ultrametricity checks
const ULTRAMETRIC_TOLERANCE: f64 = 1e-6;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: NodeIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree of arbitrary degree, represented using the
/// arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex],
/// so a deep copy is a plain [Clone] and no two trees ever share nodes.
/// Every tree operation of this crate takes a tree by reference and returns
/// a new, independent tree.
///
/// # Structure
/// - All nodes, including collapsed ones, are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Ids are expected to be unique within a tree; this is checked when
///   converting from a [TreeNode](crate::model::TreeNode) but not when adding
///   nodes by hand.
///
/// # Construction
/// Add nodes bottom-up with [`add_node`](Self::add_node) (children must exist
/// already), then finish with [`add_root`](Self::add_root).
///
/// ```
/// use phyroot::model::{NodeData, PhyloTree};
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_node(NodeData::new("a").with_name("A").with_length(Some(1.0)), vec![]);
/// let b = tree.add_node(NodeData::new("b").with_name("B").with_length(Some(2.0)), vec![]);
/// tree.add_root(NodeData::new("r"), vec![a, b]);
///
/// assert_eq!(tree.count_tips(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhyloTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeIndex,
}

// ============================================================================
// New, Construction, Getters / Accessors (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new empty tree without root.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with capacity for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        PhyloTree {
            nodes: Vec::with_capacity(num_nodes),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a node with the given (already added) visible children,
    /// assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `data` - Payload of the new node
    /// * `children` - Indices of visible children in display order
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_node(&mut self, data: NodeData, children: Vec<NodeIndex>) -> NodeIndex {
        let index = self.push_node(data);
        for child in children {
            self.attach_child(index, child);
        }
        index
    }

    /// Adds a collapsed node, i.e. one whose children are hidden, assigning a
    /// unique index, which gets returned.
    ///
    /// # Arguments
    /// * `data` - Payload of the new node
    /// * `hidden_children` - Indices of collapsed children in display order
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_collapsed_node(&mut self, data: NodeData, hidden_children: Vec<NodeIndex>) -> NodeIndex {
        let index = self.push_node(data);
        for child in hidden_children {
            self.attach_hidden_child(index, child);
        }
        index
    }

    /// Adds a node with the given children and makes it the root.
    ///
    /// # Returns
    /// The index of the newly created root.
    pub fn add_root(&mut self, data: NodeData, children: Vec<NodeIndex>) -> NodeIndex {
        let index = self.add_node(data, children);
        self.set_root(index);
        index
    }

    /// Declares the node at `index` to be the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_root(&mut self, index: NodeIndex) {
        self.nodes[index].set_parent(None);
        self.root_index = index;
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if the root hasn't been set.
    pub fn root(&self) -> &Node {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        self.root_index
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self[index]
    }

    /// Returns a mutable reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Returns the number of nodes stored in the arena,
    /// including collapsed ones.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the structural children of the node at `index`:
    /// visible children if any, else collapsed children.
    pub fn structural_children(&self, index: NodeIndex) -> &[NodeIndex] {
        self[index].structural_children()
    }

    /// Finds a node by id, searching visible **and** collapsed subtrees.
    ///
    /// # Returns
    /// `None` if no node reachable from the root carries `id`.
    pub fn find_node_by_id(&self, id: &str) -> Option<&Node> {
        self.find_index_by_id(id).map(|index| &self[index])
    }

    /// Finds the index of a node by id, searching visible **and**
    /// collapsed subtrees.
    pub fn find_index_by_id(&self, id: &str) -> Option<NodeIndex> {
        if id.is_empty() {
            return None;
        }
        self.all_nodes_iter()
            .find(|node| node.id() == id)
            .map(Node::index)
    }

    /// Returns the ids of all nodes reachable from the root,
    /// including collapsed ones.
    pub fn ids(&self) -> HashSet<&str> {
        self.all_nodes_iter().map(Node::id).collect()
    }

    /// Returns the number of tips, counted via structural children.
    pub fn count_tips(&self) -> usize {
        self.pre_order_iter().filter(|node| node.is_tip()).count()
    }

    /// Returns the number of nodes, counted via structural children.
    pub fn count_nodes(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns the ids of all tips in pre-order.
    pub fn tip_ids(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|node| node.is_tip())
            .map(Node::id)
            .collect()
    }

    /// Returns the sum of all specified, finite branch lengths below the root.
    pub fn total_branch_length(&self) -> f64 {
        self.pre_order_iter()
            .filter(|node| node.index() != self.root_index)
            .filter_map(Node::length)
            .filter(|l| l.is_finite())
            .sum()
    }

    /// Checks whether every non-tip node has exactly two structural children.
    ///
    /// # Returns
    /// `None` if the tree has no root.
    pub fn is_bifurcating(&self) -> Option<bool> {
        if !self.is_root_set() {
            return None;
        }
        Some(self.pre_order_iter().all(|node| {
            let degree = node.structural_children().len();
            degree == 0 || degree == 2
        }))
    }

    /// Checks if the tree is ultrametric (all tips equidistant from root),
    /// using structural children and treating missing lengths as 1.
    ///
    /// # Returns
    /// `None` if there are fewer than two tips, otherwise whether the
    /// root-to-tip distances agree within a relative tolerance.
    pub fn is_ultrametric(&self) -> Option<bool> {
        if !self.is_root_set() {
            return None;
        }

        let mut depth = vec![0.0; self.nodes.len()];
        let mut min_depth = f64::INFINITY;
        let mut max_depth = f64::NEG_INFINITY;
        let mut num_tips = 0;
        for node in self.pre_order_iter() {
            if let Some(parent) = node.parent() {
                depth[node.index()] = depth[parent] + numeric_length(node.length());
            }
            if node.is_tip() {
                num_tips += 1;
                min_depth = min_depth.min(depth[node.index()]);
                max_depth = max_depth.max(depth[node.index()]);
            }
        }

        if num_tips < 2 {
            return None;
        }
        let scale = 1.0_f64.max(max_depth.abs()).max(min_depth.abs());
        Some((max_depth - min_depth).abs() <= scale * ULTRAMETRIC_TOLERANCE)
    }

    /// Promotes every collapsed slot in the tree back to visible children and
    /// removes the collapsed slots, so that the full topology is visible.
    pub fn expand_all_collapsed(&mut self) {
        if !self.is_root_set() {
            return;
        }
        let reachable: Vec<NodeIndex> = self.all_nodes_iter().map(Node::index).collect();
        for index in reachable {
            self.nodes[index].expand();
        }
    }

    /// Returns a copy of this tree with all collapsed subtrees expanded.
    pub fn expanded(&self) -> PhyloTree {
        let mut tree = self.clone();
        tree.expand_all_collapsed();
        tree
    }
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Arena surgery (crate)
// ============================================================================
impl PhyloTree {
    /// Appends a detached node to the arena.
    pub(crate) fn push_node(&mut self, data: NodeData) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, data));
        index
    }

    /// Appends `child` to the visible children of `parent`.
    pub(crate) fn attach_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[child].set_parent(Some(parent));
        self.nodes[parent].children_mut().push(child);
    }

    /// Appends `child` to the collapsed children of `parent`.
    pub(crate) fn attach_hidden_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[child].set_parent(Some(parent));
        self.nodes[parent]
            .collapsed_children_mut()
            .get_or_insert_with(Vec::new)
            .push(child);
    }

    /// Copies the subtree of `source` rooted at `source_index` into this
    /// arena, keeping collapsed slots. The copy is left detached.
    ///
    /// # Returns
    /// The index of the copied subtree root in this tree.
    pub(crate) fn graft(&mut self, source: &PhyloTree, source_index: NodeIndex) -> NodeIndex {
        let mut top = NO_ROOT_SET_INDEX;
        // (index in source, parent in self, attach as hidden child)
        let mut stack = vec![(source_index, None, false)];
        while let Some((index, parent, hidden)) = stack.pop() {
            let node = &source[index];
            let copy = self.push_node(node.data().clone());
            match parent {
                None => top = copy,
                Some(p) if hidden => self.attach_hidden_child(p, copy),
                Some(p) => self.attach_child(p, copy),
            }
            if let Some(hidden_children) = node.collapsed_children() {
                stack.extend(hidden_children.iter().rev().map(|&c| (c, Some(copy), true)));
            }
            stack.extend(node.children().iter().rev().map(|&c| (c, Some(copy), false)));
        }
        top
    }

    /// Returns a copy of this tree holding only the nodes reachable from
    /// the root, re-indexed in pre-order.
    pub(crate) fn compacted(&self) -> PhyloTree {
        let mut tree = PhyloTree::with_capacity(self.nodes.len());
        if self.is_root_set() {
            let root = tree.graft(self, self.root_index);
            tree.set_root(root);
        }
        tree
    }
}

impl std::ops::Index<NodeIndex> for PhyloTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeIndex> for PhyloTree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
/// Visual representation of the tree.
///
/// # Example Output
/// ```text
/// Tree with 3 tips (5 nodes total):
/// [r]
///   ├─ [x] "X" (length: 0.300)
///   │  ├─ [a] "A" (length: 0.100)
///   │  └─ [b] "B" (length: 0.200)
///   └─ [c] "C" (length: 0.400)
/// ```
impl fmt::Display for PhyloTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_root_set() {
            return writeln!(f, "(No root set)");
        }
        writeln!(
            f,
            "Tree with {} tips ({} nodes total):",
            self.count_tips(),
            self.count_nodes()
        )?;

        // (index, prefix of this line, is last sibling)
        let mut stack = vec![(self.root_index, String::new(), true)];
        while let Some((index, prefix, is_last)) = stack.pop() {
            let node = &self[index];
            let is_root = index == self.root_index;
            let connector = match (is_root, is_last) {
                (true, _) => "",
                (false, true) => "└─ ",
                (false, false) => "├─ ",
            };

            write!(f, "{}{}[{}]", prefix, connector, node.id())?;
            if !node.name().is_empty() {
                write!(f, " \"{}\"", node.name())?;
            }
            match node.length() {
                Some(length) => write!(f, " (length: {:.3})", length)?,
                None if !is_root => write!(f, " (no length)")?,
                None => {}
            }
            if node.is_collapsed() {
                let hidden = node.collapsed_children().map_or(0, <[NodeIndex]>::len);
                write!(f, " [collapsed: {} hidden]", hidden)?;
            }
            writeln!(f)?;

            if node.is_collapsed() {
                continue;
            }
            let child_prefix = if is_root {
                "  ".to_string()
            } else {
                format!("{}{}  ", prefix, if is_last { " " } else { "│" })
            };
            let children = node.children();
            for (position, &child) in children.iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), position + 1 == children.len()));
            }
        }
        Ok(())
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before
    /// parents), following structural children.
    ///
    /// # Example
    /// ```
    /// use phyroot::model::{NodeData, PhyloTree};
    ///
    /// let mut tree = PhyloTree::new();
    /// let a = tree.add_node(NodeData::new("a"), vec![]);
    /// let b = tree.add_node(NodeData::new("b"), vec![]);
    /// tree.add_root(NodeData::new("r"), vec![a, b]);
    ///
    /// let ids: Vec<_> = tree.post_order_iter().map(|n| n.id()).collect();
    /// assert_eq!(ids, vec!["a", "b", "r"]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before
    /// children), following structural children.
    ///
    /// # Example
    /// ```
    /// use phyroot::model::{NodeData, PhyloTree};
    ///
    /// let mut tree = PhyloTree::new();
    /// let a = tree.add_node(NodeData::new("a"), vec![]);
    /// let b = tree.add_node(NodeData::new("b"), vec![]);
    /// tree.add_root(NodeData::new("r"), vec![a, b]);
    ///
    /// let ids: Vec<_> = tree.pre_order_iter().map(|n| n.id()).collect();
    /// assert_eq!(ids, vec!["r", "a", "b"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over every node reachable from the root in
    /// pre-order, descending into visible **and** collapsed children.
    pub fn all_nodes_iter(&self) -> AllNodesIter<'_> {
        AllNodesIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_tip() {
                return Some(node);
            }

            self.stack.push((index, true));
            // Push children reversed, so first child is processed first
            for &child in node.structural_children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];
        self.stack
            .extend(node.structural_children().iter().rev().copied());
        Some(node)
    }
}

/// Iterator over all nodes reachable from the root, including those in
/// collapsed slots. Visible children come before collapsed ones.
pub struct AllNodesIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<NodeIndex>,
}

impl<'a> AllNodesIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        AllNodesIter { tree, stack }
    }
}

impl<'a> Iterator for AllNodesIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];
        if let Some(hidden) = node.collapsed_children() {
            self.stack.extend(hidden.iter().rev().copied());
        }
        self.stack.extend(node.children().iter().rev().copied());
        Some(node)
    }
}
