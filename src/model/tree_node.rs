//! Nested node records exchanged with parsers and renderers.
//!
//! Format parsers (Newick, NEXUS, PhyloXML, NeXML) live outside this crate.
//! They hand over trees as nested [TreeNode] records, typically as JSON:
//!
//! ```json
//! {
//!   "id": "n0", "name": "", "length": null, "start": 0, "end": 23,
//!   "children": [
//!     { "id": "n1", "name": "A", "length": 0.1, "children": [] },
//!     { "id": "n2", "name": "B", "length": null, "children": [],
//!       "_collapsedChildren": [ ... ] }
//!   ]
//! }
//! ```
//!
//! `length: null` means unspecified and is kept as such in both directions.
//! Conversion to and from [PhyloTree] is iterative, so deep trees do not
//! exhaust the stack.

use crate::error::TreeError;
use crate::model::node::{NodeData, SourceSpan};
use crate::model::tree::{NodeIndex, PhyloTree};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =#========================================================================#=
// TREE NODE
// =#========================================================================#=
/// A node together with its whole subtree, in the shape external parsers
/// produce and renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique, non-empty id
    pub id: String,
    /// Display name, possibly empty
    #[serde(default)]
    pub name: String,
    /// Length of incoming branch; `None` serializes as `null`
    #[serde(default)]
    pub length: Option<f64>,
    /// Visible children in display order
    #[serde(default)]
    pub children: Vec<TreeNode>,
    /// Collapsed (hidden) children, if the node is collapsed
    #[serde(
        default,
        rename = "_collapsedChildren",
        skip_serializing_if = "Option::is_none"
    )]
    pub collapsed_children: Option<Vec<TreeNode>>,
    /// Source start offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// Source end offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl TreeNode {
    /// Creates a node without name, length and children.
    pub fn new<S: Into<String>>(id: S) -> Self {
        TreeNode {
            id: id.into(),
            name: String::new(),
            length: None,
            children: Vec::new(),
            collapsed_children: None,
            start: None,
            end: None,
        }
    }

    /// Sets the display name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the branch length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the visible children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Moves the visible children into the collapsed slot.
    pub fn collapsed(mut self) -> Self {
        self.collapsed_children = Some(std::mem::take(&mut self.children));
        self
    }

    /// Sets the source span.
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    fn node_data(&self) -> NodeData {
        NodeData {
            id: self.id.clone(),
            name: self.name.clone(),
            length: self.length,
            span: SourceSpan {
                start: self.start,
                end: self.end,
            },
        }
    }

    fn from_node_data(data: &NodeData) -> Self {
        TreeNode {
            id: data.id.clone(),
            name: data.name.clone(),
            length: data.length,
            children: Vec::new(),
            collapsed_children: None,
            start: data.span.start,
            end: data.span.end,
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================
impl TryFrom<&TreeNode> for PhyloTree {
    type Error = TreeError;

    /// Builds an arena tree from nested records, validating that every id is
    /// non-empty and unique.
    fn try_from(record: &TreeNode) -> Result<Self, Self::Error> {
        let mut tree = PhyloTree::new();
        let mut seen: HashSet<&str> = HashSet::new();

        // (record, parent in tree, attach as hidden child)
        let mut stack: Vec<(&TreeNode, Option<NodeIndex>, bool)> = vec![(record, None, false)];
        while let Some((current, parent, hidden)) = stack.pop() {
            if current.id.is_empty() {
                return Err(TreeError::EmptyId);
            }
            if !seen.insert(current.id.as_str()) {
                return Err(TreeError::DuplicateId(current.id.clone()));
            }

            let index = tree.push_node(current.node_data());
            match parent {
                None => tree.set_root(index),
                Some(p) if hidden => tree.attach_hidden_child(p, index),
                Some(p) => tree.attach_child(p, index),
            }

            if let Some(hidden_children) = &current.collapsed_children {
                stack.extend(hidden_children.iter().rev().map(|c| (c, Some(index), true)));
            }
            stack.extend(current.children.iter().rev().map(|c| (c, Some(index), false)));
        }

        Ok(tree)
    }
}

impl TryFrom<TreeNode> for PhyloTree {
    type Error = TreeError;

    fn try_from(record: TreeNode) -> Result<Self, Self::Error> {
        PhyloTree::try_from(&record)
    }
}

impl PhyloTree {
    /// Converts this tree into nested records, keeping collapsed slots.
    ///
    /// # Returns
    /// `None` if the tree has no root.
    pub fn to_tree_node(&self) -> Option<TreeNode> {
        if !self.is_root_set() {
            return None;
        }

        // Finished subtrees, parked until their parent is assembled
        let mut built: Vec<Option<TreeNode>> = vec![None; self.arena_len()];
        let mut stack = vec![(self.root_index(), false)];
        while let Some((index, children_done)) = stack.pop() {
            let node = &self[index];
            let hidden = node.collapsed_children().unwrap_or(&[]);
            if !children_done {
                stack.push((index, true));
                for &child in node.children().iter().chain(hidden) {
                    stack.push((child, false));
                }
                continue;
            }

            let mut record = TreeNode::from_node_data(node.data());
            record.children = node
                .children()
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            if node.collapsed_children().is_some() {
                record.collapsed_children =
                    Some(hidden.iter().filter_map(|&c| built[c].take()).collect());
            }
            built[index] = Some(record);
        }

        built[self.root_index()].take()
    }

    /// Parses a tree from the JSON form of a [TreeNode].
    ///
    /// Nesting depth is unbounded; deep records (e.g. caterpillar trees)
    /// grow the stack on the heap instead of hitting a recursion limit.
    ///
    /// # Errors
    /// [TreeError::Json] if the text is not a valid record,
    /// [TreeError::EmptyId] or [TreeError::DuplicateId] if ids are not usable.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let mut json_deserializer = serde_json::Deserializer::from_str(json);
        json_deserializer.disable_recursion_limit();
        let record = TreeNode::deserialize(serde_stacker::Deserializer::new(&mut json_deserializer))?;
        json_deserializer.end()?;
        PhyloTree::try_from(&record)
    }

    /// Serializes this tree as compact JSON [TreeNode].
    /// A tree without root serializes as `null`.
    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(&self.to_tree_node())?)
    }

    /// Serializes this tree as indented JSON [TreeNode].
    /// A tree without root serializes as `null`.
    pub fn to_json_pretty(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(&self.to_tree_node())?)
    }
}
