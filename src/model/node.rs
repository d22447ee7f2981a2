//! Node module for phylogenetic tree representation.

use crate::model::tree::NodeIndex;

/// Weight substituted for a missing or non-finite branch length
/// whenever a distance has to be accumulated.
pub const DEFAULT_EDGE_LENGTH: f64 = 1.0;

// =#========================================================================#=
// SOURCE SPAN
// =#========================================================================#=
/// Opaque position of a node in the text it was parsed from.
///
/// Only carried along for callers (e.g. editor highlighting),
/// never interpreted by any tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Start offset, if known
    pub start: Option<usize>,
    /// End offset, if known
    pub end: Option<usize>,
}

impl SourceSpan {
    /// Creates a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        SourceSpan {
            start: Some(start),
            end: Some(end),
        }
    }
}

// =#========================================================================#=
// NODE DATA
// =#========================================================================#=
/// Payload of a node: everything that travels with a node when a tree is
/// rebuilt around a new root.
///
/// # Invariants
/// - `id` is unique within one tree and stable across clones and rerooting
/// - `length` is the length of the branch to the parent;
///   `None` means unspecified, which is not the same as zero
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Identity of the node
    pub id: String,
    /// Display name, possibly empty
    pub name: String,
    /// Length of incoming branch (distance to parent)
    pub length: Option<f64>,
    /// Source position metadata
    pub span: SourceSpan,
}

impl NodeData {
    /// Creates node data with the given id, an empty name,
    /// no branch length and no source span.
    pub fn new<S: Into<String>>(id: S) -> Self {
        NodeData {
            id: id.into(),
            name: String::new(),
            length: None,
            span: SourceSpan::default(),
        }
    }

    /// Sets the display name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the branch length.
    pub fn with_length(mut self, length: Option<f64>) -> Self {
        self.length = length;
        self
    }

    /// Sets the source span.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }
}

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node in a phylogenetic tree stored in a
/// [PhyloTree](crate::model::PhyloTree) arena.
///
/// A node has an ordered list of visible children and optionally an ordered
/// list of collapsed children, which are hidden from traversal and layout but
/// kept for re-expansion. In a steady state at most one of the two is
/// non-empty.
///
/// # Invariants
/// - `index` is the position of this node in the arena
/// - `parent` is `None` exactly for the root (and for nodes not yet attached
///   during construction)
/// - Children order is display order and is preserved by all operations
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    index: NodeIndex,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    collapsed_children: Option<Vec<NodeIndex>>,
    data: NodeData,
}

impl Node {
    /// Creates a new node without parent and children.
    pub(crate) fn new(index: NodeIndex, data: NodeData) -> Self {
        Node {
            index,
            parent: None,
            children: Vec::new(),
            collapsed_children: None,
            data,
        }
    }

    /// Returns the index of this node in its tree.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the id of this node.
    pub fn id(&self) -> &str {
        &self.data.id
    }

    /// Returns the display name of this node (possibly empty).
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Returns the length of the incoming branch, if specified.
    pub fn length(&self) -> Option<f64> {
        self.data.length
    }

    /// Returns the source span metadata.
    pub fn span(&self) -> SourceSpan {
        self.data.span
    }

    /// Returns the payload of this node.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Sets the display name.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.data.name = name.into();
    }

    /// Sets the length of the incoming branch.
    pub fn set_length(&mut self, length: Option<f64>) {
        self.data.length = length;
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    /// Returns the visible children.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeIndex> {
        &mut self.children
    }

    /// Returns the collapsed children, if this node holds a collapsed slot.
    pub fn collapsed_children(&self) -> Option<&[NodeIndex]> {
        self.collapsed_children.as_deref()
    }

    pub(crate) fn collapsed_children_mut(&mut self) -> &mut Option<Vec<NodeIndex>> {
        &mut self.collapsed_children
    }

    /// Returns the children relevant for traversal: the visible children if
    /// there are any, else the collapsed children, else nothing.
    pub fn structural_children(&self) -> &[NodeIndex] {
        if !self.children.is_empty() {
            return &self.children;
        }
        self.collapsed_children.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if this node has no structural children.
    pub fn is_tip(&self) -> bool {
        self.structural_children().is_empty()
    }

    /// Returns `true` if this node currently hides collapsed children.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed_children
            .as_ref()
            .is_some_and(|hidden| !hidden.is_empty())
    }

    /// Returns `true` if the node has visible or collapsed children,
    /// i.e. collapsing or expanding it would change something.
    pub fn can_toggle_collapse(&self) -> bool {
        !self.children.is_empty() || self.is_collapsed()
    }

    /// Returns `true` if [`reverse_children`](Self::reverse_children) would
    /// change the order of either child slot.
    pub fn can_swap(&self) -> bool {
        self.children.len() >= 2
            || self
                .collapsed_children
                .as_ref()
                .is_some_and(|hidden| hidden.len() >= 2)
    }

    /// Collapses this node if it has visible children or expands it if it has
    /// collapsed children. No-op on a node without any children.
    pub fn toggle_collapse(&mut self) {
        if self.is_collapsed() {
            self.children = self.collapsed_children.take().unwrap_or_default();
        } else if !self.children.is_empty() {
            self.collapsed_children = Some(std::mem::take(&mut self.children));
        }
    }

    /// Moves collapsed children (if any) back to the visible children and
    /// removes the collapsed slot.
    pub fn expand(&mut self) {
        if let Some(hidden) = self.collapsed_children.take() {
            // Both slots only coexist mid-toggle; keep every child.
            self.children.extend(hidden);
        }
    }

    /// Reverses the order of the visible children if there are at least two,
    /// otherwise of the collapsed children if there are at least two.
    pub fn reverse_children(&mut self) {
        if self.children.len() >= 2 {
            self.children.reverse();
        } else if let Some(hidden) = self.collapsed_children.as_mut() {
            if hidden.len() >= 2 {
                hidden.reverse();
            }
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH HELPERS
// =#========================================================================#=
/// Returns the weight of a branch for distance computations:
/// finite lengths clamped at zero, anything else [DEFAULT_EDGE_LENGTH].
pub fn numeric_length(length: Option<f64>) -> f64 {
    match length {
        Some(l) if l.is_finite() => l.max(0.0),
        _ => DEFAULT_EDGE_LENGTH,
    }
}

/// Merges the lengths of two consecutive branches into one.
///
/// Missing or non-finite values are skipped; if both are missing,
/// the merged branch has no length either.
pub fn merge_lengths(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let a = a.filter(|l| l.is_finite());
    let b = b.filter(|l| l.is_finite());
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
