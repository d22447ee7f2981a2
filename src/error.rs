//! Error type for tree exchange and strict lookups.
//!
//! Tree operations themselves are total and signal "nothing to do" by
//! returning the tree unchanged or `None`. [TreeError] is only produced where
//! trees enter the crate (validation of [TreeNode](crate::model::TreeNode)
//! records, JSON) and by `try_*` variants that turn a missing id into an error.

use thiserror::Error;

/// Errors raised at the boundary of the tree model.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A node record has an empty id.
    #[error("node without id")]
    EmptyId,

    /// Two node records share an id.
    #[error("duplicate node id '{0}'")]
    DuplicateId(String),

    /// No node with this id exists in the tree.
    #[error("no node with id '{0}'")]
    NodeNotFound(String),

    /// The JSON text is not a valid node record.
    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}
