//! Error types.
//!
//! Only DOM mutation can fail. The template pipeline itself never returns
//! an error to callers: failures inside placement are logged and the slot
//! is skipped.

use thiserror::Error;

/// Errors raised by DOM tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The reference node is not a child of the node being mutated.
    #[error("reference node is not a child of this node")]
    NotFound,

    /// The insertion would create a cycle or put a node somewhere it cannot live.
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    /// The operation is not supported on this kind of node.
    #[error("operation not supported on {0} nodes")]
    InvalidNodeType(&'static str),
}

/// Result alias for DOM operations.
pub type DomResult<T> = Result<T, DomError>;
