use thiserror::Error;

/// Errors returned by graph queries and mutations.
///
/// Every error is raised before the graph is modified, so a failed call
/// leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A node referenced by a singular accessor or remover is absent.
    #[error("node {0} is not in the graph")]
    NodeNotFound(String),

    /// An edge (or a specific multigraph key) is absent.
    #[error("edge {0} is not in the graph")]
    EdgeNotFound(String),

    /// The operation is not supported by this kind of graph.
    #[error("{operation} is not implemented for {kind} graphs")]
    NotImplemented {
        operation: &'static str,
        kind: &'static str,
    },

    /// The graph is frozen and rejects structural mutation.
    #[error("graph is frozen and cannot be modified")]
    Frozen,

    /// A weight attribute holds a value that is not a number.
    #[error("attribute {0:?} is not numeric")]
    NotNumeric(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

impl GraphError {
    pub(crate) fn node_not_found(node: &impl std::fmt::Debug) -> Self {
        GraphError::NodeNotFound(format!("{node:?}"))
    }

    pub(crate) fn edge_not_found(
        source: &impl std::fmt::Debug,
        target: &impl std::fmt::Debug,
    ) -> Self {
        GraphError::EdgeNotFound(format!("({source:?}, {target:?})"))
    }

    pub(crate) fn keyed_edge_not_found(
        source: &impl std::fmt::Debug,
        target: &impl std::fmt::Debug,
        key: &impl std::fmt::Debug,
    ) -> Self {
        GraphError::EdgeNotFound(format!("({source:?}, {target:?}, {key:?})"))
    }

    /// Returns true for the "not found" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_) | GraphError::EdgeNotFound(_)
        )
    }
}
