use thiserror::Error;

/// Errors raised by graph operations and the minimum-cut algorithm.
///
/// Every variant reports a caller-input or precondition violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A topology operation referenced a node that is not in the graph.
    #[error("node is not in the graph")]
    NodeNotFound,

    /// A topology operation referenced an edge that is not in the graph.
    #[error("edge is not in the graph")]
    EdgeNotFound,

    /// The connectivity check was invoked on a graph with no nodes.
    #[error("graph is empty")]
    EmptyGraph,

    /// Minimum cut was invoked on a graph with fewer than two nodes.
    #[error("graph has less than two nodes")]
    InsufficientNodes,

    /// Minimum cut was invoked on a disconnected graph.
    #[error("graph is not connected")]
    NotConnected,

    /// Minimum cut was invoked with a negative edge weight.
    #[error("graph has a negative-weight edge")]
    NegativeWeight,
}

/// Result type for graph and minimum-cut operations.
pub type Result<T> = std::result::Result<T, Error>;
