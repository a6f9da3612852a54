use thiserror::Error;

/// Result type for graph generation and min-cut operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by the generators, the contraction engine and calibration.
///
/// Every error is a rejected input: it is returned before any graph is
/// built or mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node, edge, trial or sample counts outside their valid bounds
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A graph that the operation cannot work on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Edge endpoint that is not a node of the graph
    #[error("Vertex not found: {0}")]
    VertexNotFound(usize),

    /// Calibration gave up after this many unsuccessful trials
    #[error("True min-cut not found within {0} trials")]
    TrialLimitExceeded(usize),
}

impl GraphError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        GraphError::InvalidParameter(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }
}
