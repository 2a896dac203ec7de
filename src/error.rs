use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Recoverable failures caused by bad mesh data (as opposed to programming errors, which panic)
#[derive(Debug, Error)]
pub enum MeshError {
    /// The Jacobian determinant at an integration point was zero or negative
    #[error("Element {element_id} is degenerate or inverted (det(J) = {det:e} at integration point {point_index})")]
    DegenerateElement {
        element_id: usize,
        point_index: usize,
        det: f64,
    },

    /// An Element referenced a Node key which is not in the Mesh
    #[error("Node {0} does not exist; Cannot connect Element!")]
    UnknownNode(usize),

    /// The number of Node keys did not match the Element type
    #[error("{element_type} Elements need {expected} Nodes; got {found}")]
    NodeCountMismatch {
        element_type: &'static str,
        expected: usize,
        found: usize,
    },

    /// Element type name could not be resolved
    #[error("unknown Element type: '{0}'")]
    UnknownElementType(String),

    /// Mesh description could not be parsed
    #[error("unable to parse Mesh: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MeshError {
    pub fn parse(details: impl Into<String>) -> Self {
        Self::Parse(details.into())
    }
}
