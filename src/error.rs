use thiserror::Error;

/// Recoverable failures reported by the simulator.
///
/// Numeric blow-up during firing is deliberately absent: a non-finite
/// potential aborts the process (see `Connection::fire`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// A grid's `(rows, cols)` disagrees with the layer it is applied to.
    #[error("grid shape {found:?} does not match layer shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("network has no layers")]
    EmptyNetwork,

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training set has zero total weight")]
    ZeroTotalWeight,

    /// Example weights must be finite and non-negative.
    #[error("invalid example weight {0}")]
    InvalidWeight(f64),

    #[error("grid rows have differing lengths")]
    RaggedGrid,

    /// Layers or connections of a loaded network refer to neurons or
    /// connections that do not line up with the graph.
    #[error("inconsistent network topology: {0}")]
    InconsistentTopology(String),
}
