//! Error kinds for the rules engine, the evaluator, and search.
//!
//! Each failure is a distinct variant so callers can branch on the cause:
//! an illegal move is routine and recoverable, while `GoError::Unknown`
//! means the board logic itself is broken.

use thiserror::Error;

/// Failures raised by the board, move, and game layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GoError {
    /// Board is not square, or its size lies outside 3..=19, or a coordinate is off the board.
    #[error("board must be square with a size between 3 and 19, and moves must lie on it")]
    Init,
    /// Internal consistency failure (a freshly built group could not be removed).
    #[error("board state is inconsistent")]
    Unknown,
    /// Move is not in the legal-move list for the current position.
    #[error("move is not legal in the current position")]
    BadMove,
}

/// Failures raised by the neural network evaluator and weight persistence.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Network requested for a board size outside 3..=19.
    #[error("network board size must be between 3 and 19")]
    Init,
    /// Board size is not one of the odd segment sizes 3, 5, ..., 19.
    #[error("board size {0} is not a valid segment size")]
    Segment(usize),
    /// Input shape does not match the network topology.
    #[error("feed forward input does not match the network shape")]
    FeedForward,
    /// Imported layer count differs from this network's.
    #[error("layer count mismatch: expected {expected}, found {found}")]
    LayerCount { expected: usize, found: usize },
    /// Imported layer widths differ from this network's.
    #[error("neuron count mismatch: expected {expected:?}, found {found:?}")]
    NeuronCount {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// Weight stream ended early or contained something unparsable.
    #[error("weight stream is malformed")]
    Malformed,
    /// Source and destination networks cannot be scaled into one another.
    #[error("can only scale from a board exactly 2 smaller with the same uniform setting")]
    Scale,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Union of the two layers, used where both can fail (search).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Go(#[from] GoError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}
