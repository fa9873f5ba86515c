//! Error types for Rule Lattice.

use thiserror::Error;

/// The main error type for Rule Lattice operations.
#[derive(Error, Debug)]
pub enum LatticeError {
    /// The row decorator factory failed to build a decorator for a row.
    ///
    /// This is fatal for that row's render only; the list itself stays usable.
    #[error("failed to build decorator for row {row}: {source}")]
    DecoratorFactory {
        /// The 0-based row whose decorator could not be built.
        row: usize,
        /// The factory's own error.
        #[source]
        source: DecoratorError,
    },

    /// Signal-related error.
    #[error("signal error: {0}")]
    Signal(#[from] SignalError),
}

/// Errors reported by a row decorator factory.
#[derive(Error, Debug)]
pub enum DecoratorError {
    /// The rule cannot be represented by this factory.
    #[error("rule cannot be rendered: {0}")]
    Unrenderable(String),

    /// Any other collaborator failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Signal-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection ID")]
    InvalidConnection,
}

/// A specialized Result type for Rule Lattice operations.
pub type Result<T> = std::result::Result<T, LatticeError>;
