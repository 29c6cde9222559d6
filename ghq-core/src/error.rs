//! Error taxonomy for the rules engine

use thiserror::Error;

/// Errors reported by the rules engine.
///
/// None of these are transient: every variant is a contract violation that
/// the caller must handle (usually by choosing another action or fixing the
/// supplied position).
#[derive(Debug, Error)]
pub enum GhqError {
    /// The proposed action is not among the allowed moves of the position.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// The caller supplied a board, reserve or coordinate that breaks a
    /// model invariant.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// Both headquarters are missing from the board.
    #[error("ambiguous terminal state: both HQs are off the board")]
    AmbiguousTerminalState,

    #[error("failed to read setup: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse setup: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GhqError>;
