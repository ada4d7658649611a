//! Errors used throughout the chess engine.
//!
//! A single error type is returned by parsing utilities, move application,
//! move generation, and search so failures propagate with `?` and callers
//! can match on the specific failure mode. Variants carry contextual text
//! where it aids diagnostics.

use std::error::Error;
use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A FEN string was malformed; no position was constructed.
    PositionParse(String),

    /// Move text did not match the `<from><to>[promotion]` shape or did not
    /// correspond to a piece of the side to move.
    MoveParse(String),

    /// A move was applied that could not have come from the legal move
    /// generator. Indicates a programming error in the caller.
    IllegalMove(String),

    /// `unmake_move` was called with an empty history stack. Indicates a
    /// programming error in the caller.
    HistoryUnderflow,

    /// A search was requested on a position it cannot handle, e.g. one with
    /// no legal moves at the root.
    SearchFailed(String),

    /// A worker thread panicked or its result channel was dropped.
    WorkerFailed(String),

    /// The game state is internally inconsistent, e.g. a side has no king.
    InvalidState(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::PositionParse(msg) => write!(f, "invalid FEN: {msg}"),
            EngineError::MoveParse(msg) => write!(f, "invalid move text: {msg}"),
            EngineError::IllegalMove(msg) => write!(f, "illegal move application: {msg}"),
            EngineError::HistoryUnderflow => {
                write!(f, "unmake_move called with empty history stack")
            }
            EngineError::SearchFailed(msg) => write!(f, "search failed: {msg}"),
            EngineError::WorkerFailed(msg) => write!(f, "worker thread failed: {msg}"),
            EngineError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for EngineError {}
