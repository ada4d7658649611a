//! Move generator abstraction.
//!
//! Engines and search code depend on this trait rather than a concrete
//! generator so the legal generator can be swapped or mocked in tests.

use crate::errors::EngineResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

pub trait MoveGenerator: Send + Sync {
    /// Produce the exhaustive legal move list for the side to move.
    ///
    /// Moves are returned in board-scan order (source square ascending,
    /// destinations in set-bit order); callers must not rely on ordering.
    fn generate_legal_moves(&self, game_state: &GameState) -> EngineResult<Vec<Move>>;
}
