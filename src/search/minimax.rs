//! Sequential negamax search without pruning.
//!
//! Serves as the correctness reference for the alpha-beta search: both must
//! agree on the best score at equal depth.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};

/// Best move and its negamax score at the given depth.
///
/// A position with no legal moves is a caller error; check
/// `is_checkmate`/`is_stalemate` first.
pub fn search_best_move(
    game_state: &GameState,
    depth: u8,
    scorer: &dyn BoardScorer,
) -> EngineResult<(Move, f64)> {
    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Err(EngineError::SearchFailed(
            "no legal moves at the search root".to_owned(),
        ));
    }

    let mut scratch = game_state.clone();
    let mut best: Option<(Move, f64)> = None;

    for mv in moves {
        make_move(&mut scratch, mv)?;
        let child = analyse_position(&mut scratch, depth.saturating_sub(1), scorer);
        unmake_move(&mut scratch)?;

        let score = -child?;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    best.ok_or_else(|| EngineError::SearchFailed("no move was scored".to_owned()))
}

/// Negamax value of the position for the side to move.
pub(crate) fn analyse_position(
    game_state: &mut GameState,
    depth: u8,
    scorer: &dyn BoardScorer,
) -> EngineResult<f64> {
    if depth == 0 {
        return Ok(scorer.score(game_state));
    }

    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        // Checkmate against the side to move, stalemate otherwise.
        return Ok(if is_king_in_check(game_state, game_state.side_to_move) {
            -MATE_SCORE
        } else {
            0.0
        });
    }

    let mut best = f64::NEG_INFINITY;
    for mv in moves {
        make_move(game_state, mv)?;
        let child = analyse_position(game_state, depth - 1, scorer);
        unmake_move(game_state)?;

        let score = -child?;
        if score > best {
            best = score;
        }
    }

    Ok(best)
}
