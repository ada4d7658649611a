//! Negamax search with alpha-beta pruning.
//!
//! Produces the same best score as the plain minimax search at equal depth;
//! only the visited node count differs. The root fans out across worker
//! threads, one per root move.

use crate::errors::EngineResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::root_split::search_root_parallel;

/// Best move and score at the given depth, exploring sibling root moves in
/// parallel. Scores match `minimax::search_best_move`; tie-breaks may not.
pub fn search_best_move(
    game_state: &GameState,
    depth: u8,
    scorer: &dyn BoardScorer,
) -> EngineResult<(Move, f64)> {
    search_root_parallel(game_state, depth, scorer)
}

/// Fail-hard alpha-beta negamax value of the position for the side to move.
///
/// With a full `(-inf, inf)` window this is the exact negamax value, which
/// is how the root workers obtain minimax-equal scores for their subtrees.
pub(crate) fn analyse_position(
    game_state: &mut GameState,
    depth: u8,
    mut alpha: f64,
    beta: f64,
    scorer: &dyn BoardScorer,
) -> EngineResult<f64> {
    if depth == 0 {
        return Ok(scorer.score(game_state));
    }

    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok(if is_king_in_check(game_state, game_state.side_to_move) {
            -MATE_SCORE
        } else {
            0.0
        });
    }

    for mv in moves {
        make_move(game_state, mv)?;
        let child = analyse_position(game_state, depth - 1, -beta, -alpha, scorer);
        unmake_move(game_state)?;

        let score = -child?;
        if score >= beta {
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok(alpha)
}
