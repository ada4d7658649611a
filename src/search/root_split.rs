//! Parallel root-move fan-out.
//!
//! Each root move is explored by its own worker on a private clone of the
//! position; workers report `(root index, score)` over a channel and the
//! orchestrator joins the scope before selecting the best result. Ties
//! resolve to the lowest generation index so the selection is deterministic.

use std::sync::mpsc;
use std::thread;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta;
use crate::search::board_scoring::BoardScorer;

pub fn search_root_parallel(
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

    let mut scores: Vec<Option<f64>> = vec![None; moves.len()];

    thread::scope(|scope| -> EngineResult<()> {
        let (sender, receiver) = mpsc::channel::<(usize, EngineResult<f64>)>();

        for (index, &mv) in moves.iter().enumerate() {
            let sender = sender.clone();
            let mut worker_state = game_state.clone();

            scope.spawn(move || {
                let result = make_move(&mut worker_state, mv).and_then(|()| {
                    alpha_beta::analyse_position(
                        &mut worker_state,
                        depth.saturating_sub(1),
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        scorer,
                    )
                    .map(|child_score| -child_score)
                });
                // Send failures only occur when the orchestrator has
                // already bailed out with an error of its own.
                let _ = sender.send((index, result));
            });
        }
        drop(sender);

        for (index, result) in receiver {
            scores[index] = Some(result?);
        }

        Ok(())
    })?;

    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.iter().enumerate() {
        let score = score.ok_or_else(|| {
            EngineError::WorkerFailed(format!("root move {index} reported no score"))
        })?;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, score)| (moves[index], score))
        .ok_or_else(|| EngineError::SearchFailed("no move was scored".to_owned()))
}
