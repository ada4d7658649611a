//! Perft: exhaustive leaf-node counting used to validate move generation
//! against known reference values.

use std::sync::mpsc;
use std::thread;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

/// Count leaf nodes at exactly `depth` plies below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> EngineResult<u64> {
    let mut scratch = game_state.clone();
    perft_node(&mut scratch, depth)
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> EngineResult<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    let mut scratch = game_state.clone();
    let mut counts = Vec::with_capacity(moves.len());

    for mv in moves {
        make_move(&mut scratch, mv)?;
        let nodes = perft_node(&mut scratch, depth - 1);
        unmake_move(&mut scratch)?;
        counts.push((mv, nodes?));
    }

    Ok(counts)
}

/// Parallel perft: one worker per root move, each descending on its own
/// cloned state, results gathered over a channel and joined.
pub fn perft_parallel(game_state: &GameState, depth: u8) -> EngineResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    let (sender, receiver) = mpsc::channel::<EngineResult<u64>>();
    let mut handles = Vec::with_capacity(moves.len());

    for mv in moves {
        let sender = sender.clone();
        let mut worker_state = game_state.clone();

        handles.push(thread::spawn(move || {
            let result = make_move(&mut worker_state, mv)
                .and_then(|()| perft_node(&mut worker_state, depth - 1));
            // A dropped receiver only happens if the orchestrator bailed.
            let _ = sender.send(result);
        }));
    }
    drop(sender);

    let mut total = 0u64;
    for result in receiver {
        total += result?;
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| EngineError::WorkerFailed("perft worker panicked".to_owned()))?;
    }

    Ok(total)
}

fn perft_node(game_state: &mut GameState, depth: u8) -> EngineResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = LegalMoveGenerator.generate_legal_moves(game_state)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        make_move(game_state, mv)?;
        let child = perft_node(game_state, depth - 1);
        unmake_move(game_state)?;
        nodes += child?;
    }

    Ok(nodes)
}
