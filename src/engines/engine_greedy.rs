//! Capture-preferring engine.
//!
//! Samples uniformly among capturing moves when any exist, otherwise
//! uniformly among all legal moves.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::is_capture;

pub struct GreedyEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Quince Greedy"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        _params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(game_state)?;

        let mut out = EngineOutput::default();
        if legal_moves.is_empty() {
            return Ok(out);
        }

        let captures: Vec<Move> = legal_moves
            .iter()
            .copied()
            .filter(|&mv| is_capture(mv))
            .collect();

        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {} captures {}",
            legal_moves.len(),
            captures.len()
        ));

        let pool = if captures.is_empty() {
            legal_moves.as_slice()
        } else {
            captures.as_slice()
        };

        let picked = pool
            .choose(&mut self.rng)
            .ok_or_else(|| EngineError::SearchFailed("failed to sample a move".to_owned()))?;

        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::GreedyEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::is_capture;

    #[test]
    fn always_picks_a_capture_when_one_exists() {
        // The only capture is exd5; any seed must find a capture.
        let game = GameState::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        )
        .expect("FEN should parse");

        for seed in 0..8u64 {
            let out = GreedyEngine::with_seed(seed)
                .choose_move(&game, &GoParams::default())
                .expect("choose_move should succeed");
            let mv = out.best_move.expect("a move should be chosen");
            assert!(is_capture(mv));
        }
    }

    #[test]
    fn falls_back_to_any_move_without_captures() {
        let game = GameState::new_game();

        let out = GreedyEngine::with_seed(3)
            .choose_move(&game, &GoParams::default())
            .expect("choose_move should succeed");
        assert!(out.best_move.is_some());
    }
}
