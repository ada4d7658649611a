//! Uniform random-move engine.
//!
//! Selects uniformly from the legal moves; used for diagnostics,
//! integration testing, and the lowest skill level.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible tests and matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Quince Random"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        _params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(game_state)?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let picked = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or_else(|| EngineError::SearchFailed("failed to sample a move".to_owned()))?;

        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;

    #[test]
    fn seeded_engine_is_reproducible() {
        let game = GameState::new_game();

        let first = RandomEngine::with_seed(17)
            .choose_move(&game, &GoParams::default())
            .expect("choose_move should succeed");
        let second = RandomEngine::with_seed(17)
            .choose_move(&game, &GoParams::default())
            .expect("choose_move should succeed");

        assert_eq!(first.best_move, second.best_move);
        assert!(first.best_move.is_some());
    }

    #[test]
    fn game_over_yields_no_best_move() {
        let mated = GameState::from_fen("4R1k1/5ppp/8/8/8/8/8/6K1 b - - 0 1")
            .expect("FEN should parse");

        let out = RandomEngine::with_seed(1)
            .choose_move(&mated, &GoParams::default())
            .expect("choose_move should succeed");
        assert_eq!(out.best_move, None);
    }
}
