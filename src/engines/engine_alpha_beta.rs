//! Fixed-depth alpha-beta engine with parallel root fan-out.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta;
use crate::search::board_scoring::PieceSquareScorer;

pub struct AlphaBetaEngine {
    depth: u8,
    scorer: PieceSquareScorer,
}

impl AlphaBetaEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            scorer: PieceSquareScorer,
        }
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "Quince AlphaBeta"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let mut out = EngineOutput::default();

        if LegalMoveGenerator
            .generate_legal_moves(game_state)?
            .is_empty()
        {
            return Ok(out);
        }

        let depth = params.depth.unwrap_or(self.depth).max(1);
        let (best_move, score) = alpha_beta::search_best_move(game_state, depth, &self.scorer)?;

        out.info_lines
            .push(format!("info depth {depth} score cp {:.0}", score * 100.0));
        out.best_move = Some(best_move);
        out.score = Some(score);
        Ok(out)
    }
}
