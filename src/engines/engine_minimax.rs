//! Fixed-depth minimax engine.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::minimax;

pub struct MinimaxEngine {
    depth: u8,
    scorer: PieceSquareScorer,
}

impl MinimaxEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            scorer: PieceSquareScorer,
        }
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Quince Minimax"
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
        let (best_move, score) = minimax::search_best_move(game_state, depth, &self.scorer)?;

        out.info_lines
            .push(format!("info depth {depth} score cp {:.0}", score * 100.0));
        out.best_move = Some(best_move);
        out.score = Some(score);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    #[test]
    fn requested_depth_overrides_the_configured_depth() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1")
            .expect("FEN should parse");

        let params = GoParams {
            depth: Some(2),
            ..GoParams::default()
        };
        let out = MinimaxEngine::new(1)
            .choose_move(&game, &params)
            .expect("choose_move should succeed");

        let mv = out.best_move.expect("a move should be chosen");
        assert_eq!(
            move_to_long_algebraic(mv).expect("move should format"),
            "e1e8"
        );
    }

    #[test]
    fn game_over_yields_no_best_move() {
        let stalemate =
            GameState::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");

        let out = MinimaxEngine::new(2)
            .choose_move(&stalemate, &GoParams::default())
            .expect("choose_move should succeed");
        assert_eq!(out.best_move, None);
    }
}
