//! Full legal move generation pipeline.
//!
//! Builds the per-position generation context (danger map, checkers, pin
//! restrictions) and dispatches on the number of checkers: double check
//! allows king moves only, single check adds capture/block resolutions, and
//! a quiet position generates the full move set including castling.

use crate::errors::EngineResult;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::build_context;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::MoveGenerator;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> EngineResult<Vec<Move>> {
        let ctx = build_context(game_state)?;
        let mut moves = Vec::<Move>::with_capacity(48);

        if !ctx.in_double_check() {
            generate_pawn_moves(game_state, &ctx, &mut moves);
            generate_knight_moves(game_state, &ctx, &mut moves);
            generate_bishop_moves(game_state, &ctx, &mut moves);
            generate_rook_moves(game_state, &ctx, &mut moves);
            generate_queen_moves(game_state, &ctx, &mut moves);
        }

        generate_king_moves(game_state, &ctx, &mut moves);

        Ok(moves)
    }
}

/// Side to move is in check with no legal reply.
pub fn is_checkmate(game_state: &GameState) -> EngineResult<bool> {
    Ok(is_king_in_check(game_state, game_state.side_to_move)
        && LegalMoveGenerator
            .generate_legal_moves(game_state)?
            .is_empty())
}

/// Side to move is not in check but has no legal reply.
pub fn is_stalemate(game_state: &GameState) -> EngineResult<bool> {
    Ok(!is_king_in_check(game_state, game_state.side_to_move)
        && LegalMoveGenerator
            .generate_legal_moves(game_state)?
            .is_empty())
}
