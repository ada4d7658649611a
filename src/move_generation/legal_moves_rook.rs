//! Legal rook move generation.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{push_piece_moves, GenerationContext};
use crate::moves::rook_moves::rook_attacks;

pub fn generate_rook_moves(game_state: &GameState, ctx: &GenerationContext, moves: &mut Vec<Move>) {
    let mut rooks = game_state.piece_board(ctx.us, PieceKind::Rook);

    while rooks != 0 {
        let from = rooks.trailing_zeros() as Square;
        rooks &= rooks - 1;

        let targets = rook_attacks(from, ctx.occupancy)
            & !ctx.own_occupancy
            & ctx.check_mask
            & ctx.pin_restriction[from as usize];

        push_piece_moves(game_state, ctx, from, PieceKind::Rook, targets, moves);
    }
}
