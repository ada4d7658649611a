//! Legal bishop move generation.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{push_piece_moves, GenerationContext};
use crate::moves::bishop_moves::bishop_attacks;

pub fn generate_bishop_moves(
    game_state: &GameState,
    ctx: &GenerationContext,
    moves: &mut Vec<Move>,
) {
    let mut bishops = game_state.piece_board(ctx.us, PieceKind::Bishop);

    while bishops != 0 {
        let from = bishops.trailing_zeros() as Square;
        bishops &= bishops - 1;

        let targets = bishop_attacks(from, ctx.occupancy)
            & !ctx.own_occupancy
            & ctx.check_mask
            & ctx.pin_restriction[from as usize];

        push_piece_moves(game_state, ctx, from, PieceKind::Bishop, targets, moves);
    }
}
