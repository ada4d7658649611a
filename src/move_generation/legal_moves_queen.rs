//! Legal queen move generation.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{push_piece_moves, GenerationContext};
use crate::moves::queen_moves::queen_attacks;

pub fn generate_queen_moves(
    game_state: &GameState,
    ctx: &GenerationContext,
    moves: &mut Vec<Move>,
) {
    let mut queens = game_state.piece_board(ctx.us, PieceKind::Queen);

    while queens != 0 {
        let from = queens.trailing_zeros() as Square;
        queens &= queens - 1;

        let targets = queen_attacks(from, ctx.occupancy)
            & !ctx.own_occupancy
            & ctx.check_mask
            & ctx.pin_restriction[from as usize];

        push_piece_moves(game_state, ctx, from, PieceKind::Queen, targets, moves);
    }
}
