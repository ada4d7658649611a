//! Legal knight move generation.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{push_piece_moves, GenerationContext};
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(
    game_state: &GameState,
    ctx: &GenerationContext,
    moves: &mut Vec<Move>,
) {
    let mut knights = game_state.piece_board(ctx.us, PieceKind::Knight);

    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        knights &= knights - 1;

        // A pinned knight can never stay on its pin ray, so the restriction
        // empties its target set.
        let targets = knight_attacks(from)
            & !ctx.own_occupancy
            & ctx.check_mask
            & ctx.pin_restriction[from as usize];

        push_piece_moves(game_state, ctx, from, PieceKind::Knight, targets, moves);
    }
}
