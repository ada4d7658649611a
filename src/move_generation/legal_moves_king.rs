//! Legal king move generation, castling included.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{push_piece_moves, GenerationContext};
use crate::moves::king_moves::king_attacks;
use crate::moves::move_descriptions::{pack_move, FLAG_CASTLING};

// Squares that must be empty between king and rook, and the squares the
// king occupies or crosses, per castling. The start square is covered by
// the not-in-check gate.
const WHITE_KINGSIDE_EMPTY: u64 = (1 << 5) | (1 << 6);
const WHITE_KINGSIDE_SAFE: u64 = (1 << 5) | (1 << 6);
const WHITE_QUEENSIDE_EMPTY: u64 = (1 << 1) | (1 << 2) | (1 << 3);
const WHITE_QUEENSIDE_SAFE: u64 = (1 << 2) | (1 << 3);

const BLACK_KINGSIDE_EMPTY: u64 = WHITE_KINGSIDE_EMPTY << 56;
const BLACK_KINGSIDE_SAFE: u64 = WHITE_KINGSIDE_SAFE << 56;
const BLACK_QUEENSIDE_EMPTY: u64 = WHITE_QUEENSIDE_EMPTY << 56;
const BLACK_QUEENSIDE_SAFE: u64 = WHITE_QUEENSIDE_SAFE << 56;

pub fn generate_king_moves(game_state: &GameState, ctx: &GenerationContext, moves: &mut Vec<Move>) {
    let from = ctx.king_square;

    let targets = king_attacks(from) & !ctx.own_occupancy & !ctx.danger;
    push_piece_moves(game_state, ctx, from, PieceKind::King, targets, moves);

    // Castling is never an evasion.
    if ctx.in_check() {
        return;
    }

    let (kingside_right, queenside_right, king_home) = match ctx.us {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE, 4),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, 60),
    };

    if from != king_home {
        return;
    }

    let (kingside_empty, kingside_safe, queenside_empty, queenside_safe) = match ctx.us {
        Color::White => (
            WHITE_KINGSIDE_EMPTY,
            WHITE_KINGSIDE_SAFE,
            WHITE_QUEENSIDE_EMPTY,
            WHITE_QUEENSIDE_SAFE,
        ),
        Color::Black => (
            BLACK_KINGSIDE_EMPTY,
            BLACK_KINGSIDE_SAFE,
            BLACK_QUEENSIDE_EMPTY,
            BLACK_QUEENSIDE_SAFE,
        ),
    };

    if (game_state.castling_rights & kingside_right) != 0
        && (ctx.occupancy & kingside_empty) == 0
        && (ctx.danger & kingside_safe) == 0
    {
        moves.push(pack_move(
            from,
            from + 2,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }

    if (game_state.castling_rights & queenside_right) != 0
        && (ctx.occupancy & queenside_empty) == 0
        && (ctx.danger & queenside_safe) == 0
    {
        moves.push(pack_move(
            from,
            from - 2,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}
