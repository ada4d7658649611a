//! Attack and check queries over a game state.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.piece_board(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    attackers_to_square(
        game_state,
        king_sq,
        color.opposite(),
        game_state.occupancy_all,
    ) != 0
}

/// Bitboard of `attacker_color` pieces attacking `square` under the given
/// occupancy. The occupancy parameter lets callers probe hypothetical
/// boards, e.g. with the moving king lifted or en-passant pawns removed.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
    occupancy: u64,
) -> u64 {
    let attacker = attacker_color.index();
    let mut attackers = 0u64;

    // Reverse lookup: an enemy pawn attacks `square` exactly when a pawn of
    // our color on `square` would attack the enemy pawn's square.
    attackers |= pawn_attacks(attacker_color.opposite(), square)
        & game_state.pieces[attacker][PieceKind::Pawn.index()];

    attackers |= knight_attacks(square) & game_state.pieces[attacker][PieceKind::Knight.index()];
    attackers |= king_attacks(square) & game_state.pieces[attacker][PieceKind::King.index()];

    let bishops_queens = game_state.pieces[attacker][PieceKind::Bishop.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    attackers |= bishop_attacks(square, occupancy) & bishops_queens;

    let rooks_queens = game_state.pieces[attacker][PieceKind::Rook.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    attackers |= rook_attacks(square, occupancy) & rooks_queens;

    attackers
}

/// Union of all squares attacked by `attacker_color` under the given
/// occupancy. Own-piece squares are included; the caller filters.
pub fn attacked_squares(game_state: &GameState, attacker_color: Color, occupancy: u64) -> u64 {
    let attacker = attacker_color.index();
    let mut attacks = 0u64;

    let mut pawns = game_state.pieces[attacker][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        attacks |= pawn_attacks(attacker_color, from);
        pawns &= pawns - 1;
    }

    let mut knights = game_state.pieces[attacker][PieceKind::Knight.index()];
    while knights != 0 {
        attacks |= knight_attacks(knights.trailing_zeros() as Square);
        knights &= knights - 1;
    }

    let mut kings = game_state.pieces[attacker][PieceKind::King.index()];
    while kings != 0 {
        attacks |= king_attacks(kings.trailing_zeros() as Square);
        kings &= kings - 1;
    }

    let mut bishops_queens = game_state.pieces[attacker][PieceKind::Bishop.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    while bishops_queens != 0 {
        attacks |= bishop_attacks(bishops_queens.trailing_zeros() as Square, occupancy);
        bishops_queens &= bishops_queens - 1;
    }

    let mut rooks_queens = game_state.pieces[attacker][PieceKind::Rook.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    while rooks_queens != 0 {
        attacks |= rook_attacks(rooks_queens.trailing_zeros() as Square, occupancy);
        rooks_queens &= rooks_queens - 1;
    }

    attacks
}
