//! Shared per-call state for legal move generation.
//!
//! `GenerationContext` is computed once per position and carries the danger
//! map, checker set, check-resolution mask, and pin restrictions consumed by
//! the per-piece generators.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::{pack_move, FLAG_CAPTURE};
use crate::moves::rays::BETWEEN;
use crate::moves::rook_moves::rook_attacks;

use crate::move_generation::legal_move_checks::{
    attacked_squares, attackers_to_square, king_square,
};

pub struct GenerationContext {
    pub us: Color,
    pub them: Color,
    pub king_square: Square,

    pub own_occupancy: u64,
    pub enemy_occupancy: u64,
    pub occupancy: u64,

    /// Squares attacked by the opponent, computed with our king lifted off
    /// the board so a checked king cannot retreat along the checking ray.
    pub danger: u64,

    /// Bitboard of pieces currently giving check.
    pub checkers: u64,

    /// Destination mask that resolves check for non-king moves: all squares
    /// when not in check, the checker plus its blocking ray in single check,
    /// empty in double check.
    pub check_mask: u64,

    /// Bitboard of own pieces pinned to the king.
    pub pinned: u64,

    /// Per-square movement restriction; the pin ray for pinned pieces and
    /// the full board otherwise.
    pub pin_restriction: [u64; 64],
}

impl GenerationContext {
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers != 0
    }

    #[inline]
    pub fn in_double_check(&self) -> bool {
        self.checkers.count_ones() >= 2
    }
}

pub fn build_context(game_state: &GameState) -> EngineResult<GenerationContext> {
    let us = game_state.side_to_move;
    let them = us.opposite();

    let king_sq = king_square(game_state, us)
        .ok_or_else(|| EngineError::InvalidState(format!("{us:?} has no king")))?;
    let king_bit = 1u64 << king_sq;

    let own_occupancy = game_state.occupancy_by_color[us.index()];
    let enemy_occupancy = game_state.occupancy_by_color[them.index()];
    let occupancy = game_state.occupancy_all;

    let danger = attacked_squares(game_state, them, occupancy & !king_bit);
    let checkers = attackers_to_square(game_state, king_sq, them, occupancy);

    let check_mask = match checkers.count_ones() {
        0 => !0u64,
        1 => {
            let checker_sq = checkers.trailing_zeros() as Square;
            let sliders = game_state.piece_board(them, PieceKind::Bishop)
                | game_state.piece_board(them, PieceKind::Rook)
                | game_state.piece_board(them, PieceKind::Queen);

            // Only sliding checkers can be blocked; knight and pawn checks
            // must be captured or evaded.
            if (checkers & sliders) != 0 {
                BETWEEN[king_sq as usize][checker_sq as usize] | checkers
            } else {
                checkers
            }
        }
        _ => 0u64,
    };

    let (pinned, pin_restriction) = compute_pins(game_state, us, king_sq);

    Ok(GenerationContext {
        us,
        them,
        king_square: king_sq,
        own_occupancy,
        enemy_occupancy,
        occupancy,
        danger,
        checkers,
        check_mask,
        pinned,
        pin_restriction,
    })
}

/// A piece is pinned when it is the single blocker on the open ray between
/// the own king and an enemy slider of the matching ray type. Its moves are
/// then restricted to that ray, pinner capture included.
fn compute_pins(game_state: &GameState, us: Color, king_sq: Square) -> (u64, [u64; 64]) {
    let them = us.opposite();
    let own_occupancy = game_state.occupancy_by_color[us.index()];

    let mut pinned = 0u64;
    let mut pin_restriction = [!0u64; 64];

    let diagonal_sliders = game_state.piece_board(them, PieceKind::Bishop)
        | game_state.piece_board(them, PieceKind::Queen);
    let orthogonal_sliders = game_state.piece_board(them, PieceKind::Rook)
        | game_state.piece_board(them, PieceKind::Queen);

    // Empty-board rays from the king select the sliders aligned with it.
    let mut candidates = (bishop_attacks(king_sq, 0) & diagonal_sliders)
        | (rook_attacks(king_sq, 0) & orthogonal_sliders);

    while candidates != 0 {
        let slider_sq = candidates.trailing_zeros() as Square;
        candidates &= candidates - 1;

        let between = BETWEEN[king_sq as usize][slider_sq as usize];
        let blockers = between & game_state.occupancy_all;

        if blockers.count_ones() == 1 && (blockers & own_occupancy) != 0 {
            pinned |= blockers;
            pin_restriction[blockers.trailing_zeros() as usize] = between | (1u64 << slider_sq);
        }
    }

    (pinned, pin_restriction)
}

/// Emit one move per set bit of `targets`, tagging captures from the board.
///
/// Used by every non-pawn generator; pawns handle promotion expansion and
/// en passant themselves.
pub fn push_piece_moves(
    game_state: &GameState,
    ctx: &GenerationContext,
    from: Square,
    piece: PieceKind,
    targets: u64,
    moves: &mut Vec<Move>,
) {
    let mut remaining = targets;
    while remaining != 0 {
        let to = remaining.trailing_zeros() as Square;
        remaining &= remaining - 1;

        let (captured, flags) = if (ctx.enemy_occupancy & (1u64 << to)) != 0 {
            let captured = game_state.piece_on_square(to).map(|(_, kind)| kind);
            (captured, FLAG_CAPTURE)
        } else {
            (None, 0)
        };

        moves.push(pack_move(from, to, piece, captured, None, flags));
    }
}
