//! Legal pawn move generation: pushes, captures, promotions, en passant.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::{
    pack_move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_pawn_moves(game_state: &GameState, ctx: &GenerationContext, moves: &mut Vec<Move>) {
    let mut pawns = game_state.piece_board(ctx.us, PieceKind::Pawn);

    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let restriction = ctx.pin_restriction[from as usize];

        generate_pushes(ctx, from, restriction, moves);
        generate_captures(game_state, ctx, from, restriction, moves);
        generate_en_passant(game_state, ctx, from, restriction, moves);
    }
}

fn generate_pushes(ctx: &GenerationContext, from: Square, restriction: u64, moves: &mut Vec<Move>) {
    let (single, double, on_start_rank) = match ctx.us {
        Color::White => (from + 8, from as i32 + 16, (8..16).contains(&from)),
        Color::Black => (from - 8, from as i32 - 16, (48..56).contains(&from)),
    };

    if (ctx.occupancy & (1u64 << single)) != 0 {
        return;
    }

    if ((1u64 << single) & ctx.check_mask & restriction) != 0 {
        if is_promotion_rank(ctx.us, single) {
            push_promotions(from, single, None, 0, moves);
        } else {
            moves.push(pack_move(from, single, PieceKind::Pawn, None, None, 0));
        }
    }

    // The double push needs both squares empty even when only the far
    // square resolves a check.
    if on_start_rank {
        let double = double as Square;
        if (ctx.occupancy & (1u64 << double)) == 0
            && ((1u64 << double) & ctx.check_mask & restriction) != 0
        {
            moves.push(pack_move(
                from,
                double,
                PieceKind::Pawn,
                None,
                None,
                FLAG_DOUBLE_PAWN_PUSH,
            ));
        }
    }
}

fn generate_captures(
    game_state: &GameState,
    ctx: &GenerationContext,
    from: Square,
    restriction: u64,
    moves: &mut Vec<Move>,
) {
    let mut targets =
        pawn_attacks(ctx.us, from) & ctx.enemy_occupancy & ctx.check_mask & restriction;

    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;

        let captured = game_state.piece_on_square(to).map(|(_, kind)| kind);

        if is_promotion_rank(ctx.us, to) {
            push_promotions(from, to, captured, FLAG_CAPTURE, moves);
        } else {
            moves.push(pack_move(
                from,
                to,
                PieceKind::Pawn,
                captured,
                None,
                FLAG_CAPTURE,
            ));
        }
    }
}

fn generate_en_passant(
    game_state: &GameState,
    ctx: &GenerationContext,
    from: Square,
    restriction: u64,
    moves: &mut Vec<Move>,
) {
    let Some(ep_square) = game_state.en_passant_square else {
        return;
    };

    let ep_bit = 1u64 << ep_square;
    if (pawn_attacks(ctx.us, from) & ep_bit) == 0 || (ep_bit & restriction) == 0 {
        return;
    }

    let victim_square = match ctx.us {
        Color::White => ep_square - 8,
        Color::Black => ep_square + 8,
    };

    // Under check the capture must either land on the blocking ray or
    // remove the checking pawn itself.
    let resolves_check =
        (ep_bit & ctx.check_mask) != 0 || ((1u64 << victim_square) & ctx.checkers) != 0;
    if !resolves_check {
        return;
    }

    // Discovery legality: lift both pawns, place ours on the target square,
    // and re-scan enemy sliders against the king. Covers the rank pin where
    // both pawns shield the king from a rook or queen.
    let occupancy_after =
        (ctx.occupancy & !(1u64 << from) & !(1u64 << victim_square)) | ep_bit;

    let diagonal_sliders = game_state.piece_board(ctx.them, PieceKind::Bishop)
        | game_state.piece_board(ctx.them, PieceKind::Queen);
    let orthogonal_sliders = game_state.piece_board(ctx.them, PieceKind::Rook)
        | game_state.piece_board(ctx.them, PieceKind::Queen);

    if (bishop_attacks(ctx.king_square, occupancy_after) & diagonal_sliders) != 0
        || (rook_attacks(ctx.king_square, occupancy_after) & orthogonal_sliders) != 0
    {
        return;
    }

    moves.push(pack_move(
        from,
        ep_square,
        PieceKind::Pawn,
        Some(PieceKind::Pawn),
        None,
        FLAG_CAPTURE | FLAG_EN_PASSANT,
    ));
}

#[inline]
fn is_promotion_rank(color: Color, square: Square) -> bool {
    match color {
        Color::White => square >= 56,
        Color::Black => square < 8,
    }
}

fn push_promotions(
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: Move,
    moves: &mut Vec<Move>,
) {
    for promotion in PieceKind::PROMOTIONS {
        moves.push(pack_move(
            from,
            to,
            PieceKind::Pawn,
            captured,
            Some(promotion),
            flags,
        ));
    }
}
