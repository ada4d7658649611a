//! In-place move application and exact undo.
//!
//! `make_move` trusts its input: the move must have come from the legal
//! move generator, and only structurally impossible input is rejected.
//! Every application pushes an undo record; `unmake_move` pops it and
//! restores the position bit for bit. Search code must pair the two on
//! every exit path.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{
    captured_piece, from_square, is_capture, moved_piece, promotion_piece, to_square,
    FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

pub fn make_move(game_state: &mut GameState, mv: Move) -> EngineResult<()> {
    let from = from_square(mv);
    let to = to_square(mv);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let us = game_state.side_to_move;
    let them = us.opposite();

    let moved = moved_piece(mv)
        .ok_or_else(|| EngineError::IllegalMove(format!("move {mv:#x} has no moved piece")))?;

    if (game_state.pieces[us.index()][moved.index()] & from_mask) == 0 {
        return Err(EngineError::IllegalMove(format!(
            "no {us:?} {moved:?} on square {from}"
        )));
    }

    game_state.undo_stack.push(UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
    });

    // Lift the moving piece.
    game_state.pieces[us.index()][moved.index()] &= !from_mask;

    // Clear the captured piece; the en-passant victim sits on its own
    // square rather than the destination.
    if (mv & FLAG_EN_PASSANT) != 0 {
        let victim_square = match us {
            Color::White => to - 8,
            Color::Black => to + 8,
        };
        game_state.pieces[them.index()][PieceKind::Pawn.index()] &= !(1u64 << victim_square);
    } else if is_capture(mv) {
        let victim = captured_piece(mv).ok_or_else(|| {
            EngineError::IllegalMove(format!("capture move {mv:#x} has no captured piece"))
        })?;
        game_state.pieces[them.index()][victim.index()] &= !to_mask;
    }

    // Drop the moved (or promoted) piece on the destination.
    match promotion_piece(mv) {
        Some(promo) => game_state.pieces[us.index()][promo.index()] |= to_mask,
        None => game_state.pieces[us.index()][moved.index()] |= to_mask,
    }

    // Castling relocates the rook as well.
    if (mv & FLAG_CASTLING) != 0 {
        let (rook_from, rook_to) = castling_rook_squares(from, to)?;
        game_state.pieces[us.index()][PieceKind::Rook.index()] &= !(1u64 << rook_from);
        game_state.pieces[us.index()][PieceKind::Rook.index()] |= 1u64 << rook_to;
    }

    update_castling_rights(game_state, us, moved, from, to);

    game_state.en_passant_square = if (mv & FLAG_DOUBLE_PAWN_PUSH) != 0 {
        Some(passed_over_square(from, to))
    } else {
        None
    };

    if moved == PieceKind::Pawn || is_capture(mv) {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = them;
    game_state.recalc_occupancy();

    Ok(())
}

pub fn unmake_move(game_state: &mut GameState) -> EngineResult<()> {
    let undo = game_state
        .undo_stack
        .pop()
        .ok_or(EngineError::HistoryUnderflow)?;
    let mv = undo.mv;

    let from = from_square(mv);
    let to = to_square(mv);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    // The side that made the move is the one not currently on turn.
    let us = game_state.side_to_move.opposite();
    let them = game_state.side_to_move;

    let moved = moved_piece(mv)
        .ok_or_else(|| EngineError::IllegalMove(format!("undo record {mv:#x} has no piece")))?;

    // Take the piece off the destination; promotions restore the pawn.
    match promotion_piece(mv) {
        Some(promo) => game_state.pieces[us.index()][promo.index()] &= !to_mask,
        None => game_state.pieces[us.index()][moved.index()] &= !to_mask,
    }
    game_state.pieces[us.index()][moved.index()] |= from_mask;

    // Put back anything captured.
    if (mv & FLAG_EN_PASSANT) != 0 {
        let victim_square = match us {
            Color::White => to - 8,
            Color::Black => to + 8,
        };
        game_state.pieces[them.index()][PieceKind::Pawn.index()] |= 1u64 << victim_square;
    } else if is_capture(mv) {
        let victim = captured_piece(mv).ok_or_else(|| {
            EngineError::IllegalMove(format!("undo record {mv:#x} has no captured piece"))
        })?;
        game_state.pieces[them.index()][victim.index()] |= to_mask;
    }

    if (mv & FLAG_CASTLING) != 0 {
        let (rook_from, rook_to) = castling_rook_squares(from, to)?;
        game_state.pieces[us.index()][PieceKind::Rook.index()] &= !(1u64 << rook_to);
        game_state.pieces[us.index()][PieceKind::Rook.index()] |= 1u64 << rook_from;
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;

    if us == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_sub(1);
    }

    game_state.side_to_move = us;
    game_state.recalc_occupancy();

    Ok(())
}

/// Copy-make convenience for the protocol seam; search uses
/// `make_move`/`unmake_move` on a single state instead.
pub fn apply_move(game_state: &GameState, mv: Move) -> EngineResult<GameState> {
    let mut next = game_state.clone();
    make_move(&mut next, mv)?;
    Ok(next)
}

fn castling_rook_squares(king_from: Square, king_to: Square) -> EngineResult<(Square, Square)> {
    match (king_from, king_to) {
        (4, 6) => Ok((7, 5)),
        (4, 2) => Ok((0, 3)),
        (60, 62) => Ok((63, 61)),
        (60, 58) => Ok((56, 59)),
        _ => Err(EngineError::IllegalMove(format!(
            "castling move with king path {king_from}->{king_to}"
        ))),
    }
}

#[inline]
fn passed_over_square(from: Square, to: Square) -> Square {
    ((from as u16 + to as u16) / 2) as Square
}

fn update_castling_rights(
    game_state: &mut GameState,
    us: Color,
    moved: PieceKind,
    from: Square,
    to: Square,
) {
    if moved == PieceKind::King {
        game_state.castling_rights &= match us {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    // A rook leaving its home square, or anything landing on one (rook
    // capture), cancels the matching right.
    for square in [from, to] {
        game_state.castling_rights &= match square {
            0 => !CASTLE_WHITE_QUEENSIDE,
            7 => !CASTLE_WHITE_KINGSIDE,
            56 => !CASTLE_BLACK_QUEENSIDE,
            63 => !CASTLE_BLACK_KINGSIDE,
            _ => !0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, make_move, unmake_move};
    use crate::errors::EngineError;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn make_text_move(game_state: &mut GameState, text: &str) {
        let mv = parse_long_algebraic(text, game_state).expect("move text should parse");
        make_move(game_state, mv).expect("move should apply");
    }

    #[test]
    fn make_then_unmake_restores_the_position_exactly() {
        let mut game = GameState::new_game();
        let reference = game.clone();

        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("generation should succeed");

        for mv in moves {
            make_move(&mut game, mv).expect("move should apply");
            unmake_move(&mut game).expect("undo should succeed");
            assert_eq!(game, reference);
        }
    }

    #[test]
    fn unmake_with_empty_history_is_an_error() {
        let mut game = GameState::new_game();
        assert_eq!(unmake_move(&mut game), Err(EngineError::HistoryUnderflow));
    }

    #[test]
    fn double_push_sets_the_passed_over_square() {
        let mut game = GameState::new_game();
        make_text_move(&mut game, "e2e4");

        assert_eq!(game.en_passant_square, Some(20)); // e3
        assert_eq!(game.side_to_move, Color::Black);
        assert_eq!(game.halfmove_clock, 0);

        make_text_move(&mut game, "g8f6");
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.fullmove_number, 2);
    }

    #[test]
    fn en_passant_capture_removes_the_bypassed_pawn() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").expect("FEN should parse");

        make_text_move(&mut game, "e2e4");
        assert_eq!(game.en_passant_square, Some(20));

        make_text_move(&mut game, "d4e3");

        // The white e4 pawn is gone and the black pawn sits on e3.
        assert_eq!(game.piece_board(Color::White, PieceKind::Pawn), 0);
        assert_eq!(game.piece_board(Color::Black, PieceKind::Pawn), 1u64 << 20);
    }

    #[test]
    fn castling_moves_both_king_and_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let reference = game.clone();

        make_text_move(&mut game, "e1g1");
        assert_eq!(game.piece_board(Color::White, PieceKind::King), 1u64 << 6);
        assert_eq!(
            game.piece_board(Color::White, PieceKind::Rook),
            (1u64 << 0) | (1u64 << 5)
        );
        assert_eq!(game.castling_rights & 0b0011, 0);

        unmake_move(&mut game).expect("undo should succeed");
        assert_eq!(game, reference);
    }

    #[test]
    fn promotion_swaps_the_pawn_for_the_chosen_piece_and_back() {
        let mut game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let reference = game.clone();

        make_text_move(&mut game, "a7a8q");
        assert_eq!(game.piece_board(Color::White, PieceKind::Pawn), 0);
        assert_eq!(game.piece_board(Color::White, PieceKind::Queen), 1u64 << 56);

        unmake_move(&mut game).expect("undo should succeed");
        assert_eq!(game, reference);
    }

    #[test]
    fn rook_capture_on_home_square_cancels_both_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");

        // Rxa8 empties both queenside home squares.
        make_text_move(&mut game, "a1a8");

        use crate::game_state::chess_types::{
            CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
            CASTLE_WHITE_QUEENSIDE,
        };
        assert_eq!(game.castling_rights & CASTLE_WHITE_QUEENSIDE, 0);
        assert_eq!(game.castling_rights & CASTLE_BLACK_QUEENSIDE, 0);
        assert_ne!(game.castling_rights & CASTLE_WHITE_KINGSIDE, 0);
        assert_ne!(game.castling_rights & CASTLE_BLACK_KINGSIDE, 0);
    }

    #[test]
    fn apply_move_leaves_the_source_untouched() {
        let game = GameState::new_game();
        let mv = parse_long_algebraic("e2e4", &game).expect("move text should parse");

        let next = apply_move(&game, mv).expect("move should apply");
        assert_eq!(game, GameState::new_game());
        assert_eq!(next.side_to_move, Color::Black);
    }
}
