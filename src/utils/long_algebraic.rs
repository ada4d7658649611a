//! Move-text codec for the UCI long algebraic form (`e2e4`, `e7e8q`).
//!
//! Formatting needs only the packed move; parsing consults the position to
//! reconstruct the captured piece and the special-move flags.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{
    from_square, pack_move, promotion_piece, to_square, FLAG_CAPTURE, FLAG_CASTLING,
    FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: Move) -> EngineResult<String> {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(from_square(mv))?);
    out.push_str(&square_to_algebraic(to_square(mv))?);

    if let Some(promotion) = promotion_piece(mv) {
        out.push(promotion_to_char(promotion)?);
    }

    Ok(out)
}

pub fn parse_long_algebraic(text: &str, game_state: &GameState) -> EngineResult<Move> {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(EngineError::MoveParse(format!("invalid move text: {text}")));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let (moving_color, moved_piece) = game_state
        .piece_on_square(from)
        .ok_or_else(|| EngineError::MoveParse(format!("no piece on {}", &text[0..2])))?;

    if moving_color != game_state.side_to_move {
        return Err(EngineError::MoveParse(format!(
            "piece on {} does not belong to the side to move",
            &text[0..2]
        )));
    }

    let target_piece = game_state.piece_on_square(to);
    if let Some((target_color, _)) = target_piece {
        if target_color == moving_color {
            return Err(EngineError::MoveParse(format!(
                "destination {} holds an own piece",
                &text[2..4]
            )));
        }
    }

    let mut captured_piece = target_piece.map(|(_, piece)| piece);
    let mut flags = 0u32;

    if captured_piece.is_some() {
        flags |= FLAG_CAPTURE;
    }

    if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
        flags |= FLAG_DOUBLE_PAWN_PUSH;
    }

    if moved_piece == PieceKind::King && from.abs_diff(to) == 2 {
        flags |= FLAG_CASTLING;
    }

    if moved_piece == PieceKind::Pawn
        && game_state.en_passant_square == Some(to)
        && from % 8 != to % 8
        && target_piece.is_none()
    {
        let victim_square = match moving_color {
            Color::White => to.checked_sub(8),
            Color::Black => to.checked_add(8),
        }
        .ok_or_else(|| EngineError::MoveParse("en-passant square off the board".to_owned()))?;

        match game_state.piece_on_square(victim_square) {
            Some((color, PieceKind::Pawn)) if color != moving_color => {
                captured_piece = Some(PieceKind::Pawn);
                flags |= FLAG_CAPTURE | FLAG_EN_PASSANT;
            }
            _ => {
                return Err(EngineError::MoveParse(
                    "en-passant target set but no capturable pawn found".to_owned(),
                ));
            }
        }
    }

    let promotion_piece = if bytes.len() == 5 {
        if moved_piece != PieceKind::Pawn {
            return Err(EngineError::MoveParse("only pawns may promote".to_owned()));
        }
        if to / 8 != 0 && to / 8 != 7 {
            return Err(EngineError::MoveParse(
                "promotion must end on a back rank".to_owned(),
            ));
        }
        Some(char_to_promotion(bytes[4] as char)?)
    } else {
        if moved_piece == PieceKind::Pawn && (to / 8 == 0 || to / 8 == 7) {
            return Err(EngineError::MoveParse(format!(
                "missing promotion piece in: {text}"
            )));
        }
        None
    };

    Ok(pack_move(
        from,
        to,
        moved_piece,
        captured_piece,
        promotion_piece,
        flags,
    ))
}

fn promotion_to_char(piece: PieceKind) -> EngineResult<char> {
    match piece {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        _ => Err(EngineError::MoveParse(format!(
            "invalid promotion piece: {piece:?}"
        ))),
    }
}

fn char_to_promotion(ch: char) -> EngineResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(EngineError::MoveParse(format!(
            "invalid promotion character: {ch}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{move_to_long_algebraic, parse_long_algebraic};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{
        FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
    };

    #[test]
    fn round_trip_simple_and_double_push_moves() {
        let game = GameState::new_game();

        let mv = parse_long_algebraic("e2e4", &game).expect("move should parse");
        assert_ne!(mv & FLAG_DOUBLE_PAWN_PUSH, 0);
        assert_eq!(
            move_to_long_algebraic(mv).expect("move should format"),
            "e2e4"
        );
    }

    #[test]
    fn round_trip_promotion() {
        let game =
            GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");

        let mv = parse_long_algebraic("a7a8q", &game).expect("move should parse");
        assert_eq!(
            move_to_long_algebraic(mv).expect("move should format"),
            "a7a8q"
        );
    }

    #[test]
    fn detects_castling_and_en_passant_flags() {
        let castle_state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let castle = parse_long_algebraic("e1g1", &castle_state).expect("castle should parse");
        assert_ne!(castle & FLAG_CASTLING, 0);

        let ep_state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("FEN should parse");
        let ep = parse_long_algebraic("e5d6", &ep_state).expect("en passant should parse");
        assert_ne!(ep & FLAG_EN_PASSANT, 0);
    }

    #[test]
    fn rejects_malformed_and_impossible_moves() {
        let game = GameState::new_game();

        assert!(parse_long_algebraic("e2", &game).is_err());
        assert!(parse_long_algebraic("e2e4x", &game).is_err());
        assert!(parse_long_algebraic("e4e5", &game).is_err()); // empty from-square
        assert!(parse_long_algebraic("e7e5", &game).is_err()); // opponent's pawn
        assert!(parse_long_algebraic("e1e2q", &game).is_err()); // non-pawn promotion
    }
}
