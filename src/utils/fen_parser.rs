//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a six-field Forsyth-Edwards Notation
//! string. Parsing is atomic: any malformed field fails the whole parse and
//! nothing is constructed.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> EngineResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side to move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(EngineError::PositionParse(
            "FEN has extra trailing fields".to_owned(),
        ));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part, &game_state)?;
    game_state.en_passant_square =
        parse_en_passant_square(en_passant_part, game_state.side_to_move)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| EngineError::PositionParse(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| EngineError::PositionParse(format!("invalid fullmove number: {fullmove_part}")))?;

    game_state.recalc_occupancy();

    Ok(game_state)
}

fn missing(field: &str) -> EngineError {
    EngineError::PositionParse(format!("missing {field} field"))
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> EngineResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::PositionParse(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(EngineError::PositionParse(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch).ok_or_else(|| {
                EngineError::PositionParse(format!("invalid piece character '{ch}'"))
            })?;

            if file >= 8 {
                return Err(EngineError::PositionParse(
                    "board rank has too many files".to_owned(),
                ));
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[color.index()][piece.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(EngineError::PositionParse(
                "board rank does not sum to 8 files".to_owned(),
            ));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> EngineResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(EngineError::PositionParse(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

/// Rights are kept only when the matching king and rook still stand on
/// their home squares, so the stored mask always reflects reachable
/// castling moves regardless of what the FEN text claims.
fn parse_castling_rights(
    castling_part: &str,
    game_state: &GameState,
) -> EngineResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(EngineError::PositionParse(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    let white_king = game_state.piece_board(Color::White, PieceKind::King);
    let black_king = game_state.piece_board(Color::Black, PieceKind::King);
    let white_rooks = game_state.piece_board(Color::White, PieceKind::Rook);
    let black_rooks = game_state.piece_board(Color::Black, PieceKind::Rook);

    if (white_king & (1 << 4)) == 0 || (white_rooks & (1 << 7)) == 0 {
        rights &= !CASTLE_WHITE_KINGSIDE;
    }
    if (white_king & (1 << 4)) == 0 || (white_rooks & 1) == 0 {
        rights &= !CASTLE_WHITE_QUEENSIDE;
    }
    if (black_king & (1 << 60)) == 0 || (black_rooks & (1 << 63)) == 0 {
        rights &= !CASTLE_BLACK_KINGSIDE;
    }
    if (black_king & (1 << 60)) == 0 || (black_rooks & (1 << 56)) == 0 {
        rights &= !CASTLE_BLACK_QUEENSIDE;
    }

    Ok(rights)
}

fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> EngineResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| EngineError::PositionParse(format!("invalid en-passant square: {en_passant_part}")))?;

    // The target is the passed-over square, so it sits on rank 6 when it is
    // White's turn to capture and rank 3 when it is Black's.
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if square / 8 != expected_rank {
        return Err(EngineError::PositionParse(format!(
            "en-passant square {en_passant_part} on the wrong rank"
        )));
    }

    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{
        Color, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
        CASTLE_WHITE_QUEENSIDE,
    };

    #[test]
    fn parse_starting_position() {
        let game = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game.side_to_move, Color::White);
        assert_eq!(game.fullmove_number, 1);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.castling_rights, 0b1111);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        // Too few fields.
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - -").is_err());
        // Bad piece letter.
        assert!(parse_fen("8/8/8/8/8/8/8/7x w - - 0 1").is_err());
        // Rank does not sum to eight files.
        assert!(parse_fen("7/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("p7p/8/8/8/8/8/8/8 w - - 0 1").is_err());
        // Nine ranks.
        assert!(parse_fen("8/8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        // Bad side, castling, clock fields.
        assert!(parse_fen("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w Kx - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - z 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 z").is_err());
        // Trailing garbage.
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1 extra").is_err());
    }

    #[test]
    fn en_passant_square_must_sit_on_the_capture_rank() {
        assert!(parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").is_ok());
        assert!(parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").is_ok());
    }

    #[test]
    fn claimed_rights_without_home_pieces_are_dropped() {
        // The white king is displaced; white rights vanish, black's stay.
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R2K3R w KQkq - 0 1")
            .expect("FEN should parse");

        assert_eq!(game.castling_rights & CASTLE_WHITE_KINGSIDE, 0);
        assert_eq!(game.castling_rights & CASTLE_WHITE_QUEENSIDE, 0);
        assert_ne!(game.castling_rights & CASTLE_BLACK_KINGSIDE, 0);
        assert_ne!(game.castling_rights & CASTLE_BLACK_QUEENSIDE, 0);
    }
}
