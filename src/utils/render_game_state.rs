//! Terminal-oriented board renderer for diagnostics and tests.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Render the board as ASCII text, rank 8 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0u8..8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0u8..8 {
            let sq = rank * 8 + file;
            match game_state.piece_on_square(sq) {
                Some((color, piece)) => out.push(piece_char(color, piece)),
                None => out.push('.'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_char(color: Color, piece: PieceKind) -> char {
    let base = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}
