//! Static position evaluation.
//!
//! Search delegates leaf scoring to the `BoardScorer` trait so alternate
//! heuristics can be swapped without touching search code. The default
//! scorer combines material balance with piece-square tables.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Sentinel returned by search for a checkmated side.
pub const MATE_SCORE: f64 = 1_000_000.0;

/// Weight of the material term, in pawns.
pub const MATERIAL_WEIGHT: f64 = 1.0;

/// Weight of the piece-square term; table entries are hundredths of a pawn.
pub const POSITIONAL_WEIGHT: f64 = 0.01;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move; positive means the
    /// side to move is better.
    fn score(&self, game_state: &GameState) -> f64;
}

/// Material balance plus piece-square placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    /// Classical material values in pawns; the king carries none.
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> f64 {
        match piece {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight => 3.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 0.0,
        }
    }

    fn material_white_minus_black(game_state: &GameState) -> f64 {
        let mut balance = 0.0;

        for piece in PieceKind::ALL {
            let white_count =
                game_state.piece_board(Color::White, piece).count_ones() as f64;
            let black_count =
                game_state.piece_board(Color::Black, piece).count_ones() as f64;
            balance += (white_count - black_count) * Self::piece_value(piece);
        }

        balance
    }

    fn positional_white_minus_black(game_state: &GameState) -> f64 {
        let mut balance = 0i32;

        for piece in PieceKind::ALL {
            let table = piece_square_table(piece);

            let mut white = game_state.piece_board(Color::White, piece);
            while white != 0 {
                let sq = white.trailing_zeros() as usize;
                white &= white - 1;
                balance += table[sq];
            }

            // Black reads the table through the vertically mirrored square.
            let mut black = game_state.piece_board(Color::Black, piece);
            while black != 0 {
                let sq = black.trailing_zeros() as usize;
                black &= black - 1;
                balance -= table[sq ^ 56];
            }
        }

        balance as f64
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> f64 {
        let white_minus_black = Self::material_white_minus_black(game_state) * MATERIAL_WEIGHT
            + Self::positional_white_minus_black(game_state) * POSITIONAL_WEIGHT;

        match game_state.side_to_move {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

#[inline]
const fn piece_square_table(piece: PieceKind) -> &'static [i32; 64] {
    match piece {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

// Tables are indexed from White's perspective with a1 = 0; entries are
// hundredths of a pawn.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[cfg(test)]
mod tests {
    use super::{BoardScorer, PieceSquareScorer};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        let score = PieceSquareScorer.score(&game);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn score_is_antisymmetric_between_the_sides() {
        // Same material imbalance seen from both sides of the board.
        let white_up =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");

        let from_white = PieceSquareScorer.score(&white_up);
        let from_black = PieceSquareScorer.score(&black_to_move);

        assert!(from_white > 8.0);
        assert_eq!(from_white, -from_black);
    }

    #[test]
    fn mirrored_positions_score_symmetrically() {
        let white_side =
            GameState::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        let black_side =
            GameState::from_fen("n3k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");

        assert_eq!(
            PieceSquareScorer.score(&white_side),
            PieceSquareScorer.score(&black_side)
        );
    }

    #[test]
    fn material_advantage_dominates_placement() {
        // A queen up outweighs any table bonus.
        let game =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert!(PieceSquareScorer.score(&game) > 8.0);
    }
}
