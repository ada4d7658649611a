//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores piece
//! bitboards, occupancy caches, turn and rights flags, clocks, and the undo
//! stack used by make/unmake search workflows.

use crate::errors::EngineResult;
use crate::game_state::chess_rules::{HALFMOVE_DRAW_LIMIT, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Bitboard game state optimized for fast move making/unmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Piece bitboards indexed `[color][piece_kind]`.
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches; always kept consistent with `pieces`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    /// Make/unmake stack; depth equals moves applied since construction.
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Bitboard of `color`'s pieces of the given kind.
    #[inline]
    pub fn piece_board(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    /// Piece (and owner) on `square`, if any.
    pub fn piece_on_square(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;

        for color in [Color::White, Color::Black] {
            if (self.occupancy_by_color[color.index()] & mask) == 0 {
                continue;
            }
            for piece in PieceKind::ALL {
                if (self.pieces[color.index()][piece.index()] & mask) != 0 {
                    return Some((color, piece));
                }
            }
        }

        None
    }

    /// Rebuild the occupancy caches from the piece bitboards.
    pub fn recalc_occupancy(&mut self) {
        self.occupancy_by_color[Color::White.index()] = self.pieces[Color::White.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_by_color[Color::Black.index()] = self.pieces[Color::Black.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }

    /// Hundred-ply rule: fifty full moves without a capture or pawn move.
    #[inline]
    pub fn is_draw_by_halfmove_clock(&self) -> bool {
        self.halfmove_clock >= HALFMOVE_DRAW_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn new_game_has_consistent_occupancy() {
        let game = GameState::new_game();

        let white = game.pieces[0].iter().fold(0u64, |acc, bb| acc | bb);
        let black = game.pieces[1].iter().fold(0u64, |acc, bb| acc | bb);

        assert_eq!(game.occupancy_by_color[0], white);
        assert_eq!(game.occupancy_by_color[1], black);
        assert_eq!(game.occupancy_all, white | black);
        assert_eq!(white & black, 0);
        assert_eq!(game.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn piece_on_square_reads_start_position() {
        let game = GameState::new_game();

        assert_eq!(game.piece_on_square(4), Some((Color::White, PieceKind::King)));
        assert_eq!(game.piece_on_square(60), Some((Color::Black, PieceKind::King)));
        assert_eq!(game.piece_on_square(12), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(game.piece_on_square(28), None);
    }

    #[test]
    fn halfmove_draw_triggers_at_one_hundred_plies() {
        let mut game = GameState::new_game();
        assert!(!game.is_draw_by_halfmove_clock());

        game.halfmove_clock = 99;
        assert!(!game.is_draw_by_halfmove_clock());

        game.halfmove_clock = 100;
        assert!(game.is_draw_by_halfmove_clock());
    }
}
