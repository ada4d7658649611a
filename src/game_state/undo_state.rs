use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
///
/// The move word already carries the moved, captured, and promotion pieces,
/// so only the fields that cannot be reconstructed from it are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
}
