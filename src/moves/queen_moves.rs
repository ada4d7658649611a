//! Queen attack generation: union of the rook and bishop attack sets.

use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::queen_attacks;

    #[test]
    fn open_board_queen_on_d4_sees_twenty_seven_squares() {
        assert_eq!(queen_attacks(27, 0).count_ones(), 27);
    }
}
