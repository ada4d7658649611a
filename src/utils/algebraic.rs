//! Square/coordinate-text conversions reused by the FEN and UCI codecs.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate pair (for example "e4") to a square index.
#[inline]
pub fn algebraic_to_square(text: &str) -> EngineResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::MoveParse(format!("invalid square: {text}")));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(EngineError::MoveParse(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::MoveParse(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to its coordinate pair.
#[inline]
pub fn square_to_algebraic(square: Square) -> EngineResult<String> {
    if square > 63 {
        return Err(EngineError::MoveParse(format!(
            "square index out of bounds: {square}"
        )));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);

    Ok(format!("{file_char}{rank_char}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn round_trip_corner_squares() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0).expect("0 should convert"), "a1");
        assert_eq!(square_to_algebraic(63).expect("63 should convert"), "h8");
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
        assert!(algebraic_to_square("a11").is_err());
        assert!(square_to_algebraic(64).is_err());
    }
}
