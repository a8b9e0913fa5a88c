use crate::error::MoveError;
use crate::game_repr::square::parse_square;
use crate::game_repr::{Board, Move, Type};

/// Resolve a coordinate move ("e2e4", "e7e8q") against the legal moves of
/// `board`. The promotion letter is case-insensitive.
pub fn parse_coord(board: &Board, text: &str) -> Result<Move, MoveError> {
    let text = text.trim();
    let bad = || MoveError::BadCoordinate(text.to_string());

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(bad());
    }
    let from = parse_square(&text[0..2]).ok_or_else(bad)?;
    let to = parse_square(&text[2..4]).ok_or_else(bad)?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => match Type::from_letter(c) {
            Some(kind) if Type::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(bad()),
        },
    };

    board
        .find_move(from, to, promotion)
        .ok_or_else(|| MoveError::Illegal(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_move() {
        let board = Board::new();
        let mv = parse_coord(&board, "e2e4").unwrap();
        assert_eq!(mv.to_coord(), "e2e4");
        assert_eq!(mv.piece(), Type::Pawn);
    }

    #[test]
    fn test_parse_promotion() {
        let board = Board::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(parse_coord(&board, "e7e8q").unwrap().promotion(), Some(Type::Queen));
        assert_eq!(parse_coord(&board, "e7e8N").unwrap().promotion(), Some(Type::Knight));
        // A promotion must name its piece
        assert_eq!(parse_coord(&board, "e7e8"), Err(MoveError::Illegal("e7e8".into())));
        assert_eq!(parse_coord(&board, "e7e8k"), Err(MoveError::BadCoordinate("e7e8k".into())));
    }

    #[test]
    fn test_castling_is_king_two_squares() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(parse_coord(&board, "e1g1").unwrap().is_castling());
        assert!(parse_coord(&board, "e1c1").unwrap().is_castling());
    }

    #[test]
    fn test_rejects_bad_input() {
        let board = Board::new();
        assert_eq!(parse_coord(&board, "e2"), Err(MoveError::BadCoordinate("e2".into())));
        assert_eq!(parse_coord(&board, "i2i4"), Err(MoveError::BadCoordinate("i2i4".into())));
        assert_eq!(parse_coord(&board, "e2e5"), Err(MoveError::Illegal("e2e5".into())));
        // Black piece while White is to move
        assert_eq!(parse_coord(&board, "e7e5"), Err(MoveError::Illegal("e7e5".into())));
    }
}
