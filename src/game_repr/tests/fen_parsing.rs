// FEN parsing tests: piece placement, state fields, and that a failed
// parse leaves nothing behind.

use super::*;
use crate::game_repr::bitboards::popcount;

#[test]
fn test_start_position_pieces() {
    let board = fen(START_FEN);

    assert_eq!(board.piece_at(A1), Some(Piece::new(Color::White, Type::Rook)));
    assert_eq!(board.piece_at(E1), Some(Piece::new(Color::White, Type::King)));
    assert_eq!(board.piece_at(E8), Some(Piece::new(Color::Black, Type::King)));
    for sq in 8..16 {
        assert_eq!(board.piece_at(sq), Some(Piece::new(Color::White, Type::Pawn)));
    }
    for sq in 48..56 {
        assert_eq!(board.piece_at(sq), Some(Piece::new(Color::Black, Type::Pawn)));
    }
    for sq in 16..48 {
        assert_eq!(board.piece_at(sq), None);
    }
}

#[test]
fn test_state_fields() {
    let board = fen("r3k2r/8/8/8/3pP3/8/8/R3K2R b Qk e3 3 27");
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.en_passant_square(), Some(20));
    assert_eq!(board.halfmove_clock(), 3);
    assert_eq!(board.fullmove_number(), 27);
    let rights = board.castling_rights();
    assert!(!rights.white_king_side && rights.white_queen_side);
    assert!(rights.black_king_side && !rights.black_queen_side);
}

#[test]
fn test_from_str() {
    let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    assert_eq!(popcount(board.occupancy()), 2);
    assert!("not a fen".parse::<Board>().is_err());
}

#[test]
fn test_counters_advance_in_fen() {
    let mut board = Board::new();
    play(&mut board, "g1f3");
    assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1");
    play(&mut board, "e7e5");
    assert_eq!(board.to_fen(), "rnbqkbnr/pppp1ppp/8/4p3/8/5N2/PPPPPPPP/RNBQKB1R w KQkq e6 0 2");
}

#[test]
fn test_kings_are_required() {
    assert!(matches!(
        Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(crate::error::FenError::KingCount { color: "black", count: 0 })
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
        Err(crate::error::FenError::KingCount { color: "white", count: 2 })
    ));
}
