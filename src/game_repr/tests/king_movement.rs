use super::*;

// ==================== KING MOVEMENT TESTS ====================

#[test]
fn test_king_center_has_eight_moves() {
    let board = kings_only(27, H8); // d4
    assert_eq!(board.legal_moves_from(27).len(), 8);
}

#[test]
fn test_king_corner_has_three_moves() {
    let board = kings_only(A1, H8);
    let moves = board.legal_moves_from(A1);
    assert_eq!(moves.len(), 3);
    assert!(has_move(&moves, A1, B1));
    assert!(has_move(&moves, A1, 8));
    assert!(has_move(&moves, A1, 9));
}

#[test]
fn test_kings_keep_distance() {
    let board = kings_only(28, 44); // e4 vs e6
    let moves = board.legal_moves_from(28);
    for sq in [35, 36, 37] {
        assert!(!has_move(&moves, 28, sq), "king may not touch the other king");
    }
    assert_eq!(moves.len(), 5);
}

#[test]
fn test_king_cannot_capture_defended_piece() {
    let mut board = kings_only(E1, H8);
    place_piece(&mut board, 12, Color::Black, Type::Rook); // e2
    place_piece(&mut board, 20, Color::Black, Type::Rook); // e3 defends e2
    let moves = board.legal_moves_from(E1);
    assert!(!has_move(&moves, E1, 12));
}

#[test]
fn test_king_captures_undefended_piece() {
    let mut board = kings_only(E1, H8);
    place_piece(&mut board, 12, Color::Black, Type::Rook); // e2
    let moves = board.legal_moves_from(E1);
    assert!(has_move(&moves, E1, 12));
    assert!(moves.iter().any(|m| m.to() == 12 && m.captured() == Some(Type::Rook)));
}
