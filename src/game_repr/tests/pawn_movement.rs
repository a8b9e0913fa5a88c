use super::*;

// ==================== PAWN MOVEMENT TESTS ====================

#[test]
fn test_pawn_single_and_double_push() {
    let board = Board::new();
    let moves = board.legal_moves_from(12); // e2
    assert_eq!(moves.len(), 2);
    assert!(has_move(&moves, 12, 20));
    assert!(has_move(&moves, 12, 28));
}

#[test]
fn test_double_push_only_from_start_rank() {
    let mut board = kings_only(E1, E8);
    place_piece(&mut board, 20, Color::White, Type::Pawn); // e3
    let moves = board.legal_moves_from(20);
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, 20, 28));
}

#[test]
fn test_double_push_blocked_by_intermediate_piece() {
    let mut board = kings_only(A1, H8);
    place_piece(&mut board, 12, Color::White, Type::Pawn); // e2
    place_piece(&mut board, 20, Color::Black, Type::Knight); // e3

    assert!(board.legal_moves_from(12).is_empty());
}

#[test]
fn test_double_push_blocked_on_target() {
    let mut board = kings_only(A1, H8);
    place_piece(&mut board, 12, Color::White, Type::Pawn);
    place_piece(&mut board, 28, Color::Black, Type::Knight); // e4

    let moves = board.legal_moves_from(12);
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, 12, 20));
}

#[test]
fn test_pawn_captures_diagonally_only() {
    let mut board = kings_only(H1, A8);
    place_piece(&mut board, 28, Color::White, Type::Pawn); // e4
    place_piece(&mut board, 35, Color::Black, Type::Pawn); // d5
    place_piece(&mut board, 37, Color::White, Type::Knight); // f5, own piece
    place_piece(&mut board, 36, Color::Black, Type::Bishop); // e5 blocks the push

    let moves = board.legal_moves_from(28);
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, 28, 35));
    assert!(moves[0].is_capture());
}

#[test]
fn test_black_pawn_moves_down() {
    let mut board = Board::new();
    board.set_side_to_move(Color::Black);
    let moves = board.legal_moves_from(51); // d7
    assert!(has_move(&moves, 51, 43));
    assert!(has_move(&moves, 51, 35));
}
