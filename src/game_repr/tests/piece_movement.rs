use super::*;

// ==================== KNIGHT / SLIDER MOVEMENT TESTS ====================

#[test]
fn test_knight_center_and_corner() {
    let mut board = kings_only(H1, H8);
    place_piece(&mut board, 27, Color::White, Type::Knight); // d4
    place_piece(&mut board, A1, Color::White, Type::Knight);

    assert_eq!(board.legal_moves_from(27).len(), 8);
    assert_eq!(board.legal_moves_from(A1).len(), 2);
}

#[test]
fn test_knight_starting_moves() {
    let board = Board::new();
    let moves = board.legal_moves_from(G1);
    assert_eq!(moves.len(), 2);
    assert!(has_move(&moves, G1, 21)); // f3
    assert!(has_move(&moves, G1, 23)); // h3
}

#[test]
fn test_rook_on_empty_board() {
    let mut board = kings_only(H1, H8);
    place_piece(&mut board, 27, Color::White, Type::Rook); // d4
    assert_eq!(board.legal_moves_from(27).len(), 14);
}

#[test]
fn test_bishop_stops_at_blockers() {
    let mut board = kings_only(H1, H8);
    place_piece(&mut board, C1, Color::White, Type::Bishop);
    place_piece(&mut board, 11, Color::White, Type::Pawn); // d2 own
    place_piece(&mut board, 9, Color::Black, Type::Pawn); // b2 enemy

    let moves = board.legal_moves_from(C1);
    assert_eq!(moves.len(), 1, "only the capture on b2");
    assert!(has_move(&moves, C1, 9));
}

#[test]
fn test_queen_combines_rook_and_bishop() {
    let mut board = kings_only(H1 + 8, B8); // h2, off every queen line
    place_piece(&mut board, 27, Color::White, Type::Queen); // d4
    assert_eq!(board.legal_moves_from(27).len(), 27);
}

#[test]
fn test_start_position_sliders_are_stuck() {
    let board = Board::new();
    for sq in [A1, C1, D1, F1, H1] {
        assert!(board.legal_moves_from(sq).is_empty());
    }
}
