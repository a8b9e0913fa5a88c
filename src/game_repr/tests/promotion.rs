use super::*;

// ==================== PROMOTION TESTS ====================

#[test]
fn test_push_promotion_expands_to_four() {
    let mut board = kings_only(A1, H6);
    place_piece(&mut board, 52, Color::White, Type::Pawn); // e7

    let moves = board.legal_moves_from(52);
    assert_eq!(moves.len(), 4);
    let kinds: Vec<_> = moves.iter().map(|m| m.promotion()).collect();
    assert_eq!(
        kinds,
        vec![Some(Type::Queen), Some(Type::Rook), Some(Type::Bishop), Some(Type::Knight)]
    );
}

#[test]
fn test_capture_promotion() {
    let mut board = kings_only(A1, H6);
    place_piece(&mut board, 52, Color::White, Type::Pawn); // e7
    place_piece(&mut board, E8, Color::Black, Type::Knight);
    place_piece(&mut board, D8, Color::Black, Type::Rook);

    let moves = board.legal_moves_from(52);
    assert_eq!(moves.len(), 4, "only the d8 captures are possible");
    assert!(moves
        .iter()
        .all(|m| m.to() == D8 && m.captured() == Some(Type::Rook) && m.is_promotion()));
}

#[test]
fn test_black_promotion() {
    let mut board = kings_only(H8, A8);
    place_piece(&mut board, 11, Color::Black, Type::Pawn); // d2
    board.set_side_to_move(Color::Black);

    let moves = board.legal_moves_from(11);
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.to() == D1));
}

#[test]
fn test_promotion_replaces_pawn() {
    let mut board = kings_only(A1, H6);
    place_piece(&mut board, 52, Color::White, Type::Pawn);
    let before = board.clone();

    let mv = board.find_move(52, E8, Some(Type::Knight)).unwrap();
    let undo = board.make_move(mv);
    assert_eq!(board.piece_at(E8), Some(Piece::new(Color::White, Type::Knight)));
    assert_eq!(board.pieces(Color::White, Type::Pawn), 0);
    assert_eq!(board.hash(), board.compute_hash());

    board.unmake_move(mv, undo);
    assert_eq!(board, before);
}

#[test]
fn test_blocked_pawn_cannot_promote() {
    let mut board = kings_only(A1, H6);
    place_piece(&mut board, 52, Color::White, Type::Pawn);
    place_piece(&mut board, E8, Color::Black, Type::Bishop);

    assert!(board.legal_moves_from(52).is_empty());
}
