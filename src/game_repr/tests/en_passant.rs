use super::*;

// ==================== EN PASSANT TESTS ====================

#[test]
fn test_en_passant_after_double_push() {
    let mut board = kings_only(E1, E8);
    place_piece(&mut board, 36, Color::White, Type::Pawn); // e5
    place_piece(&mut board, 51, Color::Black, Type::Pawn); // d7
    board.set_side_to_move(Color::Black);

    play(&mut board, "d7d5");
    assert_eq!(board.en_passant_square(), Some(43)); // d6

    let moves = board.legal_moves_from(36);
    let ep: Vec<_> = moves.iter().filter(|m| m.is_en_passant()).collect();
    assert_eq!(ep.len(), 1, "exactly one en passant capture");
    assert_eq!(ep[0].to(), 43);
    assert_eq!(ep[0].captured(), Some(Type::Pawn));
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let mut board = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    play(&mut board, "e5d6");

    assert_eq!(board.piece_at(35), None, "d5 pawn should be gone");
    assert_eq!(board.piece_at(43), Some(Piece::new(Color::White, Type::Pawn)));
    assert_eq!(board.hash(), board.compute_hash());
}

#[test]
fn test_en_passant_expires() {
    let mut board = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    play(&mut board, "e1e2");
    play(&mut board, "e8e7");

    assert_eq!(board.en_passant_square(), None);
    assert_eq!(count_where(&board.legal_moves(), |m| m.is_en_passant()), 0);
}

#[test]
fn test_en_passant_no_file_wrapping() {
    let mut board = kings_only(E1, E8);
    place_piece(&mut board, 39, Color::White, Type::Pawn); // h5
    place_piece(&mut board, 48, Color::Black, Type::Pawn); // a7
    board.set_side_to_move(Color::Black);

    play(&mut board, "a7a5");
    assert_eq!(count_where(&board.legal_moves(), |m| m.is_en_passant()), 0);
}

#[test]
fn test_en_passant_illegal_when_rank_pinned() {
    // Removing both pawns from the fifth rank would expose the king to h5
    let board = fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1");
    assert_eq!(count_where(&board.legal_moves(), |m| m.is_en_passant()), 0);
}

#[test]
fn test_en_passant_captures_checking_pawn() {
    let board = fen("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1");
    assert!(board.in_check());

    let moves = board.legal_moves();
    assert!(moves.iter().any(|m| m.is_en_passant() && m.from() == 28 && m.to() == 19));
}

#[test]
fn test_en_passant_unmake_restores_board() {
    let mut board = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let before = board.clone();
    let mv = board.find_move(36, 43, None).unwrap();
    assert!(mv.is_en_passant());

    let undo = board.make_move(mv);
    board.unmake_move(mv, undo);
    assert_eq!(board, before);
    assert_eq!(board.en_passant_square(), Some(43));
}
