// Cross-check against the `chess` crate's move generator.

use std::str::FromStr;

use chess::{ChessMove, MoveGen};

use super::*;

fn reference_perft(board: &chess::Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    MoveGen::new_legal(board)
        .map(|mv| reference_perft(&board.make_move_new(mv), depth - 1))
        .sum()
}

fn to_reference_move(mv: &Move) -> ChessMove {
    let square = |sq: usize| chess::Square::from_str(&square_name(sq)).unwrap();
    let promotion = mv.promotion().map(|p| match p {
        Type::Queen => chess::Piece::Queen,
        Type::Rook => chess::Piece::Rook,
        Type::Bishop => chess::Piece::Bishop,
        _ => chess::Piece::Knight,
    });
    ChessMove::new(square(mv.from()), square(mv.to()), promotion)
}

const POSITIONS: [&str; 4] = [
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

#[test]
fn test_divide_matches_reference() {
    for fen_str in POSITIONS {
        let ours = fen(fen_str);
        let theirs = chess::Board::from_str(fen_str).unwrap();

        for (mv, count) in ours.perft_divide(2) {
            let reference = to_reference_move(&mv);
            assert!(theirs.legal(reference), "{} is not legal for the reference in {}", mv, fen_str);
            assert_eq!(
                count,
                reference_perft(&theirs.make_move_new(reference), 1),
                "{} in {}",
                mv,
                fen_str
            );
        }
        assert_eq!(ours.perft(2), reference_perft(&theirs, 2));
    }
}

#[test]
fn test_move_counts_along_a_walk() {
    // Deterministic walk picking a different index each ply
    for fen_str in POSITIONS {
        let mut ours = fen(fen_str);
        let mut theirs = chess::Board::from_str(fen_str).unwrap();

        for ply in 0..60 {
            let moves = ours.legal_moves();
            assert_eq!(
                moves.len(),
                MoveGen::new_legal(&theirs).len(),
                "ply {} at {}",
                ply,
                ours.to_fen()
            );
            if moves.is_empty() || ours.halfmove_clock() >= 100 {
                break;
            }
            let mv = moves[(ply * 7 + 3) % moves.len()];
            theirs = theirs.make_move_new(to_reference_move(&mv));
            ours.make_move(mv);
        }
    }
}
