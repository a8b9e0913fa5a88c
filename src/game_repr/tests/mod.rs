use super::square::*;
use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Board with only the two kings, White to move, no castling rights.
pub fn kings_only(white_king: usize, black_king: usize) -> Board {
    let mut board = Board::empty();
    place_piece(&mut board, white_king, Color::White, Type::King);
    place_piece(&mut board, black_king, Color::Black, Type::King);
    board
}

pub fn place_piece(board: &mut Board, idx: usize, color: Color, piece_type: Type) {
    board.put_piece(idx, Piece::new(color, piece_type));
}

pub fn fen(s: &str) -> Board {
    Board::from_fen(s).unwrap_or_else(|e| panic!("bad test FEN '{}': {}", s, e))
}

/// Check if a move with these endpoints exists in the list
pub fn has_move(moves: &[Move], from: usize, to: usize) -> bool {
    moves.iter().any(|m| m.from() == from && m.to() == to)
}

pub fn count_where(moves: &[Move], pred: impl Fn(&Move) -> bool) -> usize {
    moves.iter().filter(|m| pred(m)).count()
}

/// Play a legal move given in coordinate form ("e2e4", "e7e8q").
pub fn play(board: &mut Board, coord: &str) -> Move {
    let mv = board
        .legal_moves()
        .iter()
        .copied()
        .find(|m| m.to_coord() == coord)
        .unwrap_or_else(|| panic!("{} is not legal in {}", coord, board.to_fen()));
    board.make_move(mv);
    mv
}

// ==================== TEST MODULES ====================

mod en_passant;
mod fen_parsing;
mod king_movement;
mod pawn_movement;
mod perft;
mod piece_movement;
mod promotion;
