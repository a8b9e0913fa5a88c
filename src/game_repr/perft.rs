use rayon::prelude::*;

use super::{Board, GenMode, Move, MoveList};

impl Board {
    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut board = self.clone();
        perft_inner(&mut board, depth)
    }

    /// Per-root-move leaf counts, in generation order. Root moves are
    /// spread over rayon's pool, each on its own board copy.
    pub fn perft_divide(&self, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let roots: Vec<(Move, Board)> = self
            .legal_moves()
            .iter()
            .map(|&mv| (mv, self.clone()))
            .collect();

        roots
            .into_par_iter()
            .map(|(mv, mut board)| {
                board.make_move(mv);
                let count = if depth == 1 { 1 } else { perft_inner(&mut board, depth - 1) };
                (mv, count)
            })
            .collect()
    }
}

/// Make/unmake walk, the one place besides tests that relies on
/// `unmake_move` restoring the board exactly.
fn perft_inner(board: &mut Board, depth: u32) -> u64 {
    let mut moves = MoveList::new();
    board.generate_moves(GenMode::All, &mut moves);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        let undo = board.make_move(mv);
        nodes += perft_inner(board, depth - 1);
        board.unmake_move(mv, undo);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_start_shallow() {
        let board = Board::new();
        assert_eq!(board.perft(0), 1);
        assert_eq!(board.perft(1), 20);
        assert_eq!(board.perft(2), 400);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let board = Board::new();
        let divide = board.perft_divide(3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8902);
        let e2e4 = divide.iter().find(|(mv, _)| mv.to_coord() == "e2e4").unwrap();
        assert_eq!(e2e4.1, 600);
    }
}
