use crate::game_repr::bitboards::KNIGHT_ATTACKS;
use crate::game_repr::{Board, MoveList, Type};

impl Board {
    /// Knight jumps to any square not held by a friendly piece.
    pub fn knight_moves_into(&self, from: usize, moves: &mut MoveList) {
        let targets = KNIGHT_ATTACKS[from] & !self.occupied_by(self.side_to_move);
        self.push_targets(from, Type::Knight, targets, moves);
    }
}
