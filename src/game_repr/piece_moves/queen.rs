use crate::game_repr::bitboards::queen_attacks;
use crate::game_repr::{Board, MoveList, Type};

impl Board {
    /// Rook and bishop rays combined in one lookup.
    pub fn queen_moves_into(&self, from: usize, moves: &mut MoveList) {
        let targets = queen_attacks(from, self.occupancy()) & !self.occupied_by(self.side_to_move);
        self.push_targets(from, Type::Queen, targets, moves);
    }
}
