use crate::game_repr::bitboards::bishop_attacks;
use crate::game_repr::{Board, MoveList, Type};

impl Board {
    pub fn bishop_moves_into(&self, from: usize, moves: &mut MoveList) {
        let targets = bishop_attacks(from, self.occupancy()) & !self.occupied_by(self.side_to_move);
        self.push_targets(from, Type::Bishop, targets, moves);
    }
}
