use crate::game_repr::bitboards::rook_attacks;
use crate::game_repr::{Board, MoveList, Type};

impl Board {
    pub fn rook_moves_into(&self, from: usize, moves: &mut MoveList) {
        let targets = rook_attacks(from, self.occupancy()) & !self.occupied_by(self.side_to_move);
        self.push_targets(from, Type::Rook, targets, moves);
    }
}
