use crate::game_repr::bitboards::{square_bb, KING_ATTACKS};
use crate::game_repr::square::{E1, E8};
use crate::game_repr::{Board, Color, Move, MoveList, Type};

impl Board {
    pub fn king_moves_into(&self, from: usize, moves: &mut MoveList) {
        let us = self.side_to_move;
        let targets = KING_ATTACKS[from] & !self.occupied_by(us);
        self.push_targets(from, Type::King, targets, moves);
        self.castling_moves_into(from, moves);
    }

    /// Castling needs the king on its home square and out of check, the
    /// right still held, the rook at home, every square between king and
    /// rook empty and the square the king passes over unattacked. Landing
    /// in check is left to the legality filter.
    fn castling_moves_into(&self, from: usize, moves: &mut MoveList) {
        let us = self.side_to_move;
        let enemy = us.opposite();
        let home = match us {
            Color::White => E1,
            Color::Black => E8,
        };
        let rights = self.castling;
        if from != home || !(rights.king_side(us) || rights.queen_side(us)) {
            return;
        }
        if self.is_attacked(home, enemy) {
            return;
        }

        let occupied = self.occupancy();
        let rooks = self.pieces(us, Type::Rook);

        let king_side_path = square_bb(home + 1) | square_bb(home + 2);
        if rights.king_side(us)
            && rooks & square_bb(home + 3) != 0
            && occupied & king_side_path == 0
            && !self.is_attacked(home + 1, enemy)
        {
            moves.push(Move::new(home, home + 2, us, Type::King).with_castling());
        }

        let queen_side_path = square_bb(home - 1) | square_bb(home - 2) | square_bb(home - 3);
        if rights.queen_side(us)
            && rooks & square_bb(home - 4) != 0
            && occupied & queen_side_path == 0
            && !self.is_attacked(home - 1, enemy)
        {
            moves.push(Move::new(home, home - 2, us, Type::King).with_castling());
        }
    }
}
