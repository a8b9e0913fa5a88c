use crate::game_repr::bitboards::*;
use crate::game_repr::{Board, Color, Move, MoveList, Type};

impl Board {
    /// Single and double pushes, diagonal captures, en passant. A move
    /// reaching the last rank expands into four promotions (Q, R, B, N).
    pub fn pawn_moves_into(&self, from: usize, moves: &mut MoveList) {
        let us = self.side_to_move;
        let enemy = us.opposite();
        let empty = !self.occupancy();
        let last_rank = match us {
            Color::White => RANK_8,
            Color::Black => RANK_1,
        };

        let single = PAWN_PUSHES[us.index()][from] & empty;
        let mut targets = single;
        // The double step needs the intermediate square free as well
        if single != 0 {
            targets |= PAWN_DOUBLE_PUSHES[us.index()][from] & empty;
        }
        targets |= PAWN_ATTACKS[us.index()][from] & self.occupied_by(enemy);

        while targets != 0 {
            let to = pop_lsb(&mut targets);
            let mut mv = Move::new(from, to, us, Type::Pawn);
            if let Some(victim) = self.bitboards.type_at(enemy, to) {
                mv = mv.with_capture(victim);
            }

            if square_bb(to) & last_rank != 0 {
                for promotion in Type::PROMOTIONS {
                    moves.push(mv.with_promotion(promotion));
                }
            } else {
                moves.push(mv);
            }
        }

        let en_passant = PAWN_ATTACKS[us.index()][from] & self.en_passant;
        if en_passant != 0 {
            let to = bitscan_forward(en_passant);
            moves.push(Move::new(from, to, us, Type::Pawn).with_en_passant());
        }
    }
}
