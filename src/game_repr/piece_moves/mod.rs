//! Pseudo-legal move generation, one file per piece kind.
//!
//! Moves produced here may leave the mover's king attacked; `movegen`
//! filters them.

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use super::bitboards::pop_lsb;
use super::{Board, Move, MoveList, Type};

impl Board {
    /// All pseudo-legal moves for the side to move, grouped by piece kind
    /// (pawns first), squares ascending within a kind.
    pub(crate) fn generate_pseudo_legal(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        for piece_type in Type::ALL {
            let mut pieces = self.pieces(us, piece_type);
            while pieces != 0 {
                let from = pop_lsb(&mut pieces);
                match piece_type {
                    Type::Pawn => self.pawn_moves_into(from, moves),
                    Type::Knight => self.knight_moves_into(from, moves),
                    Type::Bishop => self.bishop_moves_into(from, moves),
                    Type::Rook => self.rook_moves_into(from, moves),
                    Type::Queen => self.queen_moves_into(from, moves),
                    Type::King => self.king_moves_into(from, moves),
                }
            }
        }
    }

    /// One move per bit of `targets`, tagged with the captured kind when the
    /// target holds an enemy piece.
    #[inline]
    pub(crate) fn push_targets(&self, from: usize, piece_type: Type, mut targets: u64, moves: &mut MoveList) {
        let us = self.side_to_move;
        let enemy = us.opposite();
        while targets != 0 {
            let to = pop_lsb(&mut targets);
            let mv = Move::new(from, to, us, piece_type);
            match self.bitboards.type_at(enemy, to) {
                Some(victim) => moves.push(mv.with_capture(victim)),
                None => moves.push(mv),
            }
        }
    }
}
