//! Legal move generation.
//!
//! Pseudo-legal moves from `piece_moves` are played on a copy of the board
//! and dropped when they leave the mover's king attacked. Survivors are
//! tagged with the gives-check flag before the mode filter runs.

use super::bitboards::pop_lsb;
use super::board::Outcome;
use super::{Board, Color, Move, MoveList, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenMode {
    /// Every legal move.
    All,
    /// Captures, promotions and checking moves only.
    Quiescence,
    /// Stop after the first legal move; enough to tell mate or stalemate
    /// from a live position.
    FirstOnly,
    /// Legal captures followed by one defense entry per friendly piece that
    /// another friendly piece protects. Defense entries are never playable.
    CaptureAndDefense,
}

impl Board {
    /// Fill `moves` (cleared first) for the side to move. An empty list is a
    /// terminal position, not an error.
    pub fn generate_moves(&self, mode: GenMode, moves: &mut MoveList) {
        moves.clear();
        let us = self.side_to_move;
        let them = us.opposite();

        let mut pseudo = MoveList::new();
        self.generate_pseudo_legal(&mut pseudo);

        for &mv in pseudo.iter() {
            // Only reachable after a null move out of check
            if mv.captured() == Some(Type::King) {
                continue;
            }
            let mut next = self.clone();
            next.make_move(mv);
            if next.is_check(us) {
                continue;
            }
            if mode == GenMode::FirstOnly {
                moves.push(mv);
                return;
            }

            let mv = if next.is_check(them) { mv.with_check() } else { mv };
            match mode {
                GenMode::Quiescence if mv.is_quiet() => continue,
                GenMode::CaptureAndDefense if !mv.is_capture() => continue,
                _ => moves.push(mv),
            }
        }

        if mode == GenMode::CaptureAndDefense {
            self.defense_entries_into(moves);
        }
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves(GenMode::All, &mut moves);
        moves
    }

    /// Legal moves of the piece on `square`. Empty when the square is empty
    /// or holds a piece of the side not to move.
    pub fn legal_moves_from(&self, square: usize) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|mv| mv.from() == square);
        moves
    }

    pub fn has_legal_move(&self) -> bool {
        let mut moves = MoveList::new();
        self.generate_moves(GenMode::FirstOnly, &mut moves);
        !moves.is_empty()
    }

    /// Find the legal move with these endpoints and promotion.
    pub fn find_move(&self, from: usize, to: usize, promotion: Option<Type>) -> Option<Move> {
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    /// Game state for the side to move. Mate and stalemate take priority
    /// over the fifty-move rule.
    pub fn outcome(&self) -> Outcome {
        if !self.has_legal_move() {
            return if self.in_check() {
                Outcome::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                Outcome::Stalemate
            };
        }
        if self.halfmove_clock >= 100 {
            return Outcome::FiftyMoveRule;
        }
        if self.is_insufficient_material() {
            return Outcome::InsufficientMaterial;
        }
        Outcome::Ongoing
    }

    /// For each friendly piece, the friendly pieces that attack its square.
    /// Encoded as `defender -> defended` with the defended kind in the
    /// capture slot and the defense flag set.
    fn defense_entries_into(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let occupied = self.occupancy();
        let own = self.occupied_by(us);

        for piece_type in Type::ALL {
            let mut pieces = self.pieces(us, piece_type);
            while pieces != 0 {
                let from = pop_lsb(&mut pieces);
                let mut defended = Board::attacks_from(piece_type, us, from, occupied) & own;
                while defended != 0 {
                    let to = pop_lsb(&mut defended);
                    if let Some(target) = self.bitboards.type_at(us, to) {
                        moves.push(
                            Move::new(from, to, us, piece_type)
                                .with_capture(target)
                                .with_defense(),
                        );
                    }
                }
            }
        }
    }
}

impl Board {
    /// Moves of `color` in `mode` whoever is to move; the waiting side's
    /// moves are generated after a null move.
    pub fn generate_moves_for(&self, color: Color, mode: GenMode, moves: &mut MoveList) {
        if self.side_to_move() == color {
            self.generate_moves(mode, moves);
        } else {
            let mut flipped = self.clone();
            flipped.make_null_move();
            flipped.generate_moves(mode, moves);
        }
    }
}
