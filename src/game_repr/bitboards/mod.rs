use super::{Color, Piece, Type};

pub mod magic;
pub mod tables;
pub use magic::{bishop_attacks, queen_attacks, rook_attacks};
pub use tables::*;

/// Twelve piece bitboards, one per (color, piece kind).
/// Each bit marks presence of that piece on the square (0-63).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitboards {
    /// Indexed by [color * 6 + piece_type]
    /// White: 0=Pawn .. 5=King, Black: 6=Pawn .. 11=King
    pieces: [u64; 12],
}

impl Bitboards {
    pub const fn empty() -> Self {
        Self { pieces: [0; 12] }
    }

    #[inline(always)]
    pub fn set_bit(&mut self, color: Color, piece_type: Type, square: usize) {
        self.pieces[slot(color, piece_type)] |= square_bb(square);
    }

    #[inline(always)]
    pub fn clear_bit(&mut self, color: Color, piece_type: Type, square: usize) {
        self.pieces[slot(color, piece_type)] &= !square_bb(square);
    }

    #[inline(always)]
    pub fn test_bit(&self, color: Color, piece_type: Type, square: usize) -> bool {
        self.pieces[slot(color, piece_type)] & square_bb(square) != 0
    }

    #[inline(always)]
    pub fn pieces_of_type(&self, color: Color, piece_type: Type) -> u64 {
        self.pieces[slot(color, piece_type)]
    }

    /// Union of the six boards of one color.
    #[inline(always)]
    pub fn occupied_by_color(&self, color: Color) -> u64 {
        let base = color.index() * 6;
        self.pieces[base..base + 6].iter().fold(0, |acc, bb| acc | bb)
    }

    /// Union of all twelve boards. Recomputed on every call; `Board` caches it.
    #[inline(always)]
    pub fn all_occupied(&self) -> u64 {
        self.pieces.iter().fold(0, |acc, bb| acc | bb)
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        let bit = square_bb(square);
        self.pieces
            .iter()
            .position(|bb| bb & bit != 0)
            .map(|idx| Piece {
                color: if idx < 6 { Color::White } else { Color::Black },
                piece_type: Type::ALL[idx % 6],
            })
    }

    /// Kind of the `color` piece standing on `square`, if any.
    #[inline]
    pub fn type_at(&self, color: Color, square: usize) -> Option<Type> {
        let bit = square_bb(square);
        Type::ALL
            .into_iter()
            .find(|&t| self.pieces_of_type(color, t) & bit != 0)
    }
}

#[inline(always)]
fn slot(color: Color, piece_type: Type) -> usize {
    color.index() * 6 + piece_type.index()
}

#[inline(always)]
pub const fn square_bb(square: usize) -> u64 {
    1u64 << square
}

/// Pop the least significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let sq = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    sq
}

/// Index of the least significant bit (the bitboard must be non-zero)
#[inline(always)]
pub fn bitscan_forward(bb: u64) -> usize {
    bb.trailing_zeros() as usize
}

/// Index of the most significant bit (the bitboard must be non-zero)
#[inline(always)]
pub fn bitscan_reverse(bb: u64) -> usize {
    63 - bb.leading_zeros() as usize
}

#[inline(always)]
pub fn popcount(bb: u64) -> u32 {
    bb.count_ones()
}

pub const FILE_A: u64 = 0x0101010101010101;
pub const FILE_H: u64 = 0x8080808080808080;

pub const RANK_1: u64 = 0x00000000000000FF;
pub const RANK_2: u64 = 0x000000000000FF00;
pub const RANK_7: u64 = 0x00FF000000000000;
pub const RANK_8: u64 = 0xFF00000000000000;
