//! Zobrist keys.
//!
//! A position's hash is the XOR of one key per occupied (square, color,
//! piece) plus the side key when White is to move. `Board` keeps it up to
//! date incrementally; [`hash_of`] recomputes it from scratch.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bitboards::{pop_lsb, Bitboards};
use super::{Color, Type};

pub struct ZobristKeys {
    /// [color][piece_type][square]
    pieces: [[[u64; 64]; 6]; 2],
    white_to_move: u64,
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    // Fixed seed so hashes are reproducible between runs
    let mut rng = StdRng::seed_from_u64(0x517c_c1b7_2722_0a95);
    let mut pieces = [[[0u64; 64]; 6]; 2];
    for color in &mut pieces {
        for piece_type in color {
            for square in piece_type {
                *square = rng.gen();
            }
        }
    }
    ZobristKeys {
        pieces,
        white_to_move: rng.gen(),
    }
});

pub fn init() {
    Lazy::force(&ZOBRIST);
}

#[inline(always)]
pub fn piece_key(color: Color, piece_type: Type, square: usize) -> u64 {
    ZOBRIST.pieces[color.index()][piece_type.index()][square]
}

#[inline(always)]
pub fn side_key() -> u64 {
    ZOBRIST.white_to_move
}

/// Full recomputation, used to seed a freshly set-up board and to verify
/// the incremental value.
pub fn hash_of(bitboards: &Bitboards, side_to_move: Color) -> u64 {
    let mut hash = 0u64;
    for color in [Color::White, Color::Black] {
        for piece_type in Type::ALL {
            let mut bb = bitboards.pieces_of_type(color, piece_type);
            while bb != 0 {
                hash ^= piece_key(color, piece_type, pop_lsb(&mut bb));
            }
        }
    }
    if side_to_move == Color::White {
        hash ^= side_key();
    }
    hash
}
