use std::fmt;
use std::ops::{Deref, DerefMut};

use super::square::square_name;
use super::{Color, Type};

/*-------ARCHITECTURE--------*/

// |  6  |  6  |   3   |   1   |    3     |   3   | 1  |  1   |   1   |   1    |
// | from| to  | piece | color | captured | promo | ep | castle| check | defend |
// |                          26 bits used of 32                              |
//
// captured / promo store piece index + 1, so 0 means "none".

const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const COLOR_SHIFT: u32 = 15;
const CAPTURE_SHIFT: u32 = 16;
const PROMO_SHIFT: u32 = 19;
const EN_PASSANT_BIT: u32 = 1 << 22;
const CASTLING_BIT: u32 = 1 << 23;
const CHECK_BIT: u32 = 1 << 24;
const DEFENSE_BIT: u32 = 1 << 25;

const SQUARE_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x7;

/// One move packed into 32 bits. Copy it freely; it never owns anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    buf: u32,
}

impl Move {
    pub fn new(from: usize, to: usize, color: Color, piece: Type) -> Move {
        debug_assert!(from < 64 && to < 64);
        let buf = from as u32
            | (to as u32) << TO_SHIFT
            | (piece.index() as u32) << PIECE_SHIFT
            | (color.index() as u32) << COLOR_SHIFT;
        Move { buf }
    }

    #[must_use]
    pub fn with_capture(mut self, captured: Type) -> Move {
        self.buf &= !(KIND_MASK << CAPTURE_SHIFT);
        self.buf |= (captured.index() as u32 + 1) << CAPTURE_SHIFT;
        self
    }

    #[must_use]
    pub fn with_promotion(mut self, promotion: Type) -> Move {
        debug_assert!(
            promotion != Type::Pawn && promotion != Type::King,
            "cannot promote to {:?}",
            promotion
        );
        self.buf |= (promotion.index() as u32 + 1) << PROMO_SHIFT;
        self
    }

    /// En passant always captures a pawn.
    #[must_use]
    pub fn with_en_passant(self) -> Move {
        let mut mv = self.with_capture(Type::Pawn);
        mv.buf |= EN_PASSANT_BIT;
        mv
    }

    #[must_use]
    pub fn with_castling(mut self) -> Move {
        self.buf |= CASTLING_BIT;
        self
    }

    #[must_use]
    pub fn with_check(mut self) -> Move {
        self.buf |= CHECK_BIT;
        self
    }

    /// Marks a "defense pairing": a piece protecting a friendly piece on `to`.
    /// Such entries only feed the evaluator and are never played.
    #[must_use]
    pub fn with_defense(mut self) -> Move {
        self.buf |= DEFENSE_BIT;
        self
    }

    #[inline(always)]
    pub fn from(&self) -> usize {
        (self.buf & SQUARE_MASK) as usize
    }

    #[inline(always)]
    pub fn to(&self) -> usize {
        ((self.buf >> TO_SHIFT) & SQUARE_MASK) as usize
    }

    #[inline(always)]
    pub fn piece(&self) -> Type {
        Type::ALL[((self.buf >> PIECE_SHIFT) & KIND_MASK) as usize]
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        if (self.buf >> COLOR_SHIFT) & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline(always)]
    pub fn captured(&self) -> Option<Type> {
        let code = (self.buf >> CAPTURE_SHIFT) & KIND_MASK;
        if code == 0 {
            None
        } else {
            Type::from_index(code as usize - 1)
        }
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        (self.buf >> CAPTURE_SHIFT) & KIND_MASK != 0 && !self.is_defense()
    }

    #[inline(always)]
    pub fn promotion(&self) -> Option<Type> {
        let code = (self.buf >> PROMO_SHIFT) & KIND_MASK;
        if code == 0 {
            None
        } else {
            Type::from_index(code as usize - 1)
        }
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        (self.buf >> PROMO_SHIFT) & KIND_MASK != 0
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.buf & EN_PASSANT_BIT != 0
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.buf & CASTLING_BIT != 0
    }

    #[inline(always)]
    pub fn gives_check(&self) -> bool {
        self.buf & CHECK_BIT != 0
    }

    #[inline(always)]
    pub fn is_defense(&self) -> bool {
        self.buf & DEFENSE_BIT != 0
    }

    /// Neither capture, promotion nor check.
    #[inline]
    pub fn is_quiet(&self) -> bool {
        !self.is_capture() && !self.is_promotion() && !self.gives_check()
    }

    /// Same origin, destination and promotion piece. Ignores the derived
    /// flags, so a hint recorded in another position still matches.
    #[inline]
    pub fn same_move(&self, other: &Move) -> bool {
        self.from() == other.from() && self.to() == other.to() && self.promotion() == other.promotion()
    }

    /// Coordinate notation, e.g. "e2e4" or "e7e8q".
    pub fn to_coord(&self) -> String {
        let mut s = square_name(self.from());
        s.push_str(&square_name(self.to()));
        if let Some(promo) = self.promotion() {
            s.push(promo.letter().to_ascii_lowercase());
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coord())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())?;
        if let Some(captured) = self.captured() {
            write!(f, "x{:?}", captured)?;
        }
        if self.is_castling() {
            f.write_str("(castle)")?;
        }
        if self.is_en_passant() {
            f.write_str("(ep)")?;
        }
        if self.gives_check() {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Proven upper bound on legal moves in any chess position is 218; 256
/// leaves room for pseudo-legal and defense entries.
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity move buffer. Lives on the stack, never allocates.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub const fn new() -> Self {
        Self {
            moves: [Move { buf: 0 }; MAX_MOVES],
            len: 0,
        }
    }

    /// Overflow means the board is corrupted.
    #[inline(always)]
    pub fn push(&mut self, mv: Move) {
        assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Order-preserving removal.
    pub fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(&mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }

    /// Move the entry matching `mv` to the front, keeping the others in order.
    /// Returns false when it is not in the list.
    pub fn move_to_front(&mut self, mv: &Move) -> bool {
        match self.iter().position(|m| m.same_move(mv)) {
            Some(idx) => {
                self.moves[..=idx].rotate_right(1);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, mv: &Move) -> Option<Move> {
        self.iter().copied().find(|m| m.same_move(mv))
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
