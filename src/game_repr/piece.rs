/// Piece kind. The discriminant doubles as the index into per-kind tables
/// (bitboards, Zobrist keys, piece-square tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Type {
    pub const ALL: [Type; 6] = [
        Type::Pawn,
        Type::Knight,
        Type::Bishop,
        Type::Rook,
        Type::Queen,
        Type::King,
    ];

    /// Promotion choices in the order they are generated.
    pub const PROMOTIONS: [Type; 4] = [Type::Queen, Type::Rook, Type::Bishop, Type::Knight];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<Type> {
        Type::ALL.get(idx).copied()
    }

    /// Standard material value in centipawns. The king has none.
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            Type::Pawn => 100,
            Type::Knight => 300,
            Type::Bishop => 320,
            Type::Rook => 500,
            Type::Queen => 900,
            Type::King => 0,
        }
    }

    /// Upper-case letter used by SAN and FEN (White spelling).
    pub fn letter(self) -> char {
        match self {
            Type::Pawn => 'P',
            Type::Knight => 'N',
            Type::Bishop => 'B',
            Type::Rook => 'R',
            Type::Queen => 'Q',
            Type::King => 'K',
        }
    }

    /// Parse a piece letter in either case.
    pub fn from_letter(c: char) -> Option<Type> {
        match c.to_ascii_uppercase() {
            'P' => Some(Type::Pawn),
            'N' => Some(Type::Knight),
            'B' => Some(Type::Bishop),
            'R' => Some(Type::Rook),
            'Q' => Some(Type::Queen),
            'K' => Some(Type::King),
            _ => None,
        }
    }

    #[inline]
    pub fn is_slider(self) -> bool {
        matches!(self, Type::Bishop | Type::Rook | Type::Queen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// +1 for White, -1 for Black. Turns White-relative scores into
    /// side-relative ones and back.
    #[inline(always)]
    pub fn sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: Type,
}

impl Piece {
    pub const fn new(color: Color, piece_type: Type) -> Self {
        Self { color, piece_type }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = Type::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, piece_type })
    }

    pub fn to_char(self) -> char {
        let c = self.piece_type.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn is(&self, color: Color) -> bool {
        self.color == color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_roundtrip() {
        for c in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(piece.to_char(), c);
        }
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn test_color_sign_and_opposite() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn test_type_index_matches_order() {
        for (i, t) in Type::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(Type::from_index(i), Some(*t));
        }
        assert_eq!(Type::from_index(6), None);
    }
}
