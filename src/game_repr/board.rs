use std::cell::Cell;
use std::fmt;

use super::bitboards::*;
use super::square::*;
use super::zobrist::{self, piece_key, side_key};
use super::{Color, Move, Piece, Type};

/*
 * POSITION STATE: PIECES, SIDE TO MOVE, CASTLING, EN PASSANT,
 * MOVE COUNTERS AND THE INCREMENTAL HASH
 */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    #[inline]
    pub fn king_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    #[inline]
    pub fn queen_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    pub fn any(&self) -> bool {
        self.white_king_side || self.white_queen_side || self.black_king_side || self.black_queen_side
    }

    /// A move touching a king or rook home square (from or to) removes the
    /// matching rights. Capturing a rook at home counts too.
    fn touch(&mut self, square: usize) {
        match square {
            E1 => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            H1 => self.white_king_side = false,
            A1 => self.white_queen_side = false,
            E8 => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
            H8 => self.black_king_side = false,
            A8 => self.black_queen_side = false,
            _ => {}
        }
    }
}

/// Everything `make_move` overwrites that cannot be derived from the move
/// itself. Hand it back to `unmake_move` to restore the position exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    pub castling: CastlingRights,
    pub en_passant: u64,
    pub halfmove_clock: u32,
    pub hash: u64,
    pub captured: Option<Type>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// PGN result token.
    pub fn result_str(&self) -> &'static str {
        match self {
            Outcome::Ongoing => "*",
            Outcome::Checkmate { winner: Color::White } => "1-0",
            Outcome::Checkmate { winner: Color::Black } => "0-1",
            _ => "1/2-1/2",
        }
    }
}

#[derive(Clone)]
pub struct Board {
    pub(crate) bitboards: Bitboards,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    /// Single bit or zero
    pub(crate) en_passant: u64,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    occupancy: Cell<u64>,
    occupancy_dirty: Cell<bool>,
}

const BACK_RANK: [Type; 8] = [
    Type::Rook,
    Type::Knight,
    Type::Bishop,
    Type::Queen,
    Type::King,
    Type::Bishop,
    Type::Knight,
    Type::Rook,
];

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for file in 0..8 {
            board.put_piece(make_square(file, 0), Piece::new(Color::White, BACK_RANK[file]));
            board.put_piece(make_square(file, 1), Piece::new(Color::White, Type::Pawn));
            board.put_piece(make_square(file, 6), Piece::new(Color::Black, Type::Pawn));
            board.put_piece(make_square(file, 7), Piece::new(Color::Black, BACK_RANK[file]));
        }
        board.castling = CastlingRights::ALL;
        board
    }

    /// No pieces, White to move, no rights. Only useful for setting up a
    /// position piece by piece.
    pub fn empty() -> Board {
        Board {
            bitboards: Bitboards::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: side_key(),
            occupancy: Cell::new(0),
            occupancy_dirty: Cell::new(false),
        }
    }

    // ---------- queries ----------

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_square(&self) -> Option<usize> {
        if self.en_passant == 0 {
            None
        } else {
            Some(bitscan_forward(self.en_passant))
        }
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// From-scratch hash; always equals `hash()` on a consistent board.
    pub fn compute_hash(&self) -> u64 {
        zobrist::hash_of(&self.bitboards, self.side_to_move)
    }

    #[inline]
    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    #[inline]
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        if self.occupancy() & square_bb(square) == 0 {
            return None;
        }
        self.bitboards.piece_at(square)
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, piece_type: Type) -> u64 {
        self.bitboards.pieces_of_type(color, piece_type)
    }

    #[inline(always)]
    pub fn occupied_by(&self, color: Color) -> u64 {
        self.bitboards.occupied_by_color(color)
    }

    /// Union of all pieces, recomputed only after a mutation.
    #[inline]
    pub fn occupancy(&self) -> u64 {
        if self.occupancy_dirty.get() {
            self.occupancy.set(self.bitboards.all_occupied());
            self.occupancy_dirty.set(false);
        }
        self.occupancy.get()
    }

    /// # Panics
    /// If `color` has no king; such a board is corrupt.
    pub fn king_square(&self, color: Color) -> usize {
        let kings = self.pieces(color, Type::King);
        assert!(kings != 0, "no {:?} king on the board", color);
        bitscan_forward(kings)
    }

    // ---------- setup ----------

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put_piece(&mut self, square: usize, piece: Piece) {
        self.remove_piece(square);
        self.add(piece.color, piece.piece_type, square);
    }

    pub fn remove_piece(&mut self, square: usize) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.remove(piece.color, piece.piece_type, square);
        Some(piece)
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.side_to_move = color;
            self.hash ^= side_key();
        }
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub fn set_en_passant(&mut self, square: Option<usize>) {
        self.en_passant = square.map_or(0, square_bb);
    }

    pub fn set_move_counters(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number.max(1);
    }

    #[inline(always)]
    fn add(&mut self, color: Color, piece_type: Type, square: usize) {
        self.bitboards.set_bit(color, piece_type, square);
        self.hash ^= piece_key(color, piece_type, square);
        self.occupancy_dirty.set(true);
    }

    #[inline(always)]
    fn remove(&mut self, color: Color, piece_type: Type, square: usize) {
        self.bitboards.clear_bit(color, piece_type, square);
        self.hash ^= piece_key(color, piece_type, square);
        self.occupancy_dirty.set(true);
    }

    // ---------- make / unmake ----------

    /// Apply `mv` for the side to move. The move must come from this
    /// position's generator (or match one of its moves).
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let color = mv.color();
        let enemy = color.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();
        debug_assert_eq!(color, self.side_to_move, "{} played out of turn", mv);

        let mut undo = UndoInfo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
            captured: None,
        };

        // Capture removal
        if mv.is_en_passant() {
            self.remove(enemy, Type::Pawn, en_passant_victim(color, to));
            undo.captured = Some(Type::Pawn);
        } else if let Some(victim) = self.bitboards.type_at(enemy, to) {
            self.remove(enemy, victim, to);
            undo.captured = Some(victim);
        }

        // Endpoints, with promotion swapping the piece kind on arrival
        self.remove(color, piece, from);
        self.add(color, mv.promotion().unwrap_or(piece), to);

        if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            self.remove(color, Type::Rook, rook_from);
            self.add(color, Type::Rook, rook_to);
        }

        self.castling.touch(from);
        self.castling.touch(to);

        self.en_passant = if piece == Type::Pawn && from.abs_diff(to) == 16 {
            square_bb((from + to) / 2)
        } else {
            0
        };

        if piece == Type::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = enemy;
        self.hash ^= side_key();

        undo
    }

    /// Exact inverse of `make_move(mv)` given the snapshot it returned.
    pub fn unmake_move(&mut self, mv: Move, undo: UndoInfo) {
        let color = mv.color();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        self.side_to_move = color;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            self.remove(color, Type::Rook, rook_to);
            self.add(color, Type::Rook, rook_from);
        }

        self.remove(color, mv.promotion().unwrap_or(piece), to);
        self.add(color, piece, from);

        if let Some(victim) = undo.captured {
            let square = if mv.is_en_passant() {
                en_passant_victim(color, to)
            } else {
                to
            };
            self.add(color.opposite(), victim, square);
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
        debug_assert_eq!(self.hash, self.compute_hash());
    }

    /// Pass the turn without moving. Clears the en passant target.
    pub fn make_null_move(&mut self) -> UndoInfo {
        let undo = UndoInfo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
            captured: None,
        };
        self.en_passant = 0;
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= side_key();
        undo
    }

    pub fn unmake_null_move(&mut self, undo: UndoInfo) {
        self.side_to_move = self.side_to_move.opposite();
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }

    // ---------- attacks ----------

    /// Squares a `color` `piece_type` on `square` attacks given `occupied`.
    /// Pawns report their diagonal captures only.
    #[inline]
    pub fn attacks_from(piece_type: Type, color: Color, square: usize, occupied: u64) -> u64 {
        match piece_type {
            Type::Pawn => PAWN_ATTACKS[color.index()][square],
            Type::Knight => KNIGHT_ATTACKS[square],
            Type::Bishop => bishop_attacks(square, occupied),
            Type::Rook => rook_attacks(square, occupied),
            Type::Queen => queen_attacks(square, occupied),
            Type::King => KING_ATTACKS[square],
        }
    }

    /// Every `by` piece attacking `square`.
    pub fn attackers_to(&self, square: usize, by: Color) -> u64 {
        let occupied = self.occupancy();
        let queens = self.pieces(by, Type::Queen);

        // A `by` pawn attacks `square` iff a pawn of the other color on
        // `square` would attack it back
        (PAWN_ATTACKS[by.opposite().index()][square] & self.pieces(by, Type::Pawn))
            | (KNIGHT_ATTACKS[square] & self.pieces(by, Type::Knight))
            | (KING_ATTACKS[square] & self.pieces(by, Type::King))
            | (bishop_attacks(square, occupied) & (self.pieces(by, Type::Bishop) | queens))
            | (rook_attacks(square, occupied) & (self.pieces(by, Type::Rook) | queens))
    }

    /// True if any `by` piece attacks `square`. Cheapest kinds are tried
    /// first so the common negative answer exits early.
    pub fn is_attacked(&self, square: usize, by: Color) -> bool {
        if PAWN_ATTACKS[by.opposite().index()][square] & self.pieces(by, Type::Pawn) != 0 {
            return true;
        }
        if KNIGHT_ATTACKS[square] & self.pieces(by, Type::Knight) != 0 {
            return true;
        }
        if KING_ATTACKS[square] & self.pieces(by, Type::King) != 0 {
            return true;
        }

        let occupied = self.occupancy();
        let queens = self.pieces(by, Type::Queen);
        let diagonal = self.pieces(by, Type::Bishop) | queens;
        if diagonal != 0 && bishop_attacks(square, occupied) & diagonal != 0 {
            return true;
        }
        let straight = self.pieces(by, Type::Rook) | queens;
        straight != 0 && rook_attacks(square, occupied) & straight != 0
    }

    /// Is `color`'s king attacked by the opponent?
    #[inline]
    pub fn is_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.opposite())
    }

    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_check(self.side_to_move)
    }

    /// Neither side can possibly mate: bare kings, or a single minor piece
    /// against a bare king, or bishops only, all on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = [Type::Pawn, Type::Rook, Type::Queen]
            .iter()
            .any(|&t| self.pieces(Color::White, t) | self.pieces(Color::Black, t) != 0);
        if heavy {
            return false;
        }

        let knights = self.pieces(Color::White, Type::Knight) | self.pieces(Color::Black, Type::Knight);
        let bishops = self.pieces(Color::White, Type::Bishop) | self.pieces(Color::Black, Type::Bishop);
        let minors = popcount(knights) + popcount(bishops);
        if minors <= 1 {
            return true;
        }

        const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;
        knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & !LIGHT_SQUARES == 0)
    }
}

/// Square of the pawn removed by an en passant capture landing on `to`.
#[inline]
fn en_passant_victim(mover: Color, to: usize) -> usize {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

/// Rook relocation for a castling king landing on `king_to`.
#[inline]
pub(crate) fn castling_rook_squares(king_to: usize) -> (usize, usize) {
    match king_to {
        G1 => (H1, F1),
        C1 => (A1, D1),
        G8 => (H8, F8),
        C8 => (A8, D8),
        _ => panic!("castling king cannot land on {}", square_name(king_to)),
    }
}

impl PartialEq for Board {
    /// Position equality; the occupancy cache is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.bitboards == other.bitboards
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.hash == other.hash
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

/// Text diagram, rank 8 at the top, followed by the FEN and hash.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(make_square(file, rank))
                    .map_or('.', |p| p.to_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "Fen: {}", self.to_fen())?;
        write!(f, "Key: {:016X}", self.hash)
    }
}
