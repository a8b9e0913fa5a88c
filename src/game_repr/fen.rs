use std::fmt::Write as _;
use std::str::FromStr;

use super::board::CastlingRights;
use super::square::*;
use super::{Board, Color, Piece, Type};
use crate::error::FenError;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Decode a FEN string. Six fields are expected; four (no move counters)
    /// are accepted with counters defaulting to "0 1". The position is built
    /// on a scratch board and only returned once every field is valid.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut board = Board::empty();
        parse_placement(fields[0], &mut board)?;

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        board.set_side_to_move(side);
        board.set_castling_rights(parse_castling(fields[2])?);
        board.set_en_passant(parse_en_passant(fields[3], side)?);

        if fields.len() == 6 {
            let halfmove = fields[4]
                .parse::<u32>()
                .map_err(|_| FenError::HalfmoveClock(fields[4].to_string()))?;
            let fullmove = fields[5]
                .parse::<u32>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| FenError::FullmoveNumber(fields[5].to_string()))?;
            board.set_move_counters(halfmove, fullmove);
        }

        Ok(board)
    }

    /// Encode as six-field FEN. Castling letters always come out in KQkq order.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(make_square(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(fen, "{}", empty);
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{}", empty);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = self.castling;
        let before = fen.len();
        for (held, c) in [
            (rights.white_king_side, 'K'),
            (rights.white_queen_side, 'Q'),
            (rights.black_king_side, 'k'),
            (rights.black_queen_side, 'q'),
        ] {
            if held {
                fen.push(c);
            }
        }
        if fen.len() == before {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_square() {
            Some(sq) => fen.push_str(&square_name(sq)),
            None => fen.push('-'),
        }

        let _ = write!(fen, " {} {}", self.halfmove_clock, self.fullmove_number);
        fen
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

fn parse_placement(placement: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        let mut previous_was_digit = false;

        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::BadPiece(c));
                }
                // "44" would not survive a round trip
                if previous_was_digit {
                    return Err(FenError::SplitEmptyRun(rank + 1));
                }
                file += run as usize;
                previous_was_digit = true;
                continue;
            }

            let piece = Piece::from_char(c).ok_or(FenError::BadPiece(c))?;
            if file >= 8 {
                return Err(FenError::RankLength {
                    rank: rank + 1,
                    squares: file + 1,
                });
            }
            let square = make_square(file, rank);
            if piece.piece_type == Type::Pawn && (rank == 0 || rank == 7) {
                return Err(FenError::PawnOnBackRank(square_name(square)));
            }
            board.put_piece(square, piece);
            file += 1;
            previous_was_digit = false;
        }

        if file != 8 {
            return Err(FenError::RankLength {
                rank: rank + 1,
                squares: file,
            });
        }
    }

    for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
        let count = board.pieces(color, Type::King).count_ones();
        if count != 1 {
            return Err(FenError::KingCount { color: name, count });
        }
    }
    Ok(())
}

/// "-" or a non-empty subsequence of "KQkq", in that order.
fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::NONE);
    }
    let bad = || FenError::Castling(field.to_string());

    let mut rights = CastlingRights::NONE;
    let mut last = None;
    for c in field.chars() {
        let order = "KQkq".find(c).ok_or_else(bad)?;
        if last.is_some_and(|prev| order <= prev) {
            return Err(bad());
        }
        last = Some(order);
        match c {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            _ => rights.black_queen_side = true,
        }
    }
    if last.is_none() {
        return Err(bad());
    }
    Ok(rights)
}

/// The target lies behind a pawn that just double-stepped, so it sits on
/// rank 6 when White is to move and rank 3 when Black is.
fn parse_en_passant(field: &str, side: Color) -> Result<Option<usize>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let square = parse_square(field).ok_or_else(|| FenError::EnPassant(field.to_string()))?;
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(FenError::EnPassant(field.to_string()));
    }
    Ok(Some(square))
}
