//! Standard algebraic notation.

use smallvec::SmallVec;

use crate::error::SanError;
use crate::game_repr::square::{file_char, file_of, parse_square, rank_char, rank_of, square_name};
use crate::game_repr::{Board, Move, Type};

/// SAN for a legal move of `board`: "Nbd7", "exd5", "e8=Q", "O-O", with a
/// '+' or '#' suffix found by playing the move.
pub fn to_san(board: &Board, mv: Move) -> String {
    let mut san = String::with_capacity(8);

    if mv.is_castling() {
        san.push_str(if file_of(mv.to()) == 6 { "O-O" } else { "O-O-O" });
    } else {
        let piece = mv.piece();
        if piece == Type::Pawn {
            if mv.is_capture() {
                san.push(file_char(mv.from()));
            }
        } else {
            san.push(piece.letter());
            disambiguate(board, mv, &mut san);
        }
        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&square_name(mv.to()));
        if let Some(promotion) = mv.promotion() {
            san.push('=');
            san.push(promotion.letter());
        }
    }

    let mut after = board.clone();
    after.make_move(mv);
    if after.in_check() {
        san.push(if after.has_legal_move() { '+' } else { '#' });
    }
    san
}

/// Origin file, then rank, then both: only as much as separates `mv` from
/// other pieces of its kind that reach the same square.
fn disambiguate(board: &Board, mv: Move, san: &mut String) {
    let rivals: SmallVec<[Move; 4]> = board
        .legal_moves()
        .iter()
        .copied()
        .filter(|other| other.piece() == mv.piece() && other.to() == mv.to() && other.from() != mv.from())
        .collect();
    if rivals.is_empty() {
        return;
    }

    let from = mv.from();
    if rivals.iter().all(|other| file_of(other.from()) != file_of(from)) {
        san.push(file_char(from));
    } else {
        san.push(file_char(from));
        san.push(rank_char(from));
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SanToken {
    piece: Option<Type>,
    from_file: Option<usize>,
    from_rank: Option<usize>,
    to: usize,
    promotion: Option<Type>,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Castle { king_side: bool },
    Move(SanToken),
}

/// Resolve a SAN token against the legal moves of `board`. Trailing check,
/// mate and annotation marks ("+", "#", "!", "?") are ignored, "0-0" is
/// read as "O-O", and the '=' before a promotion letter may be left out.
pub fn parse_san(board: &Board, token: &str) -> Result<Move, SanError> {
    let token = token.trim();
    let parsed = parse_token(token).ok_or_else(|| SanError::BadToken(token.to_string()))?;

    let matches: SmallVec<[Move; 4]> = board
        .legal_moves()
        .iter()
        .copied()
        .filter(|mv| match &parsed {
            Parsed::Castle { king_side } => mv.is_castling() && (file_of(mv.to()) == 6) == *king_side,
            Parsed::Move(t) => {
                mv.piece() == t.piece.unwrap_or(Type::Pawn)
                    && mv.to() == t.to
                    && mv.promotion() == t.promotion
                    && !mv.is_castling()
                    && t.from_file.map_or(true, |f| file_of(mv.from()) == f)
                    && t.from_rank.map_or(true, |r| rank_of(mv.from()) == r)
            }
        })
        .collect();

    match matches.len() {
        0 => Err(SanError::NoMatch(token.to_string())),
        1 => Ok(matches[0]),
        n => Err(SanError::Ambiguous {
            token: token.to_string(),
            candidates: n,
        }),
    }
}

fn parse_token(token: &str) -> Option<Parsed> {
    let core = token.trim_end_matches(['+', '#', '!', '?']);
    if !core.is_ascii() || core.is_empty() {
        return None;
    }

    match core {
        "O-O" | "0-0" => return Some(Parsed::Castle { king_side: true }),
        "O-O-O" | "0-0-0" => return Some(Parsed::Castle { king_side: false }),
        _ => {}
    }

    let mut rest = core;
    let mut t = SanToken::default();

    // Promotion suffix: "=Q" or a bare "Q" after the rank digit
    let last = rest.chars().last()?;
    if !last.is_ascii_digit() {
        let promotion = Type::from_letter(last).filter(|k| Type::PROMOTIONS.contains(k))?;
        t.promotion = Some(promotion);
        rest = &rest[..rest.len() - 1];
        rest = rest.strip_suffix('=').unwrap_or(rest);
    }

    if rest.len() < 2 {
        return None;
    }
    t.to = parse_square(&rest[rest.len() - 2..])?;
    rest = &rest[..rest.len() - 2];

    if let Some(first) = rest.chars().next() {
        if first.is_ascii_uppercase() {
            let piece = Type::from_letter(first).filter(|&k| k != Type::Pawn)?;
            t.piece = Some(piece);
            rest = &rest[1..];
        }
    }
    rest = rest.strip_suffix('x').unwrap_or(rest);

    for c in rest.chars() {
        match c {
            'a'..='h' if t.from_file.is_none() && t.from_rank.is_none() => {
                t.from_file = Some((c as u8 - b'a') as usize);
            }
            '1'..='8' if t.from_rank.is_none() => t.from_rank = Some((c as u8 - b'1') as usize),
            _ => return None,
        }
    }

    if t.promotion.is_some() && t.piece.is_some() {
        return None;
    }
    Some(Parsed::Move(t))
}
