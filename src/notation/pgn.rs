//! PGN reading and writing. Only the main line is kept: comments,
//! variations and numeric annotation glyphs are skipped when reading.

use std::fmt::Write as _;

use crate::error::PgnError;
use crate::game_repr::{Board, Color, Move, START_FEN};

use super::san::{parse_san, to_san};

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];
const LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnGame {
    /// Tag pairs in file order.
    pub tags: Vec<(String, String)>,
    /// Position the moves start from: the `FEN` tag if present.
    pub start: Board,
    pub moves: Vec<Move>,
    /// Termination marker, when the movetext has one.
    pub result: Option<String>,
}

impl PgnGame {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Position after the last move.
    pub fn final_board(&self) -> Board {
        let mut board = self.start.clone();
        for &mv in &self.moves {
            board.make_move(mv);
        }
        board
    }
}

/// Read the first game of `text`.
pub fn parse_pgn(text: &str) -> Result<PgnGame, PgnError> {
    let mut tags = Vec::new();
    let mut movetext = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && movetext.trim().is_empty() {
            tags.push(parse_tag(trimmed)?);
        } else if trimmed.starts_with('%') {
            // escape line
            continue;
        } else {
            movetext.push_str(line);
            movetext.push('\n');
        }
    }

    let start = match tags.iter().find(|(key, _)| key == "FEN") {
        Some((_, fen)) => Board::from_fen(fen)?,
        None => Board::new(),
    };

    let mut board = start.clone();
    let mut moves = Vec::new();
    let mut result = None;

    for token in tokenize(&movetext)? {
        if RESULTS.contains(&token) {
            result = Some(token.to_string());
            break;
        }
        let san = strip_move_number(token);
        if san.is_empty() {
            continue;
        }
        let mv = parse_san(&board, san).map_err(|source| PgnError::Move {
            ply: moves.len() + 1,
            source,
        })?;
        board.make_move(mv);
        moves.push(mv);
    }

    log::trace!("parsed PGN with {} tags and {} moves", tags.len(), moves.len());
    Ok(PgnGame {
        tags,
        start,
        moves,
        result,
    })
}

/// `[Name "value"]` with `\"` and `\\` escapes inside the value.
fn parse_tag(line: &str) -> Result<(String, String), PgnError> {
    let bad = || PgnError::BadTag(line.to_string());
    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(bad)?
        .trim();

    let (name, rest) = inner.split_once(char::is_whitespace).ok_or_else(bad)?;
    let rest = rest.trim();
    let quoted = rest
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(bad)?;

    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(chars.next().ok_or_else(bad)?);
        } else {
            value.push(c);
        }
    }
    Ok((name.to_string(), value))
}

/// Split movetext into move, number and result tokens, dropping comments,
/// variations and NAGs.
fn tokenize(movetext: &str) -> Result<Vec<&str>, PgnError> {
    let mut tokens = Vec::new();
    let bytes = movetext.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                let end = movetext[i..].find('}').ok_or(PgnError::Unterminated("comment"))?;
                i += end + 1;
            }
            b';' => {
                i += movetext[i..].find('\n').unwrap_or(movetext.len() - i);
            }
            b'(' => {
                let mut depth = 0usize;
                loop {
                    match bytes.get(i) {
                        Some(b'(') => depth += 1,
                        Some(b')') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        Some(b'{') => {
                            let end = movetext[i..].find('}').ok_or(PgnError::Unterminated("comment"))?;
                            i += end;
                        }
                        Some(_) => {}
                        None => return Err(PgnError::Unterminated("variation")),
                    }
                    i += 1;
                }
                i += 1;
            }
            b')' => return Err(PgnError::BadToken(")".to_string())),
            c if c.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r' | b'{' | b'(' | b')' | b';') {
                    i += 1;
                }
                let token = &movetext[start..i];
                if !token.starts_with('$') {
                    tokens.push(token);
                }
            }
        }
    }
    Ok(tokens)
}

/// "12.", "12...", "12.e4" and "12...e5" lose their number.
fn strip_move_number(token: &str) -> &str {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && token[digits..].starts_with('.') {
        token[digits..].trim_start_matches('.')
    } else {
        token
    }
}

/// Export `moves` played from `start` with the seven standard tags. A start
/// other than the initial position adds `SetUp` and `FEN` tags.
pub fn write_pgn(start: &Board, moves: &[Move], result: &str) -> String {
    let mut tags = vec![
        ("Event", "?".to_string()),
        ("Site", "?".to_string()),
        ("Date", "????.??.??".to_string()),
        ("Round", "?".to_string()),
        ("White", "?".to_string()),
        ("Black", "?".to_string()),
        ("Result", result.to_string()),
    ];
    let fen = start.to_fen();
    if fen != START_FEN {
        tags.push(("SetUp", "1".to_string()));
        tags.push(("FEN", fen));
    }

    let mut pgn = String::new();
    for (name, value) in &tags {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        let _ = writeln!(pgn, "[{} \"{}\"]", name, escaped);
    }
    pgn.push('\n');

    let mut line = String::new();
    let mut push_word = |pgn: &mut String, word: &str| {
        if !line.is_empty() && line.len() + 1 + word.len() > LINE_WIDTH {
            pgn.push_str(&line);
            pgn.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    };

    let mut board = start.clone();
    for (i, &mv) in moves.iter().enumerate() {
        let number = board.fullmove_number();
        match board.side_to_move() {
            Color::White => push_word(&mut pgn, &format!("{}.", number)),
            Color::Black if i == 0 => push_word(&mut pgn, &format!("{}...", number)),
            Color::Black => {}
        }
        push_word(&mut pgn, &to_san(&board, mv));
        board.make_move(mv);
    }
    push_word(&mut pgn, result);

    pgn.push_str(&line);
    pgn.push('\n');
    pgn
}
