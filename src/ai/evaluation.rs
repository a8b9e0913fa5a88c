//! Static evaluation. Every score here is White-relative, in centipawns:
//! positive favours White. The search flips the sign for Black.

use super::config::EvalKind;
use super::piece_square_tables::{pst_value, Phase};
use crate::game_repr::bitboards::{pop_lsb, popcount};
use crate::game_repr::{Board, Color, GenMode, MoveList, Type};

/// Magnitude of a mate score. The search subtracts the ply distance so a
/// faster mate scores higher.
pub const MATE_SCORE: i32 = 30_000;

/// Deepest ply a mate score can be reported from.
pub const MAX_PLY: i32 = 256;

// Game phase weights (start position = 24, bare kings and pawns = 0)
const KNIGHT_PHASE: i32 = 1;
const BISHOP_PHASE: i32 = 1;
const ROOK_PHASE: i32 = 2;
const QUEEN_PHASE: i32 = 4;
pub const TOTAL_PHASE: i32 = KNIGHT_PHASE * 4 + BISHOP_PHASE * 4 + ROOK_PHASE * 4 + QUEEN_PHASE * 2;
const ENDGAME_PHASE: i32 = 6;

const MOBILITY_WEIGHT: i32 = 4;
const ACTION_WEIGHT: i32 = 2;

pub fn is_mate_score(value: i32) -> bool {
    value.abs() >= MATE_SCORE - MAX_PLY
}

/// Score of `board` under `kind`. A mated side scores `-MATE_SCORE` for its
/// color and a stalemate scores 0, whichever evaluator is chosen.
pub fn evaluate(board: &Board, kind: EvalKind) -> i32 {
    terminal_value(board).unwrap_or_else(|| static_eval(board, kind))
}

/// Score of `board` under `kind` without looking for mate. The search
/// detects positions without moves itself, at their ply.
pub fn static_eval(board: &Board, kind: EvalKind) -> i32 {
    match kind {
        EvalKind::Material => material(board),
        EvalKind::Positional => material(board) + positional(board),
        EvalKind::Mobility => material(board) + positional(board) + mobility(board) + action(board),
    }
}

/// `Some` when the side to move has no legal move: a mate score against
/// the mated side, or 0 for stalemate.
pub fn terminal_value(board: &Board) -> Option<i32> {
    if board.has_legal_move() {
        return None;
    }
    if board.in_check() {
        Some(-board.side_to_move().sign() * MATE_SCORE)
    } else {
        Some(0)
    }
}

pub fn material(board: &Board) -> i32 {
    let mut score = 0;
    for piece_type in Type::ALL {
        let white = popcount(board.pieces(Color::White, piece_type)) as i32;
        let black = popcount(board.pieces(Color::Black, piece_type)) as i32;
        score += (white - black) * piece_type.value();
    }
    score
}

/// 0 (pawn ending) to `TOTAL_PHASE` (all minor and major pieces on).
pub fn game_phase(board: &Board) -> i32 {
    let mut phase = 0;
    for color in [Color::White, Color::Black] {
        phase += popcount(board.pieces(color, Type::Knight)) as i32 * KNIGHT_PHASE;
        phase += popcount(board.pieces(color, Type::Bishop)) as i32 * BISHOP_PHASE;
        phase += popcount(board.pieces(color, Type::Rook)) as i32 * ROOK_PHASE;
        phase += popcount(board.pieces(color, Type::Queen)) as i32 * QUEEN_PHASE;
    }
    phase.min(TOTAL_PHASE)
}

pub fn phase_of(board: &Board) -> Phase {
    if game_phase(board) <= ENDGAME_PHASE {
        Phase::Endgame
    } else {
        Phase::Middlegame
    }
}

/// Piece-square bonus sum; the king table switches with the phase.
pub fn positional(board: &Board) -> i32 {
    let phase = phase_of(board);
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        for piece_type in Type::ALL {
            let mut pieces = board.pieces(color, piece_type);
            while pieces != 0 {
                let square = pop_lsb(&mut pieces);
                score += color.sign() * pst_value(piece_type, color, square, phase);
            }
        }
    }
    score
}

/// Legal moves for `color`, whoever is to move.
fn moves_for(board: &Board, color: Color, mode: GenMode) -> MoveList {
    let mut moves = MoveList::new();
    board.generate_moves_for(color, mode, &mut moves);
    moves
}

/// Legal move count difference. Castling counts twice.
pub fn mobility(board: &Board) -> i32 {
    let count = |color| {
        moves_for(board, color, GenMode::All)
            .iter()
            .map(|mv| if mv.is_castling() { 2 } else { 1 })
            .sum::<i32>()
    };
    MOBILITY_WEIGHT * (count(Color::White) - count(Color::Black))
}

/// Attacked enemy pieces plus defended own pieces, difference of both sides.
pub fn action(board: &Board) -> i32 {
    let count = |color| moves_for(board, color, GenMode::CaptureAndDefense).len() as i32;
    ACTION_WEIGHT * (count(Color::White) - count(Color::Black))
}
