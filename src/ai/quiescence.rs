//! Quiescence search.
//!
//! Past the nominal depth only captures, promotions and (on the first
//! extra ply) checking moves are searched, so a position is never scored
//! in the middle of an exchange. The static score is a lower bound the
//! side to move can always claim by declining every capture (stand pat).
//! A side in check cannot stand pat and searches all of its evasions.

use super::negamax::{dead_end_value, SearchEngine, SearchNode, INFINITY};
use super::variation::Variation;
use crate::game_repr::{GenMode, MoveList};

fn quiet_leaf(value: i32, qdepth: u32) -> Variation {
    Variation {
        qdepth,
        ..Variation::leaf(value)
    }
}

impl SearchEngine {
    pub(super) fn quiescence<N: SearchNode>(
        &mut self,
        node: &N,
        ply: u32,
        qdepth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Variation {
        self.nodes += 1;
        self.qnodes += 1;
        self.seldepth = self.seldepth.max(ply);

        // Mate or stalemate, before any static score
        if !node.has_legal_move() {
            return Variation {
                qdepth,
                ..Variation::terminal(dead_end_value(node, ply))
            };
        }

        let eval = self.config.eval;
        if qdepth >= self.config.max_quiescence_depth {
            return quiet_leaf(node.evaluate(eval), qdepth);
        }

        let in_check = node.in_check();
        let mut best = None;

        if !in_check {
            let stand_pat = node.evaluate(eval);
            if self.config.alpha_beta {
                if stand_pat >= beta {
                    return quiet_leaf(stand_pat, qdepth);
                }
                alpha = alpha.max(stand_pat);
            }
            best = Some(quiet_leaf(stand_pat, qdepth));
        }

        let mut moves = MoveList::new();
        let mode = if in_check { GenMode::All } else { GenMode::Quiescence };
        node.generate(mode, &mut moves);

        // Quiet checks only on the first extra ply
        if !in_check && qdepth > 0 {
            moves.retain(|mv| mv.is_capture() || mv.is_promotion());
        }

        if self.config.mvv_lva {
            moves.sort_mvv_lva();
        }

        for &mv in moves.iter() {
            if self.should_stop() {
                break;
            }

            let child = node.play(mv);
            let (a, b) = if self.config.alpha_beta {
                (-beta, -alpha)
            } else {
                (-INFINITY, INFINITY)
            };
            let sub = self.quiescence(&child, ply + 1, qdepth + 1, a, b);
            let value = -sub.value;

            if best.as_ref().map_or(true, |b: &Variation| value > b.value) {
                best = Some(Variation::extend(mv, sub, value));
            }

            if self.config.alpha_beta {
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
        }

        best.unwrap_or_else(|| quiet_leaf(node.evaluate(eval), qdepth))
    }
}
