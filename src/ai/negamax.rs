//! Negamax search with alpha-beta pruning.
//!
//! Each side maximizes the negation of its opponent's score, so one
//! function serves both colors. Every node returns a `Variation`: the best
//! line found below it and its value for the side to move.
//!
//! Positions branch by value: `SearchNode::play` returns a fresh child and
//! the parent is never modified, so there is nothing to unmake.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::{EvalKind, SearchConfig};
use super::evaluation::{self, MATE_SCORE, MAX_PLY};
use super::transposition_table::{Bound, TranspositionTable};
use super::variation::Variation;
use crate::game_repr::{Board, GenMode, Move, MoveList};

/// Larger than any reachable score.
pub const INFINITY: i32 = MATE_SCORE + 1_000;

/// Nodes between wall-clock checks.
const POLL_INTERVAL: u64 = 1_024;

/// A position the engine can search.
pub trait SearchNode: Sized {
    /// Fill `moves` (cleared first) for the side to move.
    fn generate(&self, mode: GenMode, moves: &mut MoveList);

    /// The position after `mv`. `self` is left as it was.
    fn play(&self, mv: Move) -> Self;

    /// Static score from the side to move's point of view.
    fn evaluate(&self, kind: EvalKind) -> i32;

    fn in_check(&self) -> bool;

    /// Whether the side to move has any move at all.
    fn has_legal_move(&self) -> bool {
        let mut moves = MoveList::new();
        self.generate(GenMode::FirstOnly, &mut moves);
        !moves.is_empty()
    }

    fn hash(&self) -> u64;
}

/// Mate or stalemate value of a node with no moves left.
pub(super) fn dead_end_value<N: SearchNode>(node: &N, ply: u32) -> i32 {
    if node.in_check() {
        mated_in(ply)
    } else {
        0
    }
}

impl SearchNode for Board {
    #[inline]
    fn generate(&self, mode: GenMode, moves: &mut MoveList) {
        self.generate_moves(mode, moves);
    }

    #[inline]
    fn play(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }

    #[inline]
    fn evaluate(&self, kind: EvalKind) -> i32 {
        evaluation::static_eval(self, kind) * self.side_to_move().sign()
    }

    #[inline]
    fn in_check(&self) -> bool {
        Board::in_check(self)
    }

    #[inline]
    fn has_legal_move(&self) -> bool {
        Board::has_legal_move(self)
    }

    #[inline]
    fn hash(&self) -> u64 {
        Board::hash(self)
    }
}

/// Score for the side to move when it is mated `ply` plies from the root.
#[inline]
pub fn mated_in(ply: u32) -> i32 {
    -(MATE_SCORE - ply as i32)
}

/// Mate scores are stored relative to the node, not the root, so an entry
/// stays valid wherever the position is reached again.
fn value_to_tt(value: i32, ply: u32) -> i32 {
    if value >= MATE_SCORE - MAX_PLY {
        value + ply as i32
    } else if value <= -(MATE_SCORE - MAX_PLY) {
        value - ply as i32
    } else {
        value
    }
}

fn value_from_tt(value: i32, ply: u32) -> i32 {
    if value >= MATE_SCORE - MAX_PLY {
        value - ply as i32
    } else if value <= -(MATE_SCORE - MAX_PLY) {
        value + ply as i32
    } else {
        value
    }
}

pub struct SearchEngine {
    pub(super) config: SearchConfig,
    tt: TranspositionTable,
    pub(super) nodes: u64,
    pub(super) qnodes: u64,
    /// Deepest ply visited, quiescence included.
    pub(super) seldepth: u32,
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
    next_poll: u64,
    interrupted: bool,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_stop_flag(config, Arc::new(AtomicBool::new(false)))
    }

    /// Engine that also stops when `stop` is raised by another thread.
    pub fn with_stop_flag(config: SearchConfig, stop: Arc<AtomicBool>) -> Self {
        let entries = if config.use_tt { config.tt_entries } else { 1 };
        Self {
            tt: TranspositionTable::with_entries(entries),
            config,
            nodes: 0,
            qnodes: 0,
            seldepth: 0,
            stop,
            deadline: None,
            next_poll: POLL_INTERVAL,
            interrupted: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration. The table is rebuilt (and so emptied)
    /// only when its size changes.
    pub fn set_config(&mut self, config: SearchConfig) {
        let entries = if config.use_tt { config.tt_entries } else { 1 };
        if entries.max(1) != self.tt.capacity() {
            self.tt = TranspositionTable::with_entries(entries);
        }
        self.config = config;
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn qnodes(&self) -> u64 {
        self.qnodes
    }

    pub fn seldepth(&self) -> u32 {
        self.seldepth
    }

    pub fn reset_counters(&mut self) {
        self.nodes = 0;
        self.qnodes = 0;
        self.seldepth = 0;
        self.next_poll = POLL_INTERVAL;
    }

    /// The last search ended early on the stop flag or the deadline.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search `root` to `depth` plies. `hint` is a line from an earlier
    /// search; its moves are tried first wherever the search follows it.
    /// When interrupted, the returned variation is whatever the loops had
    /// found so far.
    pub fn search<N: SearchNode>(&mut self, root: &N, depth: u32, hint: Option<&[Move]>) -> Variation {
        self.interrupted = false;
        let result = self.negamax(root, depth, 0, -INFINITY, INFINITY, hint);

        let stats = self.tt.stats();
        log::debug!(
            "depth {} nodes {} qnodes {} tt stores {} new {} collisions {} hit rate {:.2}",
            depth,
            self.nodes,
            self.qnodes,
            stats.stores,
            stats.new_entries,
            stats.collisions,
            stats.hit_rate()
        );
        result
    }

    /// Checked once per move in both the main and quiescence loops.
    pub(super) fn should_stop(&mut self) -> bool {
        if self.interrupted {
            return true;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.interrupted = true;
        } else if let Some(deadline) = self.deadline {
            if self.nodes >= self.next_poll {
                self.next_poll = self.nodes + POLL_INTERVAL;
                self.interrupted = Instant::now() >= deadline;
            }
        }
        self.interrupted
    }

    fn negamax<N: SearchNode>(
        &mut self,
        node: &N,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
        hint: Option<&[Move]>,
    ) -> Variation {
        if depth == 0 && self.config.quiescence {
            return self.quiescence(node, ply, 0, alpha, beta);
        }

        self.nodes += 1;
        self.seldepth = self.seldepth.max(ply);

        if depth == 0 {
            if !node.has_legal_move() {
                return Variation::terminal(dead_end_value(node, ply));
            }
            return Variation::leaf(node.evaluate(self.config.eval));
        }

        let alpha_orig = alpha;
        let hash = node.hash();
        let mut tt_move = None;

        if self.config.use_tt {
            if let Some(entry) = self.tt.probe(hash) {
                tt_move = entry.best_move;
                if ply > 0 && entry.depth >= depth {
                    let value = value_from_tt(entry.value, ply);
                    // Exact values inside the window would cut the line
                    // short; they only order moves.
                    let cutoff = match entry.bound {
                        Bound::Exact => value <= alpha || value >= beta,
                        Bound::Lower => value >= beta,
                        Bound::Upper => value <= alpha,
                    };
                    if cutoff {
                        return Variation {
                            depth,
                            ..Variation::leaf(value)
                        };
                    }
                }
            }
        }

        let mut moves = MoveList::new();
        node.generate(GenMode::All, &mut moves);

        if moves.is_empty() {
            return Variation {
                depth,
                ..Variation::terminal(dead_end_value(node, ply))
            };
        }

        if self.config.mvv_lva {
            moves.sort_mvv_lva();
        }

        let mut child_hint = None;
        if self.config.use_hint {
            if let Some((first, rest)) = hint.and_then(|line| line.split_first()) {
                if moves.move_to_front(first) {
                    child_hint = Some(rest);
                }
            }
        }
        if child_hint.is_none() {
            if let Some(mv) = tt_move {
                moves.move_to_front(&mv);
            }
        }

        let mut best: Option<Variation> = None;
        for (i, &mv) in moves.iter().enumerate() {
            if self.should_stop() {
                break;
            }

            let child = node.play(mv);
            let (a, b) = if self.config.alpha_beta {
                (-beta, -alpha)
            } else {
                (-INFINITY, INFINITY)
            };
            let hint = if i == 0 { child_hint } else { None };
            let sub = self.negamax(&child, depth - 1, ply + 1, a, b, hint);
            let value = -sub.value;

            // Strict: the first move to reach the best value keeps it
            if best.as_ref().map_or(true, |b| value > b.value) {
                best = Some(Variation::extend(mv, sub, value));
            }

            if self.config.alpha_beta {
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
        }

        let Some(mut best) = best else {
            // Stopped before the first move
            return Variation::leaf(node.evaluate(self.config.eval));
        };
        best.depth = depth;

        if self.config.use_tt && !self.interrupted {
            let bound = if best.value <= alpha_orig {
                Bound::Upper
            } else if best.value >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt
                .store(depth, hash, value_to_tt(best.value, ply), best.best_move(), bound);
        }

        best
    }
}
