//! Iterative deepening.
//!
//! The engine is run at depth 1, 2, 3 and so on, each iteration seeded with
//! the previous principal variation as an ordering hint. Results are only
//! reported for iterations that finished; an interrupted iteration is
//! thrown away unless nothing better exists.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::SearchConfig;
use super::evaluation::{is_mate_score, MATE_SCORE};
use super::negamax::{SearchEngine, SearchNode};
use super::variation::{Line, Variation};
use crate::game_repr::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    /// Finished, or stopped early with the last complete result kept.
    Stopped,
    /// Stopped early; the result must be discarded.
    Cancelled,
}

const RUNNING: u8 = 0;
const STOPPED: u8 = 1;
const CANCELLED: u8 = 2;

/// Remote control for a search running on another thread.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    status: Arc<AtomicU8>,
    armed: Arc<AtomicBool>,
}

impl SearchHandle {
    fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            status: Arc::new(AtomicU8::new(STOPPED)),
            armed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// End the search and keep the last complete iteration.
    pub fn stop(&self) {
        let _ = self
            .status
            .compare_exchange(RUNNING, STOPPED, Ordering::AcqRel, Ordering::Acquire);
        self.stop.store(true, Ordering::Release);
    }

    /// End the search and discard its result.
    pub fn cancel(&self) {
        self.status.store(CANCELLED, Ordering::Release);
        self.stop.store(true, Ordering::Release);
    }

    pub fn status(&self) -> SearchStatus {
        match self.status.load(Ordering::Acquire) {
            RUNNING => SearchStatus::Running,
            CANCELLED => SearchStatus::Cancelled,
            _ => SearchStatus::Stopped,
        }
    }

    /// Mark the next search as running now, before it starts on its worker
    /// thread. A `stop` or `cancel` issued after this call applies to that
    /// search even if it arrives before the worker gets going.
    pub fn arm(&self) {
        self.stop.store(false, Ordering::Release);
        self.status.store(RUNNING, Ordering::Release);
        self.armed.store(true, Ordering::Release);
    }

    fn begin(&self) {
        if !self.armed.swap(false, Ordering::AcqRel) {
            self.stop.store(false, Ordering::Release);
            self.status.store(RUNNING, Ordering::Release);
        }
    }

    fn finish(&self) -> SearchStatus {
        let _ = self
            .status
            .compare_exchange(RUNNING, STOPPED, Ordering::AcqRel, Ordering::Acquire);
        self.status()
    }
}

/// Snapshot handed to the progress callback after each completed iteration.
/// `value` is from the side to move's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub value: i32,
    pub depth: u32,
    pub qdepth: u32,
    /// Deepest ply visited, quiescence included.
    pub seldepth: u32,
    pub line: Vec<Move>,
    /// Nodes of this iteration.
    pub nodes: u64,
    /// Time spent on this iteration.
    pub elapsed: Duration,
    pub nps: u64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info depth {} seldepth {} score {} nodes {} time {} nps {}",
            self.depth,
            self.seldepth,
            score_to_uci(self.value),
            self.nodes,
            self.elapsed.as_millis(),
            self.nps
        )?;
        if !self.line.is_empty() {
            f.write_str(" pv")?;
            for mv in &self.line {
                write!(f, " {}", mv)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub value: i32,
    pub depth: u32,
    pub qdepth: u32,
    pub principal_variation: Vec<Move>,
    /// Nodes over all iterations.
    pub nodes: u64,
    pub time_ms: u64,
    pub nps: u64,
    /// False when taken from an interrupted first iteration.
    pub complete: bool,
}

impl SearchResult {
    fn from_variation(variation: &Variation, depth: u32, complete: bool) -> Self {
        Self {
            best_move: variation.best_move(),
            value: variation.value,
            depth,
            qdepth: variation.qdepth,
            principal_variation: variation.line.to_vec(),
            nodes: 0,
            time_ms: 0,
            nps: 0,
            complete,
        }
    }
}

/// "cp 35", or "mate 3" / "mate -2" counted in full moves.
pub fn score_to_uci(value: i32) -> String {
    if is_mate_score(value) {
        let moves = (MATE_SCORE - value.abs() + 1) / 2;
        if value > 0 {
            format!("mate {}", moves)
        } else {
            format!("mate {}", -moves)
        }
    } else {
        format!("cp {}", value)
    }
}

fn rate(nodes: u64, elapsed: Duration) -> u64 {
    let micros = elapsed.as_micros() as u64;
    if micros == 0 {
        nodes
    } else {
        nodes.saturating_mul(1_000_000) / micros
    }
}

pub struct IterativeDeepening {
    engine: SearchEngine,
    handle: SearchHandle,
}

impl IterativeDeepening {
    pub fn new(config: SearchConfig) -> Self {
        let handle = SearchHandle::new();
        let engine = SearchEngine::with_stop_flag(config, Arc::clone(&handle.stop));
        Self { engine, handle }
    }

    pub fn handle(&self) -> SearchHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &SearchConfig {
        self.engine.config()
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.engine.set_config(config);
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Forget everything learned from earlier searches.
    pub fn clear(&mut self) {
        self.engine.clear_tt();
    }

    /// Search `root` up to the configured depth. Returns `None` when the
    /// search was cancelled. A root with no legal moves yields a result
    /// with no best move.
    pub fn search<N: SearchNode>(&mut self, root: &N, mut on_progress: impl FnMut(&Progress)) -> Option<SearchResult> {
        self.handle.begin();

        let max_depth = self.engine.config().max_depth.max(1);
        let start = Instant::now();
        let deadline = self.engine.config().time_limit.map(|limit| start + limit);
        self.engine.set_deadline(deadline);

        let mut best: Option<SearchResult> = None;
        let mut hint = Line::new();
        let mut total_nodes = 0;

        for depth in 1..=max_depth {
            self.engine.reset_counters();
            let iteration_start = Instant::now();
            let hint_line = if hint.is_empty() { None } else { Some(hint.as_slice()) };
            let variation = self.engine.search(root, depth, hint_line);
            total_nodes += self.engine.nodes();

            if self.engine.was_interrupted() {
                if best.is_none() && !variation.is_empty() {
                    best = Some(SearchResult::from_variation(&variation, depth, false));
                }
                break;
            }

            let elapsed = iteration_start.elapsed();
            let progress = Progress {
                value: variation.value,
                depth,
                qdepth: variation.qdepth,
                seldepth: self.engine.seldepth(),
                line: variation.line.to_vec(),
                nodes: self.engine.nodes(),
                elapsed,
                nps: rate(self.engine.nodes(), elapsed),
            };
            log::info!("{}", progress);
            on_progress(&progress);

            best = Some(SearchResult::from_variation(&variation, depth, true));
            if variation.terminal {
                break;
            }
            hint = variation.line;
        }

        self.engine.set_deadline(None);

        if self.handle.finish() == SearchStatus::Cancelled {
            log::debug!("search cancelled after {} nodes", total_nodes);
            return None;
        }

        best.map(|mut result| {
            let elapsed = start.elapsed();
            result.nodes = total_nodes;
            result.time_ms = elapsed.as_millis() as u64;
            result.nps = rate(total_nodes, elapsed);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Board;

    fn coords(line: &[Move]) -> Vec<String> {
        line.iter().map(|mv| mv.to_coord()).collect()
    }

    #[test]
    fn test_pawn_fork_wins_queen() {
        let board = Board::from_fen("8/8/8/1q1k4/8/2P5/1N6/4K3 w - - 0 1").unwrap();
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(5));
        let result = search.search(&board, |_| {}).unwrap();

        assert_eq!(result.best_move.map(|m| m.to_coord()), Some("c3c4".to_string()));
        assert_eq!(result.depth, 5);
        assert!(result.complete);
        assert_eq!(
            coords(&result.principal_variation[..4]),
            vec!["c3c4", "b5c4", "b2c4", "d5c4"]
        );
        assert_eq!(search.handle().status(), SearchStatus::Stopped);
    }

    #[test]
    fn test_progress_after_each_iteration() {
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(3));
        let handle = search.handle();
        let mut depths = Vec::new();
        let result = search
            .search(&Board::new(), |progress| {
                assert_eq!(handle.status(), SearchStatus::Running);
                assert!(!progress.line.is_empty());
                depths.push(progress.depth);
            })
            .unwrap();

        assert_eq!(depths, vec![1, 2, 3]);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_stops_at_first_mate() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(8));
        let mut iterations = 0;
        let result = search.search(&board, |_| iterations += 1).unwrap();

        assert_eq!(result.best_move.map(|m| m.to_coord()), Some("a1a8".to_string()));
        assert_eq!(result.value, MATE_SCORE - 1);
        assert!(iterations < 8);
    }

    #[test]
    fn test_no_legal_moves() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let mut search = IterativeDeepening::new(SearchConfig::default());
        let result = search.search(&board, |_| {}).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_stop_keeps_last_complete_iteration() {
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(6));
        let handle = search.handle();
        let result = search
            .search(&Board::new(), |progress| {
                if progress.depth == 2 {
                    handle.stop();
                }
            })
            .unwrap();

        assert_eq!(result.depth, 2);
        assert!(result.complete);
        assert_eq!(search.handle().status(), SearchStatus::Stopped);
    }

    #[test]
    fn test_cancel_discards_result() {
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(6));
        let handle = search.handle();
        let mut reported = 0;
        let result = search.search(&Board::new(), |_| {
            reported += 1;
            handle.cancel();
        });

        assert!(result.is_none());
        assert_eq!(reported, 1);
        assert_eq!(search.handle().status(), SearchStatus::Cancelled);
    }

    #[test]
    fn test_new_search_clears_old_stop() {
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(2));
        search.handle().cancel();
        let result = search.search(&Board::new(), |_| {});
        assert_eq!(result.map(|r| r.depth), Some(2));
    }

    #[test]
    fn test_armed_search_honours_early_stop() {
        let mut search = IterativeDeepening::new(SearchConfig::default().with_depth(4));
        let handle = search.handle();
        handle.arm();
        handle.cancel();
        assert!(search.search(&Board::new(), |_| {}).is_none());
    }

    #[test]
    fn test_time_limit_acts_as_stop() {
        let config = SearchConfig::default()
            .with_depth(64)
            .with_time_limit(Duration::from_millis(50));
        let mut search = IterativeDeepening::new(config);
        let started = Instant::now();
        let result = search.search(&Board::new(), |_| {}).unwrap();

        assert!(result.best_move.is_some());
        assert!(result.depth < 64);
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(search.handle().status(), SearchStatus::Stopped);
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(score_to_uci(35), "cp 35");
        assert_eq!(score_to_uci(-120), "cp -120");
        assert_eq!(score_to_uci(MATE_SCORE - 1), "mate 1");
        assert_eq!(score_to_uci(MATE_SCORE - 3), "mate 2");
        assert_eq!(score_to_uci(-(MATE_SCORE - 2)), "mate -1");
    }

    #[test]
    fn test_progress_display() {
        let progress = Progress {
            value: 25,
            depth: 3,
            qdepth: 1,
            seldepth: 5,
            line: vec![Move::new(12, 28, crate::game_repr::Color::White, crate::game_repr::Type::Pawn)],
            nodes: 1000,
            elapsed: Duration::from_millis(10),
            nps: 100_000,
        };
        assert_eq!(
            progress.to_string(),
            "info depth 3 seldepth 5 score cp 25 nodes 1000 time 10 nps 100000 pv e2e4"
        );
    }
}
