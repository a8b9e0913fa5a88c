//! Move selection: static evaluation, negamax search with quiescence and a
//! transposition table, driven by iterative deepening.

pub mod config;
pub mod evaluation;
mod move_ordering;
mod negamax;
pub mod piece_square_tables;
mod quiescence;
mod search;
pub mod transposition_table;
mod variation;

pub use config::{Difficulty, EvalKind, SearchConfig};
pub use evaluation::{evaluate, MATE_SCORE};
pub use move_ordering::mvv_lva_score;
pub use negamax::{SearchEngine, SearchNode, INFINITY};
pub use search::{score_to_uci, IterativeDeepening, Progress, SearchHandle, SearchResult, SearchStatus};
pub use transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};
pub use variation::{Line, Variation};
