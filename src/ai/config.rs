//! Search configuration and difficulty presets.
//!
//! # Difficulty Levels
//!
//! - **Easy**: depth 2, material only, no quiescence
//! - **Medium**: depth 4, positional evaluation with quiescence
//! - **Hard**: depth 6, positional evaluation with quiescence
//! - **Expert**: depth 8 with a 5s time limit, mobility evaluation

use std::time::Duration;

/// Which static evaluator the search calls at its leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvalKind {
    /// Piece values only.
    Material,
    /// Material plus piece-square tables.
    #[default]
    Positional,
    /// Positional plus mobility and attacked/defended counts. Generates
    /// moves for both sides, so it is several times slower.
    Mobility,
}

impl EvalKind {
    pub fn name(self) -> &'static str {
        match self {
            EvalKind::Material => "material",
            EvalKind::Positional => "positional",
            EvalKind::Mobility => "mobility",
        }
    }

    pub fn from_name(name: &str) -> Option<EvalKind> {
        match name.to_ascii_lowercase().as_str() {
            "material" => Some(EvalKind::Material),
            "positional" => Some(EvalKind::Positional),
            "mobility" => Some(EvalKind::Mobility),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration, in plies.
    pub max_depth: u32,
    pub quiescence: bool,
    /// Plies of capture search allowed past the nominal depth.
    pub max_quiescence_depth: u32,
    pub alpha_beta: bool,
    pub mvv_lva: bool,
    /// Search the previous iteration's principal variation first.
    pub use_hint: bool,
    pub use_tt: bool,
    pub tt_entries: usize,
    pub eval: EvalKind,
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            quiescence: true,
            max_quiescence_depth: 8,
            alpha_beta: true,
            mvv_lva: true,
            use_hint: true,
            use_tt: true,
            tt_entries: 1 << 20,
            eval: EvalKind::Positional,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_eval(mut self, eval: EvalKind) -> Self {
        self.eval = eval;
        self
    }

    /// Plain negamax: no pruning, ordering, caching or quiescence.
    pub fn exhaustive(depth: u32) -> Self {
        Self {
            max_depth: depth.max(1),
            quiescence: false,
            alpha_beta: false,
            mvv_lva: false,
            use_hint: false,
            use_tt: false,
            ..Self::default()
        }
    }
}

/// AI difficulty levels that map to search presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            Difficulty::Expert => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    pub fn config(&self) -> SearchConfig {
        let base = SearchConfig {
            max_depth: self.max_depth(),
            time_limit: self.time_limit(),
            ..SearchConfig::default()
        };
        match self {
            Difficulty::Easy => SearchConfig {
                quiescence: false,
                eval: EvalKind::Material,
                ..base
            },
            Difficulty::Medium | Difficulty::Hard => base,
            Difficulty::Expert => SearchConfig {
                eval: EvalKind::Mobility,
                ..base
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl From<Difficulty> for SearchConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}
