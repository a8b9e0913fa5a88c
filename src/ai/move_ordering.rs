use std::cmp::Reverse;

use crate::game_repr::{Move, MoveList};

const CAPTURE_BASE: i32 = 10_000;

/// Most-valuable-victim, least-valuable-attacker score. Any capture ranks
/// above any non-capture; promotions add the promoted piece's value.
pub fn mvv_lva_score(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured().filter(|_| mv.is_capture()) {
        score += CAPTURE_BASE + victim.value() * 10 - mv.piece().value();
    }
    if let Some(promotion) = mv.promotion() {
        score += promotion.value();
    }
    score
}

impl MoveList {
    /// Stable: equal scores keep generation order.
    pub fn sort_mvv_lva(&mut self) {
        self.sort_by_key(|mv| Reverse(mvv_lva_score(mv)));
    }
}
