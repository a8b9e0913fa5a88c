use std::mem::size_of;

use crate::game_repr::Move;

/// How the stored value relates to the true score of the position.
///
/// - Exact: every move was searched inside the window
/// - Lower: a move failed high, the score is at least `value`
/// - Upper: every move failed low, the score is at most `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full hash; the slot index only uses the low bits.
    pub hash: u64,
    pub depth: u32,
    pub value: i32,
    pub best_move: Option<Move>,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub stores: u64,
    pub new_entries: u64,
    /// Stores that landed on a slot held by a different position.
    pub collisions: u64,
    pub probes: u64,
    pub hits: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}

/// Fixed-size table indexed by `hash % len`. One entry per slot, no
/// chaining; a store only replaces an entry searched to the same or a
/// lesser depth. Never resized after construction.
pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn with_entries(entries: usize) -> Self {
        Self {
            slots: vec![None; entries.max(1)],
            stats: TTStats::default(),
        }
    }

    /// Table sized to roughly `mb` megabytes.
    pub fn with_mb(mb: usize) -> Self {
        Self::with_entries(Self::entries_for_mb(mb))
    }

    /// Slots that fit in `mb` megabytes.
    pub fn entries_for_mb(mb: usize) -> usize {
        (mb * 1024 * 1024 / size_of::<Option<TTEntry>>()).max(1)
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    pub fn store(&mut self, depth: u32, hash: u64, value: i32, best_move: Option<Move>, bound: Bound) {
        self.stats.stores += 1;
        let idx = self.index(hash);
        let slot = &mut self.slots[idx];

        match slot {
            None => self.stats.new_entries += 1,
            Some(existing) => {
                if existing.hash != hash {
                    self.stats.collisions += 1;
                }
                if depth < existing.depth {
                    return;
                }
            }
        }

        *slot = Some(TTEntry {
            hash,
            depth,
            value,
            best_move,
            bound,
        });
    }

    /// Raw slot content for `hash`. The entry may belong to another
    /// position; compare `entry.hash` before trusting it.
    pub fn get(&self, hash: u64) -> Option<&TTEntry> {
        self.slots[self.index(hash)].as_ref()
    }

    /// Entry for exactly this position, counted in the statistics.
    pub fn probe(&mut self, hash: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let entry = self.get(hash).filter(|e| e.hash == hash).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    pub fn exists(&self, hash: u64) -> bool {
        self.get(hash).is_some_and(|e| e.hash == hash)
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.stats = TTStats::default();
    }

    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots. Walks the whole table.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn memory_usage(&self) -> usize {
        self.slots.len() * size_of::<Option<TTEntry>>()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_entries(1 << 20)
    }
}
