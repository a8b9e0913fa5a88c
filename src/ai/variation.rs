use std::fmt;

use smallvec::SmallVec;

use crate::game_repr::Move;

/// Inline capacity of a principal variation; longer lines spill to the heap.
pub const LINE_CAPACITY: usize = 64;

pub type Line = SmallVec<[Move; LINE_CAPACITY]>;

/// A line of play together with the score it leads to, from the point of
/// view of the side to move at its first move.
#[derive(Clone, PartialEq, Eq)]
pub struct Variation {
    pub line: Line,
    pub value: i32,
    /// Nominal plies searched below the node that produced this line.
    pub depth: u32,
    /// Deepest quiescence ply reached at the end of the line.
    pub qdepth: u32,
    /// The line ends in mate or stalemate.
    pub terminal: bool,
}

impl Variation {
    /// Leaf with a static score.
    pub fn leaf(value: i32) -> Self {
        Self {
            line: Line::new(),
            value,
            depth: 0,
            qdepth: 0,
            terminal: false,
        }
    }

    /// No legal moves: mate or stalemate.
    pub fn terminal(value: i32) -> Self {
        Self {
            terminal: true,
            ..Self::leaf(value)
        }
    }

    /// `mv` followed by the child's line, scored `value` for this node.
    pub fn extend(mv: Move, child: Variation, value: i32) -> Self {
        let mut line = Line::with_capacity(child.line.len() + 1);
        line.push(mv);
        line.extend_from_slice(&child.line);
        Self {
            line,
            value,
            depth: child.depth,
            qdepth: child.qdepth,
            terminal: child.terminal,
        }
    }

    pub fn best_move(&self) -> Option<Move> {
        self.line.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Space-separated coordinate moves, "e2e4 e7e5".
    pub fn line_string(&self) -> String {
        self.line.iter().map(|mv| mv.to_coord()).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Debug for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Variation({} d{}/q{}{}: {})",
            self.value,
            self.depth,
            self.qdepth,
            if self.terminal { " terminal" } else { "" },
            self.line_string()
        )
    }
}
