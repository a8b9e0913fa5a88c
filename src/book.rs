//! Opening book: a trie of move sequences from the initial position.
//!
//! Lines are plain text, one per row: a weight followed by SAN moves.
//! Blank rows and rows starting with `#` are skipped. Every node on a line's
//! path accumulates the line's weight, so shared prefixes weigh the sum of
//! their continuations.

use rand::Rng;
use smallvec::SmallVec;

use crate::error::PgnError;
use crate::game_repr::{Board, Move};
use crate::notation::parse_san;

const DEFAULT_LINES: &str = "\
# weight  moves
40 e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7
25 e4 e5 Nf3 Nc6 Bc4 Bc5 c3 Nf6 d4 exd4
15 e4 e5 Nf3 Nf6 Nxe5 d6 Nf3 Nxe4
35 e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6
20 e4 c5 Nf3 Nc6 d4 cxd4 Nxd4 Nf6 Nc3 e5
20 e4 e6 d4 d5 Nc3 Nf6 Bg5 Be7
20 e4 c6 d4 d5 Nc3 dxe4 Nxe4 Bf5
30 d4 d5 c4 e6 Nc3 Nf6 Bg5 Be7
20 d4 d5 c4 c6 Nf3 Nf6 Nc3 dxc4
30 d4 Nf6 c4 g6 Nc3 Bg7 e4 d6 Nf3 O-O
25 d4 Nf6 c4 e6 Nc3 Bb4 e3 O-O
15 c4 e5 Nc3 Nf6 Nf3 Nc6 g3 d5
15 Nf3 d5 g3 Nf6 Bg2 c6 O-O Bg4
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub mv: Move,
    pub weight: u32,
}

#[derive(Debug, Clone)]
struct BookNode {
    mv: Option<Move>,
    weight: u32,
    children: Vec<usize>,
}

/// Lookup-only opening book. Node 0 is the initial position.
#[derive(Debug, Clone)]
pub struct OpeningBook {
    nodes: Vec<BookNode>,
}

impl Default for OpeningBook {
    /// The embedded repertoire of main-line openings.
    fn default() -> Self {
        match Self::from_lines(DEFAULT_LINES) {
            Ok(book) => book,
            Err(err) => panic!("embedded opening book is malformed: {}", err),
        }
    }
}

impl OpeningBook {
    pub fn empty() -> Self {
        OpeningBook {
            nodes: vec![BookNode {
                mv: None,
                weight: 0,
                children: Vec::new(),
            }],
        }
    }

    /// Build a book from weighted SAN lines. A move that is not legal where it
    /// is played reports its ply within the line.
    pub fn from_lines(text: &str) -> Result<Self, PgnError> {
        let mut book = Self::empty();
        let mut count = 0;

        for row in text.lines().map(str::trim) {
            if row.is_empty() || row.starts_with('#') {
                continue;
            }
            let mut words = row.split_whitespace();
            let weight = words
                .next()
                .and_then(|w| w.parse::<u32>().ok())
                .ok_or_else(|| PgnError::BadToken(row.to_string()))?;

            let mut board = Board::new();
            let mut node = 0;
            book.nodes[0].weight += weight;
            for (i, san) in words.enumerate() {
                let mv = parse_san(&board, san).map_err(|source| PgnError::Move { ply: i + 1, source })?;
                board.make_move(mv);
                node = book.child_or_insert(node, mv);
                book.nodes[node].weight += weight;
            }
            count += 1;
        }

        log::debug!("opening book: {} lines, {} positions", count, book.nodes.len());
        Ok(book)
    }

    fn child(&self, node: usize, mv: &Move) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].mv.is_some_and(|m| m.same_move(mv)))
    }

    fn child_or_insert(&mut self, node: usize, mv: Move) -> usize {
        if let Some(existing) = self.child(node, &mv) {
            return existing;
        }
        let id = self.nodes.len();
        self.nodes.push(BookNode {
            mv: Some(mv),
            weight: 0,
            children: Vec::new(),
        });
        self.nodes[node].children.push(id);
        id
    }

    /// Book continuations after `history` (moves from the initial position),
    /// in insertion order. Empty once the game has left the book.
    pub fn lookup(&self, history: &[Move]) -> SmallVec<[BookMove; 8]> {
        let mut node = 0;
        for mv in history {
            match self.child(node, mv) {
                Some(next) => node = next,
                None => return SmallVec::new(),
            }
        }
        self.nodes[node]
            .children
            .iter()
            .filter_map(|&c| {
                let child = &self.nodes[c];
                child.mv.map(|mv| BookMove {
                    mv,
                    weight: child.weight,
                })
            })
            .collect()
    }

    /// Weighted random pick among the continuations of `history`.
    pub fn choose<R: Rng + ?Sized>(&self, history: &[Move], rng: &mut R) -> Option<Move> {
        let candidates = self.lookup(history);
        let first = candidates.first()?;

        let total: u64 = candidates.iter().map(|c| u64::from(c.weight)).sum();
        if total == 0 {
            return Some(first.mv);
        }

        let mut pick = rng.gen_range(0..total);
        for c in &candidates {
            let w = u64::from(c.weight);
            if pick < w {
                return Some(c.mv);
            }
            pick -= w;
        }
        Some(first.mv)
    }

    /// Number of positions below the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::SanError;
    use crate::notation::parse_coord;

    fn history(coords: &[&str]) -> Vec<Move> {
        let mut board = Board::new();
        coords
            .iter()
            .map(|c| {
                let mv = parse_coord(&board, c).unwrap();
                board.make_move(mv);
                mv
            })
            .collect()
    }

    #[test]
    fn test_default_book_parses() {
        let book = OpeningBook::default();
        assert!(!book.is_empty());
        let first: Vec<String> = book.lookup(&[]).iter().map(|c| c.mv.to_coord()).collect();
        assert_eq!(first, ["e2e4", "d2d4", "c2c4", "g1f3"]);
    }

    #[test]
    fn test_shared_prefix_sums_weights() {
        let book = OpeningBook::from_lines("3 e4 e5 Nf3\n2 e4 c5\n\n# comment\n1 d4").unwrap();
        let root = book.lookup(&[]);
        assert_eq!(root.len(), 2);
        assert_eq!(root[0].weight, 5);
        assert_eq!(root[1].weight, 1);

        let replies = book.lookup(&history(&["e2e4"]));
        let weights: Vec<(String, u32)> = replies.iter().map(|c| (c.mv.to_coord(), c.weight)).collect();
        assert_eq!(weights, [("e7e5".to_string(), 3), ("c7c5".to_string(), 2)]);
    }

    #[test]
    fn test_out_of_book() {
        let book = OpeningBook::default();
        assert!(book.lookup(&history(&["a2a3"])).is_empty());
        assert!(book.choose(&history(&["a2a3"]), &mut StdRng::seed_from_u64(1)).is_none());
        // End of a line has no continuation
        let line = history(&["g1f3", "d7d5", "g2g3", "g8f6", "f1g2", "c7c6", "e1g1", "c8g4"]);
        assert!(book.lookup(&line).is_empty());
    }

    #[test]
    fn test_choose_follows_weights() {
        let book = OpeningBook::from_lines("9 e4\n1 d4").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut e4 = 0;
        for _ in 0..1000 {
            if book.choose(&[], &mut rng).unwrap().to_coord() == "e2e4" {
                e4 += 1;
            }
        }
        assert!((850..=950).contains(&e4), "{}", e4);
    }

    #[test]
    fn test_chosen_moves_are_legal() {
        let book = OpeningBook::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::new();
        let mut played = Vec::new();
        while let Some(mv) = book.choose(&played, &mut rng) {
            assert!(board.legal_moves().find(&mv).is_some());
            board.make_move(mv);
            played.push(mv);
        }
        assert!(played.len() >= 8);
    }

    #[test]
    fn test_bad_lines() {
        assert!(matches!(OpeningBook::from_lines("x e4"), Err(PgnError::BadToken(_))));
        assert_eq!(
            OpeningBook::from_lines("1 e4 e5 Ke3").unwrap_err(),
            PgnError::Move {
                ply: 3,
                source: SanError::NoMatch("Ke3".into())
            }
        );
    }
}
