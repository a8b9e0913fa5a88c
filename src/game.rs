//! Move history of a playable session, kept as a variation tree.
//!
//! Every node owns the position reached by its move. The first child of a
//! node continues the main line; later children are side variations in the
//! order they were first played. Stepping back never discards moves, so
//! `forward` replays them.

use crate::error::{MoveError, Result};
use crate::game_repr::{Board, Move, Outcome};
use crate::notation::{parse_coord, parse_san, to_san, write_pgn};

/// Index of a position in the session tree. The start position is 0.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct GameNode {
    mv: Option<Move>,
    board: Board,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A game under way: the tree of everything played plus a cursor on the
/// position currently shown.
#[derive(Debug, Clone)]
pub struct GameSession {
    nodes: Vec<GameNode>,
    current: NodeId,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Session from the standard initial position.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Session from a FEN position.
    ///
    /// # Errors
    ///
    /// Returns the FEN error unchanged; nothing is created.
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::from_board(Board::from_fen(fen)?))
    }

    pub fn from_board(board: Board) -> Self {
        GameSession {
            nodes: vec![GameNode {
                mv: None,
                board,
                parent: None,
                children: Vec::new(),
            }],
            current: 0,
        }
    }

    /// Position under the cursor.
    pub fn current_board(&self) -> &Board {
        &self.nodes[self.current].board
    }

    pub fn start_board(&self) -> &Board {
        &self.nodes[0].board
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Move that led to the cursor, `None` at the start.
    pub fn last_move(&self) -> Option<Move> {
        self.nodes[self.current].mv
    }

    /// Plies from the start to the cursor.
    pub fn ply(&self) -> usize {
        self.history().len()
    }

    pub fn outcome(&self) -> Outcome {
        self.current_board().outcome()
    }

    /// Play `mv` at the cursor and move the cursor onto it.
    ///
    /// A move already in the tree here is followed rather than duplicated. A
    /// new move after existing continuations starts a side variation.
    ///
    /// # Errors
    ///
    /// `MoveError::Illegal` when `mv` is not a legal move of the current
    /// position; the session is unchanged.
    pub fn play(&mut self, mv: Move) -> Result<NodeId> {
        let board = self.current_board();
        let legal = board
            .legal_moves()
            .find(&mv)
            .ok_or_else(|| MoveError::Illegal(mv.to_coord()))?;

        if let Some(existing) = self.child_with(self.current, &legal) {
            self.current = existing;
            return Ok(existing);
        }

        let mut next = board.clone();
        next.make_move(legal);
        let id = self.nodes.len();
        self.nodes.push(GameNode {
            mv: Some(legal),
            board: next,
            parent: Some(self.current),
            children: Vec::new(),
        });
        self.nodes[self.current].children.push(id);
        log::trace!("played {} as node {}", legal, id);
        self.current = id;
        Ok(id)
    }

    /// Play a SAN move ("Nf3", "exd5", "O-O").
    pub fn play_san(&mut self, san: &str) -> Result<Move> {
        let mv = parse_san(self.current_board(), san)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Play a coordinate move ("g1f3", "e7e8q").
    pub fn play_coord(&mut self, text: &str) -> Result<Move> {
        let mv = parse_coord(self.current_board(), text)?;
        self.play(mv)?;
        Ok(mv)
    }

    fn child_with(&self, node: NodeId, mv: &Move) -> Option<NodeId> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].mv.is_some_and(|m| m.same_move(mv)))
    }

    /// Step the cursor one move back. Returns false at the start.
    pub fn back(&mut self) -> bool {
        match self.nodes[self.current].parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Step the cursor along the main continuation. Returns false when
    /// nothing was played from here.
    pub fn forward(&mut self) -> bool {
        match self.nodes[self.current].children.first() {
            Some(&child) => {
                self.current = child;
                true
            }
            None => false,
        }
    }

    pub fn goto_start(&mut self) {
        self.current = 0;
    }

    /// Follow main continuations from the cursor to the end of its line.
    pub fn goto_end(&mut self) {
        while self.forward() {}
    }

    /// Put the cursor on `node`. Returns false for an unknown id.
    pub fn goto(&mut self, node: NodeId) -> bool {
        if node < self.nodes.len() {
            self.current = node;
            true
        } else {
            false
        }
    }

    /// Moves played from the cursor, main continuation first.
    pub fn variations(&self) -> Vec<Move> {
        self.nodes[self.current]
            .children
            .iter()
            .filter_map(|&c| self.nodes[c].mv)
            .collect()
    }

    /// Make the line through the cursor the main line, reordering the
    /// continuations of every ancestor on the way. Returns false when it
    /// already was.
    pub fn promote_variation(&mut self) -> bool {
        let mut changed = false;
        let mut node = self.current;
        while let Some(parent) = self.nodes[node].parent {
            let children = &mut self.nodes[parent].children;
            if let Some(index) = children.iter().position(|&c| c == node) {
                if index > 0 {
                    let promoted = children.remove(index);
                    children.insert(0, promoted);
                    changed = true;
                }
            }
            node = parent;
        }
        changed
    }

    /// Moves from the start following main continuations to the end.
    pub fn mainline(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = 0;
        while let Some(&child) = self.nodes[node].children.first() {
            line.extend(self.nodes[child].mv);
            node = child;
        }
        line
    }

    /// Moves from the start to the cursor.
    pub fn history(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = self.current;
        while let Some(parent) = self.nodes[node].parent {
            line.extend(self.nodes[node].mv);
            node = parent;
        }
        line.reverse();
        line
    }

    /// SAN of the moves from the start to the cursor.
    pub fn history_san(&self) -> Vec<String> {
        let mut board = self.start_board().clone();
        self.history()
            .into_iter()
            .map(|mv| {
                let san = to_san(&board, mv);
                board.make_move(mv);
                san
            })
            .collect()
    }

    /// PGN of the main line, with the result of its final position.
    pub fn to_pgn(&self) -> String {
        let mut end = 0;
        while let Some(&child) = self.nodes[end].children.first() {
            end = child;
        }
        let result = self.nodes[end].board.outcome().result_str();
        write_pgn(self.start_board(), &self.mainline(), result)
    }

    /// Positions stored, including the start.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
