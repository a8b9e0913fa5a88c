//! Text notations for moves and games: coordinate moves for engine
//! protocols, SAN for people, PGN for whole games.

mod coord;
mod pgn;
mod san;

pub use coord::parse_coord;
pub use pgn::{parse_pgn, write_pgn, PgnGame};
pub use san::{parse_san, to_san};
