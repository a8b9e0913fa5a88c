use super::*;

mod complex_promotions;
mod endgame;
mod kiwipete;
mod middle_game;
mod reference;
mod starting_position;
mod symmetrical;
