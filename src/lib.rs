//! Falling-block puzzle engine.
//!
//! The library is the deterministic game core: a [`grid::Grid`] of locked
//! cells, the falling [`piece::Piece`], the [`collision::collides`] predicate,
//! the [`score::ScoreTracker`] and the [`game::Game`] state machine that ties
//! them together. Drawing and key handling live in the binary.

pub mod collision;
pub mod config;
pub mod game;
pub mod grid;
pub mod piece;
pub mod score;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameEvent, GameState, Outcome};
pub use grid::{CellState, Grid};
pub use piece::{Piece, PieceProvider, RandomPieceProvider, SequencePieceProvider, Shape, TetrominoType};
pub use score::ScoreTracker;
