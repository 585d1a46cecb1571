//! Rules of triangular peg solitaire: board state, jump validation, undo and
//! step-by-step review of a finished game.
//!
//! The engine does no drawing. Front ends call into a [`Board`] and redraw
//! whatever the queued [`BoardEvent`]s say has changed.

pub mod board;
pub mod coord;
pub mod error;
pub mod event;
pub mod jump;
pub mod position;

pub use board::{Board, Hole, Phase};
pub use coord::Coord;
pub use error::{Error, Result};
pub use event::BoardEvent;
pub use jump::Jump;
pub use position::Position;

/// Rows of the classic board with fifteen holes.
pub const DEFAULT_ROWS: u8 = 5;
