use thiserror::Error;

use crate::coord::Coord;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything the engine can refuse to do.
///
/// Asking whether a move is possible never fails, see
/// [`Board::can_move`](crate::Board::can_move).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{coord} is not a hole on a board with {rows} rows")]
    InvalidCoordinate { coord: Coord, rows: u8 },

    #[error("cannot jump from {src} to {dst}")]
    IllegalMove { src: Coord, dst: Coord },

    #[error("a board needs at least one row, got {0}")]
    InvalidRows(u8),

    #[error("no starting hole has been chosen yet")]
    NotStarted,

    #[error("the board is not in review mode")]
    NotReviewing,

    #[error("invalid position: {0}")]
    Parse(String),
}
