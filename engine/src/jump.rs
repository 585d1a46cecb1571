use std::fmt;

use crate::{
    board::Board,
    coord::{Coord, JUMP_STEPS, midpoint},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// A single jump: the peg at `src` hops over `mid` into `dst`, removing the
/// peg at `mid`.
///
/// A `Jump` only describes the geometry. Whether it is currently possible is
/// up to the [`Board`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Jump {
    src: Coord,
    mid: Coord,
    dst: Coord,
}

impl Jump {
    /// Returns `None` unless the coordinates are a jump apart, see
    /// [`is_jump`](crate::coord::is_jump).
    pub fn new(src: Coord, dst: Coord) -> Option<Jump> {
        let mid = midpoint(src, dst)?;
        Some(Jump { src, mid, dst })
    }

    pub fn src(self) -> Coord {
        self.src
    }

    pub fn mid(self) -> Coord {
        self.mid
    }

    pub fn dst(self) -> Coord {
        self.dst
    }

    /// Every jump that fits on a board with `rows` rows, regardless of pegs.
    pub fn all(rows: u8) -> impl Iterator<Item = Jump> {
        Coord::all(rows).flat_map(move |src| {
            JUMP_STEPS.into_iter().filter_map(move |(dx, dy)| {
                let dst = src.shift(dx, dy)?;
                if !dst.is_on_board(rows) {
                    return None;
                }
                Jump::new(src, dst)
            })
        })
    }

    pub(crate) fn apply(self, board: &mut Board) {
        self.perform(board, Direction::Forward);
    }

    pub(crate) fn reverse(self, board: &mut Board) {
        self.perform(board, Direction::Backward);
    }

    /// Only touches the three holes, history handling is up to the caller.
    fn perform(self, board: &mut Board, dir: Direction) {
        match dir {
            Direction::Forward => {
                board.set_occupied(self.mid, false);
                board.set_occupied(self.src, false);
                board.set_occupied(self.dst, true);
            }
            Direction::Backward => {
                board.set_occupied(self.src, true);
                board.set_occupied(self.dst, false);
                board.set_occupied(self.mid, true);
            }
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}
