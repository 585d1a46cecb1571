use std::fmt;

use bitvec::{prelude::Lsb0, vec::BitVec};

use crate::{
    coord::{Coord, hole_count},
    error::{Error, Result},
};

/// Snapshot of which holes hold a peg, one bit per hole in linear index order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    rows: u8,
    bits: BitVec<u32, Lsb0>,
}

impl Position {
    pub(crate) fn from_bits(rows: u8, bits: BitVec<u32, Lsb0>) -> Self {
        debug_assert_eq!(bits.len(), hole_count(rows));
        Position { rows, bits }
    }

    /// Parse a triangle drawn with `#` for pegs and `.` for empty holes.
    /// Whitespace is ignored, so the output of `Display` parses back.
    pub fn from_ascii(ascii: &str) -> Result<Self> {
        let mut bits = BitVec::new();
        for c in ascii.chars() {
            match c {
                '#' => bits.push(true),
                '.' => bits.push(false),
                c if c.is_whitespace() => {}
                c => return Err(Error::Parse(format!("unexpected character {c:?}"))),
            }
        }

        let rows = (1..=u8::MAX)
            .find(|&rows| hole_count(rows) == bits.len())
            .ok_or_else(|| Error::Parse(format!("{} holes do not form a triangle", bits.len())))?;

        Ok(Position { rows, bits })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of pegs in this position
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        coord.is_on_board(self.rows) && self.bits[coord.linear_index()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            write!(f, "{:indent$}", "", indent = (self.rows - 1 - y) as usize)?;
            for x in 0..=y {
                if x > 0 {
                    f.write_str(" ")?;
                }
                let c = if self.is_occupied(Coord::new(x, y)) { "#" } else { "." };
                f.write_str(c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
