use std::{fmt, ops::Sub};

/// Unit steps to the six neighbours of a hole. Opposite directions are
/// adjacent in this list.
pub const NEIGHBOUR_STEPS: [(i16, i16); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1)];

/// Offsets accepted by [`is_jump`].
pub const JUMP_STEPS: [(i16, i16); 8] = [
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
    (2, 2),
    (-2, -2),
    (2, -2),
    (-2, 2),
];

/// A hole coordinate on the triangular board. `y` is the row counted from the
/// apex, `x` the offset within that row, so the apex is `(0, 0)` and row `y`
/// holds the holes `(0, y)..=(y, y)`.
///
/// A `Coord` is just a pair of numbers, whether it lies on a particular board
/// is decided by [`Coord::is_on_board`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Sub for Coord {
    type Output = (i16, i16);

    fn sub(self, rhs: Self) -> Self::Output {
        (
            self.x as i16 - rhs.x as i16,
            self.y as i16 - rhs.y as i16,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Coord { x, y }
    }

    pub const fn apex() -> Self {
        Coord { x: 0, y: 0 }
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    /// Does this coordinate name a hole on a board with `rows` rows?
    pub fn is_on_board(self, rows: u8) -> bool {
        self.x <= self.y && self.y < rows
    }

    /// Dense slot of this hole, counting row by row from the apex.
    ///
    /// Only meaningful for coordinates with `x <= y`.
    pub fn linear_index(self) -> usize {
        debug_assert!(self.x <= self.y, "{self} is not inside the triangle");
        let y = self.y as usize;
        y * (y + 1) / 2 + self.x as usize
    }

    /// Inverse of [`Coord::linear_index`]. `None` if the index lies beyond
    /// the largest board, the one with `u8::MAX` rows.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= hole_count(u8::MAX) {
            return None;
        }

        let mut y = 0;
        while hole_count_usize(y + 1) <= idx {
            y += 1;
        }
        let x = idx - hole_count_usize(y);

        Some(Coord {
            x: u8::try_from(x).ok()?,
            y: u8::try_from(y).ok()?,
        })
    }

    /// Offset this coordinate, returning `None` if the result would leave the
    /// (unbounded) triangle.
    pub fn shift(self, dx: i16, dy: i16) -> Option<Coord> {
        let x = u8::try_from(self.x as i16 + dx).ok()?;
        let y = u8::try_from(self.y as i16 + dy).ok()?;
        (x <= y).then_some(Coord { x, y })
    }

    /// Holes directly next to this one on a board with `rows` rows.
    pub fn neighbours(self, rows: u8) -> impl Iterator<Item = Coord> {
        NEIGHBOUR_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.shift(dx, dy))
            .filter(move |c| c.is_on_board(rows))
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        NEIGHBOUR_STEPS.contains(&(other - self))
    }

    /// All coordinates of a board with `rows` rows, in linear index order.
    pub fn all(rows: u8) -> impl Iterator<Item = Self> {
        (0..rows).flat_map(|y| (0..=y).map(move |x| Coord { x, y }))
    }
}

/// Number of holes on a board with `rows` rows.
pub fn hole_count(rows: u8) -> usize {
    hole_count_usize(rows as usize)
}

fn hole_count_usize(rows: usize) -> usize {
    rows * (rows + 1) / 2
}

/// Are `src` and `dst` a jump apart? That is two holes along a row, along
/// `x == const`, or with both deltas of size two.
///
/// The last case only compares magnitudes, so besides the `(±2, ±2)` diagonal
/// it also accepts `(2, -2)` and `(-2, 2)`, e.g. `(0, 4) -> (2, 2)` over
/// `(1, 3)`. Those three holes are not on a straight line of the triangle, the
/// jump is allowed anyway.
pub fn is_jump(src: Coord, dst: Coord) -> bool {
    let (dx, dy) = dst - src;
    matches!((dx.abs(), dy.abs()), (2, 0) | (0, 2) | (2, 2))
}

/// The hole between `src` and `dst`, if they are a jump apart.
pub fn midpoint(src: Coord, dst: Coord) -> Option<Coord> {
    if !is_jump(src, dst) {
        return None;
    }

    Some(Coord {
        x: ((src.x as u16 + dst.x as u16) / 2) as u8,
        y: ((src.y as u16 + dst.y as u16) / 2) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    // the holes should appear in the expected sequential order
    fn test_linear_index_order() {
        let mut next_idx = 0;
        for coord in Coord::all(5) {
            assert_eq!(coord.linear_index(), next_idx);
            next_idx += 1;
        }
        assert_eq!(next_idx, hole_count(5));
        assert_eq!(hole_count(5), 15);
    }

    #[test]
    fn test_is_on_board() {
        assert!(Coord::apex().is_on_board(1));
        assert!(Coord::new(4, 4).is_on_board(5));
        assert!(!Coord::new(0, 5).is_on_board(5));
        assert!(!Coord::new(2, 1).is_on_board(5));
    }

    #[test]
    fn test_jump_axes() {
        let c = Coord::new(1, 2);
        let targets: Vec<_> = Coord::all(5).filter(|&d| is_jump(c, d)).collect();

        assert_eq!(targets, vec![Coord::new(1, 4), Coord::new(3, 4)]);

        let c = Coord::new(2, 4);
        let targets: Vec<_> = Coord::all(5).filter(|&d| is_jump(c, d)).collect();
        assert_eq!(
            targets,
            vec![
                Coord::new(0, 2),
                Coord::new(2, 2),
                Coord::new(0, 4),
                Coord::new(4, 4),
            ]
        );
    }

    #[test]
    fn test_not_a_jump() {
        let c = Coord::new(2, 2);
        assert!(!is_jump(c, c));
        assert!(!is_jump(c, Coord::new(1, 2)));
        assert!(!is_jump(c, Coord::new(1, 3)));
        assert!(!is_jump(c, Coord::new(0, 3)));
        assert!(!is_jump(c, Coord::new(2, 5)));
        assert_eq!(midpoint(c, Coord::new(0, 3)), None);
    }

    #[test]
    fn test_anti_diagonal_jump() {
        let c = Coord::new(2, 2);
        assert!(is_jump(c, Coord::new(0, 4)));
        assert!(is_jump(Coord::new(0, 4), c));
        assert_eq!(midpoint(Coord::new(0, 4), c), Some(Coord::new(1, 3)));
        assert_eq!(midpoint(c, Coord::new(0, 4)), Some(Coord::new(1, 3)));
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Coord::from_index(0), Some(Coord::apex()));
        assert_eq!(
            Coord::from_index(hole_count(u8::MAX) - 1),
            Some(Coord::new(254, 254))
        );
        assert_eq!(Coord::from_index(hole_count(u8::MAX)), None);
        assert_eq!(Coord::from_index(usize::MAX), None);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(
            midpoint(Coord::new(0, 2), Coord::apex()),
            Some(Coord::new(0, 1))
        );
        assert_eq!(
            midpoint(Coord::new(0, 2), Coord::new(2, 4)),
            Some(Coord::new(1, 3))
        );
        assert_eq!(
            midpoint(Coord::new(3, 4), Coord::new(1, 4)),
            Some(Coord::new(2, 4))
        );
    }

    #[test]
    fn test_neighbours() {
        let apex: Vec<_> = Coord::apex().neighbours(5).collect();
        assert_eq!(apex, vec![Coord::new(0, 1), Coord::new(1, 1)]);

        assert_eq!(Coord::new(1, 2).neighbours(5).count(), 6);
        assert_eq!(Coord::new(1, 2).neighbours(3).count(), 4);
        assert!(Coord::new(1, 2).is_adjacent(Coord::new(0, 1)));
        assert!(!Coord::new(1, 2).is_adjacent(Coord::new(2, 1)));
    }

    #[test]
    fn test_shift_leaves_triangle() {
        assert_eq!(Coord::apex().shift(-1, 0), None);
        assert_eq!(Coord::new(1, 1).shift(0, -1), None);
        assert_eq!(Coord::new(1, 1).shift(1, 1), Some(Coord::new(2, 2)));
    }

    proptest! {
        #[test]
        fn linear_index_is_a_bijection(rows in 1u8..=60) {
            let count = hole_count(rows);
            let mut seen = vec![false; count];
            for coord in Coord::all(rows) {
                let idx = coord.linear_index();
                prop_assert!(idx < count);
                prop_assert!(!seen[idx], "{coord} collides at index {idx}");
                seen[idx] = true;
                prop_assert_eq!(Coord::from_index(idx), Some(coord));
            }
            prop_assert!(seen.into_iter().all(|b| b));
        }

        #[test]
        fn midpoint_is_adjacent_to_both_ends(idx in 0usize..hole_count(12), step in 0usize..6) {
            let src = Coord::from_index(idx).unwrap();
            let (dx, dy) = NEIGHBOUR_STEPS[step];
            if let Some(dst) = src.shift(2 * dx, 2 * dy) {
                prop_assert!(is_jump(src, dst));
                let mid = midpoint(src, dst).unwrap();
                prop_assert!(mid.is_adjacent(src));
                prop_assert!(mid.is_adjacent(dst));
            }
        }
    }
}
