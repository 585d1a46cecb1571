use colored::Colorize;
use engine::{coord::hole_count, Board, BoardEvent, Coord};

/// Holes that changed since the last drawing, indexed by linear index.
#[derive(Debug, Clone, Default)]
pub struct Highlights(Vec<Option<bool>>);

impl Highlights {
    pub fn new(rows: u8) -> Self {
        Highlights(vec![None; hole_count(rows)])
    }

    /// Remember the final state of every hole touched by `events`.
    pub fn record(&mut self, events: &[BoardEvent]) {
        for event in events {
            if let BoardEvent::HoleChanged { coord, occupied } = *event {
                let idx = coord.linear_index();
                if idx >= self.0.len() {
                    self.0.resize(idx + 1, None);
                }
                self.0[idx] = Some(occupied);
            }
        }
    }

    fn get(&self, coord: Coord) -> Option<bool> {
        self.0.get(coord.linear_index()).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Draw the board as a triangle with row numbers on the left. Pegs that just
/// arrived are shown on green, holes that were just emptied on red.
pub fn draw(board: &Board, highlights: &Highlights) -> String {
    let rows = board.rows();
    let mut out = String::new();

    for y in 0..rows {
        out.push_str(&format!(
            "{y:>3} {:indent$}",
            "",
            indent = (rows - 1 - y) as usize
        ));
        for x in 0..=y {
            if x > 0 {
                out.push(' ');
            }
            let coord = Coord::new(x, y);
            let occupied = board.is_occupied(coord).unwrap_or(false);
            let cell = match (occupied, highlights.get(coord)) {
                (true, Some(true)) => "#".on_green().to_string(),
                (false, Some(false)) => ".".on_red().to_string(),
                (true, _) => "#".to_string(),
                (false, _) => ".".to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    out
}
