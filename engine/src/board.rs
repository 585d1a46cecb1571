use std::collections::VecDeque;

use crate::{
    coord::{Coord, hole_count},
    error::{Error, Result},
    event::BoardEvent,
    jump::Jump,
    position::Position,
};

/// A single cell of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Hole {
    coord: Coord,
    occupied: bool,
}

impl Hole {
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }
}

/// Where a board is in its life cycle. Derived from the board contents, see
/// [`Board::phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Every hole holds a peg, waiting for the starting hole to be chosen.
    Fresh,
    Playing,
    /// Exactly one peg is left. Undo still works.
    Won,
    /// Recorded moves are being replayed one step at a time.
    Reviewing,
    /// Every recorded move has been replayed.
    ReviewComplete,
}

/// Triangular peg solitaire board together with its move history.
///
/// All mutating operations queue [`BoardEvent`]s describing what changed; the
/// presentation layer collects them with [`Board::take_events`].
///
/// Two behaviours are easy to trip over:
/// - [`Board::designate_start`] only has an effect once per game, later calls
///   are silently ignored.
/// - [`Board::undo`] with an empty history resets the whole board instead of
///   failing.
#[derive(Clone, Debug)]
pub struct Board {
    rows: u8,
    /// Indexed by [`Coord::linear_index`].
    holes: Vec<Hole>,
    history: Vec<Jump>,
    pending: VecDeque<Jump>,
    started: bool,
    reviewing: bool,
    win_announced: bool,
    events: Vec<BoardEvent>,
}

impl Board {
    /// A fresh board with `rows` rows, all holes occupied.
    pub fn new(rows: u8) -> Result<Self> {
        if rows == 0 {
            return Err(Error::InvalidRows(rows));
        }

        Ok(Board {
            rows,
            holes: full_holes(rows),
            history: Vec::new(),
            pending: VecDeque::new(),
            started: false,
            reviewing: false,
            win_announced: false,
            events: Vec::new(),
        })
    }

    /// Rebuild the board with `rows` rows, every hole occupied and both move
    /// sequences cleared.
    pub fn initialize(&mut self, rows: u8) -> Result<()> {
        if rows == 0 {
            return Err(Error::InvalidRows(rows));
        }

        if rows == self.rows {
            self.clear();
        } else {
            log::info!("resizing board from {} to {rows} rows", self.rows);
            self.rows = rows;
            self.holes = full_holes(rows);
            self.reset_game_state();
            // layout changed, every hole needs to be redrawn
            self.events
                .extend(self.holes.iter().map(|hole| BoardEvent::HoleChanged {
                    coord: hole.coord,
                    occupied: true,
                }));
        }
        Ok(())
    }

    /// Back to [`Phase::Fresh`] from any phase.
    pub fn reset(&mut self) {
        log::info!("reset");
        self.clear();
    }

    fn clear(&mut self) {
        self.fill_all();
        self.reset_game_state();
    }

    fn reset_game_state(&mut self) {
        self.history.clear();
        self.pending.clear();
        self.started = false;
        self.reviewing = false;
        self.win_announced = false;
    }

    /// Remove the peg from the starting hole.
    ///
    /// Only the first call per game has an effect, later calls are ignored
    /// and still return `Ok`.
    pub fn designate_start(&mut self, coord: Coord) -> Result<()> {
        self.index_of(coord)?;
        if self.started {
            log::debug!("starting hole already chosen, ignoring {coord}");
            return Ok(());
        }

        log::info!("starting with empty hole {coord}");
        self.set_occupied(coord, false);
        self.started = true;
        Ok(())
    }

    /// Check if the move is possible, and if yes, return the jump that
    /// performs it.
    fn check_move(&self, src: Coord, dst: Coord) -> Option<Jump> {
        if !self.started {
            log::debug!("no starting hole chosen yet");
            return None;
        }
        if self.reviewing {
            log::debug!("moves are disabled during review");
            return None;
        }
        let Some(jump) = Jump::new(src, dst) else {
            log::debug!("{src} and {dst} are not a jump apart");
            return None;
        };
        self.is_legal(jump).then_some(jump)
    }

    /// Pure occupancy check, ignoring the phase of the board.
    fn is_legal(&self, jump: Jump) -> bool {
        let occupied = |coord: Coord| self.hole(coord).map(|hole| hole.occupied);

        match (occupied(jump.src()), occupied(jump.mid()), occupied(jump.dst())) {
            (Some(true), Some(true), Some(false)) => true,
            (None, _, _) | (_, None, _) | (_, _, None) => {
                log::debug!("{jump} leaves the board");
                false
            }
            (Some(false), _, _) => {
                log::debug!("no peg in source position {}", jump.src());
                false
            }
            (_, Some(false), _) => {
                log::debug!("no peg in middle position {}", jump.mid());
                false
            }
            (_, _, Some(true)) => {
                log::debug!("destination {} is occupied", jump.dst());
                false
            }
        }
    }

    /// Could the peg at `src` jump to `dst` right now? Never fails, anything
    /// invalid is simply not a possible move.
    pub fn can_move(&self, src: Coord, dst: Coord) -> bool {
        self.check_move(src, dst).is_some()
    }

    /// Jump from `src` to `dst` and record the jump in the history.
    pub fn apply(&mut self, src: Coord, dst: Coord) -> Result<()> {
        self.index_of(src)?;
        self.index_of(dst)?;
        let jump = self
            .check_move(src, dst)
            .ok_or(Error::IllegalMove { src, dst })?;

        log::debug!("jumping {jump}");
        jump.apply(self);
        self.history.push(jump);
        self.check_win();
        Ok(())
    }

    /// Take back the last jump. With nothing to take back, the board is
    /// reset to [`Phase::Fresh`] instead.
    ///
    /// During review the jump goes back to the front of the replay queue.
    pub fn undo(&mut self) {
        let Some(jump) = self.history.pop() else {
            log::info!("nothing to undo, resetting the board");
            self.reset();
            return;
        };

        log::debug!("undoing {jump}");
        jump.reverse(self);
        if self.reviewing {
            self.pending.push_front(jump);
        }
    }

    /// Exactly one peg left anywhere on the board.
    pub fn is_win(&self) -> bool {
        self.nr_pegs() == 1
    }

    fn check_win(&mut self) {
        if !self.win_announced && self.is_win() {
            log::info!("one peg left after {} jumps", self.history.len());
            self.win_announced = true;
            self.events.push(BoardEvent::Won);
        }
    }

    /// Refill the board and queue the recorded jumps for replay with
    /// [`Board::step`]. Calling this during review restarts the replay.
    pub fn enter_review(&mut self) -> Result<()> {
        if !self.started {
            return Err(Error::NotStarted);
        }

        let mut replay: VecDeque<Jump> = self.history.drain(..).collect();
        replay.extend(self.pending.drain(..));
        self.pending = replay;
        log::info!("reviewing {} jumps", self.pending.len());

        self.fill_all();
        self.reviewing = true;
        self.events.push(BoardEvent::ReviewReady);
        if self.pending.is_empty() {
            self.events.push(BoardEvent::ReviewComplete);
        }
        Ok(())
    }

    /// Replay one step. On the untouched board this empties the original
    /// starting hole, afterwards every call replays the next recorded jump.
    pub fn step(&mut self) -> Result<()> {
        if !self.reviewing {
            return Err(Error::NotReviewing);
        }
        let Some(&next) = self.pending.front() else {
            log::debug!("nothing left to replay");
            return Ok(());
        };

        // The first recorded jump always lands in the starting hole
        if self.holes.iter().all(|hole| hole.occupied) {
            self.set_occupied(next.dst(), false);
            return Ok(());
        }

        if !self.is_legal(next) {
            return Err(Error::IllegalMove {
                src: next.src(),
                dst: next.dst(),
            });
        }
        self.pending.pop_front();

        log::debug!("replaying {next}");
        next.apply(self);
        self.history.push(next);
        self.check_win();

        if self.pending.is_empty() {
            log::info!("review complete");
            self.events.push(BoardEvent::ReviewComplete);
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        if self.reviewing {
            if self.pending.is_empty() {
                Phase::ReviewComplete
            } else {
                Phase::Reviewing
            }
        } else if !self.started {
            Phase::Fresh
        } else if self.is_win() {
            Phase::Won
        } else {
            Phase::Playing
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn hole(&self, coord: Coord) -> Option<&Hole> {
        if !coord.is_on_board(self.rows) {
            return None;
        }
        self.holes.get(coord.linear_index())
    }

    pub fn is_occupied(&self, coord: Coord) -> Result<bool> {
        let idx = self.index_of(coord)?;
        Ok(self.holes[idx].occupied)
    }

    /// Number of pegs left on the board
    pub fn nr_pegs(&self) -> usize {
        self.holes.iter().filter(|hole| hole.occupied).count()
    }

    /// Jumps applied since the last reset or review, oldest first.
    pub fn history(&self) -> &[Jump] {
        &self.history
    }

    /// Jumps still waiting to be replayed, next one first.
    pub fn pending(&self) -> impl Iterator<Item = Jump> + '_ {
        self.pending.iter().copied()
    }

    /// `false` only in [`Phase::Fresh`], where undo would reset an already
    /// reset board.
    pub fn can_undo(&self) -> bool {
        self.started
    }

    pub fn can_step(&self) -> bool {
        self.reviewing && !self.pending.is_empty()
    }

    /// Every jump that [`Board::apply`] would accept right now.
    pub fn legal_jumps(&self) -> Vec<Jump> {
        if !self.started || self.reviewing {
            return Vec::new();
        }
        Jump::all(self.rows)
            .filter(|&jump| {
                self.holes[jump.src().linear_index()].occupied
                    && self.holes[jump.mid().linear_index()].occupied
                    && !self.holes[jump.dst().linear_index()].occupied
            })
            .collect()
    }

    /// The game is under way but no jump is possible any more.
    pub fn is_stuck(&self) -> bool {
        self.phase() == Phase::Playing && self.legal_jumps().is_empty()
    }

    pub fn position(&self) -> Position {
        Position::from_bits(self.rows, self.holes.iter().map(|hole| hole.occupied).collect())
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    fn index_of(&self, coord: Coord) -> Result<usize> {
        if coord.is_on_board(self.rows) {
            Ok(coord.linear_index())
        } else {
            Err(Error::InvalidCoordinate {
                coord,
                rows: self.rows,
            })
        }
    }

    /// Only called with coordinates on the board.
    pub(crate) fn set_occupied(&mut self, coord: Coord, occupied: bool) {
        let hole = &mut self.holes[coord.linear_index()];
        if hole.occupied != occupied {
            hole.occupied = occupied;
            self.events.push(BoardEvent::HoleChanged { coord, occupied });
        }
    }

    fn fill_all(&mut self) {
        for idx in 0..self.holes.len() {
            let coord = self.holes[idx].coord;
            self.set_occupied(coord, true);
        }
    }
}

fn full_holes(rows: u8) -> Vec<Hole> {
    let holes: Vec<Hole> = Coord::all(rows)
        .map(|coord| Hole {
            coord,
            occupied: true,
        })
        .collect();
    debug_assert_eq!(holes.len(), hole_count(rows));
    holes
}
