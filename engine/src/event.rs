use crate::coord::Coord;

/// Notification for the presentation layer. Boards queue these while they
/// change, see [`Board::take_events`](crate::Board::take_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A single hole gained or lost its peg.
    HoleChanged { coord: Coord, occupied: bool },
    /// Only one peg is left. Sent at most once per game.
    Won,
    /// The board was cleared for replaying the recorded moves.
    ReviewReady,
    /// Every recorded move has been replayed.
    ReviewComplete,
}
