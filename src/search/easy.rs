//! Weak strategy: a uniformly random open square.

use crate::board::Board;
use crate::position::Position;
use rand::Rng;
use tracing::debug;

/// Picks a uniformly random empty position, or `None` on a full board.
pub(super) fn random_move(board: &Board) -> Option<Position> {
    let open = board.empty_positions();
    if open.is_empty() {
        return None;
    }
    let choice = open[rand::rng().random_range(0..open.len())];
    debug!(position = ?choice, "easy strategy chose square");
    Some(choice)
}
