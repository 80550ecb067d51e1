//! Alternating turn invariant.

use super::Invariant;
use crate::session::{GameSession, SessionStatus};

/// Invariant: marks strictly alternate through the move history.
///
/// The first move belongs to the designated first mover, no mark moves
/// twice in a row, and while the game is open the active slot is the
/// complement of the last mover.
pub struct AlternatingTurns;

impl Invariant<GameSession> for AlternatingTurns {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        let opening_mark = session.slot(session.first_to_move()).mark;

        if let Some(first) = history.first() {
            if first.mark != opening_mark {
                return false;
            }
        }

        for window in history.windows(2) {
            if window[0].mark == window[1].mark {
                return false;
            }
        }

        if session.status() == SessionStatus::InProgress {
            if let Some(last) = history.last() {
                return session.active_slot().mark == last.mark.opponent();
            }
        }

        true
    }

    fn description() -> &'static str {
        "marks strictly alternate while the game is in progress"
    }
}
