//! Monotonic board invariant.

use super::Invariant;
use crate::board::Square;
use crate::session::GameSession;

/// Invariant: the board only grows within a game.
///
/// Every recorded move is still on the board with the mark that made it,
/// and nothing is on the board that the history does not account for.
pub struct MonotonicBoard;

impl Invariant<GameSession> for MonotonicBoard {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();

        if session.board().filled_count() != history.len() {
            return false;
        }

        history.iter().all(|mv| {
            session.board().get(mv.position) == Square::Occupied(mv.mark)
        })
    }

    fn description() -> &'static str {
        "squares only transition from empty to occupied between resets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use crate::session::{PlayerSlot, SlotId};

    fn session() -> GameSession {
        GameSession::new(
            PlayerSlot::human("Ada", Mark::X),
            PlayerSlot::human("Grace", Mark::O),
            SlotId::A,
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_session_holds() {
        assert!(MonotonicBoard::holds(&session()));
    }

    #[test]
    fn test_holds_after_moves() {
        let mut s = session();
        for index in [4, 0, 8] {
            s = s.apply_move_at(index).unwrap();
            assert!(MonotonicBoard::holds(&s));
        }
    }

    #[test]
    fn test_holds_after_reset_clears_history() {
        let s = session().apply_move_at(4).unwrap().reset_board();
        assert!(MonotonicBoard::holds(&s));
        assert_eq!(s.history().len(), 0);
    }
}
