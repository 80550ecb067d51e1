//! First-class invariants over the game session.
//!
//! Invariants are logical properties that must hold throughout a session's
//! life. They are testable independently and serve as documentation of the
//! engine's guarantees.

mod alternating_turn;
mod monotonic_board;

pub use alternating_turn::AlternatingTurns;
pub use monotonic_board::MonotonicBoard;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Checks an invariant, returning its description on violation.
pub fn check<S, I: Invariant<S>>(state: &S) -> Result<(), &'static str> {
    if I::holds(state) {
        Ok(())
    } else {
        Err(I::description())
    }
}
