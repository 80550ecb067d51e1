//! Tic-tac-toe engine: state machine, adversarial search, and turn
//! orchestration.
//!
//! # Architecture
//!
//! - **Board / rules**: the 3x3 grid and pure terminal evaluation
//! - **Search**: alpha-beta minimax with opening heuristics, plus an
//!   explicit easy difficulty
//! - **Session**: immutable game state with pure transitions - moves,
//!   scores, resets
//! - **Driver**: async orchestration of computer turns and the post-win
//!   celebration, with generation-stamped cancellable scheduling
//!
//! Rendering, persistence, and input collection are collaborator
//! concerns; the engine exposes [`Snapshot`] views and [`GameEvent`]
//! notifications and owns nothing else.
//!
//! # Example
//!
//! ```
//! use tictactoe_arena::{GameSession, Mark, PlayerSlot, SlotId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = GameSession::new(
//!     PlayerSlot::human("Ada", Mark::X),
//!     PlayerSlot::computer("Deep Toe", Mark::O),
//!     SlotId::A,
//! )?;
//! let session = session.apply_move_at(4)?;
//! assert_eq!(session.active_slot().name, "Deep Toe");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod driver;
mod position;
mod schedule;
mod session;

// Public module trees
pub mod invariants;
pub mod rules;
pub mod search;

// Crate-level exports - board and moves
pub use action::{InvalidMove, Move};
pub use board::{Board, Mark, Square};
pub use position::Position;

// Crate-level exports - rules and search
pub use rules::{Line, Outcome, evaluate};
pub use search::{Difficulty, choose_move};

// Crate-level exports - session
pub use session::{
    GameSession, PlayerKind, PlayerSlot, SessionError, SessionStatus, SlotId, Snapshot,
};

// Crate-level exports - driver and scheduling
pub use driver::{Command, DriverConfig, GameEvent, MatchDriver, WinObserver};
pub use schedule::{Scheduled, send_after};
