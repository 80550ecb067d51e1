//! First-class move events and the rejected-move taxonomy.
//!
//! Moves are domain events, not side effects. They represent the player's
//! intent and can be validated independently of execution.

use crate::board::Mark;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A move: a mark placed at a position.
///
/// Moves are first-class domain events that can be:
/// - Validated before application
/// - Serialized for replay
/// - Logged for debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark lands.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark being placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
///
/// All variants are local and recoverable: a rejection leaves the session
/// untouched and the caller may re-prompt. Out-of-range raw indices from
/// the UI are folded into [`InvalidMove::CellOccupied`]; they are the same
/// class of input error and get the same treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The square at the index is not open for play.
    #[display("square {_0} is not open")]
    CellOccupied(usize),

    /// The game is already over.
    #[display("game is already over")]
    GameOver,

    /// It's not this mark's turn.
    #[display("it is not {_0}'s turn")]
    NotYourTurn(Mark),
}

impl std::error::Error for InvalidMove {}
