//! Computer move selection.
//!
//! Two strategies, chosen explicitly by difficulty. The full-depth search
//! is the canonical opponent; the random strategy exists only as an
//! opt-in easy mode and is never substituted for the search.

mod easy;
mod minimax;

pub use minimax::best_move;

use crate::board::{Board, Mark};
use crate::position::Position;
use crate::rules::{self, Outcome};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty square.
    Easy,
    /// Full-depth alpha-beta search; never loses.
    #[default]
    Perfect,
}

/// Picks the computer's move for the given board.
///
/// Returns `None` when the board has no open square or is already
/// terminal; the driver never asks in either case.
#[instrument(skip(board))]
pub fn choose_move(
    board: &Board,
    computer: Mark,
    human: Mark,
    difficulty: Difficulty,
) -> Option<Position> {
    if rules::evaluate(board) != Outcome::InProgress {
        return None;
    }
    match difficulty {
        Difficulty::Easy => easy::random_move(board),
        Difficulty::Perfect => minimax::best_move(board, computer, human),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_picks_a_legal_square() {
        let mut board = Board::new();
        board.place(Position::Center, Mark::X).unwrap();
        let choice = choose_move(&board, Mark::O, Mark::X, Difficulty::Easy)
            .expect("open board has a move");
        assert!(board.is_empty(choice));
    }

    #[test]
    fn test_no_move_on_full_board() {
        let mut board = Board::new();
        // X O X / O X X / O X O, no winner
        let marks = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
        ];
        for (pos, mark) in Position::ALL.iter().zip(marks) {
            board.place(*pos, mark).unwrap();
        }
        assert_eq!(choose_move(&board, Mark::O, Mark::X, Difficulty::Easy), None);
        assert_eq!(
            choose_move(&board, Mark::O, Mark::X, Difficulty::Perfect),
            None
        );
    }
}
