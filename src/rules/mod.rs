//! Game rules: terminal evaluation of a board.
//!
//! Pure functions only; rules are separated from board storage so the
//! session and the search can share one source of truth about outcomes.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Line, LINES, check_winner};

use crate::board::{Board, Mark};
use tracing::instrument;

/// Terminal status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game is still open.
    InProgress,
    /// A line is fully marked; `line` holds the winning triple.
    Winner {
        /// The mark that completed the line.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Every square is filled with no winner: a draw.
    Full,
}

/// Evaluates the terminal status of a board.
///
/// Scans the eight fixed lines in enumeration order and reports the first
/// fully-marked one. Under alternating legal play a single move can
/// complete at most one new line, so first-match reporting is sound.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = check_winner(board) {
        return Outcome::Winner { mark, line };
    }
    if is_full(board) {
        return Outcome::Full;
    }
    Outcome::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_winner_reported_with_line() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.place(pos, Mark::X).unwrap();
        }
        assert_eq!(
            evaluate(&board),
            Outcome::Winner {
                mark: Mark::X,
                line: [Position::TopLeft, Position::TopCenter, Position::TopRight],
            }
        );
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let mut board = Board::new();
        // X O X / O X X / O X O
        let layout = [
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::O),
            (Position::TopRight, Mark::X),
            (Position::MiddleLeft, Mark::O),
            (Position::Center, Mark::X),
            (Position::MiddleRight, Mark::X),
            (Position::BottomLeft, Mark::O),
            (Position::BottomCenter, Mark::X),
            (Position::BottomRight, Mark::O),
        ];
        for (pos, mark) in layout {
            board.place(pos, mark).unwrap();
        }
        assert_eq!(evaluate(&board), Outcome::Full);
    }
}
