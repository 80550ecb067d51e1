//! Win detection.

use crate::board::{Board, Mark, Square};
use crate::position::Position;

/// A winning triple of positions.
pub type Line = [Position; 3];

/// The eight fixed lines: rows first, then columns, then the two
/// diagonals. The order is the tie-break when scanning.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks for a completed line on the board.
///
/// Returns the mark and the line of the first match in [`LINES`] order,
/// or `None` if no line is fully one mark.
pub fn check_winner(board: &Board) -> Option<(Mark, Line)> {
    for line in LINES {
        let [a, b, c] = line;
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            if let Square::Occupied(mark) = sq {
                return Some((mark, line));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(Position, Mark)]) -> Board {
        let mut board = Board::new();
        for (pos, mark) in marks {
            board.place(*pos, *mark).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_detected() {
        for line in LINES {
            let board = board_with(&line.map(|pos| (pos, Mark::O)));
            assert_eq!(check_winner(&board), Some((Mark::O, line)));
        }
    }

    #[test]
    fn test_first_line_wins_tie_break() {
        // Top row and left column both complete; rows come first.
        let board = board_with(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::X),
            (Position::TopRight, Mark::X),
            (Position::MiddleLeft, Mark::X),
            (Position::BottomLeft, Mark::X),
        ]);
        assert_eq!(
            check_winner(&board),
            Some((
                Mark::X,
                [Position::TopLeft, Position::TopCenter, Position::TopRight]
            ))
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::O),
            (Position::TopRight, Mark::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }
}
