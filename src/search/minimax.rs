//! Full-depth minimax with alpha-beta pruning.

use crate::board::{Board, Mark, Square};
use crate::position::Position;
use crate::rules::check_winner;
use rand::Rng;
use tracing::{debug, instrument};

/// Strong openings for an empty board: the corners and the center.
const OPENING_BOOK: [Position; 5] = [
    Position::TopLeft,
    Position::TopRight,
    Position::Center,
    Position::BottomLeft,
    Position::BottomRight,
];

/// Picks the best move for `computer` on the given board.
///
/// Two shortcuts come before the search:
/// 1. An entirely empty board gets a random corner-or-center opening;
///    a full-depth search there is pointless and a fixed reply is
///    predictable.
/// 2. With exactly one square filled and the center open, the reply is
///    the center.
///
/// Otherwise runs alpha-beta minimax over every open square and returns
/// the first square (enumeration order) attaining the maximum score.
/// Returns `None` if the board is full or already won.
#[instrument(skip(board))]
pub fn best_move(board: &Board, computer: Mark, human: Mark) -> Option<Position> {
    let open = board.empty_positions();
    if open.is_empty() || check_winner(board).is_some() {
        return None;
    }

    if open.len() == 9 {
        let choice = OPENING_BOOK[rand::rng().random_range(0..OPENING_BOOK.len())];
        debug!(position = ?choice, "opening book move");
        return Some(choice);
    }

    if open.len() == 8 && board.is_empty(Position::Center) {
        debug!("taking the center in reply");
        return Some(Position::Center);
    }

    let mut best = None;
    let mut best_score = i32::MIN;
    for pos in open {
        let mut child = board.clone();
        child.set(pos, Square::Occupied(computer));
        let score = minimax(&child, 0, i32::MIN, i32::MAX, false, computer, human);
        if score > best_score {
            best_score = score;
            best = Some(pos);
        }
    }

    debug!(position = ?best, score = best_score, "search complete");
    best
}

/// Alpha-beta-pruned minimax.
///
/// A completed line for `computer` scores `10 - depth`, one for `human`
/// scores `depth - 10`, a full board scores `0`; so among equal outcomes
/// faster wins and slower losses are preferred.
fn minimax(
    board: &Board,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    computer: Mark,
    human: Mark,
) -> i32 {
    if let Some((mark, _)) = check_winner(board) {
        return if mark == computer {
            10 - depth
        } else {
            depth - 10
        };
    }

    let open = board.empty_positions();
    if open.is_empty() {
        return 0;
    }

    if maximizing {
        let mut max_eval = i32::MIN;
        for pos in open {
            let mut child = board.clone();
            child.set(pos, Square::Occupied(computer));
            let eval = minimax(&child, depth + 1, alpha, beta, false, computer, human);
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for pos in open {
            let mut child = board.clone();
            child.set(pos, Square::Occupied(human));
            let eval = minimax(&child, depth + 1, alpha, beta, true, computer, human);
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        min_eval
    }
}
