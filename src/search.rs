//! Exhaustive minimax search for the computer's reply.
//!
//! The game tree is at most nine plies deep, so the search enumerates
//! it completely without pruning or depth discounting. This does not
//! generalize to larger boards and is not meant to.

use crate::position::Position;
use crate::rules::{Outcome, evaluate};
use crate::types::{Board, Player, Square};
use tracing::{debug, instrument};

/// Selects the optimal move for the computer on the given board.
///
/// Scoring is from the computer's perspective: a computer win is +1, a
/// human win is -1, a draw is 0. Equally scored moves resolve to the
/// first empty square in index order; a faster win is not preferred
/// over a slower one. Exploration runs on a scratch copy, so the
/// caller's board is never modified.
///
/// Returns `None` only when the board has no empty square.
#[instrument(skip(board))]
pub fn select_computer_move(board: &Board) -> Option<Position> {
    let mut scratch = board.clone();
    let (score, choice) = minimax(&mut scratch, Player::Computer);
    debug_assert_eq!(scratch, *board);
    if let Some(position) = choice {
        debug!(%position, score, "Search selected computer move");
    }
    choice
}

/// Recursive minimax over every empty square.
///
/// The computer maximizes, the simulated human minimizes. Each trial
/// mark is unplaced before the next sibling, so exploration never leaks
/// across branches. Strict comparison keeps the first-seen move among
/// ties.
fn minimax(board: &mut Board, to_move: Player) -> (i8, Option<Position>) {
    match evaluate(board) {
        Outcome::Won {
            player: Player::Computer,
            ..
        } => return (1, None),
        Outcome::Won {
            player: Player::Human,
            ..
        } => return (-1, None),
        Outcome::Draw => return (0, None),
        Outcome::InProgress => {}
    }

    let mut best_score = match to_move {
        Player::Computer => i8::MIN,
        Player::Human => i8::MAX,
    };
    let mut best_move = None;

    for position in Position::ALL {
        if !board.is_empty(position) {
            continue;
        }
        board.set(position, Square::Occupied(to_move));
        let (score, _) = minimax(board, to_move.opponent());
        board.set(position, Square::Empty);

        let improves = match to_move {
            Player::Computer => score > best_score,
            Player::Human => score < best_score,
        };
        if improves {
            best_score = score;
            best_move = Some(position);
        }
    }

    (best_score, best_move)
}
