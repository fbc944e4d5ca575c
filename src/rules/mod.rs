//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the search engine and the
//! round controller share one source of truth for terminal outcomes.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use crate::position::Position;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
///
/// Derived fresh from the board on every query, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The round is still in progress.
    InProgress,
    /// A player completed a line.
    Won {
        /// The player who completed the line.
        player: Player,
        /// The completed line.
        line: [Position; 3],
    },
    /// The board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true if the round has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Evaluates the board.
///
/// The first completed line in scan order wins; otherwise a full board
/// is a draw and anything else is still in progress.
#[instrument]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = check_winner(board) {
        return Outcome::Won { player, line };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
