//! Tic-tac-toe engine with an unbeatable computer opponent.
//!
//! The crate is a UI-agnostic library: a presentation layer renders
//! [`RenderState`] snapshots and forwards cell activations and reset
//! requests into the [`GameController`]. The human always moves first;
//! the computer replies with an exhaustive minimax search, so it wins
//! or draws every round.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid storage and move validity ([`Board`], [`Position`])
//! - **Rules**: win, draw and outcome evaluation ([`evaluate`], [`Outcome`])
//! - **Search**: exhaustive minimax move selection ([`select_computer_move`])
//! - **Controller**: round lifecycle, pacing timers and series scoring
//!   ([`GameController`])
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_engine::GameController;
//!
//! # async fn example() {
//! let (controller, _events) = GameController::new();
//!
//! // Forwarded from the UI: the human picks the center cell.
//! controller.handle_cell_activated(4);
//!
//! // The computer's reply lands half a second later; meanwhile the UI
//! // can redraw from snapshots or from the event stream.
//! let snapshot = controller.render_state();
//! println!("{}", snapshot.status_text);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod position;
mod rules;
mod search;
mod types;

// Crate-level exports - Round controller
pub use controller::{
    AUTO_RESET_DELAY, COMPUTER_MOVE_DELAY, GameController, GameEvent, Phase, RenderState,
    SeriesStats,
};

// Crate-level exports - Board types
pub use position::Position;
pub use types::{Board, InvalidMoveError, Player, Square};

// Crate-level exports - Rules
pub use rules::{Outcome, check_winner, evaluate, is_full};

// Crate-level exports - Search
pub use search::select_computer_move;
