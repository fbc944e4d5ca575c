//! Round lifecycle orchestration.
//!
//! The controller owns the board for the duration of a round. It
//! applies the human's move immediately, applies the computer's reply
//! after a short pacing delay, tallies series statistics and schedules
//! the automatic reset once a round ends. A presentation layer reads
//! [`RenderState`] snapshots and forwards cell activations and reset
//! requests; it can also listen on the [`GameEvent`] stream to redraw
//! without polling.

use crate::position::Position;
use crate::rules::{Outcome, evaluate};
use crate::search::select_computer_move;
use crate::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Delay before the computer's reply is applied to visible state.
///
/// Pacing only: the reply is computed eagerly when the human moves.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Delay between a terminal outcome and the automatic round reset.
pub const AUTO_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Round state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to pick a square.
    AwaitingHuman,
    /// The computer's reply is scheduled.
    AwaitingComputer,
    /// The round ended and the automatic reset is pending.
    Settling,
}

/// Cumulative results for the rounds played this session.
///
/// A human win increments neither counter: the computer is unbeatable,
/// so the scoreboard tracks how often it wins or draws. Stats survive
/// round resets and are lost on process exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Rounds won by the computer.
    pub computer_wins: u32,
    /// Rounds ended in a draw.
    pub draws: u32,
}

/// Messages sent from the controller to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed on the board.
    MoveMade {
        /// The player who moved.
        player: Player,
        /// The square that was filled.
        position: Position,
    },
    /// The round reached a terminal outcome.
    RoundOver {
        /// The final outcome of the round.
        outcome: Outcome,
    },
    /// The board was cleared for a new round.
    RoundReset,
}

/// Snapshot of everything a presentation layer needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderState {
    /// Squares in row-major order.
    pub cells: [Square; 9],
    /// One-line description of the round for a status display.
    pub status_text: String,
    /// The completed line to highlight, empty unless a player has won.
    pub winning_line: Vec<Position>,
    /// True when a cell activation would be accepted.
    pub input_accepted: bool,
}

/// Mutable round state guarded by the controller's mutex.
struct RoundState {
    board: Board,
    phase: Phase,
    winning_line: Vec<Position>,
    stats: SeriesStats,
    pending: Option<JoinHandle<()>>,
    /// Bumped on every reset. A scheduled task re-checks it under the
    /// lock, so a timer that already slept past its abort point cannot
    /// touch a fresh round.
    generation: u64,
}

/// Orchestrates rounds between the human and the computer.
///
/// Deferred actions (the paced computer reply and the automatic reset)
/// are spawned on the ambient tokio runtime, so the controller must be
/// used inside one. Dropping the controller cancels any pending timer.
pub struct GameController {
    state: Arc<Mutex<RoundState>>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl GameController {
    /// Creates a controller and the event stream a UI can listen on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: Arc::new(Mutex::new(RoundState {
                board: Board::new(),
                phase: Phase::AwaitingHuman,
                winning_line: Vec::new(),
                stats: SeriesStats::default(),
                pending: None,
                generation: 0,
            })),
            event_tx,
        };
        (controller, event_rx)
    }

    /// Applies the human's move at the given cell index.
    ///
    /// Invalid activations (index past the board, occupied square, not
    /// the human's turn, round settling) are silently ignored rather
    /// than surfaced: user-facing input mistakes are not exceptional.
    #[instrument(skip(self))]
    pub fn handle_cell_activated(&self, index: usize) {
        let Some(position) = Position::from_index(index) else {
            debug!(index, "Ignoring activation outside the board");
            return;
        };
        let mut state = self.state.lock().unwrap();
        if state.phase != Phase::AwaitingHuman {
            debug!(%position, phase = ?state.phase, "Ignoring activation out of turn");
            return;
        }
        if let Err(error) = state.board.place(position, Player::Human) {
            debug!(%error, "Ignoring invalid activation");
            return;
        }
        info!(%position, "Human move applied");
        send(&self.event_tx, GameEvent::MoveMade {
            player: Player::Human,
            position,
        });

        let outcome = evaluate(&state.board);
        if outcome.is_terminal() {
            enter_settling(&mut state, outcome, &self.state, &self.event_tx);
        } else {
            schedule_computer_reply(&mut state, &self.state, &self.event_tx);
        }
    }

    /// Resets the round immediately, cancelling any pending timer.
    ///
    /// Valid in any phase; series statistics are untouched.
    #[instrument(skip(self))]
    pub fn handle_reset_requested(&self) {
        let mut state = self.state.lock().unwrap();
        info!(phase = ?state.phase, "Manual reset requested");
        reset_round(&mut state, &self.event_tx);
    }

    /// Returns a snapshot of the current round for rendering.
    pub fn render_state(&self) -> RenderState {
        let state = self.state.lock().unwrap();
        let status_text = match evaluate(&state.board) {
            Outcome::Won { player, .. } => format!("{player} wins!"),
            Outcome::Draw => "It's a draw!".to_string(),
            Outcome::InProgress => {
                let turn = match state.phase {
                    Phase::AwaitingComputer => Player::Computer,
                    _ => Player::Human,
                };
                format!("Turn: {turn}")
            }
        };
        RenderState {
            cells: *state.board.squares(),
            status_text,
            winning_line: state.winning_line.clone(),
            input_accepted: state.phase == Phase::AwaitingHuman,
        }
    }

    /// Returns the current round phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().unwrap().phase
    }

    /// Returns the series statistics.
    pub fn stats(&self) -> SeriesStats {
        self.state.lock().unwrap().stats
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(pending) = state.pending.take() {
                debug!("Aborting pending timer on teardown");
                pending.abort();
            }
        }
    }
}

/// Delivery is best effort: the UI may have detached already.
fn send(events: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) {
    let _ = events.send(event);
}

/// Chooses the computer's reply now and schedules its application.
fn schedule_computer_reply(
    state: &mut RoundState,
    shared: &Arc<Mutex<RoundState>>,
    events: &mpsc::UnboundedSender<GameEvent>,
) {
    state.phase = Phase::AwaitingComputer;
    let reply = select_computer_move(&state.board);
    let generation = state.generation;
    let shared = Arc::clone(shared);
    let events = events.clone();
    state.pending = Some(tokio::spawn(async move {
        tokio::time::sleep(COMPUTER_MOVE_DELAY).await;
        let mut state = shared.lock().unwrap();
        if state.generation != generation || state.phase != Phase::AwaitingComputer {
            debug!("Discarding stale computer reply");
            return;
        }
        state.pending = None;
        apply_computer_reply(&mut state, reply, &shared, &events);
    }));
}

/// Applies the precomputed computer reply to the visible board.
fn apply_computer_reply(
    state: &mut RoundState,
    reply: Option<Position>,
    shared: &Arc<Mutex<RoundState>>,
    events: &mpsc::UnboundedSender<GameEvent>,
) {
    let Some(position) = reply else {
        warn!("Computer had no reply available");
        state.phase = Phase::AwaitingHuman;
        return;
    };
    if let Err(error) = state.board.place(position, Player::Computer) {
        warn!(%error, "Computer reply no longer applies");
        state.phase = Phase::AwaitingHuman;
        return;
    }
    info!(%position, "Computer move applied");
    send(events, GameEvent::MoveMade {
        player: Player::Computer,
        position,
    });

    let outcome = evaluate(&state.board);
    if outcome.is_terminal() {
        enter_settling(state, outcome, shared, events);
    } else {
        state.phase = Phase::AwaitingHuman;
    }
}

/// Records the terminal outcome and schedules the automatic reset.
fn enter_settling(
    state: &mut RoundState,
    outcome: Outcome,
    shared: &Arc<Mutex<RoundState>>,
    events: &mpsc::UnboundedSender<GameEvent>,
) {
    match &outcome {
        Outcome::Won { player, line } => {
            state.winning_line = line.to_vec();
            if *player == Player::Computer {
                state.stats.computer_wins += 1;
            }
        }
        Outcome::Draw => {
            state.winning_line.clear();
            state.stats.draws += 1;
        }
        Outcome::InProgress => return,
    }
    state.phase = Phase::Settling;
    info!(?outcome, stats = ?state.stats, "Round settled");
    send(events, GameEvent::RoundOver { outcome });

    let generation = state.generation;
    let shared = Arc::clone(shared);
    let events = events.clone();
    state.pending = Some(tokio::spawn(async move {
        tokio::time::sleep(AUTO_RESET_DELAY).await;
        let mut state = shared.lock().unwrap();
        if state.generation != generation || state.phase != Phase::Settling {
            debug!("Discarding stale auto reset");
            return;
        }
        state.pending = None;
        debug!("Automatic reset firing");
        reset_round(&mut state, &events);
    }));
}

/// Clears the round back to an empty board awaiting the human.
fn reset_round(state: &mut RoundState, events: &mpsc::UnboundedSender<GameEvent>) {
    if let Some(pending) = state.pending.take() {
        pending.abort();
    }
    state.generation = state.generation.wrapping_add(1);
    state.board = Board::new();
    state.phase = Phase::AwaitingHuman;
    state.winning_line.clear();
    send(events, GameEvent::RoundReset);
}
