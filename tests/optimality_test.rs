//! Exhaustive play-out tests for the search engine.

use tictactoe_engine::{Board, Outcome, Player, Position, evaluate, select_computer_move};

#[derive(Debug, Default)]
struct OutcomeTally {
    human_wins: u32,
    computer_wins: u32,
    draws: u32,
}

impl OutcomeTally {
    fn record(&mut self, player: Player) {
        match player {
            Player::Human => self.human_wins += 1,
            Player::Computer => self.computer_wins += 1,
        }
    }
}

/// Walks every legal human strategy against the engine. The human
/// branches over all empty squares at each turn; the engine answers
/// each intermediate position with its search reply.
fn sweep(board: &Board, tally: &mut OutcomeTally) {
    for position in Position::ALL {
        if !board.is_empty(position) {
            continue;
        }
        let mut trial = board.clone();
        trial.place(position, Player::Human).unwrap();
        match evaluate(&trial) {
            Outcome::Won { player, .. } => {
                tally.record(player);
                continue;
            }
            Outcome::Draw => {
                tally.draws += 1;
                continue;
            }
            Outcome::InProgress => {}
        }

        let reply = select_computer_move(&trial).expect("non-terminal board has a reply");
        // An occupied reply would panic here, which is the point.
        trial.place(reply, Player::Computer).unwrap();
        match evaluate(&trial) {
            Outcome::Won { player, .. } => tally.record(player),
            Outcome::Draw => tally.draws += 1,
            Outcome::InProgress => sweep(&trial, tally),
        }
    }
}

#[test]
fn engine_never_loses_to_any_human_strategy() {
    let mut tally = OutcomeTally::default();
    sweep(&Board::new(), &mut tally);

    assert_eq!(tally.human_wins, 0, "engine lost a line: {tally:?}");
    // Sanity: the sweep actually exercised both terminal kinds.
    assert!(tally.computer_wins > 0);
    assert!(tally.draws > 0);
}
