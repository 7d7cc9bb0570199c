//! The match state machine
//!
//! A match starts `Active` on an empty board and becomes `Finished` once the
//! board is terminal. Only `take_action` mutates it.

use std::fmt;

use serde::Serialize;
use t3_core::{is_occupied, is_terminal, winner, Board, RulesError, Side};
use tracing::{debug, info, warn};

use crate::observer::MatchObserver;
use crate::policy::{FirstEmptyPolicy, Policy};

/// Opaque match identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why an action was dropped without touching the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Finished,
    Occupied,
}

/// Result of a single `take_action` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No state change and no notification
    Ignored(IgnoreReason),
    /// The match is still active; the observer got a status update
    Continued,
    /// The match finished; the observer got the result (`None` is a draw)
    Ended { winner: Option<Side> },
}

/// A single tic-tac-toe session against a bot or a remote player
///
/// The match owns its observer and is owned by exactly one caller.
pub struct Match<O: MatchObserver> {
    id: MatchId,
    local_side: Side,
    board: Board,
    finished: bool,
    bot: Option<Box<dyn Policy>>,
    observer: O,
}

impl<O: MatchObserver> Match<O> {
    /// Create an active match on an empty board
    ///
    /// With `vs_bot` the opponent answers every local move by playing the
    /// lowest-indexed empty cell.
    pub fn new(id: MatchId, local_side: Side, vs_bot: bool, observer: O) -> Self {
        let bot: Option<Box<dyn Policy>> = if vs_bot {
            Some(Box::new(FirstEmptyPolicy))
        } else {
            None
        };
        Self::with_bot(id, local_side, bot, observer)
    }

    /// Create a match with an explicit bot policy, or none for a human opponent
    pub fn with_bot(id: MatchId, local_side: Side, bot: Option<Box<dyn Policy>>, observer: O) -> Self {
        debug!("Created match {} as {} (vs_bot={})", id, local_side, bot.is_some());
        Self {
            id,
            local_side,
            board: Board::new(),
            finished: false,
            bot,
            observer,
        }
    }

    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn local_side(&self) -> Side {
        self.local_side
    }

    pub fn vs_bot(&self) -> bool {
        self.bot.is_some()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Play the local side at `position`, then let the bot answer
    ///
    /// Exactly one observer notification is sent per call unless the action is
    /// ignored. Actions on a finished match or an occupied cell are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RulesError::InvalidPosition` if `position` is outside 0..8.
    /// The match is left untouched.
    pub fn take_action(&mut self, position: usize) -> Result<ActionOutcome, RulesError> {
        // Bounds are checked before the finished guard so a bad index is
        // always reported.
        let occupied = is_occupied(&self.board, position)?;

        if self.finished {
            debug!("Match {}: ignoring action at {}, match is finished", self.id, position);
            return Ok(ActionOutcome::Ignored(IgnoreReason::Finished));
        }
        if occupied {
            debug!("Match {}: ignoring action at {}, cell is occupied", self.id, position);
            return Ok(ActionOutcome::Ignored(IgnoreReason::Occupied));
        }

        self.board.place(position, self.local_side)?;
        debug!("Match {}: {} played {}", self.id, self.local_side, position);

        if is_terminal(&self.board) {
            return Ok(self.finish());
        }

        if let Some(bot) = self.bot.as_mut() {
            match bot.select_position(&self.board) {
                Some(bot_position) => {
                    let bot_side = self.local_side.opponent();
                    self.board.place(bot_position, bot_side)?;
                    debug!("Match {}: bot {} played {}", self.id, bot_side, bot_position);
                }
                None => {
                    // Unreachable while the terminal check above holds
                    warn!("Match {}: bot found no empty cell, ending as draw", self.id);
                    self.finished = true;
                    self.observer.on_match_ended(&self.id, &self.board, None);
                    return Ok(ActionOutcome::Ended { winner: None });
                }
            }

            if is_terminal(&self.board) {
                return Ok(self.finish());
            }
        }

        self.observer.on_status_change(&self.id, &self.board);
        Ok(ActionOutcome::Continued)
    }

    fn finish(&mut self) -> ActionOutcome {
        self.finished = true;
        let winner = winner(&self.board);
        match winner {
            Some(side) => info!("Match {} finished, {} wins", self.id, side),
            None => info!("Match {} finished in a draw", self.id),
        }
        self.observer.on_match_ended(&self.id, &self.board, winner);
        ActionOutcome::Ended { winner }
    }
}

impl<O: MatchObserver + fmt::Debug> fmt::Debug for Match<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("id", &self.id)
            .field("local_side", &self.local_side)
            .field("vs_bot", &self.vs_bot())
            .field("board", &self.board)
            .field("finished", &self.finished)
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MatchEvent;
    use proptest::prelude::*;
    use t3_core::{has_won, Cell};

    fn bot_match() -> Match<Vec<MatchEvent>> {
        Match::new(MatchId::new("test-match"), Side::X, true, Vec::new())
    }

    fn tokens(events: &[MatchEvent]) -> Vec<[&'static str; 9]> {
        events.iter().map(|event| event.board().tokens()).collect()
    }

    /// Bot that never finds a move, to reach the defensive branch
    struct StuckBot;

    impl Policy for StuckBot {
        fn select_position(&mut self, _board: &Board) -> Option<usize> {
            None
        }
    }

    #[test]
    fn test_initial_state() {
        let game = bot_match();
        assert_eq!(game.id().as_str(), "test-match");
        assert_eq!(game.local_side(), Side::X);
        assert!(game.vs_bot());
        assert!(!game.is_finished());
        assert_eq!(*game.board(), Board::new());
        assert!(game.observer().is_empty());
    }

    #[test]
    fn test_first_move_bot_answers_lowest_cell() {
        let mut game = bot_match();

        let outcome = game.take_action(0).unwrap();

        assert_eq!(outcome, ActionOutcome::Continued);
        assert_eq!(
            game.board().tokens(),
            ["x", "o", "", "", "", "", "", "", ""]
        );
        assert_eq!(
            game.observer().as_slice(),
            &[MatchEvent::StatusChanged {
                match_id: MatchId::new("test-match"),
                board: *game.board(),
            }]
        );
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let mut game = bot_match();
        game.take_action(0).unwrap();
        let board = *game.board();

        // Bot holds 1, local holds 0
        assert_eq!(game.take_action(1), Ok(ActionOutcome::Ignored(IgnoreReason::Occupied)));
        assert_eq!(game.take_action(0), Ok(ActionOutcome::Ignored(IgnoreReason::Occupied)));

        assert_eq!(*game.board(), board);
        assert_eq!(game.observer().len(), 1);
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let mut game = bot_match();
        assert_eq!(
            game.take_action(9),
            Err(RulesError::InvalidPosition { position: 9 })
        );
        assert_eq!(*game.board(), Board::new());
        assert!(game.observer().is_empty());
    }

    #[test]
    fn test_moves_zero_one_two() {
        let mut game = bot_match();

        assert_eq!(game.take_action(0), Ok(ActionOutcome::Continued));
        assert_eq!(game.take_action(1), Ok(ActionOutcome::Ignored(IgnoreReason::Occupied)));
        assert_eq!(game.take_action(2), Ok(ActionOutcome::Continued));

        assert_eq!(
            tokens(game.observer()),
            vec![
                ["x", "o", "", "", "", "", "", "", ""],
                ["x", "o", "x", "o", "", "", "", "", ""],
            ]
        );
        assert!(!game.is_finished());
    }

    #[test]
    fn test_local_win_on_diagonal() {
        let mut game = bot_match();
        for pos in [0, 2, 4] {
            assert_eq!(game.take_action(pos), Ok(ActionOutcome::Continued));
        }

        let outcome = game.take_action(6).unwrap();

        assert_eq!(outcome, ActionOutcome::Ended { winner: Some(Side::X) });
        assert!(game.is_finished());
        assert_eq!(
            game.observer().last(),
            Some(&MatchEvent::Ended {
                match_id: MatchId::new("test-match"),
                board: *game.board(),
                winner: Some(Side::X),
            })
        );
        assert_eq!(
            game.board().tokens(),
            ["x", "o", "x", "o", "x", "o", "x", "", ""]
        );
    }

    #[test]
    fn test_bot_win_ends_match() {
        let mut game = bot_match();
        for pos in [0, 2, 5] {
            assert_eq!(game.take_action(pos), Ok(ActionOutcome::Continued));
        }

        // Bot answers 6 with 7 and completes the middle column
        let outcome = game.take_action(6).unwrap();

        assert_eq!(outcome, ActionOutcome::Ended { winner: Some(Side::O) });
        assert_eq!(
            game.board().tokens(),
            ["x", "o", "x", "o", "o", "x", "x", "o", ""]
        );
        assert_eq!(game.observer().len(), 4);
    }

    #[test]
    fn test_draw() {
        let mut game = bot_match();
        for pos in [1, 3, 4, 6] {
            assert_eq!(game.take_action(pos), Ok(ActionOutcome::Continued));
        }

        let outcome = game.take_action(8).unwrap();

        assert_eq!(outcome, ActionOutcome::Ended { winner: None });
        assert_eq!(
            game.board().tokens(),
            ["o", "x", "o", "x", "x", "o", "x", "o", "x"]
        );
        assert!(matches!(
            game.observer().last(),
            Some(MatchEvent::Ended { winner: None, .. })
        ));
    }

    #[test]
    fn test_finished_match_is_idempotent() {
        let mut game = bot_match();
        for pos in [0, 2, 4, 6] {
            game.take_action(pos).unwrap();
        }
        assert!(game.is_finished());
        let board = *game.board();
        let events = game.observer().len();

        assert_eq!(game.take_action(8), Ok(ActionOutcome::Ignored(IgnoreReason::Finished)));
        assert_eq!(*game.board(), board);
        assert_eq!(game.observer().len(), events);
    }

    #[test]
    fn test_without_bot_only_local_moves() {
        let mut game = Match::new(MatchId::new("pvp"), Side::O, false, Vec::new());
        assert!(!game.vs_bot());

        game.take_action(4).unwrap();

        assert_eq!(game.board().get(4), Ok(Cell::Taken(Side::O)));
        assert_eq!(t3_core::available_moves(game.board()), 8);
        assert_eq!(game.observer().len(), 1);
    }

    #[test]
    fn test_stuck_bot_ends_as_draw() {
        let mut game = Match::with_bot(
            MatchId::new("stuck"),
            Side::X,
            Some(Box::new(StuckBot)),
            Vec::new(),
        );

        let outcome = game.take_action(0).unwrap();

        assert_eq!(outcome, ActionOutcome::Ended { winner: None });
        assert!(game.is_finished());
        assert!(matches!(
            game.into_observer().as_slice(),
            [MatchEvent::Ended { winner: None, .. }]
        ));
    }

    proptest! {
        #[test]
        fn prop_bot_plays_lowest_empty_and_one_event_per_action(moves in prop::collection::vec(0..9usize, 1..20)) {
            let mut game = bot_match();
            for pos in moves {
                let before = *game.board();
                let events_before = game.observer().len();
                let outcome = game.take_action(pos).unwrap();

                match outcome {
                    ActionOutcome::Ignored(_) => {
                        prop_assert_eq!(*game.board(), before);
                        prop_assert_eq!(game.observer().len(), events_before);
                    }
                    _ => {
                        prop_assert_eq!(game.observer().len(), events_before + 1);
                        let mut after_local = before;
                        after_local.place(pos, Side::X).unwrap();
                        if !is_terminal(&after_local) {
                            let expected = after_local.first_empty().unwrap();
                            prop_assert_eq!(game.board().get(expected), Ok(Cell::Taken(Side::O)));
                        }
                    }
                }
                prop_assert!(!(has_won(game.board(), Side::X) && has_won(game.board(), Side::O)));
                prop_assert_eq!(game.is_finished(), is_terminal(game.board()));
            }
        }
    }
}
