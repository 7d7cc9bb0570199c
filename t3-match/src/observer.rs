//! Outbound notifications from a match
//!
//! The match owns its observer, so there is no shared ownership between the
//! match and whoever listens to it. Three observers ship with the crate:
//! a pair of closures (`Hooks`), an in-memory event log (`Vec<MatchEvent>`)
//! and a channel sender.

use std::sync::mpsc::Sender;

use serde::{Serialize, Serializer};
use t3_core::{winner_token, Board, Side};
use tracing::debug;

use crate::game::MatchId;

/// Receiver of a match's status-changed and match-ended notifications
pub trait MatchObserver {
    /// The match moved on and is still active
    fn on_status_change(&mut self, match_id: &MatchId, board: &Board);

    /// The match reached a terminal board; `winner` is `None` for a draw
    fn on_match_ended(&mut self, match_id: &MatchId, board: &Board, winner: Option<Side>);
}

/// A notification as a value, for observers that queue or forward them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    StatusChanged {
        match_id: MatchId,
        board: Board,
    },
    Ended {
        match_id: MatchId,
        board: Board,
        #[serde(serialize_with = "serialize_winner")]
        winner: Option<Side>,
    },
}

impl MatchEvent {
    pub fn match_id(&self) -> &MatchId {
        match self {
            MatchEvent::StatusChanged { match_id, .. } | MatchEvent::Ended { match_id, .. } => match_id,
        }
    }

    pub fn board(&self) -> &Board {
        match self {
            MatchEvent::StatusChanged { board, .. } | MatchEvent::Ended { board, .. } => board,
        }
    }
}

fn serialize_winner<S: Serializer>(winner: &Option<Side>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(winner_token(*winner))
}

/// Observer built from two closures, one per notification
pub struct Hooks<S, E> {
    on_status: S,
    on_ended: E,
}

impl<S, E> Hooks<S, E>
where
    S: FnMut(&MatchId, &Board),
    E: FnMut(&MatchId, &Board, Option<Side>),
{
    pub fn new(on_status: S, on_ended: E) -> Self {
        Self { on_status, on_ended }
    }
}

impl<S, E> MatchObserver for Hooks<S, E>
where
    S: FnMut(&MatchId, &Board),
    E: FnMut(&MatchId, &Board, Option<Side>),
{
    fn on_status_change(&mut self, match_id: &MatchId, board: &Board) {
        (self.on_status)(match_id, board)
    }

    fn on_match_ended(&mut self, match_id: &MatchId, board: &Board, winner: Option<Side>) {
        (self.on_ended)(match_id, board, winner)
    }
}

impl MatchObserver for Vec<MatchEvent> {
    fn on_status_change(&mut self, match_id: &MatchId, board: &Board) {
        self.push(MatchEvent::StatusChanged {
            match_id: match_id.clone(),
            board: *board,
        });
    }

    fn on_match_ended(&mut self, match_id: &MatchId, board: &Board, winner: Option<Side>) {
        self.push(MatchEvent::Ended {
            match_id: match_id.clone(),
            board: *board,
            winner,
        });
    }
}

impl MatchObserver for Sender<MatchEvent> {
    fn on_status_change(&mut self, match_id: &MatchId, board: &Board) {
        let event = MatchEvent::StatusChanged {
            match_id: match_id.clone(),
            board: *board,
        };
        if self.send(event).is_err() {
            debug!("Dropping status update for match {}: receiver gone", match_id);
        }
    }

    fn on_match_ended(&mut self, match_id: &MatchId, board: &Board, winner: Option<Side>) {
        let event = MatchEvent::Ended {
            match_id: match_id.clone(),
            board: *board,
            winner,
        };
        if self.send(event).is_err() {
            debug!("Dropping result for match {}: receiver gone", match_id);
        }
    }
}
