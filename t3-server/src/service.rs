//! Gameplay service
//!
//! Dispatches keyed actions to the matches it owns and turns the match
//! notifications into events for the client. Each active match belongs to the
//! session that started it; finished matches are dropped from the table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use t3_core::{winner_token, RulesError};
use t3_match::{ActionOutcome, Match, MatchEvent, MatchId};
use tracing::{debug, info, warn};

use crate::directory::{BotMatchDirectory, MatchAnnouncement, MatchDirectory};
use crate::messaging::{
    Action, Event, MOVE_ACTION, RESULT_EVENT, START_ACTION, STARTED_EVENT, STATUS_EVENT,
};

/// Error type for gameplay service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Cannot process action identified by: {0}")]
    UnknownAction(String),
    #[error("Unknown match: {0}")]
    UnknownMatch(String),
    #[error("Invalid payload for {key}: {reason}")]
    InvalidPayload { key: String, reason: String },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Static description of the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    pub service_id: String,
    pub name: String,
    pub game: String,
    pub description: String,
    pub version: String,
}

impl ServiceDetails {
    fn new(service_id: String) -> Self {
        Self {
            service_id,
            name: "tictactoe.gameplay".to_string(),
            game: "tictactoe".to_string(),
            description: "Play tic-tac-toe with friends.".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Deserialize)]
struct MovePayload {
    #[serde(rename = "gameID")]
    game_id: String,
    #[serde(flatten)]
    target: MoveTarget,
}

/// Either a flat cell index or the row/column form older clients send
#[derive(Deserialize)]
#[serde(untagged)]
enum MoveTarget {
    Index {
        position: usize,
    },
    Grid {
        #[serde(rename = "posX")]
        pos_x: usize,
        #[serde(rename = "posY")]
        pos_y: usize,
    },
}

impl MoveTarget {
    fn position(&self) -> Result<usize, ServiceError> {
        match *self {
            MoveTarget::Index { position } => Ok(position),
            MoveTarget::Grid { pos_x, pos_y } if pos_x < 3 && pos_y < 3 => Ok(pos_x * 3 + pos_y),
            MoveTarget::Grid { pos_x, pos_y } => Err(ServiceError::InvalidPayload {
                key: MOVE_ACTION.to_string(),
                reason: format!("grid position {}:{} is outside the board", pos_x, pos_y),
            }),
        }
    }
}

struct ActiveMatch {
    session_id: String,
    game: Match<Vec<MatchEvent>>,
}

/// Tic-tac-toe gameplay service
pub struct GameplayService {
    details: ServiceDetails,
    directory: Box<dyn MatchDirectory>,
    matches: HashMap<MatchId, ActiveMatch>,
}

impl GameplayService {
    /// Create a service that pairs every player with a bot
    pub fn new(service_id: impl Into<String>) -> Self {
        Self::with_directory(service_id, Box::new(BotMatchDirectory))
    }

    /// Create a service backed by a custom match directory
    pub fn with_directory(service_id: impl Into<String>, directory: Box<dyn MatchDirectory>) -> Self {
        Self {
            details: ServiceDetails::new(service_id.into()),
            directory,
            matches: HashMap::new(),
        }
    }

    pub fn details(&self) -> &ServiceDetails {
        &self.details
    }

    /// Number of matches that have not finished yet
    pub fn active_matches(&self) -> usize {
        self.matches.len()
    }

    /// Handle one client action
    ///
    /// Returns `Ok(None)` when the action was accepted but produced nothing to
    /// report, which happens for moves on occupied cells.
    pub fn handle_action(&mut self, action: &Action) -> Result<Option<Event>, ServiceError> {
        match action.key.as_str() {
            START_ACTION => {
                let announcement = self.start_match(&action.session_id);
                Ok(Some(started_event(&announcement)))
            }
            MOVE_ACTION => self.handle_move(action),
            other => {
                warn!("Session {} sent unknown action {}", action.session_id, other);
                Err(ServiceError::UnknownAction(other.to_string()))
            }
        }
    }

    /// Ask the directory for a match and start tracking it for `session_id`
    pub fn start_match(&mut self, session_id: &str) -> MatchAnnouncement {
        let announcement = self.directory.enter_matchmaking();
        let game = Match::new(
            announcement.match_id.clone(),
            announcement.assigned_side,
            announcement.vs_bot,
            Vec::new(),
        );
        info!(
            "Session {} started match {} as {}",
            session_id, announcement.match_id, announcement.assigned_side
        );
        self.matches.insert(
            announcement.match_id.clone(),
            ActiveMatch {
                session_id: session_id.to_string(),
                game,
            },
        );
        announcement
    }

    fn handle_move(&mut self, action: &Action) -> Result<Option<Event>, ServiceError> {
        let payload: MovePayload =
            serde_json::from_value(action.payload.clone()).map_err(|e| ServiceError::InvalidPayload {
                key: action.key.clone(),
                reason: e.to_string(),
            })?;
        let position = payload.target.position()?;
        let match_id = MatchId::new(payload.game_id);

        let active = self
            .matches
            .get_mut(&match_id)
            .filter(|active| active.session_id == action.session_id)
            .ok_or_else(|| ServiceError::UnknownMatch(match_id.to_string()))?;

        let outcome = active.game.take_action(position)?;
        debug!("Match {}: move at {} -> {:?}", match_id, position, outcome);

        let event = active.game.observer_mut().drain(..).last().map(event_for);

        if let ActionOutcome::Ended { .. } = outcome {
            self.matches.remove(&match_id);
            debug!("Match {} removed, {} still active", match_id, self.matches.len());
        }

        Ok(event)
    }
}

/// Event announcing a freshly started match
pub fn started_event(announcement: &MatchAnnouncement) -> Event {
    let opponent = if announcement.vs_bot { "bot" } else { "human" };
    Event::new(
        STARTED_EVENT,
        json!({
            "gameID": announcement.match_id,
            "opponent": opponent,
            "side": announcement.assigned_side,
        }),
    )
}

fn event_for(event: MatchEvent) -> Event {
    match event {
        MatchEvent::StatusChanged { match_id, board } => Event::new(
            STATUS_EVENT,
            json!({ "gameID": match_id, "board": board }),
        ),
        MatchEvent::Ended { match_id, board, winner } => Event::new(
            RESULT_EVENT,
            json!({ "gameID": match_id, "board": board, "winner": winner_token(winner) }),
        ),
    }
}
