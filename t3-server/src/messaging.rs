//! Keyed actions and events exchanged with the gameplay service

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const START_ACTION: &str = "tictactoe.gameplay.start";
pub const MOVE_ACTION: &str = "tictactoe.gameplay.move";

pub const STARTED_EVENT: &str = "tictactoe.gameplay.started";
pub const STATUS_EVENT: &str = "tictactoe.gameplay.status";
pub const RESULT_EVENT: &str = "tictactoe.gameplay.result";

/// Request sent by a client session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub session_id: String,
    pub key: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(session_id: impl Into<String>, key: impl Into<String>, payload: Value) -> Self {
        Self {
            session_id: session_id.into(),
            key: key.into(),
            payload,
        }
    }
}

/// Notification sent back to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub key: String,
    pub payload: Value,
}

impl Event {
    pub fn new(key: impl Into<String>, payload: Value) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }
}
