//! Match directory stub
//!
//! Real matchmaking does not exist: every request is answered immediately
//! with a fresh id, side X and a bot opponent.

use serde::Serialize;
use t3_core::Side;
use t3_match::MatchId;
use tracing::info;
use uuid::Uuid;

/// What the directory tells a player who asked for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnnouncement {
    pub match_id: MatchId,
    pub assigned_side: Side,
    pub vs_bot: bool,
}

/// Trait for issuing new matches
pub trait MatchDirectory: Send + Sync {
    fn enter_matchmaking(&self) -> MatchAnnouncement;
}

/// Directory that pairs every requester with a bot
#[derive(Debug, Clone, Copy, Default)]
pub struct BotMatchDirectory;

impl MatchDirectory for BotMatchDirectory {
    fn enter_matchmaking(&self) -> MatchAnnouncement {
        let match_id = MatchId::new(Uuid::new_v4().to_string());
        info!("Matched requester against bot in match {}", match_id);
        MatchAnnouncement {
            match_id,
            assigned_side: Side::X,
            vs_bot: true,
        }
    }
}
