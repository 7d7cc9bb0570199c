use serde::Serialize;
use tracing::debug;

/// Aggregate statistics for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    #[serde(rename = "matches")]
    pub matches_played: u32,
    pub wins: u32,
    #[serde(rename = "ranking")]
    pub ranking_position: u32,
}

/// Trait for looking up user statistics
pub trait UserProfileProvider: Send + Sync {
    fn load_user_details(&self, user_id: &str) -> UserProfile;
}

/// Provider that returns the same mock statistics for everyone
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProfileProvider;

impl MockProfileProvider {
    pub const PROFILE: UserProfile = UserProfile {
        matches_played: 100,
        wins: 50,
        ranking_position: 124,
    };
}

impl UserProfileProvider for MockProfileProvider {
    fn load_user_details(&self, user_id: &str) -> UserProfile {
        debug!("Loading mock profile for user {}", user_id);
        Self::PROFILE
    }
}
