//! Per-player session context
//!
//! Values that one screen hands to the next (the signed-in user, their
//! profile, the match they were just paired into) live here and are passed
//! explicitly instead of sitting in a global key/value store.

use crate::directory::MatchAnnouncement;
use crate::profile::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
    announcement: Option<MatchAnnouncement>,
    profile: Option<UserProfile>,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            announcement: None,
            profile: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store_announcement(&mut self, announcement: MatchAnnouncement) {
        self.announcement = Some(announcement);
    }

    pub fn announcement(&self) -> Option<&MatchAnnouncement> {
        self.announcement.as_ref()
    }

    pub fn store_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Forget the current match, keeping user and profile
    pub fn clear_match(&mut self) -> Option<MatchAnnouncement> {
        self.announcement.take()
    }
}
