//! Stub server side of T3
//!
//! There is no network here. This crate offers the in-memory stand-ins the
//! client talks to: a match directory that always pairs the player with a
//! bot, a profile provider returning fixed statistics, and a gameplay
//! service that turns keyed actions into match events.

pub mod config;
pub mod directory;
pub mod messaging;
pub mod profile;
pub mod service;
pub mod session;

// Re-export main types
pub use config::Config;
pub use directory::{BotMatchDirectory, MatchAnnouncement, MatchDirectory};
pub use messaging::{Action, Event};
pub use profile::{MockProfileProvider, UserProfile, UserProfileProvider};
pub use service::{started_event, GameplayService, ServiceDetails, ServiceError};
pub use session::SessionContext;
