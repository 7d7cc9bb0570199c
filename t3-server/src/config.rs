use anyhow::{anyhow, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use t3_core::BOARD_SIZE;
use tracing::Level;

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(name = "t3")]
#[command(about = "Local tic-tac-toe session against the T3 bot")]
#[command(long_about = "Plays one local tic-tac-toe session.

The player is matched against the stub directory's bot, the given moves are
replayed in order and every event the gameplay service emits is printed as
one JSON line on stdout.")]
pub struct Config {
    /// User playing the session
    #[arg(long, env = "T3_USER_ID", default_value = "guest")]
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Cell indexes (0-8) to play, in order, e.g. 0,4,8
    #[arg(long, env = "T3_MOVES", value_delimiter = ',')]
    #[serde(default)]
    pub moves: Vec<usize>,

    /// Gameplay service identifier (random when unset)
    #[arg(long, env = "T3_SERVICE_ID")]
    #[serde(default)]
    pub service_id: Option<String>,

    /// Print the user's profile before playing
    #[arg(long, env = "T3_SHOW_PROFILE")]
    #[serde(default)]
    pub show_profile: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "T3_LOG_LEVEL", default_value = "info")]
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Read settings from a TOML file instead of the command line
    #[arg(long)]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

fn default_user_id() -> String {
    "guest".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Parse the command line, switching to the TOML file if one is given
    pub fn load() -> Result<Self> {
        let cli = Self::parse();
        match &cli.config {
            Some(path) => Self::from_toml_file(path),
            None => Ok(cli),
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let mut config = Self::from_toml_str(&raw)
            .map_err(|e| anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        config.config = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(anyhow!("user_id cannot be empty"));
        }

        if let Some(pos) = self.moves.iter().find(|&&pos| pos >= BOARD_SIZE) {
            return Err(anyhow!("move {} is outside the board (0-8)", pos));
        }

        if matches!(&self.service_id, Some(id) if id.is_empty()) {
            return Err(anyhow!("service_id cannot be empty"));
        }

        self.tracing_level()?;

        Ok(())
    }

    pub fn tracing_level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }
}
