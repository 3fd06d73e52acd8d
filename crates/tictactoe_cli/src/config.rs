//! Application configuration loaded from TOML.
//!
//! ```toml
//! [game]
//! ai_enabled = true
//! player_mark = "x"
//! first_mover = "player"
//! ai_scheduling = "immediate"
//!
//! [log]
//! filter = "info"
//! ```

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::EngineConfig;
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Game settings.
    game: GameSettings,

    /// Logging settings.
    log: LogSettings,
}

/// The `[game]` table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Whether the engine plays the AI side.
    ai_enabled: bool,

    /// Engine settings, inlined into the same table.
    #[serde(flatten)]
    engine: EngineConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            engine: EngineConfig::default(),
        }
    }
}

/// The `[log]` table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(ai_enabled = config.game.ai_enabled, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if present,
    /// else defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replaces the game settings.
    pub fn with_game(mut self, game: GameSettings) -> Self {
        self.game = game;
        self
    }
}

impl GameSettings {
    /// Sets whether the AI plays.
    pub fn with_ai_enabled(mut self, ai_enabled: bool) -> Self {
        self.ai_enabled = ai_enabled;
        self
    }

    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{AiScheduling, Mark, Side};

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(*config.game().ai_enabled());
        assert_eq!(config.log().filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_game_table_flattens_engine_settings() {
        let config = AppConfig::from_toml(
            r#"
            [game]
            ai_enabled = false
            player_mark = "o"
            first_mover = "ai"
            ai_scheduling = "deferred"

            [log]
            filter = "tictactoe_engine=debug"
            "#,
        )
        .unwrap();

        assert!(!*config.game().ai_enabled());
        let engine = config.game().engine();
        assert_eq!(*engine.player_mark(), Mark::O);
        assert_eq!(*engine.first_mover(), Side::Ai);
        assert_eq!(*engine.ai_scheduling(), AiScheduling::Deferred);
        assert_eq!(config.log().filter(), "tictactoe_engine=debug");
    }

    #[test]
    fn test_parse_error_carries_location() {
        let err = AppConfig::from_toml("[game]\nplayer_mark = \"z\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().starts_with("Config error: "));
    }
}
