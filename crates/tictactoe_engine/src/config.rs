//! Engine configuration.

use super::{Mark, MarkAssignment, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// When the engine plays the AI's move after the player's move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiScheduling {
    /// Search and apply before `submit_player_move` returns.
    #[default]
    Immediate,
    /// Stay in the AI turn until the caller invokes `play_ai_turn`.
    Deferred,
}

/// Settings fixed for the lifetime of a [`crate::GameEngine`].
///
/// Whether the AI plays at all is chosen per game by `start_game`. Every
/// field has a default, so an empty table is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Mark used by the human player; the AI takes the other one.
    player_mark: Mark,

    /// Side that moves first.
    first_mover: Side,

    /// When AI moves are computed.
    ai_scheduling: AiScheduling,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_mark: Mark::X,
            first_mover: Side::Player,
            ai_scheduling: AiScheduling::Immediate,
        }
    }
}

impl EngineConfig {
    /// Sets the player's mark.
    pub fn with_player_mark(mut self, player_mark: Mark) -> Self {
        self.player_mark = player_mark;
        self
    }

    /// Sets the side that opens.
    pub fn with_first_mover(mut self, first_mover: Side) -> Self {
        self.first_mover = first_mover;
        self
    }

    /// Sets the AI scheduling mode.
    pub fn with_ai_scheduling(mut self, ai_scheduling: AiScheduling) -> Self {
        self.ai_scheduling = ai_scheduling;
        self
    }

    /// Mark assignment derived from `player_mark`.
    pub fn marks(&self) -> MarkAssignment {
        MarkAssignment::new(self.player_mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(*config.player_mark(), Mark::X);
        assert_eq!(*config.first_mover(), Side::Player);
        assert_eq!(*config.ai_scheduling(), AiScheduling::Immediate);
        assert_eq!(config.marks().ai(), Mark::O);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "player_mark": "o", "ai_scheduling": "deferred" }"#).unwrap();
        assert_eq!(*config.player_mark(), Mark::O);
        assert_eq!(*config.ai_scheduling(), AiScheduling::Deferred);
        assert_eq!(*config.first_mover(), Side::Player);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_player_mark(Mark::O)
            .with_first_mover(Side::Ai);
        assert_eq!(config.marks().player(), Mark::O);
        assert_eq!(*config.first_mover(), Side::Ai);
    }
}
