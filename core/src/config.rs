// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game configuration and its validation

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the final score is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// Territory plus prisoners (Japanese style)
    #[default]
    Territory,
    /// Territory plus live stones on the board (Chinese style)
    Area,
}

impl FromStr for ScoringMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "territory" => Ok(ScoringMethod::Territory),
            "area" => Ok(ScoringMethod::Area),
            other => Err(ConfigError::UnknownScoring(other.to_string())),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMethod::Territory => f.write_str("territory"),
            ScoringMethod::Area => f.write_str("area"),
        }
    }
}

/// Which repetitions are forbidden.
///
/// Only the simple ko rule exists: a single stone may not be retaken on the
/// very next move. Superko variants are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KoRule {
    #[default]
    Simple,
}

impl FromStr for KoRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(KoRule::Simple),
            other => Err(ConfigError::UnsupportedKoRule(other.to_string())),
        }
    }
}

/// Options fixed for the lifetime of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GameConfig {
    pub board_size: u8,
    /// Added to White's score
    pub komi: f32,
    pub handicap_stones: u8,
    /// Let Black place the handicap stones anywhere instead of on star points
    pub free_handicap_placement: bool,
    pub scoring: ScoringMethod,
    pub ko_rule: KoRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 19,
            komi: 0.0,
            handicap_stones: 0,
            free_handicap_placement: false,
            scoring: ScoringMethod::Territory,
            ko_rule: KoRule::Simple,
        }
    }
}

impl GameConfig {
    /// Default configuration for the given board size
    pub fn with_size(board_size: u8) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let config = GameConfig {
            board_size: raw.board_size,
            komi: raw.komi,
            handicap_stones: raw.handicap_stones,
            free_handicap_placement: raw.free_handicap_placement,
            scoring: raw.scoring.parse()?,
            ko_rule: raw.ko_rule.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > 19 {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }

        if self.handicap_stones == 1 || self.handicap_stones > 9 {
            return Err(ConfigError::UnsupportedHandicap(format!(
                "only 2 to 9 handicap stones are supported, got {}",
                self.handicap_stones
            )));
        }

        if self.handicap_stones > 0 && ![9, 13, 19].contains(&self.board_size) {
            return Err(ConfigError::UnsupportedHandicap(format!(
                "handicap stones are not supported on {}x{}",
                self.board_size, self.board_size
            )));
        }

        Ok(())
    }
}

/// Wire shape of a configuration, with the modes still as names
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawConfig {
    board_size: u8,
    komi: f32,
    handicap_stones: u8,
    free_handicap_placement: bool,
    scoring: String,
    ko_rule: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = GameConfig::default();
        Self {
            board_size: defaults.board_size,
            komi: defaults.komi,
            handicap_stones: defaults.handicap_stones,
            free_handicap_placement: defaults.free_handicap_placement,
            scoring: defaults.scoring.to_string(),
            ko_rule: "simple".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.board_size, 19);
    }

    #[test]
    fn test_full_config() {
        let config = GameConfig::from_json(
            r#"{"boardSize": 9, "komi": 6.5, "handicapStones": 2, "scoring": "area", "koRule": "simple"}"#,
        )
        .unwrap();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.scoring, ScoringMethod::Area);
        assert_eq!(config.handicap_stones, 2);
    }

    #[test]
    fn test_rejects_unknown_option() {
        let err = GameConfig::from_json(r#"{"renderer": "svg"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_unknown_modes() {
        assert!(matches!(
            GameConfig::from_json(r#"{"scoring": "equivalence"}"#),
            Err(ConfigError::UnknownScoring(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"koRule": "positional-superko"}"#),
            Err(ConfigError::UnsupportedKoRule(_))
        ));
        assert!(matches!(
            "superko".parse::<KoRule>(),
            Err(ConfigError::UnsupportedKoRule(_))
        ));
        assert_eq!("Area".parse::<ScoringMethod>().unwrap(), ScoringMethod::Area);
    }

    #[test]
    fn test_rejects_bad_sizes_and_handicaps() {
        assert!(matches!(
            GameConfig::with_size(20).validate(),
            Err(ConfigError::InvalidBoardSize(20))
        ));
        assert!(matches!(
            GameConfig::with_size(0).validate(),
            Err(ConfigError::InvalidBoardSize(0))
        ));

        let mut config = GameConfig::with_size(9);
        config.handicap_stones = 1;
        assert!(matches!(config.validate(), Err(ConfigError::UnsupportedHandicap(_))));

        let mut config = GameConfig::with_size(11);
        config.handicap_stones = 2;
        assert!(matches!(config.validate(), Err(ConfigError::UnsupportedHandicap(_))));
    }
}
