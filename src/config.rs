use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::AgentKind;
use crate::error::ConfigError;
use crate::game::Match;

pub const MAX_SEARCH_DEPTH: u8 = 8;

/// Settings for a batch of AI-vs-AI games, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub black: AgentKind,
    pub white: AgentKind,
    /// Seeds the random agents; unseeded agents draw from the OS.
    pub seed: Option<u64>,
    pub search_depth: u8,
    pub games: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            black: AgentKind::default(),
            white: AgentKind::default(),
            seed: None,
            search_depth: 4,
            games: 1,
        }
    }
}

impl MatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MatchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(ConfigError::Validation(format!(
                "search_depth must be in 1..={MAX_SEARCH_DEPTH}"
            )));
        }
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be > 0".into()));
        }
        Ok(())
    }

    /// Builds game number `game`; seeded runs give each side its own stream.
    pub fn build_match(&self, game: u32) -> Match {
        let seed_for = |offset: u64| {
            self.seed
                .map(|seed| seed.wrapping_add(2 * game as u64 + offset))
        };
        Match::new(
            self.black.build(seed_for(0), self.search_depth),
            self.white.build(seed_for(1), self.search_depth),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_pit_corner_seekers_against_each_other() {
        let config = MatchConfig::default();
        assert_eq!(config.black, AgentKind::CornerSeeking);
        assert_eq!(config.white, AgentKind::CornerSeeking);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: MatchConfig = toml::from_str(
            r#"
            black = "random"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.black, AgentKind::Random);
        assert_eq!(config.white, AgentKind::CornerSeeking);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.search_depth, 4);
    }

    #[test]
    fn load_reads_and_validates_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "white = \"search\"\nsearch_depth = 0").unwrap();

        let err = MatchConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_or_default_tolerates_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = MatchConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn unknown_agent_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "black = \"panda\"").unwrap();

        let err = MatchConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn seeded_configs_replay_identically() {
        let config = MatchConfig {
            black: AgentKind::Random,
            white: AgentKind::Random,
            seed: Some(11),
            ..MatchConfig::default()
        };

        let first = config.build_match(3).play(&mut ()).unwrap();
        let second = config.build_match(3).play(&mut ()).unwrap();

        assert_eq!(first.board, second.board);
        assert_eq!(first.moves, second.moves);
    }
}
