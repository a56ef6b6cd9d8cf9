pub mod corner;
pub mod random;
pub mod search;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ConfigError;
use crate::types::{Position, Side};

pub use corner::CornerSeekingAgent;
pub use random::RandomAgent;
pub use search::SearchAgent;

/// A move-selection strategy.
///
/// Callers only invoke `select_move` when `side` has at least one legal move.
/// Returning `None`, or a coordinate that is not legal on `board`, forfeits the game.
pub trait Agent: Send {
    /// Display label used in transcripts.
    fn label(&self) -> &str;

    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position>;
}

/// Registered strategies, selectable from config, CLI and the wasm boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    /// Stands in for the unnamed default opponent.
    #[default]
    CornerSeeking,
    Search,
}

impl AgentKind {
    pub fn build(self, seed: Option<u64>, search_depth: u8) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            }),
            AgentKind::CornerSeeking => Box::new(CornerSeekingAgent),
            AgentKind::Search => Box::new(SearchAgent::new(search_depth)),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::CornerSeeking => "corner_seeking",
            AgentKind::Search => "search",
        };
        f.write_str(name)
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(AgentKind::Random),
            "corner_seeking" | "corner" => Ok(AgentKind::CornerSeeking),
            "search" => Ok(AgentKind::Search),
            _ => Err(ConfigError::UnknownAgent(s.to_string())),
        }
    }
}
