use std::path::PathBuf;

use crate::types::Side;

/// Rejected input on the interactive path. The turn is not consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("{side} cannot play at ({x}, {y})")]
    Illegal { side: Side, x: u8, y: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("it is not the human player's turn ({side} is an AI seat)")]
    NotHumanTurn { side: Side },

    #[error("{side} is a human seat and must be driven with handle_human_move")]
    AwaitingHuman { side: Side },
}

/// Errors from parsing a text board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 6 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {width} cells, expected 6")]
    RowWidth { row: usize, width: usize },

    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("unknown agent {0:?} (expected random, corner_seeking or search)")]
    UnknownAgent(String),
}
