use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod observer;
pub mod replay;
pub mod types;

pub use ai::{Agent, AgentKind};
pub use board::Board;
pub use error::MoveError;
pub use game::{HumanTurn, Match, MatchReport, Phase, Seat, TurnOutcome};
pub use observer::{EventLog, GameEvent, GameObserver, TracingObserver};
pub use replay::{Replay, apply};
pub use types::{Cell, GameState, Outcome, Position, Side, StoneCount};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Payload returned to the page after each click.
#[derive(Debug, Serialize)]
struct ClickResponse {
    /// Snapshots to animate, each as 36 cells (0=empty, 1=black, 2=white).
    frames: Vec<Vec<u8>>,
    events: Vec<GameEvent>,
    state: GameState,
}

/// Human-vs-AI game driven by canvas clicks. The page translates pixels to
/// board coordinates before calling in.
#[wasm_bindgen]
pub struct WasmGame {
    game: Match,
}

#[wasm_bindgen]
impl WasmGame {
    /// `white_agent` is one of `random`, `corner_seeking`, `search`.
    #[wasm_bindgen(constructor)]
    pub fn new(white_agent: &str, seed: Option<u64>) -> Result<WasmGame, JsError> {
        let kind: AgentKind = white_agent.parse()?;
        let depth = config::MatchConfig::default().search_depth;
        Ok(Self {
            game: Match::interactive(kind.build(seed, depth)),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_state())?)
    }

    /// Legal squares for the human as `[{x, y}, ...]`.
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves = match self.game.to_move() {
            Some(side) => self.game.board().legal_positions(side),
            None => Vec::new(),
        };
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    pub fn click(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let mut log = EventLog::new();
        let turn = self.game.handle_human_move(x, y, &mut log)?;
        let response = ClickResponse {
            frames: turn
                .frames
                .iter()
                .map(|frame| frame.to_array().to_vec())
                .collect(),
            events: log.into_events(),
            state: self.game.to_game_state(),
        };
        Ok(serde_wasm_bindgen::to_value(&response)?)
    }
}
