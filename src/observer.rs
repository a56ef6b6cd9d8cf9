//! Structured game events and their consumers.
//!
//! The orchestrator never formats text. It reports [`GameEvent`]s to a
//! [`GameObserver`]; [`TracingObserver`] turns them into the transcript.

use serde::Serialize;
use tracing::{info, warn};
use web_time::Duration;

use crate::types::{Outcome, Position, Side, StoneCount};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Moved {
        side: Side,
        label: String,
        at: Position,
        flipped: usize,
        counts: StoneCount,
    },
    Skipped {
        side: Side,
        label: String,
    },
    Forfeit {
        side: Side,
        label: String,
        attempted: Option<Position>,
    },
    Finished {
        outcome: Outcome,
        black_time: Duration,
        white_time: Duration,
    },
}

pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Discards every event.
impl GameObserver for () {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Writes the human-readable transcript through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Moved {
                side,
                label,
                at,
                flipped,
                counts,
            } => info!(
                %side,
                agent = %label,
                x = at.x,
                y = at.y,
                flipped,
                black = counts.black,
                white = counts.white,
                "placed a stone"
            ),
            GameEvent::Skipped { side, label } => {
                info!(%side, agent = %label, "no legal move, skipping")
            }
            GameEvent::Forfeit {
                side,
                label,
                attempted,
            } => warn!(
                %side,
                agent = %label,
                attempted = ?attempted,
                "illegal move, forfeit"
            ),
            GameEvent::Finished {
                outcome,
                black_time,
                white_time,
            } => {
                let counts = outcome.counts();
                let verdict = match outcome {
                    Outcome::Win { winner, .. } => format!("{winner} wins"),
                    Outcome::Draw { .. } => "draw".to_string(),
                    Outcome::Forfeit { loser, .. } => format!("{loser} forfeits"),
                };
                info!(
                    black = counts.black,
                    white = counts.white,
                    black_secs = black_time.as_secs_f64(),
                    white_secs = white_time.as_secs_f64(),
                    "game over: {verdict}"
                );
            }
        }
    }
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }

    pub fn moves(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Moved { .. }))
            .count()
    }

    pub fn skips(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Skipped { .. }))
            .count()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
