use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Agent;
use crate::board::Board;
use crate::types::{BOARD_SIZE, Position, Side};

/// Samples uniform coordinates until one is legal.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sampling for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn label(&self) -> &str {
        "Random"
    }

    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        // Rejection sampling would never terminate without a legal square.
        if !board.has_any_legal_move(side) {
            return None;
        }

        loop {
            let x = self.rng.random_range(0..BOARD_SIZE as u8);
            let y = self.rng.random_range(0..BOARD_SIZE as u8);
            let pos = Position::new(x, y);
            if board.is_legal(side, pos) {
                return Some(pos);
            }
        }
    }
}
