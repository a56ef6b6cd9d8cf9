//! Move application with an observable frame-by-frame replay.
//!
//! Every replay opens with [`PRIMING_FRAMES`] copies of the pre-move board.
//! A legal move then adds one frame after the stone is placed and one frame
//! per flipped stone. An illegal move leaves the board untouched and returns
//! only the priming frames, so renderers can consume the result uniformly.

use crate::board::Board;
use crate::types::{Position, Side};

/// Leading copies of the pre-move board in every replay.
pub const PRIMING_FRAMES: usize = 3;

/// Ordered board snapshots produced while applying one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    frames: Vec<Board>,
    flipped: Vec<Position>,
    applied: bool,
}

impl Replay {
    pub fn frames(&self) -> &[Board] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Board> {
        self.frames
    }

    /// Stones flipped by the move, in the order they were turned.
    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }

    /// `false` for the no-op replay of an illegal move.
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The board after the whole move.
    pub fn last(&self) -> Option<&Board> {
        self.frames.last()
    }
}

/// Plays `side` at `pos`, mutating `board` in place.
///
/// Callers must check [`Board::is_legal`] first: an illegal coordinate
/// yields the priming-only replay and no mutation, which is not an error.
pub fn apply(board: &mut Board, side: Side, pos: Position) -> Replay {
    let mut frames = vec![*board; PRIMING_FRAMES];

    let flipped = board.flips(side, pos);
    if flipped.is_empty() {
        return Replay {
            frames,
            flipped,
            applied: false,
        };
    }

    board.put(pos, side);
    frames.push(*board);

    for &stone in &flipped {
        board.put(stone, side);
        frames.push(*board);
    }

    Replay {
        frames,
        flipped,
        applied: true,
    }
}
