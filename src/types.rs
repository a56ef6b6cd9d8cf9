use std::fmt;

use serde::Serialize;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 6;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two competing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

/// State of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire value used by the rendering boundary: 0=empty, 1=black, 2=white.
    pub fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn is_side(self, side: Side) -> bool {
        self == side.to_cell()
    }
}

/// A board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns `None` when the coordinate falls outside the board.
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        if in_bounds(x, y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Row-major square index. Only meaningful for in-bounds positions.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new((idx % BOARD_SIZE) as u8, (idx / BOARD_SIZE) as u8)
    }

    /// Steps one square in direction `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Self::checked(self.x as i32 + dx, self.y as i32 + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub(crate) fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

/// Stones on the board per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoneCount {
    pub black: u8,
    pub white: u8,
}

impl StoneCount {
    pub fn total(self) -> u8 {
        self.black + self.white
    }

    pub fn of(self, side: Side) -> u8 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outcome {
    Win { winner: Side, counts: StoneCount },
    Draw { counts: StoneCount },
    /// An agent proposed an illegal coordinate (or none at all) and lost on the spot.
    Forfeit {
        loser: Side,
        attempted: Option<Position>,
        counts: StoneCount,
    },
}

impl Outcome {
    /// Tallies a finished board: strictly more stones wins, equal counts draw.
    pub fn from_counts(counts: StoneCount) -> Self {
        if counts.black > counts.white {
            Outcome::Win {
                winner: Side::Black,
                counts,
            }
        } else if counts.white > counts.black {
            Outcome::Win {
                winner: Side::White,
                counts,
            }
        } else {
            Outcome::Draw { counts }
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            Outcome::Draw { .. } => None,
            Outcome::Forfeit { loser, .. } => Some(loser.opponent()),
        }
    }

    pub fn counts(&self) -> StoneCount {
        match self {
            Outcome::Win { counts, .. }
            | Outcome::Draw { counts }
            | Outcome::Forfeit { counts, .. } => *counts,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// `None` once the game is over.
    pub to_move: Option<Side>,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub outcome: Option<Outcome>,
}
