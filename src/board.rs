use std::fmt;
use std::str::FromStr;

use crate::error::ParseBoardError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Side, StoneCount};

const BOARD_MASK: u64 = (1u64 << NUM_SQUARES) - 1;

/// Scan order for sandwich detection and flipping, as `(dx, dy)`.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 6x6 board state represented by two bitboards, bit `y * 6 + x` per square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the seeded board:
    /// (2,2)=black, (3,2)=white, (2,3)=white, (3,3)=black.
    pub fn new() -> Self {
        Self {
            black: bit(Position::new(2, 2).index()) | bit(Position::new(3, 3).index()),
            white: bit(Position::new(3, 2).index()) | bit(Position::new(2, 3).index()),
        }
    }

    /// Builds a board from raw masks. Bits above square 35 are dropped.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "a square cannot hold both colors");
        Self {
            black: black & BOARD_MASK,
            white: white & BOARD_MASK & !black,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        if !pos.in_bounds() {
            return Cell::Empty;
        }
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let occupied = me | opp;
        let mut legal = 0u64;

        for idx in 0..NUM_SQUARES {
            let move_bit = bit(idx);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(Position::from_index(idx), me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Sandwich rule: in bounds, empty, and at least one direction crosses
    /// one or more opponent stones and stops on one of `side`'s stones.
    pub fn is_legal(&self, side: Side, pos: Position) -> bool {
        if !pos.in_bounds() || self.cell(pos) != Cell::Empty {
            return false;
        }
        let (me, opp) = self.split(side);
        DIRECTIONS
            .iter()
            .any(|&dir| line_flips(pos, dir, me, opp) != 0)
    }

    pub fn has_any_legal_move(&self, side: Side) -> bool {
        self.legal_moves(side) != 0
    }

    /// Legal coordinates in row-major order (`y` outer, `x` inner).
    pub fn legal_positions(&self, side: Side) -> Vec<Position> {
        mask_to_positions(self.legal_moves(side))
    }

    /// Stones a move at `pos` would flip, in direction order and outward
    /// from `pos` within each direction. Empty when the move is illegal.
    pub fn flips(&self, side: Side, pos: Position) -> Vec<Position> {
        if !self.is_legal(side, pos) {
            return Vec::new();
        }

        let (me, opp) = self.split(side);
        let mut out = Vec::new();
        for (dx, dy) in DIRECTIONS {
            let line = line_flips(pos, (dx, dy), me, opp);
            let mut next = pos.offset(dx, dy);
            while let Some(p) = next {
                if (line & bit(p.index())) == 0 {
                    break;
                }
                out.push(p);
                next = p.offset(dx, dy);
            }
        }
        out
    }

    /// Places one stone and flips captured stones in one step.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, side: Side, pos: Position) -> u64 {
        if !pos.in_bounds() {
            return 0;
        }
        let (me, opp) = self.split(side);

        let flips = Self::collect_flips(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;
        match side {
            Side::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Side::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Writes `side`'s stone at `pos`, replacing whatever was there.
    pub(crate) fn put(&mut self, pos: Position, side: Side) {
        let square = bit(pos.index());
        match side {
            Side::Black => {
                self.black |= square;
                self.white &= !square;
            }
            Side::White => {
                self.white |= square;
                self.black &= !square;
            }
        }
    }

    pub fn count(&self) -> StoneCount {
        StoneCount {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count().total()
    }

    /// Converts board to `[u8; 36]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(Position::from_index(idx)).as_u8();
        }
        board
    }

    /// Grid view indexed as `rows()[y][x]`.
    pub fn rows(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.cell(Position::new(x as u8, y as u8));
            }
        }
        rows
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Black => (self.black, self.white),
            Side::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: Position, me: u64, opp: u64) -> u64 {
        if !pos.in_bounds() {
            return 0;
        }
        if ((me | opp) & bit(pos.index())) != 0 {
            return 0;
        }

        DIRECTIONS
            .iter()
            .fold(0u64, |flips, &dir| flips | line_flips(pos, dir, me, opp))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// `X` is black, `O` is white, `.` is empty; one line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut black = 0u64;
        let mut white = 0u64;
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowWidth {
                    row: y,
                    width: cells.len(),
                });
            }
            for (x, c) in cells.into_iter().enumerate() {
                let square = bit(Position::new(x as u8, y as u8).index());
                match c {
                    'X' | 'x' => black |= square,
                    'O' | 'o' => white |= square,
                    '.' => {}
                    other => return Err(ParseBoardError::UnknownCell(other)),
                }
            }
        }

        Ok(Self { black, white })
    }
}

/// Mask of opponent stones sandwiched in one direction, or 0.
fn line_flips(pos: Position, (dx, dy): (i32, i32), me: u64, opp: u64) -> u64 {
    let mut line = 0u64;
    let mut next = pos.offset(dx, dy);

    while let Some(p) = next {
        let square = bit(p.index());
        if (opp & square) != 0 {
            line |= square;
        } else if (me & square) != 0 {
            return line;
        } else {
            return 0;
        }
        next = p.offset(dx, dy);
    }

    0
}

pub(crate) fn bit(idx: usize) -> u64 {
    if idx < NUM_SQUARES { 1u64 << idx } else { 0 }
}

pub(crate) fn mask_to_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        out.push(Position::from_index(bits.trailing_zeros() as usize));
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn board(rows: &str) -> Board {
        rows.parse().expect("test board must parse")
    }

    #[test]
    fn seed_pattern_matches_the_fixed_center() {
        let board = Board::new();

        assert_eq!(board.cell(pos(2, 2)), Cell::Black);
        assert_eq!(board.cell(pos(3, 2)), Cell::White);
        assert_eq!(board.cell(pos(2, 3)), Cell::White);
        assert_eq!(board.cell(pos(3, 3)), Cell::Black);
        assert_eq!(board.count(), StoneCount { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 32);
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        assert_eq!(
            board.legal_positions(Side::Black),
            vec![pos(3, 1), pos(4, 2), pos(1, 3), pos(2, 4)]
        );
        assert_eq!(
            board.legal_positions(Side::White),
            vec![pos(2, 1), pos(1, 2), pos(4, 3), pos(3, 4)]
        );
    }

    #[test]
    fn occupied_and_out_of_bounds_squares_are_never_legal() {
        let board = Board::new();

        assert!(!board.is_legal(Side::Black, pos(2, 2)));
        assert!(!board.is_legal(Side::Black, pos(3, 2)));
        assert!(!board.is_legal(Side::Black, pos(6, 0)));
        assert!(!board.is_legal(Side::Black, pos(0, 200)));
    }

    #[test]
    fn run_must_end_on_own_stone_not_edge_or_gap() {
        // White run at the edge with nothing behind it.
        let edge = board(
            "
            OO....
            ......
            ......
            ......
            ......
            ......
            ",
        );
        assert!(!edge.is_legal(Side::Black, pos(2, 0)));
        assert!(!edge.is_legal(Side::White, pos(2, 0)));

        // Gap after the opponent run.
        let gap = board(
            "
            .O.X..
            ......
            ......
            ......
            ......
            ......
            ",
        );
        assert!(!gap.is_legal(Side::Black, pos(0, 0)));

        // Adjacent own stone with no opponent crossed.
        let adjacent = board(
            "
            .X....
            ......
            ......
            ......
            ......
            ......
            ",
        );
        assert!(!adjacent.is_legal(Side::Black, pos(0, 0)));
    }

    #[test]
    fn has_any_legal_move_is_false_on_a_one_color_board() {
        let only_black = board(
            "
            XXXXXX
            XXXXXX
            XXX.XX
            XXXXXX
            XXXXXX
            XXXXXX
            ",
        );
        assert!(!only_black.has_any_legal_move(Side::Black));
        assert!(!only_black.has_any_legal_move(Side::White));
    }

    #[test]
    fn flips_follow_direction_order_then_outward() {
        let board = board(
            "
            .OOX..
            OO....
            O.O...
            X..X..
            ......
            ......
            ",
        );

        let flips = board.flips(Side::Black, pos(0, 0));

        // Directions (dx,dy): (0,1) south first, then (1,0) east, then (1,1) diagonal.
        assert_eq!(
            flips,
            vec![
                pos(0, 1),
                pos(0, 2),
                pos(1, 0),
                pos(2, 0),
                pos(1, 1),
                pos(2, 2),
            ]
        );
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(Side::Black, pos(3, 1));

        assert_eq!(flips, bit(pos(3, 2).index()));
        assert_eq!(board.count(), StoneCount { black: 4, white: 1 });
        assert_eq!(board.cell(pos(3, 1)), Cell::Black);
        assert_eq!(board.cell(pos(3, 2)), Cell::Black);
        assert_eq!(board.cell(pos(2, 3)), Cell::White);
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(Side::Black, pos(0, 0));

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn display_and_parse_agree() {
        let board = Board::new();
        let text = board.to_string();

        assert_eq!(text, "......\n......\n..XO..\n..OX..\n......\n......");
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn parse_rejects_malformed_rows() {
        assert_eq!(
            "......".parse::<Board>().unwrap_err(),
            ParseBoardError::RowCount(1)
        );
        let err = "......\n......\n.....\n......\n......\n......"
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(err, ParseBoardError::RowWidth { row: 2, width: 5 });
        let err = "......\n......\n..?...\n......\n......\n......"
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(err, ParseBoardError::UnknownCell('?'));
    }
}
