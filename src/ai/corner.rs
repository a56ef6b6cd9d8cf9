use super::Agent;
use crate::board::{Board, DIRECTIONS};
use crate::types::{Position, Side};

pub const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 5),
    Position::new(5, 0),
    Position::new(5, 5),
];

/// Squares next to a corner that tend to hand it to the opponent.
pub const DANGER: [Position; 12] = [
    Position::new(0, 1),
    Position::new(1, 0),
    Position::new(1, 1),
    Position::new(0, 4),
    Position::new(1, 4),
    Position::new(1, 5),
    Position::new(4, 0),
    Position::new(4, 1),
    Position::new(5, 1),
    Position::new(4, 4),
    Position::new(4, 5),
    Position::new(5, 4),
];

const DANGER_SCORE: i32 = -10;

/// Takes a corner whenever one is legal, otherwise the move with the most
/// friendly neighbours, steering clear of [`DANGER`] squares.
#[derive(Debug, Default, Clone, Copy)]
pub struct CornerSeekingAgent;

impl CornerSeekingAgent {
    /// Danger squares score -10, anything else the number of adjacent own stones.
    pub fn score(board: &Board, side: Side, pos: Position) -> i32 {
        if DANGER.contains(&pos) {
            return DANGER_SCORE;
        }
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&n| board.cell(n).is_side(side))
            .count() as i32
    }
}

impl Agent for CornerSeekingAgent {
    fn label(&self) -> &str {
        "🐣"
    }

    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        let legal = board.legal_positions(side);

        if let Some(&corner) = legal.iter().find(|mv| CORNERS.contains(mv)) {
            return Some(corner);
        }

        // First occurrence wins ties.
        let mut best: Option<(Position, i32)> = None;
        for mv in legal {
            let score = Self::score(board, side, mv);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn board(rows: &str) -> Board {
        rows.parse().unwrap()
    }

    #[test]
    fn takes_a_legal_corner_over_higher_scoring_moves() {
        // (0,0) is legal for black via the diagonal.
        let board = board(
            "
            ......
            .O....
            ..XO..
            ..OX..
            ......
            ......
            ",
        );
        assert!(board.is_legal(Side::Black, pos(0, 0)));

        let mut agent = CornerSeekingAgent;
        assert_eq!(agent.select_move(&board, Side::Black), Some(pos(0, 0)));
    }

    #[test]
    fn first_corner_in_scan_order_wins() {
        let board = board(
            "
            ...XO.
            ......
            ......
            X.....
            O.....
            ......
            ",
        );
        assert_eq!(
            board.legal_positions(Side::Black),
            vec![pos(5, 0), pos(0, 5)]
        );

        let mut agent = CornerSeekingAgent;
        assert_eq!(agent.select_move(&board, Side::Black), Some(pos(5, 0)));
    }

    #[test]
    fn danger_squares_score_minus_ten() {
        let board = Board::new();
        for sq in DANGER {
            assert_eq!(CornerSeekingAgent::score(&board, Side::Black, sq), -10);
        }
    }

    #[test]
    fn score_counts_in_bounds_own_neighbours() {
        let board = Board::new();
        // (3,1) touches (2,2) black; (3,2) white does not count.
        assert_eq!(CornerSeekingAgent::score(&board, Side::Black, pos(3, 1)), 1);
        // (4,2) touches (3,3) black diagonally.
        assert_eq!(CornerSeekingAgent::score(&board, Side::Black, pos(4, 2)), 1);
        // Edge square with no own neighbours.
        assert_eq!(CornerSeekingAgent::score(&board, Side::Black, pos(0, 2)), 0);
    }

    #[test]
    fn ties_resolve_to_first_legal_move() {
        // Opening: every legal move for black scores 1, so the first in row-major order wins.
        let mut agent = CornerSeekingAgent;
        assert_eq!(agent.select_move(&Board::new(), Side::Black), Some(pos(3, 1)));
        assert_eq!(agent.select_move(&Board::new(), Side::White), Some(pos(2, 1)));
    }

    #[test]
    fn avoids_danger_when_a_safe_move_exists() {
        // (1,1) and (4,1) are danger squares, (2,1) and (3,1) are not.
        let board = board(
            "
            ......
            ......
            ..OO..
            ..XX..
            ......
            ......
            ",
        );
        let legal = board.legal_positions(Side::Black);
        assert!(legal.iter().any(|mv| DANGER.contains(mv)));

        let mut agent = CornerSeekingAgent;
        let mv = agent.select_move(&board, Side::Black).unwrap();
        assert!(!DANGER.contains(&mv));
    }

    #[test]
    fn plays_a_danger_square_when_forced() {
        let board = board(
            "
            ......
            ......
            ..O...
            ...X..
            ......
            ......
            ",
        );
        assert_eq!(board.legal_positions(Side::Black), vec![pos(1, 1)]);

        let mut agent = CornerSeekingAgent;
        assert_eq!(agent.select_move(&board, Side::Black), Some(pos(1, 1)));
    }
}
