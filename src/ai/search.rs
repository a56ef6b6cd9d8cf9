use web_time::{Duration, Instant};

use super::Agent;
use super::corner::CORNERS;
use crate::board::{Board, mask_to_positions};
use crate::types::{Position, Side};

const DEFAULT_TIMEOUT_MILLIS: u64 = 500;
const MIN_SCORE: f32 = f32::NEG_INFINITY;
const MAX_SCORE: f32 = f32::INFINITY;
const CORNER_WEIGHT: f32 = 5.0;
/// Finished games outrank any heuristic score.
const TERMINAL_WEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchResult {
    Complete(Position, f32),
    TimedOut,
}

impl SearchResult {
    fn negate(self) -> Self {
        match self {
            Self::Complete(mv, score) => Self::Complete(mv, -score),
            Self::TimedOut => Self::TimedOut,
        }
    }
}

/// Iterative-deepening negamax with alpha-beta pruning.
pub struct SearchAgent {
    max_depth: u8,
    timeout: Duration,
    start_time: Instant,
    timed_out: bool,
}

impl SearchAgent {
    pub fn new(max_depth: u8) -> Self {
        Self::with_timeout(max_depth, Duration::from_millis(DEFAULT_TIMEOUT_MILLIS))
    }

    pub fn with_timeout(max_depth: u8, timeout: Duration) -> Self {
        Self {
            max_depth: max_depth.max(1),
            timeout,
            start_time: Instant::now(),
            timed_out: false,
        }
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Searches the best move, `None` when `side` has no legal move.
    pub fn search(&mut self, board: &Board, side: Side) -> Option<Position> {
        self.start_time = Instant::now();
        self.timed_out = false;

        let moves = mask_to_positions(board.legal_moves(side));
        let mut best_move = *moves.first()?;
        if moves.len() == 1 {
            return Some(best_move);
        }

        for depth in 1..=self.max_depth {
            match self.negaalpha(board, side, depth, depth, MIN_SCORE, MAX_SCORE) {
                SearchResult::Complete(mv, _score) => best_move = mv,
                SearchResult::TimedOut => break,
            }
        }

        Some(best_move)
    }

    fn negaalpha(
        &mut self,
        board: &Board,
        side: Side,
        depth: u8,
        root_depth: u8,
        alpha: f32,
        beta: f32,
    ) -> SearchResult {
        // Depth 1 always completes so there is a move to return.
        if root_depth > 1 && self.start_time.elapsed() >= self.timeout {
            self.timed_out = true;
            return SearchResult::TimedOut;
        }

        let legal = board.legal_moves(side);
        if legal == 0 {
            if board.legal_moves(side.opponent()) == 0 {
                return SearchResult::Complete(Position::new(0, 0), exact_score(board, side));
            }
            return self
                .negaalpha(board, side.opponent(), depth, root_depth, -beta, -alpha)
                .negate();
        }

        if depth == 0 {
            return SearchResult::Complete(Position::new(0, 0), evaluate(board, side));
        }

        let moves = sorted_moves(legal, board, side);
        let mut best_move = moves[0];
        let mut best_score = MIN_SCORE;
        let mut alpha = alpha;

        for mv in moves {
            let mut next = *board;
            let _ = next.place(side, mv);
            let result =
                self.negaalpha(&next, side.opponent(), depth - 1, root_depth, -beta, -alpha);

            match result {
                SearchResult::TimedOut => return SearchResult::TimedOut,
                SearchResult::Complete(_, score) => {
                    let score = -score;
                    if is_better_move(score, mv, best_score, best_move) {
                        best_score = score;
                        best_move = mv;
                    }
                    if score > alpha {
                        alpha = score;
                    }
                    if alpha >= beta {
                        break;
                    }
                }
            }
        }

        SearchResult::Complete(best_move, best_score)
    }
}

impl Agent for SearchAgent {
    fn label(&self) -> &str {
        "Search"
    }

    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        self.search(board, side)
    }
}

/// Stone difference plus a bonus per held corner, from `side`'s point of view.
fn evaluate(board: &Board, side: Side) -> f32 {
    let counts = board.count();
    let discs = counts.of(side) as f32 - counts.of(side.opponent()) as f32;
    let corners: f32 = CORNERS
        .iter()
        .map(|&c| {
            let cell = board.cell(c);
            if cell.is_side(side) {
                1.0
            } else if cell.is_side(side.opponent()) {
                -1.0
            } else {
                0.0
            }
        })
        .sum();
    discs + CORNER_WEIGHT * corners
}

fn exact_score(board: &Board, side: Side) -> f32 {
    let counts = board.count();
    (counts.of(side) as f32 - counts.of(side.opponent()) as f32) * TERMINAL_WEIGHT
}

fn is_better_move(score: f32, mv: Position, best_score: f32, best_move: Position) -> bool {
    score > best_score || (score == best_score && mv.index() < best_move.index())
}

fn sorted_moves(legal: u64, board: &Board, side: Side) -> Vec<Position> {
    let mut scored_moves: Vec<(Position, f32)> = mask_to_positions(legal)
        .into_iter()
        .map(|mv| {
            let mut next = *board;
            let _ = next.place(side, mv);
            (mv, evaluate(&next, side))
        })
        .collect();

    scored_moves.sort_by(|(left_mv, left_score), (right_mv, right_score)| {
        right_score
            .total_cmp(left_score)
            .then_with(|| left_mv.index().cmp(&right_mv.index()))
    });

    scored_moves.into_iter().map(|(mv, _)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn search_returns_single_legal_move_immediately() {
        let board: Board = "
            ......
            ......
            ..O...
            ...X..
            ......
            ......
        "
        .parse()
        .unwrap();
        let mut agent = SearchAgent::new(6);

        assert_eq!(agent.search(&board, Side::Black), Some(pos(1, 1)));
        assert!(!agent.timed_out());
    }

    #[test]
    fn search_returns_none_without_legal_moves() {
        let board = Board::from_bitboards(0xF_FFFF_FFFF, 0);
        let mut agent = SearchAgent::new(3);

        assert_eq!(agent.search(&board, Side::White), None);
    }

    #[test]
    fn search_tie_breaks_to_smallest_index_when_scores_equal() {
        // Opening moves are symmetric, so every depth-1 score is equal.
        let mut agent = SearchAgent::new(1);
        assert_eq!(agent.search(&Board::new(), Side::Black), Some(pos(3, 1)));
    }

    #[test]
    fn search_takes_a_winning_corner() {
        let board: Board = "
            ......
            .O....
            ..XO..
            ..OX..
            ......
            ......
        "
        .parse()
        .unwrap();
        let mut agent = SearchAgent::new(2);

        assert_eq!(agent.search(&board, Side::Black), Some(pos(0, 0)));
    }

    #[test]
    fn search_depth_one_completes_before_timeout_cutoff() {
        let mut agent = SearchAgent::with_timeout(6, Duration::from_nanos(1));
        let board = Board::new();

        let mv = agent.search(&board, Side::Black).unwrap();

        assert!(board.is_legal(Side::Black, mv));
        assert!(agent.timed_out());
    }

    #[test]
    fn evaluate_is_antisymmetric() {
        let board: Board = "
            X....O
            ......
            ..XO..
            ..XX..
            ......
            O.....
        "
        .parse()
        .unwrap();

        assert_eq!(evaluate(&board, Side::Black), -evaluate(&board, Side::White));
        // 4 vs 3 stones, one corner vs two.
        assert_eq!(evaluate(&board, Side::Black), 1.0 - CORNER_WEIGHT);
    }
}
