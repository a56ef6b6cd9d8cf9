use tracing::{debug, instrument};
use web_time::{Duration, Instant};

use crate::ai::Agent;
use crate::board::Board;
use crate::error::MoveError;
use crate::observer::{GameEvent, GameObserver};
use crate::replay::{self, Replay};
use crate::types::{GameState, Outcome, Position, Side};

const HUMAN_LABEL: &str = "human";

/// Who decides the moves for one side.
pub enum Seat {
    /// Moves arrive one at a time through [`Match::handle_human_move`].
    Human,
    Ai(Box<dyn Agent>),
}

impl Seat {
    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }

    fn label(&self) -> &str {
        match self {
            Seat::Human => HUMAN_LABEL,
            Seat::Ai(agent) => agent.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ToMove(Side),
    /// Terminal: normal game end or forfeit.
    Over(Outcome),
}

/// Result of one half-turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved { side: Side, at: Position, replay: Replay },
    Skipped(Side),
    Finished(Outcome),
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub outcome: Outcome,
    pub board: Board,
    pub moves: u32,
    pub black_time: Duration,
    pub white_time: Duration,
}

/// Frames produced by one human input and every forced turn after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanTurn {
    pub frames: Vec<Board>,
    /// Set when the game ended before control returned to a human.
    pub outcome: Option<Outcome>,
}

/// Turn orchestrator owning the authoritative board.
pub struct Match {
    board: Board,
    phase: Phase,
    black: Seat,
    white: Seat,
    black_time: Duration,
    white_time: Duration,
    moves: u32,
}

impl Match {
    /// AI against AI from the seeded board, black first.
    pub fn new(black: Box<dyn Agent>, white: Box<dyn Agent>) -> Self {
        Self::with_seats(Seat::Ai(black), Seat::Ai(white))
    }

    /// Human black against an AI white.
    pub fn interactive(white: Box<dyn Agent>) -> Self {
        Self::with_seats(Seat::Human, Seat::Ai(white))
    }

    pub fn with_seats(black: Seat, white: Seat) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::ToMove(Side::Black),
            black,
            white,
            black_time: Duration::ZERO,
            white_time: Duration::ZERO,
            moves: 0,
        }
    }

    /// Starts from an arbitrary position instead of the seed.
    pub fn with_board(mut self, board: Board, to_move: Side) -> Self {
        self.board = board;
        self.phase = Phase::ToMove(to_move);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn to_move(&self) -> Option<Side> {
        match self.phase {
            Phase::ToMove(side) => Some(side),
            Phase::Over(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::ToMove(_) => None,
            Phase::Over(outcome) => Some(outcome),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Cumulative time `side`'s agent spent choosing moves.
    pub fn decision_time(&self, side: Side) -> Duration {
        match side {
            Side::Black => self.black_time,
            Side::White => self.white_time,
        }
    }

    pub fn label(&self, side: Side) -> &str {
        self.seat(side).label()
    }

    pub fn to_game_state(&self) -> GameState {
        let counts = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            to_move: self.to_move(),
            black_count: counts.black,
            white_count: counts.white,
            is_game_over: self.is_over(),
            outcome: self.outcome(),
        }
    }

    /// Runs one half-turn for the side to move.
    ///
    /// A side without a legal move is skipped; when neither side can move the
    /// game is tallied. An AI choice that fails the legality check forfeits.
    pub fn step(&mut self, observer: &mut dyn GameObserver) -> Result<TurnOutcome, MoveError> {
        let side = match self.phase {
            Phase::ToMove(side) => side,
            Phase::Over(_) => return Err(MoveError::GameOver),
        };

        if !self.board.has_any_legal_move(side) {
            if !self.board.has_any_legal_move(side.opponent()) {
                let outcome = Outcome::from_counts(self.board.count());
                return Ok(TurnOutcome::Finished(self.finish(outcome, observer)));
            }
            debug!(%side, "no legal move");
            observer.on_event(&GameEvent::Skipped {
                side,
                label: self.label(side).to_string(),
            });
            self.phase = Phase::ToMove(side.opponent());
            return Ok(TurnOutcome::Skipped(side));
        }

        // Agents only ever see a copy of the live board.
        let view = self.board;
        let started = Instant::now();
        let choice = match self.seat_mut(side) {
            Seat::Human => return Err(MoveError::AwaitingHuman { side }),
            Seat::Ai(agent) => agent.select_move(&view, side),
        };
        *self.clock_mut(side) += started.elapsed();

        match choice {
            Some(at) if self.board.is_legal(side, at) => {
                let replay = self.play_move(side, at, observer);
                Ok(TurnOutcome::Moved { side, at, replay })
            }
            attempted => {
                debug!(%side, ?attempted, "agent chose an illegal move");
                observer.on_event(&GameEvent::Forfeit {
                    side,
                    label: self.label(side).to_string(),
                    attempted,
                });
                let outcome = Outcome::Forfeit {
                    loser: side,
                    attempted,
                    counts: self.board.count(),
                };
                Ok(TurnOutcome::Finished(self.finish(outcome, observer)))
            }
        }
    }

    /// Alternates turns until the game ends.
    #[instrument(skip(self, observer))]
    pub fn play(&mut self, observer: &mut dyn GameObserver) -> Result<MatchReport, MoveError> {
        loop {
            if let TurnOutcome::Finished(outcome) = self.step(observer)? {
                return Ok(self.report(outcome));
            }
        }
    }

    /// Applies one human move, then drives every AI turn and forced skip
    /// until a human seat can move again or the game ends.
    ///
    /// Rejected input leaves the board and the turn untouched.
    #[instrument(skip(self, observer))]
    pub fn handle_human_move(
        &mut self,
        x: i32,
        y: i32,
        observer: &mut dyn GameObserver,
    ) -> Result<HumanTurn, MoveError> {
        let side = match self.phase {
            Phase::ToMove(side) => side,
            Phase::Over(_) => return Err(MoveError::GameOver),
        };
        if !self.seat(side).is_human() {
            return Err(MoveError::NotHumanTurn { side });
        }
        let at = Position::checked(x, y).ok_or(MoveError::OutOfBounds { x, y })?;
        if !self.board.is_legal(side, at) {
            return Err(MoveError::Illegal {
                side,
                x: at.x,
                y: at.y,
            });
        }

        let mut frames = self.play_move(side, at, observer).into_frames();
        let rest = self.advance(observer)?;
        frames.extend(rest.frames);

        Ok(HumanTurn {
            frames,
            outcome: rest.outcome,
        })
    }

    /// Drives AI turns and skips until a human seat holds a legal move or
    /// the game ends.
    pub fn advance(&mut self, observer: &mut dyn GameObserver) -> Result<HumanTurn, MoveError> {
        let mut frames = Vec::new();

        loop {
            let side = match self.phase {
                Phase::Over(outcome) => {
                    return Ok(HumanTurn {
                        frames,
                        outcome: Some(outcome),
                    });
                }
                Phase::ToMove(side) => side,
            };
            if self.seat(side).is_human() && self.board.has_any_legal_move(side) {
                return Ok(HumanTurn {
                    frames,
                    outcome: None,
                });
            }

            if let TurnOutcome::Moved { replay, .. } = self.step(observer)? {
                frames.extend(replay.into_frames());
            }
        }
    }

    pub fn report(&self, outcome: Outcome) -> MatchReport {
        MatchReport {
            outcome,
            board: self.board,
            moves: self.moves,
            black_time: self.black_time,
            white_time: self.white_time,
        }
    }

    fn play_move(&mut self, side: Side, at: Position, observer: &mut dyn GameObserver) -> Replay {
        let replay = replay::apply(&mut self.board, side, at);
        debug_assert!(replay.is_applied());
        self.moves += 1;

        observer.on_event(&GameEvent::Moved {
            side,
            label: self.label(side).to_string(),
            at,
            flipped: replay.flipped().len(),
            counts: self.board.count(),
        });
        self.phase = Phase::ToMove(side.opponent());
        replay
    }

    fn finish(&mut self, outcome: Outcome, observer: &mut dyn GameObserver) -> Outcome {
        self.phase = Phase::Over(outcome);
        observer.on_event(&GameEvent::Finished {
            outcome,
            black_time: self.black_time,
            white_time: self.white_time,
        });
        outcome
    }

    fn seat(&self, side: Side) -> &Seat {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    fn seat_mut(&mut self, side: Side) -> &mut Seat {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    fn clock_mut(&mut self, side: Side) -> &mut Duration {
        match side {
            Side::Black => &mut self.black_time,
            Side::White => &mut self.white_time,
        }
    }
}
