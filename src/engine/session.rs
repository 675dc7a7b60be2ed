use std::collections::VecDeque;

use rand::RngCore;

use super::animation::Animation;
use super::board::Board;
use super::cell::{Card, Idx};
use super::error::{EngineError, Result};
use super::merge::Score;
use super::movement::{move_board, Direction, Movement};
use super::util::{is_game_over, is_game_won, random_empty_cell};
use crate::config::{Config, Rect};

const SEED_VALUE: Card = 2;

/// Oldest rounds are forgotten past this many accepted moves.
const HISTORY_LIMIT: usize = 2000;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Status {
    #[default]
    Running,
    Won,
    Lost,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{}", s)
    }
}

/// Input is what the host hands the session on a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Input {
    Direction(Direction),
    Undo,
    /// Any other key. Only meaningful once the game has ended.
    AnyKey,
}

/// The board state before an accepted move.
#[derive(Clone, Debug, PartialEq)]
struct Round {
    values: Vec<Vec<Card>>,
}

/// TileView is what a renderer needs to draw one cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TileView {
    pub(crate) idx: Idx,
    pub(crate) value: Card,
    pub(crate) occupied: bool,
    pub(crate) rect: Rect,
    /// Set while a spawn animation is bound to the cell.
    pub(crate) progress: Option<f32>,
}

/// Frame is a read-only picture of the session for one tick.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Frame {
    pub(crate) size: usize,
    pub(crate) score: Score,
    pub(crate) status: Status,
    pub(crate) extent: u32,
    pub(crate) tiles: Vec<TileView>,
}

/// Session owns the board of one game along with its score, status and the history of accepted
/// moves.
pub(crate) struct Session {
    config: Config,
    rng: Box<dyn RngCore>,
    board: Board,
    score: Score,
    status: Status,
    history: VecDeque<Round>,
}

impl Session {
    /// Start a session with a single seeded tile using the given random number generator.
    pub(crate) fn new(config: Config, rng: impl RngCore + 'static) -> Self {
        let board = Board::new(config.size());
        let mut s = Self {
            config,
            rng: Box::new(rng),
            board,
            score: 0,
            status: Status::Running,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        };
        s.seed();
        s
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn has_running_animation(&self) -> bool {
        self.board.iter().any(|c| c.animation().is_some())
    }

    /// Advance the session by one tick: check for a finished game, apply the input if the board
    /// accepts it, then step animations. Fails only when an animation contract is broken.
    pub(crate) fn tick(&mut self, input: Option<Input>) -> Result<()> {
        match self.status {
            Status::Running => {
                if is_game_won(&self.board, self.config.target()) {
                    self.set_status(Status::Won);
                } else if is_game_over(&self.board) {
                    self.set_status(Status::Lost);
                } else if !self.has_running_animation() {
                    match input {
                        Some(Input::Direction(d)) => {
                            if self.shift(d).is_none() {
                                log::debug!("move {} changed nothing", d);
                            }
                        }
                        Some(Input::Undo) => {
                            if !self.undo() {
                                log::debug!("nothing to undo");
                            }
                        }
                        Some(Input::AnyKey) | None => (),
                    }
                }
            }
            Status::Won | Status::Lost => {
                if input.is_some() {
                    self.restart();
                }
            }
        }
        self.advance_animations()
    }

    /// Move the board in `direction`. A move that changes nothing is not a turn: no score, no
    /// spawn, no history entry.
    pub(crate) fn shift(&mut self, direction: Direction) -> Option<Movement> {
        let before = Round {
            values: self.board.values(),
        };
        let movement = move_board(&mut self.board, &direction);
        if !movement.changed() {
            return None;
        }
        self.remember(before);
        self.score += movement.score;
        self.spawn();
        Some(movement)
    }

    /// Restore the board from before the last accepted move. Points already scored are kept.
    pub(crate) fn undo(&mut self) -> bool {
        if self.status != Status::Running || self.has_running_animation() {
            return false;
        }
        match self.history.pop_back() {
            Some(round) => {
                self.board.restore(&round.values);
                log::info!("undo, {} rounds left, score {}", self.history.len(), self.score);
                true
            }
            None => false,
        }
    }

    /// Start over on a fresh board with a single seeded tile.
    pub(crate) fn restart(&mut self) {
        self.board = Board::new(self.config.size());
        self.score = 0;
        self.history.clear();
        self.set_status(Status::Running);
        self.seed();
    }

    pub(crate) fn frame(&self) -> Frame {
        let geometry = self.config.geometry();
        let tiles = self
            .board
            .iter()
            .map(|c| {
                let idx = c.idx();
                let (rect, progress) = match c.animation() {
                    Some(Animation::Create(a)) => (
                        geometry.centered_rect(&idx, a.current_size()),
                        c.animation().map(|a| a.progress()),
                    ),
                    None => (geometry.tile_rect(&idx), None),
                };
                TileView {
                    idx,
                    value: c.value(),
                    occupied: c.occupied(),
                    rect,
                    progress,
                }
            })
            .collect();
        Frame {
            size: self.config.size(),
            score: self.score,
            status: self.status,
            extent: geometry.extent(self.config.size()),
            tiles,
        }
    }
}

impl Session {
    fn remember(&mut self, round: Round) {
        if self.history.len() >= HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(round);
    }

    fn set_status(&mut self, status: Status) {
        if self.status != status {
            log::info!("game {} with score {}", status, self.score);
        }
        self.status = status;
    }

    fn seed(&mut self) {
        match random_empty_cell(&self.board, &mut *self.rng) {
            Ok(idx) => {
                if let Some(cell) = self.board.get_mut(&idx) {
                    cell.set(SEED_VALUE);
                }
            }
            Err(e) => log::error!("unable to seed board: {}", e),
        }
    }

    fn spawn(&mut self) {
        let idx = match random_empty_cell(&self.board, &mut *self.rng) {
            Ok(idx) => idx,
            Err(EngineError::BoardFull) => {
                log::debug!("board full, skipping spawn");
                return;
            }
            Err(e) => {
                log::error!("unable to spawn tile: {}", e);
                return;
            }
        };
        let geometry = self.config.geometry();
        let animation = Animation::create(idx, geometry.tile_size, self.config.animation_ticks());
        if let Some(cell) = self.board.get_mut(&idx) {
            log::info!("spawning tile at {}", idx);
            cell.attach(animation);
        }
    }

    /// Commit and detach every finished animation, and step the others.
    fn advance_animations(&mut self) -> Result<()> {
        for cell in self.board.iter_mut() {
            let finished = match cell.animation_mut() {
                Some(animation) if animation.is_finished() => true,
                Some(animation) => {
                    animation.step()?;
                    false
                }
                None => false,
            };
            if finished {
                if let Some(animation) = cell.detach() {
                    animation.on_finish(cell);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl Session {
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn set_board(&mut self, values: &[Vec<Card>]) {
        self.board = Board::from_values(values);
        self.history.clear();
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
