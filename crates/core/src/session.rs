//! Match session - one player's board, pieces, timing, and score
//!
//! A [`Match`] is advanced by [`Match::update`] once per frame with the asserted actions and
//! the elapsed milliseconds. It owns its own session clock, which only moves while the match
//! is running, so gravity and input debounce never see paused time.

use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::config::MatchConfig;
use crate::events::{LockOutcome, MatchEvents, MatchStats};
use crate::input::{ActionSnapshot, ActionTimers};
use crate::logger::{self, Level, SharedLogger};
use crate::pieces::Piece;
use crate::rng::{PieceQueue, SimpleRng};
use crate::rotation::try_rotate;
use crate::scoring::{self, attack_power};
use crate::snapshot::{ActiveSnapshot, MatchSnapshot};
use crate::types::{Action, PieceKind, START_LEVEL};

/// Salt separating the garbage-gap stream from the piece stream
const GARBAGE_SEED_SALT: u32 = 0x9E37_79B9;

/// Lifecycle of a match. `GameOver` is terminal until [`Match::restart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Running,
    Paused,
    GameOver,
}

/// Who drives the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    #[default]
    Human,
    Cpu,
}

/// A computer controller attached to a match.
///
/// Called once per running update with a read-only view of the match and the session clock.
/// Returning an action runs it through the same debounced path as human input, and the
/// pilot is then told whether the debounce let it through.
pub trait Pilot: fmt::Debug {
    fn decide(&mut self, game: &Match, now_ms: u64) -> Option<Action>;

    /// Outcome of the last decision. `accepted` is false when the action was still inside
    /// its repeat interval and did not run.
    fn acknowledge(&mut self, _action: Action, _accepted: bool) {}

    /// Drop any plan tied to the previous round
    fn reset(&mut self) {}
}

#[derive(Debug)]
pub struct Match {
    config: MatchConfig,
    logger: SharedLogger,
    seed: u32,

    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    garbage_rng: SimpleRng,

    state: MatchState,
    score: u32,
    lines: u32,
    level: u32,
    stats: MatchStats,

    clock_ms: u64,
    last_drop_ms: u64,
    drop_interval_ms: u32,
    timers: ActionTimers,

    /// Pieces promoted from the queue, the opening piece included
    piece_id: u32,
    /// Active piece instances, bumped on spawn and on hold swaps
    active_id: u32,

    mode: PlayerMode,
    pilot: Option<Box<dyn Pilot>>,
}

impl Match {
    /// Human-controlled match with default tuning
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, MatchConfig::default())
    }

    pub fn with_config(seed: u32, config: MatchConfig) -> Self {
        Self::with_logger(seed, config, logger::noop())
    }

    pub fn with_logger(seed: u32, config: MatchConfig, logger: SharedLogger) -> Self {
        let mut queue = PieceQueue::new(seed, config.randomizer);
        let first = queue.draw();
        let next = queue.draw();
        let timers = ActionTimers::with_interval(config.input_interval_ms);
        let drop_interval_ms = scoring::drop_interval_ms(START_LEVEL, &config);

        let mut game = Self {
            garbage_rng: SimpleRng::new(seed ^ GARBAGE_SEED_SALT),
            config,
            logger,
            seed,
            board: Board::new(),
            active: None,
            next,
            held: None,
            can_hold: true,
            queue,
            state: MatchState::Running,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            stats: MatchStats::default(),
            clock_ms: 0,
            last_drop_ms: 0,
            drop_interval_ms,
            timers,
            piece_id: 1,
            active_id: 0,
            mode: PlayerMode::Human,
            pilot: None,
        };
        game.spawn(first);
        game
    }

    /// Hand control to a computer pilot
    pub fn with_pilot(mut self, pilot: Box<dyn Pilot>) -> Self {
        self.set_pilot(pilot);
        self
    }

    pub fn set_pilot(&mut self, pilot: Box<dyn Pilot>) {
        self.pilot = Some(pilot);
        self.mode = PlayerMode::Cpu;
    }

    /// Detach the pilot and return to human input
    pub fn clear_pilot(&mut self) -> Option<Box<dyn Pilot>> {
        self.mode = PlayerMode::Human;
        self.pilot.take()
    }

    /// Advance the match by `dt_ms` and report what happened.
    ///
    /// Paused and finished matches ignore the call entirely. Human input is processed in
    /// [`Action::ALL`] order; a computer match ignores `input` and asks its pilot instead.
    /// Gravity runs last.
    pub fn update(&mut self, input: &ActionSnapshot, dt_ms: u32) -> MatchEvents {
        let mut events = MatchEvents::default();
        if self.state != MatchState::Running {
            return events;
        }

        self.clock_ms = self.clock_ms.saturating_add(dt_ms as u64);
        let now = self.clock_ms;

        match self.mode {
            PlayerMode::Human => {
                for action in input.iter_pressed() {
                    if self.state != MatchState::Running {
                        break;
                    }
                    self.trigger(action, now, &mut events);
                }
            }
            PlayerMode::Cpu => {
                if let Some(mut pilot) = self.pilot.take() {
                    if let Some(action) = pilot.decide(self, now) {
                        let accepted = self.trigger(action, now, &mut events);
                        pilot.acknowledge(action, accepted);
                    }
                    self.pilot = Some(pilot);
                }
            }
        }

        if self.state == MatchState::Running {
            self.apply_gravity(now, &mut events);
        }
        events
    }

    /// Perform one action immediately, bypassing debounce.
    pub fn apply_action(&mut self, action: Action) -> MatchEvents {
        let mut events = MatchEvents::default();
        if self.state == MatchState::Running {
            self.perform(action, &mut events);
        }
        events
    }

    /// Run `action` if its repeat interval has passed. Returns false when debounced.
    fn trigger(&mut self, action: Action, now: u64, events: &mut MatchEvents) -> bool {
        if !self.timers.ready(action, now) {
            return false;
        }
        if self.perform(action, events) {
            self.timers.mark(action, now);
        }
        true
    }

    fn perform(&mut self, action: Action, events: &mut MatchEvents) -> bool {
        match action {
            Action::MoveLeft | Action::MoveRight => {
                let dx = if action == Action::MoveLeft { -1 } else { 1 };
                let moved = self.try_shift(dx, 0);
                events.piece_moved |= moved;
                moved
            }
            Action::SoftDrop => {
                let dropped = self.try_shift(0, 1);
                if dropped {
                    self.add_score(scoring::drop_score(1, false));
                    events.soft_drop = true;
                }
                dropped
            }
            Action::RotateCw | Action::RotateCcw => {
                let rotated = self.rotate(action == Action::RotateCw);
                events.piece_rotated |= rotated;
                rotated
            }
            Action::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                let distance = self.hard_drop_distance();
                self.add_score(scoring::drop_score(distance, true));
                let lock = self.lock_active();
                events.absorb_lock(lock);
                events.hard_drop = true;
                true
            }
            Action::Hold => {
                let held = self.hold(events);
                events.piece_held |= held;
                held
            }
        }
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let trial = active.shifted(dx, dy);
        if self.board.is_valid_position(&trial) {
            self.active = Some(trial);
            true
        } else {
            false
        }
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match try_rotate(&self.board, &active, clockwise) {
            Some((rotated, _kick)) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    fn hard_drop_distance(&mut self) -> u32 {
        let mut distance = 0;
        while self.try_shift(0, 1) {
            distance += 1;
        }
        distance
    }

    fn hold(&mut self, events: &mut MatchEvents) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.held.replace(active.kind) {
            None => {
                let next = self.next;
                self.next = self.queue.draw();
                self.piece_id = self.piece_id.wrapping_add(1);
                if !self.spawn(next) {
                    events.game_over = true;
                }
            }
            Some(previous) => {
                if !self.spawn(previous) {
                    events.game_over = true;
                }
            }
        }
        self.can_hold = false;
        true
    }

    /// Put `kind` at its spawn cell and restart the drop timer. Tops out on overlap.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::new(kind);
        self.active_id = self.active_id.wrapping_add(1);
        self.last_drop_ms = self.clock_ms;
        if !self.board.is_valid_position(&piece) {
            self.active = None;
            self.top_out();
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Promote the queued piece and draw a new one
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.queue.draw();
        self.piece_id = self.piece_id.wrapping_add(1);
        self.can_hold = true;
        self.spawn(kind)
    }

    fn lock_active(&mut self) -> LockOutcome {
        let Some(piece) = self.active.take() else {
            return LockOutcome::default();
        };

        self.board.place(&piece);
        self.stats.pieces_placed += 1;

        let rows = self.board.clear_lines();
        let lines = rows.len() as u32;
        let mut outcome = LockOutcome {
            lines,
            rows,
            ..Default::default()
        };

        if lines > 0 {
            let points = scoring::line_clear_score(lines as usize, self.level, &self.config.line_scores);
            self.add_score(points);
            self.stats.record_clear(lines);
            self.lines += lines;

            if scoring::qualifies_for_level_up(self.lines, self.level, self.config.lines_per_level) {
                self.level += 1;
                self.drop_interval_ms = scoring::drop_interval_ms(self.level, &self.config);
                outcome.level_up = true;
                self.log(
                    Level::DEBUG,
                    format_args!(
                        "level {} reached, drop interval {} ms",
                        self.level, self.drop_interval_ms
                    ),
                );
            }
        }

        outcome.game_over = !self.spawn_next();
        outcome
    }

    fn apply_gravity(&mut self, now: u64, events: &mut MatchEvents) {
        if now.saturating_sub(self.last_drop_ms) < self.drop_interval_ms as u64 {
            return;
        }
        if self.try_shift(0, 1) {
            self.last_drop_ms = now;
        } else {
            let lock = self.lock_active();
            events.absorb_lock(lock);
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    fn top_out(&mut self) {
        self.state = MatchState::GameOver;
        self.log(
            Level::INFO,
            format_args!(
                "game over: score {} lines {} level {}",
                self.score, self.lines, self.level
            ),
        );
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.logger.enabled(level) {
            self.logger.log(level, "match", args);
        }
    }

    /// Push `lines` garbage rows under the stack.
    ///
    /// Returns false when the match is already over, when `lines` is zero, or when the rising
    /// stack pushes into the active piece (which ends the match).
    pub fn add_garbage(&mut self, lines: u32) -> bool {
        if self.state == MatchState::GameOver || lines == 0 {
            return false;
        }

        self.board.add_garbage_lines(lines as usize, &mut self.garbage_rng);
        self.stats.garbage_received += lines;
        self.log(Level::DEBUG, format_args!("received {} garbage lines", lines));

        match self.active {
            Some(active) if !self.board.is_valid_position(&active) => {
                self.active = None;
                self.top_out();
                false
            }
            _ => true,
        }
    }

    /// Garbage rows a clear of `lines_cleared` sends to opponents
    pub fn attack_power(&self, lines_cleared: u32) -> u32 {
        attack_power(lines_cleared)
    }

    pub fn record_garbage_sent(&mut self, lines: u32) {
        self.stats.garbage_sent += lines;
    }

    pub fn pause(&mut self) {
        if self.state == MatchState::Running {
            self.state = MatchState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == MatchState::Paused {
            self.state = MatchState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            MatchState::Running => self.pause(),
            MatchState::Paused => self.resume(),
            MatchState::GameOver => {}
        }
    }

    /// Start a fresh round with the same seed, config, logger, and pilot
    pub fn restart(&mut self) {
        let logger = self.logger.clone();
        let mut pilot = self.pilot.take();
        let mode = self.mode;

        *self = Self::with_logger(self.seed, self.config.clone(), logger);

        if let Some(pilot) = pilot.as_mut() {
            pilot.reset();
        }
        self.pilot = pilot;
        self.mode = mode;
        self.log(Level::DEBUG, format_args!("restarted with seed {}", self.seed));
    }

    /// Replace the active piece. Rejected when the placement is invalid.
    pub fn set_active(&mut self, piece: Piece) -> bool {
        if self.state == MatchState::GameOver || !self.board.is_valid_position(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Mutable board access for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Lowest valid drop of the active piece at its current column and rotation
    pub fn ghost(&self) -> Option<Piece> {
        let mut ghost = self.active?;
        loop {
            let below = ghost.shifted(0, 1);
            if !self.board.is_valid_position(&below) {
                return Some(ghost);
            }
            ghost = below;
        }
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == MatchState::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.state == MatchState::Paused
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Session clock in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn active_id(&self) -> u32 {
        self.active_id
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn timers(&self) -> &ActionTimers {
        &self.timers
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut out = MatchSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` without allocating
    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        self.board.write_code_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost().map(|g| g.y);
        out.next = self.next;
        out.hold = self.held;
        out.can_hold = self.can_hold;
        out.state = self.state;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.stats = self.stats;
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(1)
    }
}
