//! Multi-seat coordinator.
//!
//! Seats are plain [`Match`]es updated in seat order. A line clear with attack power sends
//! that many garbage rows to every other seat still standing.

use serde::Serialize;

use tetris_versus_core::input::ActionSnapshot;
use tetris_versus_core::logger::{self, Level, SharedLogger};
use tetris_versus_core::{attack_power, Match, MatchEvents};

/// Result of a versus round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    /// Index of the last seat standing
    Winner(usize),
    Draw,
}

#[derive(Debug)]
pub struct Versus {
    seats: Vec<Match>,
    logger: SharedLogger,
}

impl Versus {
    pub fn new(seats: Vec<Match>) -> Self {
        Self::with_logger(seats, logger::noop())
    }

    pub fn with_logger(seats: Vec<Match>, logger: SharedLogger) -> Self {
        Self { seats, logger }
    }

    pub fn seats(&self) -> &[Match] {
        &self.seats
    }

    pub fn seat(&self, index: usize) -> Option<&Match> {
        self.seats.get(index)
    }

    pub fn seat_mut(&mut self, index: usize) -> Option<&mut Match> {
        self.seats.get_mut(index)
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Seats that have not topped out
    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_game_over()).count()
    }

    /// Advance every live seat by `dt_ms`.
    ///
    /// `inputs[i]` feeds seat `i`; missing entries count as no input. Returns one report per
    /// seat (empty for seats that were already out).
    pub fn update(&mut self, inputs: &[ActionSnapshot], dt_ms: u32) -> Vec<MatchEvents> {
        let idle = ActionSnapshot::new();
        let mut reports = Vec::with_capacity(self.seats.len());

        for i in 0..self.seats.len() {
            if self.seats[i].is_game_over() {
                reports.push(MatchEvents::default());
                continue;
            }

            let input = inputs.get(i).unwrap_or(&idle);
            let events = self.seats[i].update(input, dt_ms);

            if events.lines_cleared > 0 {
                let attack = attack_power(events.lines_cleared);
                if attack > 0 {
                    self.send_garbage(i, attack);
                }
            }
            if events.game_over {
                self.log(Level::INFO, format_args!("seat {} topped out", i));
            }
            reports.push(events);
        }
        reports
    }

    fn send_garbage(&mut self, from: usize, lines: u32) {
        let mut targets = 0;
        for (j, target) in self.seats.iter_mut().enumerate() {
            if j == from || target.is_game_over() {
                continue;
            }
            targets += 1;
            if !target.add_garbage(lines) && target.is_game_over() {
                self.logger.log(
                    Level::INFO,
                    "versus",
                    format_args!("seat {} buried by garbage from seat {}", j, from),
                );
            }
        }
        if targets == 0 {
            return;
        }
        self.seats[from].record_garbage_sent(lines);
        self.log(
            Level::DEBUG,
            format_args!("seat {} sent {} garbage lines", from, lines),
        );
    }

    pub fn outcome(&self) -> Outcome {
        let mut alive = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_game_over())
            .map(|(i, _)| i);

        match (alive.next(), alive.next()) {
            (None, _) => Outcome::Draw,
            (Some(i), None) if self.seats.len() > 1 => Outcome::Winner(i),
            _ => Outcome::Ongoing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome() != Outcome::Ongoing
    }

    pub fn pause_all(&mut self) {
        self.seats.iter_mut().for_each(Match::pause);
    }

    pub fn resume_all(&mut self) {
        self.seats.iter_mut().for_each(Match::resume);
    }

    pub fn restart(&mut self) {
        self.seats.iter_mut().for_each(Match::restart);
        self.log(Level::DEBUG, format_args!("restarted {} seats", self.seats.len()));
    }

    fn log(&self, level: Level, args: std::fmt::Arguments<'_>) {
        if self.logger.enabled(level) {
            self.logger.log(level, "versus", args);
        }
    }
}
