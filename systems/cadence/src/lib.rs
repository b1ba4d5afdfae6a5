#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic cadence system that paces automatic stepping.
//!
//! The system mirrors the world's playback state from its event stream and
//! accumulates simulated time whenever the clock advances. Each time the
//! accumulator reaches the period derived from the current speed setting it
//! emits exactly one [`Command::StepAnt`] and starts timing the next interval
//! from zero, reproducing an elapsed-time-vs-period gate: a late frame never
//! causes a burst of catch-up steps.

use std::time::Duration;

use langton_core::{Command, Event, SpeedSetting};

/// Pure system that reacts to world events and emits step commands.
#[derive(Debug)]
pub struct Cadence {
    running: bool,
    speed: SpeedSetting,
    accumulator: Duration,
}

impl Cadence {
    /// Creates a cadence gate that is paused at the default speed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events in order and emits step commands into `out`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::PlaybackChanged { running } => {
                    self.running = *running;
                    self.accumulator = Duration::ZERO;
                }
                Event::SpeedChanged { speed } => {
                    self.speed = *speed;
                    self.accumulator = Duration::ZERO;
                }
                Event::SimulationReset { .. } | Event::GridConfigured { .. } => {
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    if !self.running {
                        continue;
                    }
                    self.accumulator = self.accumulator.saturating_add(*dt);
                    if self.accumulator >= self.speed.step_period() {
                        self.accumulator = Duration::ZERO;
                        out.push(Command::StepAnt);
                    }
                }
                _ => {}
            }
        }
    }

    /// Simulated time accumulated toward the next automatic step.
    #[must_use]
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            running: false,
            speed: SpeedSetting::default(),
            accumulator: Duration::ZERO,
        }
    }
}
