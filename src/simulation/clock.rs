//! Simulation clock
//!
//! Turns wall-clock frame deltas into simulated time. Paused frames produce no
//! simulated time at all, so every timer resumes exactly where it stopped.

use log::warn;

use super::types::SpeedFactor;

#[derive(Debug, Clone, Default)]
pub struct SimClock {
    running: bool,
    speed: SpeedFactor,
    frame: u64,
    sim_time: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn speed(&self) -> SpeedFactor {
        self.speed
    }

    pub fn set_speed(&mut self, speed: SpeedFactor) {
        self.speed = speed;
    }

    /// Number of frames seen, paused ones included
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total simulated seconds while running
    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    /// Counts a frame and returns the scaled simulated delta, or `None` when paused.
    ///
    /// A negative or non-finite wall delta (clock regression) counts as zero.
    pub fn advance(&mut self, wall_delta: f32) -> Option<f32> {
        self.frame += 1;
        if !self.running {
            return None;
        }

        let wall_delta = if wall_delta.is_finite() && wall_delta >= 0.0 {
            wall_delta
        } else {
            warn!("Ignoring clock regression of {}s at frame {}", wall_delta, self.frame);
            0.0
        };

        let sim_delta = wall_delta * self.speed.multiplier();
        self.sim_time += sim_delta;
        Some(sim_delta)
    }
}
