//! Run statistics accumulated by the engine

/// Counters since the engine was built (kept across resets)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub stops: u32,
    pub boarded: u32,
    pub delivered: u32,
    /// Riders still aboard when a short vehicle looped
    pub missed: u32,
    /// Boarding passes that left riders on an open platform
    pub overflow_events: u32,
    pub loops: u32,
    pub resets: u32,
}

impl RunStats {
    /// Share of boarded riders that reached their destination
    pub fn delivery_rate(&self) -> f32 {
        if self.boarded > 0 {
            self.delivered as f32 / self.boarded as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Stops: {} | Boarded: {} | Delivered: {} | Missed: {} | Loops: {} | Resets: {}",
            self.stops, self.boarded, self.delivered, self.missed, self.loops, self.resets
        )
    }
}
