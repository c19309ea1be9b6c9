//! Motion integrator
//!
//! Constant-velocity movement along the track with exact snapping onto the
//! next stop target. Position is the vehicle's leading edge.

use ordered_float::OrderedFloat;

use super::station::StationRegistry;
use super::types::StationId;

/// What happened during one call to [`MotionIntegrator::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    /// Still underway
    Moved,
    /// Snapped onto a stop target and docked
    Arrived(StationId),
    /// Passed the end of the track
    RouteComplete,
}

#[derive(Debug, Clone, Default)]
pub struct MotionIntegrator {
    position: f32,
    last_departed: Option<StationId>,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn last_departed(&self) -> Option<StationId> {
        self.last_departed
    }

    pub fn mark_departed(&mut self, station: StationId) {
        self.last_departed = Some(station);
    }

    /// Back to the start of the line
    pub fn rewind(&mut self) {
        self.position = 0.0;
        self.last_departed = None;
    }

    /// Moves `distance` forward unless a stop target lies in the way.
    ///
    /// A target inside `(position, position + distance]` always wins, so a
    /// large frame can never carry the vehicle past a stop.
    pub fn advance(
        &mut self,
        distance: f32,
        stations: &StationRegistry,
        vehicle_length: f32,
        track_length: f32,
    ) -> MotionOutcome {
        let candidate = self.position + distance;

        let next_stop = stations
            .iter()
            .filter(|s| Some(s.id) != self.last_departed)
            .map(|s| (s.id, s.stop_target(vehicle_length)))
            .filter(|&(_, target)| self.position < target && target <= candidate)
            .min_by_key(|&(_, target)| OrderedFloat(target));

        if let Some((station, target)) = next_stop {
            self.position = target;
            self.last_departed = None;
            return MotionOutcome::Arrived(station);
        }

        self.position = candidate;
        if candidate > track_length {
            MotionOutcome::RouteComplete
        } else {
            MotionOutcome::Moved
        }
    }
}
