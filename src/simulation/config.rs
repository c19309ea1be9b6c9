//! Static configuration for a line
//!
//! Read once when the engine is built and never mutated afterwards.

use std::collections::HashSet;

use ordered_float::OrderedFloat;

use super::composition::VehicleComposition;
use super::demand::DemandGroup;
use super::error::{SimError, SimResult};
use super::station::Station;
use super::types::{Alignment, SegmentId, StationId, BASE_SPEED, TRACK_LENGTH};

/// Seconds after arrival before doors open
pub const DOORS_OPEN_AFTER: f32 = 0.5;
/// Seconds after arrival before alighting
pub const ALIGHT_AFTER: f32 = 1.0;
/// Seconds after arrival before boarding
pub const BOARD_AFTER: f32 = 1.5;
/// Seconds after arrival before doors close
pub const DWELL_DURATION: f32 = 3.0;
/// Seconds between doors closing and departure
pub const DEPART_AFTER_CLOSE: f32 = 1.0;

/// Dwell-phase thresholds in simulated seconds since arrival
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellTiming {
    pub doors_open_after: f32,
    pub alight_after: f32,
    pub board_after: f32,
    pub dwell_duration: f32,
    pub depart_after_close: f32,
}

impl Default for DwellTiming {
    fn default() -> Self {
        Self {
            doors_open_after: DOORS_OPEN_AFTER,
            alight_after: ALIGHT_AFTER,
            board_after: BOARD_AFTER,
            dwell_duration: DWELL_DURATION,
            depart_after_close: DEPART_AFTER_CLOSE,
        }
    }
}

impl DwellTiming {
    pub fn depart_after(&self) -> f32 {
        self.dwell_duration + self.depart_after_close
    }

    fn validate(&self) -> SimResult<()> {
        let ordered = [
            (0.0, self.doors_open_after, "doors open after arrival"),
            (self.doors_open_after, self.alight_after, "alighting after doors open"),
            (self.alight_after, self.board_after, "boarding after alighting"),
            (self.board_after, self.dwell_duration, "doors close after boarding"),
            (self.dwell_duration, self.depart_after(), "departure after doors close"),
        ];
        for (before, after, what) in ordered {
            if !after.is_finite() || after <= before {
                return Err(SimError::TimingOrder { what });
            }
        }
        Ok(())
    }
}

/// Everything the engine reads at start-up
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub track_length: f32,
    pub base_speed: f32,
    pub stations: Vec<Station>,
    pub demand: Vec<DemandGroup>,
    pub timing: DwellTiming,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::default_line()
    }
}

impl SimConfig {
    /// The built-in five-station line with mixed platform alignments
    pub fn default_line() -> Self {
        let stations = vec![
            Station::new(1, "Quayside", 120.0, Alignment::Rear),
            Station::new(2, "Market Street", 320.0, Alignment::Front),
            Station::new(3, "Central", 520.0, Alignment::All),
            Station::new(4, "University", 720.0, Alignment::Rear),
            Station::new(5, "Terminus", 860.0, Alignment::Front),
        ];

        let demand = vec![
            DemandGroup::new(1, 3, 3, SegmentId::Rear),
            DemandGroup::new(1, 4, 2, SegmentId::Mid),
            DemandGroup::new(2, 5, 3, SegmentId::Front),
            DemandGroup::new(2, 4, 2, SegmentId::Mid),
            DemandGroup::new(3, 4, 2, SegmentId::Rear),
            DemandGroup::new(3, 5, 2, SegmentId::Mid),
            // Rear doors stay shut at Terminus, so these riders miss their stop
            DemandGroup::new(4, 5, 1, SegmentId::Rear),
        ];

        Self {
            track_length: TRACK_LENGTH,
            base_speed: BASE_SPEED,
            stations,
            demand,
            timing: DwellTiming::default(),
        }
    }

    /// Fails fast on structural problems.
    ///
    /// Demand groups are not checked here; bad ones are dropped when the
    /// ledger is seeded.
    pub fn validate(&self) -> SimResult<()> {
        for (what, value) in [
            ("track length", self.track_length),
            ("base speed", self.base_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidValue { what, value });
            }
        }

        if self.stations.is_empty() {
            return Err(SimError::NoStations);
        }

        let mut seen = HashSet::new();
        for station in &self.stations {
            if !seen.insert(station.id) {
                return Err(SimError::DuplicateStation { id: station.id });
            }
            if !station.position.is_finite() {
                return Err(SimError::InvalidValue {
                    what: "station position",
                    value: station.position,
                });
            }
            for composition in [VehicleComposition::long(), VehicleComposition::short()] {
                let target = station.stop_target(composition.length());
                if target <= 0.0 || target > self.track_length {
                    return Err(SimError::StopOutsideTrack {
                        id: station.id,
                        target,
                        track_length: self.track_length,
                    });
                }
            }
        }

        for composition in [VehicleComposition::long(), VehicleComposition::short()] {
            self.check_distinct_targets(&composition)?;
        }

        self.timing.validate()
    }

    /// Two stops at one position would leave the second unreachable once the
    /// vehicle departs the first.
    fn check_distinct_targets(&self, composition: &VehicleComposition) -> SimResult<()> {
        let mut targets: Vec<(f32, StationId)> = self
            .stations
            .iter()
            .map(|s| (s.stop_target(composition.length()), s.id))
            .collect();
        targets.sort_by_key(|&(target, _)| OrderedFloat(target));

        for pair in targets.windows(2) {
            let ((first_target, first), (second_target, second)) = (pair[0], pair[1]);
            if second_target <= first_target {
                return Err(SimError::SharedStopTarget {
                    first,
                    second,
                    target: first_target,
                    mode: composition.mode(),
                });
            }
        }
        Ok(())
    }
}
