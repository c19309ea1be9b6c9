//! Stop-dwell state machine
//!
//! One cycle per station stop. Phases fire in a fixed order, each exactly
//! once, as simulated time since arrival crosses its threshold.

use std::fmt;

use super::config::DwellTiming;
use super::types::StationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DwellPhase {
    Arrived,
    DoorsOpen,
    Alighting,
    Boarding,
    DoorsClosing,
    Departed,
}

impl DwellPhase {
    pub const ORDER: [DwellPhase; 6] = [
        DwellPhase::Arrived,
        DwellPhase::DoorsOpen,
        DwellPhase::Alighting,
        DwellPhase::Boarding,
        DwellPhase::DoorsClosing,
        DwellPhase::Departed,
    ];

    pub fn next(self) -> Option<DwellPhase> {
        match self {
            DwellPhase::Arrived => Some(DwellPhase::DoorsOpen),
            DwellPhase::DoorsOpen => Some(DwellPhase::Alighting),
            DwellPhase::Alighting => Some(DwellPhase::Boarding),
            DwellPhase::Boarding => Some(DwellPhase::DoorsClosing),
            DwellPhase::DoorsClosing => Some(DwellPhase::Departed),
            DwellPhase::Departed => None,
        }
    }

    /// Time since arrival that must be exceeded before this phase fires
    pub fn threshold(self, timing: &DwellTiming) -> f32 {
        match self {
            DwellPhase::Arrived => 0.0,
            DwellPhase::DoorsOpen => timing.doors_open_after,
            DwellPhase::Alighting => timing.alight_after,
            DwellPhase::Boarding => timing.board_after,
            DwellPhase::DoorsClosing => timing.dwell_duration,
            DwellPhase::Departed => timing.depart_after(),
        }
    }
}

impl fmt::Display for DwellPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DwellPhase::Arrived => "arrived",
            DwellPhase::DoorsOpen => "doors open",
            DwellPhase::Alighting => "alighting",
            DwellPhase::Boarding => "boarding",
            DwellPhase::DoorsClosing => "doors closing",
            DwellPhase::Departed => "departed",
        };
        f.write_str(name)
    }
}

/// Progress through a single stop
#[derive(Debug, Clone, PartialEq)]
pub struct DwellCycle {
    station: StationId,
    elapsed: f32,
    phase: DwellPhase,
}

impl DwellCycle {
    /// Starts a cycle; the `Arrived` phase is entered immediately
    pub fn arrive(station: StationId) -> Self {
        Self {
            station,
            elapsed: 0.0,
            phase: DwellPhase::Arrived,
        }
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Last phase that fired
    pub fn phase(&self) -> DwellPhase {
        self.phase
    }

    /// Adds simulated time and fires at most one phase.
    ///
    /// The next phase fires only once `elapsed` is past its own threshold, no
    /// matter which phases ran before it.
    pub fn advance(&mut self, sim_delta: f32, timing: &DwellTiming) -> Option<DwellPhase> {
        if sim_delta.is_finite() && sim_delta > 0.0 {
            self.elapsed += sim_delta;
        }
        let next = self.phase.next()?;
        if self.elapsed > next.threshold(timing) {
            self.phase = next;
            Some(next)
        } else {
            None
        }
    }
}
