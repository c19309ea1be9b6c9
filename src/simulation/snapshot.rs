//! Snapshot publishing
//!
//! Once per frame the engine hands a complete, immutable copy of its visible
//! state to whatever is rendering it. Nothing is diffed: each snapshot
//! replaces the previous one.

use std::collections::BTreeMap;
use std::fmt;

use super::demand::WaitingGroup;
use super::dwell::DwellPhase;
use super::stats::RunStats;
use super::types::{Passenger, SegmentId, SpeedFactor, StationId, VehicleMode};

/// Human-readable engine status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Ready,
    Paused,
    Running,
    Arriving { station: String },
    DoorsOpen { station: String },
    Alighted { station: String, count: u32 },
    Boarded { station: String, count: u32 },
    CapacityOverflow {
        station: String,
        boarded: u32,
        left_waiting: u32,
    },
    DoorsClosing { station: String },
    Departing { station: String },
    RouteLooped,
    RouteReset,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Ready => write!(f, "Ready"),
            StatusMessage::Paused => write!(f, "Paused"),
            StatusMessage::Running => write!(f, "Running"),
            StatusMessage::Arriving { station } => write!(f, "Arriving at {}", station),
            StatusMessage::DoorsOpen { station } => write!(f, "Doors open at {}", station),
            StatusMessage::Alighted { station, count } => {
                write!(f, "{} alighted at {}", count, station)
            }
            StatusMessage::Boarded { station, count } => {
                write!(f, "{} boarded at {}", count, station)
            }
            StatusMessage::CapacityOverflow {
                station,
                boarded,
                left_waiting,
            } => write!(
                f,
                "{} boarded at {}; vehicle full, {} left waiting",
                boarded, station, left_waiting
            ),
            StatusMessage::DoorsClosing { station } => write!(f, "Doors closing at {}", station),
            StatusMessage::Departing { station } => write!(f, "Departing {}", station),
            StatusMessage::RouteLooped => write!(f, "Route complete, dispatching again"),
            StatusMessage::RouteReset => write!(f, "Route complete, demand reset"),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub frame: u64,
    pub position_x: f32,
    pub vehicle_length: f32,
    pub docked_station: Option<StationId>,
    pub doors_open: bool,
    pub open_segments: Vec<SegmentId>,
    pub seats: Vec<Option<Passenger>>,
    pub waiting: BTreeMap<StationId, Vec<WaitingGroup>>,
    pub status: StatusMessage,
    pub is_running: bool,
    pub speed: SpeedFactor,
    pub mode: VehicleMode,
    pub dwell_phase: Option<DwellPhase>,
    pub stats: RunStats,
}

/// Receiver of per-frame snapshots
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Snapshot);
}

/// Keeps every published snapshot, for tests and replay
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    frames: Vec<Snapshot>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl SnapshotSink for SnapshotLog {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}
