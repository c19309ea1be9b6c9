//! Standalone rail simulation module
//!
//! This module contains the whole simulation engine: track and stations,
//! vehicle compositions, passenger demand, and the per-frame stepper. It has
//! no rendering code; a renderer consumes the published snapshots.

mod clock;
mod composition;
mod config;
mod demand;
mod dwell;
mod error;
mod ledger;
mod motion;
mod snapshot;
mod station;
mod stats;
mod types;
mod world;

pub use clock::SimClock;
pub use composition::{VehicleComposition, VehicleSegment};
pub use config::{
    DwellTiming, SimConfig, ALIGHT_AFTER, BOARD_AFTER, DEPART_AFTER_CLOSE, DOORS_OPEN_AFTER,
    DWELL_DURATION,
};
pub use demand::{DemandGroup, DemandModel, Rejection, WaitingGroup};
pub use dwell::{DwellCycle, DwellPhase};
pub use error::{SimError, SimResult};
pub use ledger::{BoardingReport, PassengerLedger};
pub use motion::{MotionIntegrator, MotionOutcome};
pub use snapshot::{Snapshot, SnapshotLog, SnapshotSink, StatusMessage};
pub use station::{Station, StationRegistry};
pub use stats::RunStats;
pub use types::{
    Alignment, ColorTag, DemandGroupId, Passenger, SegmentId, SpeedFactor, StationId,
    VehicleMode, BASE_SPEED, COUPLER_GAP, PLATFORM_LENGTH, SLOT_LENGTH, TRACK_LENGTH,
};
pub use world::{RailWorld, TickOutcome};
