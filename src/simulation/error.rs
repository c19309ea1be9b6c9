//! Errors raised while building or driving the simulation

use thiserror::Error;

use super::types::{StationId, VehicleMode};

/// Result type for configuration and input validation.
pub type SimResult<T> = Result<T, SimError>;

/// Structural problems detected before the engine starts.
///
/// Per-group demand problems are not errors: those groups are dropped with a
/// warning when the ledger is seeded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("no stations configured")]
    NoStations,

    #[error("duplicate station id {id}")]
    DuplicateStation { id: StationId },

    #[error("invalid value for {what}: {value}")]
    InvalidValue { what: &'static str, value: f32 },

    #[error("stop target {target} for station {id} lies outside the track (length {track_length})")]
    StopOutsideTrack {
        id: StationId,
        target: f32,
        track_length: f32,
    },

    #[error("stations {first} and {second} share stop target {target} for a {mode} vehicle")]
    SharedStopTarget {
        first: StationId,
        second: StationId,
        target: f32,
        mode: VehicleMode,
    },

    #[error("dwell thresholds must increase: {what}")]
    TimingOrder { what: &'static str },

    #[error("unsupported speed multiplier {multiplier}, expected 1, 2 or 4")]
    UnsupportedSpeed { multiplier: u32 },
}
