//! Core types for the rail simulation
//!
//! Identifiers, small closed enums and geometry constants shared by every
//! component of the engine.

use std::fmt;

use super::error::SimError;

/// A station identifier, stable across resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a demand group within the seed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DemandGroupId(pub usize);

/// A physically contiguous, independently-doored part of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentId {
    Rear,
    Mid,
    Front,
    /// The only segment of a short vehicle
    Single,
}

impl SegmentId {
    pub fn label(self) -> &'static str {
        match self {
            SegmentId::Rear => "rear",
            SegmentId::Mid => "mid",
            SegmentId::Front => "front",
            SegmentId::Single => "single",
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which end of the vehicle a station's platform lines up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Rear,
    Front,
    /// Treated as `Rear` for both the stop target and the door set
    All,
}

/// The two supported vehicle configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VehicleMode {
    /// Three segments: rear(3), mid(4), front(3)
    #[default]
    Long,
    /// One uniform segment of 7 slots
    Short,
}

impl fmt::Display for VehicleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleMode::Long => f.write_str("long"),
            VehicleMode::Short => f.write_str("short"),
        }
    }
}

/// Playback speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedFactor {
    #[default]
    X1,
    X2,
    X4,
}

impl SpeedFactor {
    pub fn multiplier(self) -> f32 {
        match self {
            SpeedFactor::X1 => 1.0,
            SpeedFactor::X2 => 2.0,
            SpeedFactor::X4 => 4.0,
        }
    }
}

impl TryFrom<u32> for SpeedFactor {
    type Error = SimError;

    fn try_from(multiplier: u32) -> Result<Self, Self::Error> {
        match multiplier {
            1 => Ok(SpeedFactor::X1),
            2 => Ok(SpeedFactor::X2),
            4 => Ok(SpeedFactor::X4),
            other => Err(SimError::UnsupportedSpeed { multiplier: other }),
        }
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

/// Display color for a passenger, keyed by destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub &'static str);

const DESTINATION_PALETTE: [&str; 6] = [
    "#e4572e", "#29335c", "#f3a712", "#669bbc", "#a8c686", "#8e44ad",
];

impl ColorTag {
    pub fn for_destination(dest: StationId) -> Self {
        ColorTag(DESTINATION_PALETTE[dest.0 as usize % DESTINATION_PALETTE.len()])
    }
}

/// A passenger seated in the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passenger {
    pub group: DemandGroupId,
    pub dest: StationId,
    pub color: ColorTag,
}

/// Length of a single seat slot along the track
pub const SLOT_LENGTH: f32 = 10.0;

/// Gap between coupled segments
pub const COUPLER_GAP: f32 = 4.0;

/// Length of every platform (covers two long-mode segments)
pub const PLATFORM_LENGTH: f32 = 74.0;

/// Default length of the line
pub const TRACK_LENGTH: f32 = 1000.0;

/// Distance travelled per simulated second at 1x
pub const BASE_SPEED: f32 = 120.0;
