//! Track and station registry
//!
//! Stations are static: created once from configuration and kept sorted by
//! their position along the track.

use ordered_float::OrderedFloat;

use super::types::{Alignment, StationId, PLATFORM_LENGTH};

/// A stop on the line
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Near edge of the platform (the edge the vehicle reaches first)
    pub position: f32,
    pub alignment: Alignment,
}

impl Station {
    pub fn new(id: u32, name: &str, position: f32, alignment: Alignment) -> Self {
        Self {
            id: StationId(id),
            name: name.to_string(),
            position,
            alignment,
        }
    }

    pub fn platform_far_edge(&self) -> f32 {
        self.position + PLATFORM_LENGTH
    }

    /// Leading-edge position at which the vehicle halts here.
    ///
    /// Rear-aligned stops put the trailing edge on the near end of the
    /// platform, front-aligned stops put the leading edge on the far end.
    pub fn stop_target(&self, vehicle_length: f32) -> f32 {
        match self.alignment {
            Alignment::Rear | Alignment::All => self.position + vehicle_length,
            Alignment::Front => self.platform_far_edge(),
        }
    }
}

/// Ordered station list
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(mut stations: Vec<Station>) -> Self {
        stations.sort_by_key(|s| OrderedFloat(s.position));
        Self { stations }
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Stations in ascending track order
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Display name, falling back to the id for unknown stations
    pub fn name_of(&self, id: StationId) -> String {
        self.get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("station {}", id))
    }
}
