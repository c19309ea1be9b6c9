//! Demand model
//!
//! Static origin -> destination passenger groups and the fold that turns them
//! into the initial waiting ledger for a vehicle mode.

use std::collections::BTreeMap;

use super::composition::VehicleComposition;
use super::station::StationRegistry;
use super::types::{ColorTag, DemandGroupId, SegmentId, StationId, VehicleMode};

/// Seed record: passengers wanting to travel between two stations
#[derive(Debug, Clone, PartialEq)]
pub struct DemandGroup {
    pub origin: StationId,
    pub dest: StationId,
    pub total: u32,
    pub preferred: SegmentId,
}

impl DemandGroup {
    pub fn new(origin: u32, dest: u32, total: u32, preferred: SegmentId) -> Self {
        Self {
            origin: StationId(origin),
            dest: StationId(dest),
            total,
            preferred,
        }
    }

    /// Segment this group boards in the given composition.
    ///
    /// Short vehicles force the single segment; long vehicles use the
    /// preferred one if the composition has it.
    pub fn effective_segment(&self, composition: &VehicleComposition) -> Option<SegmentId> {
        match composition.mode() {
            VehicleMode::Short => Some(SegmentId::Single),
            VehicleMode::Long => composition
                .contains(self.preferred)
                .then_some(self.preferred),
        }
    }
}

/// Un-boarded remainder of a demand group, queued at its origin
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingGroup {
    pub group: DemandGroupId,
    pub dest: StationId,
    pub segment: SegmentId,
    pub remaining: u32,
    pub color: ColorTag,
}

/// Why a demand group was left out of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub group: DemandGroupId,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct DemandModel {
    groups: Vec<DemandGroup>,
}

impl DemandModel {
    pub fn new(groups: Vec<DemandGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> impl Iterator<Item = (DemandGroupId, &DemandGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (DemandGroupId(i), g))
    }

    fn check(
        &self,
        group: &DemandGroup,
        stations: &StationRegistry,
        composition: &VehicleComposition,
    ) -> Result<SegmentId, &'static str> {
        let origin = stations.get(group.origin).ok_or("unknown origin station")?;
        let dest = stations.get(group.dest).ok_or("unknown destination station")?;
        if origin.id == dest.id {
            return Err("origin and destination are the same station");
        }
        if dest.position <= origin.position {
            return Err("destination is not downstream of origin");
        }
        group
            .effective_segment(composition)
            .ok_or("preferred segment is not part of this vehicle")
    }

    /// Groups that cannot be placed in the ledger for this composition
    pub fn rejections(
        &self,
        stations: &StationRegistry,
        composition: &VehicleComposition,
    ) -> Vec<Rejection> {
        self.groups()
            .filter_map(|(id, group)| {
                self.check(group, stations, composition)
                    .err()
                    .map(|reason| Rejection { group: id, reason })
            })
            .collect()
    }

    /// Builds the waiting ledger keyed by origin station.
    ///
    /// Rejected and empty groups are skipped. Running this twice over the same
    /// seed yields the same map.
    pub fn initial_waiting(
        &self,
        stations: &StationRegistry,
        composition: &VehicleComposition,
    ) -> BTreeMap<StationId, Vec<WaitingGroup>> {
        self.groups()
            .filter(|(_, group)| group.total > 0)
            .filter_map(|(id, group)| {
                let segment = self.check(group, stations, composition).ok()?;
                Some((
                    group.origin,
                    WaitingGroup {
                        group: id,
                        dest: group.dest,
                        segment,
                        remaining: group.total,
                        color: ColorTag::for_destination(group.dest),
                    },
                ))
            })
            .fold(BTreeMap::new(), |mut ledger, (origin, waiting)| {
                ledger.entry(origin).or_insert_with(Vec::new).push(waiting);
                ledger
            })
    }
}
