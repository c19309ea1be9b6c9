//! Passenger ledger
//!
//! Runtime passenger state: who is waiting where, who sits in which slot, and
//! how many of each demand group have been delivered or missed their stop.

use std::collections::{BTreeMap, HashMap};

use super::composition::VehicleComposition;
use super::demand::{DemandModel, WaitingGroup};
use super::station::StationRegistry;
use super::types::{DemandGroupId, Passenger, SegmentId, StationId};

/// Result of one boarding pass at a station
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardingReport {
    pub boarded: u32,
    /// Passengers of open-segment groups still queued because the segment filled up
    pub left_waiting: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PassengerLedger {
    waiting: BTreeMap<StationId, Vec<WaitingGroup>>,
    seats: Vec<Option<Passenger>>,
    delivered: HashMap<DemandGroupId, u32>,
    missed: HashMap<DemandGroupId, u32>,
}

impl PassengerLedger {
    /// Fresh ledger from the demand seed with an empty vehicle
    pub fn seeded(
        demand: &DemandModel,
        stations: &StationRegistry,
        composition: &VehicleComposition,
    ) -> Self {
        Self {
            waiting: demand.initial_waiting(stations, composition),
            seats: vec![None; composition.total_slots()],
            delivered: HashMap::new(),
            missed: HashMap::new(),
        }
    }

    pub fn seats(&self) -> &[Option<Passenger>] {
        &self.seats
    }

    pub fn waiting(&self) -> &BTreeMap<StationId, Vec<WaitingGroup>> {
        &self.waiting
    }

    pub fn waiting_at(&self, station: StationId) -> &[WaitingGroup] {
        self.waiting.get(&station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True while any station still has someone queued
    pub fn any_waiting(&self) -> bool {
        self.waiting.values().flatten().any(|w| w.remaining > 0)
    }

    pub fn onboard_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    pub fn waiting_count(&self) -> u32 {
        self.waiting.values().flatten().map(|w| w.remaining).sum()
    }

    pub fn delivered(&self, group: DemandGroupId) -> u32 {
        self.delivered.get(&group).copied().unwrap_or(0)
    }

    pub fn missed(&self, group: DemandGroupId) -> u32 {
        self.missed.get(&group).copied().unwrap_or(0)
    }

    /// Waiting + onboard + delivered + missed for one demand group.
    ///
    /// Equals the group's seeded total for every accepted group.
    pub fn accounted_for(&self, group: DemandGroupId) -> u32 {
        let waiting: u32 = self
            .waiting
            .values()
            .flatten()
            .filter(|w| w.group == group)
            .map(|w| w.remaining)
            .sum();
        let onboard = self
            .seats
            .iter()
            .flatten()
            .filter(|p| p.group == group)
            .count() as u32;
        waiting + onboard + self.delivered(group) + self.missed(group)
    }

    /// Clears every seat in an open segment whose passenger is bound for `station`.
    ///
    /// Seats in closed segments keep their passengers even at their destination.
    pub fn alight(
        &mut self,
        station: StationId,
        composition: &VehicleComposition,
        open: &[SegmentId],
    ) -> u32 {
        let mut count = 0;
        for (slot, seat) in self.seats.iter_mut().enumerate() {
            let Some(passenger) = *seat else { continue };
            if passenger.dest != station {
                continue;
            }
            let door_open = composition
                .segment_of_slot(slot)
                .is_some_and(|segment| open.contains(&segment));
            if door_open {
                *self.delivered.entry(passenger.group).or_insert(0) += 1;
                *seat = None;
                count += 1;
            }
        }
        count
    }

    /// Fills empty seats from the groups queued at `station`.
    ///
    /// Each group only boards its own segment, lowest slot first, and only if
    /// that segment's doors are open. Emptied groups leave the ledger.
    pub fn board(
        &mut self,
        station: StationId,
        composition: &VehicleComposition,
        open: &[SegmentId],
    ) -> BoardingReport {
        let mut report = BoardingReport::default();
        let Some(groups) = self.waiting.get_mut(&station) else {
            return report;
        };

        for waiting in groups.iter_mut() {
            if !open.contains(&waiting.segment) {
                continue;
            }
            let Some(range) = composition.slot_range(waiting.segment) else {
                continue;
            };
            for seat in &mut self.seats[range] {
                if waiting.remaining == 0 {
                    break;
                }
                if seat.is_none() {
                    *seat = Some(Passenger {
                        group: waiting.group,
                        dest: waiting.dest,
                        color: waiting.color,
                    });
                    waiting.remaining -= 1;
                    report.boarded += 1;
                }
            }
            report.left_waiting += waiting.remaining;
        }

        groups.retain(|w| w.remaining > 0);
        if groups.is_empty() {
            self.waiting.remove(&station);
        }
        report
    }

    /// Empties the vehicle, booking anyone still aboard as missed
    pub fn clear_onboard(&mut self) -> u32 {
        let mut count = 0;
        for seat in &mut self.seats {
            if let Some(passenger) = seat.take() {
                *self.missed.entry(passenger.group).or_insert(0) += 1;
                count += 1;
            }
        }
        count
    }
}
