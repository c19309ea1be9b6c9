//! Main rail simulation world that ties everything together
//!
//! `RailWorld` owns all engine state. Each frame the clock decides whether
//! time passes; if it does, exactly one operation runs: the motion integrator
//! while underway, or one dwell-phase check while docked.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::clock::SimClock;
use super::composition::VehicleComposition;
use super::config::SimConfig;
use super::demand::DemandModel;
use super::dwell::{DwellCycle, DwellPhase};
use super::ledger::PassengerLedger;
use super::motion::{MotionIntegrator, MotionOutcome};
use super::snapshot::{Snapshot, SnapshotSink, StatusMessage};
use super::station::StationRegistry;
use super::stats::RunStats;
use super::types::{SegmentId, SpeedFactor, StationId, VehicleMode};

/// The single operation a frame performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock stopped, nothing ran
    Paused,
    /// Underway, no stop reached
    Moved,
    /// Snapped onto a station's stop target
    Arrived(StationId),
    /// Docked, waiting for the next phase threshold
    Dwelling,
    PhaseFired(DwellPhase),
    /// End of track; ledger kept, vehicle emptied and rewound
    RouteLooped,
    /// End of track; everything reseeded
    RouteReset,
}

/// The rail simulation engine
pub struct RailWorld {
    config: SimConfig,
    stations: StationRegistry,
    demand: DemandModel,
    composition: VehicleComposition,
    ledger: PassengerLedger,
    motion: MotionIntegrator,
    dwell: Option<DwellCycle>,
    clock: SimClock,
    doors_open: bool,
    open_segments: Vec<SegmentId>,
    status: StatusMessage,
    /// Status shown before the last pause, restored on play
    resume_status: Option<StatusMessage>,
    stats: RunStats,
}

impl RailWorld {
    /// Builds an engine from a validated configuration; starts paused.
    pub fn new(config: SimConfig, mode: VehicleMode) -> Result<Self> {
        config
            .validate()
            .context("Invalid rail simulation configuration")?;

        let stations = StationRegistry::new(config.stations.clone());
        let demand = DemandModel::new(config.demand.clone());
        let composition = VehicleComposition::for_mode(mode);
        let ledger = PassengerLedger::seeded(&demand, &stations, &composition);

        let world = Self {
            config,
            stations,
            demand,
            composition,
            ledger,
            motion: MotionIntegrator::new(),
            dwell: None,
            clock: SimClock::new(),
            doors_open: false,
            open_segments: Vec::new(),
            status: StatusMessage::Ready,
            resume_status: None,
            stats: RunStats::default(),
        };
        world.log_rejected_demand();
        Ok(world)
    }

    /// The built-in line
    pub fn with_default_line(mode: VehicleMode) -> Result<Self> {
        Self::new(SimConfig::default_line(), mode)
    }

    fn log_rejected_demand(&self) {
        for rejection in self.demand.rejections(&self.stations, &self.composition) {
            warn!(
                "Dropping demand group {} in {} mode: {}",
                rejection.group.0,
                self.composition.mode(),
                rejection.reason
            );
        }
    }

    // Input surface

    pub fn play(&mut self) {
        self.clock.set_running(true);
        match self.status {
            StatusMessage::Paused => {
                self.status = self.resume_status.take().unwrap_or(StatusMessage::Running);
            }
            StatusMessage::Ready => self.status = StatusMessage::Running,
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        self.clock.set_running(false);
        if self.status != StatusMessage::Paused {
            self.resume_status = Some(std::mem::replace(&mut self.status, StatusMessage::Paused));
        }
    }

    /// Full reinitialization from the seed; leaves the vehicle paused
    pub fn reset(&mut self) {
        self.clock.set_running(false);
        self.reinitialize();
        self.status = StatusMessage::Ready;
        self.resume_status = None;
        info!("Simulation reset in {} mode", self.composition.mode());
    }

    /// Takes effect from the next frame
    pub fn set_speed(&mut self, speed: SpeedFactor) {
        self.clock.set_speed(speed);
    }

    /// Switching modes always reinitializes; the current mode is a no-op
    pub fn set_vehicle_mode(&mut self, mode: VehicleMode) {
        if mode == self.composition.mode() {
            return;
        }
        info!("Switching vehicle to {} mode", mode);
        self.composition = VehicleComposition::for_mode(mode);
        self.reinitialize();
        self.log_rejected_demand();
        self.resume_status = None;
        self.status = if self.clock.is_running() {
            StatusMessage::Running
        } else {
            StatusMessage::Ready
        };
    }

    fn reinitialize(&mut self) {
        self.ledger = PassengerLedger::seeded(&self.demand, &self.stations, &self.composition);
        self.motion.rewind();
        self.dwell = None;
        self.close_doors();
    }

    fn close_doors(&mut self) {
        self.doors_open = false;
        self.open_segments.clear();
    }

    // Frame driver

    /// Advances one frame by `wall_delta` seconds of wall time
    pub fn tick(&mut self, wall_delta: f32) -> TickOutcome {
        let sim_delta = self.clock.advance(wall_delta);
        self.stats.frames = self.clock.frame();
        let Some(sim_delta) = sim_delta else {
            return TickOutcome::Paused;
        };

        if self.dwell.is_some() {
            self.step_dwell(sim_delta)
        } else {
            self.step_motion(sim_delta)
        }
    }

    /// Advances one frame and publishes the resulting snapshot
    pub fn frame<S: SnapshotSink + ?Sized>(&mut self, wall_delta: f32, sink: &mut S) -> TickOutcome {
        let outcome = self.tick(wall_delta);
        sink.publish(&self.snapshot());
        outcome
    }

    fn step_motion(&mut self, sim_delta: f32) -> TickOutcome {
        let outcome = self.motion.advance(
            self.config.base_speed * sim_delta,
            &self.stations,
            self.composition.length(),
            self.config.track_length,
        );

        match outcome {
            MotionOutcome::Moved => {
                self.status = StatusMessage::Running;
                TickOutcome::Moved
            }
            MotionOutcome::Arrived(station) => {
                let name = self.stations.name_of(station);
                info!("Arriving at {} (x={:.1})", name, self.motion.position());
                self.dwell = Some(DwellCycle::arrive(station));
                self.close_doors();
                self.stats.stops += 1;
                self.status = StatusMessage::Arriving { station: name };
                TickOutcome::Arrived(station)
            }
            MotionOutcome::RouteComplete => self.complete_route(),
        }
    }

    fn complete_route(&mut self) -> TickOutcome {
        if self.composition.mode() == VehicleMode::Short && self.ledger.any_waiting() {
            let missed = self.ledger.clear_onboard();
            self.stats.missed += missed;
            self.stats.loops += 1;
            self.motion.rewind();
            self.close_doors();
            self.status = StatusMessage::RouteLooped;
            info!(
                "Route complete with {} still waiting; dispatching again",
                self.ledger.waiting_count()
            );
            TickOutcome::RouteLooped
        } else {
            self.reinitialize();
            self.stats.resets += 1;
            self.status = StatusMessage::RouteReset;
            info!("Route complete; demand reset from seed");
            TickOutcome::RouteReset
        }
    }

    fn step_dwell(&mut self, sim_delta: f32) -> TickOutcome {
        let Some(cycle) = self.dwell.as_mut() else {
            return TickOutcome::Dwelling;
        };
        let Some(phase) = cycle.advance(sim_delta, &self.config.timing) else {
            return TickOutcome::Dwelling;
        };
        let station = cycle.station();
        let elapsed = cycle.elapsed();
        let name = self.stations.name_of(station);
        debug!("Dwell phase '{}' at {} (t={:.2}s)", phase, name, elapsed);

        match phase {
            // Entered on arrival, never returned by `advance`
            DwellPhase::Arrived => {}
            // Doors only open inside the dwell window; past it they stay
            // shut and the remaining phases run against an empty door set
            DwellPhase::DoorsOpen if elapsed >= self.config.timing.dwell_duration => {
                warn!(
                    "Dwell window at {} already over (t={:.2}s); doors stay shut",
                    name, elapsed
                );
                self.close_doors();
            }
            DwellPhase::DoorsOpen => {
                let alignment = self.stations.get(station).map(|s| s.alignment);
                if let Some(alignment) = alignment {
                    self.open_segments = self.composition.open_segments(alignment).to_vec();
                    self.doors_open = true;
                }
                self.status = StatusMessage::DoorsOpen { station: name };
            }
            DwellPhase::Alighting => {
                let count = self
                    .ledger
                    .alight(station, &self.composition, &self.open_segments);
                self.stats.delivered += count;
                self.status = StatusMessage::Alighted {
                    station: name,
                    count,
                };
            }
            DwellPhase::Boarding => {
                let report = self
                    .ledger
                    .board(station, &self.composition, &self.open_segments);
                self.stats.boarded += report.boarded;
                self.status = if report.left_waiting > 0 {
                    self.stats.overflow_events += 1;
                    info!(
                        "Vehicle full at {}: {} boarded, {} left waiting",
                        name, report.boarded, report.left_waiting
                    );
                    StatusMessage::CapacityOverflow {
                        station: name,
                        boarded: report.boarded,
                        left_waiting: report.left_waiting,
                    }
                } else {
                    StatusMessage::Boarded {
                        station: name,
                        count: report.boarded,
                    }
                };
            }
            DwellPhase::DoorsClosing => {
                self.close_doors();
                self.status = StatusMessage::DoorsClosing { station: name };
            }
            DwellPhase::Departed => {
                self.motion.mark_departed(station);
                self.dwell = None;
                info!("Departing {}", name);
                self.status = StatusMessage::Departing { station: name };
            }
        }
        TickOutcome::PhaseFired(phase)
    }

    // Output surface

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.clock.frame(),
            position_x: self.motion.position(),
            vehicle_length: self.composition.length(),
            docked_station: self.docked_station(),
            doors_open: self.doors_open,
            open_segments: self.open_segments.clone(),
            seats: self.ledger.seats().to_vec(),
            waiting: self.ledger.waiting().clone(),
            status: self.status.clone(),
            is_running: self.clock.is_running(),
            speed: self.clock.speed(),
            mode: self.composition.mode(),
            dwell_phase: self.dwell.as_ref().map(DwellCycle::phase),
            stats: self.stats,
        }
    }

    pub fn position(&self) -> f32 {
        self.motion.position()
    }

    pub fn docked_station(&self) -> Option<StationId> {
        self.dwell.as_ref().map(DwellCycle::station)
    }

    /// Station the vehicle most recently left, until it docks again
    pub fn last_departed(&self) -> Option<StationId> {
        self.motion.last_departed()
    }

    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    pub fn open_segments(&self) -> &[SegmentId] {
        &self.open_segments
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn speed(&self) -> SpeedFactor {
        self.clock.speed()
    }

    pub fn mode(&self) -> VehicleMode {
        self.composition.mode()
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn ledger(&self) -> &PassengerLedger {
        &self.ledger
    }

    pub fn composition(&self) -> &VehicleComposition {
        &self.composition
    }

    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    pub fn demand(&self) -> &DemandModel {
        &self.demand
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn sim_time(&self) -> f32 {
        self.clock.sim_time()
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn check_conservation(world: &RailWorld) -> std::result::Result<(), TestCaseError> {
        let stations = world.stations();
        let composition = world.composition();
        let rejected: Vec<_> = world
            .demand()
            .rejections(stations, composition)
            .into_iter()
            .map(|r| r.group)
            .collect();
        for (id, group) in world.demand().groups() {
            if rejected.contains(&id) {
                continue;
            }
            prop_assert_eq!(world.ledger().accounted_for(id), group.total);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn passengers_are_conserved(
            deltas in prop::collection::vec(0.0_f32..0.25_f32, 1..600),
            speed in prop::sample::select(vec![1_u32, 2, 4]),
            short in any::<bool>(),
        ) {
            let mode = if short { VehicleMode::Short } else { VehicleMode::Long };
            let mut world = RailWorld::with_default_line(mode).unwrap();
            world.set_speed(SpeedFactor::try_from(speed).unwrap());
            world.play();
            for delta in deltas {
                world.tick(delta);
                check_conservation(&world)?;
            }
        }
    }
}
