//! Station stop tests
//!
//! Drives small hand-built lines through complete dwell cycles and checks
//! door, alighting and boarding behavior.

use rail_sim::simulation::{
    Alignment, DemandGroup, DemandGroupId, DwellPhase, DwellTiming, RailWorld, SegmentId,
    SimConfig, SpeedFactor, Station, StationId, StatusMessage, TickOutcome, VehicleMode,
};

const FRAME: f32 = 0.05;

fn line(stations: Vec<Station>, demand: Vec<DemandGroup>) -> SimConfig {
    SimConfig {
        track_length: 1000.0,
        base_speed: 120.0,
        stations,
        demand,
        timing: DwellTiming::default(),
    }
}

fn started(config: SimConfig, mode: VehicleMode) -> RailWorld {
    let mut world = RailWorld::new(config, mode).expect("valid test line");
    world.play();
    world
}

/// Ticks until `done` holds; panics if it never does
fn run_until(world: &mut RailWorld, mut done: impl FnMut(&RailWorld, TickOutcome) -> bool) {
    for _ in 0..20_000 {
        let outcome = world.tick(FRAME);
        if done(world, outcome) {
            return;
        }
    }
    panic!("condition never reached");
}

fn run_until_phase(world: &mut RailWorld, station: u32, phase: DwellPhase) {
    run_until(world, |w, outcome| {
        let at = w.docked_station().or(w.last_departed());
        outcome == TickOutcome::PhaseFired(phase) && at == Some(StationId(station))
    });
}

fn seat_dests(world: &RailWorld) -> Vec<Option<u32>> {
    world
        .ledger()
        .seats()
        .iter()
        .map(|seat| seat.map(|p| p.dest.0))
        .collect()
}

#[test]
fn rear_station_fills_rear_segment() {
    let config = line(
        vec![
            Station::new(1, "Quayside", 100.0, Alignment::Rear),
            Station::new(3, "Central", 500.0, Alignment::Rear),
        ],
        vec![DemandGroup::new(1, 3, 3, SegmentId::Rear)],
    );
    let mut world = started(config, VehicleMode::Long);

    run_until_phase(&mut world, 1, DwellPhase::Departed);

    let seats = seat_dests(&world);
    assert_eq!(&seats[0..3], &[Some(3), Some(3), Some(3)]);
    assert!(seats[3..].iter().all(Option::is_none));
    assert!(world.ledger().waiting_at(StationId(1)).is_empty());
    assert!(!world.ledger().waiting().contains_key(&StationId(1)));
}

#[test]
fn short_vehicle_overflow_leaves_remainder_queued() {
    let config = line(
        vec![
            Station::new(1, "Quayside", 100.0, Alignment::Rear),
            Station::new(2, "Market Street", 500.0, Alignment::Rear),
        ],
        vec![DemandGroup::new(1, 2, 10, SegmentId::Mid)],
    );
    let mut world = started(config, VehicleMode::Short);

    run_until(&mut world, |_, outcome| {
        outcome == TickOutcome::PhaseFired(DwellPhase::Boarding)
    });

    assert_eq!(
        world.status(),
        &StatusMessage::CapacityOverflow {
            station: "Quayside".to_string(),
            boarded: 7,
            left_waiting: 3,
        }
    );
    assert_eq!(world.ledger().onboard_count(), 7);
    let waiting = world.ledger().waiting_at(StationId(1));
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].remaining, 3);
    assert_eq!(waiting[0].segment, SegmentId::Single);
    assert_eq!(world.stats().overflow_events, 1);
}

#[test]
fn front_station_keeps_rear_passengers_aboard() {
    let config = line(
        vec![
            Station::new(1, "Quayside", 100.0, Alignment::Rear),
            Station::new(2, "Market Street", 500.0, Alignment::Front),
        ],
        vec![
            DemandGroup::new(1, 2, 3, SegmentId::Rear),
            DemandGroup::new(1, 2, 4, SegmentId::Mid),
        ],
    );
    let mut world = started(config, VehicleMode::Long);

    run_until_phase(&mut world, 2, DwellPhase::Alighting);

    assert_eq!(world.open_segments(), &[SegmentId::Mid, SegmentId::Front]);
    assert_eq!(
        world.status(),
        &StatusMessage::Alighted {
            station: "Market Street".to_string(),
            count: 4,
        }
    );
    assert_eq!(world.ledger().delivered(DemandGroupId(0)), 0);
    assert_eq!(world.ledger().delivered(DemandGroupId(1)), 4);

    let seats = seat_dests(&world);
    assert_eq!(&seats[0..3], &[Some(2), Some(2), Some(2)]);
    assert!(seats[3..7].iter().all(Option::is_none));
}

#[test]
fn closed_segment_group_never_boards() {
    let config = line(
        vec![
            Station::new(1, "Quayside", 100.0, Alignment::Front),
            Station::new(2, "Market Street", 500.0, Alignment::Rear),
        ],
        vec![
            DemandGroup::new(1, 2, 3, SegmentId::Rear),
            DemandGroup::new(1, 2, 2, SegmentId::Mid),
        ],
    );
    let mut world = started(config, VehicleMode::Long);

    run_until_phase(&mut world, 1, DwellPhase::Boarding);

    assert_eq!(
        world.status(),
        &StatusMessage::Boarded {
            station: "Quayside".to_string(),
            count: 2,
        }
    );
    let waiting = world.ledger().waiting_at(StationId(1));
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].segment, SegmentId::Rear);
    assert_eq!(waiting[0].remaining, 3);

    let seats = seat_dests(&world);
    assert!(seats[0..3].iter().all(Option::is_none));
    assert_eq!(&seats[3..5], &[Some(2), Some(2)]);
}

#[test]
fn phases_fire_once_in_order() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);

    let mut fired = Vec::new();
    run_until(&mut world, |_, outcome| match outcome {
        TickOutcome::Arrived(_) => {
            fired.push(DwellPhase::Arrived);
            false
        }
        TickOutcome::PhaseFired(phase) => {
            fired.push(phase);
            phase == DwellPhase::Departed
        }
        _ => false,
    });

    assert_eq!(fired, DwellPhase::ORDER.to_vec());
}

#[test]
fn doors_follow_the_dwell_phases() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);

    run_until(&mut world, |_, outcome| matches!(outcome, TickOutcome::Arrived(_)));
    assert!(!world.doors_open());
    assert!(matches!(world.status(), StatusMessage::Arriving { .. }));

    run_until(&mut world, |_, outcome| {
        outcome == TickOutcome::PhaseFired(DwellPhase::DoorsOpen)
    });
    assert!(world.doors_open());
    assert_eq!(world.open_segments(), &[SegmentId::Rear, SegmentId::Mid]);

    run_until(&mut world, |_, outcome| {
        outcome == TickOutcome::PhaseFired(DwellPhase::DoorsClosing)
    });
    assert!(!world.doors_open());
    assert!(world.open_segments().is_empty());
    assert!(world.docked_station().is_some());

    run_until(&mut world, |_, outcome| {
        outcome == TickOutcome::PhaseFired(DwellPhase::Departed)
    });
    assert!(world.docked_station().is_none());
    assert_eq!(world.tick(FRAME), TickOutcome::Moved);
}

#[test]
fn pause_freezes_the_dwell_timer() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);
    run_until(&mut world, |_, outcome| matches!(outcome, TickOutcome::Arrived(_)));

    world.pause();
    for _ in 0..100 {
        assert_eq!(world.tick(1.0), TickOutcome::Paused);
    }
    assert_eq!(world.snapshot().dwell_phase, Some(DwellPhase::Arrived));
    assert_eq!(world.status(), &StatusMessage::Paused);

    world.play();
    assert!(matches!(world.status(), StatusMessage::Arriving { .. }));
    // 0.4s of dwell time: still short of the doors threshold
    for _ in 0..8 {
        assert_eq!(world.tick(FRAME), TickOutcome::Dwelling);
    }
    assert!(!world.doors_open());
}

#[test]
fn speed_factor_scales_dwell_thresholds() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);
    run_until(&mut world, |_, outcome| matches!(outcome, TickOutcome::Arrived(_)));

    world.set_speed(SpeedFactor::X4);
    assert_eq!(world.tick(0.1), TickOutcome::Dwelling);
    assert_eq!(
        world.tick(0.1),
        TickOutcome::PhaseFired(DwellPhase::DoorsOpen)
    );
}

#[test]
fn clock_regression_does_not_rewind_phases() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);
    run_until(&mut world, |_, outcome| {
        outcome == TickOutcome::PhaseFired(DwellPhase::Alighting)
    });

    let before = world.snapshot();
    assert_eq!(world.tick(-5.0), TickOutcome::Dwelling);
    assert_eq!(world.tick(f32::NAN), TickOutcome::Dwelling);
    let after = world.snapshot();
    assert_eq!(after.dwell_phase, Some(DwellPhase::Alighting));
    assert_eq!(after.seats, before.seats);
    assert_eq!(after.position_x, before.position_x);
}

#[test]
fn doors_stay_shut_when_a_frame_overshoots_the_dwell_window() {
    let mut world = started(SimConfig::default_line(), VehicleMode::Long);
    assert_eq!(world.tick(5.0), TickOutcome::Arrived(StationId(1)));
    let waiting = world.ledger().waiting_count();

    // A single frame lands past the door-close threshold
    assert_eq!(
        world.tick(4.0),
        TickOutcome::PhaseFired(DwellPhase::DoorsOpen)
    );
    assert!(!world.doors_open());
    assert!(world.open_segments().is_empty());

    assert_eq!(
        world.tick(FRAME),
        TickOutcome::PhaseFired(DwellPhase::Alighting)
    );
    assert_eq!(
        world.tick(FRAME),
        TickOutcome::PhaseFired(DwellPhase::Boarding)
    );
    assert_eq!(world.ledger().onboard_count(), 0);
    assert_eq!(world.ledger().waiting_count(), waiting);

    run_until_phase(&mut world, 1, DwellPhase::Departed);
    assert_eq!(world.stats().boarded, 0);
}
