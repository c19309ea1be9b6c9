//! Text view of the simulation for headless runs
//!
//! Purely a consumer of snapshots; it keeps no simulation state of its own.

use rail_sim::simulation::{
    Alignment, Snapshot, SnapshotSink, StationRegistry, VehicleComposition,
};

const TRACK_COLUMNS: usize = 100;

struct StationMark {
    near: f32,
    far: f32,
    symbol: char,
    name: String,
}

pub struct TerminalView {
    every: u64,
    track_length: f32,
    stations: Vec<StationMark>,
}

impl TerminalView {
    /// Renders every `every` frames; zero turns rendering off
    pub fn new(every: u64, stations: &StationRegistry, track_length: f32) -> Self {
        let stations = stations
            .iter()
            .map(|s| StationMark {
                near: s.position,
                far: s.platform_far_edge(),
                symbol: match s.alignment {
                    Alignment::Rear => 'R',
                    Alignment::Front => 'F',
                    Alignment::All => 'A',
                },
                name: s.name.clone(),
            })
            .collect();
        Self {
            every,
            track_length,
            stations,
        }
    }

    fn column(&self, x: f32) -> Option<usize> {
        if x < 0.0 || x > self.track_length {
            return None;
        }
        let col = (x / self.track_length * (TRACK_COLUMNS - 1) as f32) as usize;
        Some(col.min(TRACK_COLUMNS - 1))
    }

    pub fn print_summary(&self, snapshot: &Snapshot) {
        println!("=== Rail Simulation Summary ===");
        println!(
            "Frame: {} | Mode: {} | Speed: {} | {}",
            snapshot.frame,
            snapshot.mode,
            snapshot.speed,
            if snapshot.is_running { "running" } else { "paused" }
        );
        println!("Position: {:.1}", snapshot.position_x);
        println!("Status: {}", snapshot.status);
        if let Some(phase) = snapshot.dwell_phase {
            println!(
                "Docked: station {} ({}), doors {}",
                snapshot
                    .docked_station
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                phase,
                if snapshot.doors_open { "open" } else { "closed" }
            );
        }

        println!("--- Waiting ---");
        for (station, groups) in &snapshot.waiting {
            for group in groups {
                println!(
                    "  Station {}: {} for {} ({})",
                    station, group.remaining, group.dest, group.segment
                );
            }
        }
        println!("--- Stats ---");
        println!("  {}", snapshot.stats.summary());
    }

    pub fn draw_track(&self, snapshot: &Snapshot) {
        let mut track = vec!['-'; TRACK_COLUMNS];
        let mut labels = vec![' '; TRACK_COLUMNS];

        for mark in &self.stations {
            if let (Some(start), Some(end)) = (self.column(mark.near), self.column(mark.far)) {
                for cell in &mut track[start..=end] {
                    *cell = '=';
                }
                labels[start] = mark.symbol;
            }
        }

        let mut vehicle = vec![' '; TRACK_COLUMNS];
        let tail = (snapshot.position_x - snapshot.vehicle_length).max(0.0);
        if let (Some(start), Some(end)) = (self.column(tail), self.column(snapshot.position_x)) {
            for cell in &mut vehicle[start..=end] {
                *cell = '#';
            }
        }

        println!();
        println!("=== Line ===");
        println!("Legend: R/F/A=platform alignment, ==platform, #=vehicle");
        println!("{}", vehicle.iter().collect::<String>());
        println!("{}", track.iter().collect::<String>());
        println!("{}", labels.iter().collect::<String>());
        let names: Vec<&str> = self.stations.iter().map(|m| m.name.as_str()).collect();
        println!("Stations: {}", names.join(" -> "));

        // Seat row, rear to front, one cell per slot showing the destination
        let composition = VehicleComposition::for_mode(snapshot.mode);
        let mut seats = String::from("[");
        for (slot, seat) in snapshot.seats.iter().enumerate() {
            if slot > 0 && composition.segment_of_slot(slot) != composition.segment_of_slot(slot - 1) {
                seats.push('|');
            }
            match seat {
                Some(passenger) => seats.push_str(&format!("{:>2}", passenger.dest.0)),
                None => seats.push_str(" ."),
            }
        }
        seats.push_str(" ]");
        println!("Seats: {}", seats);
        println!();
    }
}

impl SnapshotSink for TerminalView {
    fn publish(&mut self, snapshot: &Snapshot) {
        if self.every == 0 || snapshot.frame % self.every != 0 {
            return;
        }
        self.print_summary(snapshot);
        self.draw_track(snapshot);
    }
}
