mod terminal;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use rail_sim::simulation::{RailWorld, SimConfig, SpeedFactor, VehicleMode};
use terminal::TerminalView;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Three segments with per-platform door rules
    Long,
    /// One segment, loops while demand is pending
    Short,
}

impl From<ModeArg> for VehicleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Long => VehicleMode::Long,
            ModeArg::Short => VehicleMode::Short,
        }
    }
}

#[derive(Parser)]
#[command(name = "rail_sim")]
#[command(about = "Headless rail line simulation")]
struct Cli {
    /// Number of frames to simulate
    #[arg(long, default_value = "1200")]
    ticks: u32,

    /// Wall-clock seconds per frame
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Vehicle composition
    #[arg(long, value_enum, default_value_t = ModeArg::Long)]
    mode: ModeArg,

    /// Playback speed multiplier (1, 2 or 4)
    #[arg(long, default_value = "1", value_parser = parse_speed)]
    speed: SpeedFactor,

    /// Frames between text renders (0 disables rendering)
    #[arg(long, default_value = "20")]
    report_every: u64,
}

fn parse_speed(value: &str) -> Result<SpeedFactor, String> {
    let multiplier: u32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", value))?;
    SpeedFactor::try_from(multiplier).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,rail_sim=info"))
        .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation without a renderer, printing a text view
fn run_headless(cli: &Cli) -> Result<()> {
    println!("Running rail simulation in headless mode...");
    println!(
        "Frames: {}, Delta: {}s, Mode: {:?}, Speed: {}",
        cli.ticks, cli.delta, cli.mode, cli.speed
    );
    println!();

    let config = SimConfig::default_line();
    let track_length = config.track_length;
    let mut world = RailWorld::new(config, cli.mode.into())?;
    let mut view = TerminalView::new(cli.report_every, world.stations(), track_length);

    println!("Initial state:");
    let initial = world.snapshot();
    view.print_summary(&initial);
    view.draw_track(&initial);

    world.set_speed(cli.speed);
    world.play();
    for _ in 0..cli.ticks {
        world.frame(cli.delta, &mut view);
    }

    println!("=== Final State ===");
    let last = world.snapshot();
    view.print_summary(&last);
    view.draw_track(&last);

    let stats = world.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Simulated time: {:.2}s", world.sim_time());
    info!("Frames: {}", stats.frames);
    info!("Stops made: {}", stats.stops);
    info!("Passengers boarded: {}", stats.boarded);
    info!("Passengers delivered: {}", stats.delivered);
    info!("Passengers missed: {}", stats.missed);
    info!("Capacity overflows: {}", stats.overflow_events);
    info!("Route loops: {}", stats.loops);
    info!("Route resets: {}", stats.resets);
    info!("Delivery rate: {:.1}%", stats.delivery_rate());
    Ok(())
}
