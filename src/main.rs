mod simulation;

use anyhow::Result;
use clap::Parser;

use simulation::{GridParams, SimWorld, WeatherKind};

#[derive(Parser)]
#[command(name = "urban_pulse")]
#[command(about = "Procedural city simulation: traffic, daylight, and weather")]
struct Cli {
    /// Number of city blocks per side
    #[arg(long, default_value = "12")]
    grid_size: u32,

    /// Side length of a building block in world units
    #[arg(long, default_value = "2.0")]
    block_size: f32,

    /// Width of the roads between blocks
    #[arg(long, default_value = "1.2")]
    road_width: f32,

    /// Number of vehicles to spawn
    #[arg(long, default_value = "150")]
    vehicles: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.016")]
    delta: f32,

    /// Seed for reproducible layout and traffic
    #[arg(long)]
    seed: Option<u64>,

    /// Weather to simulate: none, rain, snow, or wind
    #[arg(long, default_value = "none")]
    weather: WeatherKind,

    /// Weather intensity from 0 to 1
    #[arg(long, default_value = "0.5")]
    intensity: f32,

    /// Starting time of day in hours (0-24)
    #[arg(long, default_value = "12.0")]
    time: f32,

    /// Clear-sky sun brightness multiplier
    #[arg(long, default_value = "1.0")]
    sun: f32,

    /// Draw an ASCII map of the city before and after the run
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = GridParams::new(cli.grid_size, cli.block_size, cli.road_width);
    let mut world = match cli.seed {
        Some(seed) => SimWorld::with_seed(&params, cli.vehicles, seed)?,
        None => SimWorld::new(&params, cli.vehicles)?,
    };

    world.set_time_of_day(cli.time);
    world.set_sun_intensity(cli.sun);
    world.set_weather(cli.weather);
    world.set_weather_intensity(cli.intensity);

    println!(
        "Running city simulation: {} ticks at {}s per tick",
        cli.ticks, cli.delta
    );

    world.print_summary();
    if cli.map {
        world.draw_map();
    }

    // Log a summary once per simulated second
    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;

    let mut tick = 0;
    while tick < cli.ticks {
        let batch = ticks_per_second.min(cli.ticks - tick);
        for _ in 0..batch {
            tick += 1;
            world.tick(cli.delta);
        }
        world.print_summary();
    }

    println!("=== Final State ===");
    world.print_summary();
    if cli.map {
        world.draw_map();
    }

    Ok(())
}
