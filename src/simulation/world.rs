//! Main simulation world that ties everything together
//!
//! Owns the generated layout, the vehicle fleet, the weather field, and the
//! 24-hour clock. The host calls `tick` once per rendered frame; every
//! subsystem advances synchronously inside that call.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::layout::{generate_city, CityLayout, GridParams, LayoutError};
use super::sun::{evaluate, SunState};
use super::traffic::{advance_traffic, spawn_traffic, LightEmission, Vehicle};
use super::weather::{WeatherField, WeatherKind};

/// Simulated hours that pass per real second while the clock runs
const CLOCK_RATE: f32 = 0.5;
/// Frame deltas above this are clamped so a hitch cannot teleport vehicles
const MAX_FRAME_DELTA: f32 = 0.25;
/// Default weather intensity when a kind is first enabled
const DEFAULT_WEATHER_INTENSITY: f32 = 0.5;

/// The main simulation world
pub struct SimWorld {
    /// Static city, read-only after generation
    pub layout: CityLayout,

    /// Vehicle fleet, owned and mutated only by the traffic update
    pub vehicles: Vec<Vehicle>,

    /// Current weather particle field
    weather: WeatherField,

    /// Clock position in `[0, 24)` hours
    time_of_day: f32,

    /// External clear-sky multiplier for direct sunlight
    sun_intensity: f32,

    /// Lighting state recomputed every tick
    sun: SunState,

    /// When paused, the clock holds but traffic and weather keep moving
    pub clock_paused: bool,

    /// Total simulated seconds
    pub time: f32,

    rng: StdRng,
}

impl SimWorld {
    /// Build a world with fresh entropy
    pub fn new(params: &GridParams, vehicle_count: usize) -> Result<Self, LayoutError> {
        Self::build(params, vehicle_count, StdRng::from_os_rng())
    }

    /// Build a reproducible world from a seed
    pub fn with_seed(
        params: &GridParams,
        vehicle_count: usize,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        Self::build(params, vehicle_count, StdRng::seed_from_u64(seed))
    }

    fn build(
        params: &GridParams,
        vehicle_count: usize,
        mut rng: StdRng,
    ) -> Result<Self, LayoutError> {
        let layout = generate_city(params, &mut rng)?;
        let vehicles = spawn_traffic(vehicle_count, &layout, &mut rng);
        let weather = WeatherField::new(WeatherKind::None, layout.boundary, &mut rng);
        let time_of_day = 12.0;

        info!(
            "generated city: {} buildings, {} road segments, {} intersections, {} lanes, {} vehicles",
            layout.buildings.len(),
            layout.road_segments.len(),
            layout.intersections.len(),
            layout.lanes.len(),
            vehicles.len()
        );

        Ok(Self {
            layout,
            vehicles,
            weather,
            time_of_day,
            sun_intensity: 1.0,
            sun: evaluate(time_of_day, 1.0),
            clock_paused: false,
            time: 0.0,
            rng,
        })
    }

    /// Advance the whole simulation by one frame.
    ///
    /// `delta` is in seconds; negative or absurd values are clamped here so
    /// the per-frame path never fails.
    pub fn tick(&mut self, delta: f32) {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };

        if !self.clock_paused {
            self.time_of_day = (self.time_of_day + delta * CLOCK_RATE).rem_euclid(24.0);
        }

        advance_traffic(&mut self.vehicles, delta, self.layout.boundary);
        self.weather.advance(delta, &mut self.rng);
        self.sun = evaluate(self.time_of_day, self.sun_intensity);
        self.time += delta;
    }

    /// Swap in a freshly allocated particle field for the new kind.
    /// The old buffers are dropped whole; intensity carries over.
    pub fn set_weather(&mut self, kind: WeatherKind) {
        if kind == self.weather.kind() {
            return;
        }
        let intensity = if self.weather.kind() == WeatherKind::None {
            DEFAULT_WEATHER_INTENSITY
        } else {
            self.weather.intensity()
        };
        let mut field = WeatherField::new(kind, self.layout.boundary, &mut self.rng);
        field.set_intensity(intensity);
        self.weather = field;
        info!("weather set to {}", kind.name());
    }

    pub fn set_weather_intensity(&mut self, intensity: f32) {
        self.weather.set_intensity(intensity);
    }

    #[allow(dead_code)]
    pub fn weather(&self) -> &WeatherField {
        &self.weather
    }

    pub fn set_time_of_day(&mut self, time: f32) {
        self.time_of_day = time.rem_euclid(24.0);
        self.sun = evaluate(self.time_of_day, self.sun_intensity);
    }

    #[allow(dead_code)]
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    pub fn set_sun_intensity(&mut self, multiplier: f32) {
        self.sun_intensity = multiplier.max(0.0);
        self.sun = evaluate(self.time_of_day, self.sun_intensity);
    }

    /// Lighting state for the current frame
    #[allow(dead_code)]
    pub fn sun(&self) -> &SunState {
        &self.sun
    }

    #[allow(dead_code)]
    pub fn is_night(&self) -> bool {
        self.sun.is_night
    }

    /// Vehicle light colors for the current frame
    #[allow(dead_code)]
    pub fn light_emission(&self) -> LightEmission {
        LightEmission::for_night(self.sun.is_night)
    }

    /// Log a one-line status summary for headless runs
    pub fn print_summary(&self) {
        let hours = self.time_of_day.floor() as u32;
        let minutes = ((self.time_of_day - hours as f32) * 60.0).floor() as u32;
        info!(
            "t={:.1}s clock={:02}:{:02} {} | {} vehicles | weather {} ({}/{} particles visible) | sun direct {:.2} ambient {:.2}",
            self.time,
            hours,
            minutes,
            if self.sun.is_night { "night" } else { "day" },
            self.vehicles.len(),
            self.weather.kind().name(),
            self.weather.active_count(),
            self.weather.capacity(),
            self.sun.direct_intensity,
            self.sun.ambient_intensity,
        );
    }

    /// Draw a top-down ASCII map of the city and traffic in the terminal
    pub fn draw_map(&self) {
        let bound = self.layout.boundary;
        let scale = 1.0;
        let width = (2.0 * bound * scale) as usize + 1;
        let height = width;

        let mut grid = vec![vec![' '; width]; height];

        let to_grid = |x: f32, z: f32| -> (usize, usize) {
            let col = ((x + bound) * scale) as usize;
            let row = ((z + bound) * scale) as usize;
            (row.min(height - 1), col.min(width - 1))
        };

        // Road segments, stepped along their long axis
        for segment in &self.layout.road_segments {
            let along_x = segment.yaw.abs() < 0.01;
            let half = segment.scale[0] / 2.0;
            let mut d = -half;
            while d <= half {
                let (x, z) = if along_x {
                    (segment.position.x + d, segment.position.z)
                } else {
                    (segment.position.x, segment.position.z + d)
                };
                let (row, col) = to_grid(x, z);
                if grid[row][col] == ' ' {
                    grid[row][col] = if along_x { '-' } else { '|' };
                }
                d += 0.5;
            }
        }

        for intersection in &self.layout.intersections {
            let (row, col) = to_grid(intersection.position.x, intersection.position.z);
            grid[row][col] = '+';
        }

        for building in &self.layout.buildings {
            let (row, col) = to_grid(building.position.x, building.position.z);
            grid[row][col] = if building.is_tall() { 'H' } else { 'o' };
        }

        for vehicle in &self.vehicles {
            let (row, col) = to_grid(vehicle.position.x, vehicle.position.z);
            if grid[row][col] == ' ' || grid[row][col] == '-' || grid[row][col] == '|' {
                grid[row][col] = 'c';
            }
        }

        println!("\n=== City Map ===");
        println!("Legend: +=Intersection, H=Tower, o=Building, c=Vehicle, -/|=Road");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
