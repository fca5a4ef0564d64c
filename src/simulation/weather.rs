//! Weather particle systems
//!
//! Rain, snow, and wind each own a fixed-capacity particle buffer allocated
//! when the weather kind is configured. Particles are recycled in place when
//! they leave the active volume, never freed individually. Intensity maps to
//! a visible prefix of the buffer (the draw range); switching kind discards
//! the whole buffer and allocates a fresh one.

use rand::Rng;

use super::types::Position;

/// Rain uses the most particles; wind streaks are visually large so far
/// fewer are needed.
const RAIN_CAPACITY: usize = 15_000;
const SNOW_CAPACITY: usize = 10_000;
const WIND_CAPACITY: usize = 2_000;

/// Particles spawn from ground level up to this ceiling and recycle back to it
const CEILING_HEIGHT: f32 = 40.0;
/// Horizontal spawn extent relative to the layout boundary
const SPAWN_RANGE_FACTOR: f32 = 2.5;

/// Rain fall rate in units per frame at 60 ticks/second, plus per-frame jitter
const RAIN_FALL_RATE: f32 = 0.8;
const RAIN_FALL_JITTER: f32 = 0.1;

/// Wind velocity scales with intensity on top of the per-streak base speed
const WIND_INTENSITY_GAIN: f32 = 3.0;

/// Fraction of the buffer kept visible even at zero intensity
const MIN_VISIBLE_FRACTION: f32 = 0.1;

/// The closed set of weather types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherKind {
    #[default]
    None,
    Rain,
    Snow,
    Wind,
}

impl WeatherKind {
    fn capacity(self) -> usize {
        match self {
            WeatherKind::None => 0,
            WeatherKind::Rain => RAIN_CAPACITY,
            WeatherKind::Snow => SNOW_CAPACITY,
            WeatherKind::Wind => WIND_CAPACITY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherKind::None => "none",
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Wind => "wind",
        }
    }
}

impl std::str::FromStr for WeatherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "clear" => Ok(WeatherKind::None),
            "rain" => Ok(WeatherKind::Rain),
            "snow" => Ok(WeatherKind::Snow),
            "wind" => Ok(WeatherKind::Wind),
            other => Err(format!("unknown weather kind '{}'", other)),
        }
    }
}

/// A rain particle: falls at a constant rate, so only position is stored
#[derive(Debug, Clone, Copy)]
pub struct Raindrop {
    pub position: Position,
}

/// A snow particle with a persistent drift velocity drawn at allocation
#[derive(Debug, Clone, Copy)]
pub struct Snowflake {
    pub position: Position,
    /// Units per frame at 60 ticks/second
    pub velocity: [f32; 3],
}

/// A wind streak rendered as a line segment between two endpoints
#[derive(Debug, Clone, Copy)]
pub struct WindStreak {
    pub start: Position,
    pub end: Position,
    /// Units per frame at 60 ticks/second, before intensity scaling
    pub velocity: [f32; 3],
}

#[derive(Debug, Clone)]
enum ParticleBuffer {
    Empty,
    Rain(Vec<Raindrop>),
    Snow(Vec<Snowflake>),
    Wind(Vec<WindStreak>),
}

/// Owner of the particle buffers for one configured weather kind
#[derive(Debug, Clone)]
pub struct WeatherField {
    kind: WeatherKind,
    boundary: f32,
    intensity: f32,
    active_count: usize,
    buffer: ParticleBuffer,
}

impl WeatherField {
    /// Allocate buffers for the given kind. Capacity is fixed for the
    /// lifetime of the field; changing kind means building a new field.
    pub fn new(kind: WeatherKind, boundary: f32, rng: &mut impl Rng) -> Self {
        let range = boundary * SPAWN_RANGE_FACTOR;

        let buffer = match kind {
            WeatherKind::None => ParticleBuffer::Empty,
            WeatherKind::Rain => ParticleBuffer::Rain(
                (0..RAIN_CAPACITY)
                    .map(|_| Raindrop {
                        position: random_spawn_position(range, rng),
                    })
                    .collect(),
            ),
            WeatherKind::Snow => ParticleBuffer::Snow(
                (0..SNOW_CAPACITY)
                    .map(|_| Snowflake {
                        position: random_spawn_position(range, rng),
                        velocity: [
                            rng.random_range(-0.025..0.025),
                            -rng.random_range(0.05..0.1),
                            rng.random_range(-0.025..0.025),
                        ],
                    })
                    .collect(),
            ),
            WeatherKind::Wind => ParticleBuffer::Wind(
                (0..WIND_CAPACITY)
                    .map(|_| {
                        let start = random_spawn_position(range, rng);
                        let length = rng.random_range(2.0..5.0);
                        WindStreak {
                            start,
                            // Streaks extend toward +x; the wind blows toward -x
                            end: Position::new(start.x + length, start.y, start.z),
                            velocity: [
                                -rng.random_range(1.0..1.5),
                                rng.random_range(-0.025..0.025),
                                rng.random_range(-0.025..0.025),
                            ],
                        }
                    })
                    .collect(),
            ),
        };

        let mut field = Self {
            kind,
            boundary,
            intensity: 1.0,
            active_count: 0,
            buffer,
        };
        field.set_intensity(1.0);
        field
    }

    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Number of leading buffer entries the renderer should draw
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Map intensity to the visible draw range.
    ///
    /// A 10% floor keeps some effect visible even near zero intensity.
    /// Out-of-range values are clamped, never rejected.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
        let fraction = self.intensity.max(MIN_VISIBLE_FRACTION);
        self.active_count = (fraction * self.capacity() as f32).floor() as usize;
    }

    /// Visible rain particles, empty unless configured for rain
    #[allow(dead_code)]
    pub fn visible_raindrops(&self) -> &[Raindrop] {
        match &self.buffer {
            ParticleBuffer::Rain(drops) => &drops[..self.active_count],
            _ => &[],
        }
    }

    /// Visible snow particles, empty unless configured for snow
    #[allow(dead_code)]
    pub fn visible_snowflakes(&self) -> &[Snowflake] {
        match &self.buffer {
            ParticleBuffer::Snow(flakes) => &flakes[..self.active_count],
            _ => &[],
        }
    }

    /// Visible wind streaks, empty unless configured for wind
    #[allow(dead_code)]
    pub fn visible_streaks(&self) -> &[WindStreak] {
        match &self.buffer {
            ParticleBuffer::Wind(streaks) => &streaks[..self.active_count],
            _ => &[],
        }
    }

    /// Advance all particles by one frame.
    ///
    /// The whole buffer is simulated, not just the draw range, so raising
    /// the intensity never reveals stale particles.
    pub fn advance(&mut self, delta: f32, rng: &mut impl Rng) {
        let frame_scale = delta * 60.0;
        let range = self.boundary * SPAWN_RANGE_FACTOR;

        match &mut self.buffer {
            ParticleBuffer::Empty => {}
            ParticleBuffer::Rain(drops) => {
                for drop in drops {
                    let fall = RAIN_FALL_RATE + rng.random_range(0.0..RAIN_FALL_JITTER);
                    drop.position.y -= fall * frame_scale;
                    // Recycle to the ceiling, keeping the horizontal column
                    if drop.position.y < 0.0 {
                        drop.position.y = CEILING_HEIGHT;
                    }
                }
            }
            ParticleBuffer::Snow(flakes) => {
                for flake in flakes {
                    flake.position.x += flake.velocity[0] * frame_scale;
                    flake.position.y += flake.velocity[1] * frame_scale;
                    flake.position.z += flake.velocity[2] * frame_scale;

                    if flake.position.y < 0.0 {
                        flake.position.y = CEILING_HEIGHT;
                        flake.position.x = rng.random_range(-range / 2.0..range / 2.0);
                        flake.position.z = rng.random_range(-range / 2.0..range / 2.0);
                    }
                }
            }
            ParticleBuffer::Wind(streaks) => {
                let gust = self.intensity * WIND_INTENSITY_GAIN;
                for streak in streaks {
                    let vx = streak.velocity[0] * gust * frame_scale;
                    let vy = streak.velocity[1] * frame_scale;
                    let vz = streak.velocity[2] * frame_scale;

                    streak.start.x += vx;
                    streak.start.y += vy;
                    streak.start.z += vz;
                    streak.end.x += vx;
                    streak.end.y += vy;
                    streak.end.z += vz;

                    // The trailing endpoint is the +x one; once it clears the
                    // far edge, respawn the whole streak beyond the near edge
                    if streak.end.x < -range / 2.0 {
                        let x = range / 2.0 + rng.random_range(0.0..10.0);
                        let y = rng.random_range(0.0..CEILING_HEIGHT);
                        let z = rng.random_range(-range / 2.0..range / 2.0);
                        let length = rng.random_range(2.0..5.0);

                        streak.start = Position::new(x, y, z);
                        streak.end = Position::new(x + length, y, z);
                    }
                }
            }
        }
    }
}

fn random_spawn_position(range: f32, rng: &mut impl Rng) -> Position {
    Position::new(
        rng.random_range(-range / 2.0..range / 2.0),
        rng.random_range(0.0..CEILING_HEIGHT),
        rng.random_range(-range / 2.0..range / 2.0),
    )
}
