//! Day/night solar model
//!
//! Maps a 24-hour clock to a sun position and lighting parameters. The
//! evaluation is a pure function of time and the external brightness
//! multiplier; it carries no state between frames.

use super::types::{Position, Rgb};

/// Orbital radius of the sun around the city
const SUN_RADIUS: f32 = 100.0;
/// Fixed z offset so shadows never fall perfectly straight down
const SUN_Z_OFFSET: f32 = 20.0;
/// Sun height below which the scene counts as night
const NIGHT_SUN_HEIGHT: f32 = -5.0;
/// Sun height below which twilight gives way to full night
const TWILIGHT_FLOOR: f32 = -10.0;
/// Direct light reaches full strength once the sun is this high
const FULL_DAYLIGHT_HEIGHT: f32 = 20.0;
/// Direct intensity cap at full daylight
const DAYLIGHT_INTENSITY: f32 = 1.5;

const FOG_NIGHT: Rgb = Rgb::new(0.020, 0.020, 0.063);
const FOG_DAY: Rgb = Rgb::new(0.878, 0.949, 0.996);

/// Lighting parameters for one frame, consumed by the renderer
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct SunState {
    pub position: Position,
    pub light_color: Rgb,
    pub direct_intensity: f32,
    pub ambient_intensity: f32,
    pub fog_color: Rgb,
    pub is_night: bool,
}

/// Evaluate the solar model at the given time of day.
///
/// `time_of_day` wraps into `[0, 24)`; sunrise sits at 06:00 and the zenith
/// at noon. `intensity_multiplier` scales direct light only, letting an
/// external clear-sky control dim the sun independent of the clock.
pub fn evaluate(time_of_day: f32, intensity_multiplier: f32) -> SunState {
    let time = time_of_day.rem_euclid(24.0);
    let multiplier = intensity_multiplier.max(0.0);

    let angle = (time - 6.0) / 24.0 * std::f32::consts::TAU;
    let sun_x = angle.cos() * SUN_RADIUS;
    let sun_y = angle.sin() * SUN_RADIUS;

    let is_night = sun_y < NIGHT_SUN_HEIGHT;

    let (base_intensity, ambient_intensity, light_color) = if sun_y > 0.0 {
        // Day: direct light fades in as the sun climbs
        let ramp = (sun_y / FULL_DAYLIGHT_HEIGHT).min(1.0);
        (
            DAYLIGHT_INTENSITY * ramp,
            0.4,
            Rgb::from_hsl(0.1, 0.1, 0.95),
        )
    } else if sun_y > TWILIGHT_FLOOR {
        // Twilight: no direct light, orange ambient tint
        (0.0, 0.15, Rgb::from_hsl(0.05, 0.5, 0.5))
    } else {
        // Night: blue moonlight ambient only
        (0.0, 0.05, Rgb::from_hsl(0.6, 0.5, 0.1))
    };

    SunState {
        position: Position::new(sun_x, sun_y, SUN_Z_OFFSET),
        light_color,
        direct_intensity: base_intensity * multiplier,
        ambient_intensity,
        fog_color: if is_night { FOG_NIGHT } else { FOG_DAY },
        is_night,
    }
}
