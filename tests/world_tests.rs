//! End-to-end world simulation tests

use urban_pulse::simulation::{GridParams, SimWorld, WeatherKind};

fn test_world() -> SimWorld {
    SimWorld::with_seed(&GridParams::new(4, 2.0, 1.2), 40, 77).unwrap()
}

#[test]
fn world_builds_with_defaults() {
    let world = SimWorld::with_seed(&GridParams::default(), 150, 1).unwrap();
    assert_eq!(world.vehicles.len(), 150);
    assert_eq!(world.layout.buildings.len(), 144);
    assert_eq!(world.weather().kind(), WeatherKind::None);
}

#[test]
fn clock_advances_at_half_hour_per_second() {
    let mut world = test_world();
    world.set_time_of_day(12.0);

    // 2 simulated seconds at 60 ticks/second
    for _ in 0..120 {
        world.tick(1.0 / 60.0);
    }
    assert!((world.time_of_day() - 13.0).abs() < 1e-3);

    world.clock_paused = true;
    for _ in 0..120 {
        world.tick(1.0 / 60.0);
    }
    assert!((world.time_of_day() - 13.0).abs() < 1e-3);
}

#[test]
fn clock_wraps_past_midnight() {
    let mut world = test_world();
    world.set_time_of_day(23.9);
    for _ in 0..60 {
        world.tick(1.0 / 60.0);
    }
    assert!(world.time_of_day() < 1.0);
}

#[test]
fn night_and_day_follow_the_clock() {
    let mut world = test_world();

    world.set_time_of_day(12.0);
    assert!(!world.is_night());
    assert!(world.sun().direct_intensity > 0.0);

    world.set_time_of_day(0.0);
    assert!(world.is_night());
    assert_eq!(world.sun().direct_intensity, 0.0);

    // Vehicle lights brighten at night
    let night_emission = world.light_emission();
    world.set_time_of_day(12.0);
    let day_emission = world.light_emission();
    assert!(night_emission.tail_color.r > day_emission.tail_color.r);
}

#[test]
fn sun_multiplier_dims_direct_light() {
    let mut world = test_world();
    world.set_time_of_day(12.0);
    let full = world.sun().direct_intensity;

    world.set_sun_intensity(0.5);
    assert!((world.sun().direct_intensity - full * 0.5).abs() < 1e-5);

    // Negative multipliers clamp to zero rather than inverting the light
    world.set_sun_intensity(-1.0);
    assert_eq!(world.sun().direct_intensity, 0.0);
}

#[test]
fn switching_weather_swaps_the_whole_buffer() {
    let mut world = test_world();

    world.set_weather(WeatherKind::Rain);
    world.set_weather_intensity(1.0);
    let rain_capacity = world.weather().capacity();
    assert!(!world.weather().visible_raindrops().is_empty());
    assert!(world.weather().visible_snowflakes().is_empty());

    world.set_weather(WeatherKind::Snow);
    assert_eq!(world.weather().kind(), WeatherKind::Snow);
    assert_ne!(world.weather().capacity(), rain_capacity);
    assert!(world.weather().visible_raindrops().is_empty());
    assert!(!world.weather().visible_snowflakes().is_empty());
}

#[test]
fn setting_same_weather_keeps_intensity() {
    let mut world = test_world();
    world.set_weather(WeatherKind::Rain);
    world.set_weather_intensity(0.3);
    let active = world.weather().active_count();

    world.set_weather(WeatherKind::Rain);
    assert_eq!(world.weather().active_count(), active);
}

#[test]
fn weather_intensity_survives_kind_change() {
    let mut world = test_world();
    world.set_weather(WeatherKind::Rain);
    world.set_weather_intensity(0.8);

    world.set_weather(WeatherKind::Snow);
    assert!((world.weather().intensity() - 0.8).abs() < 1e-6);
}

#[test]
fn hostile_deltas_are_clamped() {
    let mut world = test_world();
    let before: Vec<_> = world.vehicles.iter().map(|v| v.position).collect();

    // Negative and non-finite deltas must not move anything
    world.tick(-5.0);
    world.tick(f32::NAN);
    for (vehicle, pos) in world.vehicles.iter().zip(&before) {
        assert_eq!(vehicle.position, *pos);
    }

    // A huge hitch is clamped, so no vehicle can jump the whole map
    world.tick(1000.0);
    let max_speed = 0.25;
    for (vehicle, pos) in world.vehicles.iter().zip(&before) {
        let moved = (vehicle.position.x - pos.x).abs() + (vehicle.position.z - pos.z).abs();
        let max_step = max_speed * 0.25 * 60.0;
        let wrap_span = 2.0 * world.layout.boundary;
        assert!(moved <= max_step + 1e-3 || (moved - wrap_span).abs() <= max_step + 1e-3);
    }
}

#[test]
fn weather_particles_advance_during_tick() {
    let mut world = test_world();
    world.set_weather(WeatherKind::Rain);
    world.set_weather_intensity(1.0);
    let heights: Vec<f32> = world
        .weather()
        .visible_raindrops()
        .iter()
        .map(|d| d.position.y)
        .collect();

    world.tick(1.0 / 60.0);

    let moved = world
        .weather()
        .visible_raindrops()
        .iter()
        .zip(&heights)
        .any(|(drop, y)| drop.position.y != *y);
    assert!(moved, "rain should fall between ticks");
}

#[test]
fn simulated_time_accumulates() {
    let mut world = test_world();
    for _ in 0..60 {
        world.tick(1.0 / 60.0);
    }
    assert!((world.time - 1.0).abs() < 1e-4);
}
