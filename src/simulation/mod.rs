//! Standalone city simulation module
//!
//! Contains the procedural layout generator and the per-frame traffic, sun,
//! and weather updates. Nothing here depends on a rendering engine, so the
//! whole simulation can run and be tested from the console.

mod layout;
mod sun;
mod traffic;
mod types;
mod weather;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use layout::{
    generate_city, Building, CityLayout, GridParams, Intersection, Lane, LayoutError, RoadSegment,
};
#[allow(unused_imports)]
pub use sun::{evaluate, SunState};
#[allow(unused_imports)]
pub use traffic::{
    advance_traffic, spawn_traffic, LightEmission, LightSockets, Transform, Vehicle,
    LIGHT_SOCKET_SCALE, VEHICLE_BODY_SCALE, VEHICLE_PALETTE,
};
#[allow(unused_imports)]
pub use types::{
    Axis, BuildingId, IntersectionId, LaneDirection, LaneId, Position, Rgb, RoadId, SimId,
    VehicleId, TALL_BUILDING_HEIGHT, VEHICLE_HALF_LENGTH, VEHICLE_RIDE_HEIGHT,
};
#[allow(unused_imports)]
pub use weather::{Raindrop, Snowflake, WeatherField, WeatherKind, WindStreak};
pub use world::SimWorld;
