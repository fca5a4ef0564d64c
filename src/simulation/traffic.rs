//! Traffic spawning and per-frame vehicle movement
//!
//! Vehicles follow independent one-way lanes and wrap at the layout
//! boundary. There is no collision detection or lane changing; each
//! vehicle is a pure modular translation along its travel axis.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::layout::{CityLayout, Lane};
use super::types::{
    Axis, LaneDirection, LaneId, Position, Rgb, SimId, VehicleId, VEHICLE_HALF_LENGTH,
    VEHICLE_RIDE_HEIGHT,
};

/// Fixed body paint palette, sampled uniformly at spawn time
pub const VEHICLE_PALETTE: [Rgb; 6] = [
    Rgb::new(0.937, 0.267, 0.267), // red
    Rgb::new(0.918, 0.702, 0.031), // yellow
    Rgb::new(0.231, 0.510, 0.965), // blue
    Rgb::new(0.953, 0.957, 0.965), // white
    Rgb::new(0.063, 0.725, 0.506), // green
    Rgb::new(0.976, 0.451, 0.086), // orange
];

/// Base speed range in world units per frame at 60 ticks/second
const SPEED_RANGE: std::ops::Range<f32> = 0.1..0.25;

/// Rendered body box dimensions (width, height, length)
#[allow(dead_code)]
pub const VEHICLE_BODY_SCALE: [f32; 3] = [0.6, 0.5, 1.3];
/// Rendered light socket dimensions
#[allow(dead_code)]
pub const LIGHT_SOCKET_SCALE: [f32; 3] = [0.4, 0.2, 0.1];

const HEADLIGHT_COLOR: Rgb = Rgb::new(1.0, 0.996, 0.733);
const TAILLIGHT_COLOR: Rgb = Rgb::new(1.0, 0.0, 0.0);

/// A vehicle bound to a single lane for its whole lifetime
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: Position,
    /// Signed speed: lane speed times direction, in units per frame at 60 fps
    pub speed: f32,
    pub axis: Axis,
    pub direction: LaneDirection,
    pub color: Rgb,
    pub lane: LaneId,
}

/// Position plus yaw, ready for the renderer to instance
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)]
pub struct Transform {
    pub position: Position,
    pub yaw: f32,
}

/// Headlight and taillight socket transforms for one vehicle
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct LightSockets {
    pub head: Transform,
    pub tail: Transform,
}

/// Fleet-wide light emission, a function of the night flag only
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct LightEmission {
    pub head_color: Rgb,
    pub tail_color: Rgb,
}

impl LightEmission {
    #[allow(dead_code)]
    pub fn for_night(is_night: bool) -> Self {
        let (head, tail) = if is_night { (2.0, 3.0) } else { (1.0, 1.0) };
        Self {
            head_color: HEADLIGHT_COLOR.scaled(head),
            tail_color: TAILLIGHT_COLOR.scaled(tail),
        }
    }
}

// Render-facing accessors (the headless front end doesn't read them)
#[allow(dead_code)]
impl Vehicle {
    /// Yaw that aligns the body's forward axis with the travel direction
    pub fn yaw(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match (self.axis, self.direction) {
            (Axis::X, LaneDirection::Positive) => -FRAC_PI_2,
            (Axis::X, LaneDirection::Negative) => FRAC_PI_2,
            (Axis::Z, LaneDirection::Positive) => 0.0,
            (Axis::Z, LaneDirection::Negative) => PI,
        }
    }

    pub fn body_transform(&self) -> Transform {
        Transform {
            position: self.position,
            yaw: self.yaw(),
        }
    }

    /// Light sockets sit half a body length ahead of and behind the center
    pub fn light_sockets(&self) -> LightSockets {
        let yaw = self.yaw();
        let forward = VEHICLE_HALF_LENGTH * self.direction.sign();

        let mut head = self.position;
        let mut tail = self.position;
        *head.along_mut(self.axis) += forward;
        *tail.along_mut(self.axis) -= forward;

        LightSockets {
            head: Transform {
                position: head,
                yaw,
            },
            tail: Transform {
                position: tail,
                yaw,
            },
        }
    }
}

/// Seed an initial vehicle population on the layout's lanes.
///
/// Each vehicle starts at a uniform random point along a uniform random
/// non-degenerate lane. A count of zero (or a layout with only degenerate
/// lanes) yields an empty fleet.
pub fn spawn_traffic(count: usize, layout: &CityLayout, rng: &mut impl Rng) -> Vec<Vehicle> {
    let candidates: Vec<&Lane> = layout
        .lanes
        .iter()
        .filter(|lane| !lane.is_degenerate())
        .collect();

    if candidates.is_empty() {
        if count > 0 {
            log::warn!("no drivable lanes in layout; spawning no vehicles");
        }
        return Vec::new();
    }

    let mut vehicles = Vec::with_capacity(count);
    for i in 0..count {
        // Slice is non-empty, so choose cannot fail
        let lane = candidates.choose(rng).copied().unwrap_or(&layout.lanes[0]);
        let t: f32 = rng.random_range(0.0..1.0);
        let mut position = lane.start.lerp(&lane.end, t);
        position.y = VEHICLE_RIDE_HEIGHT;

        vehicles.push(Vehicle {
            id: VehicleId(SimId(i)),
            position,
            speed: rng.random_range(SPEED_RANGE) * lane.direction.sign(),
            axis: lane.axis,
            direction: lane.direction,
            color: *VEHICLE_PALETTE.choose(rng).unwrap_or(&VEHICLE_PALETTE[0]),
            lane: lane.id,
        });
    }

    vehicles
}

/// Advance every vehicle along its travel axis and wrap at the boundary.
///
/// The wrap is an exact modular translation: overshoot past one edge
/// re-enters by the same amount past the opposite edge, so motion is
/// continuous across the seam.
pub fn advance_traffic(vehicles: &mut [Vehicle], delta: f32, boundary: f32) {
    // Speeds are tuned per-frame at 60 ticks/second
    let frame_scale = delta * 60.0;

    for vehicle in vehicles {
        let coord = vehicle.position.along_mut(vehicle.axis);
        *coord += vehicle.speed * frame_scale;

        if *coord > boundary {
            *coord -= 2.0 * boundary;
        } else if *coord < -boundary {
            *coord += 2.0 * boundary;
        }
    }
}
