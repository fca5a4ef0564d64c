//! Core types for the city simulation
//!
//! These are standalone types shared by the layout generator, the traffic
//! simulator, and the weather/sun systems.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct SimId(pub usize);

/// A wrapper type for building IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct BuildingId(pub SimId);

/// A wrapper type for road segment IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct RoadId(pub SimId);

/// A wrapper type for intersection IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct IntersectionId(pub SimId);

/// A wrapper type for lane IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct LaneId(pub SimId);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub struct VehicleId(pub SimId);

/// The horizontal axis a lane (and its vehicles) travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Travel direction along a lane's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneDirection {
    Positive,
    Negative,
}

impl LaneDirection {
    /// Signed unit value of the direction
    pub fn sign(self) -> f32 {
        match self {
            LaneDirection::Positive => 1.0,
            LaneDirection::Negative => -1.0,
        }
    }
}

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn lerp(&self, other: &Position, t: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Read the coordinate on the given travel axis
    #[allow(dead_code)]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Mutable access to the coordinate on the given travel axis
    pub fn along_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Z => &mut self.z,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

/// A linear RGB color with components in `[0, 1]`
/// (values above 1 are allowed for emissive intensities)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSL, with all components in `[0, 1]`
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Scale all channels by a scalar intensity
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// Height above which a building is classed as a tall commercial tower
pub const TALL_BUILDING_HEIGHT: f32 = 8.0;

/// Half the length of a vehicle body, used to place the light sockets
pub const VEHICLE_HALF_LENGTH: f32 = 0.65;

/// Height at which vehicles drive above the road surface
pub const VEHICLE_RIDE_HEIGHT: f32 = 0.15;
