//! Procedural grid-city layout generation
//!
//! Lays out a square lattice of intersections connected by road segments,
//! fills the cells with randomized buildings, and threads two one-way
//! traffic lanes along every grid line. The result is immutable; the
//! traffic and weather systems only ever read it.

use rand::Rng;
use thiserror::Error;

use super::types::{
    Axis, BuildingId, IntersectionId, LaneDirection, LaneId, Position, RoadId, SimId,
    TALL_BUILDING_HEIGHT,
};

/// Probability that a cell gets a skyscraper instead of a low-rise
const SKYSCRAPER_CHANCE: f64 = 0.2;
/// Gap left around a building footprint for the sidewalk
const SIDEWALK_MARGIN: f32 = 0.3;
/// Extra drivable margin past the outermost grid line
const BOUNDARY_MARGIN: f32 = 5.0;
/// Road surfaces sit slightly above the ground plane
const ROAD_SURFACE_HEIGHT: f32 = 0.02;
/// Lanes run a quarter road-width off the grid line centerline
const LANE_OFFSET_FACTOR: f32 = 0.25;

/// Parameters for grid-city generation
#[derive(Debug, Clone, Copy)]
pub struct GridParams {
    /// Number of cells per side; the lattice has `grid_size + 1` nodes per side
    pub grid_size: u32,
    /// Side length of a building block
    pub block_size: f32,
    /// Width of the road between blocks
    pub road_width: f32,
}

impl GridParams {
    pub fn new(grid_size: u32, block_size: f32, road_width: f32) -> Self {
        Self {
            grid_size,
            block_size,
            road_width,
        }
    }

    /// Spacing between adjacent lattice nodes
    pub fn cell_size(&self) -> f32 {
        self.block_size + self.road_width
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("block_size", self.block_size),
            ("road_width", self.road_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

impl Default for GridParams {
    fn default() -> Self {
        // Matches the stock city used by the front end
        Self::new(12, 2.0, 1.2)
    }
}

/// Errors raised when layout generation is given unusable parameters
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("invalid parameter {name}: {value} (must be positive and finite)")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// A building occupying one grid cell
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Building {
    pub id: BuildingId,
    /// Center of the box, so `position.y` is half the height
    pub position: Position,
    /// Footprint and height of the box
    pub scale: [f32; 3],
    pub height: f32,
}

impl Building {
    /// Tall commercial towers get lit windows at night; low-rises do not
    pub fn is_tall(&self) -> bool {
        self.height > TALL_BUILDING_HEIGHT
    }
}

/// A visual road segment spanning one cell between two adjacent nodes
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RoadSegment {
    pub id: RoadId,
    pub position: Position,
    /// Yaw rotation only; roads are flat
    pub yaw: f32,
    /// Length along the segment, thickness, width across the segment
    pub scale: [f32; 3],
}

/// An intersection pad at a lattice node
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Intersection {
    pub id: IntersectionId,
    pub position: Position,
    pub scale: [f32; 3],
}

/// A logical one-way travel track, independent of the rendered road geometry
#[derive(Debug, Clone)]
pub struct Lane {
    pub id: LaneId,
    pub start: Position,
    pub end: Position,
    pub axis: Axis,
    pub direction: LaneDirection,
}

impl Lane {
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Zero-length lanes exist on a degenerate 0-cell grid and cannot carry
    /// traffic; the spawner skips them.
    pub fn is_degenerate(&self) -> bool {
        self.length() <= f32::EPSILON
    }
}

/// The complete static city produced by [`generate_city`]
#[derive(Debug, Clone)]
pub struct CityLayout {
    pub buildings: Vec<Building>,
    pub road_segments: Vec<RoadSegment>,
    pub intersections: Vec<Intersection>,
    pub lanes: Vec<Lane>,
    /// Half-extent of the drivable area; vehicles wrap at `±boundary`
    pub boundary: f32,
}

/// Generate a grid city.
///
/// Deterministic for a given `rng` except that building heights are drawn
/// from it; seed the rng for reproducible layouts.
pub fn generate_city(params: &GridParams, rng: &mut impl Rng) -> Result<CityLayout, LayoutError> {
    params.validate()?;

    let grid = params.grid_size;
    let cell = params.cell_size();
    let offset = grid as f32 * cell / 2.0;

    let mut buildings = Vec::new();
    let mut road_segments = Vec::new();
    let mut intersections = Vec::new();
    let mut lanes = Vec::new();
    let mut next_id = 0usize;
    let mut next_sim_id = || {
        let id = SimId(next_id);
        next_id += 1;
        id
    };

    for x in 0..=grid {
        for z in 0..=grid {
            let pos_x = x as f32 * cell - offset;
            let pos_z = z as f32 * cell - offset;

            intersections.push(Intersection {
                id: IntersectionId(next_sim_id()),
                position: Position::new(pos_x, ROAD_SURFACE_HEIGHT, pos_z),
                scale: [params.road_width, 1.0, params.road_width],
            });

            // Road segment to the next node along +x
            if x < grid {
                road_segments.push(RoadSegment {
                    id: RoadId(next_sim_id()),
                    position: Position::new(pos_x + cell / 2.0, ROAD_SURFACE_HEIGHT, pos_z),
                    yaw: 0.0,
                    scale: [params.block_size, 1.0, params.road_width],
                });
            }

            // Road segment to the next node along +z
            if z < grid {
                road_segments.push(RoadSegment {
                    id: RoadId(next_sim_id()),
                    position: Position::new(pos_x, ROAD_SURFACE_HEIGHT, pos_z + cell / 2.0),
                    yaw: std::f32::consts::FRAC_PI_2,
                    scale: [params.block_size, 1.0, params.road_width],
                });
            }

            // One building per full cell
            if x < grid && z < grid {
                let height = if rng.random_bool(SKYSCRAPER_CHANCE) {
                    rng.random_range(6.0..16.0)
                } else {
                    rng.random_range(1.5..5.5)
                };
                let footprint = params.block_size - SIDEWALK_MARGIN;

                buildings.push(Building {
                    id: BuildingId(next_sim_id()),
                    position: Position::new(
                        pos_x + cell / 2.0,
                        height / 2.0,
                        pos_z + cell / 2.0,
                    ),
                    scale: [footprint, height, footprint],
                    height,
                });
            }
        }
    }

    // Two opposing one-way lanes per grid row, spanning the full lattice
    let lane_offset = params.road_width * LANE_OFFSET_FACTOR;
    for z in 0..=grid {
        let z_pos = z as f32 * cell - offset;

        lanes.push(Lane {
            id: LaneId(next_sim_id()),
            start: Position::new(-offset, 0.0, z_pos + lane_offset),
            end: Position::new(offset, 0.0, z_pos + lane_offset),
            axis: Axis::X,
            direction: LaneDirection::Positive,
        });
        lanes.push(Lane {
            id: LaneId(next_sim_id()),
            start: Position::new(offset, 0.0, z_pos - lane_offset),
            end: Position::new(-offset, 0.0, z_pos - lane_offset),
            axis: Axis::X,
            direction: LaneDirection::Negative,
        });
    }

    // And two per grid column
    for x in 0..=grid {
        let x_pos = x as f32 * cell - offset;

        lanes.push(Lane {
            id: LaneId(next_sim_id()),
            start: Position::new(x_pos - lane_offset, 0.0, -offset),
            end: Position::new(x_pos - lane_offset, 0.0, offset),
            axis: Axis::Z,
            direction: LaneDirection::Positive,
        });
        lanes.push(Lane {
            id: LaneId(next_sim_id()),
            start: Position::new(x_pos + lane_offset, 0.0, offset),
            end: Position::new(x_pos + lane_offset, 0.0, -offset),
            axis: Axis::Z,
            direction: LaneDirection::Negative,
        });
    }

    Ok(CityLayout {
        buildings,
        road_segments,
        intersections,
        lanes,
        boundary: offset + BOUNDARY_MARGIN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_city(&GridParams::new(4, 0.0, 1.2), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidParameter { name: "block_size", .. }
        ));

        let err = generate_city(&GridParams::new(4, 2.0, -1.0), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidParameter { name: "road_width", .. }
        ));
    }

    #[test]
    fn zero_grid_is_degenerate_but_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        let layout = generate_city(&GridParams::new(0, 2.0, 1.2), &mut rng).unwrap();
        assert_eq!(layout.intersections.len(), 1);
        assert!(layout.road_segments.is_empty());
        assert!(layout.buildings.is_empty());
        assert_eq!(layout.lanes.len(), 4);
        assert!(layout.lanes.iter().all(Lane::is_degenerate));
    }

    #[test]
    fn building_heights_fall_in_expected_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = generate_city(&GridParams::new(10, 3.0, 1.8), &mut rng).unwrap();
        for building in &layout.buildings {
            let h = building.height;
            assert!(
                (1.5..5.5).contains(&h) || (6.0..16.0).contains(&h),
                "height {} outside both bands",
                h
            );
            assert!((building.position.y - h / 2.0).abs() < 1e-6);
        }
    }
}
