//! Static obstacle map and point-vs-obstacle occupancy queries.
//!
//! Occupancy uses the circle's bounding square, not exact circle geometry.

use crate::error::LevelError;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict overlap between this rectangle and the square of half-size
    /// `radius` centered at (`x`, `y`).
    #[inline]
    pub fn overlaps_square(&self, x: f32, y: f32, radius: f32) -> bool {
        x + radius > self.x
            && x - radius < self.x + self.width
            && y + radius > self.y
            && y - radius < self.y + self.height
    }
}

/// A single movement axis, shared by the unit wall-slide and the
/// platformer's axis-separated sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Keep only this axis' component of a displacement.
    #[inline]
    pub fn project(self, dx: f32, dy: f32) -> (f32, f32) {
        match self {
            Axis::Horizontal => (dx, 0.0),
            Axis::Vertical => (0.0, dy),
        }
    }
}

/// Obstacle set of the arena. Immutable after construction.
#[derive(Resource, Debug, Clone)]
pub struct ArenaMap {
    pub width: f32,
    pub height: f32,
    obstacles: Vec<Obstacle>,
}

impl Default for ArenaMap {
    fn default() -> Self {
        Self::default_level()
    }
}

impl ArenaMap {
    pub fn new(width: f32, height: f32, obstacles: Vec<Obstacle>) -> Self {
        Self {
            width,
            height,
            obstacles,
        }
    }

    /// The stock 1024x768 arena with three walls.
    pub fn default_level() -> Self {
        Self::new(
            1024.0,
            768.0,
            vec![
                Obstacle::new(300.0, 200.0, 40.0, 200.0),
                Obstacle::new(500.0, 400.0, 120.0, 40.0),
                Obstacle::new(600.0, 100.0, 40.0, 100.0),
            ],
        )
    }

    /// Load an obstacle list (`[{"x":..,"y":..,"width":..,"height":..}]`).
    pub fn from_json(width: f32, height: f32, data: &str) -> Result<Self, LevelError> {
        let obstacles: Vec<Obstacle> = serde_json::from_str(data)?;
        let map = Self::new(width, height, obstacles);
        map.validate()?;
        Ok(map)
    }

    /// Reject obstacles with a non-positive extent.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, obs) in self.obstacles.iter().enumerate() {
            if obs.width <= 0.0 || obs.height <= 0.0 {
                return Err(LevelError::DegenerateObstacle {
                    index,
                    width: obs.width,
                    height: obs.height,
                });
            }
        }
        Ok(())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// True if a circle at (`x`, `y`) overlaps any obstacle (bounding-square test).
    pub fn occupied(&self, x: f32, y: f32, radius: f32) -> bool {
        self.obstacles
            .iter()
            .any(|obs| obs.overlaps_square(x, y, radius))
    }

    /// Move by (`dx`, `dy`) if free; otherwise slide along one axis,
    /// horizontal first. Returns the original point if every option is blocked.
    pub fn slide(&self, x: f32, y: f32, radius: f32, dx: f32, dy: f32) -> (f32, f32) {
        if !self.occupied(x + dx, y + dy, radius) {
            return (x + dx, y + dy);
        }
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let (sx, sy) = axis.project(dx, dy);
            if !self.occupied(x + sx, y + sy, radius) {
                return (x + sx, y + sy);
            }
        }
        (x, y)
    }
}
