//! Collision tests between the projectile and the scene.
//!
//! Targets are circles. Obstacle zones are axis-aligned trigger rectangles open
//! toward the floor: anything at or below `top_y` inside the x-range counts as
//! a hit. Both tests pad by the projectile radius.

use crate::types::Point;

/// Velocity component flipped by an obstacle hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Struck the top face: negate vy.
    Vertical,
    /// Struck a side: negate vx.
    Horizontal,
}

impl Axis {
    pub fn reflect(self, velocity: Point) -> Point {
        match self {
            Axis::Vertical => Point::new(velocity.x, -velocity.y),
            Axis::Horizontal => Point::new(-velocity.x, velocity.y),
        }
    }
}

/// Strict circle-circle overlap.
pub fn circles_overlap(a: Point, radius_a: f64, b: Point, radius_b: f64) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Rectangular trigger region of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerRect {
    pub min_x: f64,
    pub max_x: f64,
    pub top_y: f64,
}

impl TriggerRect {
    pub const fn new(min_x: f64, max_x: f64, top_y: f64) -> Self {
        TriggerRect { min_x, max_x, top_y }
    }

    pub fn contains(&self, center: Point, radius: f64) -> bool {
        center.x >= self.min_x - radius
            && center.x <= self.max_x + radius
            && center.y >= self.top_y - radius
    }

    /// Which velocity component to flip for a ball at `center`.
    ///
    /// This is positional, not velocity based: a ball still above the top face
    /// and right of the left edge (within half a radius) bounces vertically,
    /// everything else bounces horizontally. A ball entering from the right side
    /// above `top_y` therefore also takes the vertical branch.
    pub fn reflection_axis(&self, center: Point, radius: f64) -> Axis {
        if center.y < self.top_y && center.x > self.min_x - radius / 2.0 {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}
