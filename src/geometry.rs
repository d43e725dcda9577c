//! Tessellation of the demo's shapes into coloured triangle lists.
//!
//! Every shape is built once in local space, centred on its own origin, and
//! placed in the world at draw time by a transform.

use crate::config::*;
use macroquad::prelude::{Color, Vec2, vec2};
use std::f32::consts::TAU;

pub const CANNONBALL_RED: Color = Color::new(214.0 / 255.0, 1.0 / 255.0, 14.0 / 255.0, 1.0);
pub const BEAK_YELLOW: Color = Color::new(252.0 / 255.0, 187.0 / 255.0, 35.0 / 255.0, 1.0);
pub const PIG_GREEN: Color = Color::new(114.0 / 255.0, 194.0 / 255.0, 65.0 / 255.0, 1.0);
pub const WOOD: Color = Color::new(228.0 / 255.0, 142.0 / 255.0, 57.0 / 255.0, 1.0);
pub const GRASS: Color = Color::new(133.0 / 255.0, 183.0 / 255.0, 52.0 / 255.0, 1.0);
pub const SKY: Color = Color::new(156.0 / 255.0, 205.0 / 255.0, 237.0 / 255.0, 1.0);

/// A triangle list: every three vertices form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub vertices: Vec<(Vec2, Color)>,
}

impl Shape {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.vertices.extend([(a, color), (b, color), (c, color)]);
    }
}

/// Triangle fan approximating an ellipse with semi-axes `semi_x` and `semi_y`.
pub fn ellipse(semi_x: f32, semi_y: f32, segments: usize, color: Color) -> Shape {
    let mut shape = Shape::default();
    let step = TAU / segments as f32;
    let rim = |i: usize| {
        let theta = step * i as f32;
        vec2(semi_x * theta.cos(), semi_y * theta.sin())
    };
    for i in 0..segments {
        shape.push_triangle(Vec2::ZERO, rim(i), rim(i + 1), color);
    }
    shape
}

pub fn circle(radius: f32, segments: usize, color: Color) -> Shape {
    ellipse(radius, radius, segments, color)
}

/// The cannonball: a red disc with a small yellow beak pointing along +x.
pub fn cannonball(radius: f32) -> Shape {
    let mut shape = circle(radius, CANNONBALL_SEGMENTS, CANNONBALL_RED);
    let step = TAU / CANNONBALL_SEGMENTS as f32;
    let upper = vec2(radius * step.cos(), radius * step.sin());
    let lower = vec2(upper.x, -upper.y);
    shape.push_triangle(upper, vec2(radius + 10.0, -2.0), lower, BEAK_YELLOW);
    shape
}

/// Axis-aligned rectangle centred on the origin.
pub fn rectangle(half_width: f32, half_height: f32, color: Color) -> Shape {
    let mut shape = Shape::default();
    let (w, h) = (half_width, half_height);
    shape.push_triangle(vec2(-w, -h), vec2(-w, h), vec2(w, -h), color);
    shape.push_triangle(vec2(w, -h), vec2(-w, h), vec2(w, h), color);
    shape
}

/// Overlapping grass stripes below the floor line, lightening with depth.
pub fn floor(left: f32, right: f32, surface_y: f32) -> Shape {
    let mut shape = Shape::default();
    let mut color = GRASS;
    for i in 0..FLOOR_STRIPES {
        let top = surface_y + i as f32 * FLOOR_STRIPE_STEP as f32;
        let bottom = top + FLOOR_STRIPE_HEIGHT as f32;
        shape.push_triangle(vec2(left, top), vec2(left, bottom), vec2(right, top), color);
        shape.push_triangle(vec2(right, bottom), vec2(left, bottom), vec2(right, top), color);
        color.r = (color.r + 2.5 / 255.0).min(1.0);
        color.g = (color.g + 10.0 / 255.0).min(1.0);
    }
    shape
}
