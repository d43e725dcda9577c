//! Drawing. [`build_frame`] reduces the simulation to a flat list of placed
//! drawables without touching the GPU; [`Renderer`] turns that list into
//! macroquad meshes.

use crate::config::*;
use crate::geometry::{self, Shape};
use crate::particles::ParticleSystem;
use crate::projectile::Phase;
use crate::scene::Scene;
use crate::simulation::Simulation;
use crate::types::Point;
use crate::viewport::Viewport;
use macroquad::prelude::*;
use std::collections::HashMap;

const BAND_COLOR: Color = Color::new(0.36, 0.2, 0.09, 1.0);
const HUD_COLOR: Color = Color::new(0.1, 0.15, 0.25, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Drawable {
    Cannonball,
    Pig(usize),
    Log(usize),
    Floor,
}

/// Places a local-space shape in the world:
/// `world = origin + rotate(rotation, local + offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub origin: Point,
    pub rotation: f64,
    pub offset: Point,
}

impl Transform {
    pub fn at(origin: Point) -> Self {
        Transform {
            origin,
            rotation: 0.0,
            offset: Point::ZERO,
        }
    }

    pub fn rotated(origin: Point, rotation: f64) -> Self {
        Transform {
            origin,
            rotation,
            offset: Point::ZERO,
        }
    }

    pub fn apply(&self, local: Point) -> Point {
        self.origin + (local + self.offset).rotated(self.rotation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub transform: Transform,
    pub drawable: Drawable,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    /// Back to front.
    pub commands: Vec<DrawCommand>,
    /// Sling band from the anchor to the ball while aiming.
    pub aim_line: Option<(Point, Point)>,
    pub phase: Phase,
    pub targets_left: usize,
    pub targets_total: usize,
}

pub fn build_frame(sim: &Simulation) -> Frame {
    let mut commands = vec![DrawCommand {
        transform: Transform::at(Point::ZERO),
        drawable: Drawable::Floor,
    }];

    for (index, zone) in sim.scene.zones.iter().enumerate() {
        let transform = match zone.pivot_offset() {
            Some((pivot, offset)) => Transform {
                origin: pivot,
                rotation: zone.rotation(),
                offset,
            },
            None => Transform::at(zone.center),
        };
        commands.push(DrawCommand {
            transform,
            drawable: Drawable::Log(index),
        });
    }

    for (index, target) in sim.scene.targets.iter().enumerate() {
        if target.alive {
            commands.push(DrawCommand {
                transform: Transform::at(target.center),
                drawable: Drawable::Pig(index),
            });
        }
    }

    let projectile = &sim.projectile;
    commands.push(DrawCommand {
        transform: Transform::rotated(projectile.position, projectile.orientation()),
        drawable: Drawable::Cannonball,
    });

    Frame {
        viewport: sim.viewport,
        commands,
        aim_line: (projectile.phase == Phase::Aiming).then_some((projectile.anchor, projectile.position)),
        phase: projectile.phase,
        targets_left: sim.scene.alive_targets(),
        targets_total: sim.scene.targets.len(),
    }
}

// Handles rendering the simulation state using macroquad
pub struct Renderer {
    shapes: HashMap<Drawable, Shape>,
}

impl Renderer {
    /// Tessellate every shape the scene can show. Needs no GL context.
    pub fn new(scene: &Scene) -> Self {
        let mut shapes = HashMap::new();
        shapes.insert(Drawable::Cannonball, geometry::cannonball(PROJECTILE_RADIUS as f32));
        shapes.insert(
            Drawable::Floor,
            geometry::floor(WORLD_LEFT as f32, WORLD_RIGHT as f32, FLOOR_Y as f32),
        );
        for (index, target) in scene.targets.iter().enumerate() {
            shapes.insert(
                Drawable::Pig(index),
                geometry::ellipse(
                    target.radius as f32,
                    target.half_height as f32,
                    TARGET_SEGMENTS,
                    geometry::PIG_GREEN,
                ),
            );
        }
        for (index, zone) in scene.zones.iter().enumerate() {
            shapes.insert(
                Drawable::Log(index),
                geometry::rectangle(
                    zone.half_extents.x as f32,
                    zone.half_extents.y as f32,
                    geometry::WOOD,
                ),
            );
        }
        log::debug!(
            "Tessellated {} shapes, {} triangles",
            shapes.len(),
            shapes.values().map(Shape::triangle_count).sum::<usize>()
        );
        Renderer { shapes }
    }

    pub fn shape(&self, drawable: Drawable) -> Option<&Shape> {
        self.shapes.get(&drawable)
    }

    /// Place a shape in the world as a mesh.
    pub fn mesh_for(&self, command: &DrawCommand) -> Option<Mesh> {
        let shape = self.shape(command.drawable)?;
        let vertices = shape
            .vertices
            .iter()
            .map(|(local, color)| {
                let world = command
                    .transform
                    .apply(Point::new(local.x as f64, local.y as f64));
                Vertex::new(world.x as f32, world.y as f32, 0.0, 0.0, 0.0, *color)
            })
            .collect::<Vec<_>>();
        let indices = (0..vertices.len() as u16).collect();
        Some(Mesh {
            vertices,
            indices,
            texture: None,
        })
    }

    pub fn draw_frame(&self, frame: &Frame, particles: &ParticleSystem) {
        clear_background(geometry::SKY);

        let view = frame.viewport;
        set_camera(&Camera2D {
            target: vec2(
                ((view.left + view.right) / 2.0) as f32,
                ((view.top + view.bottom) / 2.0) as f32,
            ),
            // Negative y zoom keeps the world y-down on screen
            zoom: vec2(2.0 / view.width() as f32, -2.0 / view.height() as f32),
            ..Default::default()
        });

        for command in &frame.commands {
            // The band goes behind the ball
            if command.drawable == Drawable::Cannonball {
                self.draw_aim_line(frame);
            }
            match self.mesh_for(command) {
                Some(mesh) => draw_mesh(&mesh),
                None => log::warn!("No shape for {:?}", command.drawable),
            }
        }
        particles.draw();

        set_default_camera();
        self.draw_hud(frame);
    }

    fn draw_aim_line(&self, frame: &Frame) {
        if let Some((from, to)) = frame.aim_line {
            draw_line(from.x as f32, from.y as f32, to.x as f32, to.y as f32, 4.0, BAND_COLOR);
        }
    }

    fn draw_hud(&self, frame: &Frame) {
        let pigs = format!("Pigs: {}/{}", frame.targets_left, frame.targets_total);
        draw_text(&pigs, 16.0, 28.0, 26.0, HUD_COLOR);

        let hint = match frame.phase {
            Phase::Idle if frame.targets_left == 0 => "All pigs down!",
            Phase::Idle => "Drag the cannonball to aim",
            Phase::Aiming => "Release to launch",
            Phase::Flying => "Click to recall",
        };
        draw_text(hint, 16.0, 52.0, 20.0, HUD_COLOR);
        draw_text("WASD pan  P/M zoom  Q quit", 16.0, screen_height() - 14.0, 18.0, HUD_COLOR);

        let fps = format!("FPS: {}", get_fps());
        let fps_width = measure_text(&fps, None, 18, 1.0).width;
        draw_text(&fps, screen_width() - fps_width - 16.0, 24.0, 18.0, HUD_COLOR);
    }

    pub fn window_should_close() -> bool {
        is_quit_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use assert_approx_eq::assert_approx_eq;

    fn sim() -> Simulation {
        Simulation::new(Scene::standard()).unwrap()
    }

    fn find(frame: &Frame, drawable: Drawable) -> Option<&DrawCommand> {
        frame.commands.iter().find(|c| c.drawable == drawable)
    }

    #[test]
    fn test_transform_apply() {
        let t = Transform {
            origin: Point::new(10.0, 200.0),
            rotation: std::f64::consts::FRAC_PI_2,
            offset: Point::new(-10.0, -30.0),
        };
        let p = t.apply(Point::ZERO);
        assert_approx_eq!(p.x, 40.0);
        assert_approx_eq!(p.y, 190.0);
    }

    #[test]
    fn test_frame_order_and_contents() {
        let frame = build_frame(&sim());
        assert_eq!(frame.commands.first().map(|c| c.drawable), Some(Drawable::Floor));
        assert_eq!(frame.commands.last().map(|c| c.drawable), Some(Drawable::Cannonball));
        assert_eq!(frame.commands.len(), 1 + 2 + 3 + 1);
        assert_eq!(frame.targets_left, 3);
        assert!(frame.aim_line.is_none());
    }

    #[test]
    fn test_dead_targets_are_skipped() {
        let mut s = sim();
        s.scene.targets[1].alive = false;
        let frame = build_frame(&s);
        assert!(find(&frame, Drawable::Pig(0)).is_some());
        assert!(find(&frame, Drawable::Pig(1)).is_none());
        assert_eq!(frame.targets_left, 2);
    }

    #[test]
    fn test_upright_log_placed_at_center() {
        let frame = build_frame(&sim());
        let log = find(&frame, Drawable::Log(0)).unwrap();
        let center = log.transform.apply(Point::ZERO);
        assert_approx_eq!(center.x, 0.0);
        assert_approx_eq!(center.y, 170.0);
    }

    #[test]
    fn test_fallen_log_lies_on_the_floor() {
        let mut s = sim();
        s.scene.zones[0].animation.triggered = true;
        s.scene.zones[0].animation.angle = 90.0;
        let frame = build_frame(&s);
        let log = find(&frame, Drawable::Log(0)).unwrap();
        // The far end of the log now reaches along the ground
        let tip = log.transform.apply(Point::new(0.0, -30.0));
        assert_approx_eq!(tip.x, 70.0);
        assert_approx_eq!(tip.y, 190.0);
    }

    #[test]
    fn test_aim_line_while_aiming() {
        let mut s = sim();
        s.projectile.begin_aim(s.projectile.anchor);
        s.projectile.aim_at(s.projectile.anchor + Point::new(-20.0, 0.0));
        let frame = build_frame(&s);
        let (from, to) = frame.aim_line.unwrap();
        assert_eq!(from, s.projectile.anchor);
        assert_approx_eq!(to.x, LAUNCH_ANCHOR_X - 20.0);
    }

    #[test]
    fn test_renderer_meshes() {
        let s = sim();
        let renderer = Renderer::new(&s.scene);
        let frame = build_frame(&s);
        for command in &frame.commands {
            let mesh = renderer.mesh_for(command).unwrap();
            assert_eq!(mesh.indices.len(), mesh.vertices.len());
            assert_eq!(mesh.vertices.len() % 3, 0);
        }
        let ball = renderer.mesh_for(frame.commands.last().unwrap()).unwrap();
        let x: Vec<f32> = ball.vertices.iter().map(|v| v.position.x).collect();
        let max_x = x.iter().cloned().fold(f32::MIN, f32::max);
        assert_approx_eq!(max_x, (LAUNCH_ANCHOR_X + PROJECTILE_RADIUS + 10.0) as f32, 1e-3);
    }
}
