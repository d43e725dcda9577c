//! The complete interactive state of the demo and its per-tick update.
//!
//! Input is applied between ticks through [`Simulation::handle_input`]. Each
//! [`Simulation::step`] then moves the camera and, while the ball is in flight,
//! runs exactly one physics update:
//!
//! 1. integrate (move, gravity, floor bounce)
//! 2. obstacle zones in declaration order, first hit wins
//! 3. targets in declaration order
//! 4. advance falling logs and crush whatever they land on
//! 5. rest check
//!
//! Everything observable that happened is queued as a [`SimEvent`].

use crate::collision::{Axis, circles_overlap};
use crate::config::*;
use crate::error::SceneError;
use crate::input::{Button, InputEvent};
use crate::projectile::{Phase, Projectile};
use crate::scene::{FallSpec, Scene};
use crate::types::Point;
use crate::viewport::{CameraControls, ScreenSize, Viewport};
use crate::{debug_camera, debug_collision, debug_input, debug_physics};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestroyCause {
    Impact,
    Crushed { zone: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    Launched { from: Point, velocity: Point },
    FloorBounce { position: Point, impact_speed: f64 },
    ZoneStruck { zone: usize, position: Point, axis: Axis },
    TargetDestroyed { target: usize, position: Point, cause: DestroyCause },
    CameToRest,
    Recalled,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    pub projectile: Projectile,
    pub scene: Scene,
    pub viewport: Viewport,
    pub controls: CameraControls,
    cursor_screen: Point,
    screen: ScreenSize,
    tick: u64,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(scene: Scene) -> Result<Self, SceneError> {
        scene.validate()?;
        let viewport = Viewport::default();
        let screen = ScreenSize::default();
        let projectile = Projectile::default();
        Ok(Simulation {
            // Park the cursor over the anchor until the first real sample arrives
            cursor_screen: Point::new(
                (projectile.anchor.x - viewport.left) / viewport.width() * screen.width,
                (projectile.anchor.y - viewport.top) / viewport.height() * screen.height,
            ),
            projectile,
            scene,
            viewport,
            controls: CameraControls::default(),
            screen,
            tick: 0,
            events: Vec::new(),
        })
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> Phase {
        self.projectile.phase
    }

    /// The cursor mapped through the current viewport.
    pub fn cursor_world(&self) -> Point {
        self.viewport.screen_to_world(self.cursor_screen, self.screen)
    }

    /// Apply one input event. Nothing here can fail.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { position, screen } => {
                self.cursor_screen = position;
                self.screen = screen;
                self.projectile.aim_at(self.cursor_world());
            }
            InputEvent::MouseDown(Button::Primary) => self.press(),
            InputEvent::MouseUp(Button::Primary) => self.release(),
            InputEvent::MouseDown(Button::Secondary) | InputEvent::MouseUp(Button::Secondary) => {}
            InputEvent::KeyDown(control) => {
                if self.controls.set(control, true) {
                    debug_input!("{:?} held", control);
                }
            }
            InputEvent::KeyUp(control) => {
                if self.controls.set(control, false) {
                    debug_input!("{:?} released", control);
                }
            }
        }
    }

    fn press(&mut self) {
        let cursor = self.cursor_world();
        match self.projectile.phase {
            Phase::Idle => {
                if self.projectile.begin_aim(cursor) {
                    debug_input!("Aiming from ({:.1}, {:.1})", cursor.x, cursor.y);
                }
            }
            Phase::Flying => {
                // Clicking mid-flight calls the ball back to the sling
                self.projectile.settle();
                self.scene.reset_zones();
                self.events.push(SimEvent::Recalled);
                debug_input!("Projectile recalled");
            }
            Phase::Aiming => {}
        }
    }

    fn release(&mut self) {
        let cursor = self.cursor_world();
        if let Some(velocity) = self.projectile.release(cursor) {
            let from = self.projectile.position;
            self.events.push(SimEvent::Launched { from, velocity });
            debug_physics!(tick = self.tick;
                "Launched from ({:.1}, {:.1}), v = ({:.2}, {:.2})",
                from.x, from.y, velocity.x, velocity.y
            );
        }
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        self.tick += 1;

        if self.controls.any() && self.viewport.apply(&self.controls) {
            debug_camera!(tick = self.tick;
                "View [{:.1}, {:.1}] x [{:.1}, {:.1}]",
                self.viewport.left, self.viewport.right, self.viewport.top, self.viewport.bottom
            );
        }

        match self.projectile.phase {
            // The view may have moved under a stationary cursor
            Phase::Aiming => self.projectile.aim_at(self.cursor_world()),
            Phase::Flying => self.step_flight(),
            Phase::Idle => {}
        }
    }

    fn step_flight(&mut self) {
        if let Some(contact) = self.projectile.integrate() {
            self.events.push(SimEvent::FloorBounce {
                position: contact.position,
                impact_speed: contact.impact_speed,
            });
            debug_physics!(tick = self.tick;
                "Floor bounce at x {:.1}, impact {:.2}", contact.position.x, contact.impact_speed
            );
        }

        self.check_zones();
        self.check_targets();
        self.advance_falls();

        if self.projectile.is_resting() {
            self.projectile.settle();
            self.scene.reset_zones();
            self.events.push(SimEvent::CameToRest);
            debug_physics!(tick = self.tick; "Projectile at rest");
        }
    }

    fn check_zones(&mut self) {
        let center = self.projectile.position;
        let radius = self.projectile.radius;
        let hit = self
            .scene
            .zones
            .iter()
            .position(|zone| zone.trigger.contains(center, radius));
        let Some(index) = hit else {
            return;
        };

        let zone = &mut self.scene.zones[index];
        if zone.fall.is_some() && zone.animation.start(self.projectile.velocity.x) {
            debug_collision!(tick = self.tick;
                "{} starts to fall, spin {:.2}", zone.name, zone.animation.angular_v
            );
        }
        let axis = zone.trigger.reflection_axis(center, radius);
        self.projectile.reflect(axis);
        self.events.push(SimEvent::ZoneStruck {
            zone: index,
            position: center,
            axis,
        });
        debug_collision!(tick = self.tick;
            "Struck {} at ({:.1}, {:.1}), reflect {:?}", zone.name, center.x, center.y, axis
        );
    }

    fn check_targets(&mut self) {
        let center = self.projectile.position;
        let radius = self.projectile.radius;
        for (index, target) in self.scene.targets.iter_mut().enumerate() {
            if !target.alive || !circles_overlap(center, radius, target.center, target.radius) {
                continue;
            }
            target.alive = false;
            self.projectile.damp(TARGET_HIT_DAMPING);
            self.events.push(SimEvent::TargetDestroyed {
                target: index,
                position: target.center,
                cause: DestroyCause::Impact,
            });
            debug_collision!(tick = self.tick; "Target {} destroyed by impact", index);
        }
    }

    fn advance_falls(&mut self) {
        for (zone_index, zone) in self.scene.zones.iter_mut().enumerate() {
            zone.animation.advance();
            let Some(FallSpec {
                crushes: Some(target_index),
                ..
            }) = zone.fall
            else {
                continue;
            };
            if !zone.animation.triggered || zone.animation.angle < CRUSH_ANGLE {
                continue;
            }
            let target = &mut self.scene.targets[target_index];
            if target.alive {
                target.alive = false;
                self.events.push(SimEvent::TargetDestroyed {
                    target: target_index,
                    position: target.center,
                    cause: DestroyCause::Crushed { zone: zone_index },
                });
                debug_collision!(tick = self.tick;
                    "Target {} crushed by {}", target_index, zone.name
                );
            }
        }
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Control;
    use assert_approx_eq::assert_approx_eq;

    fn sim() -> Simulation {
        Simulation::new(Scene::standard()).unwrap()
    }

    // Move the cursor to a world point under the default viewport
    fn cursor_at(sim: &mut Simulation, world: Point) {
        let view = sim.viewport;
        let screen = ScreenSize::default();
        let position = Point::new(
            (world.x - view.left) / view.width() * screen.width,
            (world.y - view.top) / view.height() * screen.height,
        );
        sim.handle_input(InputEvent::CursorMoved { position, screen });
    }

    fn launch(sim: &mut Simulation, pull: Point) {
        let anchor = sim.projectile.anchor;
        cursor_at(sim, anchor);
        sim.handle_input(InputEvent::MouseDown(Button::Primary));
        cursor_at(sim, anchor + pull);
        sim.handle_input(InputEvent::MouseUp(Button::Primary));
    }

    fn fly(sim: &mut Simulation, position: Point, velocity: Point) {
        sim.projectile.position = position;
        sim.projectile.prev_position = position;
        sim.projectile.velocity = velocity;
        sim.projectile.phase = Phase::Flying;
    }

    #[test]
    fn test_rejects_invalid_scene() {
        let mut scene = Scene::standard();
        scene.targets[0].radius = -1.0;
        assert!(Simulation::new(scene).is_err());
    }

    #[test]
    fn test_cursor_starts_over_anchor() {
        let s = sim();
        let cursor = s.cursor_world();
        assert_approx_eq!(cursor.x, LAUNCH_ANCHOR_X);
        assert_approx_eq!(cursor.y, LAUNCH_ANCHOR_Y);
    }

    #[test]
    fn test_press_off_ball_does_nothing() {
        let mut s = sim();
        cursor_at(&mut s, Point::new(0.0, 0.0));
        s.handle_input(InputEvent::MouseDown(Button::Primary));
        assert_eq!(s.phase(), Phase::Idle);
        s.handle_input(InputEvent::MouseUp(Button::Primary));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.drain_events().count(), 0);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut s = sim();
        s.handle_input(InputEvent::MouseDown(Button::Secondary));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_drag_and_release_launches() {
        let mut s = sim();
        launch(&mut s, Point::new(-20.0, 10.0));
        assert_eq!(s.phase(), Phase::Flying);
        let v = s.projectile.velocity;
        assert_approx_eq!(v.x, 10.0, 1e-6);
        assert_approx_eq!(v.y, -5.0, 1e-6);
        assert_approx_eq!(s.projectile.position.x, LAUNCH_ANCHOR_X, 1e-6);
        assert_approx_eq!(s.projectile.position.y, LAUNCH_ANCHOR_Y, 1e-6);
        let events: Vec<_> = s.drain_events().collect();
        match events.as_slice() {
            [SimEvent::Launched { from, .. }] => assert_eq!(*from, s.projectile.position),
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_aiming_tracks_clamped_cursor() {
        let mut s = sim();
        let anchor = s.projectile.anchor;
        cursor_at(&mut s, anchor);
        s.handle_input(InputEvent::MouseDown(Button::Primary));
        cursor_at(&mut s, anchor + Point::new(-200.0, 0.0));
        assert_eq!(s.phase(), Phase::Aiming);
        assert_approx_eq!(s.projectile.position.distance(anchor), MAX_PULL, 1e-6);
        s.step();
        assert_approx_eq!(s.projectile.position.distance(anchor), MAX_PULL, 1e-6);
    }

    #[test]
    fn test_gravity_per_tick_in_flight() {
        let mut s = sim();
        launch(&mut s, Point::new(-30.0, 0.0));
        for _ in 0..10 {
            let before = s.projectile.velocity.y;
            s.step();
            assert_eq!(s.phase(), Phase::Flying);
            assert_approx_eq!(s.projectile.velocity.y - before, GRAVITY, 1e-9);
        }
    }

    #[test]
    fn test_comes_to_rest_on_the_same_tick() {
        let mut s = sim();
        fly(&mut s, Point::new(-200.0, 182.0), Point::new(0.04, -0.5));
        s.step();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.projectile.position, s.projectile.anchor);
        let events: Vec<_> = s.drain_events().collect();
        assert!(events.contains(&SimEvent::CameToRest));

        // Idle is terminal until the next valid press
        for _ in 0..5 {
            s.step();
        }
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.projectile.position, s.projectile.anchor);
    }

    #[test]
    fn test_floor_bounce_event() {
        let mut s = sim();
        fly(&mut s, Point::new(-200.0, 180.0), Point::new(3.0, 6.0));
        s.step();
        assert_eq!(s.projectile.position.y, FLOOR_Y - PROJECTILE_RADIUS);
        assert_approx_eq!(s.projectile.velocity.x, 2.1);
        assert_approx_eq!(s.projectile.velocity.y, -0.8 * 6.2);
        let events: Vec<_> = s.drain_events().collect();
        assert!(matches!(events[0], SimEvent::FloorBounce { .. }));
    }

    #[test]
    fn test_target_hit_damps_velocity() {
        let mut s = sim();
        // Integration moves the ball by v, so start one step short of the pig
        let v = Point::new(6.0, 0.0);
        fly(&mut s, Point::new(44.0, 182.0), v);
        let mut expected = s.projectile.clone();
        expected.integrate();
        let before_hit = expected.velocity;

        s.step();
        assert_eq!(s.projectile.position, Point::new(50.0, 182.0));
        assert!(!s.scene.targets[0].alive);
        assert_approx_eq!(s.projectile.velocity.x, before_hit.x * 0.1, 1e-12);
        assert_approx_eq!(s.projectile.velocity.y, before_hit.y * 0.1, 1e-12);
        assert_eq!(s.scene.alive_targets(), 2);
        let events: Vec<_> = s.drain_events().collect();
        assert!(events.contains(&SimEvent::TargetDestroyed {
            target: 0,
            position: Point::new(50.0, 182.0),
            cause: DestroyCause::Impact,
        }));
    }

    #[test]
    fn test_dead_target_is_not_hit_twice() {
        let mut s = sim();
        s.scene.targets[2].alive = false;
        let v = Point::new(5.0, 0.0);
        fly(&mut s, Point::new(400.0, 150.0) - v, v);
        s.step();
        assert_approx_eq!(s.projectile.velocity.x, 5.0);
    }

    #[test]
    fn test_zone_from_above_negates_vy() {
        let mut s = sim();
        // Drops onto the top of the upright log
        fly(&mut s, Point::new(0.0, 120.0), Point::new(1.0, 4.0));
        s.step();
        let p = s.projectile.position;
        assert!(p.y < 140.0);
        assert_approx_eq!(s.projectile.velocity.x, 1.0);
        assert_approx_eq!(s.projectile.velocity.y, -4.2);
        assert!(s.scene.zones[0].animation.triggered);
    }

    #[test]
    fn test_zone_from_side_negates_vx() {
        let mut s = sim();
        fly(&mut s, Point::new(-34.0, 160.0), Point::new(8.0, -0.2));
        s.step();
        assert_approx_eq!(s.projectile.velocity.x, -8.0);
        assert_approx_eq!(s.projectile.velocity.y, 0.0);
        let events: Vec<_> = s.drain_events().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::ZoneStruck { zone: 0, axis: Axis::Horizontal, .. }
        )));
    }

    #[test]
    fn test_fixed_zone_reflects_without_falling() {
        let mut s = sim();
        fly(&mut s, Point::new(240.0, 165.0), Point::new(8.0, -0.2));
        s.step();
        assert_approx_eq!(s.projectile.velocity.x, -8.0);
        assert!(!s.scene.zones[1].animation.triggered);
    }

    #[test]
    fn test_falling_log_saturates_and_crushes() {
        let mut s = sim();
        fly(&mut s, Point::new(-34.0, 130.0), Point::new(8.0, -2.0));
        s.step();
        assert!(s.scene.zones[0].animation.triggered);

        // Keep the ball airborne and away from everything while the log falls
        let mut last = s.scene.zones[0].animation.angle;
        for _ in 0..60 {
            fly(&mut s, Point::new(-500.0, -250.0), Point::new(0.0, -5.0));
            s.step();
            let angle = s.scene.zones[0].animation.angle;
            assert!(angle >= last);
            assert!(angle <= FALL_MAX_ANGLE);
            last = angle;
        }
        assert_eq!(last, FALL_MAX_ANGLE);
        assert!(!s.scene.targets[0].alive);
        let events: Vec<_> = s.drain_events().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::TargetDestroyed { target: 0, cause: DestroyCause::Crushed { zone: 0 }, .. }
        )));
    }

    #[test]
    fn test_rest_stands_logs_back_up() {
        let mut s = sim();
        s.scene.zones[0].animation.start(2.0);
        fly(&mut s, Point::new(-200.0, 182.0), Point::ZERO);
        s.step();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.scene.zones[0].animation.triggered);
    }

    #[test]
    fn test_click_in_flight_recalls() {
        let mut s = sim();
        launch(&mut s, Point::new(-30.0, 0.0));
        s.step();
        s.handle_input(InputEvent::MouseDown(Button::Primary));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.projectile.position, s.projectile.anchor);
        s.handle_input(InputEvent::MouseUp(Button::Primary));
        assert_eq!(s.phase(), Phase::Idle);
        let events: Vec<_> = s.drain_events().collect();
        assert_eq!(events.last(), Some(&SimEvent::Recalled));
    }

    #[test]
    fn test_camera_keys_apply_every_tick() {
        let mut s = sim();
        s.handle_input(InputEvent::KeyDown(Control::ZoomIn));
        for _ in 0..5 {
            s.step();
        }
        let width = s.viewport.width();
        assert!(width < MAX_VIEW_WIDTH);
        s.handle_input(InputEvent::KeyUp(Control::ZoomIn));
        s.step();
        assert_eq!(s.viewport.width(), width);
    }

    #[test]
    fn test_camera_moves_in_any_phase() {
        let mut s = sim();
        launch(&mut s, Point::new(-30.0, 0.0));
        s.handle_input(InputEvent::KeyDown(Control::ZoomIn));
        s.step();
        assert!(s.viewport.width() < MAX_VIEW_WIDTH);
    }
}
