use crate::config::*;
use crate::types::Point;

/// Interaction state of the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resting at the launch anchor, waiting for a press on the ball.
    Idle,
    /// Pointer held down; the ball follows the cursor within `MAX_PULL`.
    Aiming,
    /// Released and moving under gravity.
    Flying,
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorContact {
    pub position: Point,
    /// Vertical speed at the moment of impact, before restitution.
    pub impact_speed: f64,
}

// The user-launched cannonball
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Point,
    pub prev_position: Point,
    pub velocity: Point,
    pub radius: f64,
    pub anchor: Point,
    pub press_origin: Point,
    pub phase: Phase,
}

/// Clamp `cursor` so that it lies no farther than `max_pull` from `origin`.
/// Points beyond the limit are moved onto the circle along the raw drag direction.
pub fn clamp_pull(origin: Point, cursor: Point, max_pull: f64) -> Point {
    let drag = cursor - origin;
    let length = drag.length();
    if length > max_pull {
        origin + drag * (max_pull / length)
    } else {
        cursor
    }
}

impl Projectile {
    pub fn new(anchor: Point, radius: f64) -> Self {
        Projectile {
            position: anchor,
            prev_position: anchor,
            velocity: Point::ZERO,
            radius,
            anchor,
            press_origin: anchor,
            phase: Phase::Idle,
        }
    }

    /// Strict circle hit test against the ball's current position.
    pub fn contains(&self, point: Point) -> bool {
        self.position.distance(point) < self.radius
    }

    /// `Idle -> Aiming` when the press lands on the ball. Returns whether aiming began.
    pub fn begin_aim(&mut self, press: Point) -> bool {
        if self.phase != Phase::Idle || !self.contains(press) {
            return false;
        }
        self.press_origin = press;
        self.position = press;
        self.prev_position = press;
        self.phase = Phase::Aiming;
        true
    }

    /// Track the cursor while aiming.
    pub fn aim_at(&mut self, cursor: Point) {
        if self.phase == Phase::Aiming {
            self.position = clamp_pull(self.press_origin, cursor, MAX_PULL);
        }
    }

    /// `Aiming -> Flying`. The launch velocity points from the release point back
    /// toward the press origin, scaled by `LAUNCH_STRENGTH`. The ball snaps back
    /// to the press origin and flies from there.
    pub fn release(&mut self, cursor: Point) -> Option<Point> {
        if self.phase != Phase::Aiming {
            return None;
        }
        let release = clamp_pull(self.press_origin, cursor, MAX_PULL);
        self.velocity = (self.press_origin - release) * LAUNCH_STRENGTH;
        self.position = self.press_origin;
        self.prev_position = self.press_origin;
        self.phase = Phase::Flying;
        Some(self.velocity)
    }

    /// Put the ball back on the anchor, at rest.
    pub fn settle(&mut self) {
        self.position = self.anchor;
        self.prev_position = self.anchor;
        self.velocity = Point::ZERO;
        self.phase = Phase::Idle;
    }

    pub fn floor_y(&self) -> f64 {
        FLOOR_Y - self.radius
    }

    /// Advance one tick of Euler integration: move, apply gravity, then clamp to
    /// the floor with an inelastic bounce.
    pub fn integrate(&mut self) -> Option<FloorContact> {
        self.prev_position = self.position;
        self.position += self.velocity;
        self.velocity.y += GRAVITY;

        let floor_y = self.floor_y();
        if self.position.y >= floor_y {
            self.position.y = floor_y;
            let impact_speed = self.velocity.y;
            self.velocity.y *= -BOUNCE_RESTITUTION;
            self.velocity.x *= FLOOR_FRICTION;
            return Some(FloorContact {
                position: self.position,
                impact_speed,
            });
        }
        None
    }

    pub fn is_resting(&self) -> bool {
        self.velocity.x.abs() <= REST_SPEED_X && self.velocity.y.abs() <= REST_SPEED_Y
    }

    /// Reflect the velocity along one axis.
    pub fn reflect(&mut self, axis: crate::collision::Axis) {
        self.velocity = axis.reflect(self.velocity);
    }

    /// Scale velocity on both axes.
    pub fn damp(&mut self, factor: f64) {
        self.velocity = self.velocity * factor;
    }

    /// Rendering orientation in radians: the launch direction while aiming, the
    /// direction of travel while flying.
    pub fn orientation(&self) -> f64 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Aiming => (self.press_origin - self.position).angle(),
            Phase::Flying => (self.position - self.prev_position).angle(),
        }
    }
}

impl Default for Projectile {
    fn default() -> Self {
        Projectile::new(Point::new(LAUNCH_ANCHOR_X, LAUNCH_ANCHOR_Y), PROJECTILE_RADIUS)
    }
}
