//! Configuration constants for the slingshot demo.
//!
//! World coordinates are y-down: the floor surface sits at `FLOOR_Y` and
//! gravity pulls toward +y. All physics constants are per simulation tick.

// Window and timing
pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 600;
pub const TICK_RATE: u32 = 60; // Physics ticks per second
pub const MAX_TICK_RATE: u32 = 1000;
pub const MAX_TICKS_PER_FRAME: u32 = 8; // Caps catch-up after a stall

// World limits the viewport may never leave
pub const WORLD_LEFT: f64 = -600.0;
pub const WORLD_RIGHT: f64 = 600.0;
pub const WORLD_TOP: f64 = -300.0;
pub const WORLD_BOTTOM: f64 = 300.0;

// Camera
pub const PAN_STEP: f64 = 5.0; // World units per tick while a pan key is held
pub const ZOOM_FACTOR: f64 = 1.02; // Bound scale per tick while a zoom key is held
pub const MIN_VIEW_WIDTH: f64 = 800.0;
pub const MAX_VIEW_WIDTH: f64 = 1200.0;

// Projectile
pub const PROJECTILE_RADIUS: f64 = 18.0;
pub const LAUNCH_ANCHOR_X: f64 = -400.0;
pub const LAUNCH_ANCHOR_Y: f64 = 100.0;
pub const MAX_PULL: f64 = 30.0; // Longest allowed aim vector
pub const LAUNCH_STRENGTH: f64 = 0.5; // Velocity per unit of pull

// Flight
pub const GRAVITY: f64 = 0.2;
pub const FLOOR_Y: f64 = 200.0;
pub const BOUNCE_RESTITUTION: f64 = 0.8; // vy retained (and negated) on floor contact
pub const FLOOR_FRICTION: f64 = 0.7; // vx retained on floor contact
pub const REST_SPEED_X: f64 = 0.05;
pub const REST_SPEED_Y: f64 = 1.0;
pub const TARGET_HIT_DAMPING: f64 = 0.1; // Velocity retained after smashing a target

// Obstacle fall animation (degrees)
pub const FALL_START_ANGLE: f64 = 0.1;
pub const FALL_SPIN_TRANSFER: f64 = 0.2; // angular_v = vx * this on impact
pub const FALL_ANGULAR_ACCEL: f64 = 0.3;
pub const FALL_MAX_ANGLE: f64 = 90.0;
pub const CRUSH_ANGLE: f64 = 45.0;

// Tessellation
pub const CANNONBALL_SEGMENTS: usize = 20;
pub const TARGET_SEGMENTS: usize = 30;
pub const FLOOR_STRIPES: usize = 20;
pub const FLOOR_STRIPE_STEP: f64 = 5.0;
pub const FLOOR_STRIPE_HEIGHT: f64 = 10.0;

// Effects
pub const DEBRIS_PARTICLES: usize = 24;
pub const DUST_PARTICLES: usize = 6;
pub const SPLINTER_PARTICLES: usize = 10;
pub const PARTICLE_GRAVITY: f32 = 240.0; // World units / s^2
pub const MIN_AUDIBLE_BOUNCE: f64 = 1.5; // Impact speed below which bounces are silent
pub const AUDIO_SAMPLE_RATE: u32 = 22_050;
