use crate::config;
use macroquad::prelude::{Color, Vec2, draw_circle, vec2};
use rand::Rng;

// Represents a single particle
#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: Color,
    size: f32,
    lifetime: f32, // Time remaining in seconds
    initial_lifetime: f32,
    weight: f32, // Fraction of PARTICLE_GRAVITY applied
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, color: Color, size: f32, lifetime: f32, weight: f32) -> Self {
        Particle {
            position,
            velocity,
            color,
            size,
            lifetime,
            initial_lifetime: lifetime,
            weight,
        }
    }

    fn update(&mut self, dt: f32) {
        self.velocity.y += config::PARTICLE_GRAVITY * self.weight * dt;
        self.position += self.velocity * dt;
        self.lifetime -= dt;
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    fn faded_color(&self) -> Color {
        let mut color = self.color;
        color.a *= (self.lifetime / self.initial_lifetime).clamp(0.0, 1.0);
        color
    }
}

// Manages a collection of particles
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: rand::rngs::ThreadRng,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem {
            particles: Vec::new(),
            rng: rand::thread_rng(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Radial burst with gravity, used when a target pops.
    pub fn spawn_burst(&mut self, position: Vec2, color: Color, count: usize, max_speed: f32, lifetime: f32) {
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.gen_range(0.2..1.0) * max_speed;
            let velocity = vec2(angle.cos() * speed, angle.sin() * speed);
            let size = self.rng.gen_range(2.0..5.0);
            let particle_lifetime = lifetime * self.rng.gen_range(0.5..1.0);
            self.particles
                .push(Particle::new(position, velocity, color, size, particle_lifetime, 1.0));
        }
    }

    /// Low, slow puff kicked up sideways when the ball hits the ground.
    pub fn spawn_dust(&mut self, position: Vec2, strength: f32) {
        let dust = Color::new(0.85, 0.8, 0.65, 0.8);
        for _ in 0..config::DUST_PARTICLES {
            let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let velocity = vec2(
                direction * self.rng.gen_range(10.0..40.0) * strength,
                -self.rng.gen_range(5.0..25.0) * strength,
            );
            let lifetime = self.rng.gen_range(0.3..0.6);
            self.particles
                .push(Particle::new(position, velocity, dust, 3.0, lifetime, 0.2));
        }
    }

    /// Wood chips thrown back along the rebound direction.
    pub fn spawn_splinters(&mut self, position: Vec2, direction: Vec2, color: Color) {
        let base_angle = direction.y.atan2(direction.x);
        let spread = 50f32.to_radians();
        for _ in 0..config::SPLINTER_PARTICLES {
            let angle = base_angle + self.rng.gen_range(-0.5..0.5) * spread;
            let speed = self.rng.gen_range(60.0..140.0);
            let velocity = vec2(angle.cos() * speed, angle.sin() * speed);
            let lifetime = self.rng.gen_range(0.4..0.8);
            self.particles
                .push(Particle::new(position, velocity, color, 2.5, lifetime, 1.0));
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_alive()
        });
    }

    /// Draw in world space; the caller sets the camera.
    pub fn draw(&self) {
        for particle in &self.particles {
            draw_circle(
                particle.position.x,
                particle.position.y,
                particle.size,
                particle.faded_color(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{BLUE, RED};

    #[test]
    fn test_particle_new_and_lifetime() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, RED, 2.0, 1.0, 0.0);
        assert!(p.is_alive());
        assert_eq!(p.lifetime, 1.0);
    }

    #[test]
    fn test_particle_update_lifetime() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, RED, 2.0, 1.0, 0.0);
        p.update(0.6);
        assert!(p.is_alive());
        assert!((p.lifetime - 0.4).abs() < 1e-6);
        p.update(0.5);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_particle_falls_under_gravity() {
        let mut p = Particle::new(Vec2::ZERO, vec2(10.0, 0.0), RED, 2.0, 1.0, 1.0);
        p.update(0.1);
        assert!((p.position.x - 1.0).abs() < 1e-5);
        assert!(p.position.y > 0.0);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn test_particle_fade() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, RED, 2.0, 2.0, 0.0);
        assert_eq!(p.faded_color().a, 1.0);
        p.update(1.0);
        assert!((p.faded_color().a - 0.5).abs() < 1e-6);
        p.update(2.0);
        assert_eq!(p.faded_color().a, 0.0);
    }

    #[test]
    fn test_particle_system_spawn_burst() {
        let mut ps = ParticleSystem::new();
        ps.spawn_burst(Vec2::ZERO, BLUE, 10, 100.0, 1.0);
        assert_eq!(ps.len(), 10);
        assert_eq!(ps.particles[0].color, BLUE);
    }

    #[test]
    fn test_particle_system_update_expires() {
        let mut ps = ParticleSystem::new();
        ps.spawn_burst(Vec2::ZERO, BLUE, 5, 100.0, 0.1);
        ps.spawn_dust(Vec2::ZERO, 1.0);
        ps.spawn_splinters(Vec2::ZERO, vec2(-1.0, 0.0), RED);
        assert_eq!(ps.len(), 5 + config::DUST_PARTICLES + config::SPLINTER_PARTICLES);

        ps.update(0.01);
        assert!(ps.particles.iter().any(|p| p.position != Vec2::ZERO));

        ps.update(1.0);
        assert!(ps.is_empty());
    }
}
