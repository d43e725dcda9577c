use crate::audio::{AudioManager, SoundEffect};
use crate::config;
use crate::error::GameError;
use crate::geometry;
use crate::input::{Control, InputEvent, InputSource};
use crate::particles::ParticleSystem;
use crate::render::{Renderer, build_frame};
use crate::scene::Scene;
use crate::simulation::{DestroyCause, SimEvent, Simulation};
use log::{debug, info, warn};
use macroquad::prelude::{get_frame_time, next_frame, vec2};

/// The Game struct owns the simulation and everything that reacts to it
pub struct Game {
    pub simulation: Simulation,
    pub particle_system: ParticleSystem,
    audio: AudioManager,
    tick_duration: f32,
    time_accumulator: f32,
    quit: bool,
}

impl Game {
    /// Create a game on the standard scene, stepping `tick_rate` times a second
    pub fn new(tick_rate: u32, mute: bool) -> Result<Self, GameError> {
        if tick_rate == 0 || tick_rate > config::MAX_TICK_RATE {
            return Err(GameError::InvalidTickRate {
                value: tick_rate,
                max: config::MAX_TICK_RATE,
            });
        }

        let simulation = Simulation::new(Scene::standard())?;
        info!(
            "Scene loaded with {} targets and {} obstacle zones.",
            simulation.scene.targets.len(),
            simulation.scene.zones.len()
        );
        info!("Simulating at {} ticks per second.", tick_rate);

        let audio = if mute {
            info!("Audio muted.");
            AudioManager::muted()
        } else {
            AudioManager::new()
        };

        Ok(Game {
            simulation,
            particle_system: ParticleSystem::new(),
            audio,
            tick_duration: 1.0 / tick_rate as f32,
            time_accumulator: 0.0,
            quit: false,
        })
    }

    /// Run the main loop until the window closes or a quit key is pressed
    pub async fn run(&mut self, input: &mut impl InputSource, renderer: &Renderer) -> Result<(), GameError> {
        self.audio.load_assets().await;
        info!("Starting main loop...");

        while !Renderer::window_should_close() && !self.quit {
            self.handle_input(input.poll());
            self.advance(get_frame_time());

            let frame = build_frame(&self.simulation);
            renderer.draw_frame(&frame, &self.particle_system);
            next_frame().await;
        }

        info!(
            "Exiting after {} ticks, {} of {} targets left.",
            self.simulation.tick(),
            self.simulation.scene.alive_targets(),
            self.simulation.scene.targets.len()
        );
        Ok(())
    }

    /// Apply a batch of input events in delivery order
    pub fn handle_input(&mut self, events: Vec<InputEvent>) {
        for event in events {
            if event == InputEvent::KeyDown(Control::Quit) {
                info!("Quit requested.");
                self.quit = true;
                continue;
            }
            self.simulation.handle_input(event);
        }
        self.process_events();
    }

    /// Consume frame time in fixed ticks. Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.time_accumulator += frame_time;

        let mut ticks = 0;
        while self.time_accumulator >= self.tick_duration {
            if ticks == config::MAX_TICKS_PER_FRAME {
                // Drop the backlog after a stall
                debug!(
                    "Dropping {:.3}s of simulation time after {} ticks",
                    self.time_accumulator, ticks
                );
                self.time_accumulator = 0.0;
                break;
            }
            self.time_accumulator -= self.tick_duration;
            self.update_simulation();
            ticks += 1;
        }
        ticks
    }

    /// Update the simulation state for one fixed time step
    fn update_simulation(&mut self) {
        self.simulation.step();
        self.process_events();
        self.particle_system.update(self.tick_duration);
    }

    fn process_events(&mut self) {
        let events: Vec<SimEvent> = self.simulation.drain_events().collect();
        for event in events {
            self.react(event);
        }
    }

    // Turn a simulation event into logs, particles and sound
    fn react(&mut self, event: SimEvent) {
        match event {
            SimEvent::Launched { from, velocity } => {
                info!(
                    "Launched from ({:.1}, {:.1}) at ({:.2}, {:.2})",
                    from.x, from.y, velocity.x, velocity.y
                );
                self.audio.play(SoundEffect::Launch, 0.6);
            }
            SimEvent::FloorBounce { position, impact_speed } => {
                if impact_speed < config::MIN_AUDIBLE_BOUNCE {
                    return;
                }
                let strength = (impact_speed / 5.0).min(2.0) as f32;
                self.particle_system.spawn_dust(position.to_vec2(), strength);
                self.audio.play(SoundEffect::Bounce, strength * 0.5);
            }
            SimEvent::ZoneStruck { zone, position, .. } => {
                let Some(struck) = self.simulation.scene.zones.get(zone) else {
                    warn!("Struck unknown zone {}", zone);
                    return;
                };
                let away = (position - struck.center).to_vec2();
                let direction = if away.length_squared() > 0.0 { away } else { vec2(0.0, -1.0) };
                self.particle_system
                    .spawn_splinters(position.to_vec2(), direction, geometry::WOOD);
                self.audio.play(SoundEffect::WoodKnock, 0.7);
            }
            SimEvent::TargetDestroyed { target, position, cause } => {
                match cause {
                    DestroyCause::Impact => info!("Target {} destroyed by a direct hit.", target),
                    DestroyCause::Crushed { zone } => {
                        let name = self.simulation.scene.zones.get(zone).map_or("a log", |z| z.name);
                        info!("Target {} crushed by the {}.", target, name);
                    }
                }
                self.particle_system.spawn_burst(
                    position.to_vec2(),
                    geometry::PIG_GREEN,
                    config::DEBRIS_PARTICLES,
                    150.0,
                    0.8,
                );
                self.audio.play(SoundEffect::Pop, 0.8);
                if self.simulation.scene.alive_targets() == 0 {
                    info!("All targets destroyed.");
                }
            }
            SimEvent::CameToRest => info!("Cannonball came to rest, ready to launch."),
            SimEvent::Recalled => info!("Cannonball recalled to the sling."),
        }
    }
}
