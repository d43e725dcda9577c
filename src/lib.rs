pub mod audio;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod particles;
pub mod projectile;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod types;
pub mod viewport;
