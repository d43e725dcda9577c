// Error types: scene validation and startup failures

use thiserror::Error;

/// Scene descriptor errors
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("Zone {index} ({name}) has an empty trigger range: min_x {min_x} >= max_x {max_x}")]
    EmptyTrigger {
        index: usize,
        name: &'static str,
        min_x: f64,
        max_x: f64,
    },
    #[error("Target {index} has a non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },
    #[error("Zone {zone} crushes target {target}, but the scene has only {count} targets")]
    UnknownCrushTarget {
        zone: usize,
        target: usize,
        count: usize,
    },
}

/// Startup errors
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("Tick rate must be between 1 and {max}, got {value}")]
    InvalidTickRate { value: u32, max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_logger;
    use log::LevelFilter;
    use std::error::Error as _;

    #[test]
    fn test_second_logger_install_is_a_game_error() {
        let _ = init_logger(LevelFilter::Off, None);
        let err: GameError = init_logger(LevelFilter::Off, None).unwrap_err().into();
        assert!(matches!(err, GameError::Logger(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Failed to initialize logger"));
    }

    #[test]
    fn test_scene_error_converts() {
        let err: GameError = SceneError::NonPositiveRadius { index: 1, radius: 0.0 }.into();
        assert!(matches!(err, GameError::Scene(_)));
        assert_eq!(err.to_string(), "Invalid scene: Target 1 has a non-positive radius 0");
    }
}
