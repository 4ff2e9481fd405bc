//! Game error types

use snake_engine::config::ConfigError;
use snake_engine::physics::GeometryError;
use snake_engine::scheduler::SchedulerError;
use thiserror::Error;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Bounds could not be derived
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An executor could not be started
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// A thread panicked while holding the game lock
    #[error("Game state lock poisoned")]
    LockPoisoned,
}
