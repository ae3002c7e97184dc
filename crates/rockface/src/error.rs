//! Game error type

use rock_engine::audio::AudioError;
use rock_engine::config::ConfigError;
use rock_engine::render::MeshError;

/// Errors that abort a tick or startup
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Render backend failure
    #[error("Render error: {0}")]
    Render(#[from] MeshError),

    /// Audio backend failure
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// A single-instance entity the game relies on is missing
    #[error("Missing singleton: {0}")]
    MissingSingleton(&'static str),
}

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;
