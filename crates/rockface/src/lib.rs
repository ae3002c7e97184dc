//! # Rockface
//!
//! Arcade shooter on top of `rock_engine`: a ship turns, thrusts and fires at
//! enemies that bounce off the arena walls and shatter into smaller enemies
//! when destroyed.
//!
//! Everything runs headless against the engine's collaborator contracts. The
//! host feeds input into [`Game::input_mut`] and calls [`Game::tick`] once per
//! frame.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rock_engine::prelude::*;
//! use rockface::{Game, GameConfig, GameState, LevelLayout, SimContext};
//!
//! let config = Arc::new(GameConfig::builtin()?);
//! let layout = LevelLayout::default();
//! let mut meshes = ModelLibrary::new();
//! layout.register_models(&mut meshes);
//!
//! let confirm = config.controls.confirm;
//! let ctx = SimContext::with_seed(config, Some(42));
//! let mut game = Game::new(ctx, layout, Box::new(meshes), Box::new(SilentAudio::new()))?;
//!
//! game.input_mut().set_pressed(confirm, true);
//! game.tick(1.0 / 60.0)?;
//! assert_eq!(game.state(), GameState::Gameplay);
//! # Ok::<(), rockface::GameError>(())
//! ```

#![warn(missing_docs)]

pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod game;
pub mod level;
pub mod setup;
pub mod spawn;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

pub use config::GameConfig;
pub use context::{GameState, SimContext};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use level::LevelLayout;
