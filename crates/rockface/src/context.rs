//! Simulation context
//!
//! Values every system may read: the frame's delta time, the input snapshot,
//! the configuration and the current game state. The orchestrator owns one
//! context and hands it to each system by reference.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rock_engine::input::InputState;

use crate::config::GameConfig;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for the player to start a round
    MainMenu,
    /// A round is running
    Gameplay,
    /// The round ended in a win or a loss
    GameOver,
}

/// Shared per-tick simulation state
#[derive(Debug)]
pub struct SimContext {
    /// Seconds covered by the current tick
    pub delta_time: f32,

    /// Input snapshot for the current tick
    pub input: InputState,

    /// Resolved configuration
    pub config: Arc<GameConfig>,

    /// Current game state
    pub state: GameState,

    /// Random source for spawn velocities and archetype picks
    pub rng: StdRng,
}

impl SimContext {
    /// Create a context in the main menu, seeded from the configuration
    pub fn new(config: Arc<GameConfig>) -> Self {
        let seed = config.sim.seed;
        Self::with_seed(config, (seed != 0).then_some(seed))
    }

    /// Create a context with an explicit seed, or entropy when `None`
    pub fn with_seed(config: Arc<GameConfig>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            delta_time: 0.0,
            input: InputState::new(),
            config,
            state: GameState::MainMenu,
            rng,
        }
    }

    /// Change state, logging the transition
    pub fn transition(&mut self, next: GameState) {
        if self.state != next {
            log::info!("Game state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
