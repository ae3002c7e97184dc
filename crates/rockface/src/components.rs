//! Game-specific components
//!
//! Entities have no type of their own; the tags and fragments below decide
//! which systems touch them.

use rock_engine::prelude::*;

use crate::config::PlayerConfig;

// Tags

/// The ship steered by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Player;

impl Component for Player {}

/// Hostile entity; the round is won once none remain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enemy;

impl Component for Enemy {}

/// A fired shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projectile;

impl Component for Projectile {}

/// The single entity that owns round state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameManagerTag;

impl Component for GameManagerTag {}

/// Takes part in collision detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collidable;

impl Component for Collidable {}

/// Static wall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Obstacle;

impl Component for Obstacle {}

/// Removed by the end-of-tick sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingDestroy;

impl Component for PendingDestroy {}

/// Round has ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOverTag;

impl Component for GameOverTag {}

/// Gameplay updates are suspended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paused;

impl Component for Paused {}

// Fragments

/// World matrix of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position, orientation and scale combined
    pub matrix: Mat4,
}

impl Component for Transform {}

impl Transform {
    /// Wrap a matrix
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Identity transform moved to `position`
    pub fn at(position: Vec3) -> Self {
        Self::new(Mat4::new_translation(&position))
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.matrix.position()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Mat4::identity())
    }
}

/// World-space velocity in units per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec3);

impl Component for Velocity {}

/// Hit points; out of play at zero or below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

impl Component for Health {}

/// Remaining fragmentation generations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shatters(pub i32);

impl Component for Shatters {}

/// Seconds of damage immunity left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invulnerable(pub f32);

impl Component for Invulnerable {}

/// Player steering state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Heading around the vertical axis in radians
    pub angle: f32,
    /// Turn rate in radians per second
    pub angular_velocity: f32,
}

impl Component for Rotation {}

/// Player movement tuning and momentum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Current momentum, applied as a local translation every tick
    pub velocity: Vec3,
    /// Acceleration while thrusting
    pub thrust: f32,
    /// Per-tick velocity multiplier
    pub drag: f32,
    /// Speed cap while thrusting
    pub max_speed: f32,
}

impl Component for Physics {}

impl Default for Physics {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            thrust: 3.0,
            drag: 0.98,
            max_speed: 5.0,
        }
    }
}

impl From<&PlayerConfig> for Physics {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            velocity: Vec3::zeros(),
            thrust: config.thrust,
            drag: config.drag,
            max_speed: config.max_speed,
        }
    }
}

/// Seconds until the weapon can fire again
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiringState(pub f32);

impl Component for FiringState {}

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiComponents {
    /// Player hit points left
    pub lives: i32,
    /// Score of the running round
    pub current_score: i32,
    /// Best score this session
    pub high_score: i32,
    /// Level number
    pub current_level: i32,
}

impl Component for UiComponents {}

/// Render parts owned by an entity plus their local bounds
///
/// The parts belong to this entity alone; they are released through the mesh
/// provider right before the entity is destroyed.
#[derive(Debug, Clone, Default)]
pub struct MeshCollection {
    /// Cloned render parts
    pub parts: Vec<RenderHandle>,
    /// Untransformed bounding box
    pub bounds: Obb,
}

impl Component for MeshCollection {}

/// Sound played when the entity fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundCue {
    /// Name handed to the audio sink
    pub name: String,
}

impl Component for SoundCue {}
