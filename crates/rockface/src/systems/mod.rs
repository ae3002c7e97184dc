//! Gameplay systems
//!
//! Run once per gameplay tick in this order: render sync, movement, player
//! control, collision detection and combat resolution, death, then the
//! win/lose check and the end-of-tick sweep.

pub mod render_sync;
pub mod movement;
pub mod player;
pub mod collision;
pub mod combat;
pub mod death;
pub mod lifecycle;

pub use collision::{CollisionSystem, Contact};
pub use combat::{CombatRole, CombatRule};
pub use lifecycle::Outcome;
