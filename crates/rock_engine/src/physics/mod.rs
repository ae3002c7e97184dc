//! Physics module for collision detection
//!
//! Provides oriented bounding boxes and the separating-axis test used for
//! entity-versus-entity overlap checks.

pub mod obb;

pub use obb::Obb;
