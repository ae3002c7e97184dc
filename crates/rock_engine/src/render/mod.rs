//! # Rendering Contract
//!
//! Gameplay never touches GPU state. It asks a [`MeshProvider`] to clone a
//! named model into a set of render parts, pushes world matrices to those
//! parts once per tick, and releases them when the owning entity goes away.
//!
//! [`ModelLibrary`] is the in-memory provider used headless and in tests.

pub mod library;

pub use library::{ModelLibrary, ModelTemplate};

use crate::foundation::math::Mat4;
use crate::physics::Obb;

slotmap::new_key_type! {
    /// Handle to one render part owned by the mesh provider
    pub struct RenderHandle;
}

/// Mesh provider errors
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    /// No model registered under this name
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Backend failure
    #[error("Render backend error: {0}")]
    Backend(String),
}

/// A freshly cloned model
#[derive(Debug, Clone)]
pub struct ModelInstance {
    /// Render parts now owned by the caller
    pub parts: Vec<RenderHandle>,
    /// Local-space bounding box covering every part
    pub bounds: Obb,
    /// Placement the model was authored with
    pub transform: Mat4,
}

/// Render collaborator surface
pub trait MeshProvider {
    /// Clone the named model into new render parts
    fn instantiate(&mut self, model: &str) -> Result<ModelInstance, MeshError>;

    /// Destroy render parts; unknown handles are ignored
    fn release(&mut self, parts: &[RenderHandle]);

    /// Set the world matrix of one render part
    fn sync_transform(&mut self, part: RenderHandle, transform: &Mat4) -> Result<(), MeshError>;

    /// Release every backend resource
    fn shutdown(&mut self) {}
}
