//! Headless model library
//!
//! Stores model templates by name and tracks every live render part so
//! leaks and stale handles show up in tests.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::{MeshError, MeshProvider, ModelInstance, RenderHandle};
use crate::foundation::math::Mat4;
use crate::physics::Obb;

/// Named model description
#[derive(Debug, Clone)]
pub struct ModelTemplate {
    /// Name used by [`MeshProvider::instantiate`]
    pub name: String,
    /// Number of render parts each clone owns
    pub parts: usize,
    /// Local-space bounds
    pub bounds: Obb,
    /// Authored placement
    pub transform: Mat4,
}

impl ModelTemplate {
    /// Single-part template at the origin
    pub fn new(name: impl Into<String>, bounds: Obb) -> Self {
        Self {
            name: name.into(),
            parts: 1,
            bounds,
            transform: Mat4::identity(),
        }
    }

    /// Set the number of render parts
    #[must_use]
    pub fn with_parts(mut self, parts: usize) -> Self {
        self.parts = parts;
        self
    }

    /// Set the authored placement
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Debug)]
struct LivePart {
    model: String,
    transform: Mat4,
}

/// In-memory [`MeshProvider`]
#[derive(Debug, Default)]
pub struct ModelLibrary {
    templates: HashMap<String, ModelTemplate>,
    parts: SlotMap<RenderHandle, LivePart>,
}

impl ModelLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, returning the one it replaced
    pub fn register(&mut self, template: ModelTemplate) -> Option<ModelTemplate> {
        log::debug!("Registered model '{}' ({} parts)", template.name, template.parts);
        self.templates.insert(template.name.clone(), template)
    }

    /// Look up a template
    pub fn template(&self, name: &str) -> Option<&ModelTemplate> {
        self.templates.get(name)
    }

    /// Number of live render parts
    pub fn live_parts(&self) -> usize {
        self.parts.len()
    }

    /// Whether a render part is still live
    pub fn is_live(&self, part: RenderHandle) -> bool {
        self.parts.contains_key(part)
    }

    /// Last matrix pushed to a part
    pub fn part_transform(&self, part: RenderHandle) -> Option<&Mat4> {
        self.parts.get(part).map(|live| &live.transform)
    }

    /// Model a part was cloned from
    pub fn part_model(&self, part: RenderHandle) -> Option<&str> {
        self.parts.get(part).map(|live| live.model.as_str())
    }
}

impl MeshProvider for ModelLibrary {
    fn instantiate(&mut self, model: &str) -> Result<ModelInstance, MeshError> {
        let template = self
            .templates
            .get(model)
            .ok_or_else(|| MeshError::UnknownModel(model.to_string()))?;

        let parts = (0..template.parts)
            .map(|_| {
                self.parts.insert(LivePart {
                    model: template.name.clone(),
                    transform: template.transform,
                })
            })
            .collect();

        Ok(ModelInstance {
            parts,
            bounds: template.bounds,
            transform: template.transform,
        })
    }

    fn release(&mut self, parts: &[RenderHandle]) {
        for part in parts {
            if self.parts.remove(*part).is_none() {
                log::trace!("Release of unknown render part {part:?}");
            }
        }
    }

    fn sync_transform(&mut self, part: RenderHandle, transform: &Mat4) -> Result<(), MeshError> {
        let live = self
            .parts
            .get_mut(part)
            .ok_or_else(|| MeshError::Backend(format!("stale render part {part:?}")))?;
        live.transform = *transform;
        Ok(())
    }

    fn shutdown(&mut self) {
        log::info!("Model library shut down with {} live parts", self.parts.len());
        self.parts.clear();
    }
}
