//! Push entity transforms to their render parts

use rock_engine::prelude::*;

use crate::components::{MeshCollection, Transform};
use crate::error::GameResult;

/// Copy every entity's world matrix onto each render part it owns
pub fn update(world: &World, meshes: &mut dyn MeshProvider) -> GameResult<()> {
    for entity in world.query(&Query::new().with::<Transform>().with::<MeshCollection>()) {
        let (Some(transform), Some(collection)) =
            (world.get::<Transform>(entity), world.get::<MeshCollection>(entity))
        else {
            continue;
        };

        for part in &collection.parts {
            meshes.sync_transform(*part, &transform.matrix)?;
        }
    }
    Ok(())
}
