//! Collision detection
//!
//! Every collidable entity's local box is moved into world space once per
//! tick, then each unordered pair is tested with the separating-axis test.
//! Overlaps are reported in both orders so resolution can look at the pair
//! from either side.

use rock_engine::prelude::*;

use crate::components::{Collidable, MeshCollection, Transform};

/// One side of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Entity the contact is reported to
    pub entity: Entity,
    /// Entity it overlaps
    pub other: Entity,
    /// World box of `entity`
    pub bounds: Obb,
    /// World box of `other`
    pub other_bounds: Obb,
}

/// Pairwise OBB detection with reusable buffers
#[derive(Debug, Default)]
pub struct CollisionSystem {
    boxes: Vec<(Entity, Obb)>,
    contacts: Vec<Contact>,
}

impl CollisionSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every overlapping pair in `world`
    ///
    /// Each pair appears twice, once with each entity as `entity`.
    pub fn detect(&mut self, world: &World) -> &[Contact] {
        self.boxes.clear();
        self.contacts.clear();

        let query = Query::new()
            .with::<Collidable>()
            .with::<Transform>()
            .with::<MeshCollection>();
        for entity in world.query(&query) {
            if let (Some(transform), Some(collection)) =
                (world.get::<Transform>(entity), world.get::<MeshCollection>(entity))
            {
                self.boxes.push((entity, collection.bounds.to_world(&transform.matrix)));
            }
        }

        for (i, (a, box_a)) in self.boxes.iter().enumerate() {
            for (b, box_b) in &self.boxes[i + 1..] {
                if !box_a.intersects(box_b) {
                    continue;
                }
                self.contacts.push(Contact {
                    entity: *a,
                    other: *b,
                    bounds: *box_a,
                    other_bounds: *box_b,
                });
                self.contacts.push(Contact {
                    entity: *b,
                    other: *a,
                    bounds: *box_b,
                    other_bounds: *box_a,
                });
            }
        }

        log::trace!("{} collidables, {} contacts", self.boxes.len(), self.contacts.len());
        &self.contacts
    }
}
