//! Velocity integration

use rock_engine::prelude::*;

use crate::components::{Transform, Velocity};

/// Translate every moving entity by `velocity * delta_time` in world space
///
/// The stored velocity is left untouched.
pub fn update(world: &mut World, delta_time: f32) {
    for entity in world.query(&Query::new().with::<Transform>().with::<Velocity>()) {
        let Some(Velocity(velocity)) = world.get::<Velocity>(entity).copied() else {
            continue;
        };
        if let Some(transform) = world.get_mut::<Transform>(entity) {
            transform.matrix = transform.matrix.translate_global(&(velocity * delta_time));
        }
    }
}
