//! Entity spawning and removal
//!
//! Every spawn clones its model through the mesh provider first. An unknown
//! model skips the spawn with a warning; any other provider failure aborts.

use rand::seq::SliceRandom;
use rand::Rng;
use rock_engine::prelude::*;

use crate::components::{
    Collidable, Enemy, GameManagerTag, Health, MeshCollection, Obstacle, Player, Projectile,
    Shatters, SoundCue, Transform, Velocity,
};
use crate::config::{EnemyArchetype, GameConfig};
use crate::error::GameResult;
use crate::level::ObstaclePlacement;

/// Random horizontal unit vector
///
/// Each axis is drawn from the integers in `-10..10` and pushed to at least
/// one unit away from zero before normalizing, so neither axis is ever flat.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let x = away_from_zero(rng.gen_range(-10_i8..10).into());
    let z = away_from_zero(rng.gen_range(-10_i8..10).into());
    Vec3::new(x, 0.0, z).normalize()
}

fn away_from_zero(value: f32) -> f32 {
    if value <= 0.0 && value > -1.0 {
        -1.0
    } else if value >= 0.0 && value < 1.0 {
        1.0
    } else {
        value
    }
}

/// Clone a model onto a new entity with its authored transform
///
/// Returns `None` when the model is unknown.
pub fn spawn_model(world: &mut World, meshes: &mut dyn MeshProvider, model: &str) -> GameResult<Option<Entity>> {
    let instance = match meshes.instantiate(model) {
        Ok(instance) => instance,
        Err(MeshError::UnknownModel(name)) => {
            log::warn!("Skipping spawn: model '{name}' is not loaded");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let entity = world.create();
    world.attach(entity, Transform::new(instance.transform));
    world.attach(
        entity,
        MeshCollection {
            parts: instance.parts,
            bounds: instance.bounds,
        },
    );
    Ok(Some(entity))
}

/// Spawn the player ship
pub fn spawn_player(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    audio: &dyn AudioSink,
    config: &GameConfig,
) -> GameResult<Option<Entity>> {
    let Some(player) = spawn_model(world, meshes, &config.player.model)? else {
        return Ok(None);
    };

    world.attach(player, Player);
    world.attach(player, Collidable);
    world.attach(player, Health(config.player.hitpoints));
    if audio.is_available() {
        world.attach(
            player,
            SoundCue {
                name: config.player.shot_sound.clone(),
            },
        );
    }
    Ok(Some(player))
}

/// Spawn a round-start enemy at its model's authored placement
pub fn spawn_enemy<R: Rng + ?Sized>(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    rng: &mut R,
    archetype: &EnemyArchetype,
) -> GameResult<Option<Entity>> {
    let Some(enemy) = spawn_model(world, meshes, &archetype.model)? else {
        return Ok(None);
    };

    world.attach(enemy, Enemy);
    world.attach(enemy, Collidable);
    world.attach(enemy, Velocity(random_velocity(rng) * archetype.speed));
    world.attach(enemy, Health(archetype.hitpoints));
    if archetype.initial_shatter_count > 0 {
        world.attach(enemy, Shatters(archetype.initial_shatter_count));
    }
    Ok(Some(enemy))
}

/// Spawn one child of a shattered enemy
///
/// The archetype is drawn at random. `remaining` is the parent's shatter count
/// minus one; the child only carries [`Shatters`] while it stays positive.
pub fn spawn_shard<R: Rng + ?Sized>(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    rng: &mut R,
    config: &GameConfig,
    parent: &Mat4,
    remaining: i32,
) -> GameResult<Option<Entity>> {
    let Some(archetype) = config.enemies.choose(rng) else {
        return Ok(None);
    };
    let Some(shard) = spawn_model(world, meshes, &archetype.model)? else {
        return Ok(None);
    };

    world.attach(shard, Enemy);
    world.attach(shard, Collidable);
    world.attach(shard, Velocity(random_velocity(rng) * archetype.speed));
    world.attach(shard, Health(archetype.hitpoints));
    if remaining > 0 {
        world.attach(shard, Shatters(remaining));
    }
    world.attach(
        shard,
        Transform::new(parent.scale_local(&Vec3::repeat(archetype.shatter_scale))),
    );
    Ok(Some(shard))
}

/// Spawn a projectile leaving `shooter` along its facing direction
pub fn spawn_projectile(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    config: &GameConfig,
    shooter: &Mat4,
) -> GameResult<Option<Entity>> {
    let Some(bullet) = spawn_model(world, meshes, &config.bullet.model)? else {
        return Ok(None);
    };

    let facing = -Vec3::new(shooter.m13, shooter.m23, shooter.m33);
    let direction = Vec3::new(facing.x, 0.0, facing.z)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::zeros);

    world.attach(bullet, Projectile);
    world.attach(bullet, Collidable);
    world.attach(bullet, Velocity(direction * config.bullet.speed));
    world.attach(bullet, Transform::new(*shooter));
    Ok(Some(bullet))
}

/// Spawn a wall
pub fn spawn_obstacle(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    placement: &ObstaclePlacement,
) -> GameResult<Option<Entity>> {
    let Some(wall) = spawn_model(world, meshes, &placement.model)? else {
        return Ok(None);
    };

    world.attach(wall, Obstacle);
    world.attach(wall, Collidable);
    world.attach(wall, Transform::new(placement.transform()));
    Ok(Some(wall))
}

/// Spawn the round's manager entity
pub fn spawn_game_manager(world: &mut World) -> Entity {
    let manager = world.create();
    world.attach(manager, GameManagerTag);
    manager
}

/// Release an entity's render parts, then destroy it
pub fn despawn(world: &mut World, meshes: &mut dyn MeshProvider, entity: Entity) -> bool {
    if let Some(collection) = world.detach::<MeshCollection>(entity) {
        meshes.release(&collection.parts);
    }
    world.destroy(entity)
}
