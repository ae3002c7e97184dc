//! Round setup and teardown
//!
//! Entering gameplay swaps the music, resets the HUD and spawns the round's
//! entities. Leaving it removes every gameplay entity and brings the menu music
//! back. The HUD entity lives across rounds.

use rock_engine::prelude::*;

use crate::components::{
    Collidable, Enemy, GameManagerTag, Health, Obstacle, Player, Projectile, Shatters, Velocity,
};
use crate::config::GameConfig;
use crate::context::SimContext;
use crate::error::GameResult;
use crate::level::LevelLayout;
use crate::spawn;
use crate::ui;

/// Populate the world for a new round
pub fn enter_gameplay(
    world: &mut World,
    ctx: &mut SimContext,
    meshes: &mut dyn MeshProvider,
    audio: &mut dyn AudioSink,
    layout: &LevelLayout,
) -> GameResult<()> {
    let config = ctx.config.clone();

    audio.stop_music()?;
    audio.play_music(&config.level.music, true)?;

    ui::set_level(world, config.level.number);
    ui::set_lives(world, config.player.hitpoints);
    ui::reset_score(world);

    spawn::spawn_player(world, meshes, audio, &config)?;
    for archetype in &config.enemies {
        spawn::spawn_enemy(world, meshes, &mut ctx.rng, archetype)?;
    }
    for placement in &layout.obstacles {
        spawn::spawn_obstacle(world, meshes, placement)?;
    }
    spawn::spawn_game_manager(world);

    log::info!(
        "Level {} '{}' started with {} enemies",
        config.level.number,
        layout.name,
        world.count(&Query::new().with::<Enemy>())
    );
    Ok(())
}

/// Query matching every entity that belongs to a round
pub fn gameplay_entities() -> Query {
    Query::new()
        .any::<Player>()
        .any::<Enemy>()
        .any::<Projectile>()
        .any::<GameManagerTag>()
        .any::<Collidable>()
        .any::<Obstacle>()
        .any::<Shatters>()
        .any::<Health>()
        .any::<Velocity>()
}

/// Remove every gameplay entity, returning how many were destroyed
pub fn remove_gameplay_entities(world: &mut World, meshes: &mut dyn MeshProvider) -> usize {
    world
        .query(&gameplay_entities())
        .filter(|entity| spawn::despawn(world, meshes, *entity))
        .count()
}

/// Tear the round down and return to the menu
pub fn exit_gameplay(
    world: &mut World,
    meshes: &mut dyn MeshProvider,
    audio: &mut dyn AudioSink,
    config: &GameConfig,
) -> GameResult<()> {
    audio.stop_music()?;
    let removed = remove_gameplay_entities(world, meshes);
    audio.play_music(&config.menu_music, true)?;

    log::info!("Round cleared ({removed} entities removed)");
    Ok(())
}
