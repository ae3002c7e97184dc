//! Enemy death and shattering

use rock_engine::prelude::*;

use crate::components::{Enemy, Health, PendingDestroy, Shatters, Transform};
use crate::context::SimContext;
use crate::error::GameResult;
use crate::spawn;
use crate::ui;

/// Score and remove dead enemies, splitting those that still shatter
///
/// Returns the number of enemies that died this tick. Enemies already marked
/// for removal are skipped so a kill is only scored once.
pub fn update(world: &mut World, ctx: &mut SimContext, meshes: &mut dyn MeshProvider) -> GameResult<usize> {
    let config = ctx.config.clone();
    let mut deaths = 0;

    for enemy in world.query(&Query::new().with::<Enemy>().with::<Health>().without::<PendingDestroy>()) {
        if world.get::<Health>(enemy).map_or(true, |health| health.0 > 0) {
            continue;
        }

        ui::add_score(world, config.enemy_bonus);
        world.attach(enemy, PendingDestroy);
        deaths += 1;

        let Some(Shatters(count)) = world.get::<Shatters>(enemy).copied() else {
            continue;
        };
        if count <= 0 {
            continue;
        }
        let Some(parent) = world.get::<Transform>(enemy).map(|transform| transform.matrix) else {
            continue;
        };

        for _ in 0..config.shatter_amount {
            spawn::spawn_shard(world, meshes, &mut ctx.rng, &config, &parent, count - 1)?;
        }
        log::debug!("Enemy shattered into {} pieces", config.shatter_amount);
    }

    Ok(deaths)
}
