//! Round outcome and the end-of-tick sweep

use rock_engine::prelude::*;

use crate::components::{Enemy, GameManagerTag, GameOverTag, Health, PendingDestroy, Player};
use crate::context::{GameState, SimContext};
use crate::error::{GameError, GameResult};
use crate::spawn;
use crate::ui;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every player ran out of hit points
    Defeat,
    /// No enemies remain
    Victory,
}

/// True when no player with health has any hit points left
///
/// With no players at all this holds.
pub fn players_defeated(world: &World) -> bool {
    world
        .query(&Query::new().with::<Player>().with::<Health>())
        .all(|player| world.get::<Health>(player).map_or(true, |health| health.0 <= 0))
}

/// True when no entity carries the enemy tag, counting those pending removal
pub fn enemies_cleared(world: &World) -> bool {
    world.count(&Query::new().with::<Enemy>()) == 0
}

/// End the round if it has been lost or won
pub fn check_outcome(world: &mut World, ctx: &mut SimContext) -> GameResult<Option<Outcome>> {
    let outcome = if players_defeated(world) {
        Outcome::Defeat
    } else if enemies_cleared(world) {
        Outcome::Victory
    } else {
        return Ok(None);
    };

    let manager = world
        .single(&Query::new().with::<GameManagerTag>())
        .ok_or(GameError::MissingSingleton("GameManager"))?;
    world.attach(manager, GameOverTag);
    ui::record_high_score(world);
    ctx.transition(GameState::GameOver);

    match outcome {
        Outcome::Defeat => log::info!("All players are dead. Game over."),
        Outcome::Victory => log::info!("All enemies destroyed. You win!"),
    }
    Ok(Some(outcome))
}

/// Destroy every entity marked for removal, returning how many went
pub fn sweep(world: &mut World, meshes: &mut dyn MeshProvider) -> usize {
    let mut removed = 0;
    for entity in world.query(&Query::new().with::<PendingDestroy>()) {
        if spawn::despawn(world, meshes, entity) {
            removed += 1;
        }
    }
    if removed > 0 {
        log::debug!("Swept {removed} entities");
    }
    removed
}
