//! HUD values
//!
//! Writers push into the single [`UiComponents`] entity. With no HUD entity
//! present the update is dropped.

use rock_engine::prelude::*;

use crate::components::UiComponents;

/// Create the HUD entity
pub fn spawn(world: &mut World) -> Entity {
    let entity = world.create();
    world.attach(entity, UiComponents::default());
    entity
}

/// Current HUD values
pub fn read(world: &World) -> Option<UiComponents> {
    let entity = world.single(&Query::new().with::<UiComponents>())?;
    world.get::<UiComponents>(entity).copied()
}

fn with_ui(world: &mut World, update: impl FnOnce(&mut UiComponents)) {
    let Some(entity) = world.single(&Query::new().with::<UiComponents>()) else {
        log::trace!("No HUD entity; update dropped");
        return;
    };
    if let Some(ui) = world.get_mut::<UiComponents>(entity) {
        update(ui);
    }
}

/// Show remaining lives
pub fn set_lives(world: &mut World, lives: i32) {
    with_ui(world, |ui| ui.lives = lives);
}

/// Add to the running score
pub fn add_score(world: &mut World, points: i32) {
    with_ui(world, |ui| {
        ui.current_score += points;
        log::debug!("Score {} (+{points})", ui.current_score);
    });
}

/// Reset the running score
pub fn reset_score(world: &mut World) {
    with_ui(world, |ui| ui.current_score = 0);
}

/// Show the level number
pub fn set_level(world: &mut World, level: i32) {
    with_ui(world, |ui| ui.current_level = level);
}

/// Overwrite the high score
pub fn set_high_score(world: &mut World, score: i32) {
    with_ui(world, |ui| ui.high_score = score);
}

/// Raise the high score when the running score beats it
pub fn record_high_score(world: &mut World) {
    with_ui(world, |ui| {
        if ui.current_score > ui.high_score {
            log::info!("New high score {} (was {})", ui.current_score, ui.high_score);
            ui.high_score = ui.current_score;
        }
    });
}
