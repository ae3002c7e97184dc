//! State machine, pause and teardown through [`Game::tick`]

use rock_engine::prelude::*;

use super::{new_game, press_confirm, DT};
use crate::components::{Enemy, GameManagerTag, Health, Obstacle, Paused, Player, Transform, Velocity};
use crate::context::GameState;
use crate::game::Game;
use crate::ui;

fn manager(game: &Game) -> Entity {
    game.world().single(&Query::new().with::<GameManagerTag>()).unwrap()
}

fn toggle_pause(game: &mut Game) {
    let pause = game.context().config.controls.pause;
    game.input_mut().push_event(InputEvent::KeyPressed(pause));
    game.tick(DT).unwrap();
}

fn first_enemy(game: &Game) -> Entity {
    game.world().query(&Query::new().with::<Enemy>()).next().unwrap()
}

#[test]
fn test_menu_waits_for_confirm() {
    let mut game = new_game(1);
    for _ in 0..10 {
        game.tick(DT).unwrap();
    }
    assert_eq!(game.state(), GameState::MainMenu);
    assert_eq!(game.world().entity_count(), 1);
}

#[test]
fn test_confirm_starts_round() {
    let mut game = new_game(2);
    press_confirm(&mut game);

    let world = game.world();
    let config = &game.context().config;
    assert_eq!(game.state(), GameState::Gameplay);
    assert_eq!(world.count(&Query::new().with::<Player>()), 1);
    assert_eq!(world.count(&Query::new().with::<Enemy>()), config.enemies.len());
    assert_eq!(world.count(&Query::new().with::<Obstacle>()), 4);
    assert_eq!(world.count(&Query::new().with::<GameManagerTag>()), 1);
    assert_eq!(ui::read(world).unwrap().lives, config.player.hitpoints);
}

#[test]
fn test_pause_freezes_world() {
    let mut game = new_game(3);
    press_confirm(&mut game);
    toggle_pause(&mut game);
    assert!(game.world().has::<Paused>(manager(&game)));

    let enemy = first_enemy(&game);
    let before = game.world().get::<Transform>(enemy).unwrap().matrix;
    for _ in 0..20 {
        game.tick(DT).unwrap();
    }
    assert_eq!(game.world().get::<Transform>(enemy).unwrap().matrix, before);

    toggle_pause(&mut game);
    assert!(!game.world().has::<Paused>(manager(&game)));
    assert_ne!(game.world().get::<Transform>(enemy).unwrap().matrix, before);
}

#[test]
fn test_movement_while_paused() {
    let mut game = new_game(4);
    let mut config = (*game.context().config).clone();
    config.sim.movement_while_paused = true;
    game.context_mut().config = std::sync::Arc::new(config);

    press_confirm(&mut game);
    toggle_pause(&mut game);

    let enemy = first_enemy(&game);
    let before = game.world().get::<Transform>(enemy).unwrap().position();
    game.tick(DT).unwrap();
    let Velocity(velocity) = *game.world().get::<Velocity>(enemy).unwrap();
    let after = game.world().get::<Transform>(enemy).unwrap().position();
    approx::assert_relative_eq!(after, before + velocity * DT, epsilon = 1e-5);
}

#[test]
fn test_defeat_then_back_to_menu() {
    let mut game = new_game(5);
    press_confirm(&mut game);

    let player = game.world().single(&Query::new().with::<Player>()).unwrap();
    game.world_mut().attach(player, Health(0));
    game.tick(DT).unwrap();
    assert_eq!(game.state(), GameState::GameOver);

    // Game over holds until confirm
    game.tick(DT).unwrap();
    assert_eq!(game.state(), GameState::GameOver);

    press_confirm(&mut game);
    assert_eq!(game.state(), GameState::MainMenu);
    assert_eq!(game.world().entity_count(), 1);
    assert!(ui::read(game.world()).is_some());
}

#[test]
fn test_second_round_resets_score() {
    let mut game = new_game(6);
    press_confirm(&mut game);
    ui::add_score(game.world_mut(), 300);

    let player = game.world().single(&Query::new().with::<Player>()).unwrap();
    game.world_mut().attach(player, Health(0));
    game.tick(DT).unwrap();
    assert_eq!(ui::read(game.world()).unwrap().high_score, 300);

    press_confirm(&mut game);
    press_confirm(&mut game);
    let hud = ui::read(game.world()).unwrap();
    assert_eq!(game.state(), GameState::Gameplay);
    assert_eq!(hud.current_score, 0);
    assert_eq!(hud.high_score, 300);
}

#[test]
fn test_shutdown_clears_world() {
    let mut game = new_game(7);
    press_confirm(&mut game);
    game.shutdown();
    assert_eq!(game.world().entity_count(), 0);
}
