//! End-to-end tick scenarios
//!
//! [`Harness`] runs the gameplay systems by hand so a scenario can look at the
//! world between combat and the sweep. Orchestrator scenarios drive [`Game`]
//! directly.

mod combat_scenarios;
mod orchestrator;

use std::sync::Arc;

use rock_engine::prelude::*;

use crate::components::{Collidable, Health, MeshCollection, Player, Transform};
use crate::config::GameConfig;
use crate::context::{GameState, SimContext};
use crate::game::Game;
use crate::level::LevelLayout;
use crate::spawn;
use crate::systems::{self, CollisionSystem};
use crate::ui;

pub(crate) const DT: f32 = 0.016;

/// World plus collaborators, stepped system by system
pub(crate) struct Harness {
    pub world: World,
    pub ctx: SimContext,
    pub meshes: ModelLibrary,
    pub audio: SilentAudio,
    pub collisions: CollisionSystem,
}

impl Harness {
    pub fn new() -> Self {
        let mut ctx = SimContext::with_seed(Arc::new(GameConfig::builtin().unwrap()), Some(1234));
        ctx.delta_time = DT;
        ctx.state = GameState::Gameplay;

        let mut meshes = ModelLibrary::new();
        LevelLayout::default().register_models(&mut meshes);

        let mut world = World::new();
        ui::spawn(&mut world);
        spawn::spawn_game_manager(&mut world);

        Self {
            world,
            ctx,
            meshes,
            audio: SilentAudio::new(),
            collisions: CollisionSystem::new(),
        }
    }

    /// Every gameplay system up to, but not including, the sweep
    pub fn step(&mut self) {
        systems::render_sync::update(&self.world, &mut self.meshes).unwrap();
        systems::movement::update(&mut self.world, self.ctx.delta_time);
        systems::player::update(&mut self.world, &self.ctx, &mut self.meshes, &mut self.audio).unwrap();
        for contact in self.collisions.detect(&self.world) {
            systems::combat::resolve(&mut self.world, &self.ctx, contact);
        }
        systems::death::update(&mut self.world, &mut self.ctx, &mut self.meshes).unwrap();
        systems::lifecycle::check_outcome(&mut self.world, &mut self.ctx).unwrap();
    }

    pub fn sweep(&mut self) -> usize {
        systems::lifecycle::sweep(&mut self.world, &mut self.meshes)
    }

    /// Collidable entity with a unit box at `position`
    pub fn body(&mut self, position: Vec3) -> Entity {
        let entity = self.world.create();
        self.world.attach(entity, Collidable);
        self.world.attach(entity, Transform::at(position));
        self.world.attach(
            entity,
            MeshCollection {
                parts: Vec::new(),
                bounds: Obb::from_extents(Vec3::new(0.5, 0.5, 0.5)),
            },
        );
        entity
    }

    /// Healthy player parked at `position`
    pub fn player(&mut self, position: Vec3) -> Entity {
        let player = self.body(position);
        self.world.attach(player, Player);
        self.world.attach(player, Health(self.ctx.config.player.hitpoints));
        player
    }
}

/// Game with the built-in config and arena, still in the menu
pub(crate) fn new_game(seed: u64) -> Game {
    let config = Arc::new(GameConfig::builtin().unwrap());
    let layout = LevelLayout::default();
    let mut meshes = ModelLibrary::new();
    layout.register_models(&mut meshes);
    Game::new(
        SimContext::with_seed(config, Some(seed)),
        layout,
        Box::new(meshes),
        Box::new(SilentAudio::new()),
    )
    .unwrap()
}

/// Hold confirm for one tick, then release it
pub(crate) fn press_confirm(game: &mut Game) {
    let confirm = game.context().config.controls.confirm;
    game.input_mut().set_pressed(confirm, true);
    game.tick(DT).unwrap();
    game.input_mut().set_pressed(confirm, false);
}
