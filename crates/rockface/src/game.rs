//! Frame orchestrator
//!
//! [`Game`] owns the world, the simulation context and the collaborators, and
//! advances them one tick at a time through the menu, gameplay and game-over
//! states.

use rock_engine::prelude::*;

use crate::components::{GameManagerTag, GameOverTag, Paused};
use crate::context::{GameState, SimContext};
use crate::error::{GameError, GameResult};
use crate::level::LevelLayout;
use crate::setup;
use crate::systems::{self, CollisionSystem};
use crate::ui;

/// The running game
pub struct Game {
    world: World,
    ctx: SimContext,
    meshes: Box<dyn MeshProvider>,
    audio: Box<dyn AudioSink>,
    layout: LevelLayout,
    collisions: CollisionSystem,
}

impl Game {
    /// Create the game in the main menu
    pub fn new(
        ctx: SimContext,
        layout: LevelLayout,
        meshes: Box<dyn MeshProvider>,
        mut audio: Box<dyn AudioSink>,
    ) -> GameResult<Self> {
        log::info!("Creating game...");
        let mut world = World::new();
        ui::spawn(&mut world);
        audio.play_music(&ctx.config.menu_music, true)?;
        log::info!("Game ready in {:?}", ctx.state);

        Ok(Self {
            world,
            ctx,
            meshes,
            audio,
            layout,
            collisions: CollisionSystem::new(),
        })
    }

    /// Entity store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity store
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Simulation context
    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Mutable simulation context
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    /// Input snapshot fed by the host before each tick
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.ctx.input
    }

    /// Current top-level state
    pub fn state(&self) -> GameState {
        self.ctx.state
    }

    /// Advance one frame
    ///
    /// The event queue is drained every tick whatever the state. Confirm is
    /// read as a held level, so holding it through a game over goes straight
    /// back through the menu into a new round.
    pub fn tick(&mut self, delta_time: f32) -> GameResult<()> {
        self.ctx.delta_time = delta_time;
        let events = self.ctx.input.drain_events();
        let confirm = self.ctx.input.is_active(self.ctx.config.controls.confirm);

        if self.ctx.state == GameState::MainMenu && confirm {
            self.ctx.transition(GameState::Gameplay);
            setup::enter_gameplay(
                &mut self.world,
                &mut self.ctx,
                self.meshes.as_mut(),
                self.audio.as_mut(),
                &self.layout,
            )?;
        }

        if self.ctx.state == GameState::GameOver && confirm {
            self.ctx.transition(GameState::MainMenu);
            setup::exit_gameplay(&mut self.world, self.meshes.as_mut(), self.audio.as_mut(), &self.ctx.config)?;
        }

        if self.ctx.state == GameState::Gameplay {
            self.gameplay(&events)?;
        }

        Ok(())
    }

    fn gameplay(&mut self, events: &[InputEvent]) -> GameResult<()> {
        let manager = self
            .world
            .single(&Query::new().with::<GameManagerTag>())
            .ok_or(GameError::MissingSingleton("GameManager"))?;
        if self.world.has::<GameOverTag>(manager) {
            return Ok(());
        }

        let pause = self.ctx.config.controls.pause;
        for event in events {
            if *event == InputEvent::KeyPressed(pause) {
                self.toggle_pause(manager);
            }
        }

        if self.world.has::<Paused>(manager) {
            if self.ctx.config.sim.movement_while_paused {
                systems::movement::update(&mut self.world, self.ctx.delta_time);
            }
            return Ok(());
        }

        self.update()
    }

    fn toggle_pause(&mut self, manager: Entity) {
        if self.world.detach::<Paused>(manager).is_some() {
            log::info!("Resumed");
        } else {
            self.world.attach(manager, Paused);
            log::info!("Paused");
        }
    }

    fn update(&mut self) -> GameResult<()> {
        systems::render_sync::update(&self.world, self.meshes.as_mut())?;
        systems::movement::update(&mut self.world, self.ctx.delta_time);
        systems::player::update(&mut self.world, &self.ctx, self.meshes.as_mut(), self.audio.as_mut())?;

        for contact in self.collisions.detect(&self.world) {
            systems::combat::resolve(&mut self.world, &self.ctx, contact);
        }

        systems::death::update(&mut self.world, &mut self.ctx, self.meshes.as_mut())?;
        systems::lifecycle::check_outcome(&mut self.world, &mut self.ctx)?;
        systems::lifecycle::sweep(&mut self.world, self.meshes.as_mut());
        Ok(())
    }

    /// Tear everything down in order: entities, meshes, then audio
    pub fn shutdown(&mut self) {
        log::info!("Shutting down game...");
        let removed = setup::remove_gameplay_entities(&mut self.world, self.meshes.as_mut());
        self.world.clear();
        self.meshes.shutdown();
        self.audio.shutdown();
        log::info!("Game shut down ({removed} gameplay entities removed)");
    }
}
