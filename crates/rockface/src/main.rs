//! Headless rockface runner
//!
//! Drives the game for a fixed number of frames with a scripted pilot in
//! place of a keyboard, logging what happens along the way.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use rock_engine::foundation::logging;
use rock_engine::prelude::*;
use rockface::config::{ControlsConfig, DEFAULT_SETTINGS};
use rockface::{Game, GameConfig, GameResult, GameState, LevelLayout, SimContext};

/// Target frame period
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "rockface", version, about = "Headless rockface runner")]
struct Args {
    /// Settings file (TOML or RON) layered over the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level layout file (TOML or RON); the built-in arena when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Random seed; overrides Sim.seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Advance the clock by a fixed 1/60 s instead of the wall clock
    #[arg(long)]
    fixed_step: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() {
    let args = Args::parse();
    logging::init(&args.log);

    if let Err(e) = run(&args) {
        log::error!("rockface failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> GameResult<()> {
    let mut settings = Settings::from_toml_str(DEFAULT_SETTINGS)?;
    if let Some(path) = &args.config {
        log::info!("Loading settings from {}", path.display());
        settings.merge(Settings::load_from_file(&path.to_string_lossy())?);
    }
    let config = Arc::new(GameConfig::from_settings(&settings)?);

    let layout = match &args.level {
        Some(path) => {
            log::info!("Loading level from {}", path.display());
            LevelLayout::load_from_file(&path.to_string_lossy())?
        }
        None => LevelLayout::default(),
    };
    for missing in layout.missing_models() {
        log::warn!("Level '{}' places unknown model '{missing}'", layout.name);
    }

    let mut meshes = ModelLibrary::new();
    layout.register_models(&mut meshes);

    let seed = args.seed.or((config.sim.seed != 0).then_some(config.sim.seed));
    let controls = config.controls;
    let mut clock = FrameClock::new(config.sim.max_delta);
    let ctx = SimContext::with_seed(config, seed);
    let mut game = Game::new(ctx, layout, Box::new(meshes), Box::new(SilentAudio::new()))?;

    let result = drive(&mut game, &controls, &mut clock, args.frames, args.fixed_step);
    game.shutdown();
    result?;

    log::info!(
        "Ran {} frames ({:.2}s simulated), final state {:?}",
        clock.frame_count(),
        clock.total_time(),
        game.state()
    );
    Ok(())
}

fn drive(
    game: &mut Game,
    controls: &ControlsConfig,
    clock: &mut FrameClock,
    frames: u64,
    fixed_step: bool,
) -> GameResult<()> {
    let mut state = game.state();
    for frame in 0..frames {
        autopilot(game, controls, frame);
        let delta_time = if fixed_step {
            clock.advance(FRAME_TIME)
        } else {
            std::thread::sleep(Duration::from_secs_f32(FRAME_TIME));
            clock.tick()
        };
        game.tick(delta_time)?;

        if game.state() != state {
            state = game.state();
            if let Some(hud) = rockface::ui::read(game.world()) {
                log::info!(
                    "Frame {frame}: {state:?} (lives {}, score {}, high {})",
                    hud.lives,
                    hud.current_score,
                    hud.high_score
                );
            }
        }
    }
    Ok(())
}

/// Scripted input: start rounds, sweep the ship around and keep firing
fn autopilot(game: &mut Game, controls: &ControlsConfig, frame: u64) {
    let state = game.state();
    let input = game.input_mut();
    input.release_all();

    match state {
        GameState::MainMenu | GameState::GameOver => input.set_pressed(controls.confirm, frame % 120 == 0),
        GameState::Gameplay => {
            let turning_left = (frame / 90) % 2 == 0;
            input.set_pressed(controls.turn_left, turning_left);
            input.set_pressed(controls.turn_right, !turning_left);
            input.set_pressed(controls.thrust, frame % 4 != 0);
            input.set_pressed(controls.fire, true);
        }
    }
}
