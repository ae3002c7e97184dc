//! Player control
//!
//! Steering, thrust with drag, screen wrap, firing cooldown and the
//! invulnerability timer. The pure helpers carry the flight model so it can be
//! exercised without a world.

use rock_engine::prelude::*;

use crate::components::{FiringState, Invulnerable, Physics, Player, Rotation, SoundCue, Transform};
use crate::config::ScreenConfig;
use crate::context::SimContext;
use crate::error::GameResult;
use crate::spawn;

/// Angular acceleration while a turn key is held, rad/s²
pub const TURN_ACCELERATION: f32 = 1.5;

/// Damping applied every tick a turn key is held
pub const TURN_DAMPING: f32 = 0.55;

/// Damping applied every tick no turn key is held
pub const IDLE_DAMPING: f32 = 0.55;

/// Turn rate cap, rad/s
pub const MAX_ANGULAR_VELOCITY: f32 = 3.0;

/// Idle turn rates below this snap to zero
pub const STOP_THRESHOLD: f32 = 0.4;

/// Speeds below this snap to zero after drag
pub const MIN_SPEED: f32 = 0.01;

/// Integrate one tick of steering
///
/// Holding both keys cancels out: the turn rate and heading both reset.
pub fn steer(rotation: &mut Rotation, left: bool, right: bool, delta_time: f32) {
    match (left, right) {
        (true, true) => {
            rotation.angular_velocity = 0.0;
            rotation.angle = 0.0;
        }
        (true, false) | (false, true) => {
            let direction = if left { 1.0 } else { -1.0 };
            rotation.angular_velocity = (rotation.angular_velocity + direction * TURN_ACCELERATION * delta_time)
                .clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
            rotation.angular_velocity *= TURN_DAMPING;
        }
        (false, false) => {
            rotation.angular_velocity *= IDLE_DAMPING;
            rotation.angular_velocity *= 1.0 - delta_time;
            if rotation.angular_velocity.abs() < STOP_THRESHOLD {
                rotation.angular_velocity = 0.0;
            }
        }
    }

    rotation.angle += rotation.angular_velocity * delta_time;
}

/// Unit vector the ship faces at `angle`
pub fn forward(angle: f32) -> Vec3 {
    Vec3::new(-angle.sin(), 0.0, -angle.cos())
}

/// Integrate one tick of thrust and drag
pub fn apply_thrust(physics: &mut Physics, angle: f32, thrusting: bool, delta_time: f32) {
    if thrusting {
        physics.velocity += forward(angle).normalize() * physics.thrust * delta_time;
        let speed = physics.velocity.norm();
        if speed > physics.max_speed {
            physics.velocity *= physics.max_speed / speed;
        }
    }

    physics.velocity *= physics.drag;
    if physics.velocity.norm() < MIN_SPEED {
        physics.velocity = Vec3::zeros();
    }
}

/// Teleport to the opposite edge once past half the screen on X or Z
pub fn wrap_position(matrix: &mut Mat4, screen: &ScreenConfig) {
    let half_width = screen.width / 2.0;
    let half_height = screen.height / 2.0;
    let mut position = matrix.position();

    if position.x > half_width {
        position.x = -half_width;
    } else if position.x < -half_width {
        position.x = half_width;
    }

    if position.z > half_height {
        position.z = -half_height;
    } else if position.z < -half_height {
        position.z = half_height;
    }

    matrix.set_position(position);
}

/// Run player control for one tick
pub fn update(
    world: &mut World,
    ctx: &SimContext,
    meshes: &mut dyn MeshProvider,
    audio: &mut dyn AudioSink,
) -> GameResult<()> {
    let Some(player) = world.single(&Query::new().with::<Player>().with::<Transform>()) else {
        return Ok(());
    };

    let config = &ctx.config;
    let controls = &config.controls;
    let delta_time = ctx.delta_time;

    if !world.has::<Rotation>(player) {
        world.attach(player, Rotation::default());
    }
    if !world.has::<Physics>(player) {
        world.attach(player, Physics::from(&config.player));
    }

    let mut rotation = world.get::<Rotation>(player).copied().unwrap_or_default();
    steer(
        &mut rotation,
        ctx.input.is_active(controls.turn_left),
        ctx.input.is_active(controls.turn_right),
        delta_time,
    );
    world.attach(player, rotation);

    let mut physics = world.get::<Physics>(player).copied().unwrap_or_default();
    apply_thrust(&mut physics, rotation.angle, ctx.input.is_active(controls.thrust), delta_time);
    world.attach(player, physics);

    let matrix = {
        let Some(transform) = world.get_mut::<Transform>(player) else {
            return Ok(());
        };
        let mut matrix = transform.matrix.translate_global(&physics.velocity);
        wrap_position(&mut matrix, &config.screen);
        transform.matrix = matrix.with_rotation_y(rotation.angle);
        transform.matrix
    };

    match world.get::<FiringState>(player).copied() {
        Some(FiringState(cooldown)) => {
            let cooldown = cooldown - delta_time;
            if cooldown <= 0.0 {
                world.detach::<FiringState>(player);
            } else {
                world.attach(player, FiringState(cooldown));
            }
        }
        None if ctx.input.is_active(controls.fire) => {
            spawn::spawn_projectile(world, meshes, config, &matrix)?;
            world.attach(player, FiringState(config.player.fire_cooldown));
            if let Some(cue) = world.get::<SoundCue>(player) {
                audio.play_sound(&cue.name)?;
            }
        }
        None => {}
    }

    if let Some(Invulnerable(remaining)) = world.get::<Invulnerable>(player).copied() {
        let remaining = remaining - delta_time;
        if remaining <= 0.0 {
            world.detach::<Invulnerable>(player);
        } else {
            world.attach(player, Invulnerable(remaining));
        }
    }

    Ok(())
}
