//! Game configuration
//!
//! Every tunable is resolved from [`Settings`] once at startup so that a
//! missing or malformed value fails before the first tick.

use rock_engine::config::{ConfigError, Settings};
use rock_engine::input::KeyCode;

/// Configuration shipped with the game
pub const DEFAULT_SETTINGS: &str = include_str!("../config/rockface.toml");

/// Game configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Play area size
    pub screen: ScreenConfig,

    /// Simulation settings
    pub sim: SimConfig,

    /// Key bindings
    pub controls: ControlsConfig,

    /// Player ship tuning
    pub player: PlayerConfig,

    /// Projectile tuning
    pub bullet: BulletConfig,

    /// Enemy archetypes, in the order they spawn at round start
    pub enemies: Vec<EnemyArchetype>,

    /// Children spawned when an enemy shatters
    pub shatter_amount: u32,

    /// Music played in the main menu
    pub menu_music: String,

    /// Level settings
    pub level: LevelConfig,

    /// Points for each destroyed enemy
    pub enemy_bonus: i32,
}

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

/// Play area on the XZ plane
#[derive(Debug, Clone, Copy)]
pub struct ScreenConfig {
    /// Extent along X
    pub width: f32,

    /// Extent along Z
    pub height: f32,
}

/// Simulation configuration
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Upper bound on a frame's delta time in seconds
    pub max_delta: f32,

    /// Keep integrating velocities while the game is paused
    pub movement_while_paused: bool,

    /// RNG seed, 0 for entropy
    pub seed: u64,
}

/// Controls configuration
#[derive(Debug, Clone, Copy)]
pub struct ControlsConfig {
    /// Turn counter-clockwise
    pub turn_left: KeyCode,

    /// Turn clockwise
    pub turn_right: KeyCode,

    /// Thrust key
    pub thrust: KeyCode,

    /// Fire key
    pub fire: KeyCode,

    /// Start a round / leave the game-over screen
    pub confirm: KeyCode,

    /// Pause toggle
    pub pause: KeyCode,
}

/// Player configuration
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Model name
    pub model: String,

    /// Starting hit points
    pub hitpoints: i32,

    /// Seconds between shots
    pub fire_cooldown: f32,

    /// Seconds of immunity after a hit
    pub invulnerable_period: f32,

    /// Sound played on every shot
    pub shot_sound: String,

    /// Thrust acceleration
    pub thrust: f32,

    /// Per-tick drag multiplier
    pub drag: f32,

    /// Speed cap while thrusting
    pub max_speed: f32,
}

/// Projectile configuration
#[derive(Debug, Clone)]
pub struct BulletConfig {
    /// Model name
    pub model: String,

    /// Speed in units per second
    pub speed: f32,
}

/// One kind of enemy
#[derive(Debug, Clone)]
pub struct EnemyArchetype {
    /// Settings section it was read from
    pub name: String,

    /// Model name
    pub model: String,

    /// Starting hit points
    pub hitpoints: i32,

    /// Speed in units per second
    pub speed: f32,

    /// Scale applied to the parent transform when spawned as a shard
    pub shatter_scale: f32,

    /// Shatter generations when spawned at round start
    pub initial_shatter_count: i32,
}

/// Level configuration
#[derive(Debug, Clone)]
pub struct LevelConfig {
    /// Level number shown on the HUD
    pub number: i32,

    /// Music played during the level
    pub music: String,
}

impl GameConfig {
    /// Configuration shipped with the game
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_settings(&Settings::from_toml_str(DEFAULT_SETTINGS)?)
    }

    /// Resolve every tunable
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let enemies = settings
            .text("Enemies", "archetypes")?
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| EnemyArchetype::from_settings(settings, name))
            .collect::<Result<Vec<_>, _>>()?;
        if enemies.is_empty() {
            return Err(ConfigError::invalid("Enemies", "archetypes", "at least one archetype is required"));
        }

        let config = Self {
            window: WindowConfig {
                title: settings.text("Window", "title")?.to_string(),
                width: unsigned(settings, "Window", "width")?,
                height: unsigned(settings, "Window", "height")?,
            },
            screen: ScreenConfig {
                width: positive(settings, "Screen", "width")?,
                height: positive(settings, "Screen", "height")?,
            },
            sim: SimConfig {
                max_delta: positive(settings, "Sim", "max_delta")?,
                movement_while_paused: settings.flag("Sim", "movement_while_paused")?,
                seed: u64::try_from(settings.int("Sim", "seed")?)
                    .map_err(|_| ConfigError::invalid("Sim", "seed", "must not be negative"))?,
            },
            controls: ControlsConfig {
                turn_left: key(settings, "turn_left")?,
                turn_right: key(settings, "turn_right")?,
                thrust: key(settings, "thrust")?,
                fire: key(settings, "fire")?,
                confirm: key(settings, "confirm")?,
                pause: key(settings, "pause")?,
            },
            player: PlayerConfig {
                model: settings.text("Player", "model")?.to_string(),
                hitpoints: count(settings, "Player", "hitpoints")?,
                fire_cooldown: float(settings, "Player", "firerate")?,
                invulnerable_period: float(settings, "Player", "invuln_period")?,
                shot_sound: settings.text("Player", "shot_sound")?.to_string(),
                thrust: float(settings, "Player", "thrust")?,
                drag: float(settings, "Player", "drag")?,
                max_speed: positive(settings, "Player", "max_speed")?,
            },
            bullet: BulletConfig {
                model: settings.text("Bullet", "model")?.to_string(),
                speed: float(settings, "Bullet", "speed")?,
            },
            enemies,
            shatter_amount: unsigned(settings, "Enemies", "shatter_amount")?,
            menu_music: settings.text("Menu", "music")?.to_string(),
            level: LevelConfig {
                number: count(settings, "Level1", "number")?,
                music: settings.text("Level1", "music")?.to_string(),
            },
            enemy_bonus: count(settings, "Score", "enemy_bonus")?,
        };

        log::debug!(
            "Resolved game config: {} enemy archetypes, screen {}x{}",
            config.enemies.len(),
            config.screen.width,
            config.screen.height
        );
        Ok(config)
    }

    /// Archetype by settings section name
    pub fn archetype(&self, name: &str) -> Option<&EnemyArchetype> {
        self.enemies.iter().find(|archetype| archetype.name == name)
    }
}

impl EnemyArchetype {
    fn from_settings(settings: &Settings, section: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            name: section.to_string(),
            model: settings.text(section, "model")?.to_string(),
            hitpoints: count(settings, section, "hitpoints")?,
            speed: float(settings, section, "speed")?,
            shatter_scale: positive(settings, section, "shatter_scale")?,
            initial_shatter_count: count(settings, section, "initial_shatter_count")?,
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float(settings: &Settings, section: &str, key: &str) -> Result<f32, ConfigError> {
    settings.float(section, key).map(|value| value as f32)
}

fn positive(settings: &Settings, section: &str, key: &str) -> Result<f32, ConfigError> {
    let value = float(settings, section, key)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::invalid(section, key, format!("must be positive, got {value}")))
    }
}

fn count(settings: &Settings, section: &str, key: &str) -> Result<i32, ConfigError> {
    let value = settings.int(section, key)?;
    i32::try_from(value).map_err(|_| ConfigError::invalid(section, key, format!("{value} is out of range")))
}

fn unsigned(settings: &Settings, section: &str, key: &str) -> Result<u32, ConfigError> {
    let value = settings.int(section, key)?;
    u32::try_from(value).map_err(|_| ConfigError::invalid(section, key, format!("{value} must be a non-negative 32-bit count")))
}

fn key(settings: &Settings, action: &str) -> Result<KeyCode, ConfigError> {
    settings
        .text("Controls", action)?
        .parse()
        .map_err(|reason: String| ConfigError::invalid("Controls", action, reason))
}
