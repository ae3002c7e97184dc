//! Level layouts
//!
//! A layout names the models a round can spawn and places the static walls.
//! Layouts load from RON or TOML through [`Config`]; the built-in arena is
//! used when none is given.

use serde::{Deserialize, Serialize};

use rock_engine::prelude::*;

/// Model available to spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Name used by configuration
    pub name: String,

    /// Render parts per clone
    #[serde(default = "one_part")]
    pub parts: usize,

    /// Half size of the local bounding box
    pub half_extents: Vec3,

    /// Center of the local bounding box
    #[serde(default = "Vec3::zeros")]
    pub center: Vec3,

    /// Authored position
    #[serde(default = "Vec3::zeros")]
    pub position: Vec3,

    /// Authored uniform scale
    #[serde(default = "unit_scale")]
    pub scale: f32,

    /// Authored heading in radians
    #[serde(default)]
    pub yaw: f32,
}

/// Static wall placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Model to clone
    pub model: String,

    /// World position
    pub position: Vec3,

    /// Per-axis scale
    pub scale: Vec3,

    /// Heading in radians
    #[serde(default)]
    pub yaw: f32,
}

/// Level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Display name
    pub name: String,

    /// Models the level provides
    pub models: Vec<ModelSpec>,

    /// Walls
    #[serde(default)]
    pub obstacles: Vec<ObstaclePlacement>,
}

impl Config for LevelLayout {}

fn one_part() -> usize {
    1
}

fn unit_scale() -> f32 {
    1.0
}

fn placement(position: Vec3, yaw: f32, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(&position) * Mat4::rotation_y(yaw) * Mat4::new_nonuniform_scaling(scale)
}

impl ModelSpec {
    /// Model with one part and no authored offset
    pub fn new(name: &str, half_extents: Vec3) -> Self {
        Self {
            name: name.to_string(),
            parts: 1,
            half_extents,
            center: Vec3::zeros(),
            position: Vec3::zeros(),
            scale: 1.0,
            yaw: 0.0,
        }
    }

    fn placed_at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Template registered with the model library
    pub fn template(&self) -> ModelTemplate {
        ModelTemplate::new(
            self.name.clone(),
            Obb::new(self.center, self.half_extents, Quat::identity()),
        )
        .with_parts(self.parts)
        .with_transform(placement(self.position, self.yaw, &Vec3::repeat(self.scale)))
    }
}

impl ObstaclePlacement {
    /// World matrix of the wall
    pub fn transform(&self) -> Mat4 {
        placement(self.position, self.yaw, &self.scale)
    }
}

impl LevelLayout {
    /// Parse a RON layout
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a TOML layout
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Register every model with the library
    pub fn register_models(&self, library: &mut ModelLibrary) {
        for model in &self.models {
            if library.register(model.template()).is_some() {
                log::warn!("Model '{}' registered twice; keeping the last", model.name);
            }
        }
        log::info!("Level '{}': {} models, {} obstacles", self.name, self.models.len(), self.obstacles.len());
    }

    /// Names referenced by obstacles but not provided by the layout
    pub fn missing_models(&self) -> Vec<&str> {
        self.obstacles
            .iter()
            .map(|obstacle| obstacle.model.as_str())
            .filter(|name| !self.models.iter().any(|model| model.name == *name))
            .collect()
    }
}

impl Default for LevelLayout {
    /// The arena: ship, three enemy models, bullet and four boundary walls
    fn default() -> Self {
        let wall = |position: Vec3, scale: Vec3| ObstaclePlacement {
            model: "Wall".to_string(),
            position,
            scale,
            yaw: 0.0,
        };

        Self {
            name: "Arena".to_string(),
            models: vec![
                ModelSpec::new("Ship", Vec3::new(0.8, 0.4, 1.0)),
                ModelSpec::new("Asteroid", Vec3::new(1.5, 1.5, 1.5)).placed_at(Vec3::new(-14.0, 0.0, -9.0)),
                ModelSpec::new("Rock", Vec3::new(1.2, 1.2, 1.2)).placed_at(Vec3::new(14.0, 0.0, -9.0)),
                ModelSpec {
                    parts: 2,
                    ..ModelSpec::new("Saucer", Vec3::new(1.0, 0.5, 1.0)).placed_at(Vec3::new(0.0, 0.0, 10.0))
                },
                ModelSpec::new("Bullet", Vec3::new(0.15, 0.15, 0.4)),
                ModelSpec::new("Wall", Vec3::new(0.5, 0.5, 0.5)),
            ],
            obstacles: vec![
                wall(Vec3::new(0.0, 0.0, -19.0), Vec3::new(60.0, 2.0, 1.0)),
                wall(Vec3::new(0.0, 0.0, 19.0), Vec3::new(60.0, 2.0, 1.0)),
                wall(Vec3::new(-29.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 40.0)),
                wall(Vec3::new(29.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 40.0)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_arena_is_complete() {
        let layout = LevelLayout::default();
        assert!(layout.missing_models().is_empty());
        assert_eq!(layout.obstacles.len(), 4);

        let mut library = ModelLibrary::new();
        layout.register_models(&mut library);
        for name in ["Ship", "Asteroid", "Rock", "Saucer", "Bullet", "Wall"] {
            assert!(library.template(name).is_some(), "{name} not registered");
        }
    }

    #[test]
    fn test_template_uses_authored_placement() {
        let spec = ModelSpec::new("Rock", Vec3::new(1.0, 1.0, 1.0)).placed_at(Vec3::new(3.0, 0.0, -2.0));
        let template = spec.template();
        assert_relative_eq!(template.transform.position(), Vec3::new(3.0, 0.0, -2.0));
    }

    #[test]
    fn test_obstacle_world_box() {
        let layout = LevelLayout::default();
        let wall = &layout.obstacles[2];
        let bounds = Obb::from_extents(Vec3::new(0.5, 0.5, 0.5)).to_world(&wall.transform());
        assert_relative_eq!(bounds.center, Vec3::new(-29.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.extents, Vec3::new(0.5, 1.0, 20.0), epsilon = 1e-5);
    }

    #[test]
    fn test_ron_layout() {
        let layout = LevelLayout::from_ron_str(
            r#"(
                name: "Tiny",
                models: [
                    (name: "Ship", half_extents: (1.0, 1.0, 1.0)),
                    (name: "Wall", half_extents: (0.5, 0.5, 0.5), parts: 4),
                ],
                obstacles: [
                    (model: "Wall", position: (0.0, 0.0, 5.0), scale: (10.0, 1.0, 1.0)),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(layout.models[1].parts, 4);
        assert!((layout.models[0].scale - 1.0).abs() < f32::EPSILON);
        assert!(layout.missing_models().is_empty());
    }

    #[test]
    fn test_toml_layout_reports_missing_models() {
        let layout = LevelLayout::from_toml_str(
            r#"
name = "Broken"
models = []

[[obstacles]]
model = "Pillar"
position = [1.0, 0.0, 1.0]
scale = [1.0, 1.0, 1.0]
"#,
        )
        .unwrap();
        assert_eq!(layout.missing_models(), vec!["Pillar"]);
    }
}
