//! Configuration system
//!
//! Two layers: the [`Config`] trait loads and saves whole serde structs by
//! file extension, and [`Settings`] answers `(section, key)` lookups for loose
//! tuning files where every value is a scalar.

use std::collections::BTreeMap;
use std::fmt;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Section absent from the settings file
    #[error("Missing section [{0}]")]
    MissingSection(String),

    /// Key absent from an existing section
    #[error("Missing key {section}.{key}")]
    MissingKey {
        /// Section that was searched
        section: String,
        /// Key that was not found
        key: String,
    },

    /// Value present but of another type
    #[error("{section}.{key} should be {expected}, found {found}")]
    WrongType {
        /// Section of the value
        section: String,
        /// Key of the value
        key: String,
        /// Requested type
        expected: &'static str,
        /// Type actually stored
        found: &'static str,
    },

    /// Value of the right type but unusable
    #[error("Invalid value for {section}.{key}: {reason}")]
    Invalid {
        /// Section of the value
        section: String,
        /// Key of the value
        key: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Build an [`Invalid`](Self::Invalid) error
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// A scalar setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Text(String),
}

impl SettingValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

/// Hierarchical `(section, key)` settings
///
/// ```toml
/// [Player]
/// hitpoints = 3
/// model = "Ship"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    sections: BTreeMap<String, BTreeMap<String, SettingValue>>,
}

impl Config for Settings {}

impl Settings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse settings from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Insert or replace a value
    pub fn set(&mut self, section: &str, key: &str, value: SettingValue) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Overlay every value of `other` on top of these settings
    pub fn merge(&mut self, other: Self) {
        for (section, values) in other.sections {
            self.sections.entry(section).or_default().extend(values);
        }
    }

    /// Whether a section exists
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Whether a key exists in a section
    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|values| values.contains_key(key))
    }

    /// Raw value lookup
    pub fn value(&self, section: &str, key: &str) -> Result<&SettingValue, ConfigError> {
        self.sections
            .get(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))?
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Integer lookup
    pub fn int(&self, section: &str, key: &str) -> Result<i64, ConfigError> {
        match self.value(section, key)? {
            SettingValue::Int(v) => Ok(*v),
            other => Err(wrong_type(section, key, "int", other)),
        }
    }

    /// Float lookup; integers are promoted
    #[allow(clippy::cast_precision_loss)]
    pub fn float(&self, section: &str, key: &str) -> Result<f64, ConfigError> {
        match self.value(section, key)? {
            SettingValue::Float(v) => Ok(*v),
            SettingValue::Int(v) => Ok(*v as f64),
            other => Err(wrong_type(section, key, "float", other)),
        }
    }

    /// String lookup
    pub fn text(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        match self.value(section, key)? {
            SettingValue::Text(v) => Ok(v),
            other => Err(wrong_type(section, key, "string", other)),
        }
    }

    /// Boolean lookup
    pub fn flag(&self, section: &str, key: &str) -> Result<bool, ConfigError> {
        match self.value(section, key)? {
            SettingValue::Bool(v) => Ok(*v),
            other => Err(wrong_type(section, key, "bool", other)),
        }
    }
}

fn wrong_type(section: &str, key: &str, expected: &'static str, found: &SettingValue) -> ConfigError {
    ConfigError::WrongType {
        section: section.to_string(),
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
