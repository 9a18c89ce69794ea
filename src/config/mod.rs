//! TOML configuration for a dial session.
//!
//! Parsing is done with serde into [`DialConfig`]; semantic checks run
//! separately in [`DialConfig::validate`] so a file that parses but makes no
//! sense is reported with a readable message.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::assets::ResourceAssets;
use crate::dial::{DialGeometry, DialSector, TouchPoint};
use crate::game::{
    entry::DEFAULT_ENTRY_MAX_LEN, LevelDefinition, LevelTable, SessionConfig, DEFAULT_CENTER,
    DEFAULT_LONG_PRESS_MS, DEFAULT_MIN_RADIUS, ENTRY_TEXT_CAPACITY, MAX_LEVELS,
};


pub const DEFAULT_RESOURCE_DIR: &str = "res";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(_) | Self::Validation(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialSection {
    pub center_x: i32,
    pub center_y: i32,
    pub min_radius: f32,
}

impl Default for DialSection {
    fn default() -> Self {
        Self {
            center_x: DEFAULT_CENTER.x,
            center_y: DEFAULT_CENTER.y,
            min_radius: DEFAULT_MIN_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelEntry {
    pub answer: u8,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialConfig {
    pub resource_dir: PathBuf,
    pub long_press_ms: u64,
    pub entry_max_len: usize,
    pub dial: DialSection,
    pub levels: Vec<LevelEntry>,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            entry_max_len: DEFAULT_ENTRY_MAX_LEN,
            dial: DialSection::default(),
            levels: LevelTable::reference()
                .iter()
                .map(|level| LevelEntry {
                    answer: level.expected_digit.digit(),
                    image: level.image.clone(),
                })
                .collect(),
        }
    }
}

impl DialConfig {
    /// Reads, parses and validates a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::info!(
            "config: loaded {} levels from {}",
            config.levels.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(validation("levels must contain at least one level"));
        }
        if self.levels.len() > MAX_LEVELS {
            return Err(validation(format!(
                "levels must not contain more than {MAX_LEVELS} entries (got {})",
                self.levels.len()
            )));
        }
        for (idx, level) in self.levels.iter().enumerate() {
            if DialSector::new(level.answer).is_none() {
                return Err(validation(format!(
                    "levels[{idx}].answer must be a digit 0-9 (got {})",
                    level.answer
                )));
            }
            if level.image.trim().is_empty() {
                return Err(validation(format!("levels[{idx}].image must not be empty")));
            }
        }
        if !self.dial.min_radius.is_finite() || self.dial.min_radius < 0.0 {
            return Err(validation("dial.min_radius must be a finite value >= 0"));
        }
        if self.long_press_ms == 0 {
            return Err(validation("long_press_ms must be > 0"));
        }
        if !(1..=ENTRY_TEXT_CAPACITY).contains(&self.entry_max_len) {
            return Err(validation(format!(
                "entry_max_len must be within 1..={ENTRY_TEXT_CAPACITY}"
            )));
        }
        Ok(())
    }

    pub fn geometry(&self) -> DialGeometry {
        DialGeometry::new(
            TouchPoint::new(self.dial.center_x, self.dial.center_y),
            self.dial.min_radius,
        )
    }

    pub fn level_table(&self) -> LevelTable {
        LevelTable::new(
            self.levels
                .iter()
                .filter_map(|level| {
                    DialSector::new(level.answer)
                        .map(|digit| LevelDefinition::new(digit, level.image.clone()))
                })
                .collect(),
        )
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            geometry: self.geometry(),
            long_press_ms: self.long_press_ms,
            entry_max_len: self.entry_max_len,
            levels: self.level_table(),
        }
    }

    pub fn assets(&self) -> ResourceAssets {
        ResourceAssets::new(self.resource_dir.clone(), &self.level_table())
    }
}

fn validation(msg: impl Into<String>) -> ConfigError {
    ConfigError::Validation(msg.into())
}
