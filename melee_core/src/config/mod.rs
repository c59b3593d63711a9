//! Configuration loading from TOML files

mod content;
mod tuning;

pub use content::{
    default_content, load_content, parse_content, Content, ContentAudit, ContentFile,
};
pub use tuning::{
    AdvantageTable, BlindnessPenalties, CombatTuning, ConditionModifier, ConditionTable,
    ContestedConstants, GapChances, HitChanceConstants, LayerConstants, LocationConstants,
    ResourceConstants, SeverBars, SeverityLadder, StakesProfile, StakesTable,
    StatScalingConstants, TierDamage, TierThresholds, WoundConstants,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load tuning tables from a TOML file
pub fn load_tuning(path: &Path) -> Result<CombatTuning, ConfigError> {
    load_toml(path)
}

/// Get the shipped tuning tables
pub fn default_tuning() -> CombatTuning {
    let toml = include_str!("../../config/tuning.toml");
    parse_toml(toml).unwrap_or_default()
}
