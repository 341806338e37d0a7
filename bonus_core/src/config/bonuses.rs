//! Bonus definition loading
//!
//! Declarative flat bonuses defined as data: each definition names its
//! target scores by display name and is resolved against a concrete
//! character at attach time.

use super::ConfigError;
use crate::character::Character;
use crate::score::Score;
use crate::source::FlatBonus;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for bonus definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusesConfig {
    #[serde(rename = "bonuses")]
    pub bonuses: Vec<BonusDef>,
}

/// One declarative bonus definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusDef {
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<ModifierDef>,
}

/// One declared modifier, targeting a score by display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierDef {
    pub target: String,
    pub value: i32,
    #[serde(default)]
    pub condition: Option<String>,
}

impl BonusDef {
    /// Resolve score names against a character and build the source.
    ///
    /// Fails with a validation error if any target name is not a score on
    /// that character.
    pub fn instantiate(&self, character: &Character) -> Result<FlatBonus, ConfigError> {
        let mut bonus = FlatBonus::new(self.name.clone(), self.abbreviation.clone());
        if let Some(description) = &self.description {
            bonus = bonus.with_description(description.clone());
        }
        for modifier in &self.modifiers {
            let target = character
                .score_by_name(&modifier.target)
                .map(Score::id)
                .ok_or_else(|| {
                    ConfigError::ValidationError(format!(
                        "unknown score '{}' for bonus '{}'",
                        modifier.target, self.name
                    ))
                })?;
            bonus = match &modifier.condition {
                Some(condition) => {
                    bonus.with_conditional_modifier(target, modifier.value, condition.clone())
                }
                None => bonus.with_modifier(target, modifier.value),
            };
        }
        Ok(bonus)
    }
}

/// Load bonus definitions from a TOML file
pub fn load_bonus_configs(path: &Path) -> Result<Vec<BonusDef>, ConfigError> {
    let config: BonusesConfig = super::load_toml(path)?;
    Ok(config.bonuses)
}

/// Load bonus definitions from a TOML string
pub fn parse_bonus_configs(content: &str) -> Result<Vec<BonusDef>, ConfigError> {
    let config: BonusesConfig = super::parse_toml(content)?;
    Ok(config.bonuses)
}

/// Get the built-in bonus definitions
pub fn default_bonuses() -> Vec<BonusDef> {
    let toml = include_str!("../../config/bonuses.toml");
    parse_bonus_configs(toml).unwrap_or_default()
}
