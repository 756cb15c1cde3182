//! Tunable rules for generation, creatures, combat, and the reducer.
//! A `GameConfig` travels inside `GameState` so every transition stays a function of state
//! and action.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAP_WIDTH: usize = 40;
pub const DEFAULT_MAP_HEIGHT: usize = 24;
pub const DEFAULT_SIGHT_RADIUS: i32 = 6;
pub const MAX_CRIT_MULTIPLIER: i32 = 10;
pub const MAX_HP_VARIANCE: i32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub max_rooms: usize,
    pub item_count: usize,
    pub creature_count: usize,
    /// Dungeon depth the level is generated for; drives creature selection.
    pub depth: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_room_size: 3,
            max_room_size: 8,
            max_rooms: 9,
            item_count: 6,
            creature_count: 5,
            depth: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Maximum random hp added on top of the species template.
    pub hp_variance: i32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self { hp_variance: 2 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub hit_chance_percent: u8,
    pub crit_chance_percent: u8,
    pub crit_multiplier: i32,
}

impl CombatConfig {
    pub fn guaranteed_hit() -> Self {
        Self { hit_chance_percent: 100, crit_chance_percent: 0, crit_multiplier: 2 }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { hit_chance_percent: 80, crit_chance_percent: 10, crit_multiplier: 2 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub generation: GenerationConfig,
    pub creatures: CreatureConfig,
    pub combat: CombatConfig,
    pub sight_radius: i32,
    pub max_depth: u32,
    pub event_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            generation: GenerationConfig::default(),
            creatures: CreatureConfig::default(),
            combat: CombatConfig::default(),
            sight_radius: DEFAULT_SIGHT_RADIUS,
            max_depth: 5,
            event_log_capacity: 50,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sight_radius < 0 {
            return Err(ConfigError::Invalid("sight_radius must not be negative".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
        }
        if self.combat.hit_chance_percent > 100 || self.combat.crit_chance_percent > 100 {
            return Err(ConfigError::Invalid("chances are percentages (0-100)".to_string()));
        }
        if !(1..=MAX_CRIT_MULTIPLIER).contains(&self.combat.crit_multiplier) {
            return Err(ConfigError::Invalid(format!(
                "crit_multiplier must be between 1 and {MAX_CRIT_MULTIPLIER}"
            )));
        }
        if !(0..=MAX_HP_VARIANCE).contains(&self.creatures.hp_variance) {
            return Err(ConfigError::Invalid(format!(
                "hp_variance must be between 0 and {MAX_HP_VARIANCE}"
            )));
        }
        Ok(())
    }
}
