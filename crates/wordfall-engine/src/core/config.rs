//! Session tuning, read once when a session is built.
//!
//! Every section has a `Default` carrying the stock tuning, and every field is
//! `#[serde(default)]` so a JSON file only needs to name what it overrides.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Rgb;
use crate::assets::vocabulary::Tier;
use crate::components::entity::PowerupKind;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed timestep in seconds.
    pub fixed_dt: f32,
    /// Seed for the session's random source.
    pub seed: u64,
    pub world: WorldConfig,
    pub run: RunConfig,
    pub tiers: TierTable,
    pub powerups: PowerupConfig,
    pub attack: AttackConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 42,
            world: WorldConfig::default(),
            run: RunConfig::default(),
            tiers: TierTable::default(),
            powerups: PowerupConfig::default(),
            attack: AttackConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::invalid("fixed_dt", "must be positive"));
        }
        self.world.validate()?;
        self.run.validate()?;
        self.tiers.validate()?;
        self.powerups.validate()?;
        if !(self.attack.projectile_speed > 0.0) {
            return Err(ConfigError::invalid("attack.projectile_speed", "must be positive"));
        }
        Ok(())
    }
}

/// Play-field geometry. Y grows downward; words enter at `spawn_y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Vertical center of the player.
    pub player_y: f32,
    pub player_half: Vec2,
    pub word_half: Vec2,
    pub powerup_half: Vec2,
    pub projectile_half: Vec2,
    /// Vertical position new entities appear at (above the visible top).
    pub spawn_y: f32,
    /// Keep new entities this far from the side walls.
    pub spawn_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_y: 500.0,
            player_half: Vec2::new(25.0, 25.0),
            word_half: Vec2::new(48.0, 20.0),
            powerup_half: Vec2::new(16.0, 16.0),
            projectile_half: Vec2::new(4.0, 10.0),
            spawn_y: -30.0,
            spawn_margin: 50.0,
        }
    }
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::invalid("world", "width and height must be positive"));
        }
        if self.spawn_margin * 2.0 >= self.width {
            return Err(ConfigError::invalid("world.spawn_margin", "leaves no room to spawn"));
        }
        Ok(())
    }
}

/// Score, lives and timer rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub initial_lives: u32,
    pub game_time_secs: u32,
    /// Reaching `level_score_step * level` points advances the level.
    pub level_score_step: u64,
    /// Base points per character of a matched term.
    pub points_per_char: u64,
    /// Score scaling per level: factor = points_multiplier^(level - 1).
    pub points_multiplier: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            game_time_secs: 120,
            level_score_step: 1000,
            points_per_char: 100,
            points_multiplier: 1.1,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_lives == 0 {
            return Err(ConfigError::invalid("run.initial_lives", "must be at least 1"));
        }
        if self.game_time_secs == 0 {
            return Err(ConfigError::invalid("run.game_time_secs", "must be at least 1"));
        }
        if self.level_score_step == 0 {
            return Err(ConfigError::invalid("run.level_score_step", "must be at least 1"));
        }
        if !(self.points_multiplier > 0.0) {
            return Err(ConfigError::invalid("run.points_multiplier", "must be positive"));
        }
        Ok(())
    }
}

/// Fall speed and spawn pacing of one difficulty tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Word fall speed in units per second.
    pub fall_speed: f32,
    pub interval_base_ms: f64,
    /// Applied to the spawn interval after every word spawn.
    pub interval_decay: f64,
    pub interval_floor_ms: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            fall_speed: 60.0,
            interval_base_ms: 3000.0,
            interval_decay: 0.98,
            interval_floor_ms: 1500.0,
        }
    }
}

impl TierConfig {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.fall_speed > 0.0) {
            return Err(ConfigError::invalid(field, "fall_speed must be positive"));
        }
        if !(self.interval_decay > 0.0 && self.interval_decay <= 1.0) {
            return Err(ConfigError::invalid(field, "interval_decay must be in (0, 1]"));
        }
        if !(self.interval_floor_ms > 0.0 && self.interval_floor_ms <= self.interval_base_ms) {
            return Err(ConfigError::invalid(
                field,
                "interval_floor_ms must be positive and not above interval_base_ms",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierConfig,
    pub medium: TierConfig,
    pub hard: TierConfig,
    /// Highest level still played at EASY.
    pub easy_max_level: u32,
    /// Highest level still played at MEDIUM.
    pub medium_max_level: u32,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierConfig::default(),
            medium: TierConfig {
                fall_speed: 90.0,
                interval_base_ms: 2500.0,
                interval_decay: 0.97,
                interval_floor_ms: 1000.0,
            },
            hard: TierConfig {
                fall_speed: 120.0,
                interval_base_ms: 2000.0,
                interval_decay: 0.95,
                interval_floor_ms: 600.0,
            },
            easy_max_level: 3,
            medium_max_level: 6,
        }
    }
}

impl TierTable {
    pub fn tier_for_level(&self, level: u32) -> Tier {
        if level <= self.easy_max_level {
            Tier::Easy
        } else if level <= self.medium_max_level {
            Tier::Medium
        } else {
            Tier::Hard
        }
    }

    pub fn get(&self, tier: Tier) -> &TierConfig {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.easy.validate("tiers.easy")?;
        self.medium.validate("tiers.medium")?;
        self.hard.validate("tiers.hard")?;
        if self.easy_max_level > self.medium_max_level {
            return Err(ConfigError::invalid(
                "tiers.easy_max_level",
                "must not exceed medium_max_level",
            ));
        }
        Ok(())
    }
}

/// Parameters of a single powerup type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupTypeConfig {
    /// Effect duration; 0 means instantaneous.
    pub duration_ms: u64,
    /// Effect strength: fall-speed scale for SLOW_TIME, score multiplier for
    /// DOUBLE_POINTS, unused for EXTRA_LIFE.
    pub value: f64,
    pub color: Rgb,
}

impl Default for PowerupTypeConfig {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            value: 1.0,
            color: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Probability that a spawn attempt produces a powerup.
    pub spawn_chance: f64,
    /// Time between spawn attempts.
    pub cooldown_ms: u64,
    pub fall_speed: f32,
    /// Types eligible for spawning.
    pub enabled: Vec<PowerupKind>,
    pub types: BTreeMap<PowerupKind, PowerupTypeConfig>,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        let mut types = BTreeMap::new();
        types.insert(
            PowerupKind::SlowTime,
            PowerupTypeConfig {
                duration_ms: 10_000,
                value: 0.5,
                color: Rgb(0x00ffff),
            },
        );
        types.insert(
            PowerupKind::DoublePoints,
            PowerupTypeConfig {
                duration_ms: 10_000,
                value: 2.0,
                color: Rgb(0xffff00),
            },
        );
        types.insert(
            PowerupKind::ExtraLife,
            PowerupTypeConfig {
                duration_ms: 0,
                value: 1.0,
                color: Rgb(0xff00ff),
            },
        );
        Self {
            spawn_chance: 0.3,
            cooldown_ms: 15_000,
            fall_speed: 100.0,
            enabled: PowerupKind::ALL.to_vec(),
            types,
        }
    }
}

impl PowerupConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::invalid("powerups.spawn_chance", "must be in [0, 1]"));
        }
        if self.cooldown_ms == 0 {
            return Err(ConfigError::invalid("powerups.cooldown_ms", "must be positive"));
        }
        if !(self.fall_speed > 0.0) {
            return Err(ConfigError::invalid("powerups.fall_speed", "must be positive"));
        }
        for (kind, params) in &self.types {
            if kind.is_timed() && params.duration_ms == 0 {
                return Err(ConfigError::invalid(
                    "powerups.types",
                    format!("{} needs a non-zero duration_ms", kind.label()),
                ));
            }
            if !(params.value > 0.0) {
                return Err(ConfigError::invalid(
                    "powerups.types",
                    format!("{} needs a positive value", kind.label()),
                ));
            }
        }
        Ok(())
    }
}

/// How typed text destroys words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackModel {
    /// A submission removes the matching word immediately.
    #[default]
    Direct,
    /// A submission fires a projectile carrying the text; the word is removed
    /// only if the projectile reaches a word the text matches.
    Projectile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    pub model: AttackModel,
    /// Upward projectile speed in units per second.
    pub projectile_speed: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            model: AttackModel::Direct,
            projectile_speed: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "seed": 7,
            "run": { "initial_lives": 5 },
            "attack": { "model": "projectile" }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.run.initial_lives, 5);
        assert_eq!(config.run.game_time_secs, 120);
        assert_eq!(config.attack.model, AttackModel::Projectile);
        assert_eq!(config.tiers.hard.fall_speed, 120.0);
    }

    #[test]
    fn powerup_types_parse_by_name() {
        let json = r#"{
            "powerups": {
                "enabled": ["SLOW_TIME"],
                "types": { "SLOW_TIME": { "duration_ms": 4000, "value": 0.25 } }
            }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.powerups.enabled, vec![PowerupKind::SlowTime]);
        assert_eq!(config.powerups.types[&PowerupKind::SlowTime].value, 0.25);
        assert!(!config.powerups.types.contains_key(&PowerupKind::ExtraLife));
    }

    #[test]
    fn rejects_growing_decay() {
        let json = r#"{ "tiers": { "easy": { "interval_decay": 1.5 } } }"#;
        let err = SessionConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tiers.easy", .. }));
    }

    #[test]
    fn rejects_timed_powerup_without_duration() {
        let json = r#"{ "powerups": { "types": { "DOUBLE_POINTS": { "value": 2.0 } } } }"#;
        assert!(SessionConfig::from_json(json).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SessionConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn tier_boundaries() {
        let tiers = TierTable::default();
        assert_eq!(tiers.tier_for_level(1), Tier::Easy);
        assert_eq!(tiers.tier_for_level(3), Tier::Easy);
        assert_eq!(tiers.tier_for_level(4), Tier::Medium);
        assert_eq!(tiers.tier_for_level(6), Tier::Medium);
        assert_eq!(tiers.tier_for_level(7), Tier::Hard);
    }
}
