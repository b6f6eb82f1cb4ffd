//! Game configuration, loaded from `~/.flappy/config.json`.
//!
//! Every section is `#[serde(default)]`, so a file only needs the values it
//! overrides. A missing file yields [`GameConfig::default`].

use super::constants::*;
use crate::error::ConfigError;
use crate::level::difficulty::DifficultyTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Playfield geometry and pipe motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Distance from floor to ceiling.
    pub vertical_span: f64,
    pub pipe_body_width: f64,
    pub pipe_head_height: f64,
    pub pipe_move_speed: f64,
    pub pipe_spawn_x: f64,
    pub pipe_destroy_x: f64,
    /// Minimum distance kept between a gap and the floor or ceiling.
    pub gap_edge_margin: f64,
    pub flyer_x: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            vertical_span: TOTAL_VERTICAL_SPAN,
            pipe_body_width: PIPE_BODY_WIDTH,
            pipe_head_height: PIPE_HEAD_HEIGHT,
            pipe_move_speed: PIPE_MOVE_SPEED,
            pipe_spawn_x: PIPE_SPAWN_X_POSITION,
            pipe_destroy_x: PIPE_DESTROY_X_POSITION,
            gap_edge_margin: GAP_EDGE_MARGIN,
            flyer_x: FLYER_X_POSITION,
        }
    }
}

impl WorldConfig {
    pub fn floor_y(&self) -> f64 {
        -self.vertical_span * 0.5
    }

    pub fn ceiling_y(&self) -> f64 {
        self.vertical_span * 0.5
    }
}

/// Flyer impulse, collider and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerConfig {
    pub jump_amount: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub gravity: f64,
    pub terminal_velocity: f64,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            jump_amount: FLYER_JUMP_AMOUNT,
            half_width: FLYER_HALF_WIDTH,
            half_height: FLYER_HALF_HEIGHT,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }
}

/// Ground belt and cloud layer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub ground_segment_count: usize,
    pub ground_segment_width: f64,
    pub ground_destroy_x: f64,
    pub ground_speed_multiplier: f64,
    pub cloud_spawn_x: f64,
    pub cloud_destroy_x: f64,
    pub cloud_y: f64,
    pub cloud_speed_multiplier: f64,
    pub cloud_spawn_interval: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            ground_segment_count: GROUND_SEGMENT_COUNT,
            ground_segment_width: GROUND_SEGMENT_WIDTH,
            ground_destroy_x: GROUND_DESTROY_X_POSITION,
            ground_speed_multiplier: GROUND_SPEED_MULTIPLIER,
            cloud_spawn_x: CLOUD_SPAWN_X_POSITION,
            cloud_destroy_x: CLOUD_DESTROY_X_POSITION,
            cloud_y: CLOUD_Y_POSITION,
            cloud_speed_multiplier: CLOUD_SPEED_MULTIPLIER,
            cloud_spawn_interval: CLOUD_SPAWN_INTERVAL,
        }
    }
}

/// Fixed-step driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub step_seconds: f64,
    /// Frame deltas longer than this are clamped (after a pause or lag spike).
    pub max_frame_seconds: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_seconds: PHYSICS_STEP_SECONDS,
            max_frame_seconds: MAX_FRAME_SECONDS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub flyer: FlyerConfig,
    pub difficulty: DifficultyTable,
    pub background: BackgroundConfig,
    pub session: SessionConfig,
}

impl GameConfig {
    /// Load and validate a config file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.world.vertical_span <= 0.0 {
            return invalid("world.vertical_span must be positive");
        }
        if self.world.pipe_move_speed <= 0.0 {
            return invalid("world.pipe_move_speed must be positive");
        }
        if self.world.pipe_destroy_x >= self.world.flyer_x
            || self.world.pipe_spawn_x <= self.world.flyer_x
        {
            return invalid("pipes must spawn right of the flyer and be destroyed left of it");
        }
        if !self.difficulty.is_monotonic() {
            return invalid("difficulty tiers must be positive and never get easier");
        }
        if self.difficulty.easy.gap_size >= self.world.vertical_span {
            return invalid("difficulty gap sizes must be smaller than world.vertical_span");
        }
        if self.background.ground_segment_count == 0 || self.background.ground_segment_width <= 0.0
        {
            return invalid("ground belt needs at least one segment of positive width");
        }
        if self.background.cloud_spawn_interval <= 0.0 {
            return invalid("background.cloud_spawn_interval must be positive");
        }
        if self.session.step_seconds <= 0.0 || self.session.max_frame_seconds <= 0.0 {
            return invalid("session step and frame clamp must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::difficulty::TierSettings;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "world": { "pipe_move_speed": 45.0 } }"#)
            .expect("partial config should parse");
        assert!((config.world.pipe_move_speed - 45.0).abs() < f64::EPSILON);
        assert!((config.world.vertical_span - TOTAL_VERTICAL_SPAN).abs() < f64::EPSILON);
        assert_eq!(config.difficulty, DifficultyTable::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = GameConfig::from_json("{}").expect("empty config should parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_easier_later_tier_rejected() {
        let mut config = GameConfig::default();
        config.difficulty.impossible = TierSettings::new(60.0, 1.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = GameConfig::load(&dir.path().join("absent.json")).expect("load");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_floor_and_ceiling_from_span() {
        let world = WorldConfig::default();
        assert!((world.floor_y() - WORLD_FLOOR_Y).abs() < f64::EPSILON);
        assert!((world.ceiling_y() - WORLD_CEILING_Y).abs() < f64::EPSILON);
    }
}
