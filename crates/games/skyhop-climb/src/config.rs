use serde::{Deserialize, Serialize};

/// Gravity acceleration (units/s^2, downward).
pub const GRAVITY: f32 = -12.0;
/// Vertical velocity given by every landing.
pub const JUMP_VELOCITY: f32 = 11.0;
/// Horizontal speed at full touch acceleration.
pub const MOVE_VELOCITY: f32 = 20.0;
/// Player width for AABB collision.
pub const PLAYER_WIDTH: f32 = 1.0;
/// Player height for AABB collision.
pub const PLAYER_HEIGHT: f32 = 1.0;
/// Player heights at or below this (and above the origin) count as standing on the ground.
pub const GROUND_LINE: f32 = 0.5;

pub const STEP_WIDTH: f32 = 2.0;
pub const STEP_HEIGHT: f32 = 0.5;
pub const STEP_VELOCITY: f32 = 2.0;
pub const ENEMY_WIDTH: f32 = 1.0;
pub const ENEMY_HEIGHT: f32 = 1.0;
pub const ENEMY_VELOCITY: f32 = 2.0;
pub const STAR_WIDTH: f32 = 0.8;
pub const STAR_HEIGHT: f32 = 0.8;
pub const GOAL_WIDTH: f32 = 2.0;
pub const GOAL_HEIGHT: f32 = 1.3;

/// World width in units (one camera width).
pub const WORLD_WIDTH: f32 = 10.0;
/// Climb height: twenty screens of fifteen units.
pub const WORLD_HEIGHT: f32 = 15.0 * 20.0;
/// Stage generation stops this far below the top of the world.
pub const GOAL_MARGIN: f32 = 5.0;
/// Visible world height; falling half of it below the best height ends the round.
pub const VIEWPORT_HEIGHT: f32 = 15.0;
/// Tallest world a config or per-round override may ask for.
pub const MAX_WORLD_HEIGHT: f32 = 15.0 * 200.0;

/// Why a config cannot produce a finishable stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Gravity must pull down.
    GravityNotDownward(f32),
    /// The shortest step gap (`2/3 * max_jump_height - 0.5`) must be positive.
    JumpTooLow { max_jump_height: f32 },
    /// World height outside `(0, MAX_WORLD_HEIGHT]`.
    WorldHeightOutOfRange(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GravityNotDownward(g) => write!(f, "gravity must be negative, got {g}"),
            Self::JumpTooLow { max_jump_height } => {
                write!(
                    f,
                    "max jump height {max_jump_height} leaves no room between steps"
                )
            },
            Self::WorldHeightOutOfRange(h) => {
                write!(f, "world height {h} outside (0, {MAX_WORLD_HEIGHT}]")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// Physics parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbPhysicsConfig {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub move_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ground_line: f32,
}

impl Default for ClimbPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            move_velocity: MOVE_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            ground_line: GROUND_LINE,
        }
    }
}

impl ClimbPhysicsConfig {
    /// Apex of a single jump from rest: `v^2 / (2 |g|)`.
    pub fn max_jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * -self.gravity)
    }
}

/// World extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub goal_margin: f32,
    pub viewport_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            goal_margin: GOAL_MARGIN,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

/// Entity sizes, speeds and the random thresholds used by stage generation.
///
/// Each threshold is compared as `draw > threshold` with `draw` uniform in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub step_width: f32,
    pub step_height: f32,
    pub step_velocity: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_velocity: f32,
    pub star_width: f32,
    pub star_height: f32,
    pub goal_width: f32,
    pub goal_height: f32,
    pub moving_step_threshold: f32,
    pub static_enemy_threshold: f32,
    pub star_threshold: f32,
    pub enemy_threshold: f32,
    /// A landed-on step vanishes when a draw exceeds this.
    pub vanish_threshold: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            step_width: STEP_WIDTH,
            step_height: STEP_HEIGHT,
            step_velocity: STEP_VELOCITY,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_velocity: ENEMY_VELOCITY,
            star_width: STAR_WIDTH,
            star_height: STAR_HEIGHT,
            goal_width: GOAL_WIDTH,
            goal_height: GOAL_HEIGHT,
            moving_step_threshold: 0.8,
            static_enemy_threshold: 0.8,
            star_threshold: 0.6,
            enemy_threshold: 0.6,
            vanish_threshold: 0.5,
        }
    }
}

/// Cue volumes handed to the audio notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub star_volume: f32,
    pub eliminate_volume: f32,
    pub game_over_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            star_volume: 0.7,
            eliminate_volume: 0.7,
            game_over_volume: 1.0,
        }
    }
}

/// Top-level climb configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    pub physics: ClimbPhysicsConfig,
    pub world: WorldConfig,
    pub stage: StageConfig,
    pub audio: AudioConfig,
}

impl ClimbConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check that stage generation terminates with this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gravity = self.physics.gravity;
        if gravity.is_nan() || gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(gravity));
        }
        let max_jump_height = self.physics.max_jump_height();
        let shortest_gap = max_jump_height * 2.0 / 3.0 - 0.5;
        if shortest_gap.is_nan() || shortest_gap <= 0.0 {
            return Err(ConfigError::JumpTooLow { max_jump_height });
        }
        let height = self.world.height;
        if !height.is_finite() || height <= 0.0 || height > MAX_WORLD_HEIGHT {
            return Err(ConfigError::WorldHeightOutOfRange(height));
        }
        Ok(())
    }

    /// This config if it validates, defaults otherwise.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!("Invalid climb config: {e}, using defaults");
                ClimbConfig::default()
            },
        }
    }

    /// Load config from `SKYHOP_CLIMB_CONFIG` or `config/climb.toml`.
    pub fn load() -> Self {
        let path = std::env::var("SKYHOP_CLIMB_CONFIG")
            .unwrap_or_else(|_| "config/climb.toml".to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    /// Load config from `path`. Falls back to defaults if the file is missing,
    /// unparseable or invalid.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg.validated(),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    ClimbConfig::default()
                },
            },
            Err(_) => ClimbConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_jump_height_matches_formula() {
        let physics = ClimbPhysicsConfig::default();
        let expected = 11.0 * 11.0 / 24.0;
        assert!((physics.max_jump_height() - expected).abs() < 1e-5);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = ClimbConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ClimbConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let cfg = ClimbConfig::from_toml_str(
            r#"
            [world]
            height = 45.0

            [physics]
            gravity = -10.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.height, 45.0);
        assert_eq!(cfg.world.width, WORLD_WIDTH);
        assert_eq!(cfg.physics.gravity, -10.0);
        assert_eq!(cfg.physics.jump_velocity, JUMP_VELOCITY);
        assert_eq!(cfg.stage, StageConfig::default());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../../config/climb.toml");
        let cfg = ClimbConfig::from_toml_str(shipped).unwrap();
        assert_eq!(cfg, ClimbConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ClimbConfig::from_toml_str("[world\nheight = ").is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ClimbConfig::default().validate(), Ok(()));
    }

    #[test]
    fn low_jump_velocity_is_rejected() {
        let cfg = ClimbConfig::from_toml_str("[physics]\njump_velocity = 3.0").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::JumpTooLow { .. })));
        assert_eq!(cfg.validated(), ClimbConfig::default());
    }

    #[test]
    fn upward_gravity_is_rejected() {
        for gravity in [0.0, 4.0, f32::NAN] {
            let mut cfg = ClimbConfig::default();
            cfg.physics.gravity = gravity;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::GravityNotDownward(_))
            ));
        }
    }

    #[test]
    fn world_height_must_be_bounded() {
        for height in [0.0, -5.0, f32::INFINITY, MAX_WORLD_HEIGHT + 1.0] {
            let mut cfg = ClimbConfig::default();
            cfg.world.height = height;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::WorldHeightOutOfRange(_))
            ));
        }
    }

    #[test]
    fn load_from_reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climb.toml");
        std::fs::write(&path, "[world]\nheight = 60.0\n").unwrap();
        let cfg = ClimbConfig::load_from(&path);
        assert_eq!(cfg.world.height, 60.0);
        assert_eq!(cfg.physics, ClimbPhysicsConfig::default());
    }

    #[test]
    fn load_from_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climb.toml");
        std::fs::write(&path, "[physics\ngravity = ").unwrap();
        assert_eq!(ClimbConfig::load_from(&path), ClimbConfig::default());
    }

    #[test]
    fn load_from_unplayable_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climb.toml");
        std::fs::write(&path, "[physics]\ngravity = 2.0\n").unwrap();
        assert_eq!(ClimbConfig::load_from(&path), ClimbConfig::default());
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ClimbConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(cfg, ClimbConfig::default());
    }
}
