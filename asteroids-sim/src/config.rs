//! Gameplay Configuration
//!
//! Every tunable constant of the game lives in [`GameConfig`].
//! Durations are in ticks (1/60 s), distances in play-field units.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// Configuration for game simulation.
///
/// Missing fields in a JSON override file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play-field width
    pub field_width: f32,
    /// Play-field height
    pub field_height: f32,

    /// Velocity added per tick of thrust
    pub ship_acceleration: f32,
    /// Ship speed cap
    pub ship_max_speed: f32,
    /// Degrees turned per tick while a rotate key is held
    pub ship_rotation_speed: f32,
    /// Ship collision radius
    pub ship_radius: f32,
    /// Ticks between player shots
    pub ship_shoot_cooldown: u32,
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// Invincibility after respawn (ticks)
    pub respawn_invincibility: u32,
    /// Chance that a hyperspace jump destroys the ship
    pub hyperspace_death_chance: f32,

    /// Bullet speed added to the shooter's velocity
    pub bullet_speed: f32,
    /// Bullet lifetime (ticks)
    pub bullet_lifetime: u32,

    /// Minimum asteroid speed
    pub asteroid_min_speed: f32,
    /// Maximum asteroid speed
    pub asteroid_max_speed: f32,
    /// Maximum asteroid spin (degrees per tick, either direction)
    pub asteroid_max_spin: f32,
    /// Asteroids in the first level
    pub initial_asteroids: u32,
    /// Minimum spawn distance between a new asteroid and the ship
    pub asteroid_safe_distance: f32,

    /// Chance per tick that a UFO appears (when none is present)
    pub ufo_spawn_chance: f32,
    /// Share of spawned UFOs that are small
    pub ufo_small_chance: f32,
    /// Ticks between UFO shots
    pub ufo_shoot_interval: u32,
    /// Minimum horizontal UFO speed
    pub ufo_min_speed: f32,
    /// Maximum horizontal UFO speed
    pub ufo_max_speed: f32,
    /// Distance UFOs keep from the top and bottom edges
    pub ufo_vertical_margin: f32,
    /// Chance per tick that a UFO picks a new vertical speed
    pub ufo_course_change_chance: f32,
    /// Aim error of large UFOs (radians, either direction)
    pub ufo_aim_spread: f32,
    /// How far past the far edge a UFO travels before leaving
    pub ufo_exit_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: crate::FIELD_WIDTH,
            field_height: crate::FIELD_HEIGHT,

            ship_acceleration: 0.05,
            ship_max_speed: 5.0,
            ship_rotation_speed: 5.0,
            ship_radius: 15.0,
            ship_shoot_cooldown: 10,
            starting_lives: 3,
            respawn_invincibility: 180, // 3 seconds
            hyperspace_death_chance: 1.0 / 6.0,

            bullet_speed: 10.0,
            bullet_lifetime: 60, // ~1000 ms

            asteroid_min_speed: 0.5,
            asteroid_max_speed: 2.0,
            asteroid_max_spin: 2.0,
            initial_asteroids: 4,
            asteroid_safe_distance: 200.0,

            ufo_spawn_chance: 0.002,
            ufo_small_chance: 0.4,
            ufo_shoot_interval: 120, // 2 seconds
            ufo_min_speed: 1.0,
            ufo_max_speed: 2.0,
            ufo_vertical_margin: 50.0,
            ufo_course_change_chance: 0.02,
            ufo_aim_spread: 0.5,
            ufo_exit_margin: 20.0,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break the simulation.
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must be a positive number" })
            }
        }
        fn probability(field: &'static str, value: f32) -> ConfigResult<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must be within [0, 1]" })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("ship_max_speed", self.ship_max_speed)?;
        positive("ship_radius", self.ship_radius)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("asteroid_max_speed", self.asteroid_max_speed)?;
        positive("ufo_max_speed", self.ufo_max_speed)?;

        if self.bullet_lifetime == 0 {
            return Err(ConfigError::Invalid {
                field: "bullet_lifetime",
                reason: "must be at least one tick",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least one",
            });
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::Invalid {
                field: "asteroid_min_speed",
                reason: "must not exceed asteroid_max_speed",
            });
        }
        if self.ufo_min_speed > self.ufo_max_speed {
            return Err(ConfigError::Invalid {
                field: "ufo_min_speed",
                reason: "must not exceed ufo_max_speed",
            });
        }
        if self.ufo_vertical_margin * 2.0 >= self.field_height {
            return Err(ConfigError::Invalid {
                field: "ufo_vertical_margin",
                reason: "leaves no room for UFOs",
            });
        }

        probability("hyperspace_death_chance", self.hyperspace_death_chance)?;
        probability("ufo_spawn_chance", self.ufo_spawn_chance)?;
        probability("ufo_small_chance", self.ufo_small_chance)?;
        probability("ufo_course_change_chance", self.ufo_course_change_chance)?;

        Ok(())
    }

    /// Centre of the play-field.
    pub fn field_center(&self) -> crate::core::Vec2 {
        crate::core::Vec2::new(
            (self.field_width / 2.0).floor(),
            (self.field_height / 2.0).floor(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "starting_lives": 5, "bullet_speed": 12.5 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.bullet_speed, 12.5);
        assert_eq!(config.field_width, 800.0);
        assert_eq!(config.ufo_shoot_interval, 120);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = GameConfig { hyperspace_death_chance: 1.5, ..GameConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "hyperspace_death_chance", .. })
        ));

        let config = GameConfig { starting_lives: 0, ..GameConfig::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { field_width: 0.0, ..GameConfig::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { ufo_vertical_margin: 300.0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_field_center() {
        let center = GameConfig::default().field_center();
        assert_eq!(center.x, 400.0);
        assert_eq!(center.y, 300.0);
    }
}
