//! Game configuration. Loaded from a RON file at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{AUTO_RANDOM_MARGIN, TARGET_SIZE};

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "sprite_shooter.ron";

/// Longest auto-assist window accepted, in seconds.
pub const MAX_ASSIST_SECS: f32 = 3600.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid rule `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Gameplay rules ────────────────────────────────────────────────────────────

/// Everything the simulation reads that a player might want to tune.
/// Speeds are world units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Play area width in world units.
    pub width: u32,
    /// Play area height in world units.
    pub height: u32,
    pub tick_rate_hz: u32,
    /// Period of the fire timer.
    pub fire_interval_ms: u64,
    /// Length of one auto-assist window.
    pub assist_secs: f32,
    /// Per-tick chance of a new target.
    pub spawn_chance: f64,
    /// Chance a target spawned in normal mode is a bonus target.
    pub bonus_chance: f64,
    pub fall_speed: f32,
    pub projectile_speed: f32,
    pub shooter_speed: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tick_rate_hz: 60,
            fire_interval_ms: 300,
            assist_secs: 7.0,
            spawn_chance: 0.02,
            bonus_chance: 0.25,
            fall_speed: 2.0,
            projectile_speed: 20.0,
            shooter_speed: 5.0,
        }
    }
}

impl Rules {
    pub fn fire_interval(&self) -> Duration {
        Duration::from_millis(self.fire_interval_ms)
    }

    pub fn assist_duration(&self) -> Duration {
        Duration::from_secs_f32(self.assist_secs)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz))
    }

    /// Reject values the simulation cannot run with (`gen_bool` panics
    /// outside [0, 1], empty spawn ranges, zero-length timers).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_side = (TARGET_SIZE as u32).max(2 * AUTO_RANDOM_MARGIN);
        if self.width < min_side {
            return Err(invalid("width", format!("must be at least {min_side}")));
        }
        if self.height < min_side {
            return Err(invalid("height", format!("must be at least {min_side}")));
        }
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz", "must be positive".into()));
        }
        if self.fire_interval_ms == 0 {
            return Err(invalid("fire_interval_ms", "must be positive".into()));
        }
        if !(self.assist_secs > 0.0 && self.assist_secs <= MAX_ASSIST_SECS) {
            return Err(invalid(
                "assist_secs",
                format!("must be in (0, {MAX_ASSIST_SECS}]"),
            ));
        }
        check_probability("spawn_chance", self.spawn_chance)?;
        check_probability("bonus_chance", self.bonus_chance)?;
        check_speed("fall_speed", self.fall_speed)?;
        check_speed("projectile_speed", self.projectile_speed)?;
        check_speed("shooter_speed", self.shooter_speed)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn check_probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(field, format!("{p} is not a probability")))
    }
}

fn check_speed(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} is not a positive speed")))
    }
}

// ── Front-end settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rules: Rules,
    /// Ring the terminal bell on hits.
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Where log output goes. Defaults to a file in the temp dir.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            sound: default_true(),
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Load from an explicitly named file. Missing or broken files are errors.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.rules.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `sprite_shooter.ron` from the working
    /// directory. See `load_in`.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<String>), ConfigError> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_in(&dir, path)
    }

    /// Load `path` if given, else `sprite_shooter.ron` inside `dir`.
    ///
    /// The implicit file may be absent, in which case defaults are used. If
    /// it is present but unreadable or unparsable, defaults are used and the
    /// problem comes back as a warning for the caller to log. Either way the
    /// result still has to pass validation.
    pub fn load_in(
        dir: &Path,
        path: Option<&Path>,
    ) -> Result<(Self, Option<String>), ConfigError> {
        if let Some(path) = path {
            return Ok((Self::from_file(path)?, None));
        }
        let path = dir.join(DEFAULT_CONFIG_FILE);
        let (config, warning) = match std::fs::read_to_string(&path) {
            Ok(data) => match ron::from_str::<Self>(&data) {
                Ok(c) => (c, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("Invalid config at {:?}: {}, using defaults", path, e)),
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), None),
            Err(e) => (
                Self::default(),
                Some(format!("Could not read config at {:?}: {}, using defaults", path, e)),
            ),
        };
        config.rules.validate()?;
        Ok((config, warning))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sprite_shooter.log"))
    }
}
