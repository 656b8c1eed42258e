use serde::{Deserialize, Serialize};

use links_core::error::{ConfigError, read_toml};
use links_core::surface::SurfaceTable;

/// Horizontal speed kept through each bounce.
pub const BOUNCE_HORIZONTAL_DAMPING: f32 = 0.85;
/// Lateral velocity gained per rad/s of sidespin on impact.
pub const GEAR_EFFECT_SIDE: f32 = 0.0003;
/// Forward velocity gained per rad/s of backspin on impact.
pub const GEAR_EFFECT_BACK: f32 = 0.0002;
/// Rebounds slower than this (m/s) turn into a roll.
pub const MIN_REBOUND_SPEED: f32 = 0.5;
/// After this many bounces the ball rolls regardless of rebound speed.
pub const MAX_AIRBORNE_BOUNCES: u32 = 5;
/// Backspin (rad/s) needed for the ball to check on landing.
pub const CHECK_SPIN_THRESHOLD: f32 = 10.0;
/// Checking only happens within this many bounces of landing.
pub const CHECK_MAX_BOUNCES: u32 = 2;
/// Deceleration (m/s^2) per rad/s of backspin while checking.
pub const CHECK_COEFFICIENT: f32 = 0.001;
/// Wall-clock seconds between trail samples.
pub const TRAIL_INTERVAL: f32 = 0.02;

/// Tunable gameplay heuristics for bounce, roll and tracer sampling.
///
/// Physical constants live in [`crate::aero`] and are not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub bounce_horizontal_damping: f32,
    pub gear_effect_side: f32,
    pub gear_effect_back: f32,
    pub min_rebound_speed: f32,
    pub max_airborne_bounces: u32,
    pub check_spin_threshold: f32,
    pub check_max_bounces: u32,
    pub check_coefficient: f32,
    pub trail_interval: f32,
    /// Apply aerodynamic drag in flight. Disable only for analytic checks.
    pub enable_drag: bool,
    /// Apply Magnus lift in flight.
    pub enable_magnus: bool,
    pub surfaces: SurfaceTable,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            bounce_horizontal_damping: BOUNCE_HORIZONTAL_DAMPING,
            gear_effect_side: GEAR_EFFECT_SIDE,
            gear_effect_back: GEAR_EFFECT_BACK,
            min_rebound_speed: MIN_REBOUND_SPEED,
            max_airborne_bounces: MAX_AIRBORNE_BOUNCES,
            check_spin_threshold: CHECK_SPIN_THRESHOLD,
            check_max_bounces: CHECK_MAX_BOUNCES,
            check_coefficient: CHECK_COEFFICIENT,
            trail_interval: TRAIL_INTERVAL,
            enable_drag: true,
            enable_magnus: true,
            surfaces: SurfaceTable::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config: Self = read_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `LINKS_PHYSICS_CONFIG` or `config/physics.toml`, falling back
    /// to defaults if the file is missing or invalid.
    pub fn load() -> Self {
        let path = std::env::var("LINKS_PHYSICS_CONFIG")
            .unwrap_or_else(|_| "config/physics.toml".to_string());
        if !std::path::Path::new(&path).exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("bounce_horizontal_damping", self.bounce_horizontal_damping)?;
        check_non_negative("gear_effect_side", self.gear_effect_side)?;
        check_non_negative("gear_effect_back", self.gear_effect_back)?;
        check_non_negative("min_rebound_speed", self.min_rebound_speed)?;
        check_non_negative("check_spin_threshold", self.check_spin_threshold)?;
        check_non_negative("check_coefficient", self.check_coefficient)?;
        if !(self.trail_interval > 0.0 && self.trail_interval.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "trail_interval must be positive, got {}",
                self.trail_interval
            )));
        }
        for (surface, props) in self.surfaces.iter() {
            check_non_negative(&format!("surfaces.{surface:?}.friction"), props.friction)?;
            check_fraction(&format!("surfaces.{surface:?}.bounce"), props.bounce)?;
            check_fraction(
                &format!("surfaces.{surface:?}.spin_retention"),
                props.spin_retention,
            )?;
        }
        Ok(())
    }
}

fn check_fraction(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be within 0..=1, got {value}"
        )))
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}
