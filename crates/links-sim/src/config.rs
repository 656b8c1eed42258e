use serde::Deserialize;

use links_core::error::ConfigError;
use links_core::terrain::PlaneTerrain;
use links_core::units::DistanceUnit;
use links_physics::PhysicsConfig;

/// Top-level simulator configuration, loaded from a TOML scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub shot: ShotConfig,
    pub wind: WindConfig,
    /// Frames per second fed to the engine.
    pub frame_rate: f32,
    /// Give up on a shot after this many seconds.
    pub max_time: f32,
    pub unit: DistanceUnit,
    pub terrain: PlaneTerrain,
    pub dispersion: DispersionConfig,
    /// Engine tuning. When absent, `PhysicsConfig::load()` supplies it.
    pub physics: Option<PhysicsConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shot: ShotConfig::default(),
            wind: WindConfig::default(),
            frame_rate: 60.0,
            max_time: 60.0,
            unit: DistanceUnit::Yards,
            terrain: PlaneTerrain::default(),
            dispersion: DispersionConfig::default(),
            physics: None,
        }
    }
}

/// The primary shot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Full or short club name from the standard bag.
    pub club: String,
    pub power: f32,
    pub accuracy: f32,
    pub aim_deg: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            club: "Driver".to_string(),
            power: 1.0,
            accuracy: 0.5,
            aim_deg: 0.0,
        }
    }
}

/// Hole wind, in the units a scorecard shows it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub speed_mph: f32,
    /// Direction the wind blows toward (0 = downrange, 90 = right).
    pub direction_deg: f32,
}

/// Repeat the shot with randomized accuracy to show the spread.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispersionConfig {
    /// Extra shots to hit. 0 disables the study.
    pub shots: u32,
    /// Accuracy is drawn from `accuracy ± accuracy_spread`.
    pub accuracy_spread: f32,
    pub seed: u64,
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            shots: 0,
            accuracy_spread: 0.1,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse a TOML scenario and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Frames longer than a second are clamped by the engine
        if !(self.frame_rate >= 1.0 && self.frame_rate.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be at least 1, got {}",
                self.frame_rate
            )));
        }
        if !(self.max_time > 0.0 && self.max_time.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "max_time must be positive, got {}",
                self.max_time
            )));
        }
        let spread = self.dispersion.accuracy_spread;
        if spread.is_nan() || spread < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dispersion.accuracy_spread must be non-negative, got {spread}"
            )));
        }
        if self.wind.speed_mph < 0.0 {
            tracing::warn!(
                speed_mph = self.wind.speed_mph,
                "negative wind speed blows against the configured direction"
            );
        }
        match &self.physics {
            Some(physics) => physics.validate(),
            None => Ok(()),
        }
    }

    /// The scenario's engine tuning, else the shared physics config file.
    pub fn physics_config(&self) -> PhysicsConfig {
        self.physics.clone().unwrap_or_else(PhysicsConfig::load)
    }

    /// Load from `path` (usually the first CLI argument), else the file named
    /// by `LINKS_SIM_CONFIG`, else defaults. Then apply env var overrides.
    pub fn load(path: Option<String>) -> Self {
        let path = path.or_else(|| {
            std::env::var("LINKS_SIM_CONFIG")
                .ok()
                .filter(|p| !p.is_empty())
        });
        let mut config = match path {
            Some(path) => match links_core::error::read_toml::<SimConfig>(&path) {
                Ok(cfg) => {
                    tracing::info!("Loaded scenario from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    SimConfig::default()
                },
            },
            None => {
                tracing::info!("No scenario given, using defaults");
                SimConfig::default()
            },
        };

        if let Ok(club) = std::env::var("LINKS_SIM_CLUB")
            && !club.is_empty()
        {
            config.shot.club = club;
        }
        if let Ok(val) = std::env::var("LINKS_SIM_SHOTS")
            && let Ok(n) = val.parse::<u32>()
        {
            config.dispersion.shots = n;
        }
        if let Ok(val) = std::env::var("LINKS_SIM_SEED")
            && let Ok(n) = val.parse::<u64>()
        {
            config.dispersion.seed = n;
        }

        config
    }
}
