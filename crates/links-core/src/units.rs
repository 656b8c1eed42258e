use serde::{Deserialize, Serialize};

/// Revolutions per minute to radians per second.
pub const RPM_TO_RAD_PER_SEC: f32 = 2.0 * std::f32::consts::PI / 60.0;
/// Meters in one yard.
pub const METERS_PER_YARD: f32 = 0.9144;
/// Meters in one foot.
pub const METERS_PER_FOOT: f32 = 0.3048;
/// Miles per hour to meters per second.
pub const MPH_TO_MPS: f32 = 0.44704;

/// Unit a caller wants distances reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Meters,
    #[default]
    Yards,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance in meters into this unit.
    pub fn convert_from_meters(self, meters: f32) -> f32 {
        match self {
            Self::Meters => meters,
            Self::Yards => meters / METERS_PER_YARD,
            Self::Feet => meters / METERS_PER_FOOT,
        }
    }

    /// Convert a distance in this unit back into meters.
    pub fn to_meters(self, value: f32) -> f32 {
        match self {
            Self::Meters => value,
            Self::Yards => value * METERS_PER_YARD,
            Self::Feet => value * METERS_PER_FOOT,
        }
    }

    /// Short label for log lines and tables.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Yards => "yd",
            Self::Feet => "ft",
        }
    }
}

/// Hole wind is usually quoted in mph; the engine wants m/s.
pub fn mph_to_mps(speed_mph: f32) -> f32 {
    speed_mph * MPH_TO_MPS
}
