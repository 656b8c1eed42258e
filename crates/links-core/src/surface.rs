use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Terrain classification at a point on the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Tee,
    Fairway,
    Rough,
    Bunker,
    Green,
    Water,
    #[serde(alias = "oob")]
    OutOfBounds,
}

impl Surface {
    pub const ALL: [Surface; 7] = [
        Self::Tee,
        Self::Fairway,
        Self::Rough,
        Self::Bunker,
        Self::Green,
        Self::Water,
        Self::OutOfBounds,
    ];
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tee => "Tee Box",
            Self::Fairway => "Fairway",
            Self::Rough => "Rough",
            Self::Bunker => "Bunker",
            Self::Green => "Green",
            Self::Water => "Water",
            Self::OutOfBounds => "Out of Bounds",
        };
        f.write_str(name)
    }
}

/// How a surface responds to a ball landing on or rolling across it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProps {
    /// Rolling friction coefficient (deceleration = friction * g).
    pub friction: f32,
    /// Coefficient of restitution for vertical speed, 0..=1.
    pub bounce: f32,
    /// Fraction of spin kept through an impact, 0..=1.
    pub spin_retention: f32,
}

impl SurfaceProps {
    pub const fn new(friction: f32, bounce: f32, spin_retention: f32) -> Self {
        Self {
            friction,
            bounce,
            spin_retention,
        }
    }

    pub const TEE: Self = Self::new(0.15, 0.6, 0.5);
    pub const FAIRWAY: Self = Self::new(0.18, 0.55, 0.6);
    pub const ROUGH: Self = Self::new(0.45, 0.3, 0.2);
    pub const BUNKER: Self = Self::new(0.7, 0.1, 0.05);
    pub const GREEN: Self = Self::new(0.10, 0.35, 0.8);
    pub const WATER: Self = Self::new(1.0, 0.0, 0.0);
    pub const OUT_OF_BOUNDS: Self = Self::new(1.0, 0.0, 0.0);
}

/// Surface descriptor table keyed by classification.
///
/// Entries missing from a loaded table resolve to the rough entry, so a
/// partial TOML table never leaves the engine without friction data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceTable {
    entries: HashMap<Surface, SurfaceProps>,
}

impl Default for SurfaceTable {
    fn default() -> Self {
        let entries = Surface::ALL
            .iter()
            .map(|&s| (s, Self::builtin(s)))
            .collect();
        Self { entries }
    }
}

impl SurfaceTable {
    /// A table with no entries; every lookup falls back to rough.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn builtin(surface: Surface) -> SurfaceProps {
        match surface {
            Surface::Tee => SurfaceProps::TEE,
            Surface::Fairway => SurfaceProps::FAIRWAY,
            Surface::Rough => SurfaceProps::ROUGH,
            Surface::Bunker => SurfaceProps::BUNKER,
            Surface::Green => SurfaceProps::GREEN,
            Surface::Water => SurfaceProps::WATER,
            Surface::OutOfBounds => SurfaceProps::OUT_OF_BOUNDS,
        }
    }

    /// Builder-style override of one entry.
    pub fn with(mut self, surface: Surface, props: SurfaceProps) -> Self {
        self.entries.insert(surface, props);
        self
    }

    /// Properties for `surface`, or the rough-equivalent fallback.
    pub fn props(&self, surface: Surface) -> SurfaceProps {
        self.entries
            .get(&surface)
            .or_else(|| self.entries.get(&Surface::Rough))
            .copied()
            .unwrap_or(SurfaceProps::ROUGH)
    }

    pub fn contains(&self, surface: Surface) -> bool {
        self.entries.contains_key(&surface)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Surface, &SurfaceProps)> {
        self.entries.iter()
    }
}
