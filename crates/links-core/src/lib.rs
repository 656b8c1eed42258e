pub mod club;
pub mod error;
pub mod surface;
pub mod terrain;
pub mod units;

pub use club::{Club, ClubCategory};
pub use error::ConfigError;
pub use glam::Vec3;
pub use surface::{Surface, SurfaceProps, SurfaceTable};
pub use terrain::{FlatTerrain, PlaneTerrain, Terrain, TerrainFn};
pub use units::DistanceUnit;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::club::{Club, ClubCategory, club_by_name, standard_bag};
    use crate::surface::Surface;
    use crate::terrain::{FlatTerrain, PlaneTerrain, TerrainFn};

    /// Sea-level fairway everywhere.
    pub fn flat_fairway() -> FlatTerrain {
        FlatTerrain::new(0.0, Surface::Fairway)
    }

    /// Level ground of the given surface at height 0.
    pub fn flat(surface: Surface) -> FlatTerrain {
        FlatTerrain::new(0.0, surface)
    }

    /// A pond: every point is water.
    pub fn water_everywhere() -> FlatTerrain {
        FlatTerrain::new(0.0, Surface::Water)
    }

    /// Fairway tilted by the given gradients.
    pub fn tilted_fairway(slope_x: f32, slope_z: f32) -> PlaneTerrain {
        PlaneTerrain {
            base_height: 0.0,
            slope_x,
            slope_z,
            surface: Surface::Fairway,
        }
    }

    /// Fairway up to `water_z` downrange, water beyond it.
    pub fn fairway_then_water(
        water_z: f32,
    ) -> TerrainFn<impl Fn(f32, f32) -> f32, impl Fn(f32, f32) -> Surface> {
        TerrainFn::new(
            |_x, _z| 0.0,
            move |_x, z| {
                if z >= water_z {
                    Surface::Water
                } else {
                    Surface::Fairway
                }
            },
        )
    }

    /// Pull a club from the standard bag by short name ("1W", "7i", "PT", ...).
    pub fn club(short_name: &str) -> Club {
        let bag = standard_bag();
        club_by_name(&bag, short_name)
            .cloned()
            .unwrap_or_else(|| panic!("no club named {short_name} in the standard bag"))
    }

    pub fn driver() -> Club {
        club("1W")
    }

    pub fn seven_iron() -> Club {
        club("7i")
    }

    pub fn putter() -> Club {
        club("PT")
    }

    /// A spinless full-swing club, for analytic trajectory checks.
    pub fn spinless_club(ball_speed: f32, launch_angle: f32) -> Club {
        Club::new(
            "Test Club",
            "TC",
            launch_angle,
            ball_speed,
            launch_angle,
            0.0,
            0.0,
            ClubCategory::Iron,
        )
    }
}
