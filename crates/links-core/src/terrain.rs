use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Horizontal offset (m) for the central-difference slope sample.
pub const SLOPE_PROBE: f32 = 0.1;

/// Read-only view of the course the engine needs while stepping.
///
/// Both queries must be pure and callable at any `(x, z)`, including points
/// off the playable area. Elevation should be continuous enough for a
/// finite-difference slope estimate.
pub trait Terrain {
    /// Ground height at `(x, z)` in meters.
    fn elevation(&self, x: f32, z: f32) -> f32;

    /// Surface classification at `(x, z)`.
    fn surface(&self, x: f32, z: f32) -> Surface;
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn elevation(&self, x: f32, z: f32) -> f32 {
        (**self).elevation(x, z)
    }

    fn surface(&self, x: f32, z: f32) -> Surface {
        (**self).surface(x, z)
    }
}

/// Local gradient `(dh/dx, dh/dz)` by symmetric finite difference.
pub fn slope_at<T: Terrain + ?Sized>(terrain: &T, x: f32, z: f32) -> (f32, f32) {
    let d = SLOPE_PROBE;
    let slope_x = (terrain.elevation(x + d, z) - terrain.elevation(x - d, z)) / (2.0 * d);
    let slope_z = (terrain.elevation(x, z + d) - terrain.elevation(x, z - d)) / (2.0 * d);
    (slope_x, slope_z)
}

/// Level ground of a single surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatTerrain {
    pub height: f32,
    pub surface: Surface,
}

impl FlatTerrain {
    pub const fn new(height: f32, surface: Surface) -> Self {
        Self { height, surface }
    }
}

impl Terrain for FlatTerrain {
    fn elevation(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn surface(&self, _x: f32, _z: f32) -> Surface {
        self.surface
    }
}

/// A tilted plane: `height = base_height + slope_x * x + slope_z * z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneTerrain {
    pub base_height: f32,
    pub slope_x: f32,
    pub slope_z: f32,
    pub surface: Surface,
}

impl Default for PlaneTerrain {
    fn default() -> Self {
        Self {
            base_height: 0.0,
            slope_x: 0.0,
            slope_z: 0.0,
            surface: Surface::Fairway,
        }
    }
}

impl Terrain for PlaneTerrain {
    fn elevation(&self, x: f32, z: f32) -> f32 {
        self.base_height + self.slope_x * x + self.slope_z * z
    }

    fn surface(&self, _x: f32, _z: f32) -> Surface {
        self.surface
    }
}

/// Adapts a pair of closures to [`Terrain`].
pub struct TerrainFn<E, S> {
    elevation: E,
    surface: S,
}

impl<E, S> TerrainFn<E, S>
where
    E: Fn(f32, f32) -> f32,
    S: Fn(f32, f32) -> Surface,
{
    pub fn new(elevation: E, surface: S) -> Self {
        Self { elevation, surface }
    }
}

impl<E, S> Terrain for TerrainFn<E, S>
where
    E: Fn(f32, f32) -> f32,
    S: Fn(f32, f32) -> Surface,
{
    fn elevation(&self, x: f32, z: f32) -> f32 {
        (self.elevation)(x, z)
    }

    fn surface(&self, x: f32, z: f32) -> Surface {
        (self.surface)(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_has_no_slope() {
        let t = FlatTerrain::new(3.0, Surface::Green);
        assert_eq!(slope_at(&t, 10.0, -4.0), (0.0, 0.0));
        assert_eq!(t.elevation(123.0, 456.0), 3.0);
    }

    #[test]
    fn plane_slope_recovered() {
        let t = PlaneTerrain {
            slope_x: 0.05,
            slope_z: -0.02,
            ..Default::default()
        };
        let (sx, sz) = slope_at(&t, 20.0, 30.0);
        assert!((sx - 0.05).abs() < 1e-3, "sx = {sx}");
        assert!((sz + 0.02).abs() < 1e-3, "sz = {sz}");
    }

    #[test]
    fn closure_terrain_routes_queries() {
        let t = TerrainFn::new(
            |x, _z| x * 0.5,
            |_x, z| {
                if z > 100.0 {
                    Surface::Green
                } else {
                    Surface::Fairway
                }
            },
        );
        assert_eq!(t.elevation(4.0, 0.0), 2.0);
        assert_eq!(t.surface(0.0, 150.0), Surface::Green);
        assert_eq!(t.surface(0.0, 50.0), Surface::Fairway);
    }

    #[test]
    fn curved_slope_uses_central_difference() {
        // h = x^2 has derivative 2x; the central difference is exact for quadratics
        let t = TerrainFn::new(|x, _z| x * x, |_, _| Surface::Rough);
        let (sx, sz) = slope_at(&t, 3.0, 0.0);
        assert!((sx - 6.0).abs() < 1e-2, "sx = {sx}");
        assert_eq!(sz, 0.0);
    }

    #[test]
    fn trait_object_and_reference_work() {
        let flat = FlatTerrain::new(1.0, Surface::Tee);
        let dyn_terrain: &dyn Terrain = &flat;
        assert_eq!(slope_at(dyn_terrain, 0.0, 0.0), (0.0, 0.0));
        assert_eq!((&flat).surface(0.0, 0.0), Surface::Tee);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plane_gradient_is_recovered_anywhere(
                slope_x in -0.3f32..0.3,
                slope_z in -0.3f32..0.3,
                x in -200.0f32..200.0,
                z in -200.0f32..200.0,
            ) {
                let t = PlaneTerrain { slope_x, slope_z, ..Default::default() };
                let (sx, sz) = slope_at(&t, x, z);
                prop_assert!((sx - slope_x).abs() < 5e-3, "sx {} vs {}", sx, slope_x);
                prop_assert!((sz - slope_z).abs() < 5e-3, "sz {} vs {}", sz, slope_z);
            }
        }
    }
}
