use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use links_core::terrain::Terrain;
use links_core::units::DistanceUnit;
use links_physics::{BallState, PhysicsEngine, ShotParams, ShotReport, simulate_shot};

use crate::config::DispersionConfig;

/// Spread of repeated shots with randomized strike accuracy.
#[derive(Debug, Clone, Serialize)]
pub struct DispersionSummary {
    pub shots: u32,
    pub seed: u64,
    pub accuracy_min: f32,
    pub accuracy_max: f32,
    pub total: Spread,
    pub lateral: Spread,
    pub in_water: u32,
    pub out_of_bounds: u32,
    pub unit: DistanceUnit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Spread {
    pub mean: f32,
    pub min: f32,
    pub max: f32,
}

impl Spread {
    fn of(values: &[f32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        Self { mean, min, max }
    }
}

/// Hit `config.shots` copies of `base`, drawing accuracy uniformly from
/// `base.accuracy ± config.accuracy_spread`. Returns `None` when disabled.
pub fn run_dispersion<T: Terrain + ?Sized>(
    engine: &mut PhysicsEngine,
    terrain: &T,
    base: &ShotParams,
    config: &DispersionConfig,
    frame_dt: f32,
    max_time: f32,
    unit: DistanceUnit,
) -> Option<DispersionSummary> {
    if config.shots == 0 {
        return None;
    }

    let accuracy_min = (base.accuracy - config.accuracy_spread).clamp(0.0, 1.0);
    let accuracy_max = (base.accuracy + config.accuracy_spread).clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut reports: Vec<ShotReport> = Vec::with_capacity(config.shots as usize);
    let mut ball = BallState::new(base.start);
    for shot in 0..config.shots {
        let params = ShotParams {
            accuracy: rng.random_range(accuracy_min..=accuracy_max),
            ..base.clone()
        };
        let report = simulate_shot(engine, &mut ball, terrain, &params, frame_dt, max_time, unit);
        tracing::debug!(
            shot,
            accuracy = params.accuracy,
            total = report.total,
            lateral = report.lateral,
            "dispersion shot"
        );
        reports.push(report);
    }

    let totals: Vec<f32> = reports.iter().map(|r| r.total).collect();
    let laterals: Vec<f32> = reports.iter().map(|r| r.lateral).collect();
    Some(DispersionSummary {
        shots: config.shots,
        seed: config.seed,
        accuracy_min,
        accuracy_max,
        total: Spread::of(&totals),
        lateral: Spread::of(&laterals),
        in_water: reports.iter().filter(|r| r.in_water).count() as u32,
        out_of_bounds: reports.iter().filter(|r| r.out_of_bounds).count() as u32,
        unit,
    })
}
