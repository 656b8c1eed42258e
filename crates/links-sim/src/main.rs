mod config;
mod dispersion;

use std::process::ExitCode;

use glam::Vec3;
use tracing_subscriber::EnvFilter;

use links_core::club::{club_by_name, standard_bag};
use links_core::terrain::Terrain;
use links_core::units::mph_to_mps;
use links_physics::{BallState, PhysicsEngine, ShotParams, simulate_shot};

use config::SimConfig;
use dispersion::run_dispersion;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::load(std::env::args().nth(1));
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid scenario");
        return ExitCode::FAILURE;
    }

    let bag = standard_bag();
    let Some(club) = club_by_name(&bag, &config.shot.club) else {
        tracing::error!(club = %config.shot.club, "unknown club");
        return ExitCode::FAILURE;
    };

    let terrain = config.terrain;
    let start = Vec3::new(0.0, terrain.elevation(0.0, 0.0), 0.0);
    let params = ShotParams {
        start,
        club: club.clone(),
        power: config.shot.power,
        accuracy: config.shot.accuracy,
        aim_deg: config.shot.aim_deg,
    };

    let mut engine = PhysicsEngine::with_config(config.physics_config());
    engine.set_wind(mph_to_mps(config.wind.speed_mph), config.wind.direction_deg);
    let frame_dt = 1.0 / config.frame_rate;

    tracing::info!(
        club = %club.name,
        power = params.power,
        accuracy = params.accuracy,
        "Simulating shot"
    );
    let mut ball = BallState::new(start);
    let shot = simulate_shot(
        &mut engine,
        &mut ball,
        &terrain,
        &params,
        frame_dt,
        config.max_time,
        config.unit,
    );
    if !shot.completed {
        tracing::warn!(max_time = config.max_time, "ball still moving at time limit");
    }
    tracing::info!(
        "Carry {:.1} {unit}, total {:.1} {unit}, finished on {}",
        shot.carry,
        shot.total,
        shot.final_surface,
        unit = config.unit.abbreviation()
    );

    if config.dispersion.shots > 0 {
        tracing::info!(shots = config.dispersion.shots, "Running dispersion study");
    }
    let dispersion = run_dispersion(
        &mut engine,
        &terrain,
        &params,
        &config.dispersion,
        frame_dt,
        config.max_time,
        config.unit,
    );

    let output = serde_json::json!({
        "shot": shot,
        "dispersion": dispersion,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize report");
            ExitCode::FAILURE
        },
    }
}
