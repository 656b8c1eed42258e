//! Golf ball flight, bounce and roll at a fixed 240 Hz timestep.
//!
//! The engine is headless: callers own the [`BallState`], supply a
//! [`links_core::Terrain`] and drive [`PhysicsEngine::update`] once per frame.

pub mod aero;
pub mod ball;
pub mod config;
pub mod engine;
pub mod shot;
pub mod snapshot;

pub use ball::{BallState, Phase, Trail};
pub use config::PhysicsConfig;
pub use engine::{FIXED_STEP, PhysicsEngine, carry_distance};
pub use shot::{ShotParams, ShotReport, ShotTracker, simulate_shot};
pub use snapshot::{SnapshotError, decode_snapshot, encode_snapshot};
