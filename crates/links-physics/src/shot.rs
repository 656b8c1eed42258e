use glam::Vec3;
use serde::Serialize;

use links_core::club::Club;
use links_core::surface::Surface;
use links_core::terrain::Terrain;
use links_core::units::DistanceUnit;

use crate::ball::BallState;
use crate::engine::PhysicsEngine;

/// Everything needed to strike one shot.
#[derive(Debug, Clone)]
pub struct ShotParams {
    pub start: Vec3,
    pub club: Club,
    pub power: f32,
    pub accuracy: f32,
    pub aim_deg: f32,
}

/// Per-frame observer that records the milestones of a shot.
#[derive(Debug, Clone)]
pub struct ShotTracker {
    start: Vec3,
    apex_height: f32,
    landing: Option<Vec3>,
    flight_time: f32,
    elapsed: f32,
}

impl ShotTracker {
    pub fn new(start: Vec3) -> Self {
        Self {
            start,
            apex_height: 0.0,
            landing: None,
            flight_time: 0.0,
            elapsed: 0.0,
        }
    }

    /// Record the ball as it stands after `dt` more seconds of play.
    pub fn observe(&mut self, ball: &BallState, dt: f32) {
        self.elapsed += dt;
        self.apex_height = self.apex_height.max(ball.position.y - self.start.y);
        if self.landing.is_none() && (ball.bounce_count > 0 || !ball.is_airborne()) {
            self.landing = Some(ball.position);
            self.flight_time = self.elapsed;
        }
    }

    /// Highest point above the start so far (m).
    pub fn apex_height(&self) -> f32 {
        self.apex_height
    }

    /// First ground contact, at frame granularity.
    pub fn landing(&self) -> Option<Vec3> {
        self.landing
    }

    pub fn flight_time(&self) -> f32 {
        self.flight_time
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Outcome of a simulated shot. Distances are in `unit`, heights in meters.
#[derive(Debug, Clone, Serialize)]
pub struct ShotReport {
    pub club: String,
    pub start: Vec3,
    pub rest: Vec3,
    pub landing: Option<Vec3>,
    pub apex_height: f32,
    pub carry: f32,
    pub total: f32,
    /// Signed offset of the rest point from the aim line, positive to the right.
    pub lateral: f32,
    pub flight_time: f32,
    pub total_time: f32,
    pub bounces: u32,
    pub final_surface: Surface,
    pub in_water: bool,
    pub out_of_bounds: bool,
    /// False if the time limit ran out before the ball stopped.
    pub completed: bool,
    pub unit: DistanceUnit,
}

/// Horizontal distance between two points.
fn ground_distance(from: Vec3, to: Vec3) -> f32 {
    (to.x - from.x).hypot(to.z - from.z)
}

/// Launch `params` and drive `engine.update` in `frame_dt` steps until the
/// ball stops or `max_time` seconds elapse.
pub fn simulate_shot<T: Terrain + ?Sized>(
    engine: &mut PhysicsEngine,
    ball: &mut BallState,
    terrain: &T,
    params: &ShotParams,
    frame_dt: f32,
    max_time: f32,
    unit: DistanceUnit,
) -> ShotReport {
    let start = params.start;
    engine.launch(
        ball,
        start,
        &params.club,
        params.power,
        params.accuracy,
        params.aim_deg,
    );

    let mut tracker = ShotTracker::new(start);
    tracker.observe(ball, 0.0);
    if frame_dt > 0.0 {
        while ball.is_moving() && tracker.elapsed() < max_time {
            engine.update(ball, frame_dt, terrain);
            tracker.observe(ball, frame_dt);
        }
    }

    let rest = ball.position;
    let final_surface = terrain.surface(rest.x, rest.z);
    let (sin, cos) = params.aim_deg.to_radians().sin_cos();
    let aim_right = Vec3::new(cos, 0.0, -sin);
    let lateral = (rest - start).dot(aim_right);
    let carry = tracker
        .landing()
        .map_or(0.0, |landing| ground_distance(start, landing));

    let report = ShotReport {
        club: params.club.name.clone(),
        start,
        rest,
        landing: tracker.landing(),
        apex_height: tracker.apex_height(),
        carry: unit.convert_from_meters(carry),
        total: unit.convert_from_meters(ground_distance(start, rest)),
        lateral: unit.convert_from_meters(lateral),
        flight_time: tracker.flight_time(),
        total_time: tracker.elapsed(),
        bounces: ball.bounce_count,
        final_surface,
        in_water: ball.in_water,
        out_of_bounds: final_surface == Surface::OutOfBounds,
        completed: !ball.is_moving(),
        unit,
    };

    tracing::debug!(
        club = %report.club,
        carry = report.carry,
        total = report.total,
        surface = %report.final_surface,
        completed = report.completed,
        "shot finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use links_core::terrain::TerrainFn;
    use links_core::test_helpers::{
        driver, fairway_then_water, flat_fairway, putter, seven_iron, water_everywhere,
    };

    const FRAME: f32 = 1.0 / 60.0;

    fn params(club: Club, accuracy: f32) -> ShotParams {
        ShotParams {
            start: Vec3::ZERO,
            club,
            power: 1.0,
            accuracy,
            aim_deg: 0.0,
        }
    }

    #[test]
    fn drive_reports_sane_distances() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &flat_fairway(),
            &params(driver(), 0.5),
            FRAME,
            60.0,
            DistanceUnit::Yards,
        );

        assert!(report.completed);
        assert!(report.carry > 100.0, "carry {}", report.carry);
        assert!(report.total >= report.carry);
        assert!(report.apex_height > 5.0);
        assert!(report.flight_time > 2.0);
        assert!(report.total_time > report.flight_time);
        assert!(report.bounces >= 1);
        assert!(report.lateral.abs() < 1e-2);
        assert_eq!(report.final_surface, Surface::Fairway);
        assert!(!report.in_water);
        assert!(!report.out_of_bounds);
    }

    #[test]
    fn wedge_carries_shorter_than_driver() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let terrain = flat_fairway();
        let long = simulate_shot(
            &mut engine,
            &mut ball,
            &terrain,
            &params(driver(), 0.5),
            FRAME,
            60.0,
            DistanceUnit::Meters,
        );
        let short = simulate_shot(
            &mut engine,
            &mut ball,
            &terrain,
            &params(links_core::test_helpers::club("SW"), 0.5),
            FRAME,
            60.0,
            DistanceUnit::Meters,
        );
        assert!(short.carry < long.carry);
    }

    #[test]
    fn lateral_is_positive_to_the_right_of_aim() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &flat_fairway(),
            &params(seven_iron(), 0.9),
            FRAME,
            60.0,
            DistanceUnit::Yards,
        );
        assert!(report.lateral > 0.0);
        assert!(report.rest.x > 0.0);
    }

    #[test]
    fn putt_has_no_carry() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let mut shot = params(putter(), 0.5);
        shot.power = 0.4;
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &flat_fairway(),
            &shot,
            FRAME,
            60.0,
            DistanceUnit::Feet,
        );
        assert_eq!(report.carry, 0.0);
        assert_eq!(report.flight_time, 0.0);
        assert_eq!(report.apex_height, 0.0);
        assert!(report.total > 0.0);
        assert_eq!(report.bounces, 0);
    }

    #[test]
    fn water_shot_is_flagged() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &water_everywhere(),
            &params(seven_iron(), 0.5),
            FRAME,
            60.0,
            DistanceUnit::Yards,
        );
        assert!(report.in_water);
        assert!(report.completed);
        assert_eq!(report.final_surface, Surface::Water);
        assert_eq!(report.landing, Some(report.rest));
    }

    #[test]
    fn putt_rolling_into_water_is_flagged() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &fairway_then_water(2.0),
            &params(putter(), 0.5),
            FRAME,
            60.0,
            DistanceUnit::Meters,
        );
        assert!(report.in_water);
        assert!(report.total >= 2.0);
    }

    #[test]
    fn out_of_bounds_rest_is_flagged() {
        let terrain = TerrainFn::new(
            |_x, _z| 0.0,
            |x: f32, _z| {
                if x > 5.0 {
                    Surface::OutOfBounds
                } else {
                    Surface::Fairway
                }
            },
        );
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let mut shot = params(seven_iron(), 0.5);
        shot.aim_deg = 30.0;
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &terrain,
            &shot,
            FRAME,
            60.0,
            DistanceUnit::Yards,
        );
        assert!(report.out_of_bounds);
        assert_eq!(report.final_surface, Surface::OutOfBounds);
    }

    #[test]
    fn time_limit_leaves_shot_incomplete() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &flat_fairway(),
            &params(driver(), 0.5),
            FRAME,
            1.0,
            DistanceUnit::Yards,
        );
        assert!(!report.completed);
        assert!(ball.is_moving());
        assert!(report.total_time >= 1.0 && report.total_time < 1.0 + 2.0 * FRAME);
    }

    #[test]
    fn tracker_records_first_contact_only() {
        let mut tracker = ShotTracker::new(Vec3::ZERO);
        let mut ball = BallState::in_flight(Vec3::new(0.0, 10.0, 0.0), Vec3::Z, Vec3::ZERO);
        tracker.observe(&ball, 0.5);
        assert_eq!(tracker.landing(), None);
        assert_eq!(tracker.apex_height(), 10.0);

        ball.position = Vec3::new(0.0, 0.0, 40.0);
        ball.bounce_count = 1;
        tracker.observe(&ball, 0.5);
        ball.position = Vec3::new(0.0, 0.0, 55.0);
        ball.bounce_count = 2;
        tracker.observe(&ball, 0.5);

        assert_eq!(tracker.landing(), Some(Vec3::new(0.0, 0.0, 40.0)));
        assert_eq!(tracker.flight_time(), 1.0);
        assert_eq!(tracker.elapsed(), 1.5);
    }

    #[test]
    fn report_serializes_to_json() {
        let mut engine = PhysicsEngine::new();
        let mut ball = BallState::new(Vec3::ZERO);
        let report = simulate_shot(
            &mut engine,
            &mut ball,
            &flat_fairway(),
            &params(putter(), 0.5),
            FRAME,
            30.0,
            DistanceUnit::Yards,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["club"], "Putter");
        assert_eq!(json["unit"], "yards");
        assert_eq!(json["final_surface"], "fairway");
    }
}
