use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Motion phase of a ball within one shot.
///
/// Transitions only move forward: `Airborne -> Rolling -> Stopped`, or
/// straight from `Airborne` to `Stopped` on a water landing or stall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Airborne,
    Rolling,
    #[default]
    Stopped,
}

impl Phase {
    pub fn is_airborne(self) -> bool {
        self == Self::Airborne
    }

    pub fn is_moving(self) -> bool {
        self != Self::Stopped
    }

    fn order(self) -> u8 {
        match self {
            Self::Airborne => 0,
            Self::Rolling => 1,
            Self::Stopped => 2,
        }
    }
}

/// Recent ball positions for drawing a tracer. Oldest samples are evicted
/// once [`Trail::CAPACITY`] is reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec3>,
}

impl Trail {
    pub const CAPACITY: usize = 500;

    pub fn push(&mut self, point: Vec3) {
        if self.points.len() == Self::CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Clear and seed with a single point.
    pub fn reset(&mut self, start: Vec3) {
        self.points.clear();
        self.points.push_back(start);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.front().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }
}

/// State of the ball for the shot in progress.
///
/// Axes: x lateral, y height, z downrange. Spin is angular velocity in rad/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub spin: Vec3,
    phase: Phase,
    pub bounce_count: u32,
    trail: Trail,
    pub in_water: bool,
}

impl BallState {
    /// A ball at rest at `position`, waiting to be launched.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin: Vec3::ZERO,
            phase: Phase::Stopped,
            bounce_count: 0,
            trail: Trail::default(),
            in_water: false,
        }
    }

    /// A ball already in flight, e.g. resumed from a replay.
    pub fn in_flight(position: Vec3, velocity: Vec3, spin: Vec3) -> Self {
        let mut ball = Self::new(position);
        ball.velocity = velocity;
        ball.spin = spin;
        ball.phase = Phase::Airborne;
        ball.trail.reset(position);
        ball
    }

    /// A ball already rolling along the ground.
    pub fn rolling(position: Vec3, velocity: Vec3, spin: Vec3) -> Self {
        let mut ball = Self::in_flight(position, Vec3::new(velocity.x, 0.0, velocity.z), spin);
        ball.phase = Phase::Rolling;
        ball
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_airborne(&self) -> bool {
        self.phase.is_airborne()
    }

    pub fn is_moving(&self) -> bool {
        self.phase.is_moving()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }

    /// Re-arm for a new shot from `start` in the given phase.
    pub(crate) fn reset_for_launch(&mut self, start: Vec3, phase: Phase) {
        self.position = start;
        self.phase = phase;
        self.bounce_count = 0;
        self.in_water = false;
        self.trail.reset(start);
    }

    /// Move to a later phase. Earlier phases are ignored so a shot can never
    /// go back into the air once it has started rolling.
    pub(crate) fn advance(&mut self, next: Phase) {
        if next.order() > self.phase.order() {
            self.phase = next;
        }
        if next == Phase::Stopped {
            self.velocity = Vec3::ZERO;
            self.spin = Vec3::ZERO;
        }
    }

    pub(crate) fn record_trail(&mut self) {
        self.trail.push(self.position);
    }
}
