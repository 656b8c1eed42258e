use glam::Vec3;

use links_core::club::Club;
use links_core::surface::Surface;
use links_core::terrain::{Terrain, slope_at};
use links_core::units::{DistanceUnit, RPM_TO_RAD_PER_SEC};

use crate::aero::{self, GRAVITY};
use crate::ball::{BallState, Phase};
use crate::config::PhysicsConfig;

/// Simulation timestep (s). 240 Hz keeps high-spin flight stable.
pub const FIXED_STEP: f32 = 1.0 / 240.0;
/// Longest wall-clock delta (s) a single `update` will simulate.
pub const MAX_FRAME_DELTA: f32 = 1.0;
/// Horizontal speed (m/s) below which a rolling ball is at rest.
pub const MIN_ROLL_SPEED: f32 = 0.02;
/// Spin decay rate in flight (1/s).
pub const AIR_SPIN_DECAY: f32 = 0.3;
/// Spin decay rate on the ground (1/s).
pub const GROUND_SPIN_DECAY: f32 = 5.0;
/// Putt speed (m/s) at full power.
pub const PUTT_MAX_SPEED: f32 = 8.0;
/// Share of the club's nominal backspin a putt carries.
pub const PUTT_SPIN_FACTOR: f32 = 0.3;
/// Full-swing aim error (degrees) across the accuracy range.
pub const FULL_SWING_DISPERSION: f32 = 15.0;
/// Putt aim error (degrees) across the accuracy range.
pub const PUTT_DISPERSION: f32 = 10.0;
/// Sidespin (rpm) per degree of mis-hit.
pub const SIDESPIN_RPM_PER_DEGREE: f32 = 50.0;

/// Horizontal unit vectors `(forward, right)` for a heading in radians
/// measured from +z toward +x.
fn heading_axes(heading: f32) -> (Vec3, Vec3) {
    let (sin, cos) = heading.sin_cos();
    (Vec3::new(sin, 0.0, cos), Vec3::new(cos, 0.0, -sin))
}

/// `(forward, right)` along the ball's current horizontal travel.
fn travel_axes(velocity: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(velocity.x, 0.0, velocity.z)
        .try_normalize()
        .unwrap_or(Vec3::Z);
    (forward, Vec3::new(forward.z, 0.0, -forward.x))
}

/// Fixed-timestep ball simulator.
///
/// One engine serves many shots. It holds the ambient wind, the leftover
/// frame time between `update` calls, and read-only tuning; the ball itself
/// is owned by the caller.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
    wind: Vec3,
    accumulator: f32,
    trail_timer: f32,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsEngine {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            wind: Vec3::ZERO,
            accumulator: 0.0,
            trail_timer: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn wind(&self) -> Vec3 {
        self.wind
    }

    /// Set a horizontal wind of `speed` m/s blowing toward `direction_deg`
    /// (0 = downrange +z, 90 = +x).
    pub fn set_wind(&mut self, speed: f32, direction_deg: f32) {
        let (forward, _) = heading_axes(direction_deg.to_radians());
        self.wind = forward * speed;
    }

    /// Strike the ball from `start`.
    ///
    /// `power` and `accuracy` are clamped to `0..=1`; accuracy 0.5 is dead
    /// center. `aim_deg` is the heading from +z toward +x.
    pub fn launch(
        &mut self,
        ball: &mut BallState,
        start: Vec3,
        club: &Club,
        power: f32,
        accuracy: f32,
        aim_deg: f32,
    ) {
        let power = power.clamp(0.0, 1.0);
        let accuracy = accuracy.clamp(0.0, 1.0);
        let putting = club.category.is_putter();

        let dispersion = if putting {
            PUTT_DISPERSION
        } else {
            FULL_SWING_DISPERSION
        };
        let offset_deg = (accuracy - 0.5) * dispersion;
        let (forward, right) = heading_axes((aim_deg + offset_deg).to_radians());

        // Backspin turns about the axis pointing left of travel
        let backspin = club.backspin * RPM_TO_RAD_PER_SEC;

        if putting {
            ball.reset_for_launch(start, Phase::Rolling);
            ball.velocity = forward * (power * PUTT_MAX_SPEED);
            ball.spin = -right * (backspin * PUTT_SPIN_FACTOR);
        } else {
            ball.reset_for_launch(start, Phase::Airborne);
            let speed = club.ball_speed * power;
            let (sin_launch, cos_launch) = club.launch_angle.to_radians().sin_cos();
            ball.velocity = forward * (speed * cos_launch) + Vec3::Y * (speed * sin_launch);
            let sidespin = offset_deg * SIDESPIN_RPM_PER_DEGREE * RPM_TO_RAD_PER_SEC;
            ball.spin = -right * (backspin * power) + Vec3::Y * sidespin;
        }
        self.trail_timer = 0.0;

        tracing::debug!(
            club = %club.name,
            power,
            accuracy,
            aim_deg,
            phase = ?ball.phase(),
            "ball launched"
        );
    }

    /// Advance `ball` by `dt` seconds of wall-clock time.
    ///
    /// Runs as many fixed steps as the accumulated time allows and samples
    /// the trail on its own wall-clock interval. Returns the number of fixed
    /// steps taken. A stopped ball is left untouched; deltas longer than
    /// [`MAX_FRAME_DELTA`] are clamped and non-finite ones ignored.
    pub fn update<T: Terrain + ?Sized>(
        &mut self,
        ball: &mut BallState,
        dt: f32,
        terrain: &T,
    ) -> u32 {
        if !ball.is_moving() || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        if dt > MAX_FRAME_DELTA {
            tracing::debug!(dt, "frame delta clamped");
        }
        let dt = dt.min(MAX_FRAME_DELTA);

        self.accumulator += dt;
        self.trail_timer += dt;

        let mut steps = 0;
        while self.accumulator >= FIXED_STEP && ball.is_moving() {
            self.step(ball, terrain);
            self.accumulator -= FIXED_STEP;
            steps += 1;
        }
        if !ball.is_moving() {
            // Steps on a stopped ball are no-ops; drop them but keep the sub-step remainder
            self.accumulator %= FIXED_STEP;
        }

        if self.trail_timer > self.config.trail_interval {
            ball.record_trail();
            self.trail_timer = 0.0;
        }

        steps
    }

    /// Integrate exactly one fixed step.
    pub fn step<T: Terrain + ?Sized>(&self, ball: &mut BallState, terrain: &T) {
        match ball.phase() {
            Phase::Airborne => self.step_airborne(ball, terrain),
            Phase::Rolling => self.step_rolling(ball, terrain),
            Phase::Stopped => {},
        }
    }

    fn step_airborne<T: Terrain + ?Sized>(&self, ball: &mut BallState, terrain: &T) {
        let dt = FIXED_STEP;
        let relative = ball.velocity - self.wind;
        let Some(aero) = aero::aero_accel(relative, ball.spin) else {
            tracing::debug!(position = ?ball.position, "airborne ball stalled");
            ball.advance(Phase::Stopped);
            return;
        };

        let mut accel = Vec3::new(0.0, -GRAVITY, 0.0);
        if self.config.enable_drag {
            accel += aero.drag;
        }
        if self.config.enable_magnus {
            accel += aero.magnus;
        }

        ball.velocity += accel * dt;
        ball.position += ball.velocity * dt;
        ball.spin *= (-AIR_SPIN_DECAY * dt).exp();

        let ground = terrain.elevation(ball.position.x, ball.position.z);
        if ball.position.y <= ground {
            ball.position.y = ground;
            self.resolve_bounce(ball, terrain);
        }
    }

    /// Resolve a ground impact at the ball's current position.
    pub(crate) fn resolve_bounce<T: Terrain + ?Sized>(&self, ball: &mut BallState, terrain: &T) {
        let surface = terrain.surface(ball.position.x, ball.position.z);
        if surface == Surface::Water {
            tracing::debug!(position = ?ball.position, "ball landed in water");
            ball.in_water = true;
            ball.advance(Phase::Stopped);
            return;
        }

        ball.bounce_count += 1;
        let props = self.config.surfaces.props(surface);
        let (forward, right) = travel_axes(ball.velocity);

        ball.velocity.y = -ball.velocity.y * props.bounce;
        ball.velocity.x *= self.config.bounce_horizontal_damping;
        ball.velocity.z *= self.config.bounce_horizontal_damping;

        // Gear effect: sidespin kicks the ball sideways, backspin along the line
        let backspin = -ball.spin.dot(right);
        ball.velocity += right * (ball.spin.y * self.config.gear_effect_side)
            + forward * (backspin * self.config.gear_effect_back);

        ball.spin *= props.spin_retention;

        if ball.velocity.y.abs() < self.config.min_rebound_speed
            || ball.bounce_count > self.config.max_airborne_bounces
        {
            ball.velocity.y = 0.0;
            ball.advance(Phase::Rolling);
        }

        tracing::debug!(
            bounce = ball.bounce_count,
            surface = %surface,
            rebound = ball.velocity.y,
            phase = ?ball.phase(),
            "ball bounced"
        );
    }

    fn step_rolling<T: Terrain + ?Sized>(&self, ball: &mut BallState, terrain: &T) {
        let dt = FIXED_STEP;
        let speed = ball.horizontal_speed();
        if speed < MIN_ROLL_SPEED {
            tracing::debug!(position = ?ball.position, "ball came to rest");
            ball.advance(Phase::Stopped);
            return;
        }

        let (x, z) = (ball.position.x, ball.position.z);
        let surface = terrain.surface(x, z);
        if surface == Surface::Water {
            tracing::debug!(position = ?ball.position, "ball rolled into water");
            ball.in_water = true;
            ball.advance(Phase::Stopped);
            return;
        }
        let props = self.config.surfaces.props(surface);

        let (slope_x, slope_z) = slope_at(terrain, x, z);
        let downhill = Vec3::new(-GRAVITY * slope_x, 0.0, -GRAVITY * slope_z);

        let direction = Vec3::new(ball.velocity.x, 0.0, ball.velocity.z) / speed;
        let friction = -direction * (props.friction * GRAVITY);

        // Residual backspin bites just after landing and pulls the ball back
        let backspin = ball.spin.x.hypot(ball.spin.z);
        let check = if backspin > self.config.check_spin_threshold
            && ball.bounce_count <= self.config.check_max_bounces
        {
            -direction * (backspin * self.config.check_coefficient)
        } else {
            Vec3::ZERO
        };

        let accel = downhill + friction + check;
        ball.velocity.x += accel.x * dt;
        ball.velocity.z += accel.z * dt;
        ball.velocity.y = 0.0;

        ball.position.x += ball.velocity.x * dt;
        ball.position.z += ball.velocity.z * dt;
        ball.position.y = terrain.elevation(ball.position.x, ball.position.z);

        ball.spin *= (-GROUND_SPIN_DECAY * dt).exp();
    }
}

/// Horizontal distance from `start` to the ball, in `unit`.
pub fn carry_distance(ball: &BallState, start: Vec3, unit: DistanceUnit) -> f32 {
    let dx = ball.position.x - start.x;
    let dz = ball.position.z - start.z;
    unit.convert_from_meters(dx.hypot(dz))
}
