//! Manual single-vehicle drive.
//!
//! The map engine's own probe is steered by a [`DriveInput`]: a per-tick
//! direction vector, clamped to the configured speed and routed through
//! [`MapEngine::move_by`].  With a [`PathNetwork`] attached the probe is
//! path-confined: after every accepted move that leaves it further than the
//! tolerance from every corridor, it is put back on the nearest corridor
//! point via [`MapEngine::relocate`].

use agv_core::{MotionState, Point, Pose, Tick, VehicleId, VehicleRng};
use agv_map::{MapEngine, PathNetwork};

use crate::vehicle::FULL_ENERGY;
use crate::{DrainPolicy, FleetConfig, FleetError, FleetResult, TelemetryRecord};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// A source of per-tick manual steering.
pub trait DriveInput {
    /// Desired displacement for this tick.  Magnitude is clamped by the
    /// caller; a zero vector means "stay put".
    fn next_input(&mut self, now: Tick, pose: &Pose) -> Point;

    /// Told whether the previous input resulted in a move.
    fn on_result(&mut self, _moved: bool) {}
}

/// Replays a fixed list of inputs, then zero forever (or loops).
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    steps:  Vec<Point>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedInput {
    pub fn new(steps: Vec<Point>) -> Self {
        Self { steps, cursor: 0, repeat: false }
    }

    /// Start over from the first step once the script runs out.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// `true` once a non-repeating script has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        !self.repeat && self.cursor >= self.steps.len()
    }
}

impl DriveInput for ScriptedInput {
    fn next_input(&mut self, _now: Tick, _pose: &Pose) -> Point {
        if self.steps.is_empty() {
            return Point::ORIGIN;
        }
        if self.cursor >= self.steps.len() {
            if !self.repeat {
                return Point::ORIGIN;
            }
            self.cursor = 0;
        }
        let step = self.steps[self.cursor];
        self.cursor += 1;
        step
    }
}

/// Random exploration: keep a heading, turn occasionally, and always turn
/// after being blocked.
pub struct WanderInput {
    rng:       VehicleRng,
    direction: Point,
    turn_probability: f64,
    speed:     f32,
}

impl WanderInput {
    /// `speed` is the length of every input vector and must be positive.
    pub fn new(seed: u64, speed: f32) -> FleetResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(FleetError::InvalidConfig(format!("wander speed {speed} must be positive")));
        }
        let mut rng = VehicleRng::new(seed, VehicleId(0));
        let direction = rng.unit_direction();
        Ok(Self { rng, direction, turn_probability: 0.05, speed })
    }

    /// Chance per tick of picking a fresh direction unprompted.
    pub fn with_turn_probability(mut self, p: f64) -> Self {
        self.turn_probability = p;
        self
    }
}

impl DriveInput for WanderInput {
    fn next_input(&mut self, _now: Tick, _pose: &Pose) -> Point {
        if self.rng.gen_bool(self.turn_probability) {
            self.direction = self.rng.unit_direction();
        }
        self.direction * self.speed
    }

    fn on_result(&mut self, moved: bool) {
        if !moved {
            self.direction = self.rng.unit_direction();
        }
    }
}

// ── ManualDrive ───────────────────────────────────────────────────────────────

/// Speed, energy, and optional corridor confinement for the engine's probe.
pub struct ManualDrive {
    name:      String,
    speed:     f32,
    drain_policy:   DrainPolicy,
    drain_per_tick: f32,
    corridors: Option<(PathNetwork, f32)>,
    state:     MotionState,
    energy:    f32,
    odometer:  f32,
    last_step: f32,
}

impl ManualDrive {
    pub fn new(config: &FleetConfig) -> FleetResult<Self> {
        config.validate()?;
        Ok(Self {
            name:           VehicleId(0).default_name(),
            speed:          config.speed,
            drain_policy:   config.drain_policy,
            drain_per_tick: config.drain_per_tick,
            corridors:      None,
            state:          MotionState::Idle,
            energy:         FULL_ENERGY,
            odometer:       0.0,
            last_step:      0.0,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Confine the probe to `network`, snapping whenever it strays further
    /// than `tolerance` from every segment.
    pub fn with_corridors(mut self, network: PathNetwork, tolerance: f32) -> Self {
        self.corridors = Some((network, tolerance));
        self
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    #[inline]
    pub fn odometer(&self) -> f32 {
        self.odometer
    }

    /// Read one input, move the probe, and update state and energy.
    pub fn step<I: DriveInput>(&mut self, engine: &mut MapEngine, input: &mut I, now: Tick) -> MotionState {
        let before = engine.probe().position;
        let raw = input.next_input(now, &engine.probe());
        let v = if raw.is_finite() { raw.clamp_length(self.speed) } else { Point::ORIGIN };

        self.state = if v.is_zero() {
            MotionState::Idle
        } else {
            let moved = engine.move_by(v.x, v.y);
            input.on_result(moved);
            if moved {
                self.confine(engine);
                MotionState::Moving
            } else {
                MotionState::Waiting
            }
        };

        let travelled = before.distance(engine.probe().position);
        self.odometer += travelled;
        self.last_step = travelled;
        let drains = match self.drain_policy {
            DrainPolicy::WhileActive    => true,
            DrainPolicy::OnDisplacement => travelled > 0.0,
        };
        if drains {
            self.energy = (self.energy - self.drain_per_tick).max(0.0);
        }
        self.state
    }

    fn confine(&self, engine: &mut MapEngine) {
        let Some((network, tolerance)) = &self.corridors else {
            return;
        };
        let at = engine.probe().position;
        if let Some(snap) = network.confine(at, *tolerance) {
            if !engine.relocate(snap) {
                tracing::debug!(%at, %snap, "corridor snap refused by floor");
            }
        }
    }

    /// The probe's telemetry record.
    pub fn telemetry(&self, engine: &MapEngine, timestamp_ms: i64) -> TelemetryRecord {
        let pose = engine.probe();
        let p = pose.position.rounded_2dp();
        TelemetryRecord {
            id:                0,
            name:              self.name.clone(),
            x:                 p.x,
            y:                 p.y,
            heading:           pose.heading_deg,
            status:            self.state,
            energy:            self.energy,
            distance:          self.odometer,
            speed:             self.last_step,
            zone:              engine.zone_at(pose.position).map(|z| z.name.clone()),
            waypoints_reached: 0,
            timestamp_ms,
        }
    }
}
