//! The Map & Sensing Engine.
//!
//! # Sensing
//!
//! [`MapEngine::scan`] casts `ray_count` evenly spaced rays from a position.
//! Each ray is sampled at `r = k * step` for `k = 0, 1, …` while
//! `r < max_range`; every sample is floored to a cell.  A sample outside the
//! grid ends the ray, a ground-truth wall is revealed as `Wall` and ends the
//! ray, anything else is revealed as `Free`.  Cells behind the first wall on
//! a ray stay unknown.
//!
//! # Motion
//!
//! [`MapEngine::try_move_to`] is the only collision check in the twin: the
//! candidate position is rounded to the nearest cell and accepted iff that
//! cell is inside the grid and not a ground-truth wall.  Accepted moves keep
//! sub-cell precision and trigger a scan at the new position.  Rejections are
//! reported as `false` and change nothing.

use agv_core::{Point, Pose};

use crate::{CellState, FloorPlan, Grid, MapError, MapResult, MapSnapshot, Zone};

// ── SensorConfig ──────────────────────────────────────────────────────────────

/// Range-sensor parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Rays per scan, evenly spread over 360°.
    pub ray_count: u32,
    /// Exclusive upper bound on sample distance, in cells.
    pub max_range: f32,
    /// Distance between consecutive samples along a ray, in cells.
    pub step: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { ray_count: 360, max_range: 60.0, step: 0.5 }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> MapResult<()> {
        if self.ray_count == 0 {
            return Err(MapError::InvalidSensor("ray_count must be positive".into()));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(MapError::InvalidSensor(format!("max_range {} must be positive", self.max_range)));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(MapError::InvalidSensor(format!("step {} must be positive", self.step)));
        }
        Ok(())
    }

    /// Number of samples per ray.
    #[inline]
    fn samples_per_ray(&self) -> u32 {
        (self.max_range / self.step).ceil() as u32
    }
}

// ── MapEngine ─────────────────────────────────────────────────────────────────

/// Ground truth, discovered knowledge, and the probe vehicle's pose.
pub struct MapEngine {
    ground_truth: Grid,
    discovered:   Grid,
    sensor:       SensorConfig,
    plan:         FloorPlan,
    /// Pose of the engine's own (manually driven) vehicle.
    probe:        Pose,
    /// Bumped on every discovered-grid change.
    version:      u64,
    cached:       Option<MapSnapshot>,
}

impl MapEngine {
    /// Build ground truth from `plan`; nothing is discovered yet.
    ///
    /// The probe starts at the grid center `(cols / 2, rows / 2)`.
    pub fn new(plan: &FloorPlan) -> MapResult<Self> {
        let ground_truth = plan.ground_truth()?;
        let discovered   = Grid::filled(plan.rows, plan.cols, CellState::Unknown);
        let center       = Point::new(plan.cols as f32 / 2.0, plan.rows as f32 / 2.0);
        Ok(Self {
            ground_truth,
            discovered,
            sensor:  SensorConfig::default(),
            plan:    plan.clone(),
            probe:   Pose::at(center),
            version: 0,
            cached:  None,
        })
    }

    /// Replace the default sensor parameters.
    pub fn with_sensor(mut self, sensor: SensorConfig) -> MapResult<Self> {
        sensor.validate()?;
        self.sensor = sensor;
        Ok(self)
    }

    /// Move the probe to `start` without validation or scanning.
    pub fn with_probe_at(mut self, start: Point) -> Self {
        self.probe = Pose::at(start);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> usize {
        self.ground_truth.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.ground_truth.cols()
    }

    #[inline]
    pub fn ground_truth(&self) -> &Grid {
        &self.ground_truth
    }

    #[inline]
    pub fn discovered(&self) -> &Grid {
        &self.discovered
    }

    #[inline]
    pub fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }

    #[inline]
    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Zone under `p`, from the layout this engine was built with.
    #[inline]
    pub fn zone_at(&self, p: Point) -> Option<&Zone> {
        self.plan.zone_at(p)
    }

    #[inline]
    pub fn probe(&self) -> Pose {
        self.probe
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// `true` if a vehicle may occupy `p`: its rounded cell is inside the
    /// grid and not a ground-truth wall.
    pub fn is_passable(&self, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        let (row, col) = Grid::round_cell(p);
        matches!(self.ground_truth.get_signed(row, col), Some(c) if !c.is_wall())
    }

    // ── Knowledge ─────────────────────────────────────────────────────────

    /// Record `state` for an unknown cell.  Known cells are left untouched.
    fn reveal(&mut self, row: usize, col: usize, state: CellState) -> bool {
        if self.discovered.get(row, col) == Some(CellState::Unknown) {
            self.discovered.set(row, col, state);
            true
        } else {
            false
        }
    }

    /// Raycast from `origin`, revealing visible cells.
    ///
    /// Returns the number of cells that were unknown before this scan.
    pub fn scan(&mut self, origin: Point) -> usize {
        let rays    = self.sensor.ray_count;
        let samples = self.sensor.samples_per_ray();
        let step    = self.sensor.step;
        let mut revealed = 0;

        for i in 0..rays {
            let angle = (i as f32 * (360.0 / rays as f32)).to_radians();
            let (sin, cos) = angle.sin_cos();
            for k in 0..samples {
                let r = k as f32 * step;
                if r >= self.sensor.max_range {
                    break;
                }
                let sample = Point::new(origin.x + r * cos, origin.y + r * sin);
                let (row, col) = Grid::floor_cell(sample);
                let Some(truth) = self.ground_truth.get_signed(row, col) else {
                    break;
                };
                let (row, col) = (row as usize, col as usize);
                if truth.is_wall() {
                    revealed += self.reveal(row, col, CellState::Wall) as usize;
                    break;
                }
                revealed += self.reveal(row, col, CellState::Free) as usize;
            }
        }

        if revealed > 0 {
            self.version += 1;
        }
        revealed
    }

    /// Copy ground truth into the discovered grid.
    ///
    /// Ground truth bounds what can be known, so this only fills unknown
    /// cells.  Calling it again changes nothing.
    pub fn reveal_full_map(&mut self) {
        let mut revealed = 0usize;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if let Some(truth) = self.ground_truth.get(row, col) {
                    revealed += self.reveal(row, col, truth) as usize;
                }
            }
        }
        if revealed > 0 {
            self.version += 1;
        }
        tracing::debug!(revealed, "full map revealed");
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Validate and commit a move of `pose` to `target`, then scan there.
    pub fn try_move_to(&mut self, pose: &mut Pose, target: Point) -> bool {
        if !self.is_passable(target) {
            tracing::trace!(%target, "move rejected");
            return false;
        }
        pose.move_to(target);
        self.scan(target);
        true
    }

    /// Move the probe by `(dx, dy)`.
    ///
    /// Returns `false` (and leaves everything unchanged) if the rounded
    /// destination is out of bounds or a wall.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> bool {
        let mut probe = self.probe;
        let target = probe.position + Point::new(dx, dy);
        let moved = self.try_move_to(&mut probe, target);
        self.probe = probe;
        moved
    }

    /// Put the probe at `target` without turning it.  Same validation and
    /// scan as a move.
    pub fn relocate(&mut self, target: Point) -> bool {
        if !self.is_passable(target) {
            return false;
        }
        self.probe.position = target;
        self.scan(target);
        true
    }

    // ── Observers ─────────────────────────────────────────────────────────

    /// Immutable view of the discovered grid at this instant.
    ///
    /// Consecutive calls without an intervening change return snapshots that
    /// share one allocation.
    pub fn snapshot(&mut self) -> MapSnapshot {
        match &self.cached {
            Some(snap) if snap.version() == self.version => snap.clone(),
            _ => {
                let snap = MapSnapshot::capture(&self.discovered, self.version);
                self.cached = Some(snap.clone());
                snap
            }
        }
    }
}
