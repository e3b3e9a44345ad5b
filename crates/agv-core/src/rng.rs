//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! Each vehicle gets its own `SmallRng` seeded by
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! where the mixing constant is the 64-bit fractional golden ratio.  Vehicles
//! never share RNG state, so adding a vehicle at the end of the fleet does not
//! disturb the draws of the existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Point, VehicleId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A unit vector pointing in a uniformly random direction.
    pub fn unit_direction(&mut self) -> Point {
        let angle: f32 = self.0.gen_range(0.0..std::f32::consts::TAU);
        Point::new(angle.cos(), angle.sin())
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for scenario generation and randomized test inputs.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
