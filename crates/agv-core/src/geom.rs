//! Planar geometry in grid-unit coordinates.
//!
//! `Point` is continuous and single-precision, like every other coordinate in
//! the twin.  `x` runs along grid columns and `y` along grid rows, so a point
//! resolves to the cell `(row = y, col = x)` once quantized.  Quantization is
//! the caller's business: sensing floors, motion validation rounds.

use std::ops::{Add, Mul, Sub};

/// A continuous 2-D position in grid units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared Euclidean distance, for comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Length of the point read as a vector from the origin.
    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Rescale so the length does not exceed `max_len`.  Direction is kept.
    pub fn clamp_length(self, max_len: f32) -> Point {
        let len = self.length();
        if len <= max_len || len == 0.0 {
            self
        } else {
            self * (max_len / len)
        }
    }

    /// Heading of this vector in degrees, `atan2(y, x)`, in `(-180, 180]`.
    #[inline]
    pub fn heading_deg(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Round both coordinates to two decimals (telemetry precision).
    pub fn rounded_2dp(self) -> Point {
        Point::new((self.x * 100.0).round() / 100.0, (self.y * 100.0).round() / 100.0)
    }

    /// As an `[x, y]` array, the layout `rstar` expects.
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A straight line segment between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Closest point on the segment to `p`.
    ///
    /// Projects `p` onto the supporting line and clamps the parameter to
    /// `[0, 1]`.  A degenerate segment (`a == b`) returns `a`.
    pub fn closest_point(&self, p: Point) -> Point {
        let ab = self.b - self.a;
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq == 0.0 {
            return self.a;
        }
        let ap = p - self.a;
        let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// Squared distance from `p` to the segment.
    #[inline]
    pub fn distance_sq(&self, p: Point) -> f32 {
        self.closest_point(p).distance_sq(p)
    }

    #[inline]
    pub fn distance(&self, p: Point) -> f32 {
        self.distance_sq(p).sqrt()
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position plus heading.  The heading only changes on nonzero displacement.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Point,
    /// Degrees, `atan2(dy, dx)` of the last nonzero displacement.
    pub heading_deg: f32,
}

impl Pose {
    #[inline]
    pub fn at(position: Point) -> Self {
        Self { position, heading_deg: 0.0 }
    }

    /// Commit a move to exactly `target`, turning to face the displacement.
    ///
    /// Returns the displacement that was applied.
    pub fn move_to(&mut self, target: Point) -> Point {
        let delta = target - self.position;
        self.position = target;
        if !delta.is_zero() {
            self.heading_deg = delta.heading_deg();
        }
        delta
    }
}
