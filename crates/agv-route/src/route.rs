//! Cyclic waypoint routes.

use agv_core::Point;

use crate::{RouteError, RouteResult};

/// An ordered, cyclic sequence of at least one waypoint.
///
/// Immutable once built.  Indices handed out by [`next_index`](Self::next_index)
/// always satisfy `0 ≤ i < len()`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct Route {
    waypoints: Vec<Point>,
}

impl Route {
    /// Build a route, rejecting empty lists and non-finite coordinates.
    pub fn new(waypoints: Vec<Point>) -> RouteResult<Self> {
        if waypoints.is_empty() {
            return Err(RouteError::Empty);
        }
        if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::NonFiniteWaypoint { index });
        }
        Ok(Self { waypoints })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> RouteResult<Self> {
        Self::new(pairs.iter().copied().map(Point::from).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false` for a constructed route.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Waypoint at `index`, wrapped into range.
    #[inline]
    pub fn waypoint(&self, index: usize) -> Point {
        self.waypoints[index % self.waypoints.len()]
    }

    /// The index that follows `index` around the cycle.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.waypoints.len()
    }

    /// Total length of one lap, closing segment included.
    pub fn lap_length(&self) -> f32 {
        let n = self.waypoints.len();
        (0..n)
            .map(|i| self.waypoints[i].distance(self.waypoints[(i + 1) % n]))
            .sum()
    }
}

impl TryFrom<Vec<Point>> for Route {
    type Error = RouteError;
    fn try_from(waypoints: Vec<Point>) -> RouteResult<Self> {
        Route::new(waypoints)
    }
}

impl From<Route> for Vec<Point> {
    fn from(route: Route) -> Vec<Point> {
        route.waypoints
    }
}
