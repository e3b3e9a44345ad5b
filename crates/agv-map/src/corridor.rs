//! Corridor networks for path-confined vehicles.
//!
//! A [`PathNetwork`] is a fixed set of straight segments.  Segments are held
//! in an R-tree (via `rstar`) keyed on their bounding boxes, so nearest-
//! segment and within-tolerance queries stay logarithmic in the number of
//! corridors.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use agv_core::{Point, Segment};

use crate::{MapError, MapResult};

// ── R-tree segment entry ──────────────────────────────────────────────────────

#[derive(Clone)]
struct SegmentEntry {
    segment: Segment,
    index:   usize,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.segment.a.to_array(), self.segment.b.to_array())
    }
}

impl PointDistance for SegmentEntry {
    /// Squared distance to the closest point on the segment.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.segment.distance_sq(Point::new(point[0], point[1]))
    }
}

// ── PathNetwork ───────────────────────────────────────────────────────────────

/// Straight corridor segments with a spatial index.
pub struct PathNetwork {
    segments: Vec<Segment>,
    index:    RTree<SegmentEntry>,
}

impl PathNetwork {
    /// Index `segments`.  Rejects an empty list and any segment that has zero
    /// length or a non-finite endpoint.
    pub fn new(segments: Vec<Segment>) -> MapResult<Self> {
        if segments.is_empty() {
            return Err(MapError::EmptyPathNetwork);
        }
        for (index, s) in segments.iter().enumerate() {
            if !(s.a.is_finite() && s.b.is_finite()) || s.length() == 0.0 {
                return Err(MapError::DegenerateSegment { index });
            }
        }
        let entries = segments
            .iter()
            .enumerate()
            .map(|(index, &segment)| SegmentEntry { segment, index })
            .collect();
        Ok(Self { segments, index: RTree::bulk_load(entries) })
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `true` if `p` lies within `tolerance` of any segment.
    pub fn contains(&self, p: Point, tolerance: f32) -> bool {
        let max_d2 = tolerance * tolerance;
        self.index
            .locate_within_distance(p.to_array(), max_d2)
            .next()
            .is_some()
    }

    /// Index and geometry of the segment nearest to `p`.
    pub fn nearest_segment(&self, p: Point) -> Option<(usize, Segment)> {
        self.index
            .nearest_neighbor(&p.to_array())
            .map(|e| (e.index, e.segment))
    }

    /// Closest point to `p` anywhere on the network.
    pub fn nearest_point(&self, p: Point) -> Option<Point> {
        self.nearest_segment(p).map(|(_, s)| s.closest_point(p))
    }

    /// Where a vehicle at `p` should be put back on the network.
    ///
    /// `None` if `p` is already within `tolerance` of a corridor.
    pub fn confine(&self, p: Point, tolerance: f32) -> Option<Point> {
        if self.contains(p, tolerance) {
            None
        } else {
            self.nearest_point(p)
        }
    }
}
