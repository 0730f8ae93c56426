use crate::core::math::{seg_seg_intr, SegSegIntr, Vector2};
use crate::core::traits::Real;
use crate::polygon::internal::boolean::polygon_boolean;
use crate::polygon::internal::intersections::any_edges_cross;
use crate::polygon::{BooleanOp, Error, Ring};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon: one outer boundary [Ring] plus zero or more hole rings.
///
/// The outer ring and hole rings are implicitly closed (last point connects back to the
/// first). A point is contained by the polygon when it is inside the outer ring and outside
/// every hole.
///
/// # Examples
///
/// ```
/// # use contour_clip::polygon::*;
/// # use contour_clip::core::math::vec2;
/// let a: Polygon = Polygon::from_points(&[
///     vec2(0.0, 0.0),
///     vec2(1.0, 0.0),
///     vec2(1.0, 1.0),
///     vec2(0.0, 1.0),
/// ]);
/// let b: Polygon = Polygon::from_points(&[
///     vec2(0.5, 0.5),
///     vec2(1.5, 0.5),
///     vec2(1.5, 1.5),
///     vec2(0.5, 1.5),
/// ]);
///
/// let union = a.boolean(&b, BooleanOp::Union).unwrap();
/// assert_eq!(union.len(), 1);
/// assert!((union[0].area() - 1.75).abs() < 1e-10);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct Polygon<T = f64> {
    outer: Ring<T>,
    holes: Vec<Ring<T>>,
}

impl<T> Default for Polygon<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// not derived: Ring's Clone is bounded on T: Real rather than T: Clone
impl<T> Clone for Polygon<T>
where
    T: Real,
{
    fn clone(&self) -> Self {
        Polygon {
            outer: self.outer.clone(),
            holes: self.holes.clone(),
        }
    }
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Polygon {
            outer: Ring::new(),
            holes: Vec::new(),
        }
    }

    /// Create a polygon from an ordered outer boundary point sequence (implicitly closed).
    #[inline]
    pub fn from_points(points: &[Vector2<T>]) -> Self {
        Polygon {
            outer: Ring::from_points(points),
            holes: Vec::new(),
        }
    }

    /// Create a polygon from an existing outer ring.
    #[inline]
    pub fn from_ring(outer: Ring<T>) -> Self {
        Polygon {
            outer,
            holes: Vec::new(),
        }
    }

    /// The polygon's outer boundary ring.
    #[inline]
    pub fn outer(&self) -> &Ring<T> {
        &self.outer
    }

    /// The polygon's hole rings.
    #[inline]
    pub fn holes(&self) -> &[Ring<T>] {
        &self.holes
    }

    /// Append a point to the outer boundary.
    #[inline]
    pub fn add_point(&mut self, pos: Vector2<T>) {
        self.outer.add_point(pos);
    }

    /// Add a hole ring to the polygon.
    #[inline]
    pub fn add_hole(&mut self, hole: Ring<T>) {
        self.holes.push(hole);
    }

    /// Returns true if the outer boundary has no vertexes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    /// Number of vertexes on the outer boundary.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.outer.vertex_count()
    }

    /// Outer boundary as an ordered point sequence.
    #[inline]
    pub fn points(&self) -> Vec<Vector2<T>> {
        self.outer.points()
    }

    /// Signed area of the outer boundary (positive for counter clockwise winding).
    #[inline]
    pub fn signed_area(&self) -> T {
        self.outer.signed_area()
    }

    /// Enclosed area: absolute outer area minus the area of every hole.
    pub fn area(&self) -> T {
        let hole_area = self
            .holes
            .iter()
            .fold(T::zero(), |acc, h| acc + h.area());
        let area = self.outer.area() - hole_area;
        if area > T::zero() {
            area
        } else {
            T::zero()
        }
    }

    /// Returns true if the outer boundary winds clockwise.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.outer.is_clockwise()
    }

    /// Returns true if the outer boundary is convex. Holes are not considered.
    #[inline]
    pub fn is_convex(&self) -> bool {
        self.outer.is_convex()
    }

    /// Returns true if `point` is inside the outer boundary and outside every hole.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.outer.contains_point(point) && !self.holes.iter().any(|h| h.contains_point(point))
    }

    /// Returns true if every vertex of `other`'s outer boundary is contained by this
    /// polygon and no boundary edges cross.
    pub fn contains_polygon(&self, other: &Self) -> bool {
        if other.is_empty() {
            return false;
        }

        other
            .outer
            .iter_indexes()
            .all(|i| self.contains_point(other.outer.vertex(i).pos))
            && !any_edges_cross(&self.outer, &other.outer)
    }

    /// Returns true if this polygon and `other` overlap: a vertex of one lies inside the
    /// other, or their boundary edges cross.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        if let (Some(ea), Some(eb)) = (self.extents(), other.extents()) {
            if extents_disjoint(&ea, &eb) {
                return false;
            }
        }

        other
            .outer
            .iter_indexes()
            .any(|i| self.contains_point(other.outer.vertex(i).pos))
            || self
                .outer
                .iter_indexes()
                .any(|i| other.contains_point(self.outer.vertex(i).pos))
            || any_edges_cross(&self.outer, &other.outer)
    }

    /// Axis aligned bounding box of the outer boundary, `None` if the polygon is empty.
    pub fn extents(&self) -> Option<AABB<T>> {
        let mut indexes = self.outer.iter_indexes();
        let first = self.outer.vertex(indexes.next()?).pos;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);

        for i in indexes {
            let p = self.outer.vertex(i).pos;
            if p.x < result.min_x {
                result.min_x = p.x;
            } else if p.x > result.max_x {
                result.max_x = p.x;
            }

            if p.y < result.min_y {
                result.min_y = p.y;
            } else if p.y > result.max_y {
                result.max_y = p.y;
            }
        }

        Some(result)
    }

    /// Translate the polygon (outer boundary and holes) by `(dx, dy)`.
    pub fn translate(&mut self, dx: T, dy: T) {
        self.outer.translate(dx, dy);
        for hole in self.holes.iter_mut() {
            hole.translate(dx, dy);
        }
    }

    /// Scale the polygon relative to the outer boundary's vertex centroid.
    ///
    /// Holes scale about the same origin so they stay in place relative to the outer
    /// boundary.
    pub fn scale(&mut self, sx: T, sy: T) {
        let Some(c) = self.outer.vertex_centroid() else {
            return;
        };
        self.outer.scale_about(c, sx, sy);
        for hole in self.holes.iter_mut() {
            hole.scale_about(c, sx, sy);
        }
    }

    /// Rotate the polygon around the outer boundary's vertex centroid by `angle` radians.
    pub fn rotate(&mut self, angle: T) {
        let Some(c) = self.outer.vertex_centroid() else {
            return;
        };
        self.outer.rotate_about(c, angle);
        for hole in self.holes.iter_mut() {
            hole.rotate_about(c, angle);
        }
    }

    /// Reverse the winding direction of the outer boundary and every hole.
    pub fn invert_direction(&mut self) {
        self.outer.invert_direction();
        for hole in self.holes.iter_mut() {
            hole.invert_direction();
        }
    }

    /// Returns true if the outer boundary has no self intersections.
    ///
    /// O(n^2) pairing of non-adjacent edges.
    pub fn is_simple(&self) -> bool {
        let pts = self.outer.points();
        let n = pts.len();
        if n < 3 {
            return true;
        }

        for i in 0..n {
            for j in (i + 1)..n {
                // skip adjacent edges (sharing an endpoint), including the wrap pair
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let intr = seg_seg_intr(
                    pts[i],
                    pts[(i + 1) % n],
                    pts[j],
                    pts[(j + 1) % n],
                    T::fuzzy_epsilon(),
                );
                if matches!(intr, SegSegIntr::TrueIntersect { .. }) {
                    return false;
                }
            }
        }

        true
    }

    /// Returns true if the outer boundary and every hole have at least 3 vertexes and no
    /// repeated consecutive points.
    pub fn is_valid(&self) -> bool {
        self.outer.is_valid() && self.holes.iter().all(|h| h.is_valid())
    }

    /// Verify ring structural invariants for the outer boundary and every hole.
    pub fn validate(&self) -> Result<(), Error> {
        self.outer.validate()?;
        for hole in self.holes.iter() {
            hole.validate()?;
        }
        Ok(())
    }

    /// Perform a boolean operation between this polygon and `other`, returning the
    /// resulting polygon(s).
    ///
    /// Inputs are never mutated; the operation works on internal copies. See [BooleanOp]
    /// for the available operations and [polygon_boolean] for the pipeline.
    #[inline]
    pub fn boolean(&self, other: &Self, op: BooleanOp) -> Result<Vec<Polygon<T>>, Error> {
        polygon_boolean(self, other, op)
    }
}

pub(crate) fn extents_disjoint<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    a.max_x < b.min_x || b.max_x < a.min_x || a.max_y < b.min_y || b.max_y < a.min_y
}
