use super::{point_from_parametric, Vector2};
use crate::core::traits::Real;

/// Holds the result of finding the intersect between two line segments.
#[derive(Debug, Copy, Clone)]
pub enum SegSegIntr<T>
where
    T: Real,
{
    /// No intersect, segments are parallel (or degenerate) within epsilon.
    NoIntersect,
    /// There is a true intersect between the line segments.
    TrueIntersect {
        /// Parametric value for intersect on first segment.
        seg1_t: T,
        /// Parametric value for intersect on second segment.
        seg2_t: T,
    },
    /// There is an intersect between the lines but one or both of the segments must be extended.
    FalseIntersect {
        /// Parametric value for intersect on first segment.
        seg1_t: T,
        /// Parametric value for intersect on second segment.
        seg2_t: T,
    },
}

/// Finds the intersect between two line segments.
///
/// This function returns the parametric solutions using the general line segment
/// equation `P(t) = p0 + t * (p1 - p0)` (the equation holds for both segments).
/// Segments are defined by `v1->v2` and `u1->u2`.
///
/// Parallel and collinear segment pairs always report [SegSegIntr::NoIntersect]
/// rather than attempting to produce a solution: the perpendicular dot product of
/// the direction vectors is tested against `epsilon` before dividing by it, so
/// no NaN or infinite parametric values are ever produced.
///
/// # Examples
///
/// ```
/// # use contour_clip::core::math::*;
/// # use contour_clip::core::math::SegSegIntr::TrueIntersect;
/// let v1 = Vector2::new(0.0, 0.0);
/// let v2 = Vector2::new(1.0, 0.0);
/// let u1 = Vector2::new(0.5, -1.0);
/// let u2 = Vector2::new(0.5, 1.0);
/// if let TrueIntersect { seg1_t, seg2_t } = seg_seg_intr(v1, v2, u1, u2, 1e-10) {
///    assert_eq!(seg1_t, 0.5);
///    assert_eq!(seg2_t, 0.5);
/// } else {
///     unreachable!("expected true intersection between line segments");
/// }
/// ```
pub fn seg_seg_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> SegSegIntr<T>
where
    T: Real,
{
    // Processing the segments in parametric equation form using perpendicular products
    // http://geomalgorithms.com/a05-_intersect-1.html
    // http://mathworld.wolfram.com/PerpDotProduct.html
    use SegSegIntr::*;

    let v = v2 - v1;
    let u = u2 - u1;
    let v_pdot_u = v.perp_dot(u);

    if v_pdot_u.fuzzy_eq_zero_eps(epsilon) {
        // parallel, collinear, or one of the segments is a point
        return NoIntersect;
    }

    let w = u1 - v1;
    let seg1_t = w.perp_dot(u) / v_pdot_u;
    let seg2_t = w.perp_dot(v) / v_pdot_u;

    if !seg1_t.fuzzy_in_range_eps(T::zero(), T::one(), epsilon)
        || !seg2_t.fuzzy_in_range_eps(T::zero(), T::one(), epsilon)
    {
        return FalseIntersect { seg1_t, seg2_t };
    }

    TrueIntersect { seg1_t, seg2_t }
}

/// Returns the intersect point of two segments if [seg_seg_intr] reports a true intersect.
#[inline]
pub fn seg_seg_intr_point<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> Option<Vector2<T>>
where
    T: Real,
{
    match seg_seg_intr(v1, v2, u1, u2, epsilon) {
        SegSegIntr::TrueIntersect { seg1_t, .. } => Some(point_from_parametric(v1, v2, seg1_t)),
        _ => None,
    }
}
