//! Sutherland-Hodgman style half plane clipping.
//!
//! Fast path used in place of the general boundary tracer when the result is known to be a
//! single ring with no holes (convex clip regions). Each clip edge defines a half plane and
//! the subject point sequence is filtered against the clip edges one at a time, inserting a
//! computed crossing point wherever the sequence transitions across the boundary.
use crate::core::math::{
    is_left, is_left_or_equal, midpoint, point_from_parametric, seg_seg_intr, SegSegIntr, Vector2,
};
use crate::core::traits::Real;

/// Clips `subject` against convex `clip`, keeping the part inside the clip region.
///
/// The clip polygon's winding is detected once from its signed area and used to orient every
/// half plane, so both clockwise and counter clockwise clip inputs work. Returns the clipped
/// point sequence, empty when the subject lies entirely outside.
pub fn clip_keep_inside<T>(subject: &[Vector2<T>], clip: &[Vector2<T>]) -> Vec<Vector2<T>>
where
    T: Real,
{
    clip_half_planes(subject, clip, false)
}

/// Clips `subject` against convex `clip`, keeping the part outside the clip region.
///
/// Complement half plane variant of [clip_keep_inside]: each step keeps the complement of
/// the clip edge's half plane. The surviving region is the subject intersected with the
/// complement of *every* half plane, which is correct exactly when that matches the true
/// difference: the subject enclosed by the clip (empty result) or separated from it by one
/// clip edge's line. The general tracer is authoritative for every other difference shape.
pub fn clip_keep_outside<T>(subject: &[Vector2<T>], clip: &[Vector2<T>]) -> Vec<Vector2<T>>
where
    T: Real,
{
    clip_half_planes(subject, clip, true)
}

fn clip_half_planes<T>(
    subject: &[Vector2<T>],
    clip: &[Vector2<T>],
    complement: bool,
) -> Vec<Vector2<T>>
where
    T: Real,
{
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }

    let clip_is_cw = signed_area(clip) < T::zero();
    let mut output = subject.to_vec();

    for ci in 0..clip.len() {
        let c1 = clip[ci];
        let c2 = clip[(ci + 1) % clip.len()];

        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }

        for (pi, &current) in input.iter().enumerate() {
            let previous = input[(pi + input.len() - 1) % input.len()];
            let current_in = in_half_plane(c1, c2, current, clip_is_cw) != complement;
            let previous_in = in_half_plane(c1, c2, previous, clip_is_cw) != complement;

            if current_in {
                if !previous_in {
                    output.push(line_crossing(previous, current, c1, c2));
                }
                output.push(current);
            } else if previous_in {
                output.push(line_crossing(previous, current, c1, c2));
            }
        }
    }

    if output.len() < 3 {
        return Vec::new();
    }
    output
}

fn in_half_plane<T>(c1: Vector2<T>, c2: Vector2<T>, p: Vector2<T>, clip_is_cw: bool) -> bool
where
    T: Real,
{
    if clip_is_cw {
        !is_left(c1, c2, p)
    } else {
        is_left_or_equal(c1, c2, p)
    }
}

/// Crossing of segment `p1->p2` with the infinite line through `c1->c2`.
fn line_crossing<T>(
    p1: Vector2<T>,
    p2: Vector2<T>,
    c1: Vector2<T>,
    c2: Vector2<T>,
) -> Vector2<T>
where
    T: Real,
{
    match seg_seg_intr(p1, p2, c1, c2, T::fuzzy_epsilon()) {
        SegSegIntr::TrueIntersect { seg1_t, .. } | SegSegIntr::FalseIntersect { seg1_t, .. } => {
            point_from_parametric(p1, p2, seg1_t)
        }
        // near parallel transition straddling the boundary, split the difference
        SegSegIntr::NoIntersect => midpoint(p1, p2),
    }
}

fn signed_area<T>(points: &[Vector2<T>]) -> T
where
    T: Real,
{
    let mut double_area = T::zero();
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        double_area = double_area + p.perp_dot(q);
    }
    double_area / T::two()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;

    fn square(min: f64, max: f64) -> Vec<Vector2<f64>> {
        vec![
            vec2(min, min),
            vec2(max, min),
            vec2(max, max),
            vec2(min, max),
        ]
    }

    #[test]
    fn overlapping_squares_keep_inside() {
        let result = clip_keep_inside(&square(0.0, 1.0), &square(0.5, 1.5));
        assert!(signed_area(&result).abs().fuzzy_eq(0.25));
    }

    #[test]
    fn clip_winding_does_not_matter() {
        let mut cw_clip = square(0.5, 1.5);
        cw_clip.reverse();
        let result = clip_keep_inside(&square(0.0, 1.0), &cw_clip);
        assert!(signed_area(&result).abs().fuzzy_eq(0.25));
    }

    #[test]
    fn subject_outside_clip_is_empty() {
        let result = clip_keep_inside(&square(0.0, 1.0), &square(5.0, 6.0));
        assert!(result.is_empty());
    }

    #[test]
    fn subject_inside_clip_unchanged() {
        let subject = square(0.25, 0.75);
        let result = clip_keep_inside(&subject, &square(0.0, 1.0));
        assert_eq!(result, subject);
    }

    #[test]
    fn keep_outside_of_enclosing_clip_is_empty() {
        // subject enclosed by the clip region leaves nothing outside
        let result = clip_keep_outside(&square(0.25, 0.75), &square(0.0, 1.0));
        assert!(result.is_empty());
    }

    #[test]
    fn keep_outside_of_identical_region_is_empty() {
        let result = clip_keep_outside(&square(0.0, 1.0), &square(0.0, 1.0));
        assert!(result.is_empty());
    }


    #[test]
    fn degenerate_inputs_empty() {
        assert!(clip_keep_inside(&[], &square(0.0, 1.0)).is_empty());
        assert!(clip_keep_inside(&square(0.0, 1.0), &[vec2(0.0, 0.0), vec2(1.0, 0.0)]).is_empty());
    }
}
