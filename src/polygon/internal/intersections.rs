//! Intersection discovery between two vertex rings.
use crate::core::math::{point_from_parametric, seg_seg_intr, SegSegIntr, Vector2};
use crate::core::traits::Real;
use crate::polygon::Ring;

/// Finds every crossing between the edges of `a` and `b` and splices a mutually linked pair of
/// intersection vertexes into the rings for each one. Returns the number of crossings found.
///
/// Both rings must hold only original vertexes when called (fresh working copies). Edges are
/// paired O(|A|·|B|) with no spatial index, acceptable for editor scale polygons. Intersection
/// vertexes land on their edge in ascending alpha order so multiple crossings on one edge are
/// ordered consistently with traversal direction.
///
/// Parallel and collinear edge pairs produce no crossing (the segment intersect function
/// absorbs them). Crossings are only accepted when both parametric values lie strictly
/// inside `(0, 1)` by more than epsilon: an edge grazing another edge's endpoint is a
/// tangential touch, not a region boundary crossing, and admitting it would break the
/// entry/exit toggle parity downstream.
pub fn find_intersections<T>(a: &mut Ring<T>, b: &mut Ring<T>) -> usize
where
    T: Real,
{
    // snapshot the original edges so splicing does not disturb the pairing
    let a_edges = edges_of(a);
    let b_edges = edges_of(b);

    let eps = T::fuzzy_epsilon();
    let strictly_interior = |t: T| t > eps && t < T::one() - eps;

    let mut count = 0;
    for &(ai, a1, a2) in a_edges.iter() {
        for &(bi, b1, b2) in b_edges.iter() {
            if let SegSegIntr::TrueIntersect { seg1_t, seg2_t } =
                seg_seg_intr(a1, a2, b1, b2, eps)
            {
                if !strictly_interior(seg1_t) || !strictly_interior(seg2_t) {
                    continue;
                }
                let pos = point_from_parametric(a1, a2, seg1_t);
                let ia = a.insert_intersection(ai, pos, seg1_t);
                let ib = b.insert_intersection(bi, pos, seg2_t);
                a.vertex_mut(ia).neighbor = Some(ib);
                b.vertex_mut(ib).neighbor = Some(ia);
                count += 1;
            }
        }
    }

    count
}

/// Returns true if any edge of `a` crosses any edge of `b` (no vertexes are created).
pub fn any_edges_cross<T>(a: &Ring<T>, b: &Ring<T>) -> bool
where
    T: Real,
{
    let b_edges = edges_of(b);
    let eps = T::fuzzy_epsilon();
    let strictly_interior = |t: T| t > eps && t < T::one() - eps;

    for (_, a1, a2) in edges_of(a) {
        for &(_, b1, b2) in b_edges.iter() {
            if let SegSegIntr::TrueIntersect { seg1_t, seg2_t } =
                seg_seg_intr(a1, a2, b1, b2, eps)
            {
                if strictly_interior(seg1_t) && strictly_interior(seg2_t) {
                    return true;
                }
            }
        }
    }

    false
}

fn edges_of<T>(ring: &Ring<T>) -> Vec<(usize, Vector2<T>, Vector2<T>)>
where
    T: Real,
{
    ring.iter_indexes()
        .map(|i| {
            (
                i,
                ring.vertex(i).pos,
                ring.vertex(ring.next_index(i)).pos,
            )
        })
        .collect()
}
