//! Boundary trace extraction of result rings after classification.
use crate::core::math::Vector2;
use crate::core::traits::Real;
use crate::polygon::{BooleanOp, Error, Ring, VertexKind};

/// Extracts the result boundary loops from a pair of classified rings.
///
/// Repeatedly picks an unvisited entry intersection vertex, walks the boundary emitting
/// points, hops to the neighbor ring at every intersection vertex, and stops when the walk
/// closes back on its start. Each closed walk becomes one output loop; loops with fewer than
/// 3 points are discarded.
///
/// Walk direction is forward on both rings for `Union` and `Intersection`. For
/// `DifferenceAB` it is forward on the minuend ring `a` and backward on the subtrahend ring
/// `b`, which traces the subtrahend's contribution with reversed orientation.
///
/// Every intersection vertex is visited at most once so the trace always terminates; a walk
/// exceeding the total vertex count indicates corrupted links and aborts with
/// [Error::CorruptRing].
pub fn trace_results<T>(
    a: &mut Ring<T>,
    b: &mut Ring<T>,
    op: BooleanOp,
) -> Result<Vec<Vec<Vector2<T>>>, Error>
where
    T: Real,
{
    let mut results = Vec::new();
    let step_limit = 2 * (a.vertex_count() + b.vertex_count());

    // entry vertexes on the minuend ring seed most walks; the scan over b catches loops
    // whose minuend-side crossings were all exits
    let a_starts: Vec<usize> = entry_indexes(a);
    let b_starts: Vec<usize> = entry_indexes(b);

    for start in a_starts {
        if let Some(points) = trace_one(a, b, op, start, true, step_limit)? {
            results.push(points);
        }
    }
    for start in b_starts {
        if let Some(points) = trace_one(a, b, op, start, false, step_limit)? {
            results.push(points);
        }
    }

    Ok(results)
}

fn entry_indexes<T>(ring: &Ring<T>) -> Vec<usize>
where
    T: Real,
{
    ring.iter_indexes()
        .filter(|&i| {
            let v = ring.vertex(i);
            v.is_intersection && v.kind == VertexKind::Entry
        })
        .collect()
}

fn walk_direction(op: BooleanOp, on_minuend: bool) -> bool {
    match op {
        BooleanOp::Union | BooleanOp::Intersection => true,
        BooleanOp::DifferenceAB => on_minuend,
        BooleanOp::DifferenceBA | BooleanOp::Xor => {
            unreachable!("operation rewritten before tracing")
        }
    }
}

fn trace_one<T>(
    a: &mut Ring<T>,
    b: &mut Ring<T>,
    op: BooleanOp,
    start: usize,
    start_on_a: bool,
    step_limit: usize,
) -> Result<Option<Vec<Vector2<T>>>, Error>
where
    T: Real,
{
    {
        let start_ring: &Ring<T> = if start_on_a { &*a } else { &*b };
        if start_ring.vertex(start).visited {
            return Ok(None);
        }
    }

    let mut points = Vec::new();
    let mut on_a = start_on_a;
    let mut forward = walk_direction(op, on_a);
    let mut current = start;
    let mut steps = 0usize;

    loop {
        let (ring, other): (&mut Ring<T>, &mut Ring<T>) =
            if on_a { (&mut *a, &mut *b) } else { (&mut *b, &mut *a) };

        // arriving back at the start's co-located neighbor also closes the walk
        if ring.vertex(current).visited {
            break;
        }

        ring.vertex_mut(current).visited = true;
        if let Some(n) = ring.vertex(current).neighbor {
            other.vertex_mut(n).visited = true;
        }
        points.push(ring.vertex(current).pos);

        if ring.vertex(current).is_intersection {
            let Some(n) = ring.vertex(current).neighbor else {
                return Err(Error::CorruptRing(
                    "intersection vertex is missing its neighbor link",
                ));
            };
            current = n;
            on_a = !on_a;
            forward = walk_direction(op, on_a);
        }

        let ring: &Ring<T> = if on_a { &*a } else { &*b };
        current = if forward {
            ring.next_index(current)
        } else {
            ring.prev_index(current)
        };

        if on_a == start_on_a && current == start {
            break;
        }

        steps += 1;
        if steps > step_limit {
            return Err(Error::CorruptRing("boundary trace failed to close"));
        }
    }

    if points.len() < 3 {
        return Ok(None);
    }
    Ok(Some(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;
    use crate::polygon::internal::classify::mark_entry_exit;
    use crate::polygon::internal::intersections::find_intersections;

    fn square(min: f64, max: f64) -> Ring<f64> {
        Ring::from_points(&[
            vec2(min, min),
            vec2(max, min),
            vec2(max, max),
            vec2(min, max),
        ])
    }

    fn loop_area(points: &[crate::core::math::Vector2<f64>]) -> f64 {
        Ring::from_points(points).signed_area()
    }

    fn prepared(op: BooleanOp) -> (Ring<f64>, Ring<f64>) {
        let mut a = square(0.0, 1.0);
        let mut b = square(0.5, 1.5);
        find_intersections(&mut a, &mut b);
        mark_entry_exit(&mut a, &b, op, true);
        mark_entry_exit(&mut b, &a, op, false);
        (a, b)
    }

    #[test]
    fn union_of_overlapping_squares() {
        let (mut a, mut b) = prepared(BooleanOp::Union);
        let loops = trace_results(&mut a, &mut b, BooleanOp::Union).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loop_area(&loops[0]).fuzzy_eq(1.75));
    }

    #[test]
    fn intersection_of_overlapping_squares() {
        let (mut a, mut b) = prepared(BooleanOp::Intersection);
        let loops = trace_results(&mut a, &mut b, BooleanOp::Intersection).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loop_area(&loops[0]).fuzzy_eq(0.25));
    }

    #[test]
    fn difference_of_overlapping_squares() {
        let (mut a, mut b) = prepared(BooleanOp::DifferenceAB);
        let loops = trace_results(&mut a, &mut b, BooleanOp::DifferenceAB).unwrap();
        assert_eq!(loops.len(), 1);
        // result keeps counter clockwise winding
        assert!(loop_area(&loops[0]).fuzzy_eq(0.75));
    }

    #[test]
    fn all_intersection_vertexes_consumed() {
        let (mut a, mut b) = prepared(BooleanOp::Union);
        trace_results(&mut a, &mut b, BooleanOp::Union).unwrap();
        let unvisited = |r: &Ring<f64>| {
            r.iter_indexes()
                .filter(|&i| r.vertex(i).is_intersection && !r.vertex(i).visited)
                .count()
        };
        assert_eq!(unvisited(&a), 0);
        assert_eq!(unvisited(&b), 0);
    }
}
