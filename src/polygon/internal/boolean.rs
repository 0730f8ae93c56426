//! Boolean operation pipeline between two polygons.
//!
//! The façade inspects the bounding relationship of the inputs (disjoint, one contains the
//! other, partial overlap) and dispatches either a trivial result, the convex clip fast
//! path, or the full discovery -> classify -> trace pipeline. Inputs are never mutated;
//! the pipeline works on normalized counter clockwise copies of the outer boundaries.
use crate::core::math::{midpoint, point_on_seg_eps, Vector2};
use crate::core::traits::Real;
use crate::polygon::internal::classify::mark_entry_exit;
use crate::polygon::internal::convex_clip::clip_keep_inside;
use crate::polygon::internal::intersections::{any_edges_cross, find_intersections};
use crate::polygon::internal::trace::trace_results;
use crate::polygon::polygon::extents_disjoint;
use crate::polygon::{BooleanOp, Error, Polygon, Ring};

/// Performs the boolean operation `op` between `a` and `b`, returning the resulting
/// polygon(s).
///
/// `DifferenceBA` is rewritten as `DifferenceAB` with the operands swapped, and `Xor` as
/// union minus intersection, so the pipeline itself only ever sees `Union`,
/// `Intersection`, and `DifferenceAB`.
///
/// Degenerate operands (fewer than 3 vertexes) and non-crossing configurations (disjoint
/// or one polygon containing the other) resolve through trivial-case tables; a subtrahend
/// wholly inside the minuend produces the minuend with the subtrahend as a hole. Only
/// partial overlap runs the full trace pipeline.
///
/// Operands carrying holes are decomposed first: the outer shells are combined hole-free
/// and each input hole's contribution is then subtracted from the result per the
/// operation's set identity.
pub fn polygon_boolean<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    op: BooleanOp,
) -> Result<Vec<Polygon<T>>, Error>
where
    T: Real,
{
    match op {
        BooleanOp::DifferenceBA => return polygon_boolean(b, a, BooleanOp::DifferenceAB),
        BooleanOp::Xor => return symmetric_difference(a, b),
        _ => {}
    }

    a.validate()?;
    b.validate()?;

    if a.vertex_count() < 3 || b.vertex_count() < 3 {
        return Ok(resolve_degenerate(a, b, op));
    }

    if !a.holes().is_empty() || !b.holes().is_empty() {
        return boolean_with_holes(a, b, op);
    }

    if let (Some(ea), Some(eb)) = (a.extents(), b.extents()) {
        if extents_disjoint(&ea, &eb) {
            return Ok(resolve_disjoint(a, b, op));
        }
    }

    // convex fast path: the intersection of two convex regions is a single convex ring
    // with no holes, exactly what half plane clipping produces
    if op == BooleanOp::Intersection
        && a.holes().is_empty()
        && b.holes().is_empty()
        && a.is_convex()
        && b.is_convex()
    {
        return Ok(convex_intersection(a, b));
    }

    // working copies normalized to counter clockwise winding
    let mut ra = a.outer().clone();
    if ra.is_clockwise() {
        ra.invert_direction();
    }
    let mut rb = b.outer().clone();
    if rb.is_clockwise() {
        rb.invert_direction();
    }

    let crossings = find_intersections(&mut ra, &mut rb);
    if crossings == 0 {
        return Ok(resolve_no_crossings(a, b, &ra, &rb, op));
    }

    mark_entry_exit(&mut ra, &rb, op, true);
    mark_entry_exit(&mut rb, &ra, op, false);

    let loops = trace_results(&mut ra, &mut rb, op)?;
    Ok(assemble_polygons(loops))
}

/// Left fold of union across `polygons`.
///
/// Empty input yields an empty polygon and a singleton is returned unchanged. When a union
/// step produces multiple disjoint pieces only the largest one (by area) is carried
/// forward, so the result is always a single polygon.
pub fn merge_all<T>(polygons: &[Polygon<T>]) -> Result<Polygon<T>, Error>
where
    T: Real,
{
    let Some((first, rest)) = polygons.split_first() else {
        return Ok(Polygon::new());
    };

    let mut merged = first.clone();
    for p in rest {
        let mut pieces = polygon_boolean(&merged, p, BooleanOp::Union)?;
        pieces.sort_by(|x, y| {
            y.area()
                .partial_cmp(&x.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        merged = pieces.into_iter().next().unwrap_or_default();
    }

    Ok(merged)
}

fn symmetric_difference<T>(a: &Polygon<T>, b: &Polygon<T>) -> Result<Vec<Polygon<T>>, Error>
where
    T: Real,
{
    let union = polygon_boolean(a, b, BooleanOp::Union)?;
    let intersection = polygon_boolean(a, b, BooleanOp::Intersection)?;
    if intersection.is_empty() {
        return Ok(union);
    }

    let mut results = Vec::new();
    for u in union {
        let mut pieces = vec![u];
        for i in intersection.iter() {
            let mut remaining = Vec::new();
            for piece in pieces {
                remaining.extend(polygon_boolean(&piece, i, BooleanOp::DifferenceAB)?);
            }
            pieces = remaining;
        }
        results.extend(pieces);
    }

    Ok(results)
}

/// Rewrites an operation on operands with holes in terms of hole-free shell operations.
///
/// A polygon with holes is its outer shell minus its hole regions, which gives each
/// operation a set identity over shells and holes:
///
/// * Union: combine the shells, then remove each hole part not covered by the other
///   polygon (hole minus the other shell, plus pairwise hole overlaps).
/// * Intersection: intersect the shells, then remove every hole of both operands.
/// * DifferenceAB: minuend shell minus subtrahend shell, plus the parts of the minuend
///   shell inside the subtrahend's holes, all minus the minuend's own holes.
fn boolean_with_holes<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    op: BooleanOp,
) -> Result<Vec<Polygon<T>>, Error>
where
    T: Real,
{
    let a_shell = Polygon::from_ring(a.outer().clone());
    let b_shell = Polygon::from_ring(b.outer().clone());
    let a_holes = hole_regions(a);
    let b_holes = hole_regions(b);

    match op {
        BooleanOp::Union => {
            let base = polygon_boolean(&a_shell, &b_shell, BooleanOp::Union)?;
            let mut cuts = Vec::new();
            for h in a_holes.iter() {
                cuts.extend(polygon_boolean(h, &b_shell, BooleanOp::DifferenceAB)?);
            }
            for h in b_holes.iter() {
                cuts.extend(polygon_boolean(h, &a_shell, BooleanOp::DifferenceAB)?);
            }
            for ha in a_holes.iter() {
                for hb in b_holes.iter() {
                    cuts.extend(polygon_boolean(ha, hb, BooleanOp::Intersection)?);
                }
            }
            subtract_pieces(base, &cuts)
        }
        BooleanOp::Intersection => {
            let base = polygon_boolean(&a_shell, &b_shell, BooleanOp::Intersection)?;
            let mut cuts = a_holes;
            cuts.extend(b_holes);
            subtract_pieces(base, &cuts)
        }
        BooleanOp::DifferenceAB => {
            let mut base = polygon_boolean(&a_shell, &b_shell, BooleanOp::DifferenceAB)?;
            for h in b_holes.iter() {
                base.extend(polygon_boolean(&a_shell, h, BooleanOp::Intersection)?);
            }
            subtract_pieces(base, &a_holes)
        }
        BooleanOp::DifferenceBA | BooleanOp::Xor => {
            unreachable!("operation rewritten before dispatch")
        }
    }
}

/// The polygon's hole rings as standalone counter clockwise regions.
fn hole_regions<T>(p: &Polygon<T>) -> Vec<Polygon<T>>
where
    T: Real,
{
    p.holes()
        .iter()
        .map(|h| Polygon::from_ring(oriented_ring(h.clone(), false)))
        .collect()
}

fn oriented_ring<T>(mut ring: Ring<T>, clockwise: bool) -> Ring<T>
where
    T: Real,
{
    if ring.vertex_count() >= 3 && ring.is_clockwise() != clockwise {
        ring.invert_direction();
    }
    ring
}

/// Removes each cut region from every piece in turn.
fn subtract_pieces<T>(
    pieces: Vec<Polygon<T>>,
    cuts: &[Polygon<T>],
) -> Result<Vec<Polygon<T>>, Error>
where
    T: Real,
{
    let mut pieces = pieces;
    for cut in cuts {
        let mut remaining = Vec::new();
        for piece in pieces {
            remaining.extend(subtract_region(&piece, cut)?);
        }
        pieces = remaining;
    }
    Ok(pieces)
}

/// Removes the region covered by `cut` from `piece`, keeping `piece`'s existing holes
/// intact.
///
/// A cut that crosses the piece's outer boundary carves the shell through the trace
/// pipeline and re-subtracts the piece's holes from the carved pieces. A cut strictly
/// inside the outer boundary is punched as a new hole, first merging with any existing
/// holes its region connects to so holes never overlap each other. Punching directly here
/// (rather than recursing through [polygon_boolean]) keeps repeated subtraction of
/// disjoint interior regions from looping.
fn subtract_region<T>(piece: &Polygon<T>, cut: &Polygon<T>) -> Result<Vec<Polygon<T>>, Error>
where
    T: Real,
{
    if piece.vertex_count() < 3 {
        return Ok(Vec::new());
    }
    if cut.vertex_count() < 3 {
        return Ok(vec![piece.clone()]);
    }

    // regions inside the cut's own holes are not removed: carve with the cut's shell,
    // then restore the parts of the piece lying in each cut hole
    if !cut.holes().is_empty() {
        let cut_shell = Polygon::from_ring(cut.outer().clone());
        let mut results = subtract_region(piece, &cut_shell)?;
        let piece_shell = Polygon::from_ring(piece.outer().clone());
        let piece_holes = hole_regions(piece);
        for h in hole_regions(cut).iter() {
            let restored = polygon_boolean(&piece_shell, h, BooleanOp::Intersection)?;
            results.extend(subtract_pieces(restored, &piece_holes)?);
        }
        return Ok(results);
    }

    if any_edges_cross(piece.outer(), cut.outer()) {
        let shell = Polygon::from_ring(piece.outer().clone());
        let carved = polygon_boolean(&shell, cut, BooleanOp::DifferenceAB)?;
        return subtract_pieces(carved, &hole_regions(piece));
    }

    let outer = piece.outer();
    let cut_ring = cut.outer();
    let cut_probe = interior_probe(cut_ring, outer);
    let outer_probe = interior_probe(outer, cut_ring);

    if cut_probe.is_none() && outer_probe.is_none() {
        // coincident boundaries, the cut covers the whole shell
        return Ok(Vec::new());
    }
    if outer_probe.map_or(true, |p| cut_ring.contains_point(p)) {
        return Ok(Vec::new());
    }
    if !cut_probe.map_or(true, |p| outer.contains_point(p)) {
        return Ok(vec![piece.clone()]);
    }

    // cut strictly inside the outer boundary: punch it as a hole, absorbing any existing
    // holes whose regions connect with it
    let mut merged = Polygon::from_ring(oriented_ring(cut_ring.clone(), false));
    let mut kept: Vec<Ring<T>> = piece.holes().to_vec();
    loop {
        let mut absorbed = false;
        let mut i = 0;
        while i < kept.len() {
            let region = Polygon::from_ring(oriented_ring(kept[i].clone(), false));
            let mut joined = polygon_boolean(&merged, &region, BooleanOp::Union)?;
            if joined.len() == 1 {
                merged = joined.remove(0);
                kept.swap_remove(i);
                absorbed = true;
            } else {
                i += 1;
            }
        }
        if !absorbed {
            break;
        }
    }

    // a hole of the merged cut region is solid area fully surrounded by removed area, so
    // it survives as a standalone island piece
    let mut islands: Vec<Polygon<T>> = merged
        .holes()
        .iter()
        .map(|h| Polygon::from_ring(oriented_ring(h.clone(), false)))
        .collect();

    let mut result = Polygon::from_ring(piece.outer().clone());
    result.add_hole(oriented_ring(merged.outer().clone(), true));
    for h in kept {
        let Some(head) = h.head_index() else {
            continue;
        };
        let probe = h.vertex(head).pos;
        match islands.iter_mut().find(|p| p.outer().contains_point(probe)) {
            Some(island) => island.add_hole(oriented_ring(h, true)),
            None => result.add_hole(oriented_ring(h, true)),
        }
    }

    let mut results = vec![result];
    results.append(&mut islands);
    Ok(results)
}

fn resolve_degenerate<T>(a: &Polygon<T>, b: &Polygon<T>, op: BooleanOp) -> Vec<Polygon<T>>
where
    T: Real,
{
    let a_degenerate = a.vertex_count() < 3;
    let b_degenerate = b.vertex_count() < 3;

    match op {
        BooleanOp::Union => {
            if a_degenerate && b_degenerate {
                Vec::new()
            } else if a_degenerate {
                vec![b.clone()]
            } else {
                vec![a.clone()]
            }
        }
        BooleanOp::Intersection => Vec::new(),
        BooleanOp::DifferenceAB => {
            if a_degenerate {
                Vec::new()
            } else {
                vec![a.clone()]
            }
        }
        BooleanOp::DifferenceBA | BooleanOp::Xor => {
            unreachable!("operation rewritten before dispatch")
        }
    }
}

fn resolve_disjoint<T>(a: &Polygon<T>, b: &Polygon<T>, op: BooleanOp) -> Vec<Polygon<T>>
where
    T: Real,
{
    match op {
        BooleanOp::Union => vec![a.clone(), b.clone()],
        BooleanOp::Intersection => Vec::new(),
        BooleanOp::DifferenceAB => vec![a.clone()],
        BooleanOp::DifferenceBA | BooleanOp::Xor => {
            unreachable!("operation rewritten before dispatch")
        }
    }
}

/// Resolves the no-crossing configurations: coincident boundaries, one polygon containing
/// the other, or disjoint regions whose bounding boxes overlap.
fn resolve_no_crossings<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    ra: &Ring<T>,
    rb: &Ring<T>,
    op: BooleanOp,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let a_probe = interior_probe(ra, rb);
    let b_probe = interior_probe(rb, ra);

    if a_probe.is_none() && b_probe.is_none() {
        // boundaries coincide, both polygons cover the same region
        return match op {
            BooleanOp::Union | BooleanOp::Intersection => vec![a.clone()],
            BooleanOp::DifferenceAB => Vec::new(),
            BooleanOp::DifferenceBA | BooleanOp::Xor => {
                unreachable!("operation rewritten before dispatch")
            }
        };
    }

    let a_in_b = a_probe.map_or(true, |p| rb.contains_point(p));
    let b_in_a = b_probe.map_or(true, |p| ra.contains_point(p));

    match op {
        BooleanOp::Union => {
            if a_in_b {
                vec![b.clone()]
            } else if b_in_a {
                vec![a.clone()]
            } else {
                vec![a.clone(), b.clone()]
            }
        }
        BooleanOp::Intersection => {
            if a_in_b {
                vec![a.clone()]
            } else if b_in_a {
                vec![b.clone()]
            } else {
                Vec::new()
            }
        }
        BooleanOp::DifferenceAB => {
            if a_in_b {
                Vec::new()
            } else if b_in_a {
                // subtrahend wholly inside the minuend punches a hole
                let mut hole = rb.clone();
                if !hole.is_clockwise() {
                    hole.invert_direction();
                }
                let mut result = Polygon::from_ring(ra.clone());
                result.add_hole(hole);
                vec![result]
            } else {
                vec![a.clone()]
            }
        }
        BooleanOp::DifferenceBA | BooleanOp::Xor => {
            unreachable!("operation rewritten before dispatch")
        }
    }
}

/// Finds a point of `ring` that does not lie on `other`'s boundary, to make the
/// containment test unambiguous. Vertexes are probed first, then edge midpoints; `None`
/// means the boundaries coincide everywhere the ring has detail.
fn interior_probe<T>(ring: &Ring<T>, other: &Ring<T>) -> Option<Vector2<T>>
where
    T: Real,
{
    let on_boundary = |p: Vector2<T>| {
        other.iter_indexes().any(|i| {
            point_on_seg_eps(
                other.vertex(i).pos,
                other.vertex(other.next_index(i)).pos,
                p,
                T::fuzzy_epsilon(),
            )
        })
    };

    for i in ring.iter_indexes() {
        let p = ring.vertex(i).pos;
        if !on_boundary(p) {
            return Some(p);
        }
    }
    for i in ring.iter_indexes() {
        let m = midpoint(ring.vertex(i).pos, ring.vertex(ring.next_index(i)).pos);
        if !on_boundary(m) {
            return Some(m);
        }
    }

    None
}

fn convex_intersection<T>(a: &Polygon<T>, b: &Polygon<T>) -> Vec<Polygon<T>>
where
    T: Real,
{
    let clipped = remove_repeat_positions(clip_keep_inside(&a.points(), &b.points()));
    if clipped.len() < 3 {
        return Vec::new();
    }

    let mut ring = Ring::from_points(&clipped);
    if ring.is_clockwise() {
        ring.invert_direction();
    }
    vec![Polygon::from_ring(ring)]
}

/// Builds the final polygons from traced boundary loops: counter clockwise loops become
/// outer boundaries and clockwise loops become holes of the outer loop containing them.
fn assemble_polygons<T>(loops: Vec<Vec<Vector2<T>>>) -> Vec<Polygon<T>>
where
    T: Real,
{
    let mut outers: Vec<Ring<T>> = Vec::new();
    let mut holes: Vec<Ring<T>> = Vec::new();

    for points in loops {
        let cleaned = remove_repeat_positions(points);
        if cleaned.len() < 3 {
            continue;
        }
        let ring = Ring::from_points(&cleaned);
        if ring.signed_area().fuzzy_eq_zero() {
            continue;
        }
        if ring.is_clockwise() {
            holes.push(ring);
        } else {
            outers.push(ring);
        }
    }

    let mut polygons: Vec<Polygon<T>> = outers.into_iter().map(Polygon::from_ring).collect();
    for hole in holes {
        let probe = hole.points()[0];
        match polygons
            .iter_mut()
            .find(|p| p.outer().contains_point(probe))
        {
            Some(p) => p.add_hole(hole),
            None => {
                // stray clockwise loop with no containing boundary, keep it standalone
                let mut ring = hole;
                ring.invert_direction();
                polygons.push(Polygon::from_ring(ring));
            }
        }
    }

    polygons
}

/// Drops consecutive fuzzy-equal points (including the closing first/last pair).
fn remove_repeat_positions<T>(points: Vec<Vector2<T>>) -> Vec<Vector2<T>>
where
    T: Real,
{
    let mut result: Vec<Vector2<T>> = Vec::with_capacity(points.len());
    for p in points {
        if result.last().map_or(true, |last| !last.fuzzy_eq(p)) {
            result.push(p);
        }
    }
    while result.len() > 1 {
        let (first, last) = (result[0], result[result.len() - 1]);
        if !first.fuzzy_eq(last) {
            break;
        }
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;

    fn square(min: f64, max: f64) -> Polygon<f64> {
        Polygon::from_points(&[
            vec2(min, min),
            vec2(max, min),
            vec2(max, max),
            vec2(min, max),
        ])
    }

    #[test]
    fn repeat_positions_removed() {
        let cleaned = remove_repeat_positions(vec![
            vec2(0.0, 0.0),
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 0.0),
        ]);
        assert_eq!(cleaned.len(), 3);
    }

    #[test]
    fn interior_probe_skips_boundary_points() {
        // diamond inscribed in a square: every diamond vertex is on the square's boundary
        let sq = Ring::from_points(&[
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
        ]);
        let diamond = Ring::from_points(&[
            vec2(1.0, 0.0),
            vec2(2.0, 1.0),
            vec2(1.0, 2.0),
            vec2(0.0, 1.0),
        ]);
        // falls back to an edge midpoint, which is strictly inside the square
        let probe = interior_probe(&diamond, &sq).unwrap();
        assert!(sq.contains_point(probe));

        let copy = sq.clone();
        assert!(interior_probe(&copy, &sq).is_none());
    }

    #[test]
    fn clockwise_loops_become_holes() {
        let outer = vec![
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(4.0, 4.0),
            vec2(0.0, 4.0),
        ];
        // clockwise inner loop
        let inner = vec![
            vec2(1.0, 1.0),
            vec2(1.0, 2.0),
            vec2(2.0, 2.0),
            vec2(2.0, 1.0),
        ];
        let polygons = assemble_polygons(vec![outer, inner]);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].holes().len(), 1);
        assert!(polygons[0].area().fuzzy_eq(15.0));
    }

    #[test]
    fn degenerate_operands_resolve_trivially() {
        let a = square(0.0, 1.0);
        let empty = Polygon::<f64>::new();

        let union = polygon_boolean(&a, &empty, BooleanOp::Union).unwrap();
        assert_eq!(union.len(), 1);
        assert!(union[0].area().fuzzy_eq(1.0));

        assert!(polygon_boolean(&a, &empty, BooleanOp::Intersection)
            .unwrap()
            .is_empty());
        assert_eq!(
            polygon_boolean(&a, &empty, BooleanOp::DifferenceAB)
                .unwrap()
                .len(),
            1
        );
        assert!(polygon_boolean(&empty, &a, BooleanOp::DifferenceAB)
            .unwrap()
            .is_empty());
        assert!(polygon_boolean(&empty, &empty, BooleanOp::Union)
            .unwrap()
            .is_empty());
    }
}
