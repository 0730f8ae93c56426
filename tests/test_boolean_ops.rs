use contour_clip::{
    assert_fuzzy_eq,
    core::{
        math::{vec2, Vector2},
        traits::FuzzyEq,
    },
    polygon::{merge_all, BooleanOp, Polygon, Ring},
    polygon_closed,
};

fn square(min: f64, max: f64) -> Polygon<f64> {
    polygon_closed![(min, min), (max, min), (max, max), (min, max)]
}

fn holed_square(min: f64, max: f64, hole_min: f64, hole_max: f64) -> Polygon<f64> {
    let mut p = square(min, max);
    p.add_hole(Ring::from_points(&[
        vec2(hole_min, hole_min),
        vec2(hole_max, hole_min),
        vec2(hole_max, hole_max),
        vec2(hole_min, hole_max),
    ]));
    p
}

fn total_area(polygons: &[Polygon<f64>]) -> f64 {
    polygons.iter().map(|p| p.area()).sum()
}

/// Compares two result sets as cyclic point sets (order and start vertex may differ).
fn same_point_set(a: &[Polygon<f64>], b: &[Polygon<f64>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let points_of = |polys: &[Polygon<f64>]| -> Vec<Vector2<f64>> {
        polys.iter().flat_map(|p| p.points()).collect()
    };
    let pa = points_of(a);
    let pb = points_of(b);
    pa.len() == pb.len() && pa.iter().all(|p| pb.iter().any(|q| p.fuzzy_eq(*q)))
}

#[test]
fn unit_squares_quarter_overlap() {
    let a = square(0.0, 1.0);
    let b = square(0.5, 1.5);

    let intersection = a.boolean(&b, BooleanOp::Intersection).unwrap();
    assert_eq!(intersection.len(), 1);
    assert_fuzzy_eq!(intersection[0].area(), 0.25);
    // the overlap is exactly the square [0.5, 1] x [0.5, 1]
    for p in intersection[0].points() {
        assert!(p.x.fuzzy_eq(0.5) || p.x.fuzzy_eq(1.0));
        assert!(p.y.fuzzy_eq(0.5) || p.y.fuzzy_eq(1.0));
    }

    let union = a.boolean(&b, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 1);
    assert_fuzzy_eq!(union[0].area(), 1.75);
}

#[test]
fn area_monotonicity() {
    let pairs = [
        (square(0.0, 2.0), square(1.0, 4.0)),
        (square(0.0, 3.0), polygon_closed![(1.0, 1.0), (5.0, 1.0), (3.0, 6.0)]),
        (
            // concave L shape against a square crossing its notch
            polygon_closed![
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 1.0),
                (1.0, 1.0),
                (1.0, 4.0),
                (0.0, 4.0)
            ],
            square(0.5, 2.5),
        ),
    ];

    for (a, b) in pairs.iter() {
        let union_area = total_area(&a.boolean(b, BooleanOp::Union).unwrap());
        let inter_area = total_area(&a.boolean(b, BooleanOp::Intersection).unwrap());
        assert!(union_area >= a.area().max(b.area()) - 1e-10);
        assert!(inter_area <= a.area().min(b.area()) + 1e-10);
    }
}

#[test]
fn intersection_is_commutative() {
    let a = square(0.0, 2.0);
    let b = polygon_closed![(1.0, 1.0), (4.0, 1.0), (4.0, 4.0), (1.0, 4.0)];

    let ab = a.boolean(&b, BooleanOp::Intersection).unwrap();
    let ba = b.boolean(&a, BooleanOp::Intersection).unwrap();

    assert_fuzzy_eq!(total_area(&ab), total_area(&ba));
    assert!(same_point_set(&ab, &ba));
}

#[test]
fn idempotence() {
    let a = polygon_closed![(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.5, 3.0), (0.0, 2.0)];

    let union = a.boolean(&a, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 1);
    assert_fuzzy_eq!(union[0].area(), a.area());

    let intersection = a.boolean(&a, BooleanOp::Intersection).unwrap();
    assert_eq!(intersection.len(), 1);
    assert_fuzzy_eq!(intersection[0].area(), a.area());

    assert!(a.boolean(&a, BooleanOp::DifferenceAB).unwrap().is_empty());
}

#[test]
fn disjoint_inputs() {
    let a = square(0.0, 1.0);
    let b = square(5.0, 6.0);

    let union = a.boolean(&b, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 2);
    assert_fuzzy_eq!(total_area(&union), 2.0);

    assert!(a.boolean(&b, BooleanOp::Intersection).unwrap().is_empty());

    let diff = a.boolean(&b, BooleanOp::DifferenceAB).unwrap();
    assert_eq!(diff.len(), 1);
    assert_fuzzy_eq!(diff[0].area(), 1.0);

    let xor = a.boolean(&b, BooleanOp::Xor).unwrap();
    assert_fuzzy_eq!(total_area(&xor), 2.0);
}

#[test]
fn containment_tables() {
    let a = square(0.0, 10.0);
    let b = square(3.0, 5.0);

    let union = a.boolean(&b, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 1);
    assert_fuzzy_eq!(union[0].area(), 100.0);

    let intersection = a.boolean(&b, BooleanOp::Intersection).unwrap();
    assert_eq!(intersection.len(), 1);
    assert_fuzzy_eq!(intersection[0].area(), 4.0);

    // the subtrahend wholly inside the minuend becomes a hole
    let diff = a.boolean(&b, BooleanOp::DifferenceAB).unwrap();
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].holes().len(), 1);
    assert_fuzzy_eq!(diff[0].area(), 96.0);
    assert!(!diff[0].contains_point(contour_clip::core::math::vec2(4.0, 4.0)));

    assert!(a.boolean(&b, BooleanOp::DifferenceBA).unwrap().is_empty());
}

#[test]
fn difference_can_split_into_pieces() {
    // horizontal bar minus a vertical bar through its middle leaves two squares
    let wide = polygon_closed![(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)];
    let tall = polygon_closed![(1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (1.0, 2.0)];

    let diff = wide.boolean(&tall, BooleanOp::DifferenceAB).unwrap();
    assert_eq!(diff.len(), 2);
    assert_fuzzy_eq!(total_area(&diff), 2.0);
    for piece in diff.iter() {
        assert_fuzzy_eq!(piece.area(), 1.0);
        assert!(!piece.is_clockwise());
    }
}

#[test]
fn difference_ba_mirrors_swapped_difference_ab() {
    let a = square(0.0, 1.0);
    let b = square(0.5, 1.5);

    let ba = a.boolean(&b, BooleanOp::DifferenceBA).unwrap();
    let swapped = b.boolean(&a, BooleanOp::DifferenceAB).unwrap();

    assert_eq!(ba.len(), 1);
    assert_fuzzy_eq!(ba[0].area(), 0.75);
    assert!(same_point_set(&ba, &swapped));
}

#[test]
fn symmetric_difference_area_identity() {
    let pairs = [
        (square(0.0, 1.0), square(0.5, 1.5)),
        (square(0.0, 3.0), square(1.0, 2.0)),
        (
            polygon_closed![(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)],
            polygon_closed![(1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (1.0, 2.0)],
        ),
    ];

    for (a, b) in pairs.iter() {
        let inter_area = total_area(&a.boolean(b, BooleanOp::Intersection).unwrap());
        let xor_area = total_area(&a.boolean(b, BooleanOp::Xor).unwrap());
        assert_fuzzy_eq!(xor_area, a.area() + b.area() - 2.0 * inter_area);
    }
}

#[test]
fn deterministic_results() {
    let a = polygon_closed![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)];
    let b = polygon_closed![(2.0, 1.0), (6.0, 1.0), (6.0, 5.0), (2.0, 5.0)];

    for op in [
        BooleanOp::Union,
        BooleanOp::Intersection,
        BooleanOp::DifferenceAB,
        BooleanOp::Xor,
    ] {
        let first = a.boolean(&b, op).unwrap();
        let second = a.boolean(&b, op).unwrap();
        assert_eq!(first.len(), second.len());
        for (p, q) in first.iter().zip(second.iter()) {
            assert_eq!(p.points(), q.points());
        }
    }
}

#[test]
fn union_preserves_input_holes() {
    let a = holed_square(0.0, 10.0, 3.0, 5.0);
    let b = square(8.0, 12.0);

    let union = a.boolean(&b, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 1);
    assert_fuzzy_eq!(union[0].area(), 108.0);
    assert!(!union[0].contains_point(vec2(4.0, 4.0)));
    assert!(union[0].contains_point(vec2(9.0, 9.0)));
}

#[test]
fn union_fills_hole_part_covered_by_other_operand() {
    let a = holed_square(0.0, 10.0, 3.0, 5.0);
    let b = square(4.0, 6.0);

    let union = a.boolean(&b, BooleanOp::Union).unwrap();
    assert_eq!(union.len(), 1);
    // the part of the hole covered by b is filled in, the rest stays open
    assert_fuzzy_eq!(union[0].area(), 97.0);
    assert!(union[0].contains_point(vec2(4.5, 4.5)));
    assert!(!union[0].contains_point(vec2(3.5, 3.5)));
}

#[test]
fn intersection_respects_input_holes() {
    let a = holed_square(0.0, 10.0, 3.0, 5.0);
    let b = square(2.0, 6.0);

    let intersection = a.boolean(&b, BooleanOp::Intersection).unwrap();
    assert_eq!(intersection.len(), 1);
    assert_eq!(intersection[0].holes().len(), 1);
    assert_fuzzy_eq!(intersection[0].area(), 12.0);
    assert!(!intersection[0].contains_point(vec2(4.0, 4.0)));
    assert!(intersection[0].contains_point(vec2(2.5, 2.5)));
}

#[test]
fn difference_keeps_region_inside_subtrahend_hole() {
    let a = square(0.0, 6.0);
    let b = holed_square(1.0, 5.0, 2.0, 4.0);

    let diff = a.boolean(&b, BooleanOp::DifferenceAB).unwrap();
    assert_fuzzy_eq!(total_area(&diff), 24.0);
    // the part of a inside b's hole survives as its own piece
    assert!(diff.iter().any(|p| p.contains_point(vec2(3.0, 3.0))));
    assert!(!diff.iter().any(|p| p.contains_point(vec2(1.5, 1.5))));
}

#[test]
fn merge_all_folds_unions() {
    let polygons = vec![
        square(0.0, 1.0),
        square(0.5, 1.5),
        polygon_closed![(1.25, 0.25), (2.25, 0.25), (2.25, 1.25), (1.25, 1.25)],
    ];

    let merged = merge_all(&polygons).unwrap();
    assert_fuzzy_eq!(merged.area(), 2.5625);

    assert!(merge_all::<f64>(&[]).unwrap().is_empty());

    let single = merge_all(&polygons[..1]).unwrap();
    assert_fuzzy_eq!(single.area(), 1.0);
}

#[test]
fn inputs_are_never_mutated() {
    let a = square(0.0, 1.0);
    let b = square(0.5, 1.5);
    let a_points = a.points();
    let b_points = b.points();

    a.boolean(&b, BooleanOp::Xor).unwrap();

    assert_eq!(a.points(), a_points);
    assert_eq!(b.points(), b_points);
    assert_eq!(a.vertex_count(), 4);
    assert_eq!(b.vertex_count(), 4);
}
