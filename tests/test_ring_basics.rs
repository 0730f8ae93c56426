use contour_clip::{
    assert_fuzzy_eq,
    core::{math::vec2, traits::FuzzyEq},
    polygon::Ring,
};

#[test]
fn point_sequence_round_trip() {
    let points = vec![
        vec2(0.0, 0.0),
        vec2(4.0, 0.0),
        vec2(4.0, 2.0),
        vec2(2.0, 3.0),
        vec2(0.0, 2.0),
    ];
    let ring = Ring::from_points(&points);
    // append order is preserved so the read back sequence matches exactly
    assert_eq!(ring.points(), points);
    assert_eq!(ring.vertex_count(), points.len());
    assert!(ring.validate().is_ok());
}

#[test]
fn traversal_is_circular_in_both_directions() {
    let ring = Ring::from_points(&[vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)]);
    let head = ring.head_index().unwrap();

    let mut forward = head;
    let mut backward = head;
    for _ in 0..ring.vertex_count() {
        forward = ring.next_index(forward);
        backward = ring.prev_index(backward);
    }
    assert_eq!(forward, head);
    assert_eq!(backward, head);
}

#[test]
fn signed_area_sign_follows_winding() {
    let ccw = Ring::from_points(&[
        vec2(0.0, 0.0),
        vec2(2.0, 0.0),
        vec2(2.0, 2.0),
        vec2(0.0, 2.0),
    ]);
    assert_fuzzy_eq!(ccw.signed_area(), 4.0);
    assert!(!ccw.is_clockwise());

    let mut cw = ccw.clone();
    cw.invert_direction();
    assert_fuzzy_eq!(cw.signed_area(), -4.0);
    assert!(cw.is_clockwise());
    assert_fuzzy_eq!(cw.area(), 4.0);
}

#[test]
fn clone_is_independent() {
    let mut original = Ring::from_points(&[
        vec2(0.0, 0.0),
        vec2(1.0, 0.0),
        vec2(1.0, 1.0),
        vec2(0.0, 1.0),
    ]);
    let copy = original.clone();

    original.translate(5.0, 5.0);
    original.remove(original.head_index().unwrap());

    assert_eq!(copy.vertex_count(), 4);
    assert_eq!(copy.points()[0], vec2(0.0, 0.0));
    assert!(copy.validate().is_ok());
}

#[test]
fn remove_keeps_ring_closed() {
    let mut ring = Ring::from_points(&[
        vec2(0.0, 0.0),
        vec2(1.0, 0.0),
        vec2(1.0, 1.0),
        vec2(0.0, 1.0),
    ]);

    let second = ring.next_index(ring.head_index().unwrap());
    ring.remove(second);

    assert_eq!(ring.vertex_count(), 3);
    assert!(ring.validate().is_ok());
    assert_eq!(
        ring.points(),
        vec![vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)]
    );
}

#[test]
fn empty_ring_is_neutral() {
    let mut ring = Ring::<f64>::new();
    assert_eq!(ring.vertex_count(), 0);
    assert!(ring.points().is_empty());
    assert_fuzzy_eq!(ring.signed_area(), 0.0);
    assert!(ring.validate().is_ok());
    ring.clear();
    assert!(ring.is_empty());
}
