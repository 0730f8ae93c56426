use contour_clip::{
    assert_fuzzy_eq,
    core::{math::vec2, traits::FuzzyEq},
    polygon::internal::convex_clip::{clip_keep_inside, clip_keep_outside},
    polygon::Ring,
};

fn square(min: f64, max: f64) -> Vec<contour_clip::core::math::Vector2<f64>> {
    vec![
        vec2(min, min),
        vec2(max, min),
        vec2(max, max),
        vec2(min, max),
    ]
}

fn area_of(points: &[contour_clip::core::math::Vector2<f64>]) -> f64 {
    Ring::from_points(points).area()
}

#[test]
fn corner_overlap_keeps_quarter() {
    let clipped = clip_keep_inside(&square(0.0, 1.0), &square(0.5, 1.5));
    assert_fuzzy_eq!(area_of(&clipped), 0.25);
}

#[test]
fn concave_subject_against_convex_clip() {
    // L shaped subject clipped to the lower half keeps only the wide base
    let subject = vec![
        vec2(0.0, 0.0),
        vec2(4.0, 0.0),
        vec2(4.0, 1.0),
        vec2(1.0, 1.0),
        vec2(1.0, 4.0),
        vec2(0.0, 4.0),
    ];
    let clip = vec![
        vec2(-1.0, -1.0),
        vec2(5.0, -1.0),
        vec2(5.0, 0.5),
        vec2(-1.0, 0.5),
    ];
    let clipped = clip_keep_inside(&subject, &clip);
    assert_fuzzy_eq!(area_of(&clipped), 2.0);
}

#[test]
fn clip_winding_detected_from_signed_area() {
    let mut cw_clip = square(0.5, 1.5);
    cw_clip.reverse();
    let clipped = clip_keep_inside(&square(0.0, 1.0), &cw_clip);
    assert_fuzzy_eq!(area_of(&clipped), 0.25);
}

#[test]
fn fully_contained_and_fully_outside() {
    assert_fuzzy_eq!(
        area_of(&clip_keep_inside(&square(0.25, 0.75), &square(0.0, 1.0))),
        0.25
    );
    assert!(clip_keep_inside(&square(0.0, 1.0), &square(5.0, 6.0)).is_empty());
}

#[test]
fn keep_outside_variant_empties_enclosed_subjects() {
    assert!(clip_keep_outside(&square(0.25, 0.75), &square(0.0, 1.0)).is_empty());
    assert!(clip_keep_outside(&square(0.0, 1.0), &square(0.0, 1.0)).is_empty());
}
