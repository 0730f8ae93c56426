/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Construct a polygon with the outer boundary given as a list of (x, y) tuples.
///
/// The boundary is implicitly closed (last point connects back to the first).
///
/// # Examples
///
/// ```
/// # use contour_clip::polygon_closed;
/// # use contour_clip::polygon::*;
/// let polygon = polygon_closed![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// assert_eq!(polygon.vertex_count(), 4);
/// assert!(!polygon.is_clockwise());
/// ```
#[macro_export]
macro_rules! polygon_closed {
    ($( $p:expr ),* $(,)?) => {
        {
            let mut polygon = $crate::polygon::Polygon::new();
            $(
                polygon.add_point($crate::core::math::vec2($p.0, $p.1));
            )*
            polygon
        }
    };
}
