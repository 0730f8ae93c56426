//! contour_clip is a library for 2D polygon boolean operations: union, intersection,
//! difference, and symmetric difference between simple polygons, optionally with holes.
//!
//! The clipping engine builds circular vertex rings for both inputs, discovers and splices
//! in their boundary crossings, classifies each crossing as an entry or exit for the
//! requested operation, then traces the result boundaries by walking the rings and hopping
//! between them at crossings. A Sutherland-Hodgman half plane clipper covers the convex
//! intersection fast path.
//!
//! # Quick code example
//!
//! ```
//! use contour_clip::polygon::{BooleanOp, Polygon};
//! use contour_clip::polygon_closed;
//!
//! // two overlapping unit squares
//! let a: Polygon = polygon_closed![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
//! let b: Polygon = polygon_closed![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)];
//!
//! let overlap = a.boolean(&b, BooleanOp::Intersection).unwrap();
//! assert_eq!(overlap.len(), 1);
//! assert!((overlap[0].area() - 0.25).abs() < 1e-10);
//! ```
mod macros;

pub mod core;
pub mod polygon;

pub use static_aabb2d_index::AABB;
