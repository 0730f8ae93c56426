//! This module has all the types and functions associated with polygons, polygon vertex
//! rings, and boolean operations between polygons.
pub mod internal;
#[allow(clippy::module_inception)]
mod polygon;
mod ring;
mod types;

pub use internal::boolean::{merge_all, polygon_boolean};
pub use polygon::*;
pub use ring::*;
pub use types::*;
