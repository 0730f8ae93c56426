use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of boolean operations that can be performed between two polygons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BooleanOp {
    /// Return the region(s) covered by either polygon.
    Union,
    /// Return the region(s) covered by both polygons.
    Intersection,
    /// Return the region(s) covered by the first polygon but not the second.
    DifferenceAB,
    /// Return the region(s) covered by the second polygon but not the first.
    DifferenceBA,
    /// Return the region(s) covered by exactly one of the two polygons.
    Xor,
}

/// Numeric operation codes accepted at foreign interface boundaries.
///
/// Unknown codes are rejected rather than mapped to a default operation.
impl TryFrom<u8> for BooleanOp {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        match code {
            0 => Ok(BooleanOp::Union),
            1 => Ok(BooleanOp::Intersection),
            2 => Ok(BooleanOp::DifferenceAB),
            3 => Ok(BooleanOp::DifferenceBA),
            4 => Ok(BooleanOp::Xor),
            _ => Err(Error::InvalidOpCode(code)),
        }
    }
}

/// Errors reported by polygon operations.
///
/// Geometric degeneracies (parallel edges, degenerate operands, empty results)
/// are not errors, they resolve to well defined results. Only structural
/// corruption and boundary contract violations surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A ring's internal link structure failed validation. Indicates a bug in
    /// ring manipulation rather than bad input; the operation is aborted with
    /// no partial result.
    #[error("polygon ring structure is corrupt: {0}")]
    CorruptRing(&'static str),
    /// An operation code from a foreign caller did not map to any [BooleanOp].
    #[error("invalid boolean operation code: {0}")]
    InvalidOpCode(u8),
}
