//! Tolerance defaults for 4D hulls (internal).
//!
//! Policy
//! - Fixed constants, like the predicate tolerances in `crate::cfg`.
//! - Distances are relative to the point-cloud radius, so patch hulls deep in
//!   a refined tree use the same constants as hulls of unit size.

/// Side-of-plane test: a point is outside a plane when `n·x − c > FEAS_EPS`.
pub const FEAS_EPS: f64 = 1e-9;
/// A point lies on a facet when `|n·x − c| <= TIGHT_EPS`.
pub const TIGHT_EPS: f64 = 1e-9;
/// A direction counts towards the affine rank when the RMS spread of the
/// cloud along it exceeds `RANK_EPS · radius`. Compared as a length, not as a
/// scatter eigenvalue.
pub const RANK_EPS: f64 = 1e-9;
/// Cofactor normals shorter than this, relative to the edge lengths, mark a
/// degenerate quadruple.
pub(crate) const NORMAL_EPS: f64 = 1e-9;
