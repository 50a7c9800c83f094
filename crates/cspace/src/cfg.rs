//! Tolerance defaults for predicate classification and parametrization.
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” during normal
//!   development. Runtime knobs that callers do tune live in small `Copy`
//!   config structs (`TreeCfg`).
//! - Hull tolerances live in `geom4::cfg`.

/// Magnitude below which a support product (`|P||Q|`, `|U||V|`) or a vector
/// counts as zero.
pub const EPS_NONZERO: f64 = 1e-8;
/// Distance below which `c` is snapped onto a case breakpoint.
pub const EPS_CASE: f64 = 1e-8;
/// Unit-spin check on parametrization output.
pub const EPS_UNIT: f64 = 1e-8;
/// Eigenvector length and residual check, scaled by the predicate magnitude.
pub const EPS_EIGEN: f64 = 1e-7;
/// Minimum projector weight before the eigenvector formula switches pivot.
pub const PIVOT_MIN: f64 = 1e-3;

/// Bezier tree refinement limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeCfg {
    /// Nodes at this depth are never subdivided (root children have depth 1).
    pub max_depth: u32,
}

impl Default for TreeCfg {
    fn default() -> Self {
        Self { max_depth: 12 }
    }
}
