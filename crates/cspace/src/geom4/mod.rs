//! 4D convex hulls of small point clouds.
//!
//! Purpose
//! - Bound the control net of a biquadratic patch: volume, boundary
//!   3-volume ("area") and a separation test between two bounds.
//!
//! Why this design (short)
//! - Clouds are tiny (9 control points per patch), so explicit enumeration
//!   of supporting planes over point quadruples is fast enough and easy to
//!   audit; no external hull library.
//! - Degenerate (flat) clouds yield an empty H-rep with zero measure rather
//!   than an error.
//!
//! Assumptions and conventions
//! - Half-spaces use `n·x <= c` with unit `n` when produced by the hull.
//! - Volume: pyramids from the vertex centroid over every facet. Facet
//!   3-volume: pyramids from the facet centroid over every ridge. Ridge area:
//!   2D monotone-chain hull in an orthonormal basis of the ridge plane.
//!
//! References
//! - Related code: `crate::bezier` (the only producer of hulls outside tests).

use nalgebra::Vector4;

pub mod cfg;
mod hull;
pub mod special;
mod util;

pub use hull::Hull4;

#[cfg(test)]
mod tests;

/// Closed half-space `n · x <= c` in R^4.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane4 {
    pub n: Vector4<f64>,
    pub c: f64,
}

impl Plane4 {
    #[inline]
    pub fn new(n: Vector4<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Signed offset `n·x − c`; positive outside.
    #[inline]
    pub fn distance(&self, x: &Vector4<f64>) -> f64 {
        self.n.dot(x) - self.c
    }

    #[inline]
    pub fn satisfies(&self, x: &Vector4<f64>) -> bool {
        self.distance(x) <= cfg::FEAS_EPS
    }
}
