//! Configuration-space geometry for rotating rigid bodies.
//!
//! A contact predicate between a fixed and a rotating feature is a quadratic
//! form over unit spins. This crate classifies the zero-set of such a form on
//! S³, diagonalises it in closed form, and parametrizes the zero-set so it can
//! be sampled. An adaptive Bezier quadtree bounds the range of any bivariate
//! R⁴-valued map (typically a parametrization) by 4D convex hulls.
//!
//! Layout
//! - `algebra`: vectors, pins and spins over `f64` and exact rationals.
//! - `pred`: half-space, screw and general predicates, triangle decomposition.
//! - `spinquad`: the 4×4 symmetric form of a predicate.
//! - `param`: classification, eigenbasis and the closed-form evaluator.
//! - `geom4`: 4D hulls (volume, boundary area, separation test).
//! - `bezier`: biquadratic patches and the refinement tree.
//! - `dump`: indented JSON debug output.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` collects the re-exports callers are expected to use.

pub mod algebra;
pub mod api;
pub mod bezier;
pub mod cfg;
pub mod dump;
pub mod geom4;
pub mod param;
pub mod pred;
pub mod spinquad;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use algebra::{Exact, Field, Pin3, Spin3};
pub use nalgebra::{Matrix4 as Mat44, Vector3 as Vec3, Vector4 as Vec4};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algebra::{cl, Exact, Field, Pin3, Spin3};
    pub use crate::bezier::{BezierLeafs, BezierQQ4, BezierTree};
    pub use crate::cfg::TreeCfg;
    pub use crate::geom4::{Hull4, Plane4};
    pub use crate::param::{PredGParam, PredGParamType};
    pub use crate::pred::{PredG, PredGType, PredH, PredS, PredTT};
    pub use crate::spinquad::SpinQuad;
    pub use nalgebra::{Matrix4 as Mat44, Vector3 as Vec3, Vector4 as Vec4};
}
