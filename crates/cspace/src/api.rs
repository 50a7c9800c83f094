//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI,
//!   benches and experiments. Breaking changes are allowed and expected.

// Algebra
pub use crate::algebra::{
    cl, mad, mad2, mad3, mad4, mad5, to_exact, tr, unit, vec3_to_exact, Exact, ExactError, Field,
    Pin3, Spin3,
};
// Predicates
pub use crate::pred::golden::{golden, golden_names, GOLDEN};
pub use crate::pred::{random_predg, random_spin, Plane3, PredG, PredGType, PredH, PredS, PredTT};
pub use crate::spinquad::SpinQuad;
// Classification and parametrization
pub use crate::param::{classify, classify_sq, EigenCheckError, PredGParam, PredGParamType};
// Bounds
pub use crate::bezier::{BezierLeafs, BezierNode, BezierQQ4, BezierTree, NodeId, NodeState};
pub use crate::cfg::TreeCfg;
pub use crate::geom4::special::hypercube_vertices;
pub use crate::geom4::{Hull4, Plane4};
// Debug output
pub use crate::dump::ToJson;
