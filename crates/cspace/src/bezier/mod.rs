//! Adaptive Bezier bounds of bivariate R⁴-valued maps.
//!
//! Purpose
//! - Bound the image of `f: [0,1]² → R⁴` (typically a zero-set
//!   parametrization) by a union of 4D convex hulls, and tighten the bound
//!   until every piece is below a target volume.
//!
//! Why this design (short)
//! - Each quadtree node interpolates `f` at 9 points by a biquadratic patch;
//!   the hull of its control net bounds the patch.
//! - Nodes live in an arena (`Vec<BezierNode>`, `NodeId` indices); leaf lists
//!   are plain `Vec<NodeId>` rewritten in order on refinement.
//! - The tree owns its source map; borrowed closures (e.g.
//!   `PredGParam::eval_fn`) work as sources.
//!
//! Policy
//! - Refinement depth is capped by `TreeCfg::max_depth`; hitting the cap is
//!   logged, not an error.

mod patch;
mod tree;

pub use patch::BezierQQ4;
pub use tree::{BezierLeafs, BezierNode, BezierTree, NodeId, NodeState};

#[cfg(test)]
mod tests;
