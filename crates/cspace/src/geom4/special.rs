//! Special point clouds used in tests and benchmarks.
//!
//! References
//! - Hypercube of side `s`: vol = s⁴, boundary 3-volume = 8 s³.

use nalgebra::Vector4;

/// The 16 corners of the axis-aligned hypercube `origin + [0, side]^4`.
pub fn hypercube_vertices(origin: Vector4<f64>, side: f64) -> Vec<Vector4<f64>> {
    (0..16u32)
        .map(|bits| {
            let mut x = origin;
            for axis in 0..4 {
                if bits & (1 << axis) != 0 {
                    x[axis] += side;
                }
            }
            x
        })
        .collect()
}
