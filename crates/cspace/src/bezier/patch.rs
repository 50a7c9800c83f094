//! One biquadratic Bezier patch with its control-net hull.

use nalgebra::Vector4;

use crate::algebra::mad3;
use crate::geom4::Hull4;

/// Biquadratic Bezier patch over local coordinates `[0,1]²`.
///
/// Invariant: `hull` is the hull of the 9 control points in `cp`; the patch
/// lies inside it (convex-hull property of Bernstein bases).
#[derive(Clone, Debug)]
pub struct BezierQQ4 {
    /// `cp[i][j]`: `i` along `u`, `j` along `v`.
    pub cp: [[Vector4<f64>; 3]; 3],
    pub hull: Hull4,
}

/// Interpolating quadratic through samples at `0, 1/2, 1` to Bezier form.
#[inline]
fn to_bezier(f: [Vector4<f64>; 3]) -> [Vector4<f64>; 3] {
    [f[0], mad3(&2.0, &f[1], &-0.5, &f[0], &-0.5, &f[2]), f[2]]
}

#[inline]
fn bernstein(t: f64) -> [f64; 3] {
    let s = 1.0 - t;
    [s * s, 2.0 * s * t, t * t]
}

impl BezierQQ4 {
    /// Patch interpolating `f[i][j] = F(i/2, j/2)` in local coordinates.
    pub fn from_samples(f: [[Vector4<f64>; 3]; 3]) -> Self {
        // Rows along v first, then the columns along u.
        let rows = f.map(to_bezier);
        let mut cp = rows;
        for j in 0..3 {
            let col = to_bezier([rows[0][j], rows[1][j], rows[2][j]]);
            for i in 0..3 {
                cp[i][j] = col[i];
            }
        }
        Self::from_control_points(cp)
    }

    pub fn from_control_points(cp: [[Vector4<f64>; 3]; 3]) -> Self {
        let pts: Vec<Vector4<f64>> = cp.iter().flatten().copied().collect();
        let hull = Hull4::from_points(&pts);
        Self { cp, hull }
    }

    /// Point of the patch at local `(u, v)`.
    pub fn eval(&self, u: f64, v: f64) -> Vector4<f64> {
        let (bu, bv) = (bernstein(u), bernstein(v));
        let mut out = Vector4::zeros();
        for i in 0..3 {
            for j in 0..3 {
                out += self.cp[i][j] * (bu[i] * bv[j]);
            }
        }
        out
    }

    #[inline]
    pub fn vol(&self) -> f64 {
        self.hull.vol
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.hull.area
    }
}
