//! Spin-quadric: a predicate as a symmetric 4×4 form over spin coordinates.
//!
//! Index order is `1 = s12, 2 = s23, 3 = s31, 4 = s0`, matching
//! `Spin3::to_vector4`. For a single pair `P·rot(Q)` with `d = P·Q` and
//! `X = P×Q`, the sandwich expands to
//! `d s0² − d|s|²_biv + 2(s·P)(s·Q) − 2 s0 (s·X)`, where `s` also denotes the
//! bivector part read as a vector `(s23, s31, s12)`. `c` adds to the diagonal
//! because `|s| = 1`.
//!
//! Storage follows the usual 10-entry packing of symmetric 4×4 matrices.

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::algebra::{int, Field};
use crate::pred::PredG;

/// Symmetric form `sᵀ M s` with the 10 independent entries of `M`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinQuad<T: Field> {
    pub a11: T,
    pub a22: T,
    pub a33: T,
    pub a44: T,
    pub a12: T,
    pub a13: T,
    pub a14: T,
    pub a23: T,
    pub a24: T,
    pub a34: T,
}

impl<T: Field> SpinQuad<T> {
    pub fn zero() -> Self {
        let z = T::zero;
        Self {
            a11: z(),
            a22: z(),
            a33: z(),
            a44: z(),
            a12: z(),
            a13: z(),
            a14: z(),
            a23: z(),
            a24: z(),
            a34: z(),
        }
    }

    /// Form of `p·rot(q)` on unit spins.
    pub fn from_pair(p: &Vector3<T>, q: &Vector3<T>) -> Self {
        let mut m = Self::zero();
        m.add_pair(p, q);
        m
    }

    pub fn from_predg(g: &PredG<T>) -> Self {
        let mut m = Self::zero();
        m.add_pair(&g.p(), &g.q());
        m.add_pair(&g.u(), &g.v());
        m.add_diagonal(&g.c);
        m
    }

    fn add_pair(&mut self, p: &Vector3<T>, q: &Vector3<T>) {
        let two: T = int(2);
        let d = p.dot(q);
        let x = p.cross(q);
        let (px, py, pz) = (&p.x, &p.y, &p.z);
        let (qx, qy, qz) = (&q.x, &q.y, &q.z);
        let sq = |a: &T, b: &T| two.clone() * a.clone() * b.clone() - d.clone();
        let sym = |a1: &T, b1: &T, a2: &T, b2: &T| a1.clone() * b1.clone() + a2.clone() * b2.clone();

        self.a11 += sq(pz, qz);
        self.a22 += sq(px, qx);
        self.a33 += sq(py, qy);
        self.a44 += d.clone();
        self.a12 += sym(pz, qx, px, qz);
        self.a13 += sym(pz, qy, py, qz);
        self.a23 += sym(px, qy, py, qx);
        self.a14 -= x.z.clone();
        self.a24 -= x.x.clone();
        self.a34 -= x.y.clone();
    }

    fn add_diagonal(&mut self, c: &T) {
        self.a11 += c.clone();
        self.a22 += c.clone();
        self.a33 += c.clone();
        self.a44 += c.clone();
    }

    pub fn to_matrix(&self) -> Matrix4<T> {
        Matrix4::new(
            self.a11.clone(),
            self.a12.clone(),
            self.a13.clone(),
            self.a14.clone(),
            self.a12.clone(),
            self.a22.clone(),
            self.a23.clone(),
            self.a24.clone(),
            self.a13.clone(),
            self.a23.clone(),
            self.a33.clone(),
            self.a34.clone(),
            self.a14.clone(),
            self.a24.clone(),
            self.a34.clone(),
            self.a44.clone(),
        )
    }

    /// `M s`.
    pub fn mul(&self, s: &Vector4<T>) -> Vector4<T> {
        self.to_matrix() * s.clone()
    }

    /// `sᵀ M s`.
    pub fn eval(&self, s: &Vector4<T>) -> T {
        s.dot(&self.mul(s))
    }

    /// Largest absolute entry.
    pub fn amax(&self) -> T {
        [
            &self.a11, &self.a22, &self.a33, &self.a44, &self.a12, &self.a13, &self.a14,
            &self.a23, &self.a24, &self.a34,
        ]
        .into_iter()
        .fold(T::zero(), |m, x| {
            let ax = x.abs();
            if ax > m {
                ax
            } else {
                m
            }
        })
    }
}

impl<T: Field> From<&PredG<T>> for SpinQuad<T> {
    fn from(g: &PredG<T>) -> Self {
        Self::from_predg(g)
    }
}
