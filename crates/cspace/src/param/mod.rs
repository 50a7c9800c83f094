//! Classification and closed-form parametrization of predicate zero-sets.
//!
//! Purpose
//! - Given `PredG` with `P = k×l`, `Q = a−b`, `U = k−l`, `V = a×b`, the
//!   spin-quadric acts on quaternions as `s ↦ −P s Q − U s V + c s`. With
//!   `a = |P||Q|`, `b = |U||V|` this is `c − a·A − b·B` where `A = L(p̂)R(q̂)`
//!   and `B = L(û)R(v̂)` are commuting involutions (`P ⟂ U`, `Q ⟂ V`).
//! - Joint eigenspaces of `(A, B)` give the eigenvalues in closed form:
//!   `e = [c−a−b, c−a+b, c+a−b, c+a+b]` for signs `(++, +−, −+, −−)`, named
//!   `x, y, z, w` in that order.
//! - The signs of `e` relative to zero decide the topology of the zero-set on
//!   S³ (17 cases, `PredGParamType`); each case has a closed-form map from
//!   `(u, v) ∈ [0,1]²` to eigen-coordinates `t`, and `s = Σ t_i ev_i`.
//!
//! Why this design (short)
//! - The case is a pure function of `(a, b, c)`; `classify` is exposed so
//!   the interval table can be tested without building predicates.
//! - Eigenvector self-checks are an explicit `check_eigen` pass. `param`
//!   runs it only in debug builds.
//!
//! Layout
//! - `classify.rs`: the `(a, b, c)` case table.
//! - `eigen.rs`: closed-form eigenvectors.
//! - `eval.rs`: the 17 parametrizations.

use nalgebra::{Vector3, Vector4};
use thiserror::Error;

use crate::algebra::Field;
use crate::cfg::EPS_EIGEN;
use crate::pred::{PredG, PredGType};
use crate::spinquad::SpinQuad;

mod classify;
mod eigen;
mod eval;

pub use classify::{classify, classify_sq};


/// Topology of a predicate zero-set on S³.
///
/// Ellipsoidal cases are named after which eigen-axes carry the structure;
/// toroidal cases after the two eigen-planes of the torus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredGParamType {
    EmptySet,
    PairOfPoints,
    PairOfSeparateEllipsoids,
    PairOfYTouchingEllipsoids,
    PairOfYzCrossedEllipsoids,
    PairOfZTouchingEllipsoids,
    YBarrel,
    ZBarrel,
    NotchedYBarrel,
    NotchedZBarrel,
    PairOfSeparateYzCaps,
    XyZwTorus,
    XyCircle,
    ZwCircle,
    XzYwTorus,
    XzCircle,
    YwCircle,
}

/// `(dim, domain components, manifold, domain hole, connected)`.
type Meta = (i32, usize, bool, bool, bool);

impl PredGParamType {
    pub const ALL: [PredGParamType; 17] = [
        Self::EmptySet,
        Self::PairOfPoints,
        Self::PairOfSeparateEllipsoids,
        Self::PairOfYTouchingEllipsoids,
        Self::PairOfYzCrossedEllipsoids,
        Self::PairOfZTouchingEllipsoids,
        Self::YBarrel,
        Self::ZBarrel,
        Self::NotchedYBarrel,
        Self::NotchedZBarrel,
        Self::PairOfSeparateYzCaps,
        Self::XyZwTorus,
        Self::XyCircle,
        Self::ZwCircle,
        Self::XzYwTorus,
        Self::XzCircle,
        Self::YwCircle,
    ];

    fn meta(self) -> Meta {
        use PredGParamType::*;
        match self {
            EmptySet => (-1, 0, true, false, false),
            PairOfPoints => (0, 2, true, false, false),
            PairOfSeparateEllipsoids => (2, 2, true, false, false),
            PairOfYTouchingEllipsoids => (2, 2, false, false, true),
            PairOfYzCrossedEllipsoids => (2, 2, false, false, true),
            PairOfZTouchingEllipsoids => (2, 2, false, false, true),
            YBarrel | ZBarrel => (2, 1, true, false, true),
            NotchedYBarrel | NotchedZBarrel => (2, 1, false, true, true),
            PairOfSeparateYzCaps => (2, 2, true, false, false),
            XyZwTorus | XzYwTorus => (2, 1, true, false, true),
            XyCircle | ZwCircle | XzCircle | YwCircle => (1, 1, true, false, true),
        }
    }

    /// Manifold dimension, `-1` for the empty set.
    pub fn dim(self) -> i32 {
        self.meta().0
    }

    /// Number of valid `component` arguments to `PredGParam::eval`.
    pub fn domain_components(self) -> usize {
        self.meta().1
    }

    pub fn is_manifold(self) -> bool {
        self.meta().2
    }

    /// The parametrization collapses a line of the domain to a point.
    pub fn has_domain_hole(self) -> bool {
        self.meta().3
    }

    pub fn is_connected(self) -> bool {
        self.meta().4
    }

    pub fn name(self) -> &'static str {
        use PredGParamType::*;
        match self {
            EmptySet => "an_empty_set",
            PairOfPoints => "a_pair_of_points",
            PairOfSeparateEllipsoids => "a_pair_of_separate_ellipsoids",
            PairOfYTouchingEllipsoids => "a_pair_of_y_touching_ellipsoids",
            PairOfYzCrossedEllipsoids => "a_pair_of_yz_crossed_ellipsoids",
            PairOfZTouchingEllipsoids => "a_pair_of_z_touching_ellipsoids",
            YBarrel => "a_y_barrel",
            ZBarrel => "a_z_barrel",
            NotchedYBarrel => "a_notched_y_barrel",
            NotchedZBarrel => "a_notched_z_barrel",
            PairOfSeparateYzCaps => "a_pair_of_separate_yz_caps",
            XyZwTorus => "a_xy_zw_torus",
            XyCircle => "a_xy_circle",
            ZwCircle => "a_zw_circle",
            XzYwTorus => "a_xz_yw_torus",
            XzCircle => "a_xz_circle",
            YwCircle => "a_yw_circle",
        }
    }
}

impl std::fmt::Display for PredGParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Eigen-decomposition and case of a `PredG<f64>`.
///
/// Invariants:
/// - `ev` is orthonormal and `SpinQuad · ev[i] = e[i] · ev[i]` (see
///   `check_eigen`).
/// - `t == classify(a, b, c)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredGParam {
    pub t: PredGParamType,
    pub p: Vector3<f64>,
    pub q: Vector3<f64>,
    pub u: Vector3<f64>,
    pub v: Vector3<f64>,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub ev: [Vector4<f64>; 4],
    pub e: Vector4<f64>,
}

/// Eigenbasis failed its self-check.
#[derive(Debug, Error, PartialEq)]
pub enum EigenCheckError {
    #[error("eigenvector {index} has length {len} (tol {tol})")]
    NotUnit { index: usize, len: f64, tol: f64 },
    #[error("eigenvectors {i} and {j} have dot product {dot} (tol {tol})")]
    NotOrthogonal { i: usize, j: usize, dot: f64, tol: f64 },
    #[error("eigenpair {index} has residual {residual} (tol {tol})")]
    Residual { index: usize, residual: f64, tol: f64 },
}

impl PredGParam {
    /// Scale the residual tolerance is relative to.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        1.0 + self.a + self.b + self.c.abs()
    }

    /// Verify `ev`/`e` against the quadric they were derived from.
    pub fn check_eigen(&self, m: &SpinQuad<f64>) -> Result<(), EigenCheckError> {
        let tol = EPS_EIGEN;
        for (index, ev) in self.ev.iter().enumerate() {
            let len = ev.norm();
            if (len - 1.0).abs() > tol {
                return Err(EigenCheckError::NotUnit { index, len, tol });
            }
        }
        for i in 0..4 {
            for j in i + 1..4 {
                let dot = self.ev[i].dot(&self.ev[j]);
                if dot.abs() > tol {
                    return Err(EigenCheckError::NotOrthogonal { i, j, dot, tol });
                }
            }
        }
        let tol = EPS_EIGEN * self.magnitude();
        for (index, ev) in self.ev.iter().enumerate() {
            let residual = (m.mul(ev) - ev * self.e[index]).norm();
            if residual > tol {
                return Err(EigenCheckError::Residual {
                    index,
                    residual,
                    tol,
                });
            }
        }
        Ok(())
    }
}

/// Closed-form eigenvalues in `(++, +−, −+, −−)` order.
#[inline]
pub fn eigenvalues(a: f64, b: f64, c: f64) -> Vector4<f64> {
    Vector4::new(c - a - b, c - a + b, c + a - b, c + a + b)
}

impl<T: Field> PredG<T> {
    /// Case from `support_sq` and `c` by `classify_sq`. For exact predicates
    /// this is the cross-check of `param().t` at breakpoints.
    pub fn case_sq(&self) -> PredGParamType {
        let (a2, b2) = self.support_sq();
        classify_sq(&a2, &b2, &self.c)
    }
}

impl PredG<f64> {
    /// Classify and diagonalise.
    ///
    /// In debug builds the eigenbasis is verified against the spin-quadric and
    /// a failure panics: it means the closed form is wrong, not the input.
    pub fn param(&self) -> PredGParam {
        let (p, q, u, v) = (self.p(), self.q(), self.u(), self.v());
        let a = p.norm() * q.norm();
        let b = u.norm() * v.norm();
        let c = self.c;
        let ev = match self.kind() {
            PredGType::Improper => [Vector4::x(), Vector4::y(), Vector4::z(), Vector4::w()],
            PredGType::Ellipsoidal => eigen::ellipsoidal(&p, &q, &u, &v),
            PredGType::Toroidal if b.negligible() => eigen::toroidal_pq(&p, &q),
            PredGType::Toroidal => eigen::toroidal_uv(&u, &v),
        };
        let pp = PredGParam {
            t: classify(a, b, c),
            p,
            q,
            u,
            v,
            a,
            b,
            c,
            ev,
            e: eigenvalues(a, b, c),
        };
        if cfg!(debug_assertions) {
            if let Err(err) = pp.check_eigen(&SpinQuad::from_predg(self)) {
                panic!("eigen-decomposition self-check failed for {self:?}: {err}");
            }
        }
        pp
    }
}
