//! Closed-form parametrizations, one per case.
//!
//! Every map produces eigen-coordinates `t` with `|t| = 1` and
//! `Σ e[i] t[i]² = 0`; `s = Σ t[i] ev[i]` is then a unit spin on the zero-set.
//! `k[i] = |e[i]|` below.
//!
//! Angles: `u ↦ 2πu` is always periodic. Polar angles use `v ↦ πv` on
//! spheres and `v ↦ 2πv` where the second angle is periodic too.
//!
//! Shapes
//! - Separate ellipsoids, touching ellipsoids and yz-caps: one eigenvalue (the
//!   "solitary" axis) has the opposite sign of the other three. A sphere
//!   direction `n` fixes the three, the solitary coordinate follows, and the
//!   component picks its sign.
//! - Barrels: two negative and two positive eigenvalues; an elliptic
//!   Clifford torus.
//! - Notched barrels: one eigenvalue is zero; the torus pinches to the two
//!   poles of that axis.
//! - Crossed: two eigenvalues are zero; two great spheres through the
//!   zero-plane.
//! - Tori and circles: toroidal predicates, eigenvalues come in pairs.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector4;

use super::{PredGParam, PredGParamType};
use crate::algebra::{mad4, Spin3};

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const W: usize = 3;

#[inline]
fn sign(component: usize) -> f64 {
    if component == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Unit sphere direction, polar axis last.
#[inline]
fn sphere(u: f64, v: f64) -> [f64; 3] {
    let (st, ct) = (TAU * u).sin_cos();
    let (sp, cp) = (PI * v).sin_cos();
    [sp * ct, sp * st, cp]
}

impl PredGParam {
    /// Point of the zero-set for domain coordinates `u, v ∈ [0, 1]`.
    ///
    /// Panics for `EmptySet` and for `component >= t.domain_components()`.
    pub fn eval(&self, u: f64, v: f64, component: usize) -> Spin3 {
        use PredGParamType::*;
        assert!(
            self.t != EmptySet,
            "cannot parametrize an empty set (a={}, b={}, c={})",
            self.a,
            self.b,
            self.c
        );
        assert!(
            component < self.t.domain_components(),
            "domain component {component} out of range for {}",
            self.t
        );
        let t = match self.t {
            EmptySet => unreachable!(),
            PairOfPoints => {
                let mut t = [0.0; 4];
                t[if self.c > 0.0 { X } else { W }] = sign(component);
                t
            }
            PairOfSeparateEllipsoids => self.solitary(u, v, component, W, [X, Y, Z]),
            PairOfYTouchingEllipsoids => self.solitary(u, v, component, W, [X, Z, Y]),
            PairOfZTouchingEllipsoids => self.solitary(u, v, component, W, [X, Y, Z]),
            PairOfSeparateYzCaps => self.solitary(u, v, component, X, [Y, Z, W]),
            PairOfYzCrossedEllipsoids => self.crossed(u, v, component),
            YBarrel => self.barrel(u, v, [X, Z], [Y, W]),
            ZBarrel => self.barrel(u, v, [X, Y], [Z, W]),
            NotchedYBarrel => self.notched(u, v, X, Z, [Y, W]),
            NotchedZBarrel => self.notched(u, v, X, Y, [Z, W]),
            XyZwTorus => self.torus(u, v, self.a, [X, Y], [Z, W]),
            XzYwTorus => self.torus(u, v, self.b, [X, Z], [Y, W]),
            XyCircle => circle(u, [X, Y]),
            ZwCircle => circle(u, [Z, W]),
            XzCircle => circle(u, [X, Z]),
            YwCircle => circle(u, [Y, W]),
        };
        let s = mad4(&t, &self.ev);
        Spin3::from_vector4(&s)
    }

    /// `eval` as an `R⁴`-valued map, e.g. as a Bezier tree source.
    pub fn eval_fn(&self, component: usize) -> impl Fn(f64, f64) -> Vector4<f64> + '_ {
        move |u, v| self.eval(u, v, component).to_vector4()
    }

    #[inline]
    fn k(&self, i: usize) -> f64 {
        self.e[i].abs()
    }

    /// `k_s t_s² = Σ k_i t_i²` over the three `others`, polar axis last.
    fn solitary(&self, u: f64, v: f64, component: usize, s: usize, others: [usize; 3]) -> [f64; 4] {
        let n = sphere(u, v);
        let q = others
            .iter()
            .zip(n)
            .map(|(&i, ni)| self.k(i) * ni * ni)
            .sum::<f64>()
            / self.k(s);
        let r = 1.0 / (1.0 + q).sqrt();
        let mut t = [0.0; 4];
        for (&i, ni) in others.iter().zip(n) {
            t[i] = r * ni;
        }
        t[s] = sign(component) * r * q.sqrt();
        t
    }

    /// `k_n1 t_n1² + k_n2 t_n2² = k_p1 t_p1² + k_p2 t_p2²`.
    fn barrel(&self, u: f64, v: f64, neg: [usize; 2], pos: [usize; 2]) -> [f64; 4] {
        let (st, ct) = (TAU * u).sin_cos();
        let (sp, cp) = (TAU * v).sin_cos();
        let mut t = [0.0; 4];
        t[neg[0]] = ct / self.k(neg[0]).sqrt();
        t[neg[1]] = st / self.k(neg[1]).sqrt();
        t[pos[0]] = cp / self.k(pos[0]).sqrt();
        t[pos[1]] = sp / self.k(pos[1]).sqrt();
        normalized(t)
    }

    /// `k_s t_s² = k_p1 t_p1² + k_p2 t_p2²` with `t_zero` free; the lines
    /// `v = 0` and `v = 1/2` collapse onto `±` the zero axis.
    fn notched(&self, u: f64, v: f64, s: usize, zero: usize, pair: [usize; 2]) -> [f64; 4] {
        let (sp, cp) = (TAU * u).sin_cos();
        let (st, ct) = (TAU * v).sin_cos();
        let d = normalized_3([
            1.0 / self.k(s).sqrt(),
            cp / self.k(pair[0]).sqrt(),
            sp / self.k(pair[1]).sqrt(),
        ]);
        let mut t = [0.0; 4];
        t[s] = st * d[0];
        t[pair[0]] = st * d[1];
        t[pair[1]] = st * d[2];
        t[zero] = ct;
        t
    }

    /// `y, z` free, `|e_x| t_x² = e_w t_w²`; the component picks the sheet.
    fn crossed(&self, u: f64, v: f64, component: usize) -> [f64; 4] {
        let n = sphere(u, v);
        let (kx, kw) = (self.k(X), self.k(W));
        let mut t = [0.0; 4];
        t[Y] = n[0];
        t[Z] = n[1];
        t[X] = n[2] * (kw / (kx + kw)).sqrt();
        t[W] = sign(component) * n[2] * (kx / (kx + kw)).sqrt();
        t
    }

    /// Clifford torus: the `lo` plane has eigenvalue `c − r`, `hi` has `c + r`.
    fn torus(&self, u: f64, v: f64, r: f64, lo: [usize; 2], hi: [usize; 2]) -> [f64; 4] {
        let r1 = ((self.c + r) / (2.0 * r)).clamp(0.0, 1.0).sqrt();
        let r2 = ((r - self.c) / (2.0 * r)).clamp(0.0, 1.0).sqrt();
        let (st, ct) = (TAU * u).sin_cos();
        let (sp, cp) = (TAU * v).sin_cos();
        let mut t = [0.0; 4];
        t[lo[0]] = r1 * ct;
        t[lo[1]] = r1 * st;
        t[hi[0]] = r2 * cp;
        t[hi[1]] = r2 * sp;
        t
    }
}

fn circle(u: f64, plane: [usize; 2]) -> [f64; 4] {
    let (s, c) = (TAU * u).sin_cos();
    let mut t = [0.0; 4];
    t[plane[0]] = c;
    t[plane[1]] = s;
    t
}

fn normalized(t: [f64; 4]) -> [f64; 4] {
    let len = t.iter().map(|x| x * x).sum::<f64>().sqrt();
    t.map(|x| x / len)
}

fn normalized_3(t: [f64; 3]) -> [f64; 3] {
    let len = t.iter().map(|x| x * x).sum::<f64>().sqrt();
    t.map(|x| x / len)
}
