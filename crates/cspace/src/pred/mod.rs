//! Contact predicates over rotations.
//!
//! Purpose
//! - A predicate is a scalar function of a rotation whose zero-set bounds a
//!   configuration-space obstacle. Three families are carried:
//!   - `PredH`: `p·rot(q) + c`, a rotating point against a fixed plane.
//!   - `PredS`: `p·rot(q) + u·rot(v) + c` with `p ⟂ u` and `q ⟂ v`, an edge
//!     against an edge (screw form).
//!   - `PredG`: the general form with support vectors `k, l, a, b`:
//!     `(k×l)·rot(a−b) + (k−l)·rot(a×b) + c`.
//! - Everything converts to `PredG`, which is what the quadric builder and the
//!   classifier consume.
//!
//! Conventions
//! - All types are generic over `Field` (`f64` or exact rationals). Zero tests
//!   go through `Field::negligible*`, so the exact instantiation takes the
//!   degenerate branches only for exact zeros.
//! - `eval_pin` is homogeneous of degree two: `c` is weighted by `|s|²`, so it
//!   is exact for any pin, not only unit spins.

use nalgebra::Vector3;
use rand::Rng;

use crate::algebra::{
    orthogonal, sqlen, to_exact, vec3_to_exact, Exact, ExactError, Field, Pin3, Spin3,
};

pub mod golden;
mod tt;

pub use tt::{Plane3, PredTT};


/// Which support products of a `PredG` vanish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredGType {
    /// `|P||Q| ≈ 0` and `|U||V| ≈ 0`: constant on S³.
    Improper,
    /// Both products non-zero.
    Ellipsoidal,
    /// Exactly one product non-zero.
    Toroidal,
}

/// General predicate `(k×l)·rot(a−b) + (k−l)·rot(a×b) + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredG<T: Field> {
    pub k: Vector3<T>,
    pub l: Vector3<T>,
    pub a: Vector3<T>,
    pub b: Vector3<T>,
    pub c: T,
}

impl<T: Field> PredG<T> {
    pub fn new(k: Vector3<T>, l: Vector3<T>, a: Vector3<T>, b: Vector3<T>, c: T) -> Self {
        Self { k, l, a, b, c }
    }

    /// `P = k×l`.
    #[inline]
    pub fn p(&self) -> Vector3<T> {
        self.k.cross(&self.l)
    }
    /// `Q = a−b`.
    #[inline]
    pub fn q(&self) -> Vector3<T> {
        &self.a - &self.b
    }
    /// `U = k−l`.
    #[inline]
    pub fn u(&self) -> Vector3<T> {
        &self.k - &self.l
    }
    /// `V = a×b`.
    #[inline]
    pub fn v(&self) -> Vector3<T> {
        self.a.cross(&self.b)
    }

    /// Squared support products `(|P|²|Q|², |U|²|V|²)`.
    pub fn support_sq(&self) -> (T, T) {
        let a2 = sqlen(&self.p()) * sqlen(&self.q());
        let b2 = sqlen(&self.u()) * sqlen(&self.v());
        (a2, b2)
    }

    pub fn kind(&self) -> PredGType {
        let (a2, b2) = self.support_sq();
        match (a2.negligible_sq(), b2.negligible_sq()) {
            (true, true) => PredGType::Improper,
            (false, false) => PredGType::Ellipsoidal,
            _ => PredGType::Toroidal,
        }
    }

    /// Screw form `P·rot(Q) + U·rot(V) + c`.
    pub fn to_preds(&self) -> PredS<T> {
        PredS {
            p: self.p(),
            q: self.q(),
            u: self.u(),
            v: self.v(),
            c: self.c.clone(),
        }
    }

    /// Homogeneous value `P·(s Q s~) + U·(s V s~) + c|s|²`.
    pub fn eval_pin(&self, s: &Pin3<T>) -> T {
        let pq = self.p().dot(&s.sandwich(&self.q()));
        let uv = self.u().dot(&s.sandwich(&self.v()));
        pq + uv + self.c.clone() * s.sqlen()
    }

    /// Same predicate with every coordinate mapped through `f`.
    pub fn map<S: Field>(&self, f: impl Fn(&T) -> S) -> PredG<S> {
        let m = |v: &Vector3<T>| Vector3::new(f(&v.x), f(&v.y), f(&v.z));
        PredG {
            k: m(&self.k),
            l: m(&self.l),
            a: m(&self.a),
            b: m(&self.b),
            c: f(&self.c),
        }
    }
}

impl PredG<f64> {
    /// Value at a rotation.
    #[inline]
    pub fn eval(&self, s: &Spin3) -> f64 {
        self.eval_pin(&s.as_pin())
    }

    /// Support magnitudes `(a, b) = (|P||Q|, |U||V|)`.
    pub fn support(&self) -> (f64, f64) {
        let (a2, b2) = self.support_sq();
        (a2.sqrt(), b2.sqrt())
    }

    /// Exact copy; every finite `f64` is a rational.
    pub fn to_exact(&self) -> Result<PredG<Exact>, ExactError> {
        Ok(PredG {
            k: vec3_to_exact(&self.k)?,
            l: vec3_to_exact(&self.l)?,
            a: vec3_to_exact(&self.a)?,
            b: vec3_to_exact(&self.b)?,
            c: to_exact(self.c)?,
        })
    }
}

/// Half-space predicate `p·rot(q) + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredH<T: Field> {
    pub p: Vector3<T>,
    pub q: Vector3<T>,
    pub c: T,
}

impl<T: Field> PredH<T> {
    pub fn new(p: Vector3<T>, q: Vector3<T>, c: T) -> Self {
        Self { p, q, c }
    }

    pub fn eval_pin(&self, s: &Pin3<T>) -> T {
        self.p.dot(&s.sandwich(&self.q)) + self.c.clone() * s.sqlen()
    }

    /// Equivalent general predicate: `a = q`, `b = 0`, and `k, l` with
    /// `k×l = p`.
    pub fn to_predg(&self) -> PredG<T> {
        let (k, l) = split_cross(&self.p);
        PredG {
            k,
            l,
            a: self.q.clone(),
            b: Vector3::zeros(),
            c: self.c.clone(),
        }
    }
}

impl PredH<f64> {
    #[inline]
    pub fn eval(&self, s: &Spin3) -> f64 {
        self.eval_pin(&s.as_pin())
    }
}

/// Screw predicate `p·rot(q) + u·rot(v) + c` with `p ⟂ u`, `q ⟂ v`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredS<T: Field> {
    pub p: Vector3<T>,
    pub q: Vector3<T>,
    pub u: Vector3<T>,
    pub v: Vector3<T>,
    pub c: T,
}

impl<T: Field> PredS<T> {
    pub fn new(p: Vector3<T>, q: Vector3<T>, u: Vector3<T>, v: Vector3<T>, c: T) -> Self {
        let s = Self { p, q, u, v, c };
        debug_assert!(
            s.p.dot(&s.u).negligible() && s.q.dot(&s.v).negligible(),
            "screw predicate needs p ⟂ u and q ⟂ v: {:?}",
            s
        );
        s
    }

    pub fn eval_pin(&self, s: &Pin3<T>) -> T {
        self.p.dot(&s.sandwich(&self.q))
            + self.u.dot(&s.sandwich(&self.v))
            + self.c.clone() * s.sqlen()
    }

    /// Recover support vectors.
    ///
    /// Generic case: `k = p×u/|u|²`, `l = k−u`, `b = v×q/|q|²`, `a = b+q`.
    /// A negligible `u` drops the `u·rot(v)` term, a negligible `q` drops
    /// the `p·rot(q)` term.
    pub fn to_predg(&self) -> PredG<T> {
        let uu = sqlen(&self.u);
        let qq = sqlen(&self.q);
        if uu.negligible_sq() {
            let (k, l) = split_cross(&self.p);
            return PredG {
                k,
                l,
                a: self.q.clone(),
                b: Vector3::zeros(),
                c: self.c.clone(),
            };
        }
        if qq.negligible_sq() {
            let (a, b) = split_cross(&self.v);
            return PredG {
                k: self.u.clone(),
                l: Vector3::zeros(),
                a,
                b,
                c: self.c.clone(),
            };
        }
        let k = self.p.cross(&self.u) / uu;
        let l = &k - &self.u;
        let b = self.v.cross(&self.q) / qq;
        let a = &b + &self.q;
        PredG {
            k,
            l,
            a,
            b,
            c: self.c.clone(),
        }
    }
}

impl PredS<f64> {
    #[inline]
    pub fn eval(&self, s: &Spin3) -> f64 {
        self.eval_pin(&s.as_pin())
    }
}

/// Two vectors `(x, y)` with `x×y = p`; both zero when `p` is.
fn split_cross<T: Field>(p: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let e = orthogonal(p);
    let ee = sqlen(&e);
    if ee.is_zero() {
        return (Vector3::zeros(), Vector3::zeros());
    }
    let y = p.cross(&e) / ee;
    (e, y)
}

/// Random general predicate with every coordinate and `c` in `[-range, range)`.
pub fn random_predg<R: Rng + ?Sized>(rng: &mut R, range: f64) -> PredG<f64> {
    let mut v = || {
        Vector3::new(
            rng.gen_range(-range..range),
            rng.gen_range(-range..range),
            rng.gen_range(-range..range),
        )
    };
    let (k, l, a, b) = (v(), v(), v(), v());
    let c = rng.gen_range(-range..range);
    PredG { k, l, a, b, c }
}

/// Uniform random spin: rejection sample from the unit ball, normalized.
pub fn random_spin<R: Rng + ?Sized>(rng: &mut R) -> Spin3 {
    loop {
        let v = nalgebra::Vector4::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let n2: f64 = v.norm_squared();
        if n2 > 1e-6 && n2 <= 1.0 {
            return Spin3::from_vector4(&(v / n2.sqrt()));
        }
    }
}
