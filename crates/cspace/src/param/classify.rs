//! `(a, b, c)` → case.
//!
//! Breakpoints for `c` are `±(a+b)` and `±|a−b|` (ellipsoidal) or `±r`
//! (toroidal, `r` the surviving support). Equality is tested first with
//! `EPS_CASE`, so a value at a breakpoint always takes the exact case.
//! `classify_sq` makes the same decisions from squared magnitudes, exactly
//! when the scalar is rational.

use std::cmp::Ordering;

use super::PredGParamType::{self, *};
use crate::algebra::{int, Field};
use crate::cfg::EPS_CASE;

#[inline]
fn near(x: f64, y: f64) -> bool {
    (x - y).abs() < EPS_CASE
}

/// Case of the zero-set of a predicate with support magnitudes `a = |P||Q|`,
/// `b = |U||V|` and offset `c`. Total over `ℝ³`.
pub fn classify(a: f64, b: f64, c: f64) -> PredGParamType {
    match (a.negligible(), b.negligible()) {
        (true, true) => EmptySet,
        (false, true) => toroidal(a, c, XyCircle, ZwCircle, XyZwTorus),
        (true, false) => toroidal(b, c, XzCircle, YwCircle, XzYwTorus),
        (false, false) => ellipsoidal(a, b, c),
    }
}

fn toroidal(
    r: f64,
    c: f64,
    upper: PredGParamType,
    lower: PredGParamType,
    torus: PredGParamType,
) -> PredGParamType {
    if near(c, r) {
        upper
    } else if near(c, -r) {
        lower
    } else if c.abs() > r {
        EmptySet
    } else {
        torus
    }
}

fn ellipsoidal(a: f64, b: f64, c: f64) -> PredGParamType {
    let t = a + b;
    if near(c, t) || near(c, -t) {
        return PairOfPoints;
    }
    if c.abs() > t {
        return EmptySet;
    }
    if near(a, b) {
        return if near(c, 0.0) {
            PairOfYzCrossedEllipsoids
        } else if c < 0.0 {
            PairOfSeparateEllipsoids
        } else {
            PairOfSeparateYzCaps
        };
    }
    let (d, touching, notched, barrel) = if a < b {
        (b - a, PairOfYTouchingEllipsoids, NotchedYBarrel, YBarrel)
    } else {
        (a - b, PairOfZTouchingEllipsoids, NotchedZBarrel, ZBarrel)
    };
    if near(c, -d) {
        touching
    } else if near(c, d) {
        notched
    } else if c < -d {
        PairOfSeparateEllipsoids
    } else if c < d {
        barrel
    } else {
        PairOfSeparateYzCaps
    }
}

/// `classify` from the squared magnitudes `a2 = |P|²|Q|²`, `b2 = |U|²|V|²`,
/// decided by sign tests without square roots.
///
/// Over exact rationals a breakpoint is taken only on exact equality, which
/// makes this the reference for degenerate inputs. Over `f64` there is no
/// `EPS_CASE` snapping; prefer `classify` there.
pub fn classify_sq<T: Field>(a2: &T, b2: &T, c: &T) -> PredGParamType {
    match (a2.negligible_sq(), b2.negligible_sq()) {
        (true, true) => EmptySet,
        (false, true) => toroidal_sq(a2, c, XyCircle, ZwCircle, XyZwTorus),
        (true, false) => toroidal_sq(b2, c, XzCircle, YwCircle, XzYwTorus),
        (false, false) => ellipsoidal_sq(a2, b2, c),
    }
}

#[inline]
fn sign<T: Field>(x: &T) -> Ordering {
    x.partial_cmp(&T::zero()).unwrap_or(Ordering::Equal)
}

fn toroidal_sq<T: Field>(
    r2: &T,
    c: &T,
    upper: PredGParamType,
    lower: PredGParamType,
    torus: PredGParamType,
) -> PredGParamType {
    match (sign(&(c.clone() * c.clone() - r2.clone())), sign(c)) {
        (Ordering::Greater, _) => EmptySet,
        (Ordering::Equal, Ordering::Greater) => upper,
        (Ordering::Equal, _) => lower,
        (Ordering::Less, _) => torus,
    }
}

fn ellipsoidal_sq<T: Field>(a2: &T, b2: &T, c: &T) -> PredGParamType {
    // c² − (a ± b)² = m ∓ 2ab, and (2ab)² = 4·a2·b2.
    let m = c.clone() * c.clone() - a2.clone() - b2.clone();
    let m2 = m.clone() * m.clone();
    let p4 = int::<T>(4) * a2.clone() * b2.clone();
    let outer = match sign(&m) {
        Ordering::Less => Ordering::Less,
        _ => sign(&(m2.clone() - p4.clone())),
    };
    match outer {
        Ordering::Equal => return PairOfPoints,
        Ordering::Greater => return EmptySet,
        Ordering::Less => {}
    }
    let ab = sign(&(a2.clone() - b2.clone()));
    if ab == Ordering::Equal {
        return match sign(c) {
            Ordering::Equal => PairOfYzCrossedEllipsoids,
            Ordering::Less => PairOfSeparateEllipsoids,
            Ordering::Greater => PairOfSeparateYzCaps,
        };
    }
    let inner = match sign(&m) {
        Ordering::Greater => Ordering::Greater,
        Ordering::Equal => sign(&p4),
        Ordering::Less => sign(&(p4 - m2)),
    };
    let (touching, notched, barrel) = if ab == Ordering::Less {
        (PairOfYTouchingEllipsoids, NotchedYBarrel, YBarrel)
    } else {
        (PairOfZTouchingEllipsoids, NotchedZBarrel, ZBarrel)
    };
    match (inner, sign(c)) {
        (Ordering::Less, _) => barrel,
        (Ordering::Equal, Ordering::Less) => touching,
        (Ordering::Equal, _) => notched,
        (Ordering::Greater, Ordering::Less) => PairOfSeparateEllipsoids,
        (Ordering::Greater, _) => PairOfSeparateYzCaps,
    }
}
