//! Vector, pin and spin algebra over a generic scalar field.
//!
//! Purpose
//! - One implementation of the thin linear algebra the predicates need,
//!   instantiated for `f64` (production) and `BigRational` (exact cross-checks).
//! - `nalgebra` supplies storage and the basic vector operations; this module
//!   adds the linear combinations (`mad*`), the pin product and spins.
//!
//! Conventions
//! - A pin `(p12, p23, p31, p0)` is a quaternion with scalar part `p0` and
//!   vector part `(p23, p31, p12)`, i.e. `e23 ↔ i`, `e31 ↔ j`, `e12 ↔ k`.
//! - `cl(a, b)` is the product of two vectors: `a∧b` in the bivector slots,
//!   `a·b` in the scalar slot.
//! - Spins act by the sandwich `x ↦ s x s~`, a right-handed rotation.
//! - 4-vectors built from pins use the order `(p12, p23, p31, p0)`.

use nalgebra::{SVector, Scalar, Vector3, Vector4};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Num, NumAssign, Signed};
use thiserror::Error;

use crate::cfg::{EPS_NONZERO, EPS_UNIT};

#[cfg(test)]
mod tests;

/// Exact scalar used for cross-checks.
pub type Exact = BigRational;

/// Scalar field the predicate algebra is generic over.
///
/// `negligible` decides zero tests: a tolerance for `f64`, exact zero for
/// rationals. `negligible_sq` is the same test applied to a squared
/// magnitude, so callers can avoid square roots.
pub trait Field: Scalar + Num + NumAssign + Signed + PartialOrd {
    fn negligible(&self) -> bool;
    fn negligible_sq(&self) -> bool;
    fn to_f64(&self) -> f64;
}

impl Field for f64 {
    #[inline]
    fn negligible(&self) -> bool {
        self.abs() < EPS_NONZERO
    }
    #[inline]
    fn negligible_sq(&self) -> bool {
        self.abs() < EPS_NONZERO * EPS_NONZERO
    }
    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Field for BigRational {
    #[inline]
    fn negligible(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }
    #[inline]
    fn negligible_sq(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }
    fn to_f64(&self) -> f64 {
        num_traits::ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }
}

/// Lifting a float into the rationals failed.
#[derive(Debug, Error, PartialEq)]
pub enum ExactError {
    #[error("cannot represent non-finite value {0} exactly")]
    NonFinite(f64),
}

/// Exact rational with the same value as `x` (every finite double is dyadic).
pub fn to_exact(x: f64) -> Result<Exact, ExactError> {
    BigRational::from_float(x).ok_or(ExactError::NonFinite(x))
}

pub fn vec3_to_exact(v: &Vector3<f64>) -> Result<Vector3<Exact>, ExactError> {
    Ok(Vector3::new(to_exact(v.x)?, to_exact(v.y)?, to_exact(v.z)?))
}

/// Small integer as a field element.
#[inline]
pub fn int<T: Field>(n: i32) -> T {
    let mut acc = T::zero();
    for _ in 0..n.unsigned_abs() {
        acc += T::one();
    }
    if n < 0 {
        -acc
    } else {
        acc
    }
}

#[inline]
pub fn exact_int(n: i64) -> Exact {
    BigRational::from_integer(BigInt::from(n))
}

// ---------------------------------------------------------------------------
// Vector helpers

/// `Σ w[i] * v[i]`.
pub fn mad<T: Field, const D: usize, const N: usize>(
    w: &[T; N],
    v: &[SVector<T, D>; N],
) -> SVector<T, D> {
    let mut acc = SVector::<T, D>::zeros();
    for (wi, vi) in w.iter().zip(v.iter()) {
        acc += vi * wi.clone();
    }
    acc
}

#[inline]
pub fn mad2<T: Field, const D: usize>(
    a: &T,
    x: &SVector<T, D>,
    b: &T,
    y: &SVector<T, D>,
) -> SVector<T, D> {
    mad(&[a.clone(), b.clone()], &[x.clone(), y.clone()])
}

#[inline]
pub fn mad3<T: Field, const D: usize>(
    a: &T,
    x: &SVector<T, D>,
    b: &T,
    y: &SVector<T, D>,
    c: &T,
    z: &SVector<T, D>,
) -> SVector<T, D> {
    mad(&[a.clone(), b.clone(), c.clone()], &[x.clone(), y.clone(), z.clone()])
}

#[inline]
pub fn mad4<T: Field, const D: usize>(w: &[T; 4], v: &[SVector<T, D>; 4]) -> SVector<T, D> {
    mad(w, v)
}

#[inline]
pub fn mad5<T: Field, const D: usize>(w: &[T; 5], v: &[SVector<T, D>; 5]) -> SVector<T, D> {
    mad(w, v)
}

/// Sum of components.
#[inline]
pub fn tr<T: Field, const D: usize>(v: &SVector<T, D>) -> T {
    v.iter().fold(T::zero(), |acc, x| acc + x.clone())
}

#[inline]
pub fn sqlen<T: Field, const D: usize>(v: &SVector<T, D>) -> T {
    v.dot(v)
}

/// Normalize `v`. Panics on a zero-length input: callers guarantee `v != 0`.
pub fn unit<const D: usize>(v: &SVector<f64, D>) -> SVector<f64, D> {
    let len = v.norm();
    assert!(len > 0.0, "unit() of zero-length vector {:?}", v.as_slice());
    v / len
}

/// A non-zero vector orthogonal to `p` (zero iff `p` is zero).
///
/// Crosses `p` with the coordinate axis it has the smallest component along.
pub fn orthogonal<T: Field>(p: &Vector3<T>) -> Vector3<T> {
    let (ax, ay, az) = (p.x.abs(), p.y.abs(), p.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::new(T::one(), T::zero(), T::zero())
    } else if ay <= az {
        Vector3::new(T::zero(), T::one(), T::zero())
    } else {
        Vector3::new(T::zero(), T::zero(), T::one())
    };
    axis.cross(p)
}

// ---------------------------------------------------------------------------
// Pins

/// Bivector plus scalar in 3D (an unnormalized quaternion).
#[derive(Clone, Debug, PartialEq)]
pub struct Pin3<T: Field> {
    pub p12: T,
    pub p23: T,
    pub p31: T,
    pub p0: T,
}

impl<T: Field> Pin3<T> {
    #[inline]
    pub fn new(p12: T, p23: T, p31: T, p0: T) -> Self {
        Self { p12, p23, p31, p0 }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Pure bivector dual to `x` (the quaternion `0 + x`).
    #[inline]
    pub fn from_vector(x: &Vector3<T>) -> Self {
        Self::new(x.z.clone(), x.x.clone(), x.y.clone(), T::zero())
    }

    /// Bivector part as a vector.
    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        Vector3::new(self.p23.clone(), self.p31.clone(), self.p12.clone())
    }

    #[inline]
    pub fn from_vector4(v: &Vector4<T>) -> Self {
        Self::new(v[0].clone(), v[1].clone(), v[2].clone(), v[3].clone())
    }

    #[inline]
    pub fn to_vector4(&self) -> Vector4<T> {
        Vector4::new(
            self.p12.clone(),
            self.p23.clone(),
            self.p31.clone(),
            self.p0.clone(),
        )
    }

    /// Reverse: negates the bivector part.
    #[inline]
    pub fn rev(&self) -> Self {
        Self::new(
            -self.p12.clone(),
            -self.p23.clone(),
            -self.p31.clone(),
            self.p0.clone(),
        )
    }

    #[inline]
    pub fn neg(&self) -> Self {
        Self::new(
            -self.p12.clone(),
            -self.p23.clone(),
            -self.p31.clone(),
            -self.p0.clone(),
        )
    }

    #[inline]
    pub fn add(&self, o: &Self) -> Self {
        Self::new(
            self.p12.clone() + o.p12.clone(),
            self.p23.clone() + o.p23.clone(),
            self.p31.clone() + o.p31.clone(),
            self.p0.clone() + o.p0.clone(),
        )
    }

    #[inline]
    pub fn scale(&self, s: &T) -> Self {
        Self::new(
            self.p12.clone() * s.clone(),
            self.p23.clone() * s.clone(),
            self.p31.clone() * s.clone(),
            self.p0.clone() * s.clone(),
        )
    }

    /// Geometric (quaternion) product `self * o`.
    pub fn mul(&self, o: &Self) -> Self {
        let (aw, ax, ay, az) = (&self.p0, &self.p23, &self.p31, &self.p12);
        let (bw, bx, by, bz) = (&o.p0, &o.p23, &o.p31, &o.p12);
        let w = aw.clone() * bw.clone()
            - ax.clone() * bx.clone()
            - ay.clone() * by.clone()
            - az.clone() * bz.clone();
        let x = aw.clone() * bx.clone() + ax.clone() * bw.clone() + ay.clone() * bz.clone()
            - az.clone() * by.clone();
        let y = aw.clone() * by.clone() - ax.clone() * bz.clone()
            + ay.clone() * bw.clone()
            + az.clone() * bx.clone();
        let z = aw.clone() * bz.clone() + ax.clone() * by.clone() - ay.clone() * bx.clone()
            + az.clone() * bw.clone();
        Self::new(z, x, y, w)
    }

    #[inline]
    pub fn dot(&self, o: &Self) -> T {
        self.p12.clone() * o.p12.clone()
            + self.p23.clone() * o.p23.clone()
            + self.p31.clone() * o.p31.clone()
            + self.p0.clone() * o.p0.clone()
    }

    #[inline]
    pub fn sqlen(&self) -> T {
        self.dot(self)
    }

    /// `self x self~`: rotation of `x` scaled by `|self|²`.
    pub fn sandwich(&self, x: &Vector3<T>) -> Vector3<T> {
        self.mul(&Self::from_vector(x)).mul(&self.rev()).vector()
    }
}

/// Vector product: `(a∧b, a·b)`.
///
/// `p12 = (a×b).z`, `p23 = (a×b).x`, `p31 = (a×b).y`, `p0 = a·b`.
pub fn cl<T: Field>(a: &Vector3<T>, b: &Vector3<T>) -> Pin3<T> {
    let x = a.cross(b);
    Pin3::new(x.z.clone(), x.x.clone(), x.y.clone(), a.dot(b))
}

// ---------------------------------------------------------------------------
// Spins

/// Unit pin: a point of S³ double-covering a rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin3 {
    pub s12: f64,
    pub s23: f64,
    pub s31: f64,
    pub s0: f64,
}

impl Spin3 {
    #[inline]
    pub fn new(s12: f64, s23: f64, s31: f64, s0: f64) -> Self {
        let s = Self { s12, s23, s31, s0 };
        debug_assert!(
            (s.sqlen() - 1.0).abs() <= EPS_UNIT,
            "spin is not unit: |s|² = {} (tol {})",
            s.sqlen(),
            EPS_UNIT
        );
        s
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation by `angle` (radians) about `axis`; `axis` must be non-zero.
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        let n = unit(axis);
        let (s, c) = (0.5 * angle).sin_cos();
        Self::new(n.z * s, n.x * s, n.y * s, c)
    }

    /// From `(s12, s23, s31, s0)`; the input must be a unit vector.
    #[inline]
    pub fn from_vector4(v: &Vector4<f64>) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Normalizes `v` first. Panics on zero input.
    #[inline]
    pub fn normalized(v: &Vector4<f64>) -> Self {
        Self::from_vector4(&unit(v))
    }

    #[inline]
    pub fn to_vector4(&self) -> Vector4<f64> {
        Vector4::new(self.s12, self.s23, self.s31, self.s0)
    }

    #[inline]
    pub fn as_pin(&self) -> Pin3<f64> {
        Pin3::new(self.s12, self.s23, self.s31, self.s0)
    }

    #[inline]
    pub fn sqlen(&self) -> f64 {
        self.s12 * self.s12 + self.s23 * self.s23 + self.s31 * self.s31 + self.s0 * self.s0
    }

    /// Composition: rotate by `o` first, then by `self`.
    pub fn mul(&self, o: &Spin3) -> Spin3 {
        let p = self.as_pin().mul(&o.as_pin());
        Spin3::new(p.p12, p.p23, p.p31, p.p0)
    }

    #[inline]
    pub fn rev(&self) -> Spin3 {
        Spin3::new(-self.s12, -self.s23, -self.s31, self.s0)
    }

    #[inline]
    pub fn rotate(&self, x: &Vector3<f64>) -> Vector3<f64> {
        self.as_pin().sandwich(x)
    }
}
