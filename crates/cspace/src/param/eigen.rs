//! Closed-form eigenvectors of the spin-quadric.
//!
//! With unit pure quaternions `p̂, q̂, û, v̂`, `A g = p̂ g q̂` and `B g = û g v̂`
//! are commuting involutions. The joint projector onto `A = σ1, B = σ2` is
//! `(1 + σ1 A)(1 + σ2 B) / 4`, so
//!
//! `w = g + σ1 p̂gq̂ + σ2 ûgv̂ + σ1σ2 p̂ûgv̂q̂`
//!
//! lies in that eigenspace for any pin `g`, with `|w|² = 4⟨g, w⟩`. The
//! eigenspaces are one-dimensional in the ellipsoidal case. In the toroidal
//! case only one involution is present; its eigenspaces are two-dimensional
//! and `x ↦ p̂x` maps each onto itself with `⟨x, p̂x⟩ = 0`, which supplies the
//! second basis vector.
//!
//! The unit pin is the preferred `g`. When its weight `⟨1, w⟩` drops below
//! `PIVOT_MIN` the bivector basis pin with the largest weight is used
//! instead; the weights sum to the projector trace, so one of them is at
//! least `1`.

use nalgebra::{Vector3, Vector4};
use tracing::trace;

use crate::algebra::{unit, Pin3};
use crate::cfg::PIVOT_MIN;

/// `1, e23, e31, e12`.
fn basis() -> [Pin3<f64>; 4] {
    [
        Pin3::one(),
        Pin3::new(0.0, 1.0, 0.0, 0.0),
        Pin3::new(0.0, 0.0, 1.0, 0.0),
        Pin3::new(1.0, 0.0, 0.0, 0.0),
    ]
}

/// Projector image `w` and weight `⟨g, w⟩` for the best pivot `g`.
fn pivoted(project: impl Fn(&Pin3<f64>) -> Pin3<f64>) -> (Pin3<f64>, f64) {
    let one = Pin3::one();
    let w = project(&one);
    if w.p0 >= PIVOT_MIN {
        let weight = w.p0;
        return (w, weight);
    }
    let w0 = w.p0;
    trace!(weight = w0, "eigenvector pivot leaves the unit pin");
    basis()
        .iter()
        .skip(1)
        .map(|g| {
            let w = project(g);
            let weight = g.dot(&w);
            (w, weight)
        })
        .fold((w, w0), |best, cand| {
            if cand.1 > best.1 {
                cand
            } else {
                best
            }
        })
}

fn pure_unit(x: &Vector3<f64>) -> Pin3<f64> {
    Pin3::from_vector(&unit(x))
}

/// `g + s1 x g y`.
fn sandwich_sum(g: &Pin3<f64>, x: &Pin3<f64>, y: &Pin3<f64>, s1: f64) -> Pin3<f64> {
    g.add(&x.mul(g).mul(y).scale(&s1))
}

/// Four eigenvectors, signs `(++, +−, −+, −−)` of `(A, B)`.
pub(super) fn ellipsoidal(
    p: &Vector3<f64>,
    q: &Vector3<f64>,
    u: &Vector3<f64>,
    v: &Vector3<f64>,
) -> [Vector4<f64>; 4] {
    let (ph, qh, uh, vh) = (pure_unit(p), pure_unit(q), pure_unit(u), pure_unit(v));
    let signs = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];
    signs.map(|(s1, s2)| {
        let (w, weight) = pivoted(|g| {
            // (1 + σ2 B) g, then (1 + σ1 A) of that.
            let h = sandwich_sum(g, &uh, &vh, s2);
            sandwich_sum(&h, &ph, &qh, s1)
        });
        w.scale(&(0.5 / weight.max(0.0).sqrt())).to_vector4()
    })
}

/// One unit vector of the `σ` eigenspace of `x ↦ m̂ x n̂`.
fn toroidal_seed(mh: &Pin3<f64>, nh: &Pin3<f64>, s: f64) -> Pin3<f64> {
    let (w, weight) = pivoted(|g| sandwich_sum(g, mh, nh, s));
    w.scale(&(1.0 / (2.0 * weight.max(0.0)).sqrt()))
}

/// `b ≈ 0`: eigenspaces of `A`. Order `[e(+), p̂e(+), e(−), p̂e(−)]`.
pub(super) fn toroidal_pq(p: &Vector3<f64>, q: &Vector3<f64>) -> [Vector4<f64>; 4] {
    let (ph, qh) = (pure_unit(p), pure_unit(q));
    let ep = toroidal_seed(&ph, &qh, 1.0);
    let em = toroidal_seed(&ph, &qh, -1.0);
    [
        ep.to_vector4(),
        ph.mul(&ep).to_vector4(),
        em.to_vector4(),
        ph.mul(&em).to_vector4(),
    ]
}

/// `a ≈ 0`: eigenspaces of `B`. Order `[e(+), e(−), ûe(+), ûe(−)]`.
pub(super) fn toroidal_uv(u: &Vector3<f64>, v: &Vector3<f64>) -> [Vector4<f64>; 4] {
    let (uh, vh) = (pure_unit(u), pure_unit(v));
    let ep = toroidal_seed(&uh, &vh, 1.0);
    let em = toroidal_seed(&uh, &vh, -1.0);
    [
        ep.to_vector4(),
        em.to_vector4(),
        uh.mul(&ep).to_vector4(),
        uh.mul(&em).to_vector4(),
    ]
}
