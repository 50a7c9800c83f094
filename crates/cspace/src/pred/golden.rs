//! Named predicates, one per parametrization case.
//!
//! Support vectors are small integer multiples of a fixed frame, then rotated
//! by two fixed rational spins so that no eigenvector lines up with a
//! coordinate axis. With `k = (1,1,0)`, `l = (1,−1,0)`, `a = s(1,1,0)`,
//! `b = s(1,−1,0)` the support magnitudes are `|P||Q| = 4s`, `|U||V| = 4s²`.

use nalgebra::Vector3;

use super::PredG;
use crate::algebra::Spin3;
use crate::param::PredGParamType;

/// A named predicate and the case it must classify to.
#[derive(Clone, Copy, Debug)]
pub struct Golden {
    pub name: &'static str,
    pub expected: PredGParamType,
    build: fn() -> PredG<f64>,
}

impl Golden {
    pub fn predg(&self) -> PredG<f64> {
        (self.build)()
    }
}

macro_rules! golden {
    ($name:literal, $t:ident, $f:expr) => {
        Golden {
            name: $name,
            expected: PredGParamType::$t,
            build: || $f,
        }
    };
}

pub const GOLDEN: [Golden; 17] = [
    golden!("an_empty_set", EmptySet, ellipsoidal(2.0, 30.0)),
    golden!("a_pair_of_points", PairOfPoints, ellipsoidal(2.0, 24.0)),
    golden!(
        "a_pair_of_separate_ellipsoids",
        PairOfSeparateEllipsoids,
        ellipsoidal(2.0, -16.0)
    ),
    golden!(
        "a_pair_of_y_touching_ellipsoids",
        PairOfYTouchingEllipsoids,
        ellipsoidal(2.0, -8.0)
    ),
    golden!(
        "a_pair_of_yz_crossed_ellipsoids",
        PairOfYzCrossedEllipsoids,
        ellipsoidal(1.0, 0.0)
    ),
    golden!(
        "a_pair_of_z_touching_ellipsoids",
        PairOfZTouchingEllipsoids,
        ellipsoidal(0.5, -1.0)
    ),
    golden!("a_y_barrel", YBarrel, ellipsoidal(2.0, 0.0)),
    golden!("a_z_barrel", ZBarrel, ellipsoidal(0.5, 0.0)),
    golden!("a_notched_y_barrel", NotchedYBarrel, ellipsoidal(2.0, 8.0)),
    golden!("a_notched_z_barrel", NotchedZBarrel, ellipsoidal(0.5, 1.0)),
    golden!(
        "a_pair_of_separate_yz_caps",
        PairOfSeparateYzCaps,
        ellipsoidal(2.0, 16.0)
    ),
    golden!("a_xy_zw_torus", XyZwTorus, toroidal_pq(0.0)),
    golden!("a_xy_circle", XyCircle, toroidal_pq(2.0)),
    golden!("a_zw_circle", ZwCircle, toroidal_pq(-2.0)),
    golden!("a_xz_yw_torus", XzYwTorus, toroidal_uv(0.0)),
    golden!("a_xz_circle", XzCircle, toroidal_uv(2.0)),
    golden!("a_yw_circle", YwCircle, toroidal_uv(-2.0)),
];

/// Look up a golden predicate by name.
pub fn golden(name: &str) -> Option<PredG<f64>> {
    GOLDEN.iter().find(|g| g.name == name).map(Golden::predg)
}

pub fn golden_names() -> impl Iterator<Item = &'static str> {
    GOLDEN.iter().map(|g| g.name)
}

fn frame_k() -> Spin3 {
    Spin3::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 0.0)
}

fn frame_a() -> Spin3 {
    Spin3::new(0.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0)
}

fn rotated(
    k: Vector3<f64>,
    l: Vector3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
    c: f64,
) -> PredG<f64> {
    let (fk, fa) = (frame_k(), frame_a());
    PredG::new(fk.rotate(&k), fk.rotate(&l), fa.rotate(&a), fa.rotate(&b), c)
}

/// `|P||Q| = 4s`, `|U||V| = 4s²`.
fn ellipsoidal(s: f64, c: f64) -> PredG<f64> {
    rotated(
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
        Vector3::new(s, s, 0.0),
        Vector3::new(s, -s, 0.0),
        c,
    )
}

/// `|P||Q| = 2`, `V = 0`.
fn toroidal_pq(c: f64) -> PredG<f64> {
    rotated(
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::zeros(),
        c,
    )
}

/// `P = 0`, `|U||V| = 2`.
fn toroidal_uv(c: f64) -> PredG<f64> {
    rotated(
        Vector3::new(2.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
        c,
    )
}
