//! Triangle against rotating triangle.
//!
//! A fixed triangle `k` and a triangle `a` rotating about the origin touch
//! when an edge of one crosses an edge of the other, or a vertex of one
//! crosses the plane of the other. The edge/edge conditions are screw
//! predicates, the vertex/plane conditions are half-space predicates.

use nalgebra::Vector3;

use super::{PredG, PredH, PredS};
use crate::algebra::Field;

/// Plane `n·x = c` in R³; `distance` is `n·x − c`, scaled by `|n|`.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane3<T: Field> {
    pub n: Vector3<T>,
    pub c: T,
}

impl<T: Field> Plane3<T> {
    pub fn new(n: Vector3<T>, c: T) -> Self {
        Self { n, c }
    }

    /// Plane through the triangle, normal `(t1−t0)×(t2−t0)`.
    pub fn through(t: &[Vector3<T>; 3]) -> Self {
        let n = (&t[1] - &t[0]).cross(&(&t[2] - &t[0]));
        let c = n.dot(&t[0]);
        Self { n, c }
    }

    #[inline]
    pub fn distance(&self, x: &Vector3<T>) -> T {
        self.n.dot(x) - self.c.clone()
    }
}

/// Fixed triangle `k` and rotating triangle `a` (vertex order sets the
/// orientation of both planes).
#[derive(Clone, Debug, PartialEq)]
pub struct PredTT<T: Field> {
    pub k: [Vector3<T>; 3],
    pub a: [Vector3<T>; 3],
}

impl<T: Field> PredTT<T> {
    pub fn new(k: [Vector3<T>; 3], a: [Vector3<T>; 3]) -> Self {
        Self { k, a }
    }

    /// Edge `i` of `k` (from `k[i]` to `k[i+1]`) against edge `j` of `a`,
    /// stored at `3*i + j`.
    ///
    /// Each predicate equals `-det(l−k, rot(a)−k, rot(b)−k)` for the edge
    /// endpoints `k, l` and `a, b`.
    pub fn screws(&self) -> [PredS<T>; 9] {
        std::array::from_fn(|n| self.edge_edge(n / 3, n % 3).to_preds())
    }

    /// General form of the edge pair `(i, j)`.
    pub fn edge_edge(&self, i: usize, j: usize) -> PredG<T> {
        PredG {
            k: self.k[i].clone(),
            l: self.k[(i + 1) % 3].clone(),
            a: self.a[j].clone(),
            b: self.a[(j + 1) % 3].clone(),
            c: T::zero(),
        }
    }

    /// `[fixed plane, moving plane]`, the moving one in body coordinates.
    pub fn planes(&self) -> [Plane3<T>; 2] {
        [Plane3::through(&self.k), Plane3::through(&self.a)]
    }

    /// Vertex/plane predicates: `[0..3]` moving vertex `a[j]` against the fixed
    /// plane, `[3..6]` fixed vertex `k[i]` against the moving plane. Values are
    /// signed distances scaled by the plane normal length.
    pub fn vertex_faces(&self) -> [PredH<T>; 6] {
        let [pk, pa] = self.planes();
        std::array::from_fn(|n| {
            if n < 3 {
                PredH::new(pk.n.clone(), self.a[n].clone(), -pk.c.clone())
            } else {
                PredH::new(self.k[n - 3].clone(), pa.n.clone(), -pa.c.clone())
            }
        })
    }
}
