//! Convex hull of a point cloud by supporting-plane enumeration.

use nalgebra::{Matrix4, SymmetricEigen, Vector2, Vector4};
use tracing::trace;

use super::cfg::{FEAS_EPS, NORMAL_EPS, RANK_EPS, TIGHT_EPS};
use super::util::{
    centroid, cofactor_normal, dedup_points_in_place, hull_area_2d, plane_basis, quadruples,
};
use super::Plane4;

/// Convex hull of a finite point set in R^4.
///
/// Invariants:
/// - Every point of the input satisfies every plane in `h` within `FEAS_EPS`
///   (relative to the cloud radius).
/// - `v` holds the extreme points (the input points if the hull is flat).
/// - A flat hull (affine rank < 4) has no planes and zero `vol`/`area`.
#[derive(Clone, Debug, Default)]
pub struct Hull4 {
    pub h: Vec<Plane4>,
    pub v: Vec<Vector4<f64>>,
    pub vol: f64,
    pub area: f64,
}

/// Facet candidate: outward plane plus the indices of the points on it.
struct Facet {
    plane: Plane4,
    on: Vec<usize>,
}

impl Hull4 {
    /// Hull of `points`; duplicates and interior points are allowed.
    ///
    /// Complexity: O(N^5) in the number of distinct points. Intended for
    /// small clouds (patch control nets, polytope vertices).
    pub fn from_points(points: &[Vector4<f64>]) -> Self {
        let mut pts = points.to_vec();
        dedup_points_in_place(&mut pts, FEAS_EPS);
        let center = centroid(&pts);
        let radius = pts
            .iter()
            .map(|p| (p - center).norm())
            .fold(0.0_f64, f64::max);
        if pts.len() < 5 || affine_rank(&pts, &center, radius) < 4 {
            trace!(points = pts.len(), "flat hull");
            return Self::flat(pts);
        }
        let facets = supporting_facets(&pts, radius);
        let v = extreme_points(&pts, &facets);
        let apex = centroid(&v);
        let (mut vol, mut area) = (0.0, 0.0);
        for (i, f) in facets.iter().enumerate() {
            let fv = facet_volume(&pts, &facets, i, radius);
            area += fv;
            vol += fv * f.plane.distance(&apex).abs() / 4.0;
        }
        Self {
            h: facets.into_iter().map(|f| f.plane).collect(),
            v,
            vol,
            area,
        }
    }

    fn flat(v: Vec<Vector4<f64>>) -> Self {
        Self {
            h: Vec::new(),
            v,
            vol: 0.0,
            area: 0.0,
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.h.is_empty()
    }

    /// Point-in-hull test within `FEAS_EPS`. Always `false` for flat hulls.
    pub fn contains(&self, x: &Vector4<f64>) -> bool {
        !self.is_flat() && self.h.iter().all(|p| p.satisfies(x))
    }

    /// `false` iff a facet plane of either hull has all vertices of the other
    /// strictly outside (by more than `FEAS_EPS`). Touching hulls intersect.
    pub fn inter(&self, other: &Hull4) -> bool {
        !(separates(self, other) || separates(other, self))
    }
}

/// Some facet of `a` has every vertex of `b` outside.
fn separates(a: &Hull4, b: &Hull4) -> bool {
    a.h.iter()
        .any(|p| b.v.iter().all(|x| p.distance(x) > FEAS_EPS))
}

/// Number of directions in which the cloud's RMS spread about `center`
/// exceeds `RANK_EPS · radius`.
fn affine_rank(pts: &[Vector4<f64>], center: &Vector4<f64>, radius: f64) -> usize {
    if radius <= 0.0 {
        return 0;
    }
    let mut scatter = Matrix4::<f64>::zeros();
    for p in pts {
        let d = p - center;
        scatter += d * d.transpose();
    }
    scatter /= pts.len() as f64;
    let tol = RANK_EPS * radius;
    SymmetricEigen::new(scatter)
        .eigenvalues
        .iter()
        .filter(|&&l| l.max(0.0).sqrt() > tol)
        .count()
}

/// Supporting planes through point quadruples, deduplicated by incidence.
fn supporting_facets(pts: &[Vector4<f64>], radius: f64) -> Vec<Facet> {
    let (feas, tight) = (FEAS_EPS * radius, TIGHT_EPS * radius);
    let mut out: Vec<Facet> = Vec::new();
    for [i, j, k, l] in quadruples(pts.len()) {
        let (a, b, c) = (pts[j] - pts[i], pts[k] - pts[i], pts[l] - pts[i]);
        let n = cofactor_normal(&a, &b, &c);
        let len = n.norm();
        if len <= NORMAL_EPS * a.norm() * b.norm() * c.norm() {
            continue;
        }
        let n = n / len;
        let offset = n.dot(&pts[i]);
        let (mut above, mut below) = (false, false);
        for p in pts {
            let d = n.dot(p) - offset;
            above |= d > feas;
            below |= d < -feas;
            if above && below {
                break;
            }
        }
        let plane = match (above, below) {
            (false, _) => Plane4::new(n, offset),
            (true, false) => Plane4::new(-n, -offset),
            (true, true) => continue,
        };
        let on: Vec<usize> = (0..pts.len())
            .filter(|&m| plane.distance(&pts[m]).abs() <= tight)
            .collect();
        if !out.iter().any(|f| f.on == on) {
            out.push(Facet { plane, on });
        }
    }
    // Planes touching a lower face only are subsumed by a real facet.
    let subsumed: Vec<bool> = out
        .iter()
        .map(|f| {
            out.iter()
                .any(|g| g.on.len() > f.on.len() && f.on.iter().all(|m| g.on.contains(m)))
        })
        .collect();
    out.into_iter()
        .zip(subsumed)
        .filter_map(|(f, s)| (!s).then_some(f))
        .collect()
}

/// Points whose incident facet normals span R^4.
fn extreme_points(pts: &[Vector4<f64>], facets: &[Facet]) -> Vec<Vector4<f64>> {
    pts.iter()
        .enumerate()
        .filter(|(m, _)| {
            let mut gram = Matrix4::<f64>::zeros();
            for f in facets.iter().filter(|f| f.on.contains(m)) {
                gram += f.plane.n * f.plane.n.transpose();
            }
            SymmetricEigen::new(gram).eigenvalues.min() > 1e-9
        })
        .map(|(_, p)| *p)
        .collect()
}

/// 3-volume of facet `i` as a sum of ridge pyramids from the facet centroid.
fn facet_volume(pts: &[Vector4<f64>], facets: &[Facet], i: usize, radius: f64) -> f64 {
    let f = &facets[i];
    let apex = centroid(f.on.iter().map(|&m| &pts[m]));
    let mut ridges: Vec<Vec<usize>> = Vec::new();
    for (j, g) in facets.iter().enumerate() {
        if j == i {
            continue;
        }
        let shared: Vec<usize> = f.on.iter().copied().filter(|m| g.on.contains(m)).collect();
        if shared.len() < 3 || ridges.contains(&shared) {
            continue;
        }
        ridges.push(shared);
    }
    let mut vol = 0.0;
    for ridge in &ridges {
        let rp: Vec<Vector4<f64>> = ridge.iter().map(|&m| pts[m]).collect();
        let Some([e1, e2]) = plane_basis(&rp, FEAS_EPS * radius) else {
            continue;
        };
        let o = rp[0];
        let flat: Vec<Vector2<f64>> = rp
            .iter()
            .map(|p| Vector2::new(e1.dot(&(p - o)), e2.dot(&(p - o))))
            .collect();
        let r = apex - o;
        let height = (r - e1 * e1.dot(&r) - e2 * e2.dot(&r)).norm();
        vol += hull_area_2d(&flat) * height / 3.0;
    }
    vol
}
