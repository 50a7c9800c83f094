//! Small utilities: index quadruples, point dedup, planar bases and 2D hull
//! area.

use std::cmp::Ordering;

use nalgebra::{Vector2, Vector4};

/// All `i < j < k < l` below `n`, lexicographic.
pub(crate) fn quadruples(n: usize) -> impl Iterator<Item = [usize; 4]> {
    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| {
            (j + 1..n).flat_map(move |k| (k + 1..n).map(move |l| [i, j, k, l]))
        })
    })
}

fn cmp_lex(a: &Vector4<f64>, b: &Vector4<f64>) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Sort lexicographically and drop points within `tol` of their predecessor.
pub(crate) fn dedup_points_in_place(points: &mut Vec<Vector4<f64>>, tol: f64) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(cmp_lex);
    points.dedup_by(|a, b| (*a - *b).norm() <= tol);
}

pub(crate) fn centroid<'a>(points: impl IntoIterator<Item = &'a Vector4<f64>>) -> Vector4<f64> {
    let mut acc = Vector4::zeros();
    let mut n = 0usize;
    for p in points {
        acc += p;
        n += 1;
    }
    if n == 0 {
        acc
    } else {
        acc / n as f64
    }
}

fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Vector orthogonal to `a, b, c` by cofactor expansion; zero iff they are
/// linearly dependent.
pub(crate) fn cofactor_normal(a: &Vector4<f64>, b: &Vector4<f64>, c: &Vector4<f64>) -> Vector4<f64> {
    Vector4::new(
        det3([[a.y, a.z, a.w], [b.y, b.z, b.w], [c.y, c.z, c.w]]),
        -det3([[a.x, a.z, a.w], [b.x, b.z, b.w], [c.x, c.z, c.w]]),
        det3([[a.x, a.y, a.w], [b.x, b.y, b.w], [c.x, c.y, c.w]]),
        -det3([[a.x, a.y, a.z], [b.x, b.y, b.z], [c.x, c.y, c.z]]),
    )
}

/// Orthonormal basis of the affine plane through `points`, if they span one.
///
/// Candidate directions shorter than `tol` are skipped.
pub(crate) fn plane_basis(points: &[Vector4<f64>], tol: f64) -> Option<[Vector4<f64>; 2]> {
    let p0 = points.first()?;
    // Longest edge from p0 first, then the largest orthogonal remainder.
    let e1 = points
        .iter()
        .map(|p| p - p0)
        .max_by(|a, b| a.norm().partial_cmp(&b.norm()).unwrap_or(Ordering::Equal))?;
    let n1 = e1.norm();
    if n1 <= tol {
        return None;
    }
    let e1 = e1 / n1;
    let e2 = points
        .iter()
        .map(|p| {
            let d = p - p0;
            d - e1 * e1.dot(&d)
        })
        .max_by(|a, b| a.norm().partial_cmp(&b.norm()).unwrap_or(Ordering::Equal))?;
    let n2 = e2.norm();
    if n2 <= tol {
        return None;
    }
    Some([e1, e2 / n2])
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Andrew's monotone chain convex hull, CCW, collinear points dropped.
pub(crate) fn convex_hull_2d(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Area of the convex hull of `points` (shoelace over the CCW hull).
pub(crate) fn hull_area_2d(points: &[Vector2<f64>]) -> f64 {
    let hull = convex_hull_2d(points);
    if hull.len() < 3 {
        return 0.0;
    }
    let twice: f64 = (0..hull.len())
        .map(|i| {
            let (a, b) = (hull[i], hull[(i + 1) % hull.len()]);
            a.x * b.y - a.y * b.x
        })
        .sum();
    0.5 * twice.abs()
}
