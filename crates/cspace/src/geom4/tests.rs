use nalgebra::{Matrix4, Vector4};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::special::hypercube_vertices;
use super::*;

fn unit_cube() -> Hull4 {
    Hull4::from_points(&hypercube_vertices(Vector4::zeros(), 1.0))
}

fn shifted_cube(dx: f64) -> Hull4 {
    Hull4::from_points(&hypercube_vertices(Vector4::new(dx, 0.0, 0.0, 0.0), 1.0))
}

#[test]
fn hypercube_measures() {
    let h = unit_cube();
    assert_eq!(h.h.len(), 8);
    assert_eq!(h.v.len(), 16);
    assert!((h.vol - 1.0).abs() < 1e-12, "vol {}", h.vol);
    assert!((h.area - 8.0).abs() < 1e-12, "area {}", h.area);

    let big = Hull4::from_points(&hypercube_vertices(Vector4::new(-1.0, 3.0, 0.5, 2.0), 2.0));
    assert!((big.vol - 16.0).abs() < 1e-9);
    assert!((big.area - 64.0).abs() < 1e-9);
}

#[test]
fn thin_slabs_keep_their_volume() {
    for t in [1e-4, 1e-6] {
        let pts: Vec<_> = hypercube_vertices(Vector4::zeros(), 1.0)
            .into_iter()
            .map(|mut x| {
                x.w *= t;
                x
            })
            .collect();
        let h = Hull4::from_points(&pts);
        assert!(!h.is_flat(), "t={t}");
        assert_eq!(h.h.len(), 8, "t={t}");
        assert_eq!(h.v.len(), 16, "t={t}");
        assert!((h.vol - t).abs() < 1e-6 * t, "t={t} vol {}", h.vol);
        assert!((h.area - (2.0 + 6.0 * t)).abs() < 1e-6, "t={t} area {}", h.area);
        assert!(h.contains(&Vector4::new(0.5, 0.5, 0.5, 0.5 * t)));
    }
}

#[test]
fn simplex_measures() {
    let mut pts = vec![Vector4::<f64>::zeros()];
    for axis in 0..4 {
        let mut e = Vector4::<f64>::zeros();
        e[axis] = 1.0;
        pts.push(e);
    }
    let h = Hull4::from_points(&pts);
    assert_eq!(h.h.len(), 5);
    assert_eq!(h.v.len(), 5);
    assert!((h.vol - 1.0 / 24.0).abs() < 1e-12);
    // Four coordinate tetrahedra (1/6) plus the slanted one (1/3).
    assert!((h.area - 1.0).abs() < 1e-12);
}

#[test]
fn interior_and_duplicate_points_are_dropped() {
    let mut pts = hypercube_vertices(Vector4::zeros(), 1.0);
    pts.push(Vector4::repeat(0.5));
    pts.push(Vector4::new(0.5, 0.5, 0.0, 0.5));
    let dup = pts[3];
    pts.push(dup);
    let h = Hull4::from_points(&pts);
    assert_eq!(h.v.len(), 16);
    assert!(!h.v.contains(&Vector4::repeat(0.5)));
    assert!((h.vol - 1.0).abs() < 1e-12);
    assert!((h.area - 8.0).abs() < 1e-12);
}

#[test]
fn product_of_triangles() {
    // Control net of (u, v, u², v²) on the unit square.
    let tri = [(0.0, 0.0), (0.5, 0.0), (1.0, 1.0)];
    let mut pts = Vec::new();
    for (x, xx) in tri {
        for (y, yy) in tri {
            pts.push(Vector4::new(x, y, xx, yy));
        }
    }
    let h = Hull4::from_points(&pts);
    assert_eq!(h.v.len(), 9);
    assert_eq!(h.h.len(), 6);
    assert!((h.vol - 0.0625).abs() < 1e-12, "vol {}", h.vol);
    let perimeter = 0.5 + 1.25f64.sqrt() + 2.0f64.sqrt();
    assert!((h.area - 2.0 * 0.25 * perimeter).abs() < 1e-12, "area {}", h.area);
}

#[test]
fn rotation_preserves_measures() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let m = Matrix4::<f64>::from_fn(|_, _| rng.gen_range(-1.0..1.0));
        let q = m.qr().q();
        let t = Vector4::<f64>::from_fn(|_, _| rng.gen_range(-2.0..2.0));
        let pts: Vec<_> = hypercube_vertices(Vector4::zeros(), 1.0)
            .into_iter()
            .map(|x| q * x + t)
            .collect();
        let h = Hull4::from_points(&pts);
        assert_eq!(h.h.len(), 8);
        assert!((h.vol - 1.0).abs() < 1e-9, "vol {}", h.vol);
        assert!((h.area - 8.0).abs() < 1e-9, "area {}", h.area);
        for p in &h.h {
            assert!((p.n.norm() - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn flat_cloud_has_no_planes() {
    let pts: Vec<_> = hypercube_vertices(Vector4::zeros(), 1.0)
        .into_iter()
        .map(|mut x| {
            x.w = 0.0;
            x
        })
        .collect();
    let h = Hull4::from_points(&pts);
    assert!(h.is_flat());
    assert_eq!(h.v.len(), 8);
    assert_eq!(h.vol, 0.0);
    assert_eq!(h.area, 0.0);
    assert!(!h.contains(&Vector4::zeros()));
    assert!(Hull4::from_points(&pts[..3]).is_flat());
    assert!(Hull4::from_points(&[]).is_flat());
}

#[test]
fn contains_checks_all_planes() {
    let h = unit_cube();
    assert!(h.contains(&Vector4::repeat(0.5)));
    assert!(h.contains(&Vector4::repeat(1.0)));
    assert!(!h.contains(&Vector4::new(0.5, 0.5, 0.5, 1.01)));
}

#[test]
fn hypercube_separation() {
    let a = unit_cube();
    assert!(a.inter(&shifted_cube(0.5)));
    assert!(!a.inter(&shifted_cube(2.0)));
    assert!(!shifted_cube(-2.0).inter(&a));
    // Touching faces count as intersecting.
    assert!(a.inter(&shifted_cube(1.0)));
    assert!(a.inter(&a));
}

#[test]
fn flat_hulls_are_separated_by_the_other_side() {
    let a = unit_cube();
    let square = |dx: f64| {
        Hull4::from_points(&[
            Vector4::new(dx, 0.0, 0.0, 0.0),
            Vector4::new(dx + 1.0, 0.0, 0.0, 0.0),
            Vector4::new(dx, 1.0, 0.0, 0.0),
            Vector4::new(dx + 1.0, 1.0, 0.0, 0.0),
        ])
    };
    assert!(a.inter(&square(0.25)));
    assert!(!a.inter(&square(3.0)));
    // Two flat hulls have no separating facets at all.
    assert!(square(0.0).inter(&square(10.0)));
}

#[test]
fn plane_distance_sign() {
    let p = Plane4::new(Vector4::new(0.0, 0.0, 0.0, 1.0), 2.0);
    assert_eq!(p.distance(&Vector4::new(9.0, 0.0, 0.0, 3.0)), 1.0);
    assert!(p.satisfies(&Vector4::new(9.0, 0.0, 0.0, 2.0)));
    assert!(!p.satisfies(&Vector4::new(0.0, 0.0, 0.0, 2.1)));
}
