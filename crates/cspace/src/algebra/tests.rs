use super::*;
use nalgebra::{Vector3, Vector4};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn rv3(rng: &mut StdRng) -> Vector3<f64> {
    Vector3::new(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

#[test]
fn cl_matches_cross_and_dot() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = rv3(&mut rng);
        let b = rv3(&mut rng);
        let p = cl(&a, &b);
        let x = a.cross(&b);
        assert!((p.p0 - a.dot(&b)).abs() < 1e-8);
        assert!((p.p12 - x.z).abs() < 1e-8);
        assert!((p.p23 - x.x).abs() < 1e-8);
        assert!((p.p31 - x.y).abs() < 1e-8);
        // Explicit component formulas.
        assert!((p.p12 - (a.x * b.y - a.y * b.x)).abs() < 1e-8);
        assert!((p.p23 - (a.y * b.z - a.z * b.y)).abs() < 1e-8);
        assert!((p.p31 - (a.z * b.x - a.x * b.z)).abs() < 1e-8);
    }
}

#[test]
fn cl_is_reversed_vector_product_exactly() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let a = vec3_to_exact(&rv3(&mut rng)).unwrap();
        let b = vec3_to_exact(&rv3(&mut rng)).unwrap();
        let lhs = cl(&a, &b);
        let rhs = Pin3::from_vector(&b).mul(&Pin3::from_vector(&a)).neg();
        assert_eq!(lhs, rhs);
        let x = a.cross(&b);
        assert_eq!(lhs.p0, a.dot(&b));
        assert_eq!(lhs.p12, x.z);
        assert_eq!(lhs.p23, x.x);
        assert_eq!(lhs.p31, x.y);
    }
}

#[test]
fn pin_basis_follows_quaternion_rules() {
    let i = Pin3::<f64>::new(0.0, 1.0, 0.0, 0.0);
    let j = Pin3::<f64>::new(0.0, 0.0, 1.0, 0.0);
    let k = Pin3::<f64>::new(1.0, 0.0, 0.0, 0.0);
    assert_eq!(i.mul(&j), k);
    assert_eq!(j.mul(&k), i);
    assert_eq!(k.mul(&i), j);
    assert_eq!(i.mul(&i), Pin3::one().neg());
    assert_eq!(i.mul(&j).mul(&k), Pin3::one().neg());
}

#[test]
fn sandwich_scales_by_sqlen() {
    let p = Pin3::new(exact_int(2), exact_int(-1), exact_int(3), exact_int(1));
    let x = Vector3::new(exact_int(1), exact_int(-2), exact_int(5));
    let y = p.sandwich(&x);
    assert_eq!(y.dot(&y), p.sqlen() * p.sqlen() * x.dot(&x));
}

#[test]
fn axis_angle_rotates_right_handed() {
    let s = Spin3::from_axis_angle(&Vector3::z(), std::f64::consts::FRAC_PI_2);
    let y = s.rotate(&Vector3::x());
    assert!((y - Vector3::y()).norm() < 1e-12, "{y:?}");
    let s = Spin3::from_axis_angle(&Vector3::x(), std::f64::consts::FRAC_PI_2);
    let z = s.rotate(&Vector3::y());
    assert!((z - Vector3::z()).norm() < 1e-12, "{z:?}");
}

#[test]
fn spin_composition_matches_sequential_rotation() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let s = Spin3::from_axis_angle(&rv3(&mut rng), rng.gen_range(-3.0..3.0));
        let t = Spin3::from_axis_angle(&rv3(&mut rng), rng.gen_range(-3.0..3.0));
        let x = rv3(&mut rng);
        let lhs = s.mul(&t).rotate(&x);
        let rhs = s.rotate(&t.rotate(&x));
        assert!((lhs - rhs).norm() < 1e-9);
        assert!((s.rev().rotate(&s.rotate(&x)) - x).norm() < 1e-9);
    }
}

#[test]
fn vector4_round_trip_keeps_order() {
    let v = Vector4::new(0.5, 0.5, 0.5, 0.5);
    let s = Spin3::from_vector4(&v);
    assert_eq!(s.s12, 0.5);
    assert_eq!(s.to_vector4(), v);
    assert_eq!(s.as_pin().to_vector4(), v);
}

#[test]
fn mad_chains_and_trace() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(-1.0, 0.0, 1.0);
    let c = Vector3::new(0.0, 1.0, 0.0);
    assert_eq!(mad2(&2.0, &a, &3.0, &b), Vector3::new(-1.0, 4.0, 9.0));
    assert_eq!(mad3(&1.0, &a, &1.0, &b, &-2.0, &c), Vector3::new(0.0, 0.0, 4.0));
    let e = [
        Vector4::x(),
        Vector4::y(),
        Vector4::z(),
        Vector4::w(),
        Vector4::repeat(1.0),
    ];
    assert_eq!(
        mad5(&[1.0, 2.0, 3.0, 4.0, 1.0], &e),
        Vector4::new(2.0, 3.0, 4.0, 5.0)
    );
    assert_eq!(
        mad4(&[1.0, 2.0, 3.0, 4.0], &[e[0], e[1], e[2], e[3]]),
        Vector4::new(1.0, 2.0, 3.0, 4.0)
    );
    assert_eq!(tr(&a), 6.0);
    assert_eq!(tr(&Vector3::new(exact_int(1), exact_int(2), exact_int(-4))), exact_int(-1));
}

#[test]
#[should_panic(expected = "zero-length")]
fn unit_of_zero_panics() {
    let _ = unit(&Vector3::<f64>::zeros());
}

#[test]
fn orthogonal_is_orthogonal_and_nonzero() {
    for p in [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 2.0),
        Vector3::new(1.0, 1e-9, -3.0),
    ] {
        let e = orthogonal(&p);
        assert!(e.dot(&p).abs() < 1e-12);
        assert!(e.norm() > 0.5);
    }
    assert_eq!(orthogonal(&Vector3::<f64>::zeros()), Vector3::zeros());
}

#[test]
fn exact_lift_is_exact() {
    assert_eq!(to_exact(0.5).unwrap(), exact_int(1) / exact_int(2));
    assert!(matches!(to_exact(f64::NAN), Err(ExactError::NonFinite(_))));
    assert!(matches!(to_exact(f64::INFINITY), Err(ExactError::NonFinite(_))));
    assert_eq!(int::<Exact>(-3), exact_int(-3));
    assert_eq!(int::<f64>(4), 4.0);
}

proptest! {
    #[test]
    fn pin_product_is_multiplicative_in_norm(
        a in prop::array::uniform4(-5.0f64..5.0),
        b in prop::array::uniform4(-5.0f64..5.0),
    ) {
        let p = Pin3::new(a[0], a[1], a[2], a[3]);
        let q = Pin3::new(b[0], b[1], b[2], b[3]);
        let lhs = p.mul(&q).sqlen();
        let rhs = p.sqlen() * q.sqlen();
        prop_assert!((lhs - rhs).abs() <= 1e-9 * (1.0 + rhs));
    }
}
