use nalgebra::Vector4;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;
use crate::cfg::TreeCfg;
use crate::pred::golden::golden;

fn parabolas(u: f64, v: f64) -> Vector4<f64> {
    Vector4::new(u, v, u * u, v * v)
}

fn biquadratic(u: f64, v: f64) -> Vector4<f64> {
    Vector4::new(u * v, u * u * v, u * v * v, u * u * v * v)
}

fn samples(f: impl Fn(f64, f64) -> Vector4<f64>) -> [[Vector4<f64>; 3]; 3] {
    let at = |i: usize, j: usize| f(i as f64 / 2.0, j as f64 / 2.0);
    [
        [at(0, 0), at(0, 1), at(0, 2)],
        [at(1, 0), at(1, 1), at(1, 2)],
        [at(2, 0), at(2, 1), at(2, 2)],
    ]
}

#[test]
fn patch_control_points_of_parabolas() {
    let p = BezierQQ4::from_samples(samples(parabolas));
    // u² on [0,1] has Bezier ordinates 0, 0, 1.
    assert_eq!(p.cp[1][0], Vector4::new(0.5, 0.0, 0.0, 0.0));
    assert_eq!(p.cp[2][1], Vector4::new(1.0, 0.5, 1.0, 0.0));
    assert!((p.vol() - 0.0625).abs() < 1e-12);
    let perimeter = 0.5 + 1.25f64.sqrt() + 2.0f64.sqrt();
    assert!((p.area() - 0.5 * perimeter).abs() < 1e-12);
}

#[test]
fn patch_reproduces_biquadratics() {
    let p = BezierQQ4::from_samples(samples(biquadratic));
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let (u, v) = (rng.gen::<f64>(), rng.gen::<f64>());
        assert!((p.eval(u, v) - biquadratic(u, v)).norm() < 1e-12);
    }
    for (i, j) in [(0, 0), (2, 2), (0, 2)] {
        assert_eq!(p.eval(i as f64 / 2.0, j as f64 / 2.0), p.cp[i][j]);
    }
}

#[test]
fn patch_lies_in_its_hull() {
    let p = BezierQQ4::from_samples(samples(|u, v| {
        Vector4::new(u.cos(), u.sin(), v.cos() * 2.0, (u + v).sin())
    }));
    assert!(!p.hull.is_flat());
    for i in 0..=10 {
        for j in 0..=10 {
            assert!(p.hull.contains(&p.eval(i as f64 / 10.0, j as f64 / 10.0)));
        }
    }
}

#[test]
fn new_tree_has_virtual_root_and_four_leaves() {
    let tree = BezierTree::new(parabolas);
    assert_eq!(tree.len(), 5);
    let root = tree.node(tree.root());
    assert_eq!(root.state(), NodeState::Virtual);
    assert_eq!(root.vol(), 0.0);
    let ch = root.children.unwrap();
    for (k, id) in ch.iter().enumerate() {
        let n = tree.node(*id);
        assert_eq!(n.state(), NodeState::Leaf);
        assert_eq!(n.depth, 1);
        assert_eq!(n.size, 0.5);
        assert_eq!((n.u0, n.v0), ((k / 2) as f64 * 0.5, (k % 2) as f64 * 0.5));
        assert!((n.vol() - 1.0 / 1024.0).abs() < 1e-15);
    }
    assert!((tree.vol() - 1.0 / 256.0).abs() < 1e-14);
    let leafs = tree.leafs();
    assert_eq!(leafs.ids, ch.to_vec());
    let area: f64 = leafs.iter().map(|id| tree.node(id).area()).sum();
    assert!((tree.area() - area).abs() < 1e-15);
}

#[test]
fn sub_vol_refines_to_target_and_is_idempotent() {
    let mut tree = BezierTree::new(parabolas);
    let mut leafs = tree.leafs();
    assert_eq!(tree.sub_vol(&mut leafs, 1e-4), 4);
    assert_eq!(leafs.len(), 16);
    assert!((tree.vol() - 1.0 / 4096.0).abs() < 1e-14);
    assert_eq!(leafs, tree.leafs());
    assert!(leafs.iter().all(|id| tree.node(id).depth == 2));

    assert_eq!(tree.sub_vol(&mut leafs, 1e-4), 0);
    assert_eq!(leafs.len(), 16);
    assert_eq!(tree.sub_vol(&mut leafs, 1e-3), 0);
    assert_eq!(leafs.len(), 16);
    assert_eq!(tree.len(), 21);
}

#[test]
fn internal_nodes_measure_their_children() {
    let mut tree = BezierTree::new(parabolas);
    let first = tree.leafs().ids[0];
    let own = tree.node(first).vol();
    let ch = tree.sub(first);
    let kids = tree.sub(ch[3]);
    assert_eq!(tree.node(first).vol(), own);

    let sum_vol: f64 = ch.iter().map(|&c| tree.vol_at(c)).sum();
    let sum_area: f64 = ch.iter().map(|&c| tree.area_at(c)).sum();
    assert!((tree.vol_at(first) - sum_vol).abs() < 1e-15);
    assert!((tree.area_at(first) - sum_area).abs() < 1e-15);
    let grand: f64 = kids.iter().map(|&c| tree.node(c).vol()).sum();
    assert!((tree.vol_at(ch[3]) - grand).abs() < 1e-15);
    assert_eq!(tree.vol_at(ch[0]), tree.node(ch[0]).vol());
    assert_eq!(tree.vol_at(tree.root()), tree.vol());
    assert_eq!(tree.area_at(tree.root()), tree.area());
}

#[test]
fn stale_leaf_lists_expand_subdivided_nodes() {
    let mut tree = BezierTree::new(parabolas);
    let mut leafs = tree.leafs();
    let first = leafs.ids[0];
    let ch = tree.sub(first);
    assert_eq!(tree.node(first).state(), NodeState::Internal);
    tree.sub_vol(&mut leafs, 1.0);
    assert_eq!(leafs.len(), 7);
    assert_eq!(&leafs.ids[..4], &ch);
}

#[test]
#[should_panic(expected = "sub()")]
fn sub_requires_a_leaf() {
    let mut tree = BezierTree::new(parabolas);
    let root = tree.root();
    tree.sub(root);
}

#[test]
fn max_depth_caps_refinement() {
    let mut tree = BezierTree::with_cfg(parabolas, TreeCfg { max_depth: 2 });
    let mut leafs = tree.leafs();
    assert_eq!(tree.sub_vol(&mut leafs, 0.0), 4);
    assert_eq!(leafs.len(), 16);
    assert!(leafs.iter().all(|id| tree.node(id).depth == 2));
    assert_eq!(tree.sub_vol(&mut leafs, 0.0), 0);
}

#[test]
fn flat_images_need_no_refinement() {
    let mut tree = BezierTree::new(|u: f64, v: f64| Vector4::new(u, v, u + v, 0.0));
    let mut leafs = tree.leafs();
    assert_eq!(tree.sub_vol(&mut leafs, 0.0), 0);
    assert_eq!(tree.vol(), 0.0);
    assert_eq!(tree.area(), 0.0);
}

#[test]
fn eval_and_locate_follow_the_leaves() {
    let mut tree = BezierTree::new(biquadratic);
    let mut leafs = tree.leafs();
    tree.sub_vol(&mut leafs, 1e-6);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let (u, v) = (rng.gen::<f64>(), rng.gen::<f64>());
        let id = tree.locate(u, v);
        assert!(tree.node(id).contains(u, v));
        assert_eq!(tree.node(id).state(), NodeState::Leaf);
        assert!((tree.eval(u, v) - biquadratic(u, v)).norm() < 1e-12);
    }
    assert_eq!(tree.eval(-1.0, 2.0), tree.eval(0.0, 1.0));
}

#[test]
fn bounds_a_barrel_parametrization() {
    let pp = golden("a_y_barrel").unwrap().param();
    let f = pp.eval_fn(0);
    let mut tree = BezierTree::with_cfg(&f, TreeCfg { max_depth: 5 });
    let vol0 = tree.vol();
    assert!(vol0 > 0.0);
    let target = vol0 / 400.0;
    let mut leafs = tree.leafs();
    assert!(tree.sub_vol(&mut leafs, target) > 0);
    assert!(tree.vol() < vol0);
    for id in leafs.iter() {
        let n = tree.node(id);
        assert!(n.vol() <= target || n.depth == 5);
        // The patch interpolates its center sample.
        let (cu, cv) = (n.u0 + 0.5 * n.size, n.v0 + 0.5 * n.size);
        assert!((tree.eval(cu, cv) - f(cu, cv)).norm() < 1e-12);
    }
}
