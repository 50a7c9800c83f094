//! Quadtree of patches over `[0,1]²` stored in an arena.

use nalgebra::Vector4;
use tracing::{debug, warn};

use super::BezierQQ4;
use crate::cfg::TreeCfg;

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Per-node state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// No evaluated patch: zero measure, never evaluated directly. Only the
    /// root is virtual.
    Virtual,
    /// Evaluated patch, no children.
    Leaf,
    /// Evaluated patch and exactly 4 children.
    Internal,
}

/// Square `[u0, u0 + size] × [v0, v0 + size]` of the domain plus its patch.
#[derive(Clone, Debug)]
pub struct BezierNode {
    pub u0: f64,
    pub v0: f64,
    pub size: f64,
    /// Root is 0, its children 1.
    pub depth: u32,
    pub patch: Option<BezierQQ4>,
    /// Quadrant `(i, j)` at index `2i + j`, `i` along `u`.
    pub children: Option<[NodeId; 4]>,
}

impl BezierNode {
    pub fn state(&self) -> NodeState {
        match (&self.patch, &self.children) {
            (None, _) => NodeState::Virtual,
            (Some(_), Some(_)) => NodeState::Internal,
            (Some(_), None) => NodeState::Leaf,
        }
    }

    /// Hull volume of the own patch, ignoring children. See
    /// `BezierTree::vol_at` for the subtree measure.
    #[inline]
    pub fn vol(&self) -> f64 {
        self.patch.as_ref().map_or(0.0, BezierQQ4::vol)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.patch.as_ref().map_or(0.0, BezierQQ4::area)
    }

    #[inline]
    pub fn contains(&self, u: f64, v: f64) -> bool {
        (self.u0..=self.u0 + self.size).contains(&u) && (self.v0..=self.v0 + self.size).contains(&v)
    }
}

/// Snapshot of the current leaves in depth-first order, refined in place by
/// `BezierTree::sub_vol`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BezierLeafs {
    pub ids: Vec<NodeId>,
}

impl BezierLeafs {
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}

/// Adaptive bound of the range of `f: [0,1]² → R⁴`.
///
/// Invariants:
/// - Node 0 is the virtual root; it always has 4 evaluated children.
/// - Children are created in groups of 4 and never removed.
pub struct BezierTree<F> {
    f: F,
    cfg: TreeCfg,
    nodes: Vec<BezierNode>,
}

const ROOT: NodeId = NodeId(0);

impl<F> BezierTree<F>
where
    F: Fn(f64, f64) -> Vector4<f64>,
{
    pub fn new(f: F) -> Self {
        Self::with_cfg(f, TreeCfg::default())
    }

    pub fn with_cfg(f: F, cfg: TreeCfg) -> Self {
        let root = BezierNode {
            u0: 0.0,
            v0: 0.0,
            size: 1.0,
            depth: 0,
            patch: None,
            children: None,
        };
        let mut tree = Self {
            f,
            cfg,
            nodes: vec![root],
        };
        tree.split(ROOT);
        tree
    }

    #[inline]
    pub fn cfg(&self) -> TreeCfg {
        self.cfg
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &BezierNode {
        &self.nodes[id.0]
    }

    /// Number of nodes including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn sample(&self, u0: f64, v0: f64, size: f64) -> BezierQQ4 {
        let h = 0.5 * size;
        let at = |i: usize, j: usize| (self.f)(u0 + h * i as f64, v0 + h * j as f64);
        BezierQQ4::from_samples([
            [at(0, 0), at(0, 1), at(0, 2)],
            [at(1, 0), at(1, 1), at(1, 2)],
            [at(2, 0), at(2, 1), at(2, 2)],
        ])
    }

    /// Attach 4 evaluated children.
    fn split(&mut self, id: NodeId) -> [NodeId; 4] {
        let node = &self.nodes[id.0];
        let (u0, v0, h, depth) = (node.u0, node.v0, 0.5 * node.size, node.depth + 1);
        let first = self.nodes.len();
        for i in 0..2 {
            for j in 0..2 {
                let (cu, cv) = (u0 + h * i as f64, v0 + h * j as f64);
                let patch = self.sample(cu, cv, h);
                self.nodes.push(BezierNode {
                    u0: cu,
                    v0: cv,
                    size: h,
                    depth,
                    patch: Some(patch),
                    children: None,
                });
            }
        }
        let ids = [
            NodeId(first),
            NodeId(first + 1),
            NodeId(first + 2),
            NodeId(first + 3),
        ];
        self.nodes[id.0].children = Some(ids);
        ids
    }

    /// Subdivide leaf `id` into its 4 quadrants.
    ///
    /// Panics if `id` is not a leaf.
    pub fn sub(&mut self, id: NodeId) -> [NodeId; 4] {
        let state = self.node(id).state();
        assert!(
            state == NodeState::Leaf,
            "sub() on {id:?} in state {state:?}"
        );
        self.split(id)
    }

    /// Sum of leaf hull volumes.
    pub fn vol(&self) -> f64 {
        self.vol_at(ROOT)
    }

    /// Sum of leaf hull boundary 3-volumes.
    pub fn area(&self) -> f64 {
        self.area_at(ROOT)
    }

    /// Hull volume bound of the subtree at `id`: the patch itself for a leaf,
    /// the sum over its children otherwise.
    pub fn vol_at(&self, id: NodeId) -> f64 {
        self.fold_leaves(id, &BezierNode::vol)
    }

    pub fn area_at(&self, id: NodeId) -> f64 {
        self.fold_leaves(id, &BezierNode::area)
    }

    fn fold_leaves(&self, id: NodeId, measure: &dyn Fn(&BezierNode) -> f64) -> f64 {
        let node = self.node(id);
        match node.children {
            Some(ch) => ch.iter().map(|&c| self.fold_leaves(c, measure)).sum(),
            None => measure(node),
        }
    }

    /// Leaf containing `(u, v)`; coordinates are clamped to `[0,1]²`.
    pub fn locate(&self, u: f64, v: f64) -> NodeId {
        let (u, v) = (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
        let mut id = ROOT;
        while let Some(ch) = self.node(id).children {
            let node = self.node(id);
            let h = 0.5 * node.size;
            let i = usize::from(u >= node.u0 + h);
            let j = usize::from(v >= node.v0 + h);
            id = ch[2 * i + j];
        }
        id
    }

    /// Interpolant at `(u, v)`, evaluated on the leaf containing it.
    pub fn eval(&self, u: f64, v: f64) -> Vector4<f64> {
        let id = self.locate(u, v);
        let node = self.node(id);
        let (u, v) = (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
        match &node.patch {
            Some(p) => p.eval((u - node.u0) / node.size, (v - node.v0) / node.size),
            None => (self.f)(u, v),
        }
    }

    /// Current leaves, depth-first with children in index order.
    pub fn leafs(&self) -> BezierLeafs {
        let mut ids = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            match self.node(id).children {
                Some(ch) => stack.extend(ch.iter().rev()),
                None => ids.push(id),
            }
        }
        BezierLeafs { ids }
    }

    /// Refine until every leaf in `leafs` has hull volume `<= target` or sits
    /// at `cfg.max_depth`. A subdivided leaf is replaced in place by its
    /// children, so list order stays depth-first.
    ///
    /// Returns the number of subdivisions. Repeating a call with the same or
    /// a larger `target` does nothing.
    pub fn sub_vol(&mut self, leafs: &mut BezierLeafs, target: f64) -> usize {
        let mut out = Vec::with_capacity(leafs.len());
        let (mut subs, mut capped) = (0usize, 0usize);
        for &start in &leafs.ids {
            let mut stack = vec![start];
            while let Some(id) = stack.pop() {
                if let Some(ch) = self.node(id).children {
                    // Stale entry: the node was subdivided elsewhere.
                    stack.extend(ch.iter().rev());
                    continue;
                }
                let node = self.node(id);
                if node.vol() <= target {
                    out.push(id);
                } else if node.depth >= self.cfg.max_depth {
                    capped += 1;
                    out.push(id);
                } else {
                    let ch = self.sub(id);
                    subs += 1;
                    stack.extend(ch.iter().rev());
                }
            }
        }
        if capped > 0 {
            warn!(
                capped,
                max_depth = self.cfg.max_depth,
                target,
                "leaves above target volume at max depth"
            );
        }
        debug!(subs, leaves = out.len(), target, "sub_vol");
        leafs.ids = out;
        subs
    }
}
