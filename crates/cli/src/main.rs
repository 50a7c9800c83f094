use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cspace::api::*;
use nalgebra::Vector3;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Classify, sample and bound predicate zero-sets")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Which predicate to work on: a golden case, explicit support vectors, or a
/// seeded random one.
#[derive(Args, Debug, Clone)]
struct PredArgs {
    /// Name of a golden predicate (see `report`)
    #[arg(long, conflicts_with_all = ["k", "l", "a", "b", "seed"])]
    golden: Option<String>,
    /// Support vectors as "x,y,z"
    #[arg(long, value_parser = parse_vec3, requires_all = ["l", "a", "b"], allow_hyphen_values = true)]
    k: Option<Vector3<f64>>,
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    l: Option<Vector3<f64>>,
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    a: Option<Vector3<f64>>,
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    b: Option<Vector3<f64>>,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    c: f64,
    /// Random predicate with support coordinates in `[-range, range)`
    #[arg(long, conflicts_with = "k")]
    seed: Option<u64>,
    #[arg(long, default_value_t = 10.0)]
    range: f64,
}

#[derive(Subcommand)]
enum Action {
    /// Print the case, eigenvalues and eigenbasis of a predicate
    Classify {
        #[command(flatten)]
        pred: PredArgs,
    },
    /// Evaluate the parametrization on a grid and write the points as JSON
    Sample {
        #[command(flatten)]
        pred: PredArgs,
        #[arg(long, default_value_t = 16)]
        grid: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Bound one component by a Bezier tree and refine to each target volume
    Refine {
        #[command(flatten)]
        pred: PredArgs,
        /// Decreasing hull-volume targets, comma separated
        #[arg(long, value_delimiter = ',', default_value = "1e-3,1e-4,1e-5")]
        targets: Vec<f64>,
        #[arg(long, default_value_t = 0)]
        component: usize,
        #[arg(long, default_value_t = TreeCfg::default().max_depth)]
        max_depth: u32,
    },
    /// Print version, revision and the golden table
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Classify { pred } => classify_cmd(&pred),
        Action::Sample { pred, grid, out } => sample_cmd(&pred, grid, &out).map(|_| ()),
        Action::Refine {
            pred,
            targets,
            component,
            max_depth,
        } => refine_cmd(&pred, &targets, component, max_depth).map(|_| ()),
        Action::Report => report_cmd(),
    }
}

fn parse_vec3(s: &str) -> Result<Vector3<f64>> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("bad coordinate {p:?}"))
        })
        .collect::<Result<_>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => bail!("expected 3 comma-separated numbers, got {s:?}"),
    }
}

fn build_predg(args: &PredArgs) -> Result<PredG<f64>> {
    if let Some(name) = &args.golden {
        return golden(name).ok_or_else(|| {
            anyhow!(
                "unknown golden predicate {name:?}; known: {}",
                golden_names().collect::<Vec<_>>().join(", ")
            )
        });
    }
    if let Some(seed) = args.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        return Ok(random_predg(&mut rng, args.range));
    }
    match (args.k, args.l, args.a, args.b) {
        (Some(k), Some(l), Some(a), Some(b)) => Ok(PredG::new(k, l, a, b, args.c)),
        _ => bail!("need --golden, --seed, or all of --k --l --a --b"),
    }
}

fn classify_cmd(args: &PredArgs) -> Result<()> {
    let g = build_predg(args)?;
    let pp = g.param();
    let exact_case = g.to_exact()?.case_sq();
    tracing::info!(case = %pp.t, a = pp.a, b = pp.b, c = pp.c, "classify");
    let doc = json!({
        "pred": g.to_json(),
        "param": pp.to_json(),
        "kind": format!("{:?}", g.kind()),
        "exact_case": exact_case.name(),
        "dim": pp.t.dim(),
        "components": pp.t.domain_components(),
        "manifold": pp.t.is_manifold(),
        "connected": pp.t.is_connected(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[derive(Serialize, Debug)]
struct SampleOut {
    case: String,
    grid: usize,
    /// `points[component][i * (grid + 1) + j]` in `(s12, s23, s31, s0)` order.
    points: Vec<Vec<[f64; 4]>>,
    max_abs_pred: f64,
}

fn sample_cmd(args: &PredArgs, grid: usize, out: &Path) -> Result<SampleOut> {
    if grid == 0 {
        bail!("--grid must be positive");
    }
    let g = build_predg(args)?;
    let pp = g.param();
    let mut points = Vec::new();
    let mut max_abs_pred = 0.0_f64;
    for comp in 0..pp.t.domain_components() {
        let mut pts = Vec::with_capacity((grid + 1) * (grid + 1));
        for i in 0..=grid {
            for j in 0..=grid {
                let s = pp.eval(i as f64 / grid as f64, j as f64 / grid as f64, comp);
                max_abs_pred = max_abs_pred.max(g.eval(&s).abs());
                pts.push([s.s12, s.s23, s.s31, s.s0]);
            }
        }
        points.push(pts);
    }
    let report = SampleOut {
        case: pp.t.name().to_string(),
        grid,
        points,
        max_abs_pred,
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = provenance::Payload::new(json!({
        "golden": args.golden,
        "seed": args.seed,
        "pred": g.to_json(),
        "grid": grid,
    }))
    .with_summary(json!({
        "case": report.case,
        "components": report.points.len(),
        "max_abs_pred": max_abs_pred,
    }));
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(
        case = %pp.t,
        out = %out.display(),
        sidecar = %sidecar.display(),
        max_abs_pred,
        "sample"
    );
    Ok(report)
}

#[derive(Serialize, Debug, PartialEq)]
struct RefineRow {
    target: f64,
    subs: usize,
    leaves: usize,
    vol: f64,
    area: f64,
}

fn refine_cmd(
    args: &PredArgs,
    targets: &[f64],
    component: usize,
    max_depth: u32,
) -> Result<Vec<RefineRow>> {
    if let Some(bad) = targets.iter().find(|t| !(**t > 0.0)) {
        bail!("--targets must be positive, got {bad}");
    }
    let g = build_predg(args)?;
    let pp = g.param();
    if component >= pp.t.domain_components() {
        bail!(
            "{} has {} domain component(s); --component {component} is out of range",
            pp.t,
            pp.t.domain_components()
        );
    }
    let f = pp.eval_fn(component);
    let mut tree = BezierTree::with_cfg(&f, TreeCfg { max_depth });
    let mut leafs = tree.leafs();
    let mut rows = Vec::with_capacity(targets.len());
    for &target in targets {
        let subs = tree.sub_vol(&mut leafs, target);
        let row = RefineRow {
            target,
            subs,
            leaves: leafs.len(),
            vol: tree.vol(),
            area: tree.area(),
        };
        tracing::info!(
            case = %pp.t,
            target,
            subs,
            leaves = row.leaves,
            vol = row.vol,
            area = row.area,
            "refine"
        );
        rows.push(row);
    }
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(rows)
}

fn report_cmd() -> Result<()> {
    let table: Vec<_> = GOLDEN
        .iter()
        .map(|gold| {
            let t = gold.predg().param().t;
            json!({ "name": gold.name, "case": t.name(), "ok": t == gold.expected })
        })
        .collect();
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "cspace_version": cspace::VERSION,
        "golden": table,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn golden_args(name: &str) -> PredArgs {
        PredArgs {
            golden: Some(name.to_string()),
            k: None,
            l: None,
            a: None,
            b: None,
            c: 0.0,
            seed: None,
            range: 10.0,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn parse_vec3_accepts_three_numbers() {
        assert_eq!(parse_vec3("1, -2,3.5").unwrap(), Vector3::new(1.0, -2.0, 3.5));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
        assert_eq!(parse_vec3("-1,0,-0.5").unwrap(), Vector3::new(-1.0, 0.0, -0.5));
    }

    #[test]
    fn vector_flags_accept_a_leading_minus() {
        let cmd = Cmd::try_parse_from([
            "cli", "classify", "--k", "-1,1,0", "--l", "-1,-1,0", "--a", "-2,2,0", "--b", "-2,-2,0",
            "--c", "-3",
        ])
        .unwrap();
        let Action::Classify { pred } = cmd.action else {
            panic!("wrong subcommand");
        };
        assert_eq!(pred.k, Some(Vector3::new(-1.0, 1.0, 0.0)));
        assert_eq!(pred.b, Some(Vector3::new(-2.0, -2.0, 0.0)));
        assert_eq!(pred.c, -3.0);
    }

    #[test]
    fn flags_select_the_predicate() {
        let cmd = Cmd::try_parse_from([
            "cli", "classify", "--k", "1,1,0", "--l", "1,-1,0", "--a", "2,2,0", "--b", "2,-2,0",
            "--c", "-1.5",
        ])
        .unwrap();
        let Action::Classify { pred } = cmd.action else {
            panic!("wrong subcommand");
        };
        let g = build_predg(&pred).unwrap();
        assert_eq!(g.c, -1.5);
        let (a, b) = g.support();
        assert_eq!(classify(a, b, g.c), PredGParamType::YBarrel);

        assert!(Cmd::try_parse_from(["cli", "classify", "--golden", "x", "--seed", "1"]).is_err());
        assert!(build_predg(&golden_args("no_such_case")).is_err());
    }

    #[test]
    fn seeded_predicates_are_reproducible() {
        let mut args = golden_args("unused");
        args.golden = None;
        args.seed = Some(5);
        assert_eq!(build_predg(&args).unwrap(), build_predg(&args).unwrap());
    }

    #[test]
    fn sample_writes_points_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("barrel.json");
        let report = sample_cmd(&golden_args("a_y_barrel"), 4, &out).unwrap();
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].len(), 25);
        assert!(report.max_abs_pred < 1e-9);
        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(written["case"], "a_y_barrel");
        let sidecar = dir.path().join("barrel.provenance.json");
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["params"]["golden"], "a_y_barrel");
        assert_eq!(prov["summary"]["components"], 1);
    }

    #[test]
    fn sample_of_empty_set_has_no_points() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("e.json");
        let report = sample_cmd(&golden_args("an_empty_set"), 3, &out).unwrap();
        assert!(report.points.is_empty());
    }

    #[test]
    fn refine_rows_shrink() {
        let rows = refine_cmd(&golden_args("a_xy_zw_torus"), &[1e-2, 1e-3], 0, 6).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].leaves >= rows[0].leaves);
        assert!(rows.iter().all(|r| r.vol > 0.0 && r.area > 0.0));
        assert!(refine_cmd(&golden_args("a_y_barrel"), &[1e-2], 1, 6).is_err());
    }

    #[test]
    fn refine_rejects_non_positive_targets() {
        let args = golden_args("a_y_barrel");
        for bad in [0.0, -1e-3, f64::NAN] {
            let err = refine_cmd(&args, &[1e-2, bad], 0, 12).unwrap_err();
            assert!(err.to_string().contains("--targets"), "{err}");
        }
    }
}
