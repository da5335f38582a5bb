use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use convex_reorder::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod figure;
mod input;
mod provenance;

use provenance::RunRecord;

const DEFAULT_LOWER: [f64; 16] = [
    0.0, 0.0, 0.15, 0.0, 0.35, 0.02, 0.42, 0.04, 0.6, 0.12, 0.85, 0.3, 0.92, 0.45, 1.0, 1.0,
];
const DEFAULT_UPPER: [f64; 8] = [0.0, 0.0, 0.38, 0.17, 0.74, 0.45, 1.0, 1.0];

#[derive(Parser)]
#[command(name = "reorder-cli")]
#[command(about = "Reorder a convex lower curve along an upper curve and plot the result")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write LaTeX figures of the lower curve, the first reorder step, and all steps
    Figure(FigureArgs),
    /// Run a single reorder step and print `found` and `rest` as JSON
    Reorder {
        /// Lower curve coordinates x1 y1 x2 y2 ...
        #[arg(short = 'l', num_args = 1.., allow_negative_numbers = true, default_values_t = DEFAULT_LOWER)]
        lower: Vec<f64>,
        /// Target width
        #[arg(short = 'x', allow_negative_numbers = true)]
        x: f64,
        /// Target height
        #[arg(short = 'y', allow_negative_numbers = true)]
        y: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Debug)]
struct FigureArgs {
    /// Coordinates of the lower line, in the format x1 y1 x2 y2 ... x_t y_t
    #[arg(short = 'l', num_args = 1.., allow_negative_numbers = true, default_values_t = DEFAULT_LOWER)]
    lower: Vec<f64>,
    /// Coordinates of the upper line, in the format x1 y1 x2 y2 ... x_t y_t
    #[arg(short = 'u', num_args = 1.., allow_negative_numbers = true, default_values_t = DEFAULT_UPPER)]
    upper: Vec<f64>,
    /// Read the lower line from the x/y columns of a .csv or .parquet file
    #[arg(long)]
    lower_csv: Option<PathBuf>,
    /// Read the upper line from the x/y columns of a .csv or .parquet file
    #[arg(long)]
    upper_csv: Option<PathBuf>,
    /// Draw a random convex lower line and a feasible upper line instead
    #[arg(long, conflicts_with_all = ["lower_csv", "upper_csv"])]
    random_seed: Option<u64>,
    /// Segment count of the random lower line
    #[arg(long, default_value_t = 12)]
    segments: usize,
    /// Step count of the random upper line
    #[arg(long, default_value_t = 3)]
    steps: usize,
    /// Output path for the normal line
    #[arg(short = 'n', default_value = "normal.tex")]
    normal: PathBuf,
    /// Output path for the one-step visualization
    #[arg(short = 'o', default_value = "onestep.tex")]
    onestep: PathBuf,
    /// Output path for the all-steps visualization
    #[arg(short = 'a', default_value = "allsteps.tex")]
    allsteps: PathBuf,
    /// Minimum precision for drawing the rainbow gradient
    #[arg(short = 'p', default_value_t = 0.005)]
    precision: f64,
    /// Preamble file; defaults to a standalone pgfplots axis
    #[arg(long)]
    head: Option<PathBuf>,
    /// Postamble file; defaults to closing the built-in preamble
    #[arg(long)]
    foot: Option<PathBuf>,
    /// Compile the figures with pdflatex
    #[arg(long)]
    compile: bool,
    /// Run record listing the inputs and every produced file
    #[arg(long, default_value = "figure.provenance.json")]
    record: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Figure(args) => run_figure(args),
        Action::Reorder { lower, x, y } => run_reorder(lower, x, y),
        Action::Report => report(),
    }
}

fn figure_inputs(args: &FigureArgs) -> Result<(Curve, Vec<(f64, f64)>)> {
    if let Some(seed) = args.random_seed {
        let cfg = RandomCurveCfg {
            segments: args.segments,
            upper_steps: args.steps,
            ..Default::default()
        };
        let lower = draw_convex_curve(&cfg, seed);
        let steps = draw_upper_steps(&lower, &cfg, seed);
        return Ok((lower, steps));
    }
    let lower_pts = match &args.lower_csv {
        Some(path) => input::read_points(path)?,
        None => input::points_from_args(&args.lower, "lower")?,
    };
    let upper_pts = match &args.upper_csv {
        Some(path) => input::read_points(path)?,
        None => input::points_from_args(&args.upper, "upper")?,
    };
    let lower = Curve::from_points(&lower_pts).context("building lower curve")?;
    let steps = upper_steps(&upper_pts).context("building upper steps")?;
    Ok((lower, steps))
}

fn run_figure(args: FigureArgs) -> Result<()> {
    if !(args.precision > 0.0 && args.precision.is_finite()) {
        bail!("precision must be positive, got {}", args.precision);
    }
    let (lower, steps) = figure_inputs(&args)?;
    let cfg = ReorderCfg::default();
    tracing::info!(
        segments = lower.len(),
        steps = steps.len(),
        precision = args.precision,
        seed = ?args.random_seed,
        "figure"
    );
    figure::check_inputs(&lower, &steps, cfg)?;
    let (head, foot) = figure::head_and_foot(args.head.as_deref(), args.foot.as_deref())?;

    let params = serde_json::json!({
        "lower": lower.points().iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        "upper_steps": steps,
        "precision": args.precision,
        "random_seed": args.random_seed,
        "eps": cfg.eps,
    });

    let outputs = [
        (&args.normal, figure::normal_body(&lower, args.precision)),
        (
            &args.onestep,
            figure::onestep_body(lower.clone(), steps[0], cfg, args.precision),
        ),
        (
            &args.allsteps,
            figure::allsteps_body(lower, &steps, cfg, args.precision)?,
        ),
    ];
    let mut record = RunRecord::new("figure", params);
    for (path, body) in &outputs {
        figure::write_document(path, &head, body, &foot)?;
        record.add_output(*path);
    }
    if args.compile {
        for (path, _) in &outputs {
            record.add_output(figure::compile(path)?);
        }
    }
    record.write(&args.record)
}

fn run_reorder(lower: Vec<f64>, x: f64, y: f64) -> Result<()> {
    let curve = Curve::from_flat_coords(&lower).context("building lower curve")?;
    let cfg = ReorderCfg::default();
    tracing::info!(segments = curve.len(), x, y, "reorder");
    if !curve.is_convex_eps(figure::CONVEXITY_TOL) {
        bail!("lower curve is not convex");
    }
    figure::check_step(&curve, 0, (x, y), cfg)?;
    let (found, rest) = reorder_with_cfg(x, y, curve, cfg);
    let obj = serde_json::json!({ "found": found, "rest": rest });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let record = RunRecord::new("report", serde_json::json!({ "eps": EPS }));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
