//! LaTeX figures of a lower curve before and after reordering.
//!
//! Three documents share one preamble/postamble:
//! - normal: the lower curve as given,
//! - onestep: the first matched piece followed by the remainder,
//! - allsteps: the matched pieces of every upper step, in order.

use anyhow::{bail, Context, Result};
use convex_reorder::prelude::*;
use convex_reorder::render::tikz::{DEFAULT_FOOT, DEFAULT_HEAD};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Slack for the slope comparison of the lower curve.
pub const CONVEXITY_TOL: f64 = 1e-12;

/// Reject inputs the reorder engine treats as fatal precondition violations.
/// Later steps are checked against the remainder as they are consumed, see
/// `allsteps_body`.
pub fn check_inputs(lower: &Curve, steps: &[(f64, f64)], cfg: ReorderCfg) -> Result<()> {
    if steps.is_empty() {
        bail!("upper curve needs at least two points");
    }
    if !lower.is_convex_eps(CONVEXITY_TOL) {
        bail!("lower curve is not convex (x must increase and slopes must not decrease)");
    }
    if let Some(k) = steps.iter().position(|&(x, _)| !(x > 0.0)) {
        bail!("upper step {k} has non-positive width");
    }
    let (w, h) = steps
        .iter()
        .fold((0.0, 0.0), |(w, h), &(x, y)| (w + x, h + y));
    if (w - lower.width()).abs() >= cfg.eps || (h - lower.height()).abs() >= cfg.eps {
        bail!(
            "upper curve ends at ({w}, {h}) but lower curve ends at ({}, {})",
            lower.width(),
            lower.height()
        );
    }
    check_step(lower, 0, steps[0], cfg)
}

/// Step `k` must fit into what is left of the lower curve: its width in
/// `(0, width]` and its height between the lowest and highest window.
pub fn check_step(rest: &Curve, k: usize, (x, y): (f64, f64), cfg: ReorderCfg) -> Result<()> {
    let width = rest.width();
    if !(x > 0.0 && x <= width + cfg.eps) {
        bail!("upper step {k} ({x}, {y}) is wider than the remaining curve ({width})");
    }
    let (lo, hi) = rest.window_height_range(x);
    if y < lo - cfg.eps || y > hi + cfg.eps {
        bail!("upper step {k} ({x}, {y}) needs a height in [{lo}, {hi}]");
    }
    Ok(())
}

/// Drawing commands for the lower curve as given.
pub fn normal_body(lower: &Curve, precision: f64) -> String {
    curve_commands(lower, precision)
}

/// Drawing commands for `found ⧺ rest` of the first upper step.
pub fn onestep_body(lower: Curve, first: (f64, f64), cfg: ReorderCfg, precision: f64) -> String {
    let (found, rest) = reorder_with_cfg(first.0, first.1, lower, cfg);
    tracing::info!(found = found.len(), rest = rest.len(), "onestep");
    curve_commands(found.iter().chain(rest.iter()), precision)
}

/// Drawing commands for the matched pieces of all upper steps.
pub fn allsteps_body(
    lower: Curve,
    steps: &[(f64, f64)],
    cfg: ReorderCfg,
    precision: f64,
) -> Result<String> {
    let mut rest = lower;
    let mut pieces = Vec::with_capacity(steps.len());
    for (k, &step) in steps.iter().enumerate() {
        check_step(&rest, k, step, cfg)?;
        let (found, next) = reorder_with_cfg(step.0, step.1, rest, cfg);
        pieces.push(found);
        rest = next;
    }
    tracing::info!(
        pieces = pieces.len(),
        segments = pieces.iter().map(|p| p.len()).sum::<usize>(),
        "allsteps"
    );
    Ok(curve_commands(pieces.iter().flat_map(|p| p.iter()), precision))
}

/// File contents if a path is given, else the built-in default.
pub fn read_or_default(path: Option<&Path>, default: &str) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => Ok(default.to_string()),
    }
}

/// Preamble and postamble, from files or the built-in pgfplots defaults.
pub fn head_and_foot(head: Option<&Path>, foot: Option<&Path>) -> Result<(String, String)> {
    Ok((
        read_or_default(head, DEFAULT_HEAD)?,
        read_or_default(foot, DEFAULT_FOOT)?,
    ))
}

/// Write `head ⧺ body ⧺ foot` to `path`, creating parent directories.
pub fn write_document(path: &Path, head: &str, body: &str, foot: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut doc = String::with_capacity(head.len() + body.len() + foot.len());
    doc.push_str(head);
    doc.push_str(body);
    doc.push_str(foot);
    fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = body.len(), "figure_written");
    Ok(())
}

/// Run `pdflatex` on `path` inside its directory; returns the PDF path.
pub fn compile(path: &Path) -> Result<PathBuf> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?;
    let status = Command::new("pdflatex")
        .arg("-interaction=nonstopmode")
        .arg(file)
        .current_dir(dir)
        .stdout(Stdio::null())
        .status()
        .context("starting pdflatex")?;
    if !status.success() {
        bail!(
            "pdflatex on {} exited with status {:?}",
            path.display(),
            status.code()
        );
    }
    Ok(path.with_extension("pdf"))
}
