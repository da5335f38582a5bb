//! Reorder engine: cut a sub-shape of prescribed width and height out of a
//! convex lower curve.
//!
//! Purpose
//! - One call performs one step of the reordering lemma: given the displacement
//!   `(target_x, target_y)` of the next upper-curve step, return the contiguous
//!   piece `found` of the lower curve realizing it, and the remainder `rest`.
//! - Repeating on `rest` with all upper steps reorders the whole lower curve
//!   (`reorder_all`).
//!
//! Model
//! - A window of width `target_x` slides continuously over the curve. Between
//!   two consecutive breakpoints the window's height is affine in its position,
//!   and by convexity it increases monotonically overall. The sweep visits the
//!   pairs `(l, r)` of segments touched by the window's left and right ends, and
//!   interpolates inside the first pair whose height range contains `target_y`.
//!
//! Failure semantics
//! - Precondition violations (non-convex input, infeasible target) and sweep
//!   exhaustion panic with a message naming the failed check. They are bugs in
//!   the caller or numeric drift beyond `ReorderCfg::eps`, never normal results.

mod sweep;

pub use sweep::reorder_with_cfg;

use crate::curve::Curve;

/// Tolerance for the base case (whole curve requested).
pub const EPS: f64 = 0.00005;

/// Reorder configuration.
#[derive(Clone, Copy, Debug)]
pub struct ReorderCfg {
    /// Width/height tolerance for the "remaining curve is the target" shortcut.
    pub eps: f64,
}

impl Default for ReorderCfg {
    fn default() -> Self {
        Self { eps: EPS }
    }
}

/// One reorder step with the default tolerance; returns `(found, rest)`.
///
/// Panics if the curve is not convex or the target is infeasible.
pub fn reorder(target_x: f64, target_y: f64, curve: Curve) -> (Curve, Curve) {
    reorder_with_cfg(target_x, target_y, curve, ReorderCfg::default())
}

/// Run every upper step in order, feeding each `rest` into the next step.
/// Returns the `found` piece of each step; their concatenation is the
/// reordered lower curve.
pub fn reorder_all(steps: &[(f64, f64)], curve: Curve, cfg: ReorderCfg) -> Vec<Curve> {
    let mut rest = curve;
    let mut pieces = Vec::with_capacity(steps.len());
    for (k, &(x, y)) in steps.iter().enumerate() {
        tracing::debug!(step = k, x, y, remaining = rest.len(), "reorder_all step");
        let (found, next) = reorder_with_cfg(x, y, rest, cfg);
        pieces.push(found);
        rest = next;
    }
    pieces
}
