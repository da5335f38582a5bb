//! Two-pointer sweep behind `reorder`.
//!
//! Notation used in the comments below, for the pair `(l, r)` currently touched
//! by the window ends:
//!
//! ```text
//!   <---target_x--->
//! A | B    ...    C | D
//! ```
//!
//! `A`,`B` are the x-coordinates of the start and end of `curve[l]`, `C`,`D`
//! those of `curve[r]`. The window's left end must lie in `[A,B]` and its right
//! end in `[C,D]`. `mid_x = dist(A, C)` is the width of `curve[l..r]`.

use super::ReorderCfg;
use crate::curve::Curve;
use crate::segment::Segment;

/// `num / den` clamped to `[0,1]`. Zero-width segments have no interior
/// x-positions; callers only pass `den == 0` with `num == 0`.
#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        (num / den).clamp(0.0, 1.0)
    }
}

#[inline]
fn non_degenerate(seg: Segment) -> Option<Segment> {
    (!seg.is_degenerate()).then_some(seg)
}

/// Extreme placements of the window on the pair `(l, r)`, as split fractions:
/// the window starts at fraction `a` of `segs[l]` and ends at fraction `b` of
/// `segs[r]`. Both the width and the height of the window are affine in
/// `(a, b)`, so interpolating between the two placements keeps the width.
#[derive(Clone, Copy, Debug)]
struct Placement {
    l: usize,
    r: usize,
    a_min: f64,
    b_min: f64,
    a_max: f64,
    b_max: f64,
    min_y: f64,
    max_y: f64,
}

impl Placement {
    /// Distance of `target_y` to the height range, zero inside it.
    fn miss(&self, target_y: f64) -> f64 {
        (self.min_y - target_y).max(target_y - self.max_y).max(0.0)
    }

    /// Fractions of `segs[l]` and `segs[r]` at `fr` between both extremes.
    fn at(&self, fr: f64) -> (f64, f64) {
        (
            fr * self.a_max + (1.0 - fr) * self.a_min,
            fr * self.b_max + (1.0 - fr) * self.b_min,
        )
    }

    fn cut(&self, segs: Vec<Segment>, fr: f64) -> (Curve, Curve) {
        let (of_left, of_right) = self.at(fr);
        tracing::debug!(
            l = self.l,
            r = self.r,
            fr,
            of_left,
            of_right,
            "reorder window found"
        );
        if self.l == self.r {
            cut_inside(segs, self.l, of_left, of_right)
        } else {
            cut_between(segs, self.l, self.r, of_left, of_right)
        }
    }
}

/// One reorder step with explicit configuration; returns `(found, rest)`.
///
/// Pre: `curve` is convex, `0 < target_x ≤ width(curve)` and the target is
/// reachable by a window of the curve.
/// Post: `found` has displacement `(target_x, target_y)`; `found ⧺ rest` is a
/// permutation of (split) pieces of `curve`.
///
/// Targets on the edge of the feasible range may miss every pair by a few ulps
/// of accumulated drift; the closest pair is then used if it misses by at most
/// `cfg.eps`.
pub fn reorder_with_cfg(
    target_x: f64,
    target_y: f64,
    curve: Curve,
    cfg: ReorderCfg,
) -> (Curve, Curve) {
    let width = curve.width();

    // rounding error mitigation: the whole remaining curve is requested
    if (width - target_x).abs() < cfg.eps {
        let height = curve.height();
        assert!(
            (height - target_y).abs() < cfg.eps,
            "base case: curve width {width} matches target but height {height} differs from {target_y}"
        );
        tracing::debug!(target_x, target_y, segments = curve.len(), "reorder base case");
        return (curve, Curve::default());
    }
    assert!(
        target_x > 0.0 && target_x <= width + cfg.eps,
        "target width {target_x} outside (0, {width}]"
    );

    let segs = curve.into_segments();
    let n = segs.len();
    let mut l = 0;
    let mut r = 0;
    // mid_x, mid_y: displacement of segs[l..r]
    let mut mid_x = 0.0;
    let mut mid_y = 0.0;
    while r < n && mid_x + segs[r].dx < target_x {
        mid_x += segs[r].dx;
        mid_y += segs[r].dy;
        r += 1;
    }

    let mut closest: Option<Placement> = None;
    while l < n && r < n {
        let sl = &segs[l];
        let sr = &segs[r];
        assert!(
            mid_x - sl.dx <= target_x,
            "window assertion I violated at l={l}, r={r}: window start lies beyond segment l"
        );
        assert!(
            mid_x + sr.dx >= target_x,
            "window assertion II violated at l={l}, r={r}: window end lies beyond segment r"
        );

        // Leftmost frame: blocked at A (left end) or at C (right end).
        let (a_min, b_min) = if target_x >= mid_x {
            (0.0, ratio(target_x - mid_x, sr.dx))
        } else {
            (ratio(mid_x - target_x, sl.dx), 0.0)
        };
        // Rightmost frame: blocked at D (right end) or at B (left end).
        let right_aligned = mid_x + sr.dx - sl.dx; // dist(B, D)
        let (a_max, b_max) = if target_x >= right_aligned {
            (1.0 - ratio(target_x - right_aligned, sl.dx), 1.0)
        } else {
            (1.0, 1.0 - ratio(right_aligned - target_x, sr.dx))
        };

        // Shifting the frame between both extremes changes its height linearly.
        // A vertical segs[r] (or segs[l]) is swept by its fraction alone.
        let place = Placement {
            l,
            r,
            a_min,
            b_min,
            a_max,
            b_max,
            min_y: mid_y - a_min * sl.dy + b_min * sr.dy,
            max_y: mid_y - a_max * sl.dy + b_max * sr.dy,
        };
        tracing::trace!(
            l,
            r,
            mid_x,
            mid_y,
            min_y = place.min_y,
            max_y = place.max_y,
            "sweep window"
        );

        if place.min_y <= target_y && target_y <= place.max_y {
            let fr = if place.max_y == place.min_y {
                0.0
            } else {
                ((target_y - place.min_y) / (place.max_y - place.min_y)).clamp(0.0, 1.0)
            };
            return place.cut(segs, fr);
        }
        if closest.map_or(true, |c| place.miss(target_y) < c.miss(target_y)) {
            closest = Some(place);
        }

        let shifted = mid_x - sl.dx + sr.dx;
        let vertical_next = r + 1 < n && segs[r + 1].dx == 0.0;
        if shifted == target_x && !vertical_next {
            // both ends hit a breakpoint at once
            mid_x += sr.dx - sl.dx;
            mid_y += sr.dy - sl.dy;
            l += 1;
            r += 1;
        } else if shifted <= target_x {
            // only weakens assertion II, which held before; with a vertical
            // segs[r + 1] the left end stays pinned at B while it is swept
            mid_x += sr.dx;
            mid_y += sr.dy;
            r += 1;
        } else {
            // only weakens assertion I, which held before
            mid_x -= sl.dx;
            mid_y -= sl.dy;
            l += 1;
        }
    }

    if let Some(place) = closest.filter(|c| c.miss(target_y) <= cfg.eps) {
        tracing::debug!(
            target_y,
            min_y = place.min_y,
            max_y = place.max_y,
            "reorder target on feasible boundary"
        );
        let fr = if target_y <= place.min_y { 0.0 } else { 1.0 };
        return place.cut(segs, fr);
    }

    panic!(
        "reorder sweep exhausted without a window for target ({target_x}, {target_y}); \
         the curve is not convex or needs more rounding-error mitigation"
    );
}

/// Window spans from inside `segs[l]` to inside `segs[r]`, `l < r`.
fn cut_between(
    segs: Vec<Segment>,
    l: usize,
    r: usize,
    of_left: f64,
    of_right: f64,
) -> (Curve, Curve) {
    let (l1, l2) = segs[l].split(of_left);
    let (r1, r2) = segs[r].split(of_right);
    let found = non_degenerate(l2)
        .into_iter()
        .chain(segs[l + 1..r].iter().copied())
        .chain(non_degenerate(r1))
        .collect();
    let rest = segs[..l]
        .iter()
        .copied()
        .chain(non_degenerate(l1))
        .chain(non_degenerate(r2))
        .chain(segs[r + 1..].iter().copied())
        .collect();
    (found, rest)
}

/// Window lies inside the single segment `segs[k]`, between the fractions
/// `of_left ≤ of_right` of it.
fn cut_inside(segs: Vec<Segment>, k: usize, of_left: f64, of_right: f64) -> (Curve, Curve) {
    let (before, tail) = segs[k].split(of_left);
    let inner = if of_left < 1.0 {
        ((of_right - of_left) / (1.0 - of_left)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (window, after) = tail.split(inner);
    let found = non_degenerate(window).into_iter().collect();
    let rest = segs[..k]
        .iter()
        .copied()
        .chain(non_degenerate(before))
        .chain(non_degenerate(after))
        .chain(segs[k + 1..].iter().copied())
        .collect();
    (found, rest)
}
