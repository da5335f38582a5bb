//! Seeded random fixtures: strictly convex lower curves and feasible upper steps.
//!
//! Model
//! - Lower curve: `n` widths drawn from `[min_weight, 1]` and normalized to sum
//!   to 1, slopes drawn uniformly and sorted, then rescaled so the curve ends at
//!   height 1. Styles are cumulative length fractions as for `Curve::from_points`.
//! - Upper curve: the lower curve mixed with its chord,
//!   `(1−t)·lower(x) + t·chord(x)`, sampled at `k+1` breakpoints. Mixing convex
//!   functions keeps convexity, and sampling a convex function on a coarser grid
//!   only raises it, so the upper curve lies above the lower curve and every
//!   reorder step is feasible.
//! - Step widths use the same weight normalization, so no step is narrower
//!   than `min_weight / k` of the total width; this keeps steps well clear of
//!   the base-case tolerance.
//!
//! Determinism: everything derives from one `StdRng::seed_from_u64(seed)`.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::curve::Curve;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomCurveCfg {
    /// Lower-curve segment count. Clamped to at least 2 (a single segment has
    /// only tight, rounding-sensitive targets).
    pub segments: usize,
    /// Upper-curve step count. Clamped to at least 1.
    pub upper_steps: usize,
    /// Smallest relative weight for widths, in `(0, 1]`.
    pub min_weight: f64,
    /// Range for the chord mix `t`; values inside `(0,1)` keep the upper curve
    /// strictly above the lower one.
    pub chord_mix: (f64, f64),
}

impl Default for RandomCurveCfg {
    fn default() -> Self {
        Self {
            segments: 8,
            upper_steps: 3,
            min_weight: 0.05,
            chord_mix: (0.1, 0.9),
        }
    }
}

fn normalized_weights<R: Rng>(rng: &mut R, n: usize, min_weight: f64, total: f64) -> Vec<f64> {
    let lo = min_weight.clamp(f64::MIN_POSITIVE, 1.0);
    let ws: Vec<f64> = (0..n)
        .map(|_| if lo < 1.0 { rng.gen_range(lo..1.0) } else { 1.0 })
        .collect();
    let sum: f64 = ws.iter().sum();
    ws.into_iter().map(|w| w / sum * total).collect()
}

/// Strictly convex curve from `(0,0)` to (approximately) `(1,1)`.
pub fn draw_convex_curve(cfg: &RandomCurveCfg, seed: u64) -> Curve {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = cfg.segments.max(2);
    let widths = normalized_weights(&mut rng, n, cfg.min_weight, 1.0);
    let mut slopes: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    slopes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rise: f64 = widths.iter().zip(&slopes).map(|(w, s)| w * s).sum();
    let scale = if rise > 0.0 { 1.0 / rise } else { 1.0 };
    let displacements: Vec<Vector2<f64>> = widths
        .iter()
        .zip(&slopes)
        .map(|(w, s)| Vector2::new(*w, w * s * scale))
        .collect();
    Curve::with_length_styles(&displacements)
}

/// Upper-curve steps lying above `lower`; feeding them to `reorder_all` in
/// order consumes `lower` exactly.
pub fn draw_upper_steps(lower: &Curve, cfg: &RandomCurveCfg, seed: u64) -> Vec<(f64, f64)> {
    // decorrelate from the lower-curve stream drawn with the same seed
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    let k = cfg.upper_steps.max(1);
    let width = lower.width();
    let height = lower.height();
    let (t_lo, t_hi) = cfg.chord_mix;
    let t = if t_lo < t_hi {
        rng.gen_range(t_lo..t_hi)
    } else {
        t_lo
    };
    let upper_at = |x: f64| (1.0 - t) * lower.height_at(x) + t * height / width * x;

    let gaps = normalized_weights(&mut rng, k, cfg.min_weight, width);
    let mut xs = Vec::with_capacity(k + 1);
    xs.push(0.0);
    let mut acc = 0.0;
    for g in &gaps[..k - 1] {
        acc += g;
        xs.push(acc);
    }
    xs.push(width);

    let mut ys: Vec<f64> = xs.iter().map(|&x| upper_at(x)).collect();
    ys[0] = 0.0;
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0], y[1] - y[0]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_strictly_convex_and_normalized() {
        let cfg = RandomCurveCfg {
            segments: 12,
            ..Default::default()
        };
        let c = draw_convex_curve(&cfg, 7);
        assert_eq!(c.len(), 12);
        assert!(c.is_convex_eps(1e-12));
        assert!((c.width() - 1.0).abs() < 1e-12);
        assert!((c.height() - 1.0).abs() < 1e-12);
        assert!(c[0].style.range_start.abs() < 1e-12);
        assert!((c[11].style.range_end - 1.0).abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_draw() {
        let cfg = RandomCurveCfg::default();
        assert_eq!(draw_convex_curve(&cfg, 3), draw_convex_curve(&cfg, 3));
        let c = draw_convex_curve(&cfg, 3);
        assert_eq!(draw_upper_steps(&c, &cfg, 3), draw_upper_steps(&c, &cfg, 3));
    }

    #[test]
    fn upper_steps_lie_above_lower() {
        let cfg = RandomCurveCfg {
            upper_steps: 6,
            ..Default::default()
        };
        let c = draw_convex_curve(&cfg, 11);
        let steps = draw_upper_steps(&c, &cfg, 11);
        assert_eq!(steps.len(), 6);
        let (mut x, mut y) = (0.0, 0.0);
        for (dx, dy) in &steps {
            assert!(*dx > 0.05 / 6.0 * c.width() - 1e-12);
            x += dx;
            y += dy;
            assert!(y >= c.height_at(x) - 1e-12);
        }
        assert!((x - c.width()).abs() < 1e-12);
        assert!((y - c.height()).abs() < 1e-12);
    }
}
