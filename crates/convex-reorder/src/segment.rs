//! Directed line segments tagged with a provenance range.
//!
//! - `Style`: the `[range_start, range_end]` fraction of the original curve a
//!   segment stems from. Only used for coloring, never for geometry.
//! - `Segment`: relative displacement `(dx, dy)` plus its `Style`.
//!
//! References
//! - Code cross-refs: `curve::Curve`, `reorder::reorder`, `render::render`

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Fraction-of-original-curve range covered by a segment, `0 ≤ start ≤ end ≤ 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub range_start: f64,
    pub range_end: f64,
}

impl Style {
    #[inline]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            range_start,
            range_end,
        }
    }

    /// The full original curve.
    #[inline]
    pub fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.range_end - self.range_start
    }

    /// Absolute position of the relative fraction `t ∈ [0,1]` inside this range.
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.range_start + t * self.width()
    }
}

/// Line segment with relative dimensions only; its start point is implied by
/// its position inside a `Curve`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub dx: f64,
    pub dy: f64,
    pub style: Style,
}

impl Segment {
    #[inline]
    pub fn new(dx: f64, dy: f64, style: Style) -> Self {
        Self { dx, dy, style }
    }

    #[inline]
    pub fn displacement(&self) -> Vector2<f64> {
        Vector2::new(self.dx, self.dy)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.displacement().norm()
    }

    /// True iff both components are exactly zero. Such pieces are produced by
    /// splitting at an endpoint and are dropped before they reach a curve.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Split at `fraction ∈ [0,1]` into `(left, right)`.
    ///
    /// Pre: `0 ≤ fraction ≤ 1` (not checked in release builds).
    /// Post: `left + right` reproduces `dx`, `dy` and the style range up to rounding.
    pub fn split(&self, fraction: f64) -> (Segment, Segment) {
        debug_assert!(
            (0.0..=1.0).contains(&fraction),
            "split fraction {fraction} outside [0,1]"
        );
        let left_style = Style::new(self.style.range_start, self.style.at(fraction));
        let right_style = Style::new(left_style.range_end, self.style.range_end);
        let left = Segment::new(fraction * self.dx, fraction * self.dy, left_style);
        let right = Segment::new(
            (1.0 - fraction) * self.dx,
            (1.0 - fraction) * self.dy,
            right_style,
        );
        (left, right)
    }
}
