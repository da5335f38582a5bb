//! Gradient rendering of segments into short colored strokes.
//!
//! Purpose
//! - Make provenance visible: a segment whose style range is `[a,b]` is drawn
//!   as `N` equal micro-strokes whose hues sweep from about `a` to about `b`.
//!   After reordering, pieces keep their original hues, so the plot shows where
//!   each piece of the reordered curve came from.
//!
//! Model
//! - `N = ceil(length / precision)`.
//! - Stroke `i` takes the hue at the midpoint of `[i/(N+1), (i+1)/(N+1)]`
//!   within the style range. The `N+1` denominator keeps the last stroke of a
//!   segment short of the range end, so adjacent segments do not repeat the
//!   boundary hue.
//! - Color is HSV `(hue, 1, 1)` converted to 8-bit RGB.
//!
//! References
//! - Code cross-refs: `segment::Segment`, `color::hue_to_rgb`, `tikz`

mod color;
pub mod tikz;

pub use color::{hsv_to_unit_rgb, hue_to_rgb, Rgb};

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// One colored micro-stroke with relative displacement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgb,
    /// Hue in `[0,1]` the color was derived from.
    pub hue: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Number of micro-strokes for `segment` at the given precision.
#[inline]
pub fn stroke_count(segment: &Segment, precision: f64) -> usize {
    (segment.length() / precision).ceil() as usize
}

/// Subdivide `segment` into colored micro-strokes. Their displacements sum to
/// the segment's displacement (up to rounding). Zero-length segments produce
/// no strokes.
///
/// Panics if `precision` is not a positive finite number.
pub fn render(segment: &Segment, precision: f64) -> Vec<Stroke> {
    assert!(
        precision > 0.0 && precision.is_finite(),
        "render precision must be positive and finite, got {precision}"
    );
    let n = stroke_count(segment, precision);
    let dx = segment.dx / n as f64;
    let dy = segment.dy / n as f64;
    let denom = (n + 1) as f64;
    (0..n)
        .map(|i| {
            let lower = i as f64 / denom;
            let upper = (i + 1) as f64 / denom;
            let hue = segment.style.at((lower + upper) / 2.0);
            Stroke {
                color: hue_to_rgb(hue),
                hue,
                dx,
                dy,
            }
        })
        .collect()
}

/// Render every segment in order and concatenate the strokes.
pub fn render_all<'a>(
    segments: impl IntoIterator<Item = &'a Segment>,
    precision: f64,
) -> Vec<Stroke> {
    segments
        .into_iter()
        .flat_map(|s| render(s, precision))
        .collect()
}

#[cfg(test)]
mod tests;
