//! Polylines from the origin, stored as ordered relative segments.
//!
//! A `Curve` is the input and output type of the reorder engine. Building a
//! curve from raw coordinates is the only fallible operation here; everything
//! else is plain bookkeeping.
//!
//! Conventions
//! - The first point of a coordinate list is the origin of the polyline; the
//!   curve itself only stores displacements.
//! - Styles of a freshly built curve are cumulative Euclidean length fractions,
//!   so consecutive ranges are contiguous and cover `[0,1]`.

use std::ops::Deref;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::segment::{Segment, Style};

/// Errors raised while turning raw coordinates into curves or upper steps.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    #[error("coordinate list must have an even number of entries, got {0}")]
    OddCoordinateCount(usize),
    #[error("need at least {need} points, got {got}")]
    TooFewPoints { got: usize, need: usize },
    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },
    #[error("polyline has zero total length")]
    ZeroLength,
}

/// Ordered sequence of segments forming a polyline from `(0,0)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    segments: Vec<Segment>,
}

impl Curve {
    #[inline]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Σ dx.
    pub fn width(&self) -> f64 {
        self.segments.iter().map(|s| s.dx).sum()
    }

    /// Σ dy.
    pub fn height(&self) -> f64 {
        self.segments.iter().map(|s| s.dy).sum()
    }

    pub fn total(&self) -> Vector2<f64> {
        Vector2::new(self.width(), self.height())
    }

    /// Append all segments of `other`.
    pub fn extend_from(&mut self, other: Curve) {
        self.segments.extend(other.segments);
    }

    /// Absolute vertices of the polyline, starting at the origin.
    pub fn points(&self) -> Vec<Vector2<f64>> {
        let mut out = Vec::with_capacity(self.segments.len() + 1);
        let mut p = Vector2::zeros();
        out.push(p);
        for s in &self.segments {
            p += s.displacement();
            out.push(p);
        }
        out
    }

    /// Height of the polyline above `x`, measured from the origin.
    /// Clamped to the endpoints outside `[0, width]`; vertical segments resolve
    /// to their lower end.
    pub fn height_at(&self, x: f64) -> f64 {
        let mut cx = 0.0;
        let mut cy = 0.0;
        for s in &self.segments {
            if s.dx > 0.0 && x <= cx + s.dx {
                let t = ((x - cx) / s.dx).max(0.0);
                return cy + t * s.dy;
            }
            cx += s.dx;
            cy += s.dy;
        }
        cy
    }

    /// Non-negative widths and non-decreasing slopes, cross-multiplied so
    /// vertical segments work. Tolerates violations up to `eps` in the cross
    /// product.
    pub fn is_convex_eps(&self, eps: f64) -> bool {
        self.segments.iter().all(|s| s.dx >= 0.0)
            && self
                .segments
                .windows(2)
                .all(|w| w[0].dx * w[1].dy - w[0].dy * w[1].dx >= -eps)
    }

    /// Heights of the leftmost and rightmost windows of the given width.
    /// For a convex curve every window of that width has a height in between,
    /// so this is the feasible `target_y` range of a reorder step.
    pub fn window_height_range(&self, width: f64) -> (f64, f64) {
        let total_x = self.width();
        let total_y = self.height();
        let lowest = self.height_at(width);
        let highest = total_y - self.height_at(total_x - width);
        (lowest, highest)
    }

    /// Build from absolute points; styles are cumulative length fractions.
    /// Repeated points are skipped.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                got: points.len(),
                need: 2,
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(CurveError::NonFinite { index });
        }
        let displacements: Vec<Vector2<f64>> = points
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| d.norm() > 0.0)
            .collect();
        if displacements.is_empty() {
            return Err(CurveError::ZeroLength);
        }
        Ok(Self::with_length_styles(&displacements))
    }

    /// Styles are cumulative length fractions of `displacements`.
    /// Pre: every displacement has positive length.
    pub(crate) fn with_length_styles(displacements: &[Vector2<f64>]) -> Self {
        let total: f64 = displacements.iter().map(|d| d.norm()).sum();
        let mut so_far = 0.0;
        let segments = displacements
            .iter()
            .map(|d| {
                let len = d.norm();
                let style = Style::new(so_far / total, (so_far + len) / total);
                so_far += len;
                Segment::new(d.x, d.y, style)
            })
            .collect();
        Self { segments }
    }

    /// Build from a flat list `x1 y1 x2 y2 …`.
    pub fn from_flat_coords(coords: &[f64]) -> Result<Self, CurveError> {
        Self::from_points(&pairs(coords)?)
    }
}

impl Deref for Curve {
    type Target = [Segment];
    fn deref(&self) -> &[Segment] {
        &self.segments
    }
}

impl From<Vec<Segment>> for Curve {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Curve {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Curve {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Group a flat coordinate list into points.
pub fn pairs(coords: &[f64]) -> Result<Vec<Vector2<f64>>, CurveError> {
    if coords.len() % 2 == 1 {
        return Err(CurveError::OddCoordinateCount(coords.len()));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Vector2::new(c[0], c[1]))
        .collect())
}

/// Per-step displacements `(dx, dy)` of an upper polyline given by its points.
pub fn upper_steps(points: &[Vector2<f64>]) -> Result<Vec<(f64, f64)>, CurveError> {
    if points.is_empty() {
        return Err(CurveError::TooFewPoints { got: 0, need: 1 });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(CurveError::NonFinite { index });
    }
    Ok(points
        .windows(2)
        .map(|w| (w[1].x - w[0].x, w[1].y - w[0].y))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn styles_are_cumulative_length_fractions() {
        let c = Curve::from_flat_coords(&[0.0, 0.0, 3.0, 0.0, 3.0, 1.0]).unwrap();
        assert_eq!(c.len(), 2);
        assert!((c[0].style.range_start - 0.0).abs() < 1e-12);
        assert!((c[0].style.range_end - 0.75).abs() < 1e-12);
        assert_eq!(c[0].style.range_end, c[1].style.range_start);
        assert!((c[1].style.range_end - 1.0).abs() < 1e-12);
        assert!((c.width() - 3.0).abs() < 1e-12 && (c.height() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn origin_offset_is_dropped() {
        let c = Curve::from_points(&[vector![1.0, 1.0], vector![2.0, 3.0]]).unwrap();
        assert_eq!(c[0].dx, 1.0);
        assert_eq!(c[0].dy, 2.0);
        assert_eq!(c[0].style, Style::full());
    }

    #[test]
    fn repeated_points_are_skipped() {
        let c = Curve::from_flat_coords(&[0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 1.0, 1.0]).unwrap();
        assert_eq!(c.len(), 2);
        assert!(c.iter().all(|s| !s.is_degenerate()));
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            Curve::from_flat_coords(&[0.0, 0.0, 1.0]),
            Err(CurveError::OddCoordinateCount(3))
        );
        assert_eq!(
            Curve::from_flat_coords(&[0.0, 0.0]),
            Err(CurveError::TooFewPoints { got: 1, need: 2 })
        );
        assert_eq!(
            Curve::from_flat_coords(&[1.0, 1.0, 1.0, 1.0]),
            Err(CurveError::ZeroLength)
        );
        assert_eq!(
            Curve::from_flat_coords(&[0.0, 0.0, f64::NAN, 1.0]),
            Err(CurveError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn upper_steps_are_differences() {
        let pts = pairs(&[0.0, 0.0, 0.38, 0.17, 0.74, 0.45, 1.0, 1.0]).unwrap();
        let steps = upper_steps(&pts).unwrap();
        assert_eq!(steps.len(), 3);
        assert!((steps[1].0 - 0.36).abs() < 1e-12);
        assert!((steps[2].1 - 0.55).abs() < 1e-12);
    }

    #[test]
    fn height_at_interpolates_and_clamps() {
        let c = Curve::from_flat_coords(&[0.0, 0.0, 0.5, 0.0, 1.0, 1.0]).unwrap();
        assert!(c.height_at(0.25).abs() < 1e-12);
        assert!((c.height_at(0.75) - 0.5).abs() < 1e-12);
        assert!((c.height_at(2.0) - 1.0).abs() < 1e-12);
        assert!(c.height_at(-1.0).abs() < 1e-12);
    }

    #[test]
    fn convexity_check() {
        let convex = Curve::from_flat_coords(&[0.0, 0.0, 0.5, 0.1, 1.0, 1.0]).unwrap();
        assert!(convex.is_convex_eps(0.0));
        let concave = Curve::from_flat_coords(&[0.0, 0.0, 0.5, 0.9, 1.0, 1.0]).unwrap();
        assert!(!concave.is_convex_eps(0.0));
        let backwards = Curve::from_flat_coords(&[0.0, 0.0, -1.0, 1.0]).unwrap();
        assert!(!backwards.is_convex_eps(0.0));
        let points = convex.points();
        assert_eq!(points.len(), 3);
        assert!((points[2] - vector![1.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn window_height_range_spans_first_and_last_windows() {
        let c = Curve::from_flat_coords(&[0.0, 0.0, 0.7, 0.3, 1.0, 1.0]).unwrap();
        let (lo, hi) = c.window_height_range(0.5);
        assert!((lo - 0.5 * 0.3 / 0.7).abs() < 1e-12);
        // last half: 0.2 of the flat part plus the whole steep part
        assert!((hi - (0.2 * 0.3 / 0.7 + 0.7)).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_a_plain_segment_list() {
        let c = Curve::new(vec![
            Segment::new(0.5, 0.25, Style::new(0.0, 0.5)),
            Segment::new(0.5, 0.75, Style::new(0.5, 1.0)),
        ]);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["dy"], 0.75);
        assert_eq!(json[1]["style"]["range_start"], 0.5);

        let parsed: Curve = serde_json::from_str(
            r#"[{"dx": 0.5, "dy": 0.25, "style": {"range_start": 0.0, "range_end": 0.5}},
                {"dx": 0.5, "dy": 0.75, "style": {"range_start": 0.5, "range_end": 1.0}}]"#,
        )
        .unwrap();
        assert_eq!(parsed, c);
    }
}
