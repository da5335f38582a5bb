//! TikZ/pgfplots drawing commands for rendered strokes.
//!
//! Every stroke continues from the named coordinate `(x)` and moves it, so a
//! figure is `START` followed by the strokes of its segments in drawing order.

use super::{render, Stroke};
use crate::segment::Segment;

/// Places the running coordinate `(x)` at the axis origin.
pub const START: &str = "\\draw (axis cs:0, 0) coordinate (x);";

/// Default document preamble: a standalone pgfplots axis on the unit square.
pub const DEFAULT_HEAD: &str = "\\documentclass{standalone}
\\usepackage{pgfplots}
\\pgfplotsset{compat=1.16}
\\begin{document}
\\begin{tikzpicture}
\\begin{axis}[xmin=0, xmax=1, ymin=0, ymax=1, axis equal image, xlabel={$x$}, ylabel={$y$}]
";

/// Default document postamble matching `DEFAULT_HEAD`.
pub const DEFAULT_FOOT: &str = "
\\end{axis}
\\end{tikzpicture}
\\end{document}
";

/// One `\draw` command for `stroke`.
pub fn stroke_command(stroke: &Stroke) -> String {
    format!(
        "\\draw[very thick,line cap=round,draw={{rgb,255:red,{}; green,{}; blue,{}}}] (x) \
         -- ++(axis direction cs:{},{}) coordinate (x);",
        stroke.color.red, stroke.color.green, stroke.color.blue, stroke.dx, stroke.dy
    )
}

/// `START` followed by the gradient strokes of all segments, one command per line.
pub fn curve_commands<'a>(
    segments: impl IntoIterator<Item = &'a Segment>,
    precision: f64,
) -> String {
    let mut out = String::from(START);
    out.push('\n');
    for segment in segments {
        for stroke in render(segment, precision) {
            out.push_str(&stroke_command(&stroke));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;
    use crate::segment::Style;

    #[test]
    fn stroke_command_format() {
        let s = Stroke {
            color: Rgb::new(255, 191, 0),
            hue: 0.125,
            dx: 0.5,
            dy: 0.25,
        };
        assert_eq!(
            stroke_command(&s),
            "\\draw[very thick,line cap=round,draw={rgb,255:red,255; green,191; blue,0}] (x) \
             -- ++(axis direction cs:0.5,0.25) coordinate (x);"
        );
    }

    #[test]
    fn curve_commands_start_at_origin() {
        let segs = [
            Segment::new(0.5, 0.0, Style::new(0.0, 0.5)),
            Segment::new(0.5, 1.0, Style::new(0.5, 1.0)),
        ];
        let text = curve_commands(&segs, 0.25);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(START));
        // ceil(0.5/0.25) + ceil(sqrt(1.25)/0.25)
        assert_eq!(lines.count(), 2 + 5);
    }

    #[test]
    fn empty_curve_only_places_origin() {
        let none: [Segment; 0] = [];
        let text = curve_commands(&none, 0.1);
        assert_eq!(text, format!("{START}\n"));
    }
}
