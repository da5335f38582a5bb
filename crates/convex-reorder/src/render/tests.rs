use super::*;
use crate::segment::{Segment, Style};

#[test]
fn pinned_colors_use_n_plus_one_denominator() {
    // length 5, precision 2 -> N = 3, hue midpoints 1/8, 3/8, 5/8
    let s = Segment::new(3.0, 4.0, Style::full());
    let strokes = render(&s, 2.0);
    assert_eq!(strokes.len(), 3);
    let colors: Vec<Rgb> = strokes.iter().map(|st| st.color).collect();
    assert_eq!(
        colors,
        vec![
            Rgb::new(255, 191, 0),
            Rgb::new(0, 255, 64),
            Rgb::new(0, 64, 255)
        ]
    );
    let hues: Vec<f64> = strokes.iter().map(|st| st.hue).collect();
    assert_eq!(hues, vec![0.125, 0.375, 0.625]);
}

#[test]
fn strokes_reconstruct_displacement() {
    let s = Segment::new(0.37, 0.91, Style::new(0.2, 0.6));
    for precision in [0.005, 0.013, 0.1, 0.5, 10.0] {
        let strokes = render(&s, precision);
        assert_eq!(strokes.len(), stroke_count(&s, precision));
        let dx: f64 = strokes.iter().map(|st| st.dx).sum();
        let dy: f64 = strokes.iter().map(|st| st.dy).sum();
        assert!((dx - s.dx).abs() < 1e-12, "precision {precision}");
        assert!((dy - s.dy).abs() < 1e-12, "precision {precision}");
    }
}

#[test]
fn hues_increase_inside_style_range() {
    let s = Segment::new(0.2, 0.1, Style::new(0.3, 0.55));
    let strokes = render(&s, 0.01);
    assert!(strokes.len() > 2);
    for w in strokes.windows(2) {
        assert!(w[0].hue < w[1].hue);
    }
    assert!(strokes[0].hue > 0.3);
    assert!(strokes[strokes.len() - 1].hue < 0.55);
}

#[test]
fn zero_length_segment_has_no_strokes() {
    let s = Segment::new(0.0, 0.0, Style::new(0.4, 0.4));
    assert!(render(&s, 0.1).is_empty());
}

#[test]
fn single_stroke_when_precision_exceeds_length() {
    let s = Segment::new(0.1, 0.0, Style::new(0.0, 0.5));
    let strokes = render(&s, 1.0);
    assert_eq!(strokes.len(), 1);
    // midpoint of [0, 1/2] within [0, 0.5]
    assert!((strokes[0].hue - 0.125).abs() < 1e-12);
    assert_eq!(strokes[0].dx, 0.1);
}

#[test]
fn render_all_concatenates_in_order() {
    let segs = [
        Segment::new(0.5, 0.0, Style::new(0.0, 0.5)),
        Segment::new(0.0, 0.5, Style::new(0.5, 1.0)),
    ];
    let strokes = render_all(&segs, 0.1);
    assert_eq!(strokes.len(), 10);
    assert!(strokes[..5].iter().all(|s| s.dy == 0.0));
    assert!(strokes[5..].iter().all(|s| s.dx == 0.0));
}

#[test]
#[should_panic(expected = "precision")]
fn non_positive_precision_panics() {
    let s = Segment::new(1.0, 1.0, Style::full());
    let _ = render(&s, 0.0);
}
