//! Reorder the reference lower curve along the reference upper curve and print
//! each matched piece with the provenance ranges it carries.
//!
//! Run: `cargo run -p convex-reorder --example reference_figure`

use convex_reorder::prelude::*;

fn main() {
    let lower = Curve::from_flat_coords(&[
        0.0, 0.0, 0.15, 0.0, 0.35, 0.02, 0.42, 0.04, 0.6, 0.12, 0.85, 0.3, 0.92, 0.45, 1.0, 1.0,
    ])
    .expect("reference lower curve is well formed");
    let upper = pairs(&[0.0, 0.0, 0.38, 0.17, 0.74, 0.45, 1.0, 1.0])
        .expect("reference upper curve is well formed");
    let steps = upper_steps(&upper).expect("upper curve has points");

    let pieces = reorder_all(&steps, lower, ReorderCfg::default());
    for (k, (piece, (x, y))) in pieces.iter().zip(&steps).enumerate() {
        println!(
            "step={k} target=({x:.4}, {y:.4}) found=({:.4}, {:.4}) segments={}",
            piece.width(),
            piece.height(),
            piece.len()
        );
        for s in piece.iter() {
            println!(
                "  dx={:.6} dy={:.6} style=[{:.4}, {:.4}]",
                s.dx, s.dy, s.style.range_start, s.style.range_end
            );
        }
    }
}
