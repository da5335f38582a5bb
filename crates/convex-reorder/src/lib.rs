//! Reordering of piecewise-linear convex curves, with provenance-colored rendering.
//!
//! A convex "lower" curve is consumed step by step: each step of an "upper"
//! curve, given as a displacement `(width, height)`, is matched by a contiguous
//! piece of what remains of the lower curve. Every piece remembers which
//! fraction of the original lower curve it came from (its `Style`), and the
//! renderer turns that into a rainbow gradient for plots.
//!
//! Modules
//! - `segment`: `Segment`, `Style` and proportional splitting.
//! - `curve`: `Curve` and construction from coordinates.
//! - `reorder`: the two-pointer sweep (`reorder`, `reorder_all`).
//! - `render`: gradient micro-strokes and TikZ drawing commands.
//! - `rand`: seeded convex fixtures for tests, benches and demos.
//!
//! API Policy
//! - Project-internal; no stable public API.

pub mod curve;
pub mod rand;
pub mod render;
pub mod reorder;
pub mod segment;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use curve::{Curve, CurveError};
pub use reorder::{reorder, reorder_all, reorder_with_cfg, ReorderCfg, EPS};
pub use render::{render, render_all, Rgb, Stroke};
pub use segment::{Segment, Style};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::curve::{pairs, upper_steps, Curve, CurveError};
    pub use crate::rand::{draw_convex_curve, draw_upper_steps, RandomCurveCfg};
    pub use crate::render::tikz::{curve_commands, stroke_command, START};
    pub use crate::render::{render, render_all, Rgb, Stroke};
    pub use crate::reorder::{reorder, reorder_all, reorder_with_cfg, ReorderCfg, EPS};
    pub use crate::segment::{Segment, Style};
    pub use nalgebra::Vector2 as Vec2;
}
