//! HSV → RGB conversion for the rainbow gradient.

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[inline]
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Six-sector HSV conversion on unit channels. `h` wraps with period 1, so
/// `h = 1` is red again.
pub fn hsv_to_unit_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).trunc();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Scale a unit channel to `[0,255]`, rounding half to even.
#[inline]
fn channel(c: f64) -> u8 {
    (255.0 * c).round_ties_even().clamp(0.0, 255.0) as u8
}

/// Fully saturated, full-value color of hue `h ∈ [0,1]`.
pub fn hue_to_rgb(h: f64) -> Rgb {
    let (r, g, b) = hsv_to_unit_rgb(h, 1.0, 1.0);
    Rgb::new(channel(r), channel(g), channel(b))
}
