//! Color mapping utilities for SVG visualization.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", h, s, l)
    }
}

/// Fill for regions without a joined value.
pub(crate) const NO_DATA: Rgb = Rgb { r: 255, g: 255, b: 255 };

/// Sequential orange-red ramp (ColorBrewer OrRd, 9 classes), light to dark.
const ORRD: [Rgb; 9] = [
    Rgb { r: 0xff, g: 0xf7, b: 0xec },
    Rgb { r: 0xfe, g: 0xe8, b: 0xc8 },
    Rgb { r: 0xfd, g: 0xd4, b: 0x9e },
    Rgb { r: 0xfd, g: 0xbb, b: 0x84 },
    Rgb { r: 0xfc, g: 0x8d, b: 0x59 },
    Rgb { r: 0xef, g: 0x65, b: 0x48 },
    Rgb { r: 0xd7, g: 0x30, b: 0x1f },
    Rgb { r: 0xb3, g: 0x00, b: 0x00 },
    Rgb { r: 0x7f, g: 0x00, b: 0x00 },
];

/// Continuous OrRd color for `t` in [0.0, 1.0], interpolating between ramp stops.
pub(crate) fn orrd_color(t: f64) -> Rgb {
    // Handle NaN / infinities: fall back to the lightest stop.
    if !t.is_finite() { return ORRD[0] }

    let x = t.clamp(0.0, 1.0) * (ORRD.len() - 1) as f64;
    let lo = x.floor() as usize;
    let hi = (lo + 1).min(ORRD.len() - 1);
    let frac = x - lo as f64;

    let lerp = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * frac)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgb {
        r: lerp(ORRD[lo].r, ORRD[hi].r),
        g: lerp(ORRD[lo].g, ORRD[hi].g),
        b: lerp(ORRD[lo].b, ORRD[hi].b),
    }
}

/// Scale each value into the ramp between the min and max of the present values.
/// Missing values get [`NO_DATA`]. A single distinct value maps to the lightest stop.
pub(crate) fn choropleth_colors(values: &[Option<f64>]) -> Vec<Rgb> {
    let present = values.iter().flatten().copied().filter(|v| v.is_finite());
    let (min, max) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = max - min;

    values.iter()
        .map(|value| match value {
            Some(v) if v.is_finite() => {
                let t = if range > 0.0 { (v - min) / range } else { 0.0 };
                orrd_color(t)
            }
            _ => NO_DATA,
        })
        .collect()
}

const GOLDEN_ANGLE: f64 = 137.50776405;

/// Well-separated categorical colors, one per slice index.
pub(crate) fn golden_angle_color(index: usize) -> Hsl {
    Hsl { h: ((index as f64) * GOLDEN_ANGLE) % 360.0, s: 0.70, l: 0.55 }
}
