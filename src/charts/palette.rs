//! Colour scales shared by the interactive and static charts.

/// ColorBrewer RdYlGn, 11 classes, red (low) to green (high).
const RDYLGN: [(u8, u8, u8); 11] = [
    (165, 0, 38),
    (215, 48, 39),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (217, 239, 139),
    (166, 217, 106),
    (102, 189, 99),
    (26, 152, 80),
    (0, 104, 55),
];

/// Categorical colours for work-model slices and plain bars.
pub const CATEGORY: [(u8, u8, u8); 8] = [
    (99, 110, 250),
    (239, 85, 59),
    (0, 204, 150),
    (171, 99, 250),
    (255, 161, 90),
    (25, 211, 243),
    (255, 102, 146),
    (182, 232, 128),
];

/// Primary bar colour.
pub const BAR: (u8, u8, u8) = CATEGORY[0];

pub fn category(index: usize) -> (u8, u8, u8) {
    CATEGORY[index % CATEGORY.len()]
}

/// Sample RdYlGn at `t` in `[0, 1]`; out-of-range values are clamped.
pub fn rdylgn(t: f64) -> (u8, u8, u8) {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (RDYLGN.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(RDYLGN.len() - 1);
    let frac = scaled - lower as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (RDYLGN[lower], RDYLGN[upper]);
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Position of `value` within `[min, max]`; a degenerate range maps to the middle.
pub fn scale_position(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(rdylgn(0.0), (165, 0, 38));
        assert_eq!(rdylgn(1.0), (0, 104, 55));
        assert_eq!(rdylgn(0.5), (255, 255, 191));
        assert_eq!(rdylgn(-3.0), rdylgn(0.0));
        assert_eq!(rdylgn(f64::NAN), rdylgn(0.5));
    }

    #[test]
    fn interpolates_between_stops() {
        let (r, g, b) = rdylgn(0.05);
        assert_eq!((r, g, b), (190, 24, 39));
    }

    #[test]
    fn positions() {
        assert_eq!(scale_position(5.0, 0.0, 10.0), 0.5);
        assert_eq!(scale_position(3.0, 3.0, 3.0), 0.5);
        assert_eq!(category(9), CATEGORY[1]);
    }
}
