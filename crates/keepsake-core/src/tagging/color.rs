//! Nearest named color for RGB samples.

use crate::types::Rgb;

/// Reference palette. On an exact distance tie the earlier entry wins.
pub const PALETTE: &[(&str, Rgb)] = &[
    ("black", Rgb(0, 0, 0)),
    ("white", Rgb(255, 255, 255)),
    ("gray", Rgb(128, 128, 128)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 255, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("orange", Rgb(255, 165, 0)),
    ("purple", Rgb(128, 0, 128)),
    ("pink", Rgb(255, 192, 203)),
    ("brown", Rgb(165, 42, 42)),
];

/// Name of the palette color closest to `rgb` in Euclidean RGB distance.
///
/// Squared distances are compared directly; the ordering is the same and
/// the integer math keeps ties exact.
pub fn color_name(rgb: Rgb) -> &'static str {
    let mut best = PALETTE[0].0;
    let mut best_distance = u32::MAX;

    for (name, reference) in PALETTE {
        let distance = squared_distance(rgb, *reference);
        if distance < best_distance {
            best_distance = distance;
            best = *name;
        }
    }

    best
}

fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = a.0.abs_diff(b.0) as u32;
    let dg = a.1.abs_diff(b.1) as u32;
    let db = a.2.abs_diff(b.2) as u32;
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_black_and_white() {
        assert_eq!(color_name(Rgb(10, 10, 10)), "black");
        assert_eq!(color_name(Rgb(250, 250, 250)), "white");
    }

    #[test]
    fn test_exact_palette_entries_name_themselves() {
        for (name, rgb) in PALETTE {
            assert_eq!(color_name(*rgb), *name);
        }
    }

    #[test]
    fn test_mid_tones() {
        assert_eq!(color_name(Rgb(120, 130, 125)), "gray");
        assert_eq!(color_name(Rgb(230, 20, 10)), "red");
        assert_eq!(color_name(Rgb(250, 180, 190)), "pink");
        assert_eq!(color_name(Rgb(150, 50, 40)), "brown");
    }

    #[test]
    fn test_tie_goes_to_earlier_entry() {
        let sample = Rgb(210, 20, 22);
        assert_eq!(squared_distance(sample, Rgb(255, 0, 0)), 2909);
        assert_eq!(squared_distance(sample, Rgb(165, 42, 42)), 2909);
        assert_eq!(color_name(sample), "red");
    }
}
