// SPDX-License-Identifier: MIT
//
// Functional notations: `rgb(…)` and `hsl(…)`.
//
// Both read a 3-tuple through the shared tuple grammar. `rgb` maps the
// components straight onto channels. `hsl` has two modes:
//
//   Compat    The triple is pushed through an RGB→HLS transform as if it
//             were already RGB, and the result `(h, l, s)` is reordered to
//             `(h, s, l)` and used as the channels. Not a real HSL→RGB
//             conversion. Default.
//   Standard  Reads the triple as `(h, s, l)`, with `h` as a fraction of a
//             full turn, and converts HSL→RGB properly.
//
// Single-character math names are the color-science convention.
#![allow(clippy::many_single_char_names)]

use serde::{Deserialize, Serialize};

use crate::color::{Color, Parsed, Provenance};
use crate::error::ParseError;
use crate::tuple::parse_tuple;

/// How `hsl(…)` tuples are turned into channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslMode {
    /// RGB→HLS transform with lightness/saturation swapped.
    #[default]
    Compat,
    /// Real HSL→RGB conversion.
    Standard,
}

/// Parse the remainder after `rgb`.
///
/// # Errors
///
/// Propagates tuple errors: [`ParseError::MalformedTuple`] or
/// [`ParseError::BadComponentValue`].
pub fn parse_rgb(s: &str) -> Result<Parsed, ParseError> {
    let tuple = parse_tuple::<3>(s)?;
    let [r, g, b] = tuple.values;
    Ok(Parsed::new(Color::rgb(r, g, b), Provenance::Rgb(tuple.kind)))
}

/// Parse the remainder after `hsl`.
///
/// # Errors
///
/// Propagates tuple errors: [`ParseError::MalformedTuple`] or
/// [`ParseError::BadComponentValue`].
pub fn parse_hsl(s: &str, mode: HslMode) -> Result<Parsed, ParseError> {
    let tuple = parse_tuple::<3>(s)?;
    let [x, y, z] = tuple.values;

    let (r, g, b) = match mode {
        HslMode::Compat => {
            let (h, l, s) = rgb_to_hls(x, y, z);
            (h, s, l)
        }
        HslMode::Standard => hls_to_rgb(x, z, y),
    };

    Ok(Parsed::new(Color::rgb(r, g, b), Provenance::Hsl(tuple.kind)))
}

// ─── Conversions ─────────────────────────────────────────────────────────────
//
// HLS ordering (hue, lightness, saturation), all on a 0–1 scale. Hue wraps
// into [0, 1) with a floored modulo, so negative hues land in range too.

/// RGB → HLS.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sumc = maxc + minc;
    let rangec = maxc - minc;
    let l = sumc / 2.0;

    if minc == maxc {
        return (0.0, l, 0.0);
    }

    let s = if l <= 0.5 {
        rangec / sumc
    } else {
        rangec / (2.0 - sumc)
    };

    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), l, s)
}

/// HLS → RGB.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0f64.mul_add(l, -m2);

    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        return ((m2 - m1) * hue).mul_add(6.0, m1);
    }
    if hue < 0.5 {
        return m2;
    }
    if hue < 2.0 / 3.0 {
        return ((m2 - m1) * (2.0 / 3.0 - hue)).mul_add(6.0, m1);
    }
    m1
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NumberKind;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_rgb_close(actual: Color, expected: (f64, f64, f64)) {
        let (r, g, b) = expected;
        assert!(
            approx_eq(actual.r, r) && approx_eq(actual.g, g) && approx_eq(actual.b, b),
            "got ({}, {}, {}), expected ({r}, {g}, {b})",
            actual.r,
            actual.g,
            actual.b
        );
    }

    // ── rgb() ───────────────────────────────────────────────────────────

    #[test]
    fn rgb_ints() {
        let p = parse_rgb("(255,0,0)").unwrap();
        assert_eq!(p.color, Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(p.provenance, Provenance::Rgb(NumberKind::Int));
        assert_eq!(p.provenance.to_string(), "rgb(int)");
    }

    #[test]
    fn rgb_floats() {
        let p = parse_rgb("(1.0,0,0)").unwrap();
        assert_eq!(p.color, Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(p.provenance.to_string(), "rgb(float)");
    }

    #[test]
    fn rgb_float_out_of_range_kept() {
        assert_eq!(parse_rgb("(2.0,0,0)").unwrap().color.r, 2.0);
    }

    #[test]
    fn rgb_arity_error() {
        assert_eq!(
            parse_rgb("(1,2)"),
            Err(ParseError::MalformedTuple {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rgb_bad_values() {
        assert_eq!(parse_rgb("(x,y,z)"), Err(ParseError::BadComponentValue));
    }

    // ── hsl() compat ────────────────────────────────────────────────────

    #[test]
    fn hsl_compat_of_pure_red_triple() {
        // (1,0,0) as RGB → hls (0, 0.5, 1) → reordered (0, 1, 0.5).
        let p = parse_hsl("(1.0,0.0,0.0)", HslMode::Compat).unwrap();
        assert_rgb_close(p.color, (0.0, 1.0, 0.5));
        assert_eq!(p.color.a, 1.0);
        assert_eq!(p.provenance.to_string(), "hsl(float)");
    }

    #[test]
    fn hsl_compat_gray_has_zero_hue_and_saturation() {
        let p = parse_hsl("(0.4,0.4,0.4)", HslMode::Compat).unwrap();
        assert_rgb_close(p.color, (0.0, 0.0, 0.4));
    }

    #[test]
    fn hsl_compat_ints_are_scaled_first() {
        let p = parse_hsl("(0,255,0)", HslMode::Compat).unwrap();
        // (0,1,0) → hls (1/3, 0.5, 1) → (1/3, 1, 0.5).
        assert_rgb_close(p.color, (1.0 / 3.0, 1.0, 0.5));
        assert_eq!(p.provenance, Provenance::Hsl(NumberKind::Int));
    }

    // ── hsl() standard ──────────────────────────────────────────────────

    #[test]
    fn hsl_standard_red() {
        let p = parse_hsl("(0.0,1.0,0.5)", HslMode::Standard).unwrap();
        assert_rgb_close(p.color, (1.0, 0.0, 0.0));
    }

    #[test]
    fn hsl_standard_green() {
        let p = parse_hsl("(0.3333333333333333,1.0,0.5)", HslMode::Standard).unwrap();
        assert_rgb_close(p.color, (0.0, 1.0, 0.0));
    }

    #[test]
    fn hsl_standard_gray() {
        let p = parse_hsl("(0.7,0.0,0.25)", HslMode::Standard).unwrap();
        assert_rgb_close(p.color, (0.25, 0.25, 0.25));
    }

    #[test]
    fn hsl_errors_propagate() {
        assert_eq!(
            parse_hsl("(1,2,3,4)", HslMode::Standard),
            Err(ParseError::MalformedTuple {
                expected: 3,
                found: 4
            })
        );
    }

    // ── Conversions ─────────────────────────────────────────────────────

    #[test]
    fn hls_roundtrip() {
        let samples = [
            (0.2, 0.4, 0.6),
            (0.9, 0.1, 0.3),
            (0.5, 0.5, 0.1),
            (1.0, 1.0, 0.0),
        ];
        for (r, g, b) in samples {
            let (h, l, s) = rgb_to_hls(r, g, b);
            let (rr, rg, rb) = hls_to_rgb(h, l, s);
            assert!(
                approx_eq(r, rr) && approx_eq(g, rg) && approx_eq(b, rb),
                "({r}, {g}, {b}) → ({rr}, {rg}, {rb})"
            );
        }
    }

    #[test]
    fn hue_wraps_negative() {
        // Red is max and blue exceeds green, so the raw hue is below zero.
        let (h, _, _) = rgb_to_hls(1.0, 0.0, 0.5);
        assert!((0.0..1.0).contains(&h));
        assert!(approx_eq(h, 1.0 - 0.5 / 6.0));
    }

    #[test]
    fn light_colors_use_upper_saturation_branch() {
        let (_, l, s) = rgb_to_hls(1.0, 0.8, 0.8);
        assert!(approx_eq(l, 0.9));
        assert!(approx_eq(s, 1.0));
    }
}
