// SPDX-License-Identifier: MIT
//
// Canonical color value and provenance labels.
//
// Every notation converges on one four-component float value. Components
// are NOT guaranteed to lie in 0.0–1.0: a float tuple like `rgb(2.0,0,0)`
// passes through untouched, and only the display conversion
// (`to_rgb8`) clamps. Formatters see the raw values.
//
// Single-character field names (r, g, b, a) are the standard convention.
#![allow(clippy::many_single_char_names)]

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color as four floating-point components.
///
/// Integer-sourced channels are normalized by 255; float-sourced channels
/// are stored as written. Alpha is `1.0` whenever the notation has no
/// alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha (opacity).
    pub a: f64,
}

impl Color {
    /// An opaque color from three components.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// A color from four components.
    #[inline]
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// A color from 8-bit channels, each divided by 255.
    #[must_use]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }

    /// Whether alpha is exactly 1.0.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_opaque(self) -> bool {
        self.a == 1.0
    }

    /// 8-bit RGB for painting a terminal swatch.
    ///
    /// Rounds and clamps to `0..=255`. Display only: formatters never
    /// go through this.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // NaN falls through `clamp` unchanged and `as` maps it to 0.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Provenance ──────────────────────────────────────────────────────────────

/// Whether a tuple was read as integers (÷255) or floats (as written).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Every component parsed as an integer.
    Int,
    /// Every component parsed as a float literal.
    Float,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
        })
    }
}

/// Which notation (and variant) produced a color.
///
/// Purely diagnostic: two colors with different provenance but equal
/// components are the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// `rgb(r,g,b)`.
    Rgb(NumberKind),
    /// `hsl(h,s,l)`.
    Hsl(NumberKind),
    /// `0xRRGGBB`.
    HexRgb,
    /// `0xRRGGBBAA`.
    HexRgba,
    /// `#RRGGBB` or `#RRGGBBAA`.
    Css,
    /// `#RGB`.
    CssShorthand,
    /// A bare name from the named-color table.
    CssNamed,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(kind) => write!(f, "rgb({kind})"),
            Self::Hsl(kind) => write!(f, "hsl({kind})"),
            Self::HexRgb => f.write_str("Hex (RGB)"),
            Self::HexRgba => f.write_str("Hex (RGBA)"),
            Self::Css => f.write_str("CSS"),
            Self::CssShorthand => f.write_str("CSS (shorthand)"),
            Self::CssNamed => f.write_str("CSS (named)"),
        }
    }
}

// ─── Parsed ──────────────────────────────────────────────────────────────────

/// A successful parse: the color plus the label of the notation that matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed {
    /// The canonical value.
    pub color: Color,
    /// Which notation produced it.
    pub provenance: Provenance,
}

impl Parsed {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, provenance: Provenance) -> Self {
        Self { color, provenance }
    }

    /// Same color, different label.
    #[inline]
    #[must_use]
    pub const fn relabel(self, provenance: Provenance) -> Self {
        Self { provenance, ..self }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
