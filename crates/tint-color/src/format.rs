// SPDX-License-Identifier: MIT
//
// Output notations for a parsed color.
//
// Three one-shot renderers: a component tuple, packed hex with a `0x`
// prefix, and CSS hex with `#`. None of them clamp. Channels are scaled
// by 255 and truncated toward zero, so out-of-range floats produce
// out-of-range integers and the packed value spills past its nominal
// width. A negative packed value prints its sign ahead of the zero
// padding (`0x-00005`).
//
// Packing happens in `i128`. A channel with no integer value (NaN or
// infinite after scaling) or a packed value past 128 bits is a
// `FormatError`, never a wrapped number.

use crate::color::Color;
use crate::error::FormatError;

/// Significant digits in [`format_component`].
const COMPONENT_DIGITS: i32 = 4;

/// Scaled channels at or beyond this magnitude do not fit in `i128`.
#[allow(clippy::cast_precision_loss)]
const I128_LIMIT: f64 = i128::MAX as f64;

/// Packed-hex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexWidth {
    /// `0xRRGGBB`, alpha dropped.
    #[default]
    Rgb,
    /// `0xRRGGBBAA`.
    Rgba,
}

impl HexWidth {
    /// Zero-padded digit count.
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Rgb => 6,
            Self::Rgba => 8,
        }
    }
}

/// `r, g, b` with each component to 4 significant digits.
#[must_use]
pub fn format_rgb(color: Color) -> String {
    [color.r, color.g, color.b]
        .map(format_component)
        .join(", ")
}

/// Packed hex with a `0x` prefix, e.g. `0xff8000`.
///
/// # Errors
///
/// [`FormatError`] when a channel is not finite or the packed value
/// overflows `i128`.
pub fn format_hex(color: Color, width: HexWidth) -> Result<String, FormatError> {
    Ok(format!("0x{}", padded_hex(pack(color, width)?, width.digits())))
}

/// CSS hex with a `#` prefix, e.g. `#ff8000`.
///
/// # Errors
///
/// Same as [`format_hex`].
pub fn format_css(color: Color, width: HexWidth) -> Result<String, FormatError> {
    Ok(format!("#{}", padded_hex(pack(color, width)?, width.digits())))
}

/// Pack channels big-endian, one byte each, without masking.
fn pack(color: Color, width: HexWidth) -> Result<i128, FormatError> {
    let layout: &[(f64, u32)] = match width {
        HexWidth::Rgb => &[(color.r, 16), (color.g, 8), (color.b, 0)],
        HexWidth::Rgba => &[(color.r, 24), (color.g, 16), (color.b, 8), (color.a, 0)],
    };
    layout.iter().try_fold(0_i128, |packed, &(v, shift)| -> Result<i128, FormatError> {
        let shifted = channel(v)?
            .checked_mul(1_i128 << shift)
            .ok_or(FormatError::Overflow)?;
        Ok(packed | shifted)
    })
}

/// Scale to 0–255 and truncate toward zero.
#[allow(clippy::cast_possible_truncation)]
fn channel(v: f64) -> Result<i128, FormatError> {
    let scaled = (v * 255.0).trunc();
    if !scaled.is_finite() {
        return Err(FormatError::NonFinite(v));
    }
    if scaled >= I128_LIMIT || scaled < -I128_LIMIT {
        return Err(FormatError::Overflow);
    }
    Ok(scaled as i128)
}

fn padded_hex(value: i128, digits: usize) -> String {
    if value < 0 {
        format!("-{:0w$x}", value.unsigned_abs(), w = digits.saturating_sub(1))
    } else {
        format!("{value:0digits$x}")
    }
}

// ─── Component formatting ────────────────────────────────────────────────────

/// One component to 4 significant digits, in the general format.
///
/// Fixed notation for decimal exponents in `-4..=2`, scientific otherwise.
/// Trailing zeros are dropped, but a fixed-notation result always keeps a
/// digit after the point: `1.0`, `0.502`, `0.0001234`, `1.234e+03`, `1e-05`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn format_component(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_owned();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf" } else { "inf" }.to_owned();
    }

    // Round once in scientific form; the exponent of the rounded value
    // decides the notation.
    let sci = format!("{:.*e}", (COMPONENT_DIGITS - 1) as usize, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= COMPONENT_DIGITS - 1 {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.unsigned_abs());
    }

    let precision = (COMPONENT_DIGITS - 1 - exp) as usize;
    let fixed = format!("{v:.precision$}");
    let trimmed = trim_fraction(&fixed);
    if trimmed.contains('.') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}.0")
    }
}

/// Drop trailing fractional zeros, and the point if nothing is left after it.
fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

// ─── Tests ───────────────────────────────────────────────────────────────────
