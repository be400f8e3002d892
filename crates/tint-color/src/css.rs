// SPDX-License-Identifier: MIT
//
// CSS hex: the body after a stripped `#`.
//
// Longer than 3 digits is handed to the packed-hex parser wholesale (so
// `#rrggbb` and `#rrggbbaa` both work) and relabelled `CSS`. Exactly 3
// digits is the shorthand: each nibble is doubled, `a` → `aa`. Every
// failure on this path reports as a CSS hex error, whichever parser
// actually rejected it.

use crate::color::{Color, Parsed, Provenance};
use crate::error::ParseError;
use crate::hex::{parse_digits, parse_hex};

/// Parse the text following `#`.
///
/// # Errors
///
/// Returns [`ParseError::MalformedCssHex`] unless the body is 3, 6, or 8
/// hex digits.
pub fn parse_css(s: &str) -> Result<Parsed, ParseError> {
    if s.len() > 3 {
        return parse_hex(s)
            .map(|parsed| parsed.relabel(Provenance::Css))
            .map_err(|_| ParseError::MalformedCssHex);
    }
    if s.len() != 3 {
        return Err(ParseError::MalformedCssHex);
    }

    let val = parse_digits(s).ok_or(ParseError::MalformedCssHex)?;
    let r = expand_nibble((val >> 8) & 0xF);
    let g = expand_nibble((val >> 4) & 0xF);
    let b = expand_nibble(val & 0xF);

    Ok(Parsed::new(
        Color::from_bytes(r, g, b, 0xFF),
        Provenance::CssShorthand,
    ))
}

/// `x` → `xx`: duplicate a nibble into both halves of a byte.
#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn expand_nibble(x: u32) -> u8 {
    // x <= 0xF, so the result fits in a byte.
    (x | (x << 4)) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
