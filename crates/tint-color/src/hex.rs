// SPDX-License-Identifier: MIT
//
// Packed hex: a bare run of hex digits read as one unsigned integer.
//
//   6 digits → 0xRRGGBB   (24-bit, alpha forced opaque)
//   8 digits → 0xRRGGBBAA (32-bit)
//
// Anything else is malformed. The `0x` / `#` prefix has already been
// stripped by the dispatcher.

use crate::color::{Color, Parsed, Provenance};
use crate::error::ParseError;

/// Parse 6 or 8 hex digits (no prefix) into a color.
///
/// # Errors
///
/// Returns [`ParseError::MalformedHex`] for any other length or for
/// non-hex characters.
pub fn parse_hex(s: &str) -> Result<Parsed, ParseError> {
    let val = parse_digits(s).ok_or(ParseError::MalformedHex)?;

    if s.len() > 6 {
        if s.len() != 8 {
            return Err(ParseError::MalformedHex);
        }
        let [r, g, b, a] = val.to_be_bytes();
        return Ok(Parsed::new(Color::from_bytes(r, g, b, a), Provenance::HexRgba));
    }

    if s.len() != 6 {
        return Err(ParseError::MalformedHex);
    }
    let [_, r, g, b] = val.to_be_bytes();
    Ok(Parsed::new(Color::from_bytes(r, g, b, 0xFF), Provenance::HexRgb))
}

/// Read up to 8 hex digits as a `u32`.
///
/// Stricter than `u32::from_str_radix`, which would also take a leading `+`.
pub(crate) fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 8 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
