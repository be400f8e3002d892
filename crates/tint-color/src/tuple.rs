// SPDX-License-Identifier: MIT
//
// Component tuple grammar: `(a,b,c)` with a fixed arity.
//
// The parentheses are trimmed, not required. Pieces are read in one of two
// whole-tuple modes, tried in order:
//
//   1. every piece is an integer  → each divided by 255, tagged `Int`
//   2. every piece is a float     → taken as written,    tagged `Float`
//
// There is no per-component fallback: `1,0.5,0` fails integer mode on the
// second piece and is then read entirely as floats, so `1` becomes `1.0`
// (not `1/255`). A tuple that fits neither mode is rejected.

use crate::color::NumberKind;
use crate::error::ParseError;

/// A parsed tuple of `N` numeric components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuple<const N: usize> {
    /// Component values, already normalized for integer mode.
    pub values: [f64; N],
    /// Which mode the whole tuple was read in.
    pub kind: NumberKind,
}

/// Parse `"(a,b,…)"` into exactly `N` components.
///
/// # Errors
///
/// - [`ParseError::MalformedTuple`] if splitting on commas does not yield
///   exactly `N` pieces.
/// - [`ParseError::BadComponentValue`] if the pieces parse neither all as
///   integers nor all as floats.
pub fn parse_tuple<const N: usize>(s: &str) -> Result<Tuple<N>, ParseError> {
    let s = s.strip_prefix('(').unwrap_or(s);
    let s = s.strip_suffix(')').unwrap_or(s);

    let pieces: Vec<&str> = s.split(',').collect();
    if pieces.len() != N {
        return Err(ParseError::MalformedTuple {
            expected: N,
            found: pieces.len(),
        });
    }

    if let Some(values) = parse_all::<N>(&pieces, parse_int) {
        return Ok(Tuple {
            values,
            kind: NumberKind::Int,
        });
    }
    if let Some(values) = parse_all::<N>(&pieces, parse_float) {
        return Ok(Tuple {
            values,
            kind: NumberKind::Float,
        });
    }

    Err(ParseError::BadComponentValue)
}

/// Apply `read` to every piece; `None` as soon as one piece fails.
fn parse_all<const N: usize>(pieces: &[&str], read: fn(&str) -> Option<f64>) -> Option<[f64; N]> {
    let mut values = [0.0; N];
    for (slot, piece) in values.iter_mut().zip(pieces) {
        *slot = read(piece)?;
    }
    Some(values)
}

#[allow(clippy::cast_precision_loss)]
fn parse_int(piece: &str) -> Option<f64> {
    piece.trim().parse::<i128>().ok().map(|v| v as f64 / 255.0)
}

fn parse_float(piece: &str) -> Option<f64> {
    piece.trim().parse::<f64>().ok()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
