// SPDX-License-Identifier: MIT
//
// Failure taxonomy: why an input is not a color, and why a parsed color
// has no packed-hex form.
//
// Every failure is a plain value. Parsers never log, retry, or recover;
// they hand one of these back and the caller decides what the user sees.

use thiserror::Error;

/// Why an input string is not a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No notation prefix matched and the text is not a known name.
    #[error("unrecognized format")]
    UnrecognizedFormat,

    /// A component tuple had the wrong number of comma-separated pieces.
    #[error("malformed tuple: expected {expected} components, found {found}")]
    MalformedTuple {
        /// Arity the notation requires.
        expected: usize,
        /// Pieces actually present after splitting on commas.
        found: usize,
    },

    /// The tuple pieces parse neither uniformly as integers nor as floats.
    #[error("bad tuple component values")]
    BadComponentValue,

    /// A `0x` body that is not 6 or 8 hex digits.
    #[error("malformed hex string")]
    MalformedHex,

    /// A `#` body that is not 3, 6, or 8 hex digits.
    #[error("malformed CSS hex string")]
    MalformedCssHex,

    /// The name is not present in the named-color table.
    #[error("'{0}' is not a CSS named color")]
    UnknownNamedColor(String),
}

/// Fieldless tag for [`ParseError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnrecognizedFormat,
    MalformedTuple,
    BadComponentValue,
    MalformedHex,
    MalformedCssHex,
    UnknownNamedColor,
}

impl ParseError {
    /// The payload-free kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnrecognizedFormat => ParseErrorKind::UnrecognizedFormat,
            Self::MalformedTuple { .. } => ParseErrorKind::MalformedTuple,
            Self::BadComponentValue => ParseErrorKind::BadComponentValue,
            Self::MalformedHex => ParseErrorKind::MalformedHex,
            Self::MalformedCssHex => ParseErrorKind::MalformedCssHex,
            Self::UnknownNamedColor(_) => ParseErrorKind::UnknownNamedColor,
        }
    }
}

/// Why a parsed color has no packed-hex form.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    /// A channel is NaN or infinite once scaled by 255.
    #[error("component {0} has no integer value")]
    NonFinite(f64),

    /// The packed value needs more than 128 bits.
    #[error("packed value does not fit in 128 bits")]
    Overflow,
}
