// SPDX-License-Identifier: MIT
//
// Notation dispatch.
//
// Input is trimmed and lowercased, then classified by prefix in a fixed
// priority order. First match wins:
//
//   `#…`    → CSS hex
//   `0x…`   → packed hex
//   `rgb…`  → rgb tuple
//   `hsl…`  → hsl tuple
//   name    → named color (exact table key)
//   else    → unrecognized
//
// Classification only looks at the prefix. Once a branch is chosen the
// remainder belongs to that parser; there is no fallback to a later branch,
// so `#red` is a CSS hex error even though `red` is a name.

use crate::color::Parsed;
use crate::css::parse_css;
use crate::error::ParseError;
use crate::functional::{HslMode, parse_hsl, parse_rgb};
use crate::hex::parse_hex;
use crate::named::{NamedColors, resolve_named};

/// Which parser a normalized input is routed to, with the prefix removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation<'s> {
    /// Body after `#`.
    Css(&'s str),
    /// Body after `0x`.
    Hex(&'s str),
    /// Remainder after `rgb`.
    Rgb(&'s str),
    /// Remainder after `hsl`.
    Hsl(&'s str),
    /// A key of the named-color table.
    Named(&'s str),
    /// Nothing matched.
    Unrecognized,
}

impl<'s> Notation<'s> {
    /// Classify an already trimmed and lowercased string.
    #[must_use]
    pub fn classify(s: &'s str, names: &NamedColors) -> Self {
        if let Some(rest) = s.strip_prefix('#') {
            Self::Css(rest)
        } else if let Some(rest) = s.strip_prefix("0x") {
            Self::Hex(rest)
        } else if let Some(rest) = s.strip_prefix("rgb") {
            Self::Rgb(rest)
        } else if let Some(rest) = s.strip_prefix("hsl") {
            Self::Hsl(rest)
        } else if names.contains(s) {
            Self::Named(s)
        } else {
            Self::Unrecognized
        }
    }
}

/// Routes raw input to exactly one notation parser.
///
/// Holds the injected named-color table by reference; cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
    names: &'t NamedColors,
    hsl: HslMode,
}

impl<'t> Dispatcher<'t> {
    /// A dispatcher reading names from `names`, with compat HSL.
    #[must_use]
    pub const fn new(names: &'t NamedColors) -> Self {
        Self {
            names,
            hsl: HslMode::Compat,
        }
    }

    /// Same dispatcher, different HSL handling.
    #[must_use]
    pub const fn with_hsl_mode(self, hsl: HslMode) -> Self {
        Self { hsl, ..self }
    }

    /// The named-color table in use.
    #[must_use]
    pub const fn names(&self) -> &'t NamedColors {
        self.names
    }

    /// Parse one input string from scratch.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnrecognizedFormat`] when no branch matches, otherwise
    /// whatever the chosen parser reports.
    pub fn parse(&self, raw: &str) -> Result<Parsed, ParseError> {
        let normalized = raw.trim().to_lowercase();

        match Notation::classify(&normalized, self.names) {
            Notation::Css(body) => parse_css(body),
            Notation::Hex(body) => parse_hex(body),
            Notation::Rgb(rest) => parse_rgb(rest),
            Notation::Hsl(rest) => parse_hsl(rest, self.hsl),
            Notation::Named(name) => resolve_named(name, self.names),
            Notation::Unrecognized => Err(ParseError::UnrecognizedFormat),
        }
    }
}

/// Parse `raw` against `names` with default settings.
///
/// # Errors
///
/// See [`Dispatcher::parse`].
pub fn parse_color(raw: &str, names: &NamedColors) -> Result<Parsed, ParseError> {
    Dispatcher::new(names).parse(raw)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
