// SPDX-License-Identifier: MIT
//
// Live input: revalidate the whole buffer on every edit, expose a preview
// directive for the renderer, and run the terminal dispatch on commit.
//
// State is rebuilt from scratch on each update. There is no partial or
// incremental parse and nothing carries over from the previous buffer, so
// an edit that breaks the text always lands in `Invalid` and an edit that
// fixes it always lands in a fresh `Valid`.

use crate::color::{Color, Parsed};
use crate::dispatch::Dispatcher;
use crate::error::FormatError;
use crate::format::{HexWidth, format_css, format_hex, format_rgb};

/// Display cells the swatch occupies by default.
pub const DEFAULT_SWATCH_WIDTH: usize = 4;

/// Fill character for the invalid-state placeholder by default.
pub const DEFAULT_PLACEHOLDER: char = '>';

// ─── State ───────────────────────────────────────────────────────────────────

/// Result of the most recent revalidation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LiveState {
    /// Empty buffer or a buffer that does not parse.
    #[default]
    Invalid,
    /// The buffer parses.
    Valid(Parsed),
}

impl LiveState {
    /// The parsed color, if valid.
    #[must_use]
    pub const fn parsed(&self) -> Option<&Parsed> {
        match self {
            Self::Invalid => None,
            Self::Valid(parsed) => Some(parsed),
        }
    }
}

/// What the renderer paints ahead of the input text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    /// A solid block of `color`, `width` cells wide.
    Fill { width: usize, color: Color },
    /// `width` copies of `fill`.
    Placeholder { width: usize, fill: char },
}

impl Swatch {
    /// Width in display cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        match *self {
            Self::Fill { width, .. } | Self::Placeholder { width, .. } => width,
        }
    }
}

/// Display directive for one revalidation.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub swatch: Swatch,
    /// Provenance label, empty when invalid.
    pub label: String,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// One `name: value` line of a commit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub name: &'static str,
    pub value: String,
}

/// Equivalent notations for a committed color, in print order.
///
/// Always `RGB`, `Hex` and `CSS`. Translucent colors get the 32-bit hex
/// and CSS forms appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    /// # Errors
    ///
    /// [`FormatError`] when the color has no packed-hex form (a NaN or
    /// infinite channel, or a value past 128 bits).
    pub fn for_color(color: Color) -> Result<Self, FormatError> {
        let mut lines = vec![
            ReportLine {
                name: "RGB",
                value: format_rgb(color),
            },
            ReportLine {
                name: "Hex",
                value: format_hex(color, HexWidth::Rgb)?,
            },
            ReportLine {
                name: "CSS",
                value: format_css(color, HexWidth::Rgb)?,
            },
        ];
        if !color.is_opaque() {
            lines.push(ReportLine {
                name: "Hex (RGBA)",
                value: format_hex(color, HexWidth::Rgba)?,
            });
            lines.push(ReportLine {
                name: "CSS (RGBA)",
                value: format_css(color, HexWidth::Rgba)?,
            });
        }
        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Look up a line's value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.name == name)
            .map(|line| line.value.as_str())
    }
}

/// Outcome of submitting the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// The buffer parsed; here is everything to print.
    Report(Parsed, Report),
    /// The buffer did not parse. Which error it was is not surfaced.
    NotAColor,
}

impl Commit {
    /// Message printed for [`Commit::NotAColor`].
    pub const NOT_A_COLOR: &'static str = "Not a color.";
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// Two-state controller driven by the line editor.
#[derive(Debug, Clone)]
pub struct LiveInput<'t> {
    dispatcher: Dispatcher<'t>,
    swatch_width: usize,
    placeholder: char,
    state: LiveState,
}

impl<'t> LiveInput<'t> {
    /// A controller in the `Invalid` state, with the default swatch.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher<'t>) -> Self {
        Self {
            dispatcher,
            swatch_width: DEFAULT_SWATCH_WIDTH,
            placeholder: DEFAULT_PLACEHOLDER,
            state: LiveState::Invalid,
        }
    }

    #[must_use]
    pub const fn with_swatch_width(self, swatch_width: usize) -> Self {
        Self {
            swatch_width,
            ..self
        }
    }

    #[must_use]
    pub const fn with_placeholder(self, placeholder: char) -> Self {
        Self {
            placeholder,
            ..self
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LiveState {
        &self.state
    }

    /// Dispatch `buffer` without touching state.
    #[must_use]
    pub fn evaluate(&self, buffer: &str) -> LiveState {
        self.dispatcher
            .parse(buffer)
            .map_or(LiveState::Invalid, LiveState::Valid)
    }

    /// Revalidate after an edit and return the new preview.
    pub fn update(&mut self, buffer: &str) -> Preview {
        self.state = self.evaluate(buffer);
        self.preview()
    }

    /// Preview for the current state.
    #[must_use]
    pub fn preview(&self) -> Preview {
        match self.state {
            LiveState::Valid(parsed) => Preview {
                swatch: Swatch::Fill {
                    width: self.swatch_width,
                    color: parsed.color,
                },
                label: parsed.provenance.to_string(),
            },
            LiveState::Invalid => Preview {
                swatch: Swatch::Placeholder {
                    width: self.swatch_width,
                    fill: self.placeholder,
                },
                label: String::new(),
            },
        }
    }

    /// Final submission. Dispatches `buffer` once more; the result is not
    /// taken from the last preview. A color that parses but cannot be
    /// packed to hex is also `NotAColor`.
    #[must_use]
    pub fn commit(&self, buffer: &str) -> Commit {
        let Ok(parsed) = self.dispatcher.parse(buffer) else {
            return Commit::NotAColor;
        };
        Report::for_color(parsed.color)
            .map_or(Commit::NotAColor, |report| Commit::Report(parsed, report))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
