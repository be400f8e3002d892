// SPDX-License-Identifier: MIT
//
// The three ways tint runs, and the drawing they share.
//
//   one-shot     `tint red '#abc'`: a report per argument
//   piped        `echo red | tint`: the first stdin line, committed
//   interactive  a live prompt on the current terminal line
//
// Interactive layout, drawn inline below the shell prompt:
//
//   ████ rgb(255, 128, 0)▏         ← swatch (or `>>>>`), space, input
//   rgb(int)                       ← provenance label in gray
//
// The label line is reserved up front so moving down to it never scrolls.
// Every keystroke that changes the text re-runs the live controller and
// redraws both lines; cursor-only moves just reposition the cursor.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use tint_color::{Commit, LiveInput, Preview, Report, Swatch};
use tint_term::reader::ESC_TIMEOUT;
use tint_term::{
    CbreakGuard, EditOutcome, KeyCode, KeyEvent, LineEditor, Modifiers, Parser, ReadOutcome,
    StdinReader, ansi, display_width,
};
use tracing::{debug, trace};

/// Exit status when an input is not a color.
pub const EXIT_NOT_A_COLOR: u8 = 1;
/// Exit status when the prompt is cancelled (128 + SIGINT).
pub const EXIT_CANCELLED: u8 = 130;

// ─── Report output ───────────────────────────────────────────────────────────

/// Colors used outside the swatch. `None` writes plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub label: Option<(u8, u8, u8)>,
}

impl Style {
    pub const PLAIN: Self = Self { label: None };

    pub const fn colored(label: (u8, u8, u8)) -> Self {
        Self { label: Some(label) }
    }

    fn write_label(self, w: &mut impl Write, text: &str) -> io::Result<()> {
        match self.label {
            Some(rgb) => {
                ansi::fg(w, rgb)?;
                w.write_all(text.as_bytes())?;
                ansi::reset(w)
            }
            None => w.write_all(text.as_bytes()),
        }
    }
}

/// `name:\tvalue` per report line, names in the label color.
pub fn write_report(w: &mut impl Write, report: &Report, style: Style) -> io::Result<()> {
    for line in report.lines() {
        style.write_label(w, &format!("{}:", line.name))?;
        writeln!(w, "\t{}", line.value)?;
    }
    Ok(())
}

/// The report, or the one-line failure message.
pub fn write_commit(w: &mut impl Write, commit: &Commit, style: Style) -> io::Result<()> {
    match commit {
        Commit::Report(_, report) => write_report(w, report, style),
        Commit::NotAColor => writeln!(w, "{}", Commit::NOT_A_COLOR),
    }
}

/// 0 when every input converted, [`EXIT_NOT_A_COLOR`] otherwise.
pub fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_A_COLOR)
    }
}

// ─── One-shot and piped ──────────────────────────────────────────────────────

/// Commit each input in turn, reports separated by a blank line. Returns
/// whether every input was a color.
pub fn run_oneshot(
    w: &mut impl Write,
    inputs: &[String],
    live: &LiveInput<'_>,
    style: Style,
) -> io::Result<bool> {
    let mut all_ok = true;
    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        match live.commit(input) {
            Commit::Report(parsed, report) => {
                debug!(input = %input, provenance = %parsed.provenance, "converted");
                write_report(w, &report, style)?;
            }
            Commit::NotAColor => {
                debug!(input = %input, "not a color");
                writeln!(w, "{input}: {}", Commit::NOT_A_COLOR)?;
                all_ok = false;
            }
        }
    }
    w.flush()?;
    Ok(all_ok)
}

/// Commit the first line of `input`. An empty stream commits "".
pub fn run_piped(
    input: impl BufRead,
    w: &mut impl Write,
    live: &LiveInput<'_>,
    style: Style,
) -> io::Result<bool> {
    let line = input.lines().next().transpose()?.unwrap_or_default();
    let commit = live.commit(&line);
    write_commit(w, &commit, style)?;
    w.flush()?;
    Ok(matches!(commit, Commit::Report(..)))
}

// ─── Interactive prompt ──────────────────────────────────────────────────────

/// What a key asks the session loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading; redraw first if `redraw`.
    Continue { redraw: bool },
    /// Enter: commit the buffer.
    Submit,
    /// Escape, Ctrl-C, Ctrl-D on an empty line, or end of input.
    Cancel,
}

/// Editor + live controller for one prompt session. Pure state; all
/// terminal I/O goes through the `Write` handed to `render`/`finish`.
pub struct Prompt<'t> {
    editor: LineEditor,
    live: LiveInput<'t>,
    preview: Preview,
    label: (u8, u8, u8),
}

impl<'t> Prompt<'t> {
    pub fn new(live: LiveInput<'t>, label: (u8, u8, u8)) -> Self {
        let preview = live.preview();
        Self {
            editor: LineEditor::new(),
            live,
            preview,
            label,
        }
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    pub const fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Step {
        if key.modifiers.is_empty() {
            match key.code {
                KeyCode::Enter => return Step::Submit,
                KeyCode::Escape => return Step::Cancel,
                _ => {}
            }
        }
        if key.is_ctrl('c') || (key.is_ctrl('d') && self.editor.is_empty()) {
            return Step::Cancel;
        }
        if key.is_ctrl('d') {
            // Non-empty line: readline's delete-under-cursor.
            let key = KeyEvent::new(KeyCode::Delete, Modifiers::empty());
            return self.apply_edit(key);
        }
        self.apply_edit(key)
    }

    fn apply_edit(&mut self, key: KeyEvent) -> Step {
        match self.editor.handle_key(key) {
            EditOutcome::Changed => {
                self.preview = self.live.update(self.editor.text());
                trace!(
                    text = self.editor.text(),
                    label = %self.preview.label,
                    "revalidated"
                );
                Step::Continue { redraw: true }
            }
            EditOutcome::Moved => Step::Continue { redraw: true },
            EditOutcome::Ignored => Step::Continue { redraw: false },
        }
    }

    /// Redraw the prompt line and the label line, cursor left in the text.
    /// The cursor is hidden while the two lines are rewritten.
    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        ansi::cursor_hide(w)?;
        ansi::carriage_return(w)?;
        ansi::reset(w)?;
        ansi::clear_line(w)?;

        // Cells, not chars: a wide placeholder takes two per repeat.
        let swatch_cols = match self.preview.swatch {
            Swatch::Fill { width, color } => {
                ansi::bg(w, color.to_rgb8())?;
                write!(w, "{:width$}", "")?;
                ansi::reset(w)?;
                width
            }
            Swatch::Placeholder { width, fill } => {
                let fill: String = std::iter::repeat_n(fill, width).collect();
                w.write_all(fill.as_bytes())?;
                display_width(&fill)
            }
        };
        w.write_all(b" ")?;

        ansi::cursor_save(w)?;
        ansi::cursor_down(w, 1)?;
        ansi::carriage_return(w)?;
        ansi::clear_below(w)?;
        ansi::fg(w, self.label)?;
        w.write_all(self.preview.label.as_bytes())?;
        ansi::reset(w)?;
        ansi::cursor_restore(w)?;

        w.write_all(self.editor.text().as_bytes())?;

        let col = swatch_cols + 1 + self.editor.display_cursor();
        ansi::carriage_return(w)?;
        ansi::cursor_right(w, u16::try_from(col).unwrap_or(u16::MAX))?;
        ansi::cursor_show(w)?;
        w.flush()
    }

    /// Drop to the label line, clear it, and leave a blank line before
    /// whatever is printed next.
    pub fn finish(&self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(b"\r\n")?;
        ansi::clear_below(w)?;
        w.flush()
    }
}

/// Run the live prompt on the controlling terminal.
pub fn run_interactive(live: LiveInput<'_>, label: (u8, u8, u8)) -> anyhow::Result<ExitCode> {
    let mut cbreak =
        CbreakGuard::enable().context("failed to switch the terminal to cbreak mode")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut prompt = Prompt::new(live, label);

    // Reserve the label line.
    writeln!(out)?;
    ansi::cursor_up(&mut out, 1)?;
    prompt.render(&mut out)?;
    debug!("session started");

    let end = read_keys(&mut prompt, &mut out).context("failed to read from the terminal")?;

    prompt.finish(&mut out)?;
    drop(out);
    cbreak
        .restore()
        .context("failed to restore the terminal")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match end {
        Step::Submit => {
            let commit = prompt.live.commit(prompt.text());
            debug!(
                text = prompt.text(),
                ok = matches!(commit, Commit::Report(..)),
                "session committed"
            );
            writeln!(out)?;
            write_commit(&mut out, &commit, Style::colored(label))?;
            out.flush()?;
            Ok(exit_for(matches!(commit, Commit::Report(..))))
        }
        _ => {
            debug!("session cancelled");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

/// Pump keys until the prompt submits or cancels.
fn read_keys(prompt: &mut Prompt<'_>, out: &mut impl Write) -> io::Result<Step> {
    let mut reader = StdinReader::new();
    let mut parser = Parser::new();

    loop {
        let timeout = parser.has_pending().then_some(ESC_TIMEOUT);
        let keys = match reader.read(timeout)? {
            ReadOutcome::Data(bytes) => parser.advance(&bytes),
            ReadOutcome::Timeout => parser.flush(),
            ReadOutcome::Eof => return Ok(Step::Cancel),
        };

        let mut redraw = false;
        for key in keys {
            match prompt.on_key(key) {
                Step::Continue { redraw: r } => redraw |= r,
                end => return Ok(end),
            }
        }
        if redraw {
            prompt.render(out)?;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
