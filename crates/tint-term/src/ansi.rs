// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit. The prompt is drawn inline, so
// everything here is relative: cursor moves by a count, clears run from the
// cursor, and the cursor is saved/restored rather than addressed.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor up `n` rows (CUU). No-op for 0.
///
/// CSI with a zero count would still move one row, hence the guard.
#[inline]
pub fn cursor_up(w: &mut impl Write, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}A")
}

/// Move the cursor down `n` rows (CUD). No-op for 0.
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}B")
}

/// Move the cursor right `n` columns (CUF). No-op for 0.
#[inline]
pub fn cursor_right(w: &mut impl Write, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}C")
}

/// Return to column 0 of the current row.
#[inline]
pub fn carriage_return(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Save cursor position and attributes (DECSC).
#[inline]
pub fn cursor_save(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b7")
}

/// Restore the position saved by [`cursor_save`] (DECRC).
#[inline]
pub fn cursor_restore(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b8")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Erase ───────────────────────────────────────────────────────────────────

/// Erase the whole current line (EL 2). The cursor does not move.
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2K")
}

/// Erase from the cursor to the end of the screen (ED 0).
#[inline]
pub fn clear_below(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[J")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set a 24-bit foreground color.
#[inline]
pub fn fg(w: &mut impl Write, (r, g, b): (u8, u8, u8)) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set a 24-bit background color.
#[inline]
pub fn bg(w: &mut impl Write, (r, g, b): (u8, u8, u8)) -> io::Result<()> {
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
