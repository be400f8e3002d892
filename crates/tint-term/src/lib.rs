// SPDX-License-Identifier: MIT
//
// tint-term — terminal plumbing for an inline, single-line color prompt.
//
// No alternate screen and no full-screen redraws: the prompt lives on the
// line where the shell left the cursor, with one scratch line below it for
// the label. Everything is built on raw termios and ANSI escape sequences,
// without a TUI framework in between.
//
//   terminal.rs  cbreak mode with RAII and panic-safe restore
//   reader.rs    poll-with-timeout reads from stdin
//   input.rs     bytes → key events
//   line.rs      grapheme-aware line editing
//   ansi.rs      the escape sequences the prompt draws with

pub mod ansi;
pub mod input;
pub mod line;
pub mod reader;
pub mod terminal;

pub use input::{KeyCode, KeyEvent, Modifiers, Parser};
pub use line::{EditOutcome, LineEditor, display_width};
pub use reader::{ReadOutcome, StdinReader};
pub use terminal::CbreakGuard;
