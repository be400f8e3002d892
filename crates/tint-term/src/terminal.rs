// SPDX-License-Identifier: MIT
//
// Cbreak mode for the inline prompt.
//
// Safety: isatty, tcgetattr/tcsetattr and the raw write(2) in the panic
// path are POSIX calls with no std wrapper. Each unsafe block is one call.
#![allow(unsafe_code)]
//
// The prompt draws on the shell's own screen, so only the line discipline
// changes: no echo, no line buffering, and Ctrl-C/Ctrl-Z/Ctrl-S arrive as
// bytes. Output processing (OPOST) stays on so `\n` still returns the
// carriage.
//
// The saved termios lives in a process-wide slot as well as in the guard.
// A panic can unwind past the guard while stdout is locked elsewhere, so the
// panic hook writes its reset bytes straight to fd 1 and restores the
// line discipline from the slot before the default hook prints.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── TTY checks ──────────────────────────────────────────────────────────────

#[cfg(unix)]
fn isatty(fd: libc::c_int) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Is stdin a terminal? Decides between the live prompt and piped input.
#[must_use]
pub fn is_tty() -> bool {
    #[cfg(unix)]
    return isatty(libc::STDIN_FILENO);
    #[cfg(not(unix))]
    return false;
}

/// Is stdout a terminal? Decides whether report labels are colored.
#[must_use]
pub fn is_stdout_tty() -> bool {
    #[cfg(unix)]
    return isatty(libc::STDOUT_FILENO);
    #[cfg(not(unix))]
    return false;
}

// ─── Panic path ──────────────────────────────────────────────────────────────

#[cfg(unix)]
static SAVED_MODE: Mutex<Option<libc::termios>> = Mutex::new(None);

/// SGR reset, cursor visible, then a fresh line for the panic message.
const PANIC_RESET: &[u8] = b"\x1b[0m\x1b[?25h\r\n";

static HOOK: Once = Once::new();

fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_after_panic();
            previous(info);
        }));
    });
}

fn restore_after_panic() {
    #[cfg(unix)]
    {
        unsafe {
            let _ = libc::write(
                libc::STDOUT_FILENO,
                PANIC_RESET.as_ptr().cast::<libc::c_void>(),
                PANIC_RESET.len(),
            );
        }
        if let Some(mode) = SAVED_MODE.lock().ok().and_then(|slot| *slot) {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw const mode);
            }
        }
    }

    #[cfg(not(unix))]
    {
        let mut out = io::stdout();
        let _ = out.write_all(PANIC_RESET);
        let _ = out.flush();
    }
}

// ─── Line discipline ─────────────────────────────────────────────────────────

/// Turn a cooked-mode termios into the cbreak variant the prompt reads with.
///
/// Input: CR is not translated (Enter arrives as `\r`) and XON/XOFF is off.
/// Local: no echo, no canonical buffering, no signal keys, no `^V` literal
/// next. `read` returns as soon as one byte is available.
#[cfg(unix)]
#[must_use]
pub fn cbreak(mut mode: libc::termios) -> libc::termios {
    mode.c_iflag &= !(libc::ICRNL | libc::IXON);
    mode.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
    mode.c_cc[libc::VMIN] = 1;
    mode.c_cc[libc::VTIME] = 0;
    mode
}

#[cfg(unix)]
fn get_mode() -> io::Result<libc::termios> {
    let mut mode: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut mode) } == 0 {
        Ok(mode)
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(unix)]
fn set_mode(mode: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, mode) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// Keeps stdin in cbreak mode while alive.
///
/// When stdin is not a terminal, [`enable`](Self::enable) succeeds without
/// changing anything and the guard is inactive.
///
/// ```no_run
/// use tint_term::terminal::CbreakGuard;
///
/// let mut guard = CbreakGuard::enable()?;
/// // ... read keys, draw the prompt ...
/// guard.restore()?; // or let it drop
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct CbreakGuard {
    #[cfg(unix)]
    saved: Option<libc::termios>,
}

impl CbreakGuard {
    /// Save the current mode and switch stdin to cbreak.
    ///
    /// # Errors
    ///
    /// Fails if the terminal mode cannot be read or changed.
    pub fn enable() -> io::Result<Self> {
        #[cfg(unix)]
        {
            if !is_tty() {
                return Ok(Self { saved: None });
            }
            install_panic_hook();
            let original = get_mode()?;
            if let Ok(mut slot) = SAVED_MODE.lock() {
                *slot = Some(original);
            }
            set_mode(&cbreak(original))?;
            Ok(Self {
                saved: Some(original),
            })
        }

        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Whether this guard changed the terminal and still owes a restore.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        #[cfg(unix)]
        return self.saved.is_some();
        #[cfg(not(unix))]
        return false;
    }

    /// Reset colors, show the cursor, and put the saved mode back.
    /// Does nothing on an inactive guard.
    ///
    /// # Errors
    ///
    /// Fails if stdout cannot be written or the mode cannot be restored.
    pub fn restore(&mut self) -> io::Result<()> {
        #[cfg(unix)]
        {
            let Some(original) = self.saved.take() else {
                return Ok(());
            };
            let mut out = io::stdout().lock();
            ansi::reset(&mut out)?;
            ansi::cursor_show(&mut out)?;
            out.flush()?;
            drop(out);

            set_mode(&original)?;
            if let Ok(mut slot) = SAVED_MODE.lock() {
                *slot = None;
            }
        }
        Ok(())
    }
}

impl Drop for CbreakGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
