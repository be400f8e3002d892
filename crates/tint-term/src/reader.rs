// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Synchronous stdin reader with a poll timeout.
//
// The prompt is single-threaded: each keypress is parsed, revalidated
// and redrawn before the next read. A plain blocking `read()` would be
// enough except for one case: a lone ESC. To tell an Escape keypress
// from the first byte of an arrow-key sequence we wait a short time for
// more bytes, which `poll()` on the fd gives us without a helper thread.

#[cfg(unix)]
use std::io;
use std::time::Duration;

/// Bytes pulled per read. A keypress is 1-6 bytes, a paste can be more.
const READ_BUF_SIZE: usize = 4096;

/// How long to wait after a lone ESC before treating it as a keypress.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(25);

/// Result of one [`StdinReader::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A non-empty chunk of raw bytes.
    Data(Vec<u8>),
    /// Nothing arrived within the timeout.
    Timeout,
    /// The input was closed.
    Eof,
}

/// Reader over a raw file descriptor (stdin by default).
///
/// # Example
///
/// ```no_run
/// use tint_term::reader::{ReadOutcome, StdinReader};
///
/// let mut reader = StdinReader::new();
/// if let ReadOutcome::Data(bytes) = reader.read(None)? {
///     println!("got {} bytes", bytes.len());
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct StdinReader {
    #[cfg(unix)]
    fd: std::os::unix::io::RawFd,
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinReader {
    /// Reader on stdin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            fd: libc::STDIN_FILENO,
            buf: Box::new([0; READ_BUF_SIZE]),
        }
    }

    /// Reader on an arbitrary fd. The caller keeps ownership of it.
    #[cfg(unix)]
    #[must_use]
    pub fn from_raw_fd(fd: std::os::unix::io::RawFd) -> Self {
        Self {
            fd,
            buf: Box::new([0; READ_BUF_SIZE]),
        }
    }

    /// Wait up to `timeout` (forever if `None`) for input, then read
    /// whatever is available.
    ///
    /// A signal interrupting the wait is reported as a timeout.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `poll()` or `read()` fails for any reason
    /// other than interruption.
    #[cfg(unix)]
    pub fn read(&mut self, timeout: Option<Duration>) -> io::Result<ReadOutcome> {
        let timeout_ms = timeout.map_or(-1, |d| i32::try_from(d.as_millis()).unwrap_or(i32::MAX));

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: self.fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, timeout_ms)
        };

        if ready < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(ReadOutcome::Timeout)
            } else {
                Err(err)
            };
        }
        if ready == 0 {
            return Ok(ReadOutcome::Timeout);
        }

        let n = unsafe { libc::read(self.fd, self.buf.as_mut_ptr().cast(), self.buf.len()) };

        if n < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(ReadOutcome::Timeout)
            } else {
                Err(err)
            };
        }
        if n == 0 {
            return Ok(ReadOutcome::Eof);
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        Ok(ReadOutcome::Data(self.buf[..n as usize].to_vec()))
    }

    /// Blocking fallback without poll. The timeout is ignored, so a lone
    /// ESC is only resolved once the next key arrives.
    #[cfg(not(unix))]
    pub fn read(&mut self, _timeout: Option<Duration>) -> std::io::Result<ReadOutcome> {
        use std::io::Read;

        match std::io::stdin().lock().read(&mut self.buf[..])? {
            0 => Ok(ReadOutcome::Eof),
            n => Ok(ReadOutcome::Data(self.buf[..n].to_vec())),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
