// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key events for a single-line prompt:
//
// - Legacy CSI sequences (arrows, Home/End, editing keys)
// - SS3 sequences (arrow/Home/End alternate encoding)
// - Alt+key (ESC followed by printable character)
// - Control bytes (Ctrl+letter, Enter, Tab, Backspace)
// - UTF-8 multi-byte characters
//
// Sequences the prompt has no use for (function keys, unknown CSI finals)
// are consumed and dropped so they never leak into the buffer as text.
//
// # Design
//
// The parser keeps a small byte buffer because escape sequences can span
// multiple `read()` calls. Feed bytes with [`Parser::advance`]. After a
// timeout with no new bytes, call [`Parser::flush`] to emit a pending
// lone ESC as a real Escape keypress.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether this is `Ctrl` + `c` (no other modifiers).
    #[inline]
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && self.modifiers == Modifiers::CTRL
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character. Ctrl+letter arrives as the lowercase letter
    /// with [`Modifiers::CTRL`].
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// xterm CSI modifier encoding: `param = 1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental key parser.
///
/// # Escape vs escape-sequence ambiguity
///
/// A bare `ESC` byte could be a standalone Escape keypress or the start of
/// a sequence. The parser holds a lone ESC until more bytes arrive or the
/// caller gives up waiting and calls [`flush`](Parser::flush).
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
        }
    }

    /// Feed raw bytes and return every key that can be decoded.
    ///
    /// Incomplete trailing sequences stay buffered for the next call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(key, consumed) => {
                    events.push(key);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal keys.
    ///
    /// A lone ESC becomes Escape; any other leftovers are read byte by
    /// byte. Truncated UTF-8 is dropped.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        for &byte in &self.buf {
            let key = match byte {
                0x1B => KeyEvent::new(KeyCode::Escape, Modifiers::empty()),
                0x00 => KeyEvent::new(KeyCode::Char('@'), Modifiers::CTRL),
                b @ 0x01..=0x1A => {
                    KeyEvent::new(KeyCode::Char((b + b'a' - 1) as char), Modifiers::CTRL)
                }
                0x7F => KeyEvent::new(KeyCode::Backspace, Modifiers::empty()),
                b @ 0x20..=0x7E => KeyEvent::new(KeyCode::Char(b as char), Modifiers::empty()),
                _ => continue,
            };
            events.push(key);
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────

enum Parsed {
    Key(KeyEvent, usize),
    Incomplete,
    Skip(usize),
}

/// Decode one key from the front of `buf` (never empty).
fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Key(ctrl(KeyCode::Char('@')), 1),
        0x08 | 0x7F => Parsed::Key(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Key(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(press(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => Parsed::Key(ctrl(KeyCode::Char((b + b'a' - 1) as char)), 1),
        b @ 0x20..=0x7E => Parsed::Key(press(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        // FS, GS, RS, US and bare continuation bytes.
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        0x1B => Parsed::Key(KeyEvent::new(KeyCode::Escape, Modifiers::ALT), 2),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::new(KeyCode::Char(b as char), Modifiers::ALT), 2),
        0x7F => Parsed::Key(KeyEvent::new(KeyCode::Backspace, Modifiers::ALT), 2),
        b @ 0x01..=0x1A => Parsed::Key(
            KeyEvent::new(
                KeyCode::Char((b + b'a' - 1) as char),
                Modifiers::ALT | Modifiers::CTRL,
            ),
            2,
        ),
        // Unknown byte after ESC: the ESC stands alone.
        _ => Parsed::Key(press(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    // Parameter bytes are 0x30..=0x3F, intermediates 0x20..=0x2F, and the
    // final byte is 0x40..=0x7E.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_csi_params(&buf[2..end]);
    let consumed = end + 1;

    if final_byte == b'~' {
        let first = params.first().copied().unwrap_or(0);
        let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
        let code = match first {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            _ => return Parsed::Skip(consumed),
        };
        return Parsed::Key(KeyEvent::new(code, modifiers), consumed);
    }

    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
    let code = match final_byte {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'Z' => return Parsed::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT), consumed),
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Key(KeyEvent::new(code, modifiers), consumed)
}

// ── SS3 (Single Shift 3) ───────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        // F1-F4 and keypad keys.
        _ => return Parsed::Skip(3),
    };

    Parsed::Key(press(code), 3)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    if buf[1..expected].iter().any(|&b| b & 0xC0 != 0x80) {
        return Parsed::Skip(1);
    }

    std::str::from_utf8(&buf[..expected]).map_or(Parsed::Skip(1), |s| {
        s.chars()
            .next()
            .map_or(Parsed::Skip(expected), |ch| {
                Parsed::Key(press(KeyCode::Char(ch)), expected)
            })
    })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, Modifiers::empty())
}

const fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, Modifiers::CTRL)
}

/// Semicolon-separated numeric CSI parameters. Empty fields read as 0.
fn parse_csi_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Decode the `1 + bitmask` modifier parameter. 0 or 1 means none.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: parse bytes and return all keys.
    fn parse(data: &[u8]) -> Vec<KeyEvent> {
        Parser::new().advance(data)
    }

    /// Helper: parse bytes, return exactly one key.
    fn parse_one(data: &[u8]) -> KeyEvent {
        let events = parse(data);
        assert_eq!(events.len(), 1, "expected 1 event, got {events:?}");
        events[0]
    }

    fn key(code: KeyCode) -> KeyEvent {
        press(code)
    }

    // ── ASCII Printable ─────────────────────────────────────────────────

    #[test]
    fn ascii_chars() {
        let events = parse(b"#a0");
        assert_eq!(
            events,
            vec![
                key(KeyCode::Char('#')),
                key(KeyCode::Char('a')),
                key(KeyCode::Char('0'))
            ]
        );
    }

    #[test]
    fn ascii_space_and_parens() {
        assert_eq!(
            parse(b"( )"),
            vec![
                key(KeyCode::Char('(')),
                key(KeyCode::Char(' ')),
                key(KeyCode::Char(')'))
            ]
        );
    }

    // ── Control Characters ──────────────────────────────────────────────

    #[test]
    fn ctrl_letters() {
        assert!(parse_one(&[0x03]).is_ctrl('c'));
        assert!(parse_one(&[0x04]).is_ctrl('d'));
        assert!(parse_one(&[0x15]).is_ctrl('u'));
        assert!(parse_one(&[0x17]).is_ctrl('w'));
    }

    #[test]
    fn ctrl_at() {
        assert!(parse_one(&[0x00]).is_ctrl('@'));
    }

    #[test]
    fn enter_cr_and_lf() {
        assert_eq!(parse_one(b"\r"), key(KeyCode::Enter));
        assert_eq!(parse_one(b"\n"), key(KeyCode::Enter));
    }

    #[test]
    fn tab() {
        assert_eq!(parse_one(b"\t"), key(KeyCode::Tab));
    }

    #[test]
    fn backspace_both_encodings() {
        assert_eq!(parse_one(&[0x08]), key(KeyCode::Backspace));
        assert_eq!(parse_one(&[0x7F]), key(KeyCode::Backspace));
    }

    // ── Arrows and Navigation ───────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(parse_one(b"\x1b[A"), key(KeyCode::Up));
        assert_eq!(parse_one(b"\x1b[B"), key(KeyCode::Down));
        assert_eq!(parse_one(b"\x1b[C"), key(KeyCode::Right));
        assert_eq!(parse_one(b"\x1b[D"), key(KeyCode::Left));
    }

    #[test]
    fn ctrl_left() {
        assert_eq!(
            parse_one(b"\x1b[1;5D"),
            KeyEvent::new(KeyCode::Left, Modifiers::CTRL)
        );
    }

    #[test]
    fn home_end_variants() {
        assert_eq!(parse_one(b"\x1b[H"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[F"), key(KeyCode::End));
        assert_eq!(parse_one(b"\x1b[1~"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[4~"), key(KeyCode::End));
        assert_eq!(parse_one(b"\x1b[7~"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[8~"), key(KeyCode::End));
    }

    #[test]
    fn editing_keys() {
        assert_eq!(parse_one(b"\x1b[2~"), key(KeyCode::Insert));
        assert_eq!(parse_one(b"\x1b[3~"), key(KeyCode::Delete));
        assert_eq!(parse_one(b"\x1b[5~"), key(KeyCode::PageUp));
        assert_eq!(parse_one(b"\x1b[6~"), key(KeyCode::PageDown));
    }

    #[test]
    fn shift_tab() {
        assert_eq!(
            parse_one(b"\x1b[Z"),
            KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT)
        );
    }

    #[test]
    fn ss3_arrows_and_home() {
        assert_eq!(parse_one(b"\x1bOA"), key(KeyCode::Up));
        assert_eq!(parse_one(b"\x1bOH"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1bOF"), key(KeyCode::End));
    }

    // ── Dropped Sequences ───────────────────────────────────────────────

    #[test]
    fn function_keys_are_dropped() {
        assert!(parse(b"\x1bOP").is_empty());
        assert!(parse(b"\x1b[15~").is_empty());
        assert!(parse(b"\x1b[24~").is_empty());
    }

    #[test]
    fn dropped_sequence_does_not_eat_following_text() {
        assert_eq!(parse(b"\x1b[15~a"), vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn focus_report_is_dropped() {
        assert!(parse(b"\x1b[I").is_empty());
    }

    // ── Alt ─────────────────────────────────────────────────────────────

    #[test]
    fn alt_char() {
        assert_eq!(
            parse_one(b"\x1bb"),
            KeyEvent::new(KeyCode::Char('b'), Modifiers::ALT)
        );
    }

    #[test]
    fn alt_backspace() {
        assert_eq!(
            parse_one(b"\x1b\x7f"),
            KeyEvent::new(KeyCode::Backspace, Modifiers::ALT)
        );
    }

    #[test]
    fn alt_escape() {
        assert_eq!(
            parse_one(b"\x1b\x1b"),
            KeyEvent::new(KeyCode::Escape, Modifiers::ALT)
        );
    }

    // ── UTF-8 ───────────────────────────────────────────────────────────

    #[test]
    fn utf8_two_and_three_bytes() {
        assert_eq!(parse_one("é".as_bytes()), key(KeyCode::Char('é')));
        assert_eq!(parse_one("日".as_bytes()), key(KeyCode::Char('日')));
    }

    #[test]
    fn utf8_four_bytes() {
        assert_eq!(parse_one("🎨".as_bytes()), key(KeyCode::Char('🎨')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "日".as_bytes();
        let mut p = Parser::new();
        assert!(p.advance(&bytes[..1]).is_empty());
        assert!(p.has_pending());
        assert_eq!(p.advance(&bytes[1..]), vec![key(KeyCode::Char('日'))]);
        assert!(!p.has_pending());
    }

    #[test]
    fn invalid_continuation_is_skipped() {
        assert_eq!(parse(&[0xC3, b'a']), vec![key(KeyCode::Char('a'))]);
    }

    // ── Escape Ambiguity ────────────────────────────────────────────────

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.flush(), vec![key(KeyCode::Escape)]);
        assert!(!p.has_pending());
    }

    #[test]
    fn csi_split_across_reads() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert_eq!(p.advance(b"D"), vec![key(KeyCode::Left)]);
    }

    #[test]
    fn flush_partial_csi_as_literal() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert_eq!(
            p.flush(),
            vec![key(KeyCode::Escape), key(KeyCode::Char('['))]
        );
    }

    #[test]
    fn flush_empty_is_empty() {
        assert!(Parser::new().flush().is_empty());
    }

    // ── Params ──────────────────────────────────────────────────────────

    #[test]
    fn csi_params() {
        assert_eq!(parse_csi_params(b""), Vec::<u16>::new());
        assert_eq!(parse_csi_params(b"1;5"), vec![1, 5]);
        assert_eq!(parse_csi_params(b";5"), vec![0, 5]);
    }

    #[test]
    fn modifier_decoding() {
        assert_eq!(decode_modifiers(0), Modifiers::empty());
        assert_eq!(decode_modifiers(1), Modifiers::empty());
        assert_eq!(decode_modifiers(2), Modifiers::SHIFT);
        assert_eq!(decode_modifiers(3), Modifiers::ALT);
        assert_eq!(decode_modifiers(5), Modifiers::CTRL);
        assert_eq!(decode_modifiers(6), Modifiers::SHIFT | Modifiers::CTRL);
    }
}
