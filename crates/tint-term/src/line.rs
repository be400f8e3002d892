// SPDX-License-Identifier: MIT
//
// Single-line editor for the prompt.
//
// A string buffer plus a cursor. The cursor is a byte offset that always
// sits on a grapheme cluster boundary, so Backspace removes a whole `é`
// (even when typed as `e` + combining accent) and Left steps over an emoji
// in one press. Display columns come from `unicode-width`, so a wide CJK
// character moves the terminal cursor two cells.
//
// Every edit reports whether the text changed. The caller only needs to
// revalidate on `Changed`; `Moved` is a redraw of the cursor alone.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::input::{KeyCode, KeyEvent, Modifiers};

/// Terminal cells `s` occupies.
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// What a key did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text changed (the cursor may have moved too).
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Nothing happened: an unbound key, or a move or deletion at an edge.
    Ignored,
}

impl EditOutcome {
    const fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Ignored }
    }

    const fn from_moved(moved: bool) -> Self {
        if moved { Self::Moved } else { Self::Ignored }
    }
}

/// Editable line with a grapheme-aligned cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    /// Byte offset into `text`, always on a grapheme boundary.
    cursor: usize,
}

impl LineEditor {
    /// An empty line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display column of the cursor, counting from the start of the text.
    #[must_use]
    pub fn display_cursor(&self) -> usize {
        self.text[..self.cursor].width()
    }

    // ── Key dispatch ────────────────────────────────────────────────────

    /// Apply one key.
    ///
    /// Bindings follow readline: Ctrl-A/E home/end, Ctrl-B/F left/right,
    /// Ctrl-U kill to start, Ctrl-K kill to end, Ctrl-W and Alt-Backspace
    /// kill the previous word. Keys the prompt reacts to itself (Enter,
    /// Escape, Ctrl-C, Ctrl-D) are `Ignored` here.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        let KeyEvent { code, modifiers } = key;

        if modifiers == Modifiers::CTRL {
            return match code {
                KeyCode::Char('a') => EditOutcome::from_moved(self.move_home()),
                KeyCode::Char('e') => EditOutcome::from_moved(self.move_end()),
                KeyCode::Char('b') => EditOutcome::from_moved(self.move_left()),
                KeyCode::Char('f') => EditOutcome::from_moved(self.move_right()),
                KeyCode::Char('h') => EditOutcome::from_changed(self.backspace()),
                KeyCode::Char('u') => EditOutcome::from_changed(self.kill_to_start()),
                KeyCode::Char('k') => EditOutcome::from_changed(self.kill_to_end()),
                KeyCode::Char('w') => EditOutcome::from_changed(self.kill_word()),
                KeyCode::Left => EditOutcome::from_moved(self.move_word_left()),
                KeyCode::Right => EditOutcome::from_moved(self.move_word_right()),
                _ => EditOutcome::Ignored,
            };
        }

        if modifiers == Modifiers::ALT {
            return match code {
                KeyCode::Backspace => EditOutcome::from_changed(self.kill_word()),
                KeyCode::Char('b') => EditOutcome::from_moved(self.move_word_left()),
                KeyCode::Char('f') => EditOutcome::from_moved(self.move_word_right()),
                _ => EditOutcome::Ignored,
            };
        }

        if !(modifiers.is_empty() || modifiers == Modifiers::SHIFT) {
            return EditOutcome::Ignored;
        }

        match code {
            KeyCode::Char(ch) if !ch.is_control() => {
                self.insert_char(ch);
                EditOutcome::Changed
            }
            KeyCode::Backspace => EditOutcome::from_changed(self.backspace()),
            KeyCode::Delete => EditOutcome::from_changed(self.delete()),
            KeyCode::Left => EditOutcome::from_moved(self.move_left()),
            KeyCode::Right => EditOutcome::from_moved(self.move_right()),
            KeyCode::Home => EditOutcome::from_moved(self.move_home()),
            KeyCode::End => EditOutcome::from_moved(self.move_end()),
            _ => EditOutcome::Ignored,
        }
    }

    // ── Editing ─────────────────────────────────────────────────────────

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the grapheme before the cursor. Returns `true` if one was
    /// deleted.
    pub fn backspace(&mut self) -> bool {
        let Some(start) = self.prev_boundary() else {
            return false;
        };
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Delete the grapheme under the cursor. Returns `true` if one was
    /// deleted.
    pub fn delete(&mut self) -> bool {
        let Some(end) = self.next_boundary() else {
            return false;
        };
        self.text.replace_range(self.cursor..end, "");
        true
    }

    /// Delete everything before the cursor.
    pub fn kill_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
        true
    }

    /// Delete everything from the cursor on.
    pub fn kill_to_end(&mut self) -> bool {
        if self.cursor == self.text.len() {
            return false;
        }
        self.text.truncate(self.cursor);
        true
    }

    /// Delete the word before the cursor, plus any whitespace between it
    /// and the cursor.
    pub fn kill_word(&mut self) -> bool {
        let start = self.word_start_before();
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    // ── Movement ────────────────────────────────────────────────────────

    pub fn move_left(&mut self) -> bool {
        self.prev_boundary().is_some_and(|pos| {
            self.cursor = pos;
            true
        })
    }

    pub fn move_right(&mut self) -> bool {
        self.next_boundary().is_some_and(|pos| {
            self.cursor = pos;
            true
        })
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.text.len();
        self.cursor = self.text.len();
        moved
    }

    pub fn move_word_left(&mut self) -> bool {
        let start = self.word_start_before();
        let moved = start != self.cursor;
        self.cursor = start;
        moved
    }

    pub fn move_word_right(&mut self) -> bool {
        let end = self.word_end_after();
        let moved = end != self.cursor;
        self.cursor = end;
        moved
    }

    // ── Boundaries ──────────────────────────────────────────────────────

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .graphemes(true)
            .next_back()
            .map(|g| self.cursor - g.len())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }

    /// Start of the word before the cursor: skip whitespace, then
    /// everything that is not whitespace.
    fn word_start_before(&self) -> usize {
        let mut pos = self.cursor;
        let mut in_word = false;
        for g in self.text[..self.cursor].graphemes(true).rev() {
            let blank = g.chars().all(char::is_whitespace);
            if in_word && blank {
                break;
            }
            in_word |= !blank;
            pos -= g.len();
        }
        pos
    }

    /// End of the word after the cursor: skip whitespace, then everything
    /// that is not whitespace.
    fn word_end_after(&self) -> usize {
        let mut pos = self.cursor;
        let mut in_word = false;
        for g in self.text[self.cursor..].graphemes(true) {
            let blank = g.chars().all(char::is_whitespace);
            if in_word && blank {
                break;
            }
            in_word |= !blank;
            pos += g.len();
        }
        pos
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> LineEditor {
        LineEditor {
            text: text.to_owned(),
            cursor: text.len(),
        }
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, Modifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// Type a string one key at a time.
    fn type_str(ed: &mut LineEditor, s: &str) {
        for ch in s.chars() {
            assert_eq!(ed.handle_key(plain(KeyCode::Char(ch))), EditOutcome::Changed);
        }
    }

    // ── Insert ──────────────────────────────────────────────────────────

    #[test]
    fn typing_appends() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "#abc");
        assert_eq!(ed.text(), "#abc");
        assert_eq!(ed.cursor, 4);
    }

    #[test]
    fn insert_in_middle() {
        let mut ed = editor("rb(1,2,3)");
        ed.cursor = 1;
        ed.insert_char('g');
        assert_eq!(ed.text(), "rgb(1,2,3)");
        assert_eq!(ed.cursor, 2);
    }


    #[test]
    fn shifted_chars_insert() {
        let mut ed = LineEditor::new();
        let out = ed.handle_key(KeyEvent::new(KeyCode::Char('R'), Modifiers::SHIFT));
        assert_eq!(out, EditOutcome::Changed);
        assert_eq!(ed.text(), "R");
    }

    // ── Delete ──────────────────────────────────────────────────────────

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut ed = editor("red");
        ed.move_home();
        assert_eq!(ed.handle_key(plain(KeyCode::Backspace)), EditOutcome::Ignored);
        assert_eq!(ed.text(), "red");
    }

    #[test]
    fn backspace_removes_previous() {
        let mut ed = editor("redx");
        assert_eq!(ed.handle_key(plain(KeyCode::Backspace)), EditOutcome::Changed);
        assert_eq!(ed.text(), "red");
    }

    #[test]
    fn backspace_removes_whole_cluster() {
        // `e` + combining acute is one grapheme.
        let mut ed = editor("cafe\u{301}");
        assert!(ed.backspace());
        assert_eq!(ed.text(), "caf");
    }

    #[test]
    fn delete_at_end_is_ignored() {
        let mut ed = editor("red");
        assert_eq!(ed.handle_key(plain(KeyCode::Delete)), EditOutcome::Ignored);
    }

    #[test]
    fn delete_under_cursor() {
        let mut ed = editor("xred");
        ed.move_home();
        assert_eq!(ed.handle_key(plain(KeyCode::Delete)), EditOutcome::Changed);
        assert_eq!(ed.text(), "red");
        assert_eq!(ed.cursor, 0);
    }

    // ── Kill ────────────────────────────────────────────────────────────

    #[test]
    fn ctrl_u_kills_to_start() {
        let mut ed = editor("rgb(1,2,3)");
        ed.cursor = 4;
        assert_eq!(ed.handle_key(ctrl('u')), EditOutcome::Changed);
        assert_eq!(ed.text(), "1,2,3)");
        assert_eq!(ed.cursor, 0);
    }

    #[test]
    fn ctrl_u_at_start_is_ignored() {
        let mut ed = editor("red");
        ed.move_home();
        assert_eq!(ed.handle_key(ctrl('u')), EditOutcome::Ignored);
    }

    #[test]
    fn ctrl_k_kills_to_end() {
        let mut ed = editor("#ff0000");
        ed.cursor = 3;
        assert_eq!(ed.handle_key(ctrl('k')), EditOutcome::Changed);
        assert_eq!(ed.text(), "#ff");
    }

    #[test]
    fn ctrl_w_kills_previous_word_and_trailing_space() {
        let mut ed = editor("rgb(1, 2, 3)  ");
        assert_eq!(ed.handle_key(ctrl('w')), EditOutcome::Changed);
        assert_eq!(ed.text(), "rgb(1, 2, ");
        assert_eq!(ed.handle_key(ctrl('w')), EditOutcome::Changed);
        assert_eq!(ed.text(), "rgb(1, ");
    }

    #[test]
    fn alt_backspace_kills_word() {
        let mut ed = editor("light blue");
        let out = ed.handle_key(KeyEvent::new(KeyCode::Backspace, Modifiers::ALT));
        assert_eq!(out, EditOutcome::Changed);
        assert_eq!(ed.text(), "light ");
    }

    #[test]
    fn kill_word_on_empty_is_ignored() {
        let mut ed = LineEditor::new();
        assert_eq!(ed.handle_key(ctrl('w')), EditOutcome::Ignored);
    }

    // ── Movement ────────────────────────────────────────────────────────

    #[test]
    fn arrows_move_without_changing() {
        let mut ed = editor("red");
        assert_eq!(ed.handle_key(plain(KeyCode::Left)), EditOutcome::Moved);
        assert_eq!(ed.cursor, 2);
        assert_eq!(ed.handle_key(plain(KeyCode::Right)), EditOutcome::Moved);
        assert_eq!(ed.handle_key(plain(KeyCode::Right)), EditOutcome::Ignored);
        assert_eq!(ed.text(), "red");
    }

    #[test]
    fn home_end_and_readline_aliases() {
        let mut ed = editor("navy");
        assert_eq!(ed.handle_key(plain(KeyCode::Home)), EditOutcome::Moved);
        assert_eq!(ed.cursor, 0);
        assert_eq!(ed.handle_key(ctrl('a')), EditOutcome::Ignored);
        assert_eq!(ed.handle_key(ctrl('e')), EditOutcome::Moved);
        assert_eq!(ed.cursor, 4);
        assert_eq!(ed.handle_key(plain(KeyCode::End)), EditOutcome::Ignored);
    }

    #[test]
    fn left_steps_over_emoji_cluster() {
        // Family emoji: several code points joined with ZWJ.
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let mut ed = editor(&format!("a{family}"));
        assert!(ed.move_left());
        assert_eq!(ed.cursor, 1);
    }

    #[test]
    fn word_movement() {
        let mut ed = editor("dark sea green");
        assert!(ed.move_word_left());
        assert_eq!(ed.cursor, 9);
        assert!(ed.move_word_left());
        assert_eq!(ed.cursor, 5);
        assert!(ed.move_word_right());
        assert_eq!(ed.cursor, 8);
    }

    // ── Ignored keys ────────────────────────────────────────────────────

    #[test]
    fn prompt_keys_are_ignored() {
        let mut ed = editor("red");
        for key in [
            plain(KeyCode::Enter),
            plain(KeyCode::Escape),
            plain(KeyCode::Tab),
            ctrl('c'),
            ctrl('d'),
        ] {
            assert_eq!(ed.handle_key(key), EditOutcome::Ignored, "{key:?}");
        }
        assert_eq!(ed.text(), "red");
    }

    // ── Display width ───────────────────────────────────────────────────

    #[test]
    fn display_cursor_counts_wide_chars() {
        let mut ed = editor("日本");
        assert_eq!(ed.display_cursor(), 4);
        ed.move_left();
        assert_eq!(ed.display_cursor(), 2);
    }

    #[test]
    fn display_width_of_strings() {
        assert_eq!(display_width(">>>>"), 4);
        assert_eq!(display_width("界界"), 4);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn display_cursor_ignores_combining_marks() {
        let ed = editor("e\u{301}");
        assert_eq!(ed.display_cursor(), 1);
    }
}
