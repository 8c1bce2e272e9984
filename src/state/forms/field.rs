//! Editable text buffer with an explicit cursor and selection

use std::ops::Range;

/// A single text input.
///
/// Positions are char indices, never byte offsets, so multi-byte input
/// (Hangul, emoji) can be edited without splitting a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
    /// Set once the input has received focus. Until then there is no
    /// cursor context to splice into.
    has_cursor: bool,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_cursor(&self) -> bool {
        self.has_cursor
    }

    /// Mark the input as focused, establishing a cursor context
    pub fn focus(&mut self) {
        self.has_cursor = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.anchor = None;
    }

    /// The current selection, or an empty range at the cursor.
    /// `None` when the input has never been focused.
    pub fn selection(&self) -> Option<Range<usize>> {
        if !self.has_cursor {
            return None;
        }
        Some(self.selected_range())
    }

    fn selected_range(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) if anchor < self.cursor => anchor..self.cursor,
            Some(anchor) => self.cursor..anchor,
            None => self.cursor..self.cursor,
        }
    }

    fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|a| a != self.cursor)
    }

    /// Replace the chars in `range` with `replacement` and place the
    /// cursor right after the inserted text
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let start_byte = byte_offset(&self.text, start);
        let end_byte = byte_offset(&self.text, end);
        self.text.replace_range(start_byte..end_byte, replacement);
        self.cursor = start + replacement.chars().count();
        self.anchor = None;
    }

    /// Type a string at the cursor, replacing any selection
    pub fn insert_str(&mut self, s: &str) {
        let range = self.selected_range();
        self.replace_range(range, s);
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Delete the selection, or the char before the cursor
    pub fn backspace(&mut self) {
        if self.has_selection() {
            let range = self.selected_range();
            self.replace_range(range, "");
        } else if self.cursor > 0 {
            self.replace_range(self.cursor - 1..self.cursor, "");
        }
    }

    /// Delete the selection, or the char under the cursor
    pub fn delete(&mut self) {
        if self.has_selection() {
            let range = self.selected_range();
            self.replace_range(range, "");
        } else if self.cursor < self.len_chars() {
            self.replace_range(self.cursor..self.cursor + 1, "");
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = (self.cursor + 1).min(self.len_chars());
    }

    /// Move to the start of the current line
    pub fn move_home(&mut self, extend: bool) {
        self.begin_motion(extend);
        let before: Vec<char> = self.text.chars().take(self.cursor).collect();
        self.cursor = before
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
    }

    /// Move to the end of the current line
    pub fn move_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        let offset = self
            .text
            .chars()
            .skip(self.cursor)
            .position(|c| c == '\n');
        self.cursor = match offset {
            Some(n) => self.cursor + n,
            None => self.len_chars(),
        };
    }

    /// Move to the same column on the previous line, or to the start of
    /// the text from the first line
    pub fn move_up(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (line, col) = self.line_col();
        self.cursor = match line.checked_sub(1) {
            Some(prev) => {
                let (start, len) = self.line_spans()[prev];
                start + col.min(len)
            }
            None => 0,
        };
    }

    /// Move to the same column on the next line, or to the end of the
    /// text from the last line
    pub fn move_down(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (line, col) = self.line_col();
        self.cursor = match self.line_spans().get(line + 1) {
            Some(&(start, len)) => start + col.min(len),
            None => self.len_chars(),
        };
    }

    /// Line and column of the cursor
    fn line_col(&self) -> (usize, usize) {
        self.text
            .chars()
            .take(self.cursor)
            .fold((0, 0), |(line, col), c| {
                if c == '\n' {
                    (line + 1, 0)
                } else {
                    (line, col + 1)
                }
            })
    }

    /// Start index and length of every line, in chars
    fn line_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = 0;
        for line in self.text.split('\n') {
            let len = line.chars().count();
            spans.push((start, len));
            start += len + 1;
        }
        spans
    }

    fn begin_motion(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    /// Re-clamp cursor and anchor after the text changed underneath them
    pub fn clamp(&mut self) {
        let len = self.len_chars();
        self.cursor = self.cursor.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    /// Overwrite the text without touching cursor state beyond clamping
    pub(crate) fn replace_text(&mut self, text: String) {
        self.text = text;
        self.clamp();
    }
}

/// Programmatic setup of an input's contents and cursor
#[allow(dead_code)]
impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    /// Replace the whole text. Cursor moves to the end, selection is dropped.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len_chars();
        self.anchor = None;
    }

    /// Move the cursor, clamped to the text length. Drops any selection.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len_chars());
        self.anchor = None;
    }

    /// Select `range` (char indices), leaving the cursor at its end
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        self.anchor = Some(range.start.min(len));
        self.cursor = range.end.min(len);
    }
}

/// Byte offset of the `char_idx`-th char, or the text length past the end
pub fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte, _)| byte)
}
