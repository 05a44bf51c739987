//! Input line editing shared by the interactive hosts.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Editable line. The cursor counts grapheme clusters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        InputLine {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the contents and puts the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let before = self.len();
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        // a combining mark merges into the previous cluster
        if self.len() > before {
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.text.drain(start..end);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.drain(start..end);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn move_word_left(&mut self) {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        let mut pos = self.cursor;

        while pos > 0 && is_blank(graphemes[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !is_blank(graphemes[pos - 1]) {
            pos -= 1;
        }

        self.cursor = pos;
    }

    pub fn move_word_right(&mut self) {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        let len = graphemes.len();
        let mut pos = self.cursor;

        while pos < len && !is_blank(graphemes[pos]) {
            pos += 1;
        }
        while pos < len && is_blank(graphemes[pos]) {
            pos += 1;
        }

        self.cursor = pos;
    }

    /// Display width of the text left of the cursor.
    pub fn cursor_width(&self) -> usize {
        self.width_before(self.cursor)
    }

    pub fn width_before(&self, grapheme_index: usize) -> usize {
        self.text[..self.byte_index(grapheme_index)].width()
    }

    /// At most `count` graphemes starting at `skip`.
    pub fn visible(&self, skip: usize, count: usize) -> String {
        self.text.graphemes(true).skip(skip).take(count).collect()
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// In-memory recall of submitted lines, oldest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    position: Option<usize>,
    saved_input: String,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn push(&mut self, entry: &str) {
        self.position = None;
        if entry.trim().is_empty() || self.entries.last().map(String::as_str) == Some(entry) {
            return;
        }
        self.entries.push(entry.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Steps back in history, saving the current input on the first step.
    pub fn previous(&mut self, current: &str) -> Option<&str> {
        let next = match self.position {
            None if self.is_empty() => return None,
            None => {
                self.saved_input = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => 0,
            Some(pos) => pos - 1,
        };
        self.position = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Steps forward; past the newest entry the saved input comes back.
    pub fn next(&mut self) -> Option<&str> {
        let pos = self.position?;
        if pos + 1 < self.entries.len() {
            self.position = Some(pos + 1);
            self.entries.get(pos + 1).map(String::as_str)
        } else {
            self.position = None;
            Some(self.saved_input.as_str())
        }
    }

    pub fn reset_navigation(&mut self) {
        self.position = None;
    }
}
