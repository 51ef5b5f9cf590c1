//! Cursor-aware editing for the text inputs.
//!
//! The text itself lives in the core state; this module only tracks where the
//! cursor is (as a char index) and computes the edited string.

use unicode_width::UnicodeWidthChar;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    /// Start of the current line
    Home,
    /// End of the current line
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputCursor {
    pos: usize,
}

impl InputCursor {
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Apply an edit to `text`. Returns the new text when the content changed.
    pub fn apply(&mut self, text: &str, edit: Edit) -> Option<String> {
        let char_count = text.chars().count();
        // The text may have been replaced underneath us (e.g. cleared on send)
        self.pos = self.pos.min(char_count);

        match edit {
            Edit::Insert(c) => {
                let mut out = text.to_string();
                out.insert(char_to_byte_index(text, self.pos), c);
                self.pos += 1;
                Some(out)
            }
            Edit::Backspace => {
                if self.pos == 0 {
                    return None;
                }
                self.pos -= 1;
                let mut out = text.to_string();
                out.remove(char_to_byte_index(text, self.pos));
                Some(out)
            }
            Edit::Delete => {
                if self.pos >= char_count {
                    return None;
                }
                let mut out = text.to_string();
                out.remove(char_to_byte_index(text, self.pos));
                Some(out)
            }
            Edit::Left => {
                self.pos = self.pos.saturating_sub(1);
                None
            }
            Edit::Right => {
                self.pos = (self.pos + 1).min(char_count);
                None
            }
            Edit::Home => {
                let before: Vec<char> = text.chars().take(self.pos).collect();
                self.pos = before
                    .iter()
                    .rposition(|&c| c == '\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            Edit::End => {
                let after = text.chars().skip(self.pos).take_while(|&c| c != '\n').count();
                self.pos += after;
                None
            }
        }
    }

    /// Line index and display column of the cursor within `text`
    pub fn line_col(&self, text: &str) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for c in text.chars().take(self.pos) {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += c.width().unwrap_or(0);
            }
        }
        (line, col)
    }
}

/// First visible line so that `cursor_line` stays inside a window of `visible` lines
pub fn first_visible_line(cursor_line: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor_line;
    }
    (cursor_line + 1).saturating_sub(visible)
}

/// Horizontal scroll (in columns) that keeps `cursor_col` inside `width`
pub fn horizontal_offset(cursor_col: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else if cursor_col >= width {
        cursor_col - width + 1
    } else {
        0
    }
}

/// Slice `line` to the columns `[offset, offset + width)`.
/// A wide char cut by the left edge leaves blanks for its visible columns so
/// later chars stay on their true columns.
pub fn visible_slice(line: &str, offset: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if col >= offset && col + w <= offset + width {
            out.push(c);
        } else if col < offset && col + w > offset {
            let shown = (col + w).min(offset + width) - offset;
            out.extend(std::iter::repeat(' ').take(shown));
        }
        col += w;
        if col >= offset + width {
            break;
        }
    }
    out
}
