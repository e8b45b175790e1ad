use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

// ── Single-line text input ────────────────────────────────────────────

/// Editable one-line buffer with a byte-offset cursor kept on char boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        self.cursor = self.value.len();
    }

    /// Take the contents, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, |ch| self.cursor - ch.len_utf8())
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map_or(self.value.len(), |ch| self.cursor + ch.len_utf8())
    }

    /// Start of the word before the cursor, skipping trailing whitespace.
    fn word_start(&self) -> usize {
        let before = self.value[..self.cursor].trim_end();
        before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(idx, c)| idx + c.len_utf8())
    }

    /// Apply an editing key. Returns `true` when the key was consumed and
    /// `false` for keys the caller should handle (Enter, Esc, Tab, Up/Down, and
    /// control chords other than the editing ones).
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.cursor = self.cursor.min(self.value.len());

        match code {
            KeyCode::Left => {
                self.cursor = self.prev_boundary();
                true
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            KeyCode::Backspace if modifiers.contains(KeyModifiers::ALT) => {
                self.delete_word();
                true
            }
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word();
                true
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Backspace => {
                let start = self.prev_boundary();
                self.value.drain(start..self.cursor);
                self.cursor = start;
                true
            }
            KeyCode::Delete => {
                let end = self.next_boundary();
                self.value.drain(self.cursor..end);
                true
            }
            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    fn delete_word(&mut self) {
        let start = self.word_start();
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    /// The value with a block cursor drawn at the cursor position.
    pub fn display(&self) -> String {
        let (before, after) = self.value.split_at(self.cursor.min(self.value.len()));
        format!("{before}\u{2588}{after}")
    }
}

// ── Rendering helpers ─────────────────────────────────────────────────

/// Clear a `width`×`height` panel at (centred x, `top`), draw a bordered
/// block, and return the inner area. Sizes are clamped to the screen.
pub fn render_modal(
    frame: &mut Frame,
    title: &str,
    border_style: Style,
    width: u16,
    height: u16,
    top: Option<u16>,
) -> Rect {
    let area = frame.area();
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(w)) / 2;
    let y = top.unwrap_or_else(|| area.height.saturating_sub(h) / 2);
    let panel = Rect::new(x, y.min(area.height.saturating_sub(h)), w, h);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    inner
}

/// Render `(key, description)` pairs as one line of alternating spans.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    hints: &[(&str, &str)],
    key_style: Style,
    desc_style: Style,
) {
    let spans: Vec<Span<'_>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, key_style),
                Span::styled(*desc, desc_style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in text.chars() {
            assert!(input.handle_key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        input
    }

    #[test]
    fn typing_appends_at_cursor() {
        let input = typed("fix css");
        assert_eq!(input.value(), "fix css");
        assert_eq!(input.display(), "fix css\u{2588}");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = typed("fx");
        input.handle_key(KeyCode::Left, KeyModifiers::NONE);
        input.handle_key(KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(input.value(), "fix");
    }

    #[test]
    fn backspace_and_delete_respect_multibyte_chars() {
        let mut input = typed("café!");
        input.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        input.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(input.value(), "caf");

        input.handle_key(KeyCode::Home, KeyModifiers::NONE);
        input.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(input.display(), "\u{2588}af");
    }

    #[test]
    fn backspace_at_start_is_harmless() {
        let mut input = TextInput::default();
        assert!(input.handle_key(KeyCode::Backspace, KeyModifiers::NONE));
        assert!(input.is_empty());
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut input = typed("review pull requests  ");
        input.handle_key(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "review pull ");
        input.handle_key(KeyCode::Backspace, KeyModifiers::ALT);
        assert_eq!(input.value(), "review ");
    }

    #[test]
    fn ctrl_u_clears_before_cursor() {
        let mut input = typed("hello world");
        for _ in 0..5 {
            input.handle_key(KeyCode::Left, KeyModifiers::NONE);
        }
        input.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.display(), "\u{2588}world");
    }

    #[test]
    fn control_chords_and_enter_are_not_consumed() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(!input.handle_key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(!input.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(input.is_empty());
    }

    #[test]
    fn shifted_chars_are_inserted() {
        let mut input = TextInput::default();
        assert!(input.handle_key(KeyCode::Char('F'), KeyModifiers::SHIFT));
        assert_eq!(input.value(), "F");
    }

    #[test]
    fn display_places_block_cursor() {
        let mut input = typed("ab");
        assert_eq!(input.display(), "ab\u{2588}");
        input.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(input.display(), "a\u{2588}b");
    }

    #[test]
    fn take_and_set() {
        let mut input = typed("title");
        assert_eq!(input.take(), "title");
        assert!(input.is_empty());
        input.set("prefilled");
        assert_eq!(input.display(), "prefilled\u{2588}");
    }
}
