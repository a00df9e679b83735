//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::console::ui::Styles;

/// Single or multi line text input bound to one draft key
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub multiline: bool,
    pub is_focused: bool,
    /// Cursor position in characters
    pub cursor_position: usize,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, multiline: bool) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            multiline,
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.chars().count();
    }

    /// Rows this field occupies including its border
    pub fn height(&self) -> u16 {
        if self.multiline {
            7
        } else {
            3
        }
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        // Keep the cursor line in view for long text areas
        let before: String = self.value.chars().take(self.cursor_position).collect();
        let cursor_row = u16::try_from(before.matches('\n').count()).unwrap_or(u16::MAX);
        let visible_rows = area.height.saturating_sub(2).max(1);
        let scroll = cursor_row.saturating_sub(visible_rows - 1);

        let paragraph = Paragraph::new(self.value.clone())
            .style(Styles::default())
            .block(block)
            .scroll((scroll, 0));
        f.render_widget(paragraph, area);

        if self.is_focused {
            let column = before.rsplit('\n').next().unwrap_or("");
            let width = u16::try_from(UnicodeWidthStr::width(column)).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(width);
            let cursor_y = area.y.saturating_add(1).saturating_add(cursor_row - scroll);
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_editing_at_cursor() {
        let mut field = FormField::new("name", "Tag Name", false);
        for c in "rst".chars() {
            field.insert_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.insert_char('u');
        assert_eq!(field.value, "rust");

        field.move_cursor_to_end();
        field.delete_char();
        assert_eq!(field.value, "rus");
        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "us");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = FormField::new("title", "Title", false);
        field.set_value("café");
        field.delete_char();
        assert_eq!(field.value, "caf");
        field.insert_char('é');
        field.insert_char('!');
        assert_eq!(field.value, "café!");
    }

    #[test]
    fn test_newlines_only_in_text_areas() {
        let mut line = FormField::new("title", "Title", false);
        line.insert_char('\n');
        assert_eq!(line.value, "");

        let mut area = FormField::new("body", "Body", true);
        area.set_value("a");
        area.insert_char('\n');
        area.insert_char('b');
        assert_eq!(area.value, "a\nb");
    }

    #[test]
    fn test_cursor_with_very_long_values() {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        let mut field = FormField::new("name", "Tag Name", false);
        field.is_focused = true;
        field.set_value("abcdef");
        terminal.draw(|f| field.render(f, Rect::new(0, 0, 40, 3))).unwrap();
        assert_eq!(terminal.get_cursor().unwrap(), (7, 1));

        // Wider than u16: the cursor is off the right edge, not wrapped back in
        field.set_value(&"x".repeat(65_539));
        terminal.draw(|f| field.render(f, Rect::new(0, 0, 40, 3))).unwrap();
        assert_eq!(terminal.get_cursor().unwrap(), (7, 1));

        let mut body = FormField::new("body", "Body", true);
        body.is_focused = true;
        body.set_value(&"\n".repeat(70_000));
        terminal.draw(|f| body.render(f, Rect::new(0, 0, 40, 5))).unwrap();
    }
}
