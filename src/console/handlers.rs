//! Key bindings shared by the console screens
//!
//! Each helper applies one family of keys to a screen and reports whether the
//! key was consumed, so screens can chain them before their own bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::traits::{FormHandler, Navigable, Scrollable};

/// Answer to a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accept,
    Decline,
}

/// `↑`/`k`, `↓`/`j`, `Home`, `End` on a selectable list
pub fn move_selection<T: Navigable + ?Sized>(list: &mut T, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => list.navigate_up(),
        KeyCode::Down | KeyCode::Char('j') => list.navigate_down(),
        KeyCode::Home => list.navigate_to_first(),
        KeyCode::End => list.navigate_to_last(),
        _ => return false,
    }
    true
}

/// Line and page scrolling of a read-only view
pub fn scroll<T: Scrollable + ?Sized>(view: &mut T, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => view.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => view.scroll_down(1),
        KeyCode::PageUp => view.page_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => view.page_down(),
        KeyCode::Home | KeyCode::Char('g') => view.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => view.scroll_to_bottom(),
        _ => return false,
    }
    true
}

/// Focus movement and text editing inside a form.
///
/// Control chords are left to the caller (`Ctrl+S` submits).
pub fn edit_form<T: FormHandler + ?Sized>(form: &mut T, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.previous_field(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.handle_char_input(c)
        }
        KeyCode::Backspace => form.handle_backspace(),
        KeyCode::Delete => form.handle_delete(),
        _ => return false,
    }
    true
}

pub fn confirmation(key: KeyEvent) -> Option<Confirmation> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Confirmation::Accept),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Confirmation::Decline),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[derive(Default)]
    struct Rows {
        selected: Option<usize>,
        count: usize,
    }

    impl Navigable for Rows {
        fn navigate_up(&mut self) {
            self.selected = self.selected.map(|i| i.saturating_sub(1));
        }

        fn navigate_down(&mut self) {
            self.selected = self.selected.map(|i| (i + 1).min(self.count - 1));
        }

        fn get_selected_index(&self) -> Option<usize> {
            self.selected
        }

        fn set_selected_index(&mut self, index: Option<usize>) {
            self.selected = index;
        }

        fn get_item_count(&self) -> usize {
            self.count
        }
    }

    #[derive(Default)]
    struct Fields {
        focus: usize,
        text: String,
    }

    impl FormHandler for Fields {
        fn get_current_field(&self) -> usize {
            self.focus
        }

        fn set_current_field(&mut self, field: usize) {
            self.focus = field;
        }

        fn get_field_count(&self) -> usize {
            3
        }

        fn handle_char_input(&mut self, c: char) {
            self.text.push(c);
        }

        fn handle_backspace(&mut self) {
            self.text.pop();
        }

        fn handle_delete(&mut self) {}
    }

    #[test]
    fn test_move_selection() {
        let mut rows = Rows {
            selected: Some(0),
            count: 4,
        };
        assert!(move_selection(&mut rows, key(KeyCode::Char('j'))));
        assert_eq!(rows.selected, Some(1));
        assert!(move_selection(&mut rows, key(KeyCode::End)));
        assert_eq!(rows.selected, Some(3));
        assert!(!move_selection(&mut rows, key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_edit_form_skips_control_chords() {
        let mut form = Fields::default();
        assert!(edit_form(&mut form, key(KeyCode::Char('a'))));
        assert!(!edit_form(
            &mut form,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
        ));
        assert_eq!(form.text, "a");

        assert!(edit_form(&mut form, key(KeyCode::BackTab)));
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn test_confirmation_keys() {
        assert_eq!(confirmation(key(KeyCode::Char('Y'))), Some(Confirmation::Accept));
        assert_eq!(confirmation(key(KeyCode::Esc)), Some(Confirmation::Decline));
        assert_eq!(confirmation(key(KeyCode::Char('d'))), None);
    }
}
