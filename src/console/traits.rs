//! Core traits for the console architecture
//!
//! This module defines the foundational traits that enable code reuse and
//! consistent behavior across all console screens.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::api::ApiRequest;
use crate::console::events::{ApiResponse, Ticket};
use crate::console::routes::Route;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Navigate to a different screen (always a fresh activation)
    NavigateTo(Route),
    /// Go back to the parent screen
    NavigateBack,
    /// Quit the application
    Quit,
    /// Set a transient status notification
    SetStatus(String),
    /// Set a transient error notification
    SetError(String),
    /// Clear messages
    ClearMessages,
    /// Execute one backend request for the current activation
    Request { ticket: Ticket, request: ApiRequest },
    /// Execute several requests concurrently and deliver one joined response
    RequestAll {
        ticket: Ticket,
        requests: Vec<ApiRequest>,
    },
    /// Several actions, applied in order
    Batch(Vec<ScreenAction>),
    /// No action taken
    None,
}

impl ScreenAction {
    pub fn request(ticket: Ticket, request: ApiRequest) -> Self {
        ScreenAction::Request { ticket, request }
    }

    /// Combine actions, dropping `None`s
    pub fn batch(actions: Vec<ScreenAction>) -> Self {
        let mut actions: Vec<_> = actions
            .into_iter()
            .filter(|action| *action != ScreenAction::None)
            .collect();
        match actions.len() {
            0 => ScreenAction::None,
            1 => actions.remove(0),
            _ => ScreenAction::Batch(actions),
        }
    }

    /// Flatten nested batches into a plain list
    pub fn flatten(self) -> Vec<ScreenAction> {
        match self {
            ScreenAction::Batch(actions) => actions.into_iter().flat_map(Self::flatten).collect(),
            ScreenAction::None => Vec::new(),
            other => vec![other],
        }
    }
}

/// Core trait for all console screens
pub trait Screen {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return an action
    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction;

    /// Route this screen was built for
    fn route(&self) -> Route;

    /// Called when the screen becomes active; issues its initial requests
    fn on_enter(&mut self) -> ScreenAction {
        ScreenAction::None
    }

    /// Called with every response belonging to the current activation
    fn on_response(&mut self, _ticket: Ticket, _outcome: ApiResponse) -> ScreenAction {
        ScreenAction::None
    }

    /// Whether plain character keys go to a text input (disables the `q` shortcut)
    fn captures_text(&self) -> bool {
        false
    }

    /// Context help shown in the help popup
    fn help(&self) -> &'static str;
}

/// Trait for screens with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for screens with scrollable content
pub trait Scrollable {
    fn scroll_up(&mut self, amount: usize);

    fn scroll_down(&mut self, amount: usize);

    fn get_scroll_offset(&self) -> usize;

    /// Set scroll offset with bounds checking
    fn set_scroll_offset(&mut self, offset: usize);

    fn calculate_max_scroll(&self) -> usize;

    fn scroll_to_top(&mut self) {
        self.set_scroll_offset(0);
    }

    fn scroll_to_bottom(&mut self) {
        let max_scroll = self.calculate_max_scroll();
        self.set_scroll_offset(max_scroll);
    }

    fn page_up(&mut self) {
        let page_size = self.get_page_size();
        let current = self.get_scroll_offset();
        self.set_scroll_offset(current.saturating_sub(page_size));
    }

    fn page_down(&mut self) {
        let page_size = self.get_page_size();
        let current = self.get_scroll_offset();
        let max_scroll = self.calculate_max_scroll();
        self.set_scroll_offset(std::cmp::min(current + page_size, max_scroll));
    }

    fn get_page_size(&self) -> usize {
        10
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current focus index
    fn get_current_field(&self) -> usize;

    /// Set current focus index
    fn set_current_field(&mut self, field: usize);

    /// Get total number of focusable controls
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field((current + 1) % total);
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_none() {
        assert_eq!(ScreenAction::batch(vec![ScreenAction::None]), ScreenAction::None);
        assert_eq!(
            ScreenAction::batch(vec![ScreenAction::None, ScreenAction::Quit]),
            ScreenAction::Quit
        );
    }

    #[test]
    fn test_flatten_nested_batches() {
        let action = ScreenAction::Batch(vec![
            ScreenAction::Quit,
            ScreenAction::Batch(vec![ScreenAction::ClearMessages, ScreenAction::None]),
        ]);
        assert_eq!(
            action.flatten(),
            vec![ScreenAction::Quit, ScreenAction::ClearMessages]
        );
    }
}
