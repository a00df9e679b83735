//! Selectable menu whose entries carry their own action

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::console::{
    traits::{Navigable, ScreenAction},
    ui::Styles,
};

#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub label: &'static str,
    pub shortcut: char,
    pub description: &'static str,
    pub action: ScreenAction,
}

impl MenuEntry {
    pub fn new(label: &'static str, shortcut: char, action: ScreenAction) -> Self {
        Self {
            label,
            shortcut,
            description: "",
            action,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

pub struct Menu {
    title: &'static str,
    entries: Vec<MenuEntry>,
    state: ListState,
}

impl Menu {
    pub fn new(title: &'static str, entries: Vec<MenuEntry>) -> Self {
        let mut state = ListState::default();
        state.select((!entries.is_empty()).then_some(0));
        Self {
            title,
            entries,
            state,
        }
    }

    pub fn selected(&self) -> Option<&MenuEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Action triggered by `key`: `Enter` runs the selection, a shortcut
    /// (case-insensitive) selects its entry and runs it.
    pub fn action_for(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Enter => self.selected().map(|entry| entry.action.clone()),
            KeyCode::Char(c) => {
                let i = self
                    .entries
                    .iter()
                    .position(|entry| entry.shortcut.eq_ignore_ascii_case(&c))?;
                self.state.select(Some(i));
                Some(self.entries[i].action.clone())
            }
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let selected = self.state.selected();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if Some(i) == selected {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", entry.shortcut), Styles::info()),
                    Span::styled(entry.label, style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());
        f.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Selection wraps at both ends
impl Navigable for Menu {
    fn navigate_up(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn navigate_down(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 1) % count);
        self.state.select(Some(i));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.entries.len()
    }
}
