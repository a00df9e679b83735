//! Entity table component for displaying a resource collection

use std::cmp::Reverse;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    console::{
        traits::Navigable,
        ui::{fit_width, Styles},
    },
    models::Id,
    schema::Column,
};

/// One rendered row: the entity id and one string per column
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: Id,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Table of entities laid out by declarative columns.
///
/// Column widths are percentages of the inner width. An empty table shows a
/// single placeholder row and has no selection. Rows keep the backend order
/// until the id sort is toggled; the first column is taken to be the id.
pub struct EntityTable {
    columns: &'static [Column],
    rows: Vec<TableRow>,
    placeholder: String,
    sort: Option<SortOrder>,
    pub state: ListState,
}

impl EntityTable {
    pub fn new(columns: &'static [Column], placeholder: impl Into<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            placeholder: placeholder.into(),
            sort: None,
            state: ListState::default(),
        }
    }

    /// Replace all rows and reset the selection
    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        self.apply_sort();
        self.state.select(if self.rows.is_empty() { None } else { Some(0) });
    }

    /// Sort by id, ascending first and then flipping on every call.
    /// The selected entity stays selected.
    pub fn toggle_sort(&mut self) {
        let selected = self.selected_id();
        self.sort = Some(match self.sort {
            Some(SortOrder::Ascending) => SortOrder::Descending,
            _ => SortOrder::Ascending,
        });
        self.apply_sort();
        if let Some(i) = selected.and_then(|id| self.rows.iter().position(|row| row.id == id)) {
            self.state.select(Some(i));
        }
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort
    }

    fn apply_sort(&mut self) {
        match self.sort {
            Some(SortOrder::Ascending) => self.rows.sort_by_key(|row| row.id),
            Some(SortOrder::Descending) => self.rows.sort_by_key(|row| Reverse(row.id)),
            None => {}
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn selected_id(&self) -> Option<Id> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id)
    }

    fn column_widths(&self, inner_width: u16) -> Vec<usize> {
        let separators = self.columns.len().saturating_sub(1);
        let usable = (inner_width as usize).saturating_sub(separators);
        self.columns
            .iter()
            .map(|column| usable * column.width as usize / 100)
            .collect()
    }

    fn line(&self, cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
        let mut spans = Vec::with_capacity(cells.len() * 2);
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", style));
            }
            spans.push(Span::styled(fit_width(cell, *width), style));
        }
        Line::from(spans)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str) {
        let widths = self.column_widths(area.width.saturating_sub(2));

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| match (i, self.sort) {
                (0, Some(SortOrder::Ascending)) => format!("{} ▲", column.title),
                (0, Some(SortOrder::Descending)) => format!("{} ▼", column.title),
                _ => column.title.to_string(),
            })
            .collect();
        let header = self.line(&header, &widths, Styles::title());

        let items: Vec<ListItem> = if self.rows.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                self.placeholder.clone(),
                Styles::inactive(),
            )))]
        } else {
            self.rows
                .iter()
                .map(|row| ListItem::new(self.line(&row.cells, &widths, Style::default())))
                .collect()
        };

        let block = Block::default()
            .title(format!("{} ({})", title, self.rows.len()))
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        f.render_widget(Paragraph::new(header), Rect { height: 1, ..inner });
        let body = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let list = List::new(items).highlight_style(Styles::selected());
        f.render_stateful_widget(list, body, &mut self.state);
    }
}

impl Navigable for EntityTable {
    fn navigate_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn navigate_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.rows.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    const COLUMNS: &[Column] = &[Column::new("ID", 20), Column::new("Name", 80)];

    fn row(id: Id, name: &str) -> TableRow {
        TableRow {
            id,
            cells: vec![id.to_string(), name.to_string()],
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_selection_follows_rows() {
        let mut table = EntityTable::new(COLUMNS, "No tags found.");
        assert_eq!(table.selected_id(), None);

        table.set_rows(vec![row(4, "rust"), row(9, "tokio")]);
        assert_eq!(table.selected_id(), Some(4));
        table.navigate_down();
        assert_eq!(table.selected_id(), Some(9));
        table.navigate_down();
        assert_eq!(table.selected_id(), Some(4));

        table.set_rows(Vec::new());
        assert_eq!(table.selected_id(), None);
        table.navigate_down();
        assert_eq!(table.selected_id(), None);
    }

    #[test]
    fn test_sort_toggle_keeps_selection() {
        let mut table = EntityTable::new(COLUMNS, "No tags found.");
        table.set_rows(vec![row(9, "tokio"), row(4, "rust"), row(12, "serde")]);
        assert_eq!(table.sort_order(), None);
        assert_eq!(table.selected_id(), Some(9));

        table.toggle_sort();
        assert_eq!(table.sort_order(), Some(SortOrder::Ascending));
        let ids: Vec<Id> = table.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![4, 9, 12]);
        assert_eq!(table.selected_id(), Some(9));

        table.toggle_sort();
        let ids: Vec<Id> = table.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![12, 9, 4]);
        assert_eq!(table.get_selected_index(), Some(1));

        // A refetch keeps the chosen order
        table.set_rows(vec![row(1, "axum"), row(30, "clap")]);
        assert_eq!(table.selected_id(), Some(30));

        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|f| table.render(f, f.size(), "Tags")).unwrap();
        assert!(screen_text(&terminal).contains("ID ▼"));
    }

    #[test]
    fn test_render_header_rows_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut table = EntityTable::new(COLUMNS, "No tags found.");
        table.set_rows(vec![row(4, "rust")]);
        terminal.draw(|f| table.render(f, f.size(), "Tags")).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Tags (1)"));
        assert!(text.contains("Name"));
        assert!(text.contains("rust"));

        table.set_rows(Vec::new());
        terminal.draw(|f| table.render(f, f.size(), "Tags")).unwrap();
        assert!(screen_text(&terminal).contains("No tags found."));
    }
}
