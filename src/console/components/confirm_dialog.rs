//! Yes/no confirmation popup

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::console::ui::{centered_rect, Styles};

pub struct ConfirmDialog<'a> {
    pub message: &'a str,
    /// The confirmed operation is in flight; answers are no longer accepted
    pub busy: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: &'a str, busy: bool) -> Self {
        Self { message, busy }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 30, area);

        let answer = if self.busy {
            Line::from(Span::styled("Deleting...", Styles::warning()))
        } else {
            Line::from(vec![
                Span::styled("[y]", Styles::title()),
                Span::raw(" Yes   "),
                Span::styled("[n]", Styles::title()),
                Span::raw(" No"),
            ])
        };

        let text = vec![Line::from(self.message.to_string()), Line::from(""), answer];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Confirm")
                    .borders(Borders::ALL)
                    .border_style(Styles::error()),
            );

        f.render_widget(Clear, popup);
        f.render_widget(paragraph, popup);
    }
}
