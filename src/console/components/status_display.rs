//! Status display component for transient notifications

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: Local::now(),
        }
    }

    fn prefix(&self) -> &'static str {
        match self.status_type {
            StatusType::Success => "✓",
            StatusType::Error => "✗",
        }
    }
}

/// Notification area of the status bar
#[derive(Debug, Default)]
pub struct StatusDisplay {
    current_message: Option<StatusMessage>,
    auto_clear_timeout: Option<Duration>,
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_clear(mut self, timeout: Duration) -> Self {
        self.auto_clear_timeout = Some(timeout);
        self
    }

    pub fn set_message(&mut self, message: StatusMessage) {
        self.current_message = Some(message);
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn clear(&mut self) {
        self.current_message = None;
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Whether the current message has outlived the auto-clear timeout
    pub fn should_auto_clear(&self) -> bool {
        if let (Some(timeout), Some(message)) = (self.auto_clear_timeout, &self.current_message) {
            let elapsed = Local::now().signed_duration_since(message.timestamp);
            return elapsed.to_std().unwrap_or_default() > timeout;
        }
        false
    }

    /// Drop the current message once it has expired
    pub fn expire(&mut self) {
        if self.should_auto_clear() {
            self.clear();
        }
    }

    /// Render the notification followed by `hint` (key reminders)
    pub fn render(&self, f: &mut Frame, area: Rect, title: &str, hint: &str) {
        let mut spans = Vec::new();
        if let Some(message) = &self.current_message {
            let style = match message.status_type {
                StatusType::Success => Styles::success(),
                StatusType::Error => Styles::error(),
            };
            spans.push(Span::styled(
                format!("{} {}", message.prefix(), message.message),
                style,
            ));
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(hint.to_string(), Styles::inactive()));

        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_replace_each_other() {
        let mut status = StatusDisplay::new();
        assert!(status.get_current().is_none());
        status.set_success("Tag created successfully!".to_string());
        status.set_error("Failed to delete the tag.".to_string());
        let current = status.get_current().unwrap();
        assert_eq!(current.status_type, StatusType::Error);
        assert_eq!(current.message, "Failed to delete the tag.");
    }

    #[test]
    fn test_auto_clear() {
        let mut status = StatusDisplay::new().with_auto_clear(Duration::from_secs(60));
        status.set_success("hello".to_string());
        status.expire();
        assert!(status.get_current().is_some());

        let mut status = StatusDisplay::new().with_auto_clear(Duration::ZERO);
        let mut message = StatusMessage::new("old".to_string(), StatusType::Error);
        message.timestamp = Local::now() - chrono::Duration::seconds(5);
        status.set_message(message);
        status.expire();
        assert!(status.get_current().is_none());
    }

    #[test]
    fn test_no_timeout_never_clears() {
        let mut status = StatusDisplay::new();
        status.set_error("sticky".to_string());
        assert!(!status.should_auto_clear());
    }
}
