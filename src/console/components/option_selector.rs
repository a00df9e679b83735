//! Form field whose options come from another resource

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::warn;

use crate::{
    api::{client::decode, ApiRequest},
    console::{
        events::{ApiResponse, Ticket},
        remote::RemoteState,
        traits::ScreenAction,
        ui::Styles,
    },
    models::{OptionItem, Resource},
};

/// One entry of the option list as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    /// Id string written to the draft; `None` for placeholder and status entries
    pub value: Option<String>,
}

/// Foreign key selector.
///
/// Fetches the option list of `resource` once per activation. The chosen id
/// is handed back to the owning form as a string; the selector itself never
/// submits anything.
#[derive(Debug, Clone)]
pub struct OptionSelector {
    pub key: &'static str,
    pub label: &'static str,
    pub resource: Resource,
    pub is_focused: bool,
    state: RemoteState<Vec<OptionItem>>,
    value: String,
}

impl OptionSelector {
    pub fn new(key: &'static str, label: &'static str, resource: Resource) -> Self {
        Self {
            key,
            label,
            resource,
            is_focused: false,
            state: RemoteState::Idle,
            value: String::new(),
        }
    }

    /// Start loading the option list
    pub fn request(&mut self) -> ScreenAction {
        self.state.begin();
        ScreenAction::request(Ticket::Options(self.key), ApiRequest::list(self.resource))
    }

    pub fn on_response(&mut self, outcome: ApiResponse) {
        let request = ApiRequest::list(self.resource);
        let decoded = outcome.and_then(|value| decode::<Vec<OptionItem>>(&request, value));
        let outcome = decoded.map_err(|e| {
            warn!("Failed to load options for {}: {}", self.key, e);
            format!("Failed to load {}.", self.label.to_lowercase())
        });
        self.state.resolve(outcome);
    }

    pub fn state(&self) -> &RemoteState<Vec<OptionItem>> {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.ready().is_some()
    }

    /// Bind the current draft value
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn placeholder(&self) -> String {
        format!("Select a {}", self.label.to_lowercase())
    }

    /// Options as shown: a status entry while loading or failed, otherwise a
    /// placeholder followed by one entry per item
    pub fn options(&self) -> Vec<SelectOption> {
        match &self.state {
            RemoteState::Idle | RemoteState::Loading => vec![SelectOption {
                label: "Loading...".to_string(),
                value: None,
            }],
            RemoteState::Failed(message) => vec![SelectOption {
                label: message.clone(),
                value: None,
            }],
            RemoteState::Ready(items) => std::iter::once(SelectOption {
                label: self.placeholder(),
                value: None,
            })
            .chain(items.iter().map(|item| SelectOption {
                label: item.name.clone(),
                value: Some(item.id.to_string()),
            }))
            .collect(),
        }
    }

    /// Position of the bound value among the items
    fn position(&self) -> Option<usize> {
        self.state
            .ready()?
            .iter()
            .position(|item| item.id.to_string() == self.value)
    }

    /// Label of the bound value, or the placeholder/status text
    pub fn display_label(&self) -> String {
        match (&self.state, self.position()) {
            (RemoteState::Ready(items), Some(i)) => items[i].name.clone(),
            (RemoteState::Ready(_), None) => self.placeholder(),
            _ => self.options().remove(0).label,
        }
    }

    /// Choose the next item; returns the new draft value
    pub fn select_next(&mut self) -> Option<String> {
        let count = self.state.ready()?.len();
        if count == 0 {
            return None;
        }
        let next = match self.position() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.choose(next)
    }

    /// Choose the previous item; returns the new draft value
    pub fn select_previous(&mut self) -> Option<String> {
        let count = self.state.ready()?.len();
        if count == 0 {
            return None;
        }
        let previous = match self.position() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.choose(previous)
    }

    fn choose(&mut self, index: usize) -> Option<String> {
        let id = self.state.ready()?.get(index)?.id.to_string();
        self.value = id.clone();
        Some(id)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let text_style = if !self.is_enabled() {
            Styles::disabled()
        } else if self.position().is_none() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let hint = if self.is_enabled() { "◂ " } else { "  " };
        let line = Line::from(vec![
            Span::styled(hint, Styles::info()),
            Span::styled(self.display_label(), text_style),
            Span::styled(if self.is_enabled() { " ▸" } else { "" }, Styles::info()),
        ]);

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);
        f.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(items: serde_json::Value) -> OptionSelector {
        let mut selector = OptionSelector::new("campaign", "Campaign", Resource::Campaigns);
        selector.request();
        selector.on_response(Ok(items));
        selector
    }

    #[test]
    fn test_request_targets_resource() {
        let mut selector = OptionSelector::new("status", "Status", Resource::PostStatuses);
        let action = selector.request();
        assert_eq!(
            action,
            ScreenAction::request(Ticket::Options("status"), ApiRequest::list(Resource::PostStatuses))
        );
        assert!(!selector.is_enabled());
        assert_eq!(selector.options()[0].label, "Loading...");
        assert_eq!(selector.options().len(), 1);
    }

    #[test]
    fn test_ready_has_placeholder_plus_items() {
        let selector = loaded(json!([
            {"id": 1, "name": "Fall Sale"},
            {"id": 2, "name": "Spring"},
            {"id": 3, "name": "Launch"}
        ]));
        let options = selector.options();
        assert!(selector.is_enabled());
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, "Select a campaign");
        assert_eq!(options[0].value, None);
        assert_eq!(options[2].value.as_deref(), Some("2"));
    }

    #[test]
    fn test_failure_disables_selector() {
        let mut selector = OptionSelector::new("post_type", "Post Type", Resource::PostTypes);
        selector.request();
        selector.on_response(Err(crate::api::ApiError::Status {
            status: 500,
            path: "GET api/content/post-types/".to_string(),
            body: String::new(),
        }));
        assert!(!selector.is_enabled());
        assert_eq!(selector.options().len(), 1);
        assert_eq!(selector.display_label(), "Failed to load post type.");
        assert_eq!(selector.select_next(), None);
    }

    #[test]
    fn test_choosing_returns_id_string() {
        let mut selector = loaded(json!([{"id": 7, "name": "A"}, {"id": 9, "name": "B"}]));
        assert_eq!(selector.display_label(), "Select a campaign");
        assert_eq!(selector.select_next().as_deref(), Some("7"));
        assert_eq!(selector.select_next().as_deref(), Some("9"));
        assert_eq!(selector.select_next().as_deref(), Some("7"));
        assert_eq!(selector.select_previous().as_deref(), Some("9"));
        assert_eq!(selector.display_label(), "B");

        selector.set_value("7");
        assert_eq!(selector.display_label(), "A");
    }
}
