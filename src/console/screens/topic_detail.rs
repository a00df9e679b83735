//! Topic detail: metadata and chapters, fetched together

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    api::{client::decode, ApiError, ApiRequest},
    console::{
        events::{ApiResponse, Ticket},
        handlers,
        remote::RemoteState,
        routes::Route,
        traits::{Screen, ScreenAction, Scrollable},
        ui::Styles,
    },
    models::{Chapter, Id, Resource, Topic},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TopicDetail {
    pub topic: Topic,
    pub chapters: Vec<Chapter>,
}

pub struct TopicDetailScreen {
    id: Id,
    state: RemoteState<TopicDetail>,
    scroll_offset: usize,
}

impl TopicDetailScreen {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            state: RemoteState::Idle,
            scroll_offset: 0,
        }
    }

    fn requests(&self) -> [ApiRequest; 2] {
        [
            ApiRequest::get(Resource::Topics, self.id),
            ApiRequest::list_filtered(Resource::Chapters, "topic", self.id),
        ]
    }

    pub fn state(&self) -> &RemoteState<TopicDetail> {
        &self.state
    }

    /// Split the joined response back into topic and chapters
    fn decode_joined(&self, outcome: ApiResponse) -> Result<TopicDetail, ApiError> {
        let [topic_request, chapters_request] = self.requests();
        let (topic, chapters) = match outcome? {
            Value::Array(mut parts) if parts.len() == 2 => {
                let chapters = parts.pop().unwrap_or_default();
                let topic = parts.pop().unwrap_or_default();
                (topic, chapters)
            }
            other => (other, Value::Null),
        };
        Ok(TopicDetail {
            topic: decode(&topic_request, topic)?,
            chapters: decode(&chapters_request, chapters)?,
        })
    }

    /// Text lines of the body, also used for scrolling bounds
    pub fn lines(&self) -> Vec<Line<'static>> {
        match &self.state {
            RemoteState::Idle | RemoteState::Loading => {
                vec![Line::from(Span::styled("Loading topic details...", Styles::info()))]
            }
            RemoteState::Failed(message) => {
                vec![Line::from(Span::styled(message.clone(), Styles::error()))]
            }
            RemoteState::Ready(detail) => {
                let mut lines = vec![
                    Line::from(Span::styled(detail.topic.title.clone(), Styles::title())),
                    Line::from(detail.topic.description.clone().unwrap_or_default()),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Chapters ({})", detail.chapters.len()),
                        Styles::info(),
                    )),
                ];
                if detail.chapters.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "No chapters found for this topic.",
                        Styles::inactive(),
                    )));
                }
                for (i, chapter) in detail.chapters.iter().enumerate() {
                    lines.push(Line::from(format!("{}. {}", i + 1, chapter.title)));
                    if let Some(content) = chapter.content.as_deref().filter(|c| !c.is_empty()) {
                        lines.push(Line::from(Span::styled(
                            format!("   {}", content),
                            Styles::inactive(),
                        )));
                    }
                }
                lines
            }
        }
    }
}

impl Scrollable for TopicDetailScreen {
    fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    fn scroll_down(&mut self, amount: usize) {
        let max_scroll = self.calculate_max_scroll();
        self.scroll_offset = std::cmp::min(self.scroll_offset + amount, max_scroll);
    }

    fn get_scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = std::cmp::min(offset, self.calculate_max_scroll());
    }

    fn calculate_max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(1)
    }
}

impl Screen for TopicDetailScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(format!("Topic #{}", self.id), Styles::title()),
            Span::raw("  "),
            Span::styled("↑/↓ scroll  Esc back", Styles::inactive()),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let body = Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, chunks[1]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if key.code == KeyCode::Esc {
            return ScreenAction::NavigateBack;
        }
        handlers::scroll(self, key);
        ScreenAction::None
    }

    fn route(&self) -> Route {
        Route::Topic(self.id)
    }

    fn on_enter(&mut self) -> ScreenAction {
        self.state.begin();
        self.scroll_offset = 0;
        ScreenAction::RequestAll {
            ticket: Ticket::TopicDetail,
            requests: self.requests().to_vec(),
        }
    }

    fn on_response(&mut self, ticket: Ticket, outcome: ApiResponse) -> ScreenAction {
        if ticket != Ticket::TopicDetail {
            return ScreenAction::None;
        }
        match self.decode_joined(outcome) {
            Ok(detail) => {
                info!(
                    "Loaded topic {} with {} chapters",
                    self.id,
                    detail.chapters.len()
                );
                self.state.resolve(Ok(detail));
            }
            Err(e) => {
                error!("Failed to fetch topic {}: {}", self.id, e);
                self.state
                    .resolve(Err("Failed to fetch topic details.".to_string()));
            }
        }
        ScreenAction::None
    }

    fn help(&self) -> &'static str {
        "Topic detail\n\
         ↑/↓ PgUp/PgDn   Scroll\n\
         Home/End        Jump to top or bottom\n\
         Esc             Back to the topic list"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entered() -> TopicDetailScreen {
        let mut screen = TopicDetailScreen::new(3);
        screen.on_enter();
        screen
    }

    fn text(screen: &TopicDetailScreen) -> String {
        screen
            .lines()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_requests_are_issued_together() {
        let mut screen = TopicDetailScreen::new(3);
        assert_eq!(
            screen.on_enter(),
            ScreenAction::RequestAll {
                ticket: Ticket::TopicDetail,
                requests: vec![
                    ApiRequest::get(Resource::Topics, 3),
                    ApiRequest::list_filtered(Resource::Chapters, "topic", 3),
                ],
            }
        );
        assert_eq!(text(&screen), "Loading topic details...");
    }

    #[test]
    fn test_joined_response_renders_chapters() {
        let mut screen = entered();
        screen.on_response(
            Ticket::TopicDetail,
            Ok(json!([
                {"id": 3, "title": "Rust", "description": "Systems programming"},
                [
                    {"id": 1, "title": "Ownership", "content": "Moves and borrows", "topic": 3},
                    {"id": 2, "title": "Traits", "content": "", "topic": 3}
                ]
            ])),
        );
        let detail = screen.state().ready().unwrap();
        assert_eq!(detail.chapters.len(), 2);
        let text = text(&screen);
        assert!(text.contains("Rust"));
        assert!(text.contains("1. Ownership"));
        assert!(text.contains("2. Traits"));
    }

    #[test]
    fn test_no_chapters_message() {
        let mut screen = entered();
        screen.on_response(
            Ticket::TopicDetail,
            Ok(json!([{"id": 3, "name": "Rust", "description": null}, []])),
        );
        assert!(text(&screen).contains("No chapters found for this topic."));
    }

    #[test]
    fn test_any_failure_collapses_page() {
        let mut screen = entered();
        screen.on_response(
            Ticket::TopicDetail,
            Err(ApiError::Status {
                status: 404,
                path: "GET api/learning/topics/3/".to_string(),
                body: String::new(),
            }),
        );
        assert_eq!(text(&screen), "Failed to fetch topic details.");

        let mut screen = entered();
        screen.on_response(Ticket::TopicDetail, Ok(json!([{"id": 3}, []])));
        assert_eq!(text(&screen), "Failed to fetch topic details.");
    }

    #[test]
    fn test_scrolling_is_bounded() {
        let mut screen = entered();
        screen.on_response(
            Ticket::TopicDetail,
            Ok(json!([{"id": 3, "title": "Rust"}, [{"id": 1, "title": "A", "topic": 3}]])),
        );
        let max = screen.calculate_max_scroll();
        screen.scroll_down(100);
        assert_eq!(screen.get_scroll_offset(), max);
        screen.scroll_to_top();
        assert_eq!(screen.get_scroll_offset(), 0);
        assert_eq!(
            screen.handle_key_event(KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE)),
            ScreenAction::NavigateBack
        );
    }
}
