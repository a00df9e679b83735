//! Home screen: entry point to every section of the console

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::{
    components::{Menu, MenuEntry},
    handlers,
    routes::Route,
    traits::{Screen, ScreenAction},
    ui::Styles,
};
use crate::models::Resource;

pub struct MainMenuScreen {
    menu: Menu,
}

fn section(label: &'static str, shortcut: char, resource: Resource) -> MenuEntry {
    MenuEntry::new(label, shortcut, ScreenAction::NavigateTo(Route::List(resource)))
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let entries = vec![
            section("Posts", '1', Resource::Posts).with_description("Write and schedule posts"),
            section("Campaigns", '2', Resource::Campaigns)
                .with_description("Group posts into campaigns"),
            section("Platforms", '3', Resource::Platforms)
                .with_description("Channels posts are published to"),
            section("Tags", '4', Resource::Tags).with_description("Labels attached to posts"),
            section("Learning Topics", '5', Resource::Topics)
                .with_description("Browse topics and their chapters"),
            section("Post Types", '6', Resource::PostTypes)
                .with_description("Kinds of post the backend accepts"),
            section("Post Statuses", '7', Resource::PostStatuses)
                .with_description("Workflow states in publishing order"),
            MenuEntry::new("Quit", 'q', ScreenAction::Quit).with_description("Leave contentdesk"),
        ];
        Self {
            menu: Menu::new("Main Menu", entries),
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "contentdesk",
                Styles::title().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Content backend administration", Styles::info())),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let description = self
            .menu
            .selected()
            .map(|entry| entry.description)
            .unwrap_or_default();

        let instructions = vec![
            Line::from(Span::styled(description, Styles::info())),
            Line::from(vec![
                Span::styled("Navigation: ", Styles::info()),
                Span::raw("↑/↓ to move, "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to open, "),
                Span::styled("1-7", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" for direct access"),
            ]),
            Line::from(vec![
                Span::styled("Global: ", Styles::info()),
                Span::styled("F1/?", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" for help, "),
                Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to quit"),
            ]),
        ];

        let paragraph = Paragraph::new(instructions).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(paragraph, area);
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.menu.render(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if handlers::move_selection(&mut self.menu, key) {
            return ScreenAction::None;
        }
        self.menu.action_for(key).unwrap_or(ScreenAction::None)
    }

    fn route(&self) -> Route {
        Route::Home
    }

    fn help(&self) -> &'static str {
        "Main menu\n\
         ↑/↓ or j/k   Move selection\n\
         Enter        Open the selected section\n\
         1-7          Jump to a section\n\
         q            Quit"
    }
}
