//! Main console application state and event loop

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::api::ContentBackend;
use crate::config::Config;
use crate::console::{
    components::StatusDisplay,
    events::{ActivationId, AppEvent},
    operations::RequestDispatcher,
    routes::Route,
    traits::{Screen, ScreenAction},
    ui::{centered_rect, Styles},
};

const GLOBAL_HELP: &str = "Global shortcuts\n\
    Esc          Go back\n\
    q            Quit (outside text fields)\n\
    Ctrl+C       Quit\n\
    F1 / ?       Toggle this help\n\n";

/// Main console application state
pub struct App {
    config: Config,
    dispatcher: RequestDispatcher,
    rx: UnboundedReceiver<AppEvent>,
    screen: Box<dyn Screen>,
    status: StatusDisplay,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    /// Create the console on the home screen
    pub fn new(config: Config, backend: Arc<dyn ContentBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let status = StatusDisplay::new().with_auto_clear(config.notification_timeout());

        let mut app = Self {
            config,
            dispatcher: RequestDispatcher::new(backend, tx),
            rx,
            screen: Route::Home.build_screen(),
            status,
            should_quit: false,
            show_help_popup: false,
        };
        app.navigate_to(Route::Home);
        app
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick = self.config.tick();
        loop {
            self.drain_events();
            self.status.expire();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                info!("Quitting");
                break;
            }
        }

        self.dispatcher.cancel_all();
        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let typing = self.screen.captures_text();
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Char('?') if !typing => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            _ => {}
        }

        if self.show_help_popup {
            if key.code == KeyCode::Esc {
                self.show_help_popup = false;
            }
            return;
        }

        if key.code == KeyCode::Char('q') && !typing {
            self.should_quit = true;
            return;
        }

        let action = self.screen.handle_key_event(key);
        self.apply(action);
    }

    /// Execute an action returned by the current screen
    pub fn apply(&mut self, action: ScreenAction) {
        for action in action.flatten() {
            match action {
                ScreenAction::NavigateTo(route) => self.navigate_to(route),
                ScreenAction::NavigateBack => {
                    if let Some(parent) = self.screen.route().parent() {
                        self.navigate_to(parent);
                    }
                }
                ScreenAction::Quit => self.should_quit = true,
                ScreenAction::SetStatus(message) => self.status.set_success(message),
                ScreenAction::SetError(message) => self.status.set_error(message),
                ScreenAction::ClearMessages => self.status.clear(),
                ScreenAction::Request { ticket, request } => {
                    self.dispatcher.dispatch(ticket, request)
                }
                ScreenAction::RequestAll { ticket, requests } => {
                    self.dispatcher.dispatch_all(ticket, requests)
                }
                ScreenAction::Batch(_) | ScreenAction::None => {}
            }
        }
    }

    /// Replace the current screen with a fresh activation of `route`
    pub fn navigate_to(&mut self, route: Route) {
        let activation = self.dispatcher.begin_activation();
        info!("Navigating to {} (activation {})", route.label(), activation);
        self.screen = route.build_screen();
        let action = self.screen.on_enter();
        self.apply(action);
    }

    /// Deliver an asynchronous event to the current screen
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Response {
                activation,
                ticket,
                outcome,
            } => {
                if !self.dispatcher.is_current(activation) {
                    debug!("Dropping response {:?} of retired activation {}", ticket, activation);
                    return;
                }
                let action = self.screen.on_response(ticket, outcome);
                self.apply(action);
            }
        }
    }

    /// Handle every event already waiting in the channel
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    /// Wait for the next asynchronous event
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn current_route(&self) -> Route {
        self.screen.route()
    }

    pub fn activation(&self) -> ActivationId {
        self.dispatcher.current()
    }

    /// Requests of the current activation still in flight
    pub fn pending_requests(&self) -> usize {
        self.dispatcher.pending()
    }

    pub fn status(&self) -> &StatusDisplay {
        &self.status
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.screen.draw(f, chunks[0]);
        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let title = format!("contentdesk - {}", self.current_route().label());
        self.status
            .render(f, area, &title, "Esc: Back | q: Quit | F1/?: Help");
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help = Paragraph::new(format!("{}{}", GLOBAL_HELP, self.screen.help()))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::warning()),
            );
        f.render_widget(help, popup_area);
    }
}
