//! Generic list screen for any backend resource

use std::marker::PhantomData;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{error, info, warn};

use crate::{
    api::{client::decode, ApiRequest},
    console::{
        components::{ConfirmDialog, EntityTable, TableRow},
        events::{ApiResponse, Ticket},
        handlers::{self, Confirmation},
        remote::RemoteState,
        routes::Route,
        traits::{Screen, ScreenAction},
        ui::Styles,
    },
    models::{capitalize, Id, Resource},
    schema::Entity,
};

/// Progress of a row deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    None,
    /// Dialog open, waiting for the user's answer
    Confirming(Id),
    /// DELETE in flight; further answers are ignored
    Deleting(Id),
}

/// What the body of the list currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    Message(String),
    Rows(Vec<Vec<String>>),
}

/// Table of every `E` the backend returns.
///
/// Editable resources get new/edit/delete; read-only ones only open their
/// detail route, if any.
pub struct ResourceListScreen<E: Entity> {
    state: RemoteState<()>,
    table: EntityTable,
    delete: DeleteState,
    _entity: PhantomData<E>,
}

impl<E: Entity> ResourceListScreen<E> {
    pub fn new() -> Self {
        Self {
            state: RemoteState::Idle,
            table: EntityTable::new(
                E::columns(),
                format!("No {} found.", E::RESOURCE.plural()),
            ),
            delete: DeleteState::None,
            _entity: PhantomData,
        }
    }

    fn resource() -> Resource {
        E::RESOURCE
    }

    fn fetch(&mut self) -> ScreenAction {
        self.state.begin();
        ScreenAction::request(Ticket::Collection, ApiRequest::list(Self::resource()))
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn selected_id(&self) -> Option<Id> {
        self.table.selected_id()
    }

    /// Body of the list as the user sees it
    pub fn view(&self) -> ListBody {
        match &self.state {
            RemoteState::Idle | RemoteState::Loading => {
                ListBody::Message(format!("Loading {}...", Self::resource().plural()))
            }
            RemoteState::Failed(message) => ListBody::Message(message.clone()),
            RemoteState::Ready(()) if self.table.rows().is_empty() => {
                ListBody::Rows(vec![vec![self.table.placeholder().to_string()]])
            }
            RemoteState::Ready(()) => ListBody::Rows(
                self.table
                    .rows()
                    .iter()
                    .map(|row| row.cells.clone())
                    .collect(),
            ),
        }
    }

    fn on_collection(&mut self, outcome: ApiResponse) {
        let request = ApiRequest::list(Self::resource());
        match outcome.and_then(|value| decode::<Vec<E>>(&request, value)) {
            Ok(items) => {
                if self.state.resolve(Ok(())) {
                    info!("Loaded {} {}", items.len(), Self::resource().plural());
                    self.table.set_rows(
                        items
                            .iter()
                            .map(|item| TableRow {
                                id: item.id(),
                                cells: item.cells(),
                            })
                            .collect(),
                    );
                }
            }
            Err(e) => {
                error!("Failed to fetch {}: {}", Self::resource().plural(), e);
                self.state
                    .resolve(Err(format!("Failed to fetch {}.", Self::resource().plural())));
            }
        }
    }

    fn on_deleted(&mut self, id: Id, outcome: ApiResponse) -> ScreenAction {
        if self.delete != DeleteState::Deleting(id) {
            return ScreenAction::None;
        }
        self.delete = DeleteState::None;

        let singular = Self::resource().singular();
        match outcome {
            Ok(_) => {
                info!("Deleted {} {}", singular, id);
                self.fetch()
            }
            Err(e) => {
                warn!("Failed to delete {} {}: {}", singular, id, e);
                ScreenAction::SetError(format!("Failed to delete the {}.", singular))
            }
        }
    }

    fn handle_confirmation(&mut self, id: Id, key: KeyEvent) -> ScreenAction {
        match handlers::confirmation(key) {
            Some(Confirmation::Accept) => {
                self.delete = DeleteState::Deleting(id);
                ScreenAction::request(Ticket::Delete(id), ApiRequest::delete(Self::resource(), id))
            }
            Some(Confirmation::Decline) => {
                self.delete = DeleteState::None;
                ScreenAction::None
            }
            None => ScreenAction::None,
        }
    }

    fn handle_row_key(&mut self, key: KeyEvent) -> ScreenAction {
        let resource = Self::resource();
        let selected = self.table.selected_id();

        if key.code == KeyCode::Char('s') {
            self.table.toggle_sort();
            return ScreenAction::None;
        }

        if resource.is_read_only() {
            return match (key.code, selected) {
                (KeyCode::Enter, Some(id)) => E::detail_route(id)
                    .map(ScreenAction::NavigateTo)
                    .unwrap_or(ScreenAction::None),
                _ => ScreenAction::None,
            };
        }

        match (key.code, selected) {
            (KeyCode::Char('n'), _) => ScreenAction::NavigateTo(Route::New(resource)),
            (KeyCode::Enter | KeyCode::Char('e'), Some(id)) => {
                ScreenAction::NavigateTo(Route::Edit(resource, id))
            }
            (KeyCode::Char('d') | KeyCode::Delete, Some(id)) => {
                self.delete = DeleteState::Confirming(id);
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn hint(&self) -> &'static str {
        if Self::resource().is_read_only() {
            "↑/↓ move  Enter open  s sort  Esc back"
        } else {
            "↑/↓ move  n new  e/Enter edit  d delete  s sort  Esc back"
        }
    }
}

impl<E: Entity> Default for ResourceListScreen<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Screen for ResourceListScreen<E> {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let resource = Self::resource();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(resource.title(), Styles::title()),
            Span::raw("  "),
            Span::styled(self.hint(), Styles::inactive()),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        match &self.state {
            RemoteState::Ready(()) => {
                self.table
                    .render(f, chunks[1], &capitalize(resource.plural()));
            }
            RemoteState::Failed(message) => {
                let paragraph = Paragraph::new(message.clone())
                    .style(Styles::error())
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(paragraph, chunks[1]);
            }
            RemoteState::Idle | RemoteState::Loading => {
                let paragraph = Paragraph::new(format!("Loading {}...", resource.plural()))
                    .style(Styles::info())
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(paragraph, chunks[1]);
            }
        }

        let message = format!(
            "Are you sure you want to delete this {}?",
            resource.singular()
        );
        match self.delete {
            DeleteState::Confirming(_) => ConfirmDialog::new(&message, false).render(f, area),
            DeleteState::Deleting(_) => ConfirmDialog::new(&message, true).render(f, area),
            DeleteState::None => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match self.delete {
            DeleteState::Confirming(id) => return self.handle_confirmation(id, key),
            DeleteState::Deleting(_) => return ScreenAction::None,
            DeleteState::None => {}
        }

        if key.code == KeyCode::Esc {
            return ScreenAction::NavigateBack;
        }

        if self.state.ready().is_some() {
            if handlers::move_selection(&mut self.table, key) {
                return ScreenAction::None;
            }
            return self.handle_row_key(key);
        }

        // A failed fetch still allows creating a new entry
        let resource = Self::resource();
        if self.state.is_failed() && key.code == KeyCode::Char('n') && !resource.is_read_only() {
            return ScreenAction::NavigateTo(Route::New(resource));
        }
        ScreenAction::None
    }

    fn route(&self) -> Route {
        Route::List(Self::resource())
    }

    fn on_enter(&mut self) -> ScreenAction {
        self.delete = DeleteState::None;
        self.fetch()
    }

    fn on_response(&mut self, ticket: Ticket, outcome: ApiResponse) -> ScreenAction {
        match ticket {
            Ticket::Collection => {
                self.on_collection(outcome);
                ScreenAction::None
            }
            Ticket::Delete(id) => self.on_deleted(id, outcome),
            _ => ScreenAction::None,
        }
    }

    fn help(&self) -> &'static str {
        if Self::resource().is_read_only() {
            "Read-only list\n\
             ↑/↓ or j/k   Move selection\n\
             Enter        Open details\n\
             s            Sort by id, ascending or descending\n\
             Esc          Back to the main menu"
        } else {
            "Resource list\n\
             ↑/↓ or j/k   Move selection\n\
             n            New entry\n\
             e / Enter    Edit selected entry\n\
             d / Del      Delete selected entry (asks first)\n\
             y / n        Confirm or cancel a delete\n\
             s            Sort by id, ascending or descending\n\
             Esc          Back to the main menu"
        }
    }
}
