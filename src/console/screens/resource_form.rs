//! Generic create/edit form for editable resources

use std::marker::PhantomData;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    api::{client::decode, ApiRequest},
    console::{
        components::{FormField, OptionSelector},
        events::{ApiResponse, Ticket},
        handlers,
        remote::{RemoteState, SubmitState},
        routes::Route,
        traits::{FormHandler, Screen, ScreenAction},
        ui::Styles,
    },
    models::{capitalize, Id, Resource},
    schema::{Draft, EditableEntity, FieldKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

/// One focusable input of the form
pub enum Control {
    Input(FormField),
    Select(OptionSelector),
}

impl Control {
    fn key(&self) -> &'static str {
        match self {
            Control::Input(field) => field.key,
            Control::Select(selector) => selector.key,
        }
    }

    fn set_focus(&mut self, focused: bool) {
        match self {
            Control::Input(field) => field.is_focused = focused,
            Control::Select(selector) => selector.is_focused = focused,
        }
    }

    fn height(&self) -> u16 {
        match self {
            Control::Input(field) => field.height(),
            Control::Select(_) => 3,
        }
    }

    fn sync(&mut self, draft: &Draft) {
        match self {
            Control::Input(field) => field.set_value(draft.get(field.key)),
            Control::Select(selector) => selector.set_value(draft.get(selector.key)),
        }
    }
}

/// Create or edit one `E`.
///
/// Edit mode fetches the entity first and stays unusable if that fails.
/// Focus cycles through the controls and then the submit button.
pub struct ResourceFormScreen<E: EditableEntity> {
    mode: FormMode,
    load: RemoteState<()>,
    draft: Draft,
    controls: Vec<Control>,
    focus: usize,
    submit: SubmitState,
    inline_error: Option<String>,
    _entity: PhantomData<E>,
}

impl<E: EditableEntity> ResourceFormScreen<E> {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: Id) -> Self {
        Self::with_mode(FormMode::Edit(id))
    }

    fn with_mode(mode: FormMode) -> Self {
        let controls = E::fields()
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::Text => Control::Input(FormField::new(spec.key, spec.label, false)),
                FieldKind::TextArea => Control::Input(FormField::new(spec.key, spec.label, true)),
                FieldKind::Select(resource) => {
                    Control::Select(OptionSelector::new(spec.key, spec.label, resource))
                }
            })
            .collect();

        let mut screen = Self {
            mode,
            load: RemoteState::Idle,
            draft: Draft::for_fields(E::fields()),
            controls,
            focus: 0,
            submit: SubmitState::Idle,
            inline_error: None,
            _entity: PhantomData,
        };
        screen.update_focus();
        screen
    }

    fn resource() -> Resource {
        E::RESOURCE
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selector(&self, key: &str) -> Option<&OptionSelector> {
        self.controls.iter().find_map(|control| match control {
            Control::Select(selector) if selector.key == key => Some(selector),
            _ => None,
        })
    }

    /// Fields accept input and the form can be submitted
    pub fn is_interactive(&self) -> bool {
        self.load.ready().is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.submit.is_busy()
    }

    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// Message shown instead of the form while it is not interactive
    pub fn status_message(&self) -> Option<String> {
        match &self.load {
            RemoteState::Idle | RemoteState::Loading => Some("Loading...".to_string()),
            RemoteState::Failed(message) => Some(message.clone()),
            RemoteState::Ready(()) => None,
        }
    }

    pub fn submit_label(&self) -> String {
        let singular = capitalize(Self::resource().singular());
        match (self.mode, self.submit.is_busy()) {
            (FormMode::Create, true) => "Creating...".to_string(),
            (FormMode::Edit(_), true) => "Updating...".to_string(),
            (FormMode::Create, false) => format!("Create {}", singular),
            (FormMode::Edit(_), false) => format!("Update {}", singular),
        }
    }

    /// Overwrite one draft value, as typing or choosing an option would
    pub fn set_value(&mut self, key: &str, value: &str) {
        self.draft.set(key, value);
        let draft = &self.draft;
        for control in self.controls.iter_mut().filter(|c| c.key() == key) {
            control.sync(draft);
        }
    }

    fn on_submit_focus(&self) -> bool {
        self.focus == self.controls.len()
    }

    fn update_focus(&mut self) {
        let focus = self.focus;
        for (i, control) in self.controls.iter_mut().enumerate() {
            control.set_focus(i == focus);
        }
    }

    fn focused_input(&mut self) -> Option<&mut FormField> {
        match self.controls.get_mut(self.focus) {
            Some(Control::Input(field)) => Some(field),
            _ => None,
        }
    }

    /// Copy the focused text input back into the draft
    fn store_focused_input(&mut self) {
        if let Some(Control::Input(field)) = self.controls.get(self.focus) {
            self.draft.set(field.key, field.value.clone());
        }
    }

    fn verb(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "create",
            FormMode::Edit(_) => "update",
        }
    }

    /// Validate the draft and send it
    pub fn submit(&mut self) -> ScreenAction {
        if !self.is_interactive() || self.submit.is_busy() {
            return ScreenAction::None;
        }

        if let Err(e) = self.draft.check_required(E::fields()) {
            self.inline_error = Some(e.to_string());
            return ScreenAction::None;
        }
        let body = match E::payload(&self.draft) {
            Ok(body) => body,
            Err(e) => {
                self.inline_error = Some(e.to_string());
                return ScreenAction::None;
            }
        };

        self.inline_error = None;
        self.submit.try_begin();
        let request = match self.mode {
            FormMode::Create => ApiRequest::create(Self::resource(), body),
            FormMode::Edit(id) => ApiRequest::update(Self::resource(), id, with_id(body, id)),
        };
        info!("Submitting {}", request.describe());
        ScreenAction::request(Ticket::Submit, request)
    }

    fn on_entity(&mut self, outcome: ApiResponse) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        let request = ApiRequest::get(Self::resource(), id);
        match outcome.and_then(|value| decode::<E>(&request, value)) {
            Ok(entity) => {
                if self.load.resolve(Ok(())) {
                    self.draft = entity.to_draft();
                    let draft = &self.draft;
                    for control in &mut self.controls {
                        control.sync(draft);
                    }
                }
            }
            Err(e) => {
                error!("Failed to fetch {} {}: {}", Self::resource().singular(), id, e);
                self.load.resolve(Err(format!(
                    "Failed to fetch {} data.",
                    Self::resource().singular()
                )));
            }
        }
    }

    fn on_options(&mut self, key: &str, outcome: ApiResponse) {
        let value = self.draft.get(key).to_string();
        for control in &mut self.controls {
            if let Control::Select(selector) = control {
                if selector.key == key {
                    selector.on_response(outcome);
                    selector.set_value(&value);
                    return;
                }
            }
        }
    }

    fn on_submitted(&mut self, outcome: ApiResponse) -> ScreenAction {
        if !self.submit.finish() {
            return ScreenAction::None;
        }
        let resource = Self::resource();
        match outcome {
            Ok(_) => {
                let past = match self.mode {
                    FormMode::Create => "created",
                    FormMode::Edit(_) => "updated",
                };
                info!("{} {}", capitalize(resource.singular()), past);
                ScreenAction::batch(vec![
                    ScreenAction::SetStatus(format!(
                        "{} {} successfully!",
                        capitalize(resource.singular()),
                        past
                    )),
                    ScreenAction::NavigateTo(Route::List(resource)),
                ])
            }
            Err(e) => {
                warn!("Failed to {} {}: {}", self.verb(), resource.singular(), e);
                self.inline_error = Some(format!(
                    "Failed to {} {}. Please check the form and try again.",
                    self.verb(),
                    resource.singular()
                ));
                ScreenAction::None
            }
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        let Some(Control::Select(selector)) = self.controls.get_mut(self.focus) else {
            return None;
        };
        let chosen = match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::Char(' ') => selector.select_next(),
            KeyCode::Up | KeyCode::Left => selector.select_previous(),
            _ => return None,
        };
        let field = selector.key;
        if let Some(value) = chosen {
            self.draft.set(field, value);
        }
        Some(ScreenAction::None)
    }

    fn handle_cursor_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        let field = self.focused_input()?;
        match key.code {
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            KeyCode::Home => field.move_cursor_to_start(),
            KeyCode::End => field.move_cursor_to_end(),
            _ => return None,
        }
        Some(ScreenAction::None)
    }

    fn draw_form(&mut self, f: &mut Frame, area: Rect) {
        let mut constraints: Vec<Constraint> = self
            .controls
            .iter()
            .map(|control| Constraint::Length(control.height()))
            .collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (control, chunk) in self.controls.iter().zip(chunks.iter()) {
            match control {
                Control::Input(field) => field.render(f, *chunk),
                Control::Select(selector) => selector.render(f, *chunk),
            }
        }

        let n = self.controls.len();
        if let Some(error) = &self.inline_error {
            f.render_widget(
                Paragraph::new(error.clone()).style(Styles::error()),
                chunks[n],
            );
        }

        let button_style = if self.submit.is_busy() {
            Styles::disabled()
        } else if self.on_submit_focus() {
            Styles::selected()
        } else {
            Styles::default()
        };
        let button = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.submit_label()),
            button_style,
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(
            if self.on_submit_focus() {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            },
        ));
        let button_area = Rect {
            width: area.width.min(30),
            ..chunks[n + 1]
        };
        f.render_widget(button, button_area);
    }
}

/// Full body for PUT: the draft payload plus the entity id
fn with_id(body: Value, id: Id) -> Value {
    match body {
        Value::Object(mut map) => {
            map.insert("id".to_string(), Value::from(id));
            Value::Object(map)
        }
        other => other,
    }
}

impl<E: EditableEntity> FormHandler for ResourceFormScreen<E> {
    fn get_current_field(&self) -> usize {
        self.focus
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.get_field_count() {
            self.focus = field;
            self.update_focus();
        }
    }

    /// Every control plus the submit button
    fn get_field_count(&self) -> usize {
        self.controls.len() + 1
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.focused_input() {
            field.insert_char(c);
            self.store_focused_input();
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.focused_input() {
            field.delete_char();
            self.store_focused_input();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.focused_input() {
            field.delete_char_forward();
            self.store_focused_input();
        }
    }
}

impl<E: EditableEntity> Screen for ResourceFormScreen<E> {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let route = self.route();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(route.label(), Styles::title()),
            Span::raw("  "),
            Span::styled(
                "Tab next  Shift+Tab previous  Ctrl+S save  Esc cancel",
                Styles::inactive(),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        match self.status_message() {
            Some(message) => {
                let style = if self.load.is_failed() {
                    Styles::error()
                } else {
                    Styles::info()
                };
                let paragraph = Paragraph::new(message)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(paragraph, chunks[1]);
            }
            None => self.draw_form(f, chunks[1]),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if key.code == KeyCode::Esc {
            return ScreenAction::NavigateBack;
        }
        if !self.is_interactive() {
            return ScreenAction::None;
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }

        if key.code == KeyCode::Enter {
            if self.on_submit_focus() {
                return self.submit();
            }
            let in_text_area = matches!(
                self.controls.get(self.focus),
                Some(Control::Input(field)) if field.multiline
            );
            if in_text_area {
                self.handle_char_input('\n');
            } else {
                self.next_field();
            }
            return ScreenAction::None;
        }

        if let Some(action) = self.handle_select_key(key) {
            return action;
        }
        if let Some(action) = self.handle_cursor_key(key) {
            return action;
        }
        handlers::edit_form(self, key);
        ScreenAction::None
    }

    fn route(&self) -> Route {
        match self.mode {
            FormMode::Create => Route::New(Self::resource()),
            FormMode::Edit(id) => Route::Edit(Self::resource(), id),
        }
    }

    fn on_enter(&mut self) -> ScreenAction {
        let mut actions: Vec<ScreenAction> = self
            .controls
            .iter_mut()
            .filter_map(|control| match control {
                Control::Select(selector) => Some(selector.request()),
                Control::Input(_) => None,
            })
            .collect();

        match self.mode {
            FormMode::Create => {
                self.load.begin();
                self.load.resolve(Ok(()));
            }
            FormMode::Edit(id) => {
                self.load.begin();
                actions.push(ScreenAction::request(
                    Ticket::Entity,
                    ApiRequest::get(Self::resource(), id),
                ));
            }
        }
        ScreenAction::batch(actions)
    }

    fn on_response(&mut self, ticket: Ticket, outcome: ApiResponse) -> ScreenAction {
        match ticket {
            Ticket::Entity => {
                self.on_entity(outcome);
                ScreenAction::None
            }
            Ticket::Options(key) => {
                self.on_options(key, outcome);
                ScreenAction::None
            }
            Ticket::Submit => self.on_submitted(outcome),
            _ => ScreenAction::None,
        }
    }

    fn captures_text(&self) -> bool {
        self.is_interactive() && matches!(self.controls.get(self.focus), Some(Control::Input(_)))
    }

    fn help(&self) -> &'static str {
        "Form\n\
         Tab / Shift+Tab   Next / previous field\n\
         ←/→ Home/End      Move the cursor in a text field\n\
         ↑/↓ or Space      Choose an option in a selector\n\
         Enter             Next field, new line in a text area, or submit on the button\n\
         Ctrl+S            Submit\n\
         Esc               Cancel and return to the list"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{Campaign, Post, Tag};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn type_text<E: EditableEntity>(screen: &mut ResourceFormScreen<E>, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: 400,
            path: "POST api/content/tags/".to_string(),
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_create_mode_is_interactive_immediately() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        assert_eq!(screen.on_enter(), ScreenAction::None);
        assert!(screen.is_interactive());
        assert_eq!(screen.draft().get("name"), "");
        assert_eq!(screen.submit_label(), "Create Tag");
        assert!(screen.captures_text());
    }

    #[test]
    fn test_typing_updates_draft() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        screen.on_enter();
        type_text(&mut screen, "rusq");
        screen.handle_key_event(key(KeyCode::Backspace));
        type_text(&mut screen, "t");
        assert_eq!(screen.draft().get("name"), "rust");
    }

    #[test]
    fn test_submit_is_busy_guarded() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        screen.on_enter();
        type_text(&mut screen, "rust");

        let action = screen.handle_key_event(ctrl_s());
        assert_eq!(
            action,
            ScreenAction::request(
                Ticket::Submit,
                ApiRequest::create(Resource::Tags, json!({"name": "rust"}))
            )
        );
        assert!(screen.is_busy());
        assert_eq!(screen.submit_label(), "Creating...");
        assert_eq!(screen.handle_key_event(ctrl_s()), ScreenAction::None);

        let done = screen.on_response(Ticket::Submit, Ok(json!({"id": 3, "name": "rust"})));
        assert_eq!(
            done,
            ScreenAction::Batch(vec![
                ScreenAction::SetStatus("Tag created successfully!".to_string()),
                ScreenAction::NavigateTo(Route::List(Resource::Tags)),
            ])
        );
        assert!(!screen.is_busy());
        assert_eq!(screen.submit_label(), "Create Tag");
    }

    #[test]
    fn test_submit_failure_keeps_draft() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        screen.on_enter();
        type_text(&mut screen, "rust");
        screen.submit();

        assert_eq!(screen.on_response(Ticket::Submit, Err(failure())), ScreenAction::None);
        assert!(!screen.is_busy());
        assert_eq!(
            screen.inline_error(),
            Some("Failed to create tag. Please check the form and try again.")
        );
        assert_eq!(screen.draft().get("name"), "rust");

        // The busy flag is released exactly once
        assert_eq!(screen.on_response(Ticket::Submit, Err(failure())), ScreenAction::None);
        assert!(!screen.is_busy());
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut screen = ResourceFormScreen::<Campaign>::create();
        screen.on_enter();
        type_text(&mut screen, "Fall Sale");
        assert_eq!(screen.handle_key_event(ctrl_s()), ScreenAction::None);
        assert_eq!(screen.inline_error(), Some("Description is required"));
        assert!(!screen.is_busy());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        screen.on_enter();
        type_text(&mut screen, "   ");
        assert_eq!(screen.handle_key_event(ctrl_s()), ScreenAction::None);
        assert_eq!(screen.inline_error(), Some("Tag Name is required"));
        assert!(!screen.is_busy());
    }

    #[test]
    fn test_enter_on_submit_button() {
        let mut screen = ResourceFormScreen::<Tag>::create();
        screen.on_enter();
        type_text(&mut screen, "rust");
        screen.handle_key_event(key(KeyCode::Tab));
        assert!(!screen.captures_text());
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Enter)),
            ScreenAction::Request { ticket: Ticket::Submit, .. }
        ));
    }

    #[test]
    fn test_edit_mode_prefetches_entity() {
        let mut screen = ResourceFormScreen::<Campaign>::edit(4);
        assert_eq!(
            screen.on_enter(),
            ScreenAction::request(Ticket::Entity, ApiRequest::get(Resource::Campaigns, 4))
        );
        assert!(!screen.is_interactive());
        assert_eq!(screen.status_message().as_deref(), Some("Loading..."));

        screen.on_response(
            Ticket::Entity,
            Ok(json!({"id": 4, "name": "Fall Sale", "description": "Autumn"})),
        );
        assert!(screen.is_interactive());
        assert_eq!(screen.draft().get("name"), "Fall Sale");
        assert_eq!(screen.submit_label(), "Update Campaign");

        let action = screen.submit();
        assert_eq!(
            action,
            ScreenAction::request(
                Ticket::Submit,
                ApiRequest::update(
                    Resource::Campaigns,
                    4,
                    json!({"id": 4, "name": "Fall Sale", "description": "Autumn"})
                )
            )
        );
        assert_eq!(screen.submit_label(), "Updating...");
    }

    #[test]
    fn test_edit_fetch_failure_leaves_form_unusable() {
        let mut screen = ResourceFormScreen::<Campaign>::edit(4);
        screen.on_enter();
        screen.on_response(Ticket::Entity, Err(failure()));

        assert_eq!(
            screen.status_message().as_deref(),
            Some("Failed to fetch campaign data.")
        );
        assert!(!screen.captures_text());
        type_text(&mut screen, "x");
        assert_eq!(screen.draft().get("name"), "");
        assert_eq!(screen.handle_key_event(ctrl_s()), ScreenAction::None);
        assert_eq!(screen.submit(), ScreenAction::None);
        assert_eq!(screen.handle_key_event(key(KeyCode::Esc)), ScreenAction::NavigateBack);
    }

    #[test]
    fn test_post_form_requests_every_option_list() {
        let mut screen = ResourceFormScreen::<Post>::create();
        let requests: Vec<_> = screen
            .on_enter()
            .flatten()
            .into_iter()
            .map(|action| match action {
                ScreenAction::Request { ticket, request } => (ticket, request),
                other => panic!("unexpected action {:?}", other),
            })
            .collect();
        assert_eq!(
            requests,
            vec![
                (Ticket::Options("campaign"), ApiRequest::list(Resource::Campaigns)),
                (Ticket::Options("platform"), ApiRequest::list(Resource::Platforms)),
                (Ticket::Options("post_type"), ApiRequest::list(Resource::PostTypes)),
                (Ticket::Options("status"), ApiRequest::list(Resource::PostStatuses)),
            ]
        );
    }

    #[test]
    fn test_selector_choice_lands_in_draft() {
        let mut screen = ResourceFormScreen::<Post>::create();
        screen.on_enter();
        screen.on_response(
            Ticket::Options("campaign"),
            Ok(json!([{"id": 1, "name": "Fall Sale"}, {"id": 2, "name": "Spring"}])),
        );
        assert_eq!(screen.selector("campaign").map(|s| s.options().len()), Some(3));

        screen.handle_key_event(key(KeyCode::Tab));
        assert!(!screen.captures_text());
        screen.handle_key_event(key(KeyCode::Down));
        screen.handle_key_event(key(KeyCode::Down));
        assert_eq!(screen.draft().get("campaign"), "2");
    }

    #[test]
    fn test_post_payload_coerces_selected_ids() {
        let mut screen = ResourceFormScreen::<Post>::create();
        screen.on_enter();
        screen.set_value("title", "Launch");
        screen.set_value("body", "We are live");
        screen.set_value("campaign", "1");
        screen.set_value("platform", "2");
        screen.set_value("post_type", "3");
        screen.set_value("status", "4");

        match screen.submit() {
            ScreenAction::Request { request, .. } => assert_eq!(
                request.body(),
                Some(&json!({
                    "title": "Launch", "body": "We are live",
                    "campaign": 1, "platform": 2, "post_type": 3, "status": 4
                }))
            ),
            other => panic!("unexpected action {:?}", other),
        }
    }
}
