//! Application state and core logic

use crate::api::{FormsClient, FormsClientTrait};
use crate::config::TuiConfig;
use crate::state::{AppState, ComposeField, Form, PendingSubmit, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Shown once a submission has been handed to the backend
pub const SUBMITTED_NOTICE: &str =
    "Form submitted. It will be published after moderator approval.";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client for form creation
    client: Arc<dyn FormsClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Creation calls that may still be running
    submissions: Vec<JoinHandle<()>>,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api_base_url = config.api_base_url();
        let client = FormsClient::new(&api_base_url)?;
        tracing::info!(endpoint = %client.endpoint(), "using forms backend");
        let state = AppState::new(config.recommended_tags(), api_base_url);
        Ok(Self::with_client(Arc::new(client), state))
    }

    /// Create an App around an existing client
    pub fn with_client(client: Arc<dyn FormsClientTrait>, state: AppState) -> Self {
        Self {
            state,
            client,
            quit: false,
            status_message: None,
            submissions: Vec::new(),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.has_notices() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        // Handle submit confirmation (modal)
        if self.state.pending_submit.is_some() {
            self.handle_confirm_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Home => self.handle_home_key(key),
            View::Compose => self.handle_compose_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::Home;
    }

    /// Jump to the root view, dropping history
    fn navigate_to_root(&mut self) {
        self.state.view_history.clear();
        self.state.current_view = View::Home;
    }

    /// Open an empty compose page
    pub fn open_compose(&mut self) {
        self.state.reset_compose();
        self.navigate(View::Compose);
    }

    /// Handle keys in Home view
    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.open_compose(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in Compose view
    fn handle_compose_key(&mut self, key: KeyEvent) {
        // AltGr arrives as Ctrl+Alt on Windows and produces plain text
        let altgr = key
            .modifiers
            .contains(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL) && !altgr;
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        // Keyboard shortcuts (work from anywhere)
        match key.code {
            KeyCode::Char('s') if ctrl => return self.request_submit(),
            KeyCode::Enter if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                return self.request_submit();
            }
            KeyCode::Tab => return self.state.compose.next_field(),
            KeyCode::BackTab => return self.state.compose.prev_field(),
            KeyCode::Esc if self.state.compose.dismiss_suggestions() => return,
            KeyCode::Esc => {
                self.state.reset_compose();
                self.go_back();
                return;
            }
            _ => {}
        }

        let form = &mut self.state.compose;
        match (form.active(), key.code) {
            (ComposeField::TagInput, KeyCode::Down) => form.next_suggestion(),
            (ComposeField::TagInput, KeyCode::Up) => form.prev_suggestion(),
            (ComposeField::TagInput, KeyCode::Enter) => form.confirm_tag_input(),

            (ComposeField::TagList, KeyCode::Left) => form.select_prev_tag(),
            (ComposeField::TagList, KeyCode::Right) => form.select_next_tag(),
            (ComposeField::TagList, KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x')) => {
                form.remove_selected_tag()
            }

            (ComposeField::PlaceholderInput, KeyCode::Enter) => {
                form.add_placeholder();
            }

            (ComposeField::PlaceholderList, KeyCode::Left) => form.select_prev_placeholder(),
            (ComposeField::PlaceholderList, KeyCode::Right) => form.select_next_placeholder(),
            (ComposeField::PlaceholderList, KeyCode::Enter) => {
                if form.selected_placeholder_name().is_some()
                    && !form.insert_selected_placeholder()
                {
                    self.status_message =
                        Some("Move the cursor into the form body first".to_string());
                }
            }
            (
                ComposeField::PlaceholderList,
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x'),
            ) => form.remove_selected_placeholder(),

            (ComposeField::Body, KeyCode::Enter) => form.input_char('\n'),
            (ComposeField::Body, KeyCode::Up) => form.draft.body.move_up(shift),
            (ComposeField::Body, KeyCode::Down) => form.draft.body.move_down(shift),

            (ComposeField::EmailVisible, KeyCode::Char(' ') | KeyCode::Enter) => {
                form.draft.toggle_email_visible()
            }

            (ComposeField::Submit, KeyCode::Enter) => self.request_submit(),

            // Text input editing for whichever input is focused
            (_, KeyCode::Char(c)) if !ctrl => form.input_char(c),
            (_, KeyCode::Backspace) => form.backspace(),
            (_, KeyCode::Delete) => form.delete(),
            (_, code) => {
                if let Some(input) = form.get_active_input_mut() {
                    match code {
                        KeyCode::Left => input.move_left(shift),
                        KeyCode::Right => input.move_right(shift),
                        KeyCode::Home => input.move_home(shift),
                        KeyCode::End => input.move_end(shift),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Ask the user to confirm submission
    pub fn request_submit(&mut self) {
        self.state.pending_submit = Some(PendingSubmit {
            selected_option: true,
        });
    }

    /// Handle keys in the submit confirmation dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => {
                if let Some(pending) = self.state.pending_submit.as_mut() {
                    pending.toggle();
                }
            }
            KeyCode::Enter => {
                let confirmed = self
                    .state
                    .pending_submit
                    .as_ref()
                    .is_some_and(|p| p.selected_option);
                if confirmed {
                    self.confirm_submit();
                } else {
                    self.cancel_submit();
                }
            }
            KeyCode::Char('y') => self.confirm_submit(),
            KeyCode::Char('n') | KeyCode::Esc => self.cancel_submit(),
            _ => {}
        }
    }

    /// Close the confirmation without touching the draft
    pub fn cancel_submit(&mut self) {
        self.state.pending_submit = None;
    }

    /// Send the draft and leave the compose page.
    ///
    /// The creation call runs in the background; its outcome is only logged.
    pub fn confirm_submit(&mut self) {
        self.state.pending_submit = None;
        let request = self.state.compose.draft.to_request();
        tracing::info!(
            title = %request.title,
            tags = request.tags.len(),
            replacement_tags = request.replacement_tags.len(),
            "submitting form"
        );

        let client = Arc::clone(&self.client);
        self.submissions.retain(|handle| !handle.is_finished());
        self.submissions.push(tokio::spawn(async move {
            if let Err(err) = client.create_form(request).await {
                tracing::warn!("form submission failed: {err:#}");
            }
        }));

        self.state.push_notice(SUBMITTED_NOTICE.to_string());
        self.state.reset_compose();
        self.navigate_to_root();
    }

    /// Wait up to `grace` for in-flight submissions to finish
    pub async fn drain_submissions(&mut self, grace: Duration) {
        let pending: Vec<_> = self.submissions.drain(..).collect();
        if pending.is_empty() {
            return;
        }
        tracing::info!(count = pending.len(), "waiting for in-flight submissions");
        let all = async {
            for handle in pending {
                if let Err(err) = handle.await {
                    tracing::warn!("submission task failed: {err}");
                }
            }
        };
        if tokio::time::timeout(grace, all).await.is_err() {
            tracing::warn!("gave up waiting for in-flight submissions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFormsClientTrait;
    use crate::state::CreateFormRequest;
    use pretty_assertions::assert_eq;

    fn app_with(mock: MockFormsClientTrait) -> App {
        App::with_client(Arc::new(mock), AppState::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn tab_to(app: &mut App, field: ComposeField) {
        while app.state.compose.active() != field {
            press(app, KeyCode::Tab);
        }
    }

    fn ctrl_s(app: &mut App) {
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .unwrap();
    }

    /// App on the compose page with a title, body and tag filled in
    fn filled_app(mock: MockFormsClientTrait) -> App {
        let mut app = app_with(mock);
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Leave request");
        tab_to(&mut app, ComposeField::TagInput);
        type_str(&mut app, "HR");
        press(&mut app, KeyCode::Enter);
        tab_to(&mut app, ComposeField::Body);
        type_str(&mut app, "Dear team");
        app
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_home() {
            let app = app_with(MockFormsClientTrait::new());
            assert_eq!(app.state.current_view, View::Home);
            assert!(!app.should_quit());
        }

        #[test]
        fn test_n_opens_compose() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.state.current_view, View::Compose);
        }

        #[test]
        fn test_q_quits_from_home() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_q_in_compose_is_text() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            press(&mut app, KeyCode::Char('q'));
            assert!(!app.should_quit());
            assert_eq!(app.state.compose.draft.title.text(), "q");
        }

        #[test]
        fn test_esc_discards_draft_and_goes_home() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            type_str(&mut app, "draft");
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Home);
            assert!(app.state.compose.draft.title.is_empty());
        }

        #[test]
        fn test_go_back_skips_form_views() {
            let mut app = app_with(MockFormsClientTrait::new());
            app.navigate(View::Compose);
            app.navigate(View::Compose);
            app.go_back();
            assert_eq!(app.state.current_view, View::Home);
            assert!(app.state.view_history.is_empty());
        }

        #[test]
        fn test_go_back_empty_history_lands_home() {
            let mut app = app_with(MockFormsClientTrait::new());
            app.state.current_view = View::Compose;
            app.go_back();
            assert_eq!(app.state.current_view, View::Home);
        }
    }

    mod compose_keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_duplicate_manual_tag_is_ignored() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::TagInput);
            type_str(&mut app, "mine");
            press(&mut app, KeyCode::Enter);
            type_str(&mut app, "mine");
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.compose.draft.tags, vec!["mine"]);
        }

        #[test]
        fn test_suggestion_pick_can_duplicate() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::TagInput);
            type_str(&mut app, "Invoice");
            press(&mut app, KeyCode::Enter);
            type_str(&mut app, "voi");
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.compose.draft.tags, vec!["Invoice", "Invoice"]);
        }

        #[test]
        fn test_remove_tag_from_list() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::TagInput);
            type_str(&mut app, "a");
            press(&mut app, KeyCode::Enter);
            type_str(&mut app, "b");
            press(&mut app, KeyCode::Enter);
            tab_to(&mut app, ComposeField::TagList);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Char('x'));
            assert_eq!(app.state.compose.draft.tags, vec!["a"]);
        }

        #[test]
        fn test_placeholder_inserted_at_body_cursor() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::Body);
            type_str(&mut app, "ab");
            press(&mut app, KeyCode::Left);
            tab_to(&mut app, ComposeField::PlaceholderInput);
            type_str(&mut app, "foo");
            press(&mut app, KeyCode::Enter);
            tab_to(&mut app, ComposeField::PlaceholderList);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.compose.draft.body.text(), "a${foo}$b");
            assert_eq!(app.state.compose.draft.placeholders, vec!["foo"]);
        }

        #[test]
        fn test_placeholder_removal_strips_body() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::PlaceholderInput);
            type_str(&mut app, "foo");
            press(&mut app, KeyCode::Enter);
            app.state.compose.draft.body.set_text("a${foo}$b${foo}$c");
            tab_to(&mut app, ComposeField::PlaceholderList);
            press(&mut app, KeyCode::Delete);
            assert_eq!(app.state.compose.draft.body.text(), "abc");
            assert!(app.state.compose.draft.placeholders.is_empty());
        }

        #[test]
        fn test_insert_before_body_focus_reports_status() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::PlaceholderInput);
            type_str(&mut app, "foo");
            press(&mut app, KeyCode::Enter);
            tab_to(&mut app, ComposeField::PlaceholderList);
            press(&mut app, KeyCode::Enter);
            assert!(app.state.compose.draft.body.is_empty());
            assert!(app.status_message.is_some());
        }

        #[test]
        fn test_body_enter_inserts_newline() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::Body);
            type_str(&mut app, "a");
            press(&mut app, KeyCode::Enter);
            type_str(&mut app, "b");
            assert_eq!(app.state.compose.draft.body.text(), "a\nb");
        }

        #[test]
        fn test_body_arrows_move_between_lines() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::Body);
            type_str(&mut app, "abc");
            press(&mut app, KeyCode::Enter);
            type_str(&mut app, "de");
            press(&mut app, KeyCode::Up);
            type_str(&mut app, "X");
            assert_eq!(app.state.compose.draft.body.text(), "abXc\nde");
            press(&mut app, KeyCode::Down);
            type_str(&mut app, "Y");
            assert_eq!(app.state.compose.draft.body.text(), "abXc\ndeY");
        }

        #[test]
        fn test_shift_up_selects_for_placeholder() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::PlaceholderInput);
            type_str(&mut app, "who");
            press(&mut app, KeyCode::Enter);
            tab_to(&mut app, ComposeField::Body);
            type_str(&mut app, "ab\ncd");
            app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT))
                .unwrap();
            tab_to(&mut app, ComposeField::PlaceholderList);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.compose.draft.body.text(), "ab${who}$");
        }

        #[test]
        fn test_esc_closes_suggestions_before_leaving() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::TagInput);
            type_str(&mut app, "inv");
            press(&mut app, KeyCode::Down);

            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Compose);
            assert!(app.state.compose.suggestions.is_empty());
            assert_eq!(app.state.compose.draft.tag_input.text(), "inv");

            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Home);
        }

        #[test]
        fn test_altgr_chars_are_typed() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            tab_to(&mut app, ComposeField::AuthorEmail);
            type_str(&mut app, "me");
            app.handle_key(KeyEvent::new(
                KeyCode::Char('@'),
                KeyModifiers::CONTROL | KeyModifiers::ALT,
            ))
            .unwrap();
            type_str(&mut app, "x.org");
            assert_eq!(app.state.compose.draft.author_email.text(), "me@x.org");
        }

        #[test]
        fn test_ctrl_chars_are_not_typed() {
            let mut app = app_with(MockFormsClientTrait::new());
            press(&mut app, KeyCode::Char('n'));
            app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL))
                .unwrap();
            assert!(app.state.compose.draft.title.is_empty());
        }

        #[test]
        fn test_space_toggles_email_visibility_only() {
            let mut app = filled_app(MockFormsClientTrait::new());
            let before = app.state.compose.draft.to_request();
            tab_to(&mut app, ComposeField::EmailVisible);
            press(&mut app, KeyCode::Char(' '));
            let after = app.state.compose.draft.to_request();
            assert!(after.is_email_visible);
            assert_eq!(
                CreateFormRequest {
                    is_email_visible: false,
                    ..after
                },
                before
            );
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ctrl_s_opens_confirmation() {
            let mut app = filled_app(MockFormsClientTrait::new());
            ctrl_s(&mut app);
            assert!(app.state.pending_submit.is_some());
        }

        #[test]
        fn test_declining_keeps_draft_and_skips_call() {
            let mut mock = MockFormsClientTrait::new();
            mock.expect_create_form().never();
            let mut app = filled_app(mock);

            ctrl_s(&mut app);
            press(&mut app, KeyCode::Esc);

            assert!(app.state.pending_submit.is_none());
            assert_eq!(app.state.current_view, View::Compose);
            let draft = &app.state.compose.draft;
            assert_eq!(draft.title.text(), "Leave request");
            assert_eq!(draft.body.text(), "Dear team");
            assert_eq!(draft.tags, vec!["HR"]);
        }

        #[test]
        fn test_choosing_cancel_with_enter_declines() {
            let mut mock = MockFormsClientTrait::new();
            mock.expect_create_form().never();
            let mut app = filled_app(mock);

            ctrl_s(&mut app);
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Enter);

            assert!(app.state.pending_submit.is_none());
            assert_eq!(app.state.compose.draft.title.text(), "Leave request");
        }

        #[tokio::test]
        async fn test_confirming_sends_payload_and_goes_home() {
            let mut mock = MockFormsClientTrait::new();
            mock.expect_create_form()
                .withf(|request: &CreateFormRequest| {
                    request.title == "Leave request"
                        && request.content == "Dear team"
                        && request.tags == vec!["HR".to_string()]
                        && !request.is_email_visible
                })
                .times(1)
                .returning(|_| Ok(()));
            let mut app = filled_app(mock);

            ctrl_s(&mut app);
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.state.current_view, View::Home);
            assert_eq!(app.state.current_notice(), Some(SUBMITTED_NOTICE));
            assert!(app.state.compose.draft.title.is_empty());

            app.drain_submissions(Duration::from_secs(1)).await;
        }

        #[tokio::test]
        async fn test_failed_submission_is_not_surfaced() {
            let mut mock = MockFormsClientTrait::new();
            mock.expect_create_form()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("backend down")));
            let mut app = filled_app(mock);

            ctrl_s(&mut app);
            press(&mut app, KeyCode::Char('y'));
            app.drain_submissions(Duration::from_secs(1)).await;

            assert!(!app.state.has_errors());
            assert_eq!(app.state.current_view, View::Home);
        }

        #[tokio::test]
        async fn test_notice_is_dismissed_before_other_input() {
            let mut mock = MockFormsClientTrait::new();
            mock.expect_create_form().returning(|_| Ok(()));
            let mut app = filled_app(mock);

            ctrl_s(&mut app);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.state.current_view, View::Home);
            press(&mut app, KeyCode::Enter);
            assert!(!app.state.has_notices());
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.state.current_view, View::Compose);

            app.drain_submissions(Duration::from_secs(1)).await;
        }
    }

    #[test]
    fn test_error_dialog_blocks_input() {
        let mut app = app_with(MockFormsClientTrait::new());
        app.push_error("config broken");
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state.current_view, View::Home);
        press(&mut app, KeyCode::Esc);
        assert!(!app.state.has_errors());
    }
}
