//! Application state definitions

use super::forms::ComposeForm;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Root route: landing screen
    #[default]
    Home,
    /// Compose page for a new form
    Compose,
}

impl View {
    /// Views that hold unsent input and are skipped when going back
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Compose)
    }
}

/// Submission awaiting the user's confirmation
#[derive(Debug, Clone, Default)]
pub struct PendingSubmit {
    /// true = "Submit" highlighted, false = "Cancel"
    pub selected_option: bool,
}

impl PendingSubmit {
    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Compose page
    pub compose: ComposeForm,
    pub pending_submit: Option<PendingSubmit>,

    // Environment
    pub recommended_tags: Vec<String>,
    pub api_base_url: String,

    // Modal queues
    notices: VecDeque<String>,
    errors: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(super::forms::tag_filter::default_dictionary(), String::new())
    }
}

impl AppState {
    pub fn new(recommended_tags: Vec<String>, api_base_url: String) -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            compose: ComposeForm::new(recommended_tags.clone()),
            pending_submit: None,
            recommended_tags,
            api_base_url,
            notices: VecDeque::new(),
            errors: VecDeque::new(),
        }
    }

    /// Throw away the current draft and start an empty one
    pub fn reset_compose(&mut self) {
        self.compose = ComposeForm::new(self.recommended_tags.clone());
        self.pending_submit = None;
    }

    pub fn push_notice(&mut self, message: String) {
        self.notices.push_back(message);
    }

    pub fn current_notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn push_error(&mut self, message: String) {
        tracing::error!("{message}");
        self.errors.push_back(message);
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
