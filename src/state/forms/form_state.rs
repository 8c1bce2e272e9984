//! Compose form focus and input state

use super::draft::FormDraft;
use super::field::TextInput;
use super::tag_filter::filter_tags;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_input_mut(&mut self) -> Option<&mut TextInput>;
}

/// Focusable rows of the compose page, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    Title,
    TagInput,
    TagList,
    PlaceholderInput,
    PlaceholderList,
    Body,
    AuthorName,
    AuthorEmail,
    EmailVisible,
    Submit,
}

impl ComposeField {
    pub const ALL: [ComposeField; 10] = [
        Self::Title,
        Self::TagInput,
        Self::TagList,
        Self::PlaceholderInput,
        Self::PlaceholderList,
        Self::Body,
        Self::AuthorName,
        Self::AuthorEmail,
        Self::EmailVisible,
        Self::Submit,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::TagInput => "Tags",
            Self::TagList => "Added Tags",
            Self::PlaceholderInput => "Replacement Tags",
            Self::PlaceholderList => "Added Replacement Tags",
            Self::Body => "Form",
            Self::AuthorName => "Author",
            Self::AuthorEmail => "Email",
            Self::EmailVisible => "Show email to readers for feedback",
            Self::Submit => "Submit",
        }
    }
}

/// State of the compose page: the draft plus everything needed to edit it
#[derive(Debug, Clone)]
pub struct ComposeForm {
    pub draft: FormDraft,
    pub active_field_index: usize,
    /// Tag dictionary suggestions are drawn from
    dictionary: Vec<String>,
    /// Suggestions for the current tag input
    pub suggestions: Vec<String>,
    /// Highlighted suggestion, if the user moved into the list
    pub highlighted_suggestion: Option<usize>,
    /// Selected chip in the tag list
    pub selected_tag: usize,
    /// Selected chip in the placeholder list
    pub selected_placeholder: usize,
}

impl ComposeForm {
    pub fn new(dictionary: Vec<String>) -> Self {
        Self {
            draft: FormDraft::new(),
            active_field_index: 0,
            dictionary,
            suggestions: Vec::new(),
            highlighted_suggestion: None,
            selected_tag: 0,
            selected_placeholder: 0,
        }
    }

    pub fn active(&self) -> ComposeField {
        ComposeField::from_index(self.active_field_index)
    }

    pub fn is_active(&self, field: ComposeField) -> bool {
        self.active() == field
    }

    /// Type a char into the focused input
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.get_active_input_mut() {
            input.insert_char(c);
            self.after_edit();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.get_active_input_mut() {
            input.backspace();
            self.after_edit();
        }
    }

    pub fn delete(&mut self) {
        if let Some(input) = self.get_active_input_mut() {
            input.delete();
            self.after_edit();
        }
    }

    fn after_edit(&mut self) {
        if self.is_active(ComposeField::TagInput) {
            self.refresh_suggestions();
        }
    }

    /// Recompute suggestions from the tag input
    pub fn refresh_suggestions(&mut self) {
        self.suggestions = filter_tags(&self.dictionary, self.draft.tag_input.text());
        self.highlighted_suggestion = None;
    }

    /// Close the suggestion dropdown. Returns false if it was not open.
    pub fn dismiss_suggestions(&mut self) -> bool {
        if self.suggestions.is_empty() {
            return false;
        }
        self.suggestions.clear();
        self.highlighted_suggestion = None;
        true
    }

    pub fn next_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.highlighted_suggestion = Some(match self.highlighted_suggestion {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    /// Move the highlight up; leaving the top returns to free typing
    pub fn prev_suggestion(&mut self) {
        self.highlighted_suggestion = match self.highlighted_suggestion {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Enter on the tag input: add the highlighted suggestion, or the typed tag
    pub fn confirm_tag_input(&mut self) {
        let picked = self
            .highlighted_suggestion
            .and_then(|i| self.suggestions.get(i))
            .cloned();
        match picked {
            Some(tag) => self.draft.add_tag_directly(&tag),
            None => {
                if self.draft.add_tag() {
                    self.refresh_suggestions();
                }
            }
        }
    }

    pub fn select_prev_tag(&mut self) {
        self.selected_tag = self.selected_tag.saturating_sub(1);
    }

    pub fn select_next_tag(&mut self) {
        if self.selected_tag + 1 < self.draft.tags.len() {
            self.selected_tag += 1;
        }
    }

    pub fn remove_selected_tag(&mut self) {
        if let Some(tag) = self.draft.tags.get(self.selected_tag).cloned() {
            self.draft.remove_tag(&tag);
            self.selected_tag = clamp_index(self.selected_tag, self.draft.tags.len());
        }
    }

    pub fn add_placeholder(&mut self) -> bool {
        self.draft.add_placeholder()
    }

    pub fn select_prev_placeholder(&mut self) {
        self.selected_placeholder = self.selected_placeholder.saturating_sub(1);
    }

    pub fn select_next_placeholder(&mut self) {
        if self.selected_placeholder + 1 < self.draft.placeholders.len() {
            self.selected_placeholder += 1;
        }
    }

    pub fn selected_placeholder_name(&self) -> Option<&str> {
        self.draft
            .placeholders
            .get(self.selected_placeholder)
            .map(String::as_str)
    }

    /// Insert the selected placeholder's marker into the body.
    /// Returns false when nothing was inserted.
    pub fn insert_selected_placeholder(&mut self) -> bool {
        match self.selected_placeholder_name().map(str::to_string) {
            Some(name) => self.draft.insert_placeholder(&name),
            None => false,
        }
    }

    pub fn remove_selected_placeholder(&mut self) {
        if let Some(name) = self.selected_placeholder_name().map(str::to_string) {
            self.draft.remove_placeholder(&name);
            self.selected_placeholder =
                clamp_index(self.selected_placeholder, self.draft.placeholders.len());
        }
    }
}

impl Form for ComposeForm {
    fn field_count(&self) -> usize {
        ComposeField::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
        if self.is_active(ComposeField::Body) {
            self.draft.body.focus();
        }
    }
    fn get_active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.active() {
            ComposeField::Title => Some(&mut self.draft.title),
            ComposeField::TagInput => Some(&mut self.draft.tag_input),
            ComposeField::PlaceholderInput => Some(&mut self.draft.placeholder_input),
            ComposeField::Body => Some(&mut self.draft.body),
            ComposeField::AuthorName => Some(&mut self.draft.author_name),
            ComposeField::AuthorEmail => Some(&mut self.draft.author_email),
            // Lists, checkbox and button take no text
            _ => None,
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
