//! The form draft being composed and its submission payload

use super::field::TextInput;
use super::placeholder;
use serde::{Deserialize, Serialize};

/// Payload accepted by the form creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFormRequest {
    pub content: String,
    pub email: String,
    pub title: String,
    pub writer: String,
    pub tags: Vec<String>,
    #[serde(rename = "replacementTags")]
    pub replacement_tags: Vec<String>,
    #[serde(rename = "IsEmailVisible")]
    pub is_email_visible: bool,
}

/// All field values of the compose page plus their input buffers
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub title: TextInput,
    pub body: TextInput,
    pub tags: Vec<String>,
    pub placeholders: Vec<String>,
    pub author_name: TextInput,
    pub author_email: TextInput,
    pub email_visible: bool,
    /// Buffer for the tag being typed
    pub tag_input: TextInput,
    /// Buffer for the placeholder name being typed
    pub placeholder_input: TextInput,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the typed tag if it is non-empty and not already present.
    /// Clears the input on success.
    pub fn add_tag(&mut self) -> bool {
        let tag = self.tag_input.text().trim().to_string();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        tracing::debug!(%tag, "tag added");
        self.tags.push(tag);
        self.tag_input.clear();
        true
    }

    /// Add a suggested tag as-is.
    ///
    /// Unlike [`FormDraft::add_tag`] this skips the duplicate check, so
    /// picking the same suggestion twice lists it twice.
    pub fn add_tag_directly(&mut self, tag: &str) {
        tracing::debug!(tag, "suggested tag added");
        self.tags.push(tag.trim().to_string());
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Add the typed placeholder name if it is non-empty and new.
    /// Clears the input on success.
    pub fn add_placeholder(&mut self) -> bool {
        let name = self.placeholder_input.text().trim().to_string();
        if name.is_empty() || self.placeholders.contains(&name) {
            return false;
        }
        tracing::debug!(%name, "placeholder added");
        self.placeholders.push(name);
        self.placeholder_input.clear();
        true
    }

    /// Splice the marker for `name` into the body at its selection.
    /// No-op when the body has no cursor context.
    pub fn insert_placeholder(&mut self, name: &str) -> bool {
        placeholder::insert_marker(&mut self.body, name)
    }

    /// Drop the placeholder and strip its exact markers from the body
    pub fn remove_placeholder(&mut self, name: &str) {
        self.placeholders.retain(|p| p != name);
        let stripped = placeholder::strip_markers(self.body.text(), name);
        self.body.replace_text(stripped);
        tracing::debug!(name, "placeholder removed");
    }

    pub fn toggle_email_visible(&mut self) {
        self.email_visible = !self.email_visible;
    }

    /// Package the draft for the creation endpoint
    pub fn to_request(&self) -> CreateFormRequest {
        CreateFormRequest {
            content: self.body.text().to_string(),
            email: self.author_email.text().to_string(),
            title: self.title.text().to_string(),
            writer: self.author_name.text().to_string(),
            tags: self.tags.clone(),
            replacement_tags: self.placeholders.clone(),
            is_email_visible: self.email_visible,
        }
    }
}
