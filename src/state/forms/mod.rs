//! Form domain layer
//!
//! The compose page's draft, its text inputs, and the tag/placeholder
//! logic that operates on them.

mod draft;
mod field;
mod form_state;
pub mod placeholder;
pub mod tag_filter;

pub use draft::{CreateFormRequest, FormDraft};
pub use field::TextInput;
pub use form_state::{ComposeField, ComposeForm, Form};
