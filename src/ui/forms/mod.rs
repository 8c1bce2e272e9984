//! Form rendering module
//!
//! - `field_renderer`: inputs, chips, suggestions and checkbox
//! - `compose_form`: the compose page

mod compose_form;
mod field_renderer;

pub use compose_form::draw_compose;
