//! HTTP client module for the form creation endpoint

mod client;
mod traits;

pub use client::{ApiError, FormsClient};
pub use traits::FormsClientTrait;

#[cfg(test)]
pub use traits::MockFormsClientTrait;
