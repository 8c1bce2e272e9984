//! Trait abstraction for the forms client to enable mocking in tests

use crate::state::CreateFormRequest;
use anyhow::Result;
use async_trait::async_trait;

use super::client::FormsClient;

/// Trait for backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsClientTrait: Send + Sync {
    /// Submit a form for moderation
    async fn create_form(&self, request: CreateFormRequest) -> Result<()>;
}

#[async_trait]
impl FormsClientTrait for FormsClient {
    async fn create_form(&self, request: CreateFormRequest) -> Result<()> {
        FormsClient::create_form(self, &request).await?;
        Ok(())
    }
}
