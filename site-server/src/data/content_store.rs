use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::data::content_query::GroqQuery;
use crate::domain::error::DomainError;

/// Executes GROQ queries and returns the raw `result` value.
#[async_trait]
pub(crate) trait ContentStore: Send + Sync {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, DomainError>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for Arc<T> {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, DomainError> {
        (**self).fetch(query).await
    }
}
