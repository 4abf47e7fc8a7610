use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::data::content_query::GroqQuery;
use crate::data::content_store::ContentStore;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct SanityConfig {
    pub(crate) project_id: String,
    pub(crate) dataset: String,
    pub(crate) api_version: String,
    pub(crate) token: Option<String>,
    pub(crate) use_cdn: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponseDto {
    result: Value,
}

#[derive(Debug, Deserialize)]
struct QueryErrorDto {
    error: Option<QueryErrorDetailDto>,
}

#[derive(Debug, Deserialize)]
struct QueryErrorDetailDto {
    description: Option<String>,
}

/// Content store backed by the Sanity HTTP query API.
#[derive(Debug, Clone)]
pub(crate) struct SanityContentStore {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl SanityContentStore {
    pub(crate) fn new(config: SanityConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("failed to build content store http client")?;

        Ok(Self {
            client,
            endpoint: Self::query_endpoint(&config),
            token: config.token,
        })
    }

    fn query_endpoint(config: &SanityConfig) -> String {
        // Authenticated reads bypass the CDN, which only serves public data.
        let host = if config.use_cdn && config.token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!(
            "https://{}.{host}/v{}/data/query/{}",
            config.project_id,
            config.api_version.trim_start_matches('v'),
            config.dataset
        )
    }

    /// `query` plus one `$name=<json>` pair per parameter.
    fn query_pairs(query: &GroqQuery) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(query.params.len() + 1);
        pairs.push(("query".to_string(), query.query.clone()));
        for (name, value) in &query.params {
            pairs.push((format!("${name}"), value.to_string()));
        }
        pairs
    }

    async fn decode_error(response: reqwest::Response) -> DomainError {
        let status = response.status();
        let description = match response.json::<QueryErrorDto>().await {
            Ok(body) => body.error.and_then(|detail| detail.description),
            Err(_) => None,
        };
        let message = description.unwrap_or_else(|| format!("http status {status}"));

        match status {
            StatusCode::BAD_REQUEST => DomainError::Unexpected(format!("invalid query: {message}")),
            _ => DomainError::Upstream(format!("content store: {message}")),
        }
    }
}

#[async_trait]
impl ContentStore for SanityContentStore {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, DomainError> {
        debug!(query = %query.query, "executing content query");

        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&Self::query_pairs(query));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            error!(error = %err, "content store request failed");
            DomainError::Upstream(format!("content store: {err}"))
        })?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body = response
            .json::<QueryResponseDto>()
            .await
            .map_err(|err| DomainError::Upstream(format!("content store payload: {err}")))?;
        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use super::{SanityConfig, SanityContentStore};
    use crate::data::content_query::{ListQuery, ListableKind};

    fn config(token: Option<&str>, use_cdn: bool) -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "v2024-01-01".to_string(),
            token: token.map(str::to_string),
            use_cdn,
        }
    }

    #[test]
    fn endpoint_uses_cdn_only_for_anonymous_reads() {
        assert_eq!(
            SanityContentStore::query_endpoint(&config(None, true)),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        assert_eq!(
            SanityContentStore::query_endpoint(&config(Some("secret"), true)),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn params_are_sent_as_json_encoded_pairs() {
        let query = ListQuery::new(ListableKind::Post, Some("ai"), 2, 10).to_groq();
        let pairs = SanityContentStore::query_pairs(&query);

        assert_eq!(pairs[0].0, "query");
        assert!(pairs.contains(&("$category".to_string(), "\"ai\"".to_string())));
        assert!(pairs.contains(&("$start".to_string(), "10".to_string())));
        assert!(pairs.contains(&("$end".to_string(), "20".to_string())));
    }
}
