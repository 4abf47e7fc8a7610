use std::time::Duration;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, warn};

use crate::infrastructure::settings::Settings;
use crate::presentation::app_error::ErrorBody;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub(crate) body_bytes: usize,
    pub(crate) concurrency: usize,
    pub(crate) timeout: Duration,
}

impl From<&Settings> for Limits {
    fn from(settings: &Settings) -> Self {
        Self {
            body_bytes: settings.http_request_body_limit_bytes,
            concurrency: settings.http_concurrency_limit,
            timeout: Duration::from_secs(settings.http_request_timeout_secs),
        }
    }
}

/// Body size cap, one concurrency budget shared by all routes, per-request timeout.
pub(crate) fn apply_limits(router: Router, limits: Limits) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_limit_error))
            .layer(TimeoutLayer::new(limits.timeout))
            .layer(GlobalConcurrencyLimitLayer::new(limits.concurrency))
            .layer(RequestBodyLimitLayer::new(limits.body_bytes)),
    )
}

async fn handle_limit_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorBody::new("request timed out")),
        )
            .into_response();
    }

    error!(error = %err, "unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("internal error")),
    )
        .into_response()
}
