use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    QueryString(#[from] QueryRejection),

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    /// Placeholder service could not handle the request; the message is user-facing.
    #[error("{0}")]
    Service(&'static str),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    fn with_field(mut self, field: &str, message: &str) -> Self {
        self.errors
            .get_or_insert_with(BTreeMap::new)
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
        self
    }
}

fn field_errors(err: &ValidationErrors) -> ErrorBody {
    let mut body = ErrorBody::new("validation failed");
    for (field, errors) in err.field_errors() {
        for error in errors {
            let message = error
                .message
                .as_deref()
                .unwrap_or_else(|| error.code.as_ref());
            body = body.with_field(field.as_ref(), message);
        }
    }
    body
}

/// Picks the offending field out of a serde rejection message, if it names one.
fn rejected_field(detail: &str) -> Option<(&str, &'static str)> {
    if let Some(rest) = detail.split("missing field `").nth(1) {
        return rest.split('`').next().map(|field| (field, "is required"));
    }
    let (_, cause) = detail.split_once(": ")?;
    let (field, _) = cause.split_once(": ")?;
    let is_path = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '[' || c == ']');
    is_path.then_some((field, "has an invalid value"))
}

fn rejection_body(message: &str, detail: &str) -> ErrorBody {
    let body = ErrorBody::new(message);
    match rejected_field(detail) {
        Some((field, reason)) => body.with_field(field, reason),
        None => body,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { field, message } => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new("validation failed").with_field(field, message),
                ),
                DomainError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, ErrorBody::new(err.to_string()))
                }
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, ErrorBody::new(err.to_string()))
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorBody::new(err.to_string())),
                DomainError::Upstream(_) | DomainError::Unexpected(_) => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("internal error"),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, field_errors(&err)),
            AppError::Body(rejection) => (
                StatusCode::BAD_REQUEST,
                rejection_body("invalid request body", &rejection.body_text()),
            ),
            AppError::QueryString(rejection) => (
                StatusCode::BAD_REQUEST,
                rejection_body("invalid query string", &rejection.body_text()),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new("not found")),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorBody::new("unauthorized")),
            AppError::Forbidden => (StatusCode::FORBIDDEN, ErrorBody::new("forbidden")),
            AppError::Service(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg)),
            AppError::Internal(err) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("internal error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
