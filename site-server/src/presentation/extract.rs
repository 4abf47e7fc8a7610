use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::Json;

use crate::presentation::app_error::AppError;

/// `Json` whose rejections are reported through the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

/// `Query` whose rejections are reported through the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub(crate) struct AppQuery<T>(pub(crate) T);
