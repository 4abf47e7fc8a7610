//! Placeholder NLP, forecasting and vision endpoints.
//!
//! Bodies are read raw and parsed here so a malformed payload is reported
//! with the endpoint's own failure message instead of the extractor's.

use axum::{Json, body::Bytes, extract::State};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::insight_service::{
    Forecast, ForecastInput, ImageAnalysis, ImageAnalysisInput, TextAnalysis, TextAnalysisInput,
};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TextAnalysisResponse {
    pub(crate) success: bool,
    pub(crate) data: TextAnalysis,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ForecastResponse {
    pub(crate) success: bool,
    pub(crate) data: Forecast,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ImageAnalysisResponse {
    pub(crate) success: bool,
    pub(crate) data: ImageAnalysis,
}

fn parse_body<T: DeserializeOwned>(body: &Bytes, failure: &'static str) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "{failure}");
        AppError::Service(failure)
    })
}

#[utoipa::path(
    post,
    path = "/api/nlp/analyze",
    tag = "insights",
    request_body = TextAnalysisInput,
    responses(
        (status = 200, description = "Fixed sentiment/entity payload", body = TextAnalysisResponse),
        (status = 500, description = "Failed to analyze text")
    )
)]
pub(crate) async fn analyze_text(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<TextAnalysisResponse>> {
    let input: TextAnalysisInput = parse_body(&body, "Failed to analyze text")?;
    let data = state.insight_service.analyze_text(input).await;
    Ok(Json(TextAnalysisResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/prediction/forecast",
    tag = "insights",
    request_body = ForecastInput,
    responses(
        (status = 200, description = "Fixed forecast payload", body = ForecastResponse),
        (status = 500, description = "Failed to generate forecast")
    )
)]
pub(crate) async fn forecast(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ForecastResponse>> {
    let input: ForecastInput = parse_body(&body, "Failed to generate forecast")?;
    let data = state.insight_service.forecast(input).await;
    Ok(Json(ForecastResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/vision/analyze",
    tag = "insights",
    request_body = ImageAnalysisInput,
    responses(
        (status = 200, description = "Fixed label/object payload", body = ImageAnalysisResponse),
        (status = 500, description = "Failed to analyze image")
    )
)]
pub(crate) async fn analyze_image(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ImageAnalysisResponse>> {
    let input: ImageAnalysisInput = parse_body(&body, "Failed to analyze image")?;
    let data = state.insight_service.analyze_image(input).await;
    Ok(Json(ImageAnalysisResponse {
        success: true,
        data,
    }))
}
