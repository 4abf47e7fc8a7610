use axum::{Router, routing::post};

use crate::presentation::AppState;
use crate::presentation::handlers::insights::{analyze_image, analyze_text, forecast};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/nlp/analyze", post(analyze_text))
        .route("/api/prediction/forecast", post(forecast))
        .route("/api/vision/analyze", post(analyze_image))
}
