use axum::{Router, routing::post};

use crate::presentation::AppState;
use crate::presentation::handlers::contact::{report_vitals, submit_contact};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/vitals", post(report_vitals))
}
