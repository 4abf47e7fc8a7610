use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::pages::{admin, dashboard};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/admin", get(admin))
}
