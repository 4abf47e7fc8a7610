use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod content;
pub(crate) mod insights;
pub(crate) mod pages;
pub(crate) mod site;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .merge(content::router())
        .merge(insights::router())
        .merge(site::router())
        .merge(pages::router())
}
