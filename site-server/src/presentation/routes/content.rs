use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::content::{
    get_post, get_project, list_categories, list_posts, list_projects, workplace_policy,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{slug}", get(get_post))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(get_project))
        .route("/api/categories", get(list_categories))
        .route("/api/workplace-policy", get(workplace_policy))
}
