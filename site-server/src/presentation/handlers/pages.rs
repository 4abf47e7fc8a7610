use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dashboard_service::AnalyticsSnapshot;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::UserDto;
use crate::presentation::middleware::auth::{AdminUser, AuthenticatedUser};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DashboardDto {
    pub(crate) success: bool,
    pub(crate) email: String,
    pub(crate) analytics: AnalyticsSnapshot,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AdminOverviewDto {
    pub(crate) success: bool,
    pub(crate) total_users: i64,
    pub(crate) recent_users: Vec<UserDto>,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "pages",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status = 200, description = "Analytics snapshot", body = DashboardDto),
        (status = 307, description = "Redirect to login without a session")
    )
)]
pub(crate) async fn dashboard(
    State(state): State<AppState>,
    session: AuthenticatedUser,
) -> Json<DashboardDto> {
    Json(DashboardDto {
        success: true,
        email: session.email,
        analytics: state.dashboard_service.analytics(),
    })
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "pages",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status = 200, description = "User overview", body = AdminOverviewDto),
        (status = 307, description = "Redirect to the landing page for non-admins"),
        (status = 500, description = "User store error")
    )
)]
pub(crate) async fn admin(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<AdminOverviewDto>> {
    let overview = state.dashboard_service.admin_overview().await?;
    Ok(Json(AdminOverviewDto {
        success: true,
        total_users: overview.total_users,
        recent_users: overview.recent_users.into_iter().map(UserDto::from).collect(),
    }))
}

pub(crate) async fn not_found() -> AppError {
    AppError::NotFound
}
