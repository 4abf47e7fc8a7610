use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::content_service::Paged;
use crate::domain::content::{Category, Post, Project, WorkplacePolicy};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::AppQuery;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct ListParams {
    /// Category slug; empty or `all` lists every category.
    pub(crate) category: Option<String>,
    /// 1-based page; values below 1 show the first page.
    pub(crate) page: Option<i64>,
}

impl ListParams {
    fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PaginationDto {
    pub(crate) current_page: u64,
    pub(crate) total_pages: u64,
    pub(crate) category: Option<String>,
    /// Link to the previous page, absent on the first page.
    pub(crate) previous: Option<String>,
    /// Link to the next page, absent on the last page.
    pub(crate) next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListDto {
    #[schema(value_type = Vec<Object>)]
    pub(crate) items: Vec<Post>,
    pub(crate) pagination: PaginationDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProjectListDto {
    #[schema(value_type = Vec<Object>)]
    pub(crate) items: Vec<Project>,
    pub(crate) pagination: PaginationDto,
}

fn split_page<T>(paged: Paged<T>) -> (Vec<T>, PaginationDto) {
    let previous = paged.pagination.previous_link(paged.resource);
    let next = paged.pagination.next_link(paged.resource);
    let pagination = PaginationDto {
        current_page: paged.pagination.current_page,
        total_pages: paged.pagination.total_pages,
        category: paged.pagination.category,
        previous,
        next,
    };
    (paged.items, pagination)
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "content",
    params(ListParams),
    responses(
        (status = 200, description = "Published posts, newest first", body = PostListDto),
        (status = 500, description = "Content store error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<PostListDto>> {
    let paged = state
        .content_service
        .list_posts(params.category.as_deref(), params.page())
        .await?;
    let (items, pagination) = split_page(paged);
    Ok(Json(PostListDto { items, pagination }))
}

#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "content",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = Object),
        (status = 404, description = "No published post with this slug"),
        (status = 500, description = "Content store error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.content_service.get_post(&slug).await?))
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "content",
    params(ListParams),
    responses(
        (status = 200, description = "Published projects, newest first", body = ProjectListDto),
        (status = 500, description = "Content store error")
    )
)]
pub(crate) async fn list_projects(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ProjectListDto>> {
    let paged = state
        .content_service
        .list_projects(params.category.as_deref(), params.page())
        .await?;
    let (items, pagination) = split_page(paged);
    Ok(Json(ProjectListDto { items, pagination }))
}

#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    tag = "content",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Project", body = Object),
        (status = 404, description = "No published project with this slug"),
        (status = 500, description = "Content store error")
    )
)]
pub(crate) async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.content_service.get_project(&slug).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "content",
    responses(
        (status = 200, description = "Categories by display order", body = Vec<Object>),
        (status = 500, description = "Content store error")
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.content_service.list_categories().await?))
}

#[utoipa::path(
    get,
    path = "/api/workplace-policy",
    tag = "content",
    responses(
        (status = 200, description = "Workplace policy", body = Object),
        (status = 404, description = "Policy not published"),
        (status = 500, description = "Content store error or duplicate policy")
    )
)]
pub(crate) async fn workplace_policy(
    State(state): State<AppState>,
) -> AppResult<Json<WorkplacePolicy>> {
    Ok(Json(state.content_service.workplace_policy().await?))
}
