use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::application::dashboard_service::{AnalyticsSnapshot, Metric, SeriesPoint};
use crate::application::insight_service::{
    DetectedObject, Entity, Forecast, ForecastAccuracy, ForecastInput, ForecastPoint,
    ImageAnalysis, ImageAnalysisInput, ScoredLabel, TextAnalysis, TextAnalysisInput,
};
use crate::presentation::handlers::auth::{
    LoginDto, LoginResponseDto, MeResponseDto, RegisterDto, RegisterResponseDto,
};
use crate::presentation::handlers::contact::{ContactDto, VitalsAckDto, VitalsDto};
use crate::presentation::handlers::content::{PaginationDto, PostListDto, ProjectListDto};
use crate::presentation::handlers::insights::{
    ForecastResponse, ImageAnalysisResponse, TextAnalysisResponse,
};
use crate::presentation::handlers::pages::{AdminOverviewDto, DashboardDto};
use crate::presentation::handlers::{MessageDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::content::list_posts,
        crate::presentation::handlers::content::get_post,
        crate::presentation::handlers::content::list_projects,
        crate::presentation::handlers::content::get_project,
        crate::presentation::handlers::content::list_categories,
        crate::presentation::handlers::content::workplace_policy,
        crate::presentation::handlers::insights::analyze_text,
        crate::presentation::handlers::insights::forecast,
        crate::presentation::handlers::insights::analyze_image,
        crate::presentation::handlers::contact::submit_contact,
        crate::presentation::handlers::contact::report_vitals,
        crate::presentation::handlers::pages::dashboard,
        crate::presentation::handlers::pages::admin
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            RegisterResponseDto,
            LoginResponseDto,
            MeResponseDto,
            UserDto,
            MessageDto,
            PaginationDto,
            PostListDto,
            ProjectListDto,
            TextAnalysisInput,
            ForecastInput,
            ImageAnalysisInput,
            TextAnalysis,
            ScoredLabel,
            Entity,
            Forecast,
            ForecastPoint,
            ForecastAccuracy,
            ImageAnalysis,
            DetectedObject,
            TextAnalysisResponse,
            ForecastResponse,
            ImageAnalysisResponse,
            ContactDto,
            VitalsDto,
            VitalsAckDto,
            AnalyticsSnapshot,
            Metric,
            SeriesPoint,
            DashboardDto,
            AdminOverviewDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and session endpoints"),
        (name = "content", description = "Posts, projects and pages from the content store"),
        (name = "insights", description = "Placeholder AI endpoints"),
        (name = "site", description = "Contact form and web vitals"),
        (name = "pages", description = "Session-gated pages")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("site_session"))),
        );
        openapi.components = Some(components);
    }
}
