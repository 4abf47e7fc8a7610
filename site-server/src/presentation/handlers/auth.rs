use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::extract::AppJson;
use crate::presentation::handlers::{MessageDto, UserDto};
use crate::presentation::middleware::auth::AuthenticatedUser;

type SetCookie = [(header::HeaderName, HeaderValue); 1];

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 2, max = 64, message = "must be 2..64 chars"))]
    pub(crate) name: String,
    #[validate(email(message = "must be a valid email"))]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8..128 chars"))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(email(message = "must be a valid email"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RegisterResponseDto {
    pub(crate) success: bool,
    pub(crate) message: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) success: bool,
    pub(crate) user: UserDto,
    pub(crate) access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MeResponseDto {
    pub(crate) success: bool,
    pub(crate) user: UserDto,
}

fn session_cookie(state: &AppState, result: &AuthResult) -> AppResult<SetCookie> {
    let cookie = state
        .session_cookie
        .issue(&result.access_token, state.auth_service.session_ttl_seconds())
        .map_err(anyhow::Error::from)?;
    Ok([(header::SET_COOKIE, cookie)])
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered and signed in", body = RegisterResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    AppJson(dto): AppJson<RegisterDto>,
) -> AppResult<(StatusCode, SetCookie, Json<RegisterResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        name: dto.name,
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.register(req).await?;
    let cookie = session_cookie(&state, &result)?;

    Ok((
        StatusCode::CREATED,
        cookie,
        Json(RegisterResponseDto {
            success: true,
            message: "account created".to_string(),
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(dto): AppJson<LoginDto>,
) -> AppResult<(StatusCode, SetCookie, Json<LoginResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let cookie = session_cookie(&state, &result)?;
    info!(user_id = result.user.id, "user signed in");

    Ok((
        StatusCode::OK,
        cookie,
        Json(LoginResponseDto {
            success: true,
            access_token: result.access_token,
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageDto)
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, SetCookie, Json<MessageDto>)> {
    let cookie = state
        .session_cookie
        .clear()
        .map_err(anyhow::Error::from)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageDto::ok("logged out")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status = 200, description = "Current user", body = MeResponseDto),
        (status = 401, description = "No valid session")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    session: AuthenticatedUser,
) -> AppResult<Json<MeResponseDto>> {
    let user = state
        .auth_service
        .current_user(session.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(MeResponseDto {
        success: true,
        user: user.into(),
    }))
}
