use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::contact::ContactMessage;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::AppJson;
use crate::presentation::handlers::MessageDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ContactDto {
    #[validate(length(min = 1, max = 100, message = "must be 1..100 chars"))]
    pub(crate) name: String,
    #[validate(email(message = "must be a valid email"))]
    pub(crate) email: String,
    #[validate(length(max = 200, message = "must be at most 200 chars"))]
    pub(crate) company: Option<String>,
    #[validate(length(min = 10, max = 5000, message = "must be 10..5000 chars"))]
    pub(crate) message: String,
}

/// One web-vitals sample reported by the browser.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct VitalsDto {
    #[validate(length(min = 1, max = 32, message = "must be 1..32 chars"))]
    pub(crate) name: String,
    pub(crate) value: f64,
    pub(crate) id: Option<String>,
    pub(crate) rating: Option<String>,
    #[serde(rename = "navigationType")]
    pub(crate) navigation_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct VitalsAckDto {
    pub(crate) success: bool,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "site",
    request_body = ContactDto,
    responses(
        (status = 200, description = "Message forwarded", body = MessageDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Mail relay failure")
    )
)]
pub(crate) async fn submit_contact(
    State(state): State<AppState>,
    AppJson(dto): AppJson<ContactDto>,
) -> AppResult<Json<MessageDto>> {
    dto.validate()?;

    state
        .contact_service
        .submit(ContactMessage {
            name: dto.name,
            email: dto.email,
            company: dto.company,
            message: dto.message,
        })
        .await?;

    Ok(Json(MessageDto::ok("message sent")))
}

#[utoipa::path(
    post,
    path = "/api/vitals",
    tag = "site",
    request_body = VitalsDto,
    responses(
        (status = 200, description = "Sample logged", body = VitalsAckDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn report_vitals(
    AppJson(dto): AppJson<VitalsDto>,
) -> AppResult<Json<VitalsAckDto>> {
    dto.validate()?;

    info!(
        metric = %dto.name,
        value = dto.value,
        id = dto.id.as_deref().unwrap_or("-"),
        rating = dto.rating.as_deref().unwrap_or("-"),
        navigation_type = dto.navigation_type.as_deref().unwrap_or("-"),
        "web vitals sample"
    );

    Ok(Json(VitalsAckDto { success: true }))
}
