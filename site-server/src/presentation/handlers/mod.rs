use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::user::User;

pub(crate) mod auth;
pub(crate) mod contact;
pub(crate) mod content;
pub(crate) mod insights;
pub(crate) mod pages;

/// `{success, message}` acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) success: bool,
    pub(crate) message: String,
}

impl MessageDto {
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    #[schema(example = "USER")]
    pub(crate) role: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}
