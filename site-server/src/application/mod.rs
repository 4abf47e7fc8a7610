pub(crate) mod auth_service;
pub(crate) mod contact_service;
pub(crate) mod content_service;
pub(crate) mod dashboard_service;
pub(crate) mod insight_service;
