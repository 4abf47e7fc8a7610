pub(crate) mod content_query;
pub(crate) mod content_store;
pub(crate) mod mail_relay;
pub(crate) mod repositories;
pub(crate) mod user_repository;
