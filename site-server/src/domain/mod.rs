pub(crate) mod contact;
pub(crate) mod content;
pub(crate) mod error;
pub(crate) mod pagination;
pub(crate) mod user;
