pub(crate) mod mail;
pub(crate) mod postgres;
pub(crate) mod sanity;
