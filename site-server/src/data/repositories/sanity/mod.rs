pub(crate) mod content_store;
