pub(crate) mod http_relay;
pub(crate) mod log_relay;
