pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod limits;
pub(crate) mod route_guard;
pub(crate) mod session;
pub(crate) mod trace;
