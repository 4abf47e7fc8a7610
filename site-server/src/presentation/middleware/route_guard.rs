//! Per-request route classification.
//!
//! Every request passes through [`route_guard`] before routing. The path is
//! normalized once (lowercase, no trailing slash) and then checked, in order,
//! against the legacy aliases, the protected prefixes and the admin prefixes.

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use url::form_urlencoded;

use crate::infrastructure::jwt::Claims;
use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Fixed aliases, matched against the normalized path.
pub(crate) const LEGACY_REDIRECTS: &[(&str, &str)] = &[("/solutions", "/solutions/ai-consulting")];

#[derive(Debug, Clone)]
pub(crate) struct RoutePolicy {
    pub(crate) protected_paths: Vec<String>,
    pub(crate) admin_paths: Vec<String>,
    pub(crate) login_path: String,
    pub(crate) landing_path: String,
    pub(crate) public_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RouteDecision {
    Continue,
    /// 308, independent of the session.
    Legacy(String),
    /// 307 to the login page with a callback.
    Login(String),
    /// 307 to the landing page.
    Landing(String),
}

impl RouteDecision {
    fn into_redirect(self) -> Option<Response> {
        match self {
            RouteDecision::Continue => None,
            RouteDecision::Legacy(location) => Some(Redirect::permanent(&location).into_response()),
            RouteDecision::Login(location) | RouteDecision::Landing(location) => {
                Some(Redirect::temporary(&location).into_response())
            }
        }
    }
}

impl RoutePolicy {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let normalize_all = |paths: &[String]| -> Vec<String> {
            paths.iter().map(|path| normalize_path(path)).collect()
        };

        Self {
            protected_paths: normalize_all(&settings.routes.protected_paths),
            admin_paths: normalize_all(&settings.routes.admin_paths),
            login_path: settings.routes.login_path.clone(),
            landing_path: settings.routes.landing_path.clone(),
            public_url: settings.public_url.clone(),
        }
    }

    pub(crate) fn decide(&self, uri: &Uri, claims: Option<&Claims>) -> RouteDecision {
        let path = normalize_path(uri.path());

        if let Some((_, target)) = LEGACY_REDIRECTS.iter().find(|(alias, _)| *alias == path) {
            let location = match uri.query() {
                Some(query) => format!("{target}?{query}"),
                None => (*target).to_string(),
            };
            return RouteDecision::Legacy(location);
        }

        let is_protected = self
            .protected_paths
            .iter()
            .any(|prefix| matches_prefix(&path, prefix));
        if is_protected && claims.is_none() {
            return RouteDecision::Login(self.login_location(uri));
        }

        let is_admin_path = self
            .admin_paths
            .iter()
            .any(|prefix| matches_prefix(&path, prefix));
        if is_admin_path && !claims.is_some_and(Claims::is_admin) {
            return RouteDecision::Landing(self.landing_path.clone());
        }

        RouteDecision::Continue
    }

    fn login_location(&self, uri: &Uri) -> String {
        let requested = uri
            .path_and_query()
            .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", &format!("{}{requested}", self.public_url))
            .finish();
        format!("{}?{query}", self.login_path)
    }
}

/// Lowercase, trailing slashes removed; the root stays `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    trimmed.to_lowercase()
}

/// `path == prefix` or `path` continues below `prefix`; `/dashboardx` does not match `/dashboard`.
pub(crate) fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub(crate) async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = state
        .session_cookie
        .token_from(request.headers())
        .and_then(|token| state.auth_service.verify_session(&token));

    let decision = state.route_policy.decide(request.uri(), claims.as_ref());
    if let Some(redirect) = decision.clone().into_redirect() {
        debug!(path = %request.uri().path(), ?decision, "request redirected");
        return redirect;
    }

    if let Some(claims) = claims {
        request
            .extensions_mut()
            .insert(AuthenticatedUser::from(claims));
    }

    next.run(request).await
}
