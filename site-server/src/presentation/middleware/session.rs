use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderValue};

use crate::infrastructure::settings::SessionSettings;

/// Session cookie attributes.
#[derive(Debug, Clone)]
pub(crate) struct SessionCookie {
    pub(crate) name: String,
    pub(crate) secure: bool,
}

impl From<&SessionSettings> for SessionCookie {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            name: settings.cookie_name.clone(),
            secure: settings.cookie_secure,
        }
    }
}

impl SessionCookie {
    pub(crate) fn issue(&self, token: &str, max_age_secs: i64) -> Result<HeaderValue, InvalidHeaderValue> {
        self.header(token, max_age_secs)
    }

    pub(crate) fn clear(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        self.header("", 0)
    }

    fn header(&self, value: &str, max_age_secs: i64) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}",
            self.name
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// Token from `Authorization: Bearer ..`, falling back to the session cookie.
    pub(crate) fn token_from(&self, headers: &HeaderMap) -> Option<String> {
        bearer_token(headers).or_else(|| cookie_value(headers, &self.name))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::SessionCookie;

    fn cookie(secure: bool) -> SessionCookie {
        SessionCookie {
            name: "site_session".to_string(),
            secure,
        }
    }

    #[test]
    fn token_is_read_from_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; site_session=abc.def.ghi; other=1"),
        );
        assert_eq!(cookie(false).token_from(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer header.token"));
        headers.insert(header::COOKIE, HeaderValue::from_static("site_session=cookie.token"));
        assert_eq!(cookie(false).token_from(&headers).as_deref(), Some("header.token"));
    }

    #[test]
    fn malformed_authorization_and_empty_cookie_yield_nothing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("site_session="));
        assert!(cookie(false).token_from(&headers).is_none());
    }

    #[test]
    fn issued_cookie_is_http_only_and_optionally_secure() {
        let plain = cookie(false).issue("tok", 3600).expect("valid header");
        assert_eq!(
            plain.to_str().expect("ascii"),
            "site_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );

        let cleared = cookie(true).clear().expect("valid header");
        assert!(cleared.to_str().expect("ascii").ends_with("Max-Age=0; Secure"));
    }
}
