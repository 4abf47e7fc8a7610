use anyhow::{Context, Result, anyhow};

use crate::data::repositories::mail::http_relay::MailRelayConfig;
use crate::data::repositories::sanity::content_store::SanityConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub public_url: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub upstream_timeout_secs: u64,
    pub session: SessionSettings,
    pub routes: RouteSettings,
    pub content: ContentSettings,
    pub mail: Option<MailRelayConfig>,
    pub mock_latency_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone)]
pub struct RouteSettings {
    pub protected_paths: Vec<String>,
    pub admin_paths: Vec<String>,
    pub login_path: String,
    pub landing_path: String,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub sanity: SanityConfig,
    pub posts_per_page: u32,
    pub projects_per_page: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        let jwt_ttl_seconds: i64 = std::env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();
        let cors_origins = parse_list(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let upstream_timeout_secs = parse_u64_env("UPSTREAM_TIMEOUT_SECS", 8)?;

        let mock_latency_ms: u64 = std::env::var("MOCK_LATENCY_MS")
            .unwrap_or_else(|_| "1500".to_string())
            .parse()
            .context("Failed to parse MOCK_LATENCY_MS, expecting integer")?;
        if mock_latency_ms / 1000 >= http_request_timeout_secs {
            return Err(anyhow!(
                "MOCK_LATENCY_MS must be below HTTP_REQUEST_TIMEOUT_SECS"
            ));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            public_url,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            upstream_timeout_secs,
            session: SessionSettings::from_env()?,
            routes: RouteSettings::from_env()?,
            content: ContentSettings::from_env()?,
            mail: mail_from_env()?,
            mock_latency_ms,
        })
    }
}

impl SessionSettings {
    fn from_env() -> Result<Self> {
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "site_session".to_string());
        if cookie_name.is_empty() || cookie_name.contains([';', '=', ' ']) {
            return Err(anyhow!("SESSION_COOKIE_NAME must be a plain token"));
        }
        Ok(Self {
            cookie_name,
            cookie_secure: parse_bool_env("SESSION_COOKIE_SECURE", false)?,
        })
    }
}

impl RouteSettings {
    fn from_env() -> Result<Self> {
        let protected_paths = parse_path_list(
            "PROTECTED_PATHS",
            std::env::var("PROTECTED_PATHS")
                .unwrap_or_else(|_| "/dashboard,/profile,/settings".to_string()),
        )?;
        let admin_paths = parse_path_list(
            "ADMIN_PATHS",
            std::env::var("ADMIN_PATHS").unwrap_or_else(|_| "/admin".to_string()),
        )?;
        let login_path = std::env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string());
        let landing_path =
            std::env::var("LANDING_PATH").unwrap_or_else(|_| "/dashboard".to_string());

        Ok(Self {
            protected_paths,
            admin_paths,
            login_path,
            landing_path,
        })
    }
}

impl ContentSettings {
    fn from_env() -> Result<Self> {
        let project_id =
            get_required("SANITY_PROJECT_ID").context("SANITY_PROJECT_ID is required")?;
        let dataset = std::env::var("SANITY_DATASET").unwrap_or_else(|_| "production".to_string());
        let api_version =
            std::env::var("SANITY_API_VERSION").unwrap_or_else(|_| "2024-01-01".to_string());
        let token = std::env::var("SANITY_API_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            sanity: SanityConfig {
                project_id,
                dataset,
                api_version,
                token,
                use_cdn: parse_bool_env("SANITY_USE_CDN", true)?,
            },
            posts_per_page: parse_u32_env("POSTS_PER_PAGE", 9)?,
            projects_per_page: parse_u32_env("PROJECTS_PER_PAGE", 9)?,
        })
    }
}

/// Mail relay is optional: without `MAIL_API_KEY` contact messages are only logged.
fn mail_from_env() -> Result<Option<MailRelayConfig>> {
    let Ok(api_key) = get_required("MAIL_API_KEY") else {
        return Ok(None);
    };
    Ok(Some(MailRelayConfig {
        api_url: std::env::var("MAIL_API_URL")
            .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
        api_key,
        from: get_required("MAIL_FROM").context("MAIL_FROM is required with MAIL_API_KEY")?,
        to: get_required("MAIL_TO").context("MAIL_TO is required with MAIL_API_KEY")?,
    }))
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_list(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_path_list(key: &str, raw: String) -> Result<Vec<String>> {
    let paths = parse_list(raw);
    if let Some(bad) = paths.iter().find(|path| !path.starts_with('/')) {
        return Err(anyhow!("{key} entries must start with '/': {bad}"));
    }
    Ok(paths)
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(anyhow!("Failed to parse {key}, expecting boolean")),
        },
        Err(_) => Ok(default),
    }
}

fn parse_u32_env(key: &str, default: u32) -> Result<u32> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
