use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod test_support;

use application::auth_service::AuthService;
use application::contact_service::ContactService;
use application::content_service::{ContentService, PageSizes};
use application::dashboard_service::DashboardService;
use application::insight_service::InsightService;
use data::repositories::mail::http_relay::HttpMailRelay;
use data::repositories::mail::log_relay::LogMailRelay;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use data::repositories::sanity::content_store::SanityContentStore;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::middleware::route_guard::RoutePolicy;
use presentation::middleware::session::SessionCookie;
use presentation::{AppState, SharedContentStore, SharedMailRelay, SharedUserRepository};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let upstream_timeout = Duration::from_secs(settings.upstream_timeout_secs);

    let user_repo: SharedUserRepository = Arc::new(PostgresUserRepository::new(pool));
    let content_store: SharedContentStore = Arc::new(SanityContentStore::new(
        settings.content.sanity.clone(),
        upstream_timeout,
    )?);
    let mail_relay: SharedMailRelay = match settings.mail.clone() {
        Some(config) => Arc::new(HttpMailRelay::new(config, upstream_timeout)?),
        None => {
            info!("MAIL_API_KEY not set, contact messages will only be logged");
            Arc::new(LogMailRelay)
        }
    };

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    let state = AppState::new(
        Arc::new(AuthService::new(user_repo.clone(), jwt)),
        Arc::new(ContentService::new(
            content_store,
            PageSizes {
                posts: settings.content.posts_per_page,
                projects: settings.content.projects_per_page,
            },
        )),
        Arc::new(InsightService::new(Duration::from_millis(
            settings.mock_latency_ms,
        ))),
        Arc::new(ContactService::new(mail_relay)),
        Arc::new(DashboardService::new(user_repo)),
        Arc::new(RoutePolicy::from_settings(&settings)),
        Arc::new(SessionCookie::from(&settings.session)),
    );

    server::run_http(&settings, state).await
}
