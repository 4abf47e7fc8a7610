use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::contact_service::ContactService;
use crate::application::content_service::ContentService;
use crate::application::dashboard_service::DashboardService;
use crate::application::insight_service::InsightService;
use crate::data::content_store::ContentStore;
use crate::data::mail_relay::MailRelay;
use crate::data::user_repository::UserRepository;
use crate::presentation::middleware::route_guard::RoutePolicy;
use crate::presentation::middleware::session::SessionCookie;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type SharedUserRepository = Arc<dyn UserRepository>;
pub(crate) type SharedContentStore = Arc<dyn ContentStore>;
pub(crate) type SharedMailRelay = Arc<dyn MailRelay>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<SharedUserRepository>>,
    pub(crate) content_service: Arc<ContentService<SharedContentStore>>,
    pub(crate) insight_service: Arc<InsightService>,
    pub(crate) contact_service: Arc<ContactService<SharedMailRelay>>,
    pub(crate) dashboard_service: Arc<DashboardService<SharedUserRepository>>,
    pub(crate) route_policy: Arc<RoutePolicy>,
    pub(crate) session_cookie: Arc<SessionCookie>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<SharedUserRepository>>,
        content_service: Arc<ContentService<SharedContentStore>>,
        insight_service: Arc<InsightService>,
        contact_service: Arc<ContactService<SharedMailRelay>>,
        dashboard_service: Arc<DashboardService<SharedUserRepository>>,
        route_policy: Arc<RoutePolicy>,
        session_cookie: Arc<SessionCookie>,
    ) -> Self {
        Self {
            auth_service,
            content_service,
            insight_service,
            contact_service,
            dashboard_service,
            route_policy,
            session_cookie,
        }
    }
}
