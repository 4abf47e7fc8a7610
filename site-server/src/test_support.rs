//! Hand-written fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use crate::application::auth_service::AuthService;
use crate::application::contact_service::ContactService;
use crate::application::content_service::{ContentService, PageSizes};
use crate::application::dashboard_service::DashboardService;
use crate::application::insight_service::InsightService;
use crate::data::content_query::GroqQuery;
use crate::data::content_store::ContentStore;
use crate::data::mail_relay::{MailRelay, OutgoingMail};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};
use crate::infrastructure::jwt::{Claims, JwtService};
use crate::presentation::AppState;
use crate::presentation::middleware::route_guard::RoutePolicy;
use crate::presentation::middleware::session::SessionCookie;

pub(crate) const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

pub(crate) fn test_jwt() -> JwtService {
    JwtService::new(TEST_SECRET, 3600)
}

pub(crate) fn sample_user(id: i64, name: &str, email: &str, role: Role) -> User {
    User::new(id, name.to_string(), email.to_string(), role, Utc::now())
        .expect("sample user must be valid")
}

pub(crate) fn session_token_for(user: &User) -> String {
    test_jwt().generate_token(user).expect("token must be issued")
}

/// Correctly signed token whose `exp` lies an hour in the past.
pub(crate) fn expired_session_token_for(user: &User) -> String {
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: (Utc::now() - chrono::Duration::hours(1)).timestamp(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token must encode")
}

pub(crate) fn post_json(slug: &str) -> Value {
    json!({
        "_id": format!("post-{slug}"),
        "title": format!("Post {slug}"),
        "slug": slug,
        "description": "Short description",
        "author": { "name": "Editor" },
        "categories": [{ "_id": "cat-ai", "title": "AI", "slug": "ai", "order": 1 }],
        "publishedAt": "2024-03-01T10:00:00Z"
    })
}

pub(crate) fn project_json(slug: &str) -> Value {
    json!({
        "_id": format!("project-{slug}"),
        "name": format!("Project {slug}"),
        "slug": slug,
        "images": [{ "assetRef": "image-1", "alt": "cover" }],
        "categories": [],
        "publishedAt": "2024-03-01T10:00:00Z",
        "_createdAt": "2024-02-01T10:00:00Z",
        "_updatedAt": "2024-02-02T10:00:00Z"
    })
}

#[derive(Clone)]
pub(crate) struct FakeUserRepo {
    created_input: Arc<Mutex<Option<NewUser>>>,
    login_credentials: Arc<Mutex<Option<UserCredentials>>>,
    listed_users: Arc<Mutex<Vec<User>>>,
    create_conflict: Arc<Mutex<bool>>,
    create_user_out: User,
}

impl FakeUserRepo {
    pub(crate) fn new(create_user_out: User) -> Self {
        Self {
            created_input: Arc::new(Mutex::new(None)),
            login_credentials: Arc::new(Mutex::new(None)),
            listed_users: Arc::new(Mutex::new(Vec::new())),
            create_conflict: Arc::new(Mutex::new(false)),
            create_user_out,
        }
    }

    pub(crate) fn set_login_credentials(&self, creds: Option<UserCredentials>) {
        *self
            .login_credentials
            .lock()
            .expect("login credentials mutex poisoned") = creds;
    }

    pub(crate) fn set_listed_users(&self, users: Vec<User>) {
        *self.listed_users.lock().expect("listed users mutex poisoned") = users;
    }

    pub(crate) fn set_create_conflict(&self, conflict: bool) {
        *self
            .create_conflict
            .lock()
            .expect("create conflict mutex poisoned") = conflict;
    }

    pub(crate) fn take_created_input(&self) -> Option<NewUser> {
        self.created_input
            .lock()
            .expect("created input mutex poisoned")
            .take()
    }
}

#[async_trait]
impl UserRepository for FakeUserRepo {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        if *self
            .create_conflict
            .lock()
            .expect("create conflict mutex poisoned")
        {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }
        *self
            .created_input
            .lock()
            .expect("created input mutex poisoned") = Some(input);
        Ok(self.create_user_out.clone())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .login_credentials
            .lock()
            .expect("login credentials mutex poisoned")
            .clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        if self.create_user_out.id == id {
            return Ok(Some(self.create_user_out.clone()));
        }
        Ok(self
            .listed_users
            .lock()
            .expect("listed users mutex poisoned")
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let users = self.listed_users.lock().expect("listed users mutex poisoned");
        Ok(users
            .iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> Result<i64, DomainError> {
        let users = self.listed_users.lock().expect("listed users mutex poisoned");
        Ok(users.len() as i64)
    }
}

/// Replays scripted results in order and records every executed query.
#[derive(Clone, Default)]
pub(crate) struct FakeContentStore {
    results: Arc<Mutex<VecDeque<Result<Value, DomainError>>>>,
    executed: Arc<Mutex<Vec<GroqQuery>>>,
}

impl FakeContentStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_result(&self, value: Value) {
        self.results
            .lock()
            .expect("results mutex poisoned")
            .push_back(Ok(value));
    }

    pub(crate) fn push_error(&self, err: DomainError) {
        self.results
            .lock()
            .expect("results mutex poisoned")
            .push_back(Err(err));
    }

    pub(crate) fn executed(&self) -> Vec<GroqQuery> {
        self.executed.lock().expect("executed mutex poisoned").clone()
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, DomainError> {
        self.executed
            .lock()
            .expect("executed mutex poisoned")
            .push(query.clone());
        self.results
            .lock()
            .expect("results mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::Unexpected("no scripted result".to_string())))
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeMailRelay {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    fail: bool,
}

impl FakeMailRelay {
    pub(crate) fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub(crate) fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl MailRelay for FakeMailRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::Upstream("mail relay: http status 503".to_string()));
        }
        self.sent.lock().expect("sent mutex poisoned").push(mail);
        Ok(())
    }
}

pub(crate) struct TestApp {
    pub(crate) state: AppState,
    pub(crate) users: FakeUserRepo,
    pub(crate) content: FakeContentStore,
    pub(crate) mail: FakeMailRelay,
}

pub(crate) fn test_policy() -> RoutePolicy {
    RoutePolicy {
        protected_paths: vec!["/dashboard".to_string(), "/profile".to_string()],
        admin_paths: vec!["/admin".to_string()],
        login_path: "/login".to_string(),
        landing_path: "/dashboard".to_string(),
        public_url: "https://site.example".to_string(),
    }
}

pub(crate) fn test_cookie() -> SessionCookie {
    SessionCookie {
        name: "site_session".to_string(),
        secure: false,
    }
}

pub(crate) fn test_app(mock_latency: Duration) -> TestApp {
    let users = FakeUserRepo::new(sample_user(1, "Valid User", "valid@example.com", Role::User));
    let content = FakeContentStore::new();
    let mail = FakeMailRelay::default();

    let user_repo: Arc<dyn UserRepository> = Arc::new(users.clone());
    let store: Arc<dyn ContentStore> = Arc::new(content.clone());
    let relay: Arc<dyn MailRelay> = Arc::new(mail.clone());

    let state = AppState::new(
        Arc::new(AuthService::new(user_repo.clone(), test_jwt())),
        Arc::new(ContentService::new(
            store,
            PageSizes {
                posts: 10,
                projects: 9,
            },
        )),
        Arc::new(InsightService::new(mock_latency)),
        Arc::new(ContactService::new(relay)),
        Arc::new(DashboardService::new(user_repo)),
        Arc::new(test_policy()),
        Arc::new(test_cookie()),
    );

    TestApp {
        state,
        users,
        content,
        mail,
    }
}
