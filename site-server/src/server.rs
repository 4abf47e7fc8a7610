use axum::{Router, middleware};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::limits::{Limits, apply_limits};
use crate::presentation::middleware::route_guard::route_guard;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, Limits::from(settings));
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// All routes behind the route guard, including the fallback.
pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state.clone())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state, route_guard))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::domain::user::Role;
    use crate::test_support::{
        TestApp, expired_session_token_for, post_json, project_json, sample_user,
        session_token_for, test_app,
    };

    fn app() -> (Router, TestApp) {
        let test = test_app(Duration::ZERO);
        (build_router(test.state.clone()), test)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("site_session={token}"));
        }
        builder.body(Body::empty()).expect("request")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header")
    }

    #[tokio::test]
    async fn register_with_short_password_reports_field_error() {
        let (router, test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({ "name": "Valid User", "email": "valid@example.com", "password": "short" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["errors"]["password"].is_array());
        assert!(test.users.take_created_input().is_none());
    }

    #[tokio::test]
    async fn register_without_password_reports_missing_field() {
        let (router, test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({ "name": "Valid User", "email": "valid@example.com" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"]["password"][0], "is required");
        assert!(test.users.take_created_input().is_none());
    }

    #[tokio::test]
    async fn non_numeric_page_is_json_400() {
        let (router, _test) = app();
        let response = router
            .oneshot(get("/api/posts?page=abc", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn register_sets_session_cookie() {
        let (router, _test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({ "name": "Valid User", "email": "valid@example.com", "password": "very-secure-password" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("set-cookie");
        assert!(cookie.starts_with("site_session="));
        assert!(cookie.contains("HttpOnly"));
        assert_eq!(body_json(response).await["user"]["role"], "USER");
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let (router, test) = app();
        test.users.set_create_conflict(true);

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({ "name": "Valid User", "email": "valid@example.com", "password": "very-secure-password" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn me_without_session_is_unauthorized() {
        let (router, _test) = app();
        let response = router
            .oneshot(get("/api/auth/me", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_with_session_cookie_returns_user() {
        let (router, _test) = app();
        let token = session_token_for(&sample_user(1, "Valid User", "valid@example.com", Role::User));

        let response = router
            .oneshot(get("/api/auth/me", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["user"]["email"], "valid@example.com");
    }

    #[tokio::test]
    async fn nlp_returns_fixed_payload() {
        let (router, _test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/nlp/analyze",
                json!({ "text": "great product" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["sentiment"]["label"], "positive");
    }

    #[tokio::test]
    async fn malformed_vision_body_reports_endpoint_failure() {
        let (router, _test) = app();
        let response = router
            .oneshot(
                Request::post("/api/vision/analyze")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to analyze image");
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_to_login_with_callback() {
        let (router, _test) = app();
        let response = router
            .oneshot(get("/Dashboard/?tab=traffic", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            location(&response),
            "/login?callbackUrl=https%3A%2F%2Fsite.example%2FDashboard%2F%3Ftab%3Dtraffic"
        );
    }

    #[tokio::test]
    async fn expired_session_is_treated_as_anonymous() {
        let user = sample_user(1, "Valid User", "valid@example.com", Role::User);
        let token = expired_session_token_for(&user);

        let (router, _test) = app();
        let response = router
            .oneshot(get("/dashboard", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(location(&response).starts_with("/login?callbackUrl="));

        let (router, _test) = app();
        let response = router
            .oneshot(get("/api/auth/me", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signed_in_user_sees_dashboard() {
        let (router, _test) = app();
        let token = session_token_for(&sample_user(1, "Valid User", "valid@example.com", Role::User));

        let response = router
            .oneshot(get("/dashboard", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["email"], "valid@example.com");
    }

    #[tokio::test]
    async fn non_admin_is_sent_to_landing_page() {
        let (router, _test) = app();
        let token = session_token_for(&sample_user(1, "Valid User", "valid@example.com", Role::User));

        let response = router
            .oneshot(get("/admin", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn admin_sees_user_overview() {
        let (router, test) = app();
        test.users.set_listed_users(vec![sample_user(
            2,
            "Second User",
            "second@example.com",
            Role::User,
        )]);
        let token =
            session_token_for(&sample_user(9, "Root Admin", "root@example.com", Role::Admin));

        let response = router
            .oneshot(get("/admin", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_users"], 1);
        assert_eq!(body["recent_users"][0]["email"], "second@example.com");
    }

    #[tokio::test]
    async fn legacy_solutions_path_redirects_permanently() {
        let (router, _test) = app();
        let response = router
            .oneshot(get("/solutions", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), "/solutions/ai-consulting");
    }

    #[tokio::test]
    async fn post_list_carries_pagination_links() {
        let (router, test) = app();
        test.content.push_result(json!([post_json("a")]));
        test.content.push_result(json!(25));

        let response = router
            .oneshot(get("/api/posts?category=ai&page=2", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["items"][0]["slug"], "a");
        assert_eq!(body["pagination"]["total_pages"], 3);
        assert_eq!(body["pagination"]["previous"], "/blog/?category=ai&page=1");
        assert_eq!(body["pagination"]["next"], "/blog/?category=ai&page=3");
    }

    #[tokio::test]
    async fn malformed_documents_do_not_break_listings() {
        let (router, test) = app();
        let mut broken = project_json("broken");
        broken["images"] = json!([]);
        test.content.push_result(json!([project_json("good"), broken]));
        test.content.push_result(json!(2));

        let response = router
            .oneshot(get("/api/projects", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["items"][0]["slug"], "good");

        let (router, test) = app();
        let mut orphaned = post_json("orphaned");
        orphaned["categories"] = json!([null]);
        test.content.push_result(json!([orphaned]));
        test.content.push_result(json!(1));

        let response = router
            .oneshot(get("/api/posts", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["items"][0]["categories"], json!([]));
    }

    #[tokio::test]
    async fn missing_post_is_404() {
        let (router, test) = app();
        test.content.push_result(json!(null));

        let response = router
            .oneshot(get("/api/posts/unknown", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn contact_form_is_forwarded_to_relay() {
        let (router, test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/contact",
                json!({
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "company": "Acme",
                    "message": "We would like to talk about a project."
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let sent = test.mail.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New inquiry from Jane Doe (Acme)");
    }

    #[tokio::test]
    async fn vitals_sample_is_acknowledged() {
        let (router, _test) = app();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/vitals",
                json!({ "name": "LCP", "value": 1834.2, "rating": "good", "navigationType": "navigate" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (router, _test) = app();
        let response = router
            .oneshot(get("/api/nothing-here", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn healthz_is_public() {
        let (router, _test) = app();
        let response = router.oneshot(get("/healthz", None)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
