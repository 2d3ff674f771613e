//! API integration tests: the real router over an in-memory SQLite store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use worknet_api::{create_router, ApiConfig, AppState};

async fn test_app() -> Router {
    let config = ApiConfig {
        database_url: "sqlite::memory:".to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = format!("Bearer {token}").parse().unwrap();
    request.headers_mut().insert(header::AUTHORIZATION, value);
    request
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 2 * 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register an account and log in; returns the session token.
async fn register_and_login(app: &Router, email: &str, role: &str, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": email,
                "password": "a very good password",
                "role": role,
                "name": name,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "a very good password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "sqlite");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let app = test_app().await;
    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_validation_and_conflicts() {
    let app = test_app().await;

    // Happy path
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "ana@example.com",
                "password": "a very good password",
                "role": "candidate",
                "name": "Ana",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["user_id"].as_i64().unwrap() > 0);

    // Same email again
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "ana@example.com",
                "password": "a very good password",
                "role": "company",
                "name": "Other",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Unknown role
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "b@example.com",
                "password": "a very good password",
                "role": "wizard",
                "name": "B",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Password too short
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "c@example.com",
                "password": "short",
                "role": "candidate",
                "name": "C",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_sets_cookie_and_rejects_bad_credentials() {
    let app = test_app().await;
    register_and_login(&app, "ana@example.com", "candidate", "Ana").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "ana@example.com", "password": "a very good password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("worknet_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "candidate");
    assert_eq!(body["user"]["name"], "Ana");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "ana@example.com", "password": "wrong password!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "ghost@example.com", "password": "a very good password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_status() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/api/auth/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["logged_in"], false);

    let token = register_and_login(&app, "ana@example.com", "candidate", "Ana").await;
    let response = app
        .clone()
        .oneshot(with_bearer(get("/api/auth/status"), &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["logged_in"], true);
    assert_eq!(body["role"], "candidate");

    // The cookie works as well as the Bearer header
    let mut request = get("/api/auth/status");
    let value = format!("worknet_session={token}").parse().unwrap();
    request.headers_mut().insert(header::COOKIE, value);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["logged_in"], true);
}

#[tokio::test]
async fn test_job_creation_requires_company_role() {
    let app = test_app().await;

    // No session
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", json!({ "title": "Dev" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Candidate session
    let candidate = register_and_login(&app, "ana@example.com", "candidate", "Ana").await;
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/jobs", json!({ "title": "Dev" })),
            &candidate,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Company session
    let company = register_and_login(&app, "hr@acme.com", "company", "Acme").await;
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "POST",
                "/api/jobs",
                json!({ "title": "Backend dev", "area": "engineering", "location": "Lisbon" }),
            ),
            &company,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["job_id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_job_listing_and_filters_are_public() {
    let app = test_app().await;
    let company = register_and_login(&app, "hr@acme.com", "company", "Acme").await;

    for (title, area) in [("Backend dev", "engineering"), ("Designer", "design")] {
        let response = app
            .clone()
            .oneshot(with_bearer(
                json_request("POST", "/api/jobs", json!({ "title": title, "area": area })),
                &company,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/jobs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["company_name"], "Acme");

    let response = app
        .clone()
        .oneshot(get("/api/jobs?area=engineering"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Backend dev");
}

#[tokio::test]
async fn test_job_update_enforces_ownership() {
    let app = test_app().await;
    let owner = register_and_login(&app, "hr@acme.com", "company", "Acme").await;
    let intruder = register_and_login(&app, "hr@rival.com", "company", "Rival").await;

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/jobs", json!({ "title": "Backend dev" })),
            &owner,
        ))
        .await
        .unwrap();
    let job_id = body_json(response).await["job_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "PUT",
                &format!("/api/jobs/{job_id}"),
                json!({ "title": "Hijacked" }),
            ),
            &intruder,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "PUT",
                &format!("/api/jobs/{job_id}"),
                json!({ "title": "Senior backend dev" }),
            ),
            &owner,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Senior backend dev");

    let response = app
        .clone()
        .oneshot(with_bearer(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
            &owner,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/jobs/{job_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_application_flow() {
    let app = test_app().await;
    let company = register_and_login(&app, "hr@acme.com", "company", "Acme").await;
    let candidate = register_and_login(&app, "ana@example.com", "candidate", "Ana").await;

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/jobs", json!({ "title": "Backend dev" })),
            &company,
        ))
        .await
        .unwrap();
    let job_id = body_json(response).await["job_id"].as_i64().unwrap();

    // Companies cannot apply
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/applications", json!({ "job_id": job_id })),
            &company,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Candidate applies
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "POST",
                "/api/applications",
                json!({ "job_id": job_id, "message": "I would love to join" }),
            ),
            &candidate,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Second application to the same job
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/applications", json!({ "job_id": job_id })),
            &candidate,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Unknown job
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/applications", json!({ "job_id": 424242 })),
            &candidate,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Candidate sees their application with the job title
    let response = app
        .clone()
        .oneshot(with_bearer(get("/api/applications"), &candidate))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["job_title"], "Backend dev");

    // Company sees it with the candidate name
    let response = app
        .clone()
        .oneshot(with_bearer(get("/api/applications"), &company))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["candidate_name"], "Ana");
}

#[tokio::test]
async fn test_course_flow_and_free_filter() {
    let app = test_app().await;
    let institution = register_and_login(&app, "uni@example.com", "institution", "Uni").await;

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "POST",
                "/api/courses",
                json!({ "title": "Intro to SQL", "category": "data", "price": 0.0 }),
            ),
            &institution,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "POST",
                "/api/courses",
                json!({ "title": "Advanced Rust", "category": "programming", "price": 249.9 }),
            ),
            &institution,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/api/courses?is_free=true"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Intro to SQL");
    assert_eq!(body[0]["is_free"], true);
    assert_eq!(body[0]["institution_name"], "Uni");
}

#[tokio::test]
async fn test_plans_and_subscriptions() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/api/plans")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let response = app
        .clone()
        .oneshot(get("/api/plans?plan_type=company"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let company_plans = body.as_array().unwrap();
    assert_eq!(company_plans.len(), 2);
    let plan_id = company_plans[0]["id"].as_i64().unwrap();

    // A candidate cannot take a company plan
    let candidate = register_and_login(&app, "ana@example.com", "candidate", "Ana").await;
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/subscriptions", json!({ "plan_id": plan_id })),
            &candidate,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The right audience can
    let company = register_and_login(&app, "hr@acme.com", "company", "Acme").await;
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("POST", "/api/subscriptions", json!({ "plan_id": plan_id })),
            &company,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let subscription_id = body_json(response).await["subscription_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "POST",
                &format!("/api/subscriptions/{subscription_id}/cancel"),
                json!({}),
            ),
            &company,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "canceled");
}

#[tokio::test]
async fn test_profile_get_and_update() {
    let app = test_app().await;
    let token = register_and_login(&app, "ana@example.com", "candidate", "Ana").await;

    let response = app
        .clone()
        .oneshot(with_bearer(get("/api/profile"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert!(body["user"]["password_hash"].is_null());
    assert!(body["profile"]["user_id"].as_i64().unwrap() > 0);

    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request(
                "PUT",
                "/api/profile",
                json!({ "professional_title": "Backend Engineer", "experience_years": 6 }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["professional_title"], "Backend Engineer");

    // Unknown fields are rejected
    let response = app
        .clone()
        .oneshot(with_bearer(
            json_request("PUT", "/api/profile", json!({ "favorite_color": "blue" })),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = test_app().await;
    register_and_login(&app, "ana@example.com", "candidate", "Ana").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("worknet_session="));
    assert!(cookie.contains("Max-Age=0") || cookie.contains("Expires"));
}
