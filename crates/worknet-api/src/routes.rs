//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::applications::{list_applications, submit_application};
use crate::handlers::auth::{login, logout, register, session_status};
use crate::handlers::courses::{
    create_course, delete_course, get_course, list_courses, update_course,
};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::handlers::plans::{
    cancel_subscription, create_subscription, list_plans, list_subscriptions,
};
use crate::handlers::profiles::{get_profile, update_profile};
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/status", get(session_status));

    let profile_routes = Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs", post(create_job))
        .route("/jobs/:job_id", get(get_job))
        .route("/jobs/:job_id", put(update_job))
        .route("/jobs/:job_id", delete(delete_job));

    let application_routes = Router::new()
        .route("/applications", get(list_applications))
        .route("/applications", post(submit_application));

    let course_routes = Router::new()
        .route("/courses", get(list_courses))
        .route("/courses", post(create_course))
        .route("/courses/:course_id", get(get_course))
        .route("/courses/:course_id", put(update_course))
        .route("/courses/:course_id", delete(delete_course));

    let plan_routes = Router::new()
        .route("/plans", get(list_plans))
        .route("/subscriptions", get(list_subscriptions))
        .route("/subscriptions", post(create_subscription))
        .route("/subscriptions/:subscription_id/cancel", post(cancel_subscription));

    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(profile_routes)
        .merge(job_routes)
        .merge(application_routes)
        .merge(course_routes)
        .merge(plan_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
