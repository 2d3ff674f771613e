//! Authentication handlers: register, login, logout, session status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use validator::Validate;

use worknet_models::{UserRole, UserSummary};

use crate::auth::{issue_session_token, AuthUser, SESSION_COOKIE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// One of candidate/company/institution.
    pub role: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Register a new account. The role decides which profile table gets the
/// companion row.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    request.validate()?;

    let role = UserRole::parse(&request.role)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown role '{}'", request.role)))?;

    let user_id = state
        .accounts
        .register(
            &request.email,
            &request.password,
            role,
            &request.name,
            request.phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    /// Session token, also set as an HttpOnly cookie.
    pub token: String,
    pub user: UserSummary,
}

/// Log in and establish a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let user = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?;

    let token = issue_session_token(&state.config, &user)?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.is_production())
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            user: UserSummary::from(&user),
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// Clear the session cookie. The token itself simply expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Json(LogoutResponse { logged_out: true }))
}

/// Session status response.
#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Report whether the caller holds a valid session.
pub async fn session_status(user: Option<AuthUser>) -> Json<SessionStatusResponse> {
    match user {
        Some(user) => Json(SessionStatusResponse {
            logged_in: true,
            user_id: Some(user.user_id),
            role: Some(user.role),
            name: Some(user.name),
        }),
        None => Json(SessionStatusResponse {
            logged_in: false,
            user_id: None,
            role: None,
            name: None,
        }),
    }
}
