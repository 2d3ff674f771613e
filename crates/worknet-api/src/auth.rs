//! Session token authentication.
//!
//! Login issues an HS256 JWT carrying the user's id, role, and display
//! name. The token travels either as an HttpOnly cookie (browser clients)
//! or as a Bearer header (API clients); the [`AuthUser`] extractor accepts
//! both.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use worknet_models::{User, UserRole};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "worknet_session";

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    /// Account role
    pub role: UserRole,
    /// Display name
    pub name: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: UserRole,
    pub name: String,
}

impl AuthUser {
    /// Reject callers whose role does not match.
    pub fn require_role(&self, role: UserRole) -> ApiResult<()> {
        if self.role != role {
            return Err(ApiError::forbidden(format!(
                "this operation requires a {} account",
                role
            )));
        }
        Ok(())
    }
}

impl TryFrom<SessionClaims> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| ApiError::unauthorized("Malformed session subject"))?;
        Ok(Self {
            user_id,
            role: claims.role,
            name: claims.name,
        })
    }
}

/// Issue a session token for a logged-in user.
pub fn issue_session_token(config: &ApiConfig, user: &User) -> ApiResult<String> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id.to_string(),
        role: user.role,
        name: user.name.clone(),
        iat: now,
        exp: now + config.session_ttl.as_secs() as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Failed to sign session token: {e}")))
}

/// Verify a session token and return its claims.
pub fn verify_session_token(config: &ApiConfig, token: &str) -> ApiResult<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 30;

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| ApiError::unauthorized(format!("Invalid session token: {e}")))?;

    Ok(data.claims)
}

/// Pull the raw token out of the request: Bearer header first, then the
/// session cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get("Authorization") {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Missing session token"))?;

        let claims = verify_session_token(&state.config, &token)?;
        AuthUser::try_from(claims)
    }
}
