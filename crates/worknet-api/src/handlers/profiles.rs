//! Profile handlers.
//!
//! `GET /api/profile` joins the caller's user row with the role-matching
//! profile table; `PUT /api/profile` replaces the profile's descriptive
//! columns. The payload shape depends on the caller's role, so updates
//! deserialize against the role-specific struct and reject unknown
//! fields.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use worknet_models::{CandidateProfile, CompanyProfile, InstitutionProfile, User, UserRole};
use worknet_store::ProfileRepository;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// One of the three profile shapes, serialized without a tag: the `user`
/// object already carries the role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProfilePayload {
    Candidate(CandidateProfile),
    Company(CompanyProfile),
    Institution(InstitutionProfile),
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub profile: ProfilePayload,
}

async fn load_profile(state: &AppState, user: &AuthUser) -> ApiResult<ProfilePayload> {
    let profiles = ProfileRepository::new(state.db.clone());
    let profile = match user.role {
        UserRole::Candidate => profiles
            .candidate(user.user_id)
            .await?
            .map(ProfilePayload::Candidate),
        UserRole::Company => profiles
            .company(user.user_id)
            .await?
            .map(ProfilePayload::Company),
        UserRole::Institution => profiles
            .institution(user.user_id)
            .await?
            .map(ProfilePayload::Institution),
    };
    profile.ok_or_else(|| ApiError::not_found("Profile not found"))
}

/// Get the caller's account and profile.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let account = state.accounts.get_user(user.user_id).await?;
    let profile = load_profile(&state, &user).await?;
    Ok(Json(ProfileResponse {
        user: account,
        profile,
    }))
}

/// Replace the caller's profile fields and return the stored result.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<ProfilePayload>> {
    let profiles = ProfileRepository::new(state.db.clone());

    let affected = match user.role {
        UserRole::Candidate => {
            let profile: CandidateProfile = parse_payload(body)?;
            profiles.update_candidate(user.user_id, &profile).await?
        }
        UserRole::Company => {
            let profile: CompanyProfile = parse_payload(body)?;
            profiles.update_company(user.user_id, &profile).await?
        }
        UserRole::Institution => {
            let profile: InstitutionProfile = parse_payload(body)?;
            profiles.update_institution(user.user_id, &profile).await?
        }
    };

    if affected == 0 {
        return Err(ApiError::not_found("Profile not found"));
    }

    let updated = load_profile(&state, &user).await?;
    Ok(Json(updated))
}

fn parse_payload<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> ApiResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid profile payload: {e}")))
}
