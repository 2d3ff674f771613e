//! Application handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use worknet_models::{Application, UserRole};
use worknet_store::{ApplicationRepository, JobRepository, StoreError};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Application submission request.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: i64,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApplyResponse {
    pub application_id: i64,
}

/// Apply to a job. Candidate accounts only, one application per job.
pub async fn submit_application(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplyResponse>)> {
    user.require_role(UserRole::Candidate)?;

    let job = JobRepository::new(state.db.clone())
        .get(request.job_id)
        .await?;
    if !job.map_or(false, |j| j.is_active) {
        return Err(ApiError::not_found("Job not found"));
    }

    let applications = ApplicationRepository::new(state.db.clone());
    if applications.exists(request.job_id, user.user_id).await? {
        return Err(ApiError::conflict("You have already applied to this job"));
    }

    // The unique pair constraint closes the race between check and insert
    let application_id = match applications
        .create(request.job_id, user.user_id, request.message.as_deref())
        .await
    {
        Ok(id) => id,
        Err(StoreError::AlreadyExists(_)) => {
            return Err(ApiError::conflict("You have already applied to this job"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((StatusCode::CREATED, Json(ApplyResponse { application_id })))
}

/// List applications: candidates see their own, companies see those
/// received across their postings.
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    let applications = ApplicationRepository::new(state.db.clone());
    let list = match user.role {
        UserRole::Candidate => applications.list_for_candidate(user.user_id).await?,
        UserRole::Company => applications.list_for_company(user.user_id).await?,
        UserRole::Institution => {
            return Err(ApiError::forbidden(
                "Institution accounts have no applications",
            ))
        }
    };
    Ok(Json(list))
}
