//! Job posting handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use worknet_models::{Job, JobDraft, JobFilter, UserRole};
use worknet_store::JobRepository;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Public job listing with filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = JobRepository::new(state.db.clone()).list(&filter).await?;
    Ok(Json(jobs))
}

/// Fetch one job. Inactive postings are visible only to their owner.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    user: Option<AuthUser>,
) -> ApiResult<Json<Job>> {
    let job = JobRepository::new(state.db.clone())
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let is_owner = user.map_or(false, |u| u.user_id == job.company_id);
    if !job.is_active && !is_owner {
        return Err(ApiError::not_found("Job not found"));
    }

    Ok(Json(job))
}

#[derive(Serialize)]
pub struct JobCreatedResponse {
    pub job_id: i64,
}

/// Create a job posting. Company accounts only.
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<JobDraft>,
) -> ApiResult<(StatusCode, Json<JobCreatedResponse>)> {
    user.require_role(UserRole::Company)?;
    draft.validate()?;

    let job_id = JobRepository::new(state.db.clone())
        .create(user.user_id, &draft)
        .await?;

    Ok((StatusCode::CREATED, Json(JobCreatedResponse { job_id })))
}

/// Replace a posting's fields. Owner only.
pub async fn update_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    user: AuthUser,
    Json(draft): Json<JobDraft>,
) -> ApiResult<Json<Job>> {
    draft.validate()?;

    let repo = JobRepository::new(state.db.clone());
    let job = repo
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    if job.company_id != user.user_id {
        return Err(ApiError::forbidden("You do not own this job"));
    }

    repo.update(job_id, &draft).await?;

    let updated = repo
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(updated))
}

/// Delete a posting and, via cascade, its applications. Owner only.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    user: AuthUser,
) -> ApiResult<StatusCode> {
    let repo = JobRepository::new(state.db.clone());
    let job = repo
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    if job.company_id != user.user_id {
        return Err(ApiError::forbidden("You do not own this job"));
    }

    repo.delete(job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
