//! Course listing handlers. Same shape as the jobs module, owned by
//! institution accounts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use worknet_models::{Course, CourseDraft, CourseFilter, UserRole};
use worknet_store::CourseRepository;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Public course listing with filters.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> ApiResult<Json<Vec<Course>>> {
    let courses = CourseRepository::new(state.db.clone()).list(&filter).await?;
    Ok(Json(courses))
}

/// Fetch one course. Inactive listings are visible only to their owner.
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    user: Option<AuthUser>,
) -> ApiResult<Json<Course>> {
    let course = CourseRepository::new(state.db.clone())
        .get(course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let is_owner = user.map_or(false, |u| u.user_id == course.institution_id);
    if !course.is_active && !is_owner {
        return Err(ApiError::not_found("Course not found"));
    }

    Ok(Json(course))
}

#[derive(Serialize)]
pub struct CourseCreatedResponse {
    pub course_id: i64,
}

/// Create a course listing. Institution accounts only.
pub async fn create_course(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<CourseDraft>,
) -> ApiResult<(StatusCode, Json<CourseCreatedResponse>)> {
    user.require_role(UserRole::Institution)?;
    draft.validate()?;

    let course_id = CourseRepository::new(state.db.clone())
        .create(user.user_id, &draft)
        .await?;

    Ok((StatusCode::CREATED, Json(CourseCreatedResponse { course_id })))
}

/// Replace a listing's fields. Owner only.
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    user: AuthUser,
    Json(draft): Json<CourseDraft>,
) -> ApiResult<Json<Course>> {
    draft.validate()?;

    let repo = CourseRepository::new(state.db.clone());
    let course = repo
        .get(course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;
    if course.institution_id != user.user_id {
        return Err(ApiError::forbidden("You do not own this course"));
    }

    repo.update(course_id, &draft).await?;

    let updated = repo
        .get(course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;
    Ok(Json(updated))
}

/// Delete a listing. Owner only.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    user: AuthUser,
) -> ApiResult<StatusCode> {
    let repo = CourseRepository::new(state.db.clone());
    let course = repo
        .get(course_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;
    if course.institution_id != user.user_id {
        return Err(ApiError::forbidden("You do not own this course"));
    }

    repo.delete(course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
