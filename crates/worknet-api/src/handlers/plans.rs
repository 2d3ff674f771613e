//! Plan catalog and subscription handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use worknet_models::{Plan, Subscription, SubscriptionStatus, UserRole};
use worknet_store::{PlanRepository, SubscriptionRepository};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Plan listing filter.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub plan_type: Option<String>,
}

/// List active plans, optionally for one audience.
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<Vec<Plan>>> {
    let plan_type = match query.plan_type.as_deref() {
        Some(s) => Some(
            UserRole::parse(s)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown plan type '{s}'")))?,
        ),
        None => None,
    };

    let plans = PlanRepository::new(state.db.clone())
        .list_active(plan_type)
        .await?;
    Ok(Json(plans))
}

/// Subscription request.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: i64,
    pub expires_at: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub subscription_id: i64,
}

/// Subscribe the caller to a plan matching their role.
pub async fn create_subscription(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<SubscribeRequest>,
) -> ApiResult<(StatusCode, Json<SubscribeResponse>)> {
    let plan = PlanRepository::new(state.db.clone())
        .get(request.plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan not found"))?;

    if !plan.is_active {
        return Err(ApiError::bad_request("This plan is no longer available"));
    }
    if plan.plan_type != user.role {
        return Err(ApiError::forbidden(format!(
            "Plan '{}' is for {} accounts",
            plan.name, plan.plan_type
        )));
    }

    let subscription_id = SubscriptionRepository::new(state.db.clone())
        .create(user.user_id, request.plan_id, request.expires_at)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse { subscription_id }),
    ))
}

/// The caller's subscriptions.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Subscription>>> {
    let subscriptions = SubscriptionRepository::new(state.db.clone())
        .list_for_user(user.user_id)
        .await?;
    Ok(Json(subscriptions))
}

/// Cancel one of the caller's subscriptions.
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Path(subscription_id): Path<i64>,
    user: AuthUser,
) -> ApiResult<Json<Subscription>> {
    let repo = SubscriptionRepository::new(state.db.clone());
    let subscription = repo
        .get(subscription_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subscription not found"))?;
    if subscription.user_id != user.user_id {
        return Err(ApiError::forbidden("You do not own this subscription"));
    }

    repo.set_status(subscription_id, SubscriptionStatus::Canceled)
        .await?;

    let updated = repo
        .get(subscription_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subscription not found"))?;
    Ok(Json(updated))
}
