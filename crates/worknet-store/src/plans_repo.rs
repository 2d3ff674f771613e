//! Repositories for plans and subscriptions.

use chrono::{NaiveDate, Utc};
use tracing::info;

use worknet_models::{Plan, Subscription, SubscriptionStatus, UserRole};

use crate::client::Database;
use crate::error::{StoreError, StoreResult};
use crate::params;
use crate::types::{SqlParam, SqlRow};

/// Repository for the plan catalog.
#[derive(Clone)]
pub struct PlanRepository {
    db: Database,
}

impl PlanRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Active plans, cheapest first, optionally restricted to one
    /// audience.
    pub async fn list_active(&self, plan_type: Option<UserRole>) -> StoreResult<Vec<Plan>> {
        let mut sql = String::from("SELECT * FROM plans WHERE is_active = ?");
        let mut params = params![true];

        if let Some(plan_type) = plan_type {
            sql.push_str(" AND plan_type = ?");
            params.push(SqlParam::from(plan_type.as_str()));
        }
        sql.push_str(" ORDER BY price ASC");

        let rows = self.db.fetch_all(&sql, params).await?;
        rows.iter().map(row_to_plan).collect()
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Plan>> {
        let row = self
            .db
            .fetch_optional("SELECT * FROM plans WHERE id = ?", params![id])
            .await?;
        row.as_ref().map(row_to_plan).transpose()
    }
}

/// Repository for user subscriptions.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: Database,
}

impl SubscriptionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i64,
        plan_id: i64,
        expires_at: Option<NaiveDate>,
    ) -> StoreResult<i64> {
        let id = self
            .db
            .insert(
                "INSERT INTO subscriptions (user_id, plan_id, status, started_at, expires_at) \
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    user_id,
                    plan_id,
                    SubscriptionStatus::Active.as_str(),
                    Utc::now(),
                    expires_at
                ],
            )
            .await?;
        info!(subscription_id = id, user_id, plan_id, "Created subscription");
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Subscription>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT s.*, p.name AS plan_name FROM subscriptions s \
                 JOIN plans p ON s.plan_id = p.id WHERE s.id = ?",
                params![id],
            )
            .await?;
        row.as_ref().map(row_to_subscription).transpose()
    }

    /// A user's subscriptions, newest first, with plan names.
    pub async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Subscription>> {
        let rows = self
            .db
            .fetch_all(
                "SELECT s.*, p.name AS plan_name FROM subscriptions s \
                 JOIN plans p ON s.plan_id = p.id \
                 WHERE s.user_id = ? ORDER BY s.started_at DESC",
                params![user_id],
            )
            .await?;
        rows.iter().map(row_to_subscription).collect()
    }

    pub async fn set_status(&self, id: i64, status: SubscriptionStatus) -> StoreResult<u64> {
        self.db
            .execute(
                "UPDATE subscriptions SET status = ? WHERE id = ?",
                params![status.as_str(), id],
            )
            .await
    }
}

fn row_to_plan(row: &SqlRow) -> StoreResult<Plan> {
    let plan_type_str: String = row.try_get("plan_type")?;
    let plan_type = UserRole::parse(&plan_type_str).ok_or_else(|| {
        StoreError::decode("plan_type", format!("unknown audience '{plan_type_str}'"))
    })?;

    let features = match row.get_opt::<String>("features")? {
        Some(json) => serde_json::from_str(&json).unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(Plan {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.get_opt("description")?,
        price: row.try_get("price")?,
        features,
        plan_type,
        is_active: row.try_get("is_active")?,
    })
}

fn row_to_subscription(row: &SqlRow) -> StoreResult<Subscription> {
    let status_str: String = row.try_get("status")?;
    Ok(Subscription {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        plan_id: row.try_get("plan_id")?,
        status: SubscriptionStatus::parse(&status_str),
        started_at: row.try_get("started_at")?,
        expires_at: row.get_opt("expires_at")?,
        plan_name: row.get_opt("plan_name")?,
    })
}
