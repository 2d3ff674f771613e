//! Job posting models.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A job posting owned by a company account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub work_modality: Option<String>,
    pub job_type: Option<String>,
    pub area: Option<String>,
    pub level: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    /// Company display name, populated by listing queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Payload for creating or replacing a job posting. The owning company
/// and the flags are never payload-controlled.
#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
pub struct JobDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub work_modality: Option<String>,
    #[validate(length(max = 50))]
    pub job_type: Option<String>,
    #[validate(length(max = 100))]
    pub area: Option<String>,
    #[validate(length(max = 50))]
    pub level: Option<String>,
    pub expires_at: Option<NaiveDate>,
}

/// Listing filters for `GET /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct JobFilter {
    /// Exact match on the job's area.
    pub area: Option<String>,
    /// Substring match on the location.
    pub location: Option<String>,
    /// Exact match on the work modality.
    pub modality: Option<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.area.is_none() && self.location.is_none() && self.modality.is_none()
    }
}
