//! Course listing models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A course published by an institution account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Course {
    pub id: i64,
    pub institution_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub modality: Option<String>,
    pub duration: Option<String>,
    pub price: f64,
    pub is_free: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Institution display name, populated by listing queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

impl Course {
    /// A zero-priced course is free regardless of what the payload said.
    pub fn normalized_is_free(price: f64, is_free: bool) -> bool {
        is_free || price <= 0.0
    }
}

/// Payload for creating or replacing a course listing.
#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
pub struct CourseDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub level: Option<String>,
    #[validate(length(max = 50))]
    pub modality: Option<String>,
    #[validate(length(max = 100))]
    pub duration: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_free: bool,
}

/// Listing filters for `GET /api/courses`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub level: Option<String>,
    pub modality: Option<String>,
    pub is_free: Option<bool>,
}
