//! Repository for course listings.

use chrono::Utc;
use tracing::info;

use worknet_models::{Course, CourseDraft, CourseFilter};

use crate::client::Database;
use crate::error::StoreResult;
use crate::params;
use crate::types::{SqlParam, SqlRow};

/// Repository for courses published by institutions.
#[derive(Clone)]
pub struct CourseRepository {
    db: Database,
}

impl CourseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Public listing: active courses with the institution name, featured
    /// first, newest first. The `is_free` filter binds a typed boolean so
    /// both dialects compare natively.
    pub async fn list(&self, filter: &CourseFilter) -> StoreResult<Vec<Course>> {
        let mut sql = String::from(
            "SELECT c.*, u.name AS institution_name FROM courses c \
             JOIN users u ON c.institution_id = u.id WHERE c.is_active = ?",
        );
        let mut params = params![true];

        if let Some(category) = &filter.category {
            sql.push_str(" AND c.category = ?");
            params.push(SqlParam::from(category));
        }
        if let Some(level) = &filter.level {
            sql.push_str(" AND c.level = ?");
            params.push(SqlParam::from(level));
        }
        if let Some(modality) = &filter.modality {
            sql.push_str(" AND c.modality = ?");
            params.push(SqlParam::from(modality));
        }
        if let Some(is_free) = filter.is_free {
            sql.push_str(" AND c.is_free = ?");
            params.push(SqlParam::from(is_free));
        }
        sql.push_str(" ORDER BY c.is_featured DESC, c.created_at DESC");

        let rows = self.db.fetch_all(&sql, params).await?;
        rows.iter().map(row_to_course).collect()
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Course>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT c.*, u.name AS institution_name FROM courses c \
                 JOIN users u ON c.institution_id = u.id WHERE c.id = ?",
                params![id],
            )
            .await?;
        row.as_ref().map(row_to_course).transpose()
    }

    pub async fn create(&self, institution_id: i64, draft: &CourseDraft) -> StoreResult<i64> {
        let is_free = Course::normalized_is_free(draft.price, draft.is_free);
        let id = self
            .db
            .insert(
                "INSERT INTO courses (institution_id, title, description, category, level, \
                 modality, duration, price, is_free, is_featured, is_active, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    institution_id,
                    &draft.title,
                    draft.description.as_deref(),
                    draft.category.as_deref(),
                    draft.level.as_deref(),
                    draft.modality.as_deref(),
                    draft.duration.as_deref(),
                    draft.price,
                    is_free,
                    false,
                    true,
                    Utc::now()
                ],
            )
            .await?;
        info!(course_id = id, institution_id, "Created course");
        Ok(id)
    }

    /// Replace the descriptive columns of a listing. Returns affected rows.
    pub async fn update(&self, id: i64, draft: &CourseDraft) -> StoreResult<u64> {
        let is_free = Course::normalized_is_free(draft.price, draft.is_free);
        self.db
            .execute(
                "UPDATE courses SET title = ?, description = ?, category = ?, level = ?, \
                 modality = ?, duration = ?, price = ?, is_free = ? WHERE id = ?",
                params![
                    &draft.title,
                    draft.description.as_deref(),
                    draft.category.as_deref(),
                    draft.level.as_deref(),
                    draft.modality.as_deref(),
                    draft.duration.as_deref(),
                    draft.price,
                    is_free,
                    id
                ],
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<u64> {
        self.db
            .execute("DELETE FROM courses WHERE id = ?", params![id])
            .await
    }
}

fn row_to_course(row: &SqlRow) -> StoreResult<Course> {
    Ok(Course {
        id: row.try_get("id")?,
        institution_id: row.try_get("institution_id")?,
        title: row.try_get("title")?,
        description: row.get_opt("description")?,
        category: row.get_opt("category")?,
        level: row.get_opt("level")?,
        modality: row.get_opt("modality")?,
        duration: row.get_opt("duration")?,
        price: row.try_get("price")?,
        is_free: row.try_get("is_free")?,
        is_featured: row.try_get("is_featured")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        institution_name: row.get_opt("institution_name")?,
    })
}
