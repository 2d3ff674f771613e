//! Repositories for job postings and applications.

use chrono::Utc;
use tracing::info;

use worknet_models::{Application, ApplicationStatus, Job, JobDraft, JobFilter};

use crate::client::Database;
use crate::error::StoreResult;
use crate::params;
use crate::types::{SqlParam, SqlRow};

/// Repository for job postings.
#[derive(Clone)]
pub struct JobRepository {
    db: Database,
}

impl JobRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Public listing: active jobs with the company name, featured first,
    /// newest first. Filters append to the WHERE clause the same way on
    /// both dialects; the location filter is a substring match.
    pub async fn list(&self, filter: &JobFilter) -> StoreResult<Vec<Job>> {
        let mut sql = String::from(
            "SELECT j.*, u.name AS company_name FROM jobs j \
             JOIN users u ON j.company_id = u.id WHERE j.is_active = ?",
        );
        let mut params = params![true];

        if let Some(area) = &filter.area {
            sql.push_str(" AND j.area = ?");
            params.push(SqlParam::from(area));
        }
        if let Some(location) = &filter.location {
            sql.push_str(" AND j.location LIKE ?");
            params.push(SqlParam::from(format!("%{location}%")));
        }
        if let Some(modality) = &filter.modality {
            sql.push_str(" AND j.work_modality = ?");
            params.push(SqlParam::from(modality));
        }
        sql.push_str(" ORDER BY j.is_featured DESC, j.created_at DESC");

        let rows = self.db.fetch_all(&sql, params).await?;
        rows.iter().map(row_to_job).collect()
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Job>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT j.*, u.name AS company_name FROM jobs j \
                 JOIN users u ON j.company_id = u.id WHERE j.id = ?",
                params![id],
            )
            .await?;
        row.as_ref().map(row_to_job).transpose()
    }

    pub async fn create(&self, company_id: i64, draft: &JobDraft) -> StoreResult<i64> {
        let id = self
            .db
            .insert(
                "INSERT INTO jobs (company_id, title, description, requirements, benefits, \
                 salary_range, location, work_modality, job_type, area, level, is_active, \
                 is_featured, created_at, expires_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    company_id,
                    &draft.title,
                    draft.description.as_deref(),
                    draft.requirements.as_deref(),
                    draft.benefits.as_deref(),
                    draft.salary_range.as_deref(),
                    draft.location.as_deref(),
                    draft.work_modality.as_deref(),
                    draft.job_type.as_deref(),
                    draft.area.as_deref(),
                    draft.level.as_deref(),
                    true,
                    false,
                    Utc::now(),
                    draft.expires_at
                ],
            )
            .await?;
        info!(job_id = id, company_id, "Created job");
        Ok(id)
    }

    /// Replace the descriptive columns of a posting. Flags and ownership
    /// are untouched. Returns affected rows.
    pub async fn update(&self, id: i64, draft: &JobDraft) -> StoreResult<u64> {
        self.db
            .execute(
                "UPDATE jobs SET title = ?, description = ?, requirements = ?, benefits = ?, \
                 salary_range = ?, location = ?, work_modality = ?, job_type = ?, area = ?, \
                 level = ?, expires_at = ? WHERE id = ?",
                params![
                    &draft.title,
                    draft.description.as_deref(),
                    draft.requirements.as_deref(),
                    draft.benefits.as_deref(),
                    draft.salary_range.as_deref(),
                    draft.location.as_deref(),
                    draft.work_modality.as_deref(),
                    draft.job_type.as_deref(),
                    draft.area.as_deref(),
                    draft.level.as_deref(),
                    draft.expires_at,
                    id
                ],
            )
            .await
    }

    /// Hard delete; applications go with the posting via cascade.
    pub async fn delete(&self, id: i64) -> StoreResult<u64> {
        self.db
            .execute("DELETE FROM jobs WHERE id = ?", params![id])
            .await
    }
}

/// Repository for job applications.
#[derive(Clone)]
pub struct ApplicationRepository {
    db: Database,
}

impl ApplicationRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn exists(&self, job_id: i64, candidate_id: i64) -> StoreResult<bool> {
        let row = self
            .db
            .fetch_optional(
                "SELECT id FROM applications WHERE job_id = ? AND candidate_id = ?",
                params![job_id, candidate_id],
            )
            .await?;
        Ok(row.is_some())
    }

    /// Submit an application. The (job, candidate) pair is unique; a
    /// second submission surfaces as `StoreError::AlreadyExists` even if
    /// two requests race past the `exists` pre-check.
    pub async fn create(
        &self,
        job_id: i64,
        candidate_id: i64,
        message: Option<&str>,
    ) -> StoreResult<i64> {
        let id = self
            .db
            .insert(
                "INSERT INTO applications (job_id, candidate_id, status, applied_at, message) \
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    job_id,
                    candidate_id,
                    ApplicationStatus::Pending.as_str(),
                    Utc::now(),
                    message
                ],
            )
            .await?;
        info!(application_id = id, job_id, candidate_id, "Submitted application");
        Ok(id)
    }

    /// A candidate's own applications, newest first, with job titles.
    pub async fn list_for_candidate(&self, candidate_id: i64) -> StoreResult<Vec<Application>> {
        let rows = self
            .db
            .fetch_all(
                "SELECT a.*, j.title AS job_title FROM applications a \
                 JOIN jobs j ON a.job_id = j.id \
                 WHERE a.candidate_id = ? ORDER BY a.applied_at DESC",
                params![candidate_id],
            )
            .await?;
        rows.iter().map(row_to_application).collect()
    }

    /// Applications received across a company's postings, newest first,
    /// with job titles and candidate names.
    pub async fn list_for_company(&self, company_id: i64) -> StoreResult<Vec<Application>> {
        let rows = self
            .db
            .fetch_all(
                "SELECT a.*, j.title AS job_title, u.name AS candidate_name \
                 FROM applications a \
                 JOIN jobs j ON a.job_id = j.id \
                 JOIN users u ON a.candidate_id = u.id \
                 WHERE j.company_id = ? ORDER BY a.applied_at DESC",
                params![company_id],
            )
            .await?;
        rows.iter().map(row_to_application).collect()
    }
}

fn row_to_job(row: &SqlRow) -> StoreResult<Job> {
    Ok(Job {
        id: row.try_get("id")?,
        company_id: row.try_get("company_id")?,
        title: row.try_get("title")?,
        description: row.get_opt("description")?,
        requirements: row.get_opt("requirements")?,
        benefits: row.get_opt("benefits")?,
        salary_range: row.get_opt("salary_range")?,
        location: row.get_opt("location")?,
        work_modality: row.get_opt("work_modality")?,
        job_type: row.get_opt("job_type")?,
        area: row.get_opt("area")?,
        level: row.get_opt("level")?,
        is_active: row.try_get("is_active")?,
        is_featured: row.try_get("is_featured")?,
        created_at: row.try_get("created_at")?,
        expires_at: row.get_opt("expires_at")?,
        company_name: row.get_opt("company_name")?,
    })
}

fn row_to_application(row: &SqlRow) -> StoreResult<Application> {
    let status_str: String = row.try_get("status")?;
    Ok(Application {
        id: row.try_get("id")?,
        job_id: row.try_get("job_id")?,
        candidate_id: row.try_get("candidate_id")?,
        status: ApplicationStatus::parse(&status_str),
        applied_at: row.try_get("applied_at")?,
        message: row.get_opt("message")?,
        job_title: row.get_opt("job_title")?,
        candidate_name: match row.get("candidate_name") {
            Some(_) => row.get_opt("candidate_name")?,
            None => None,
        },
    })
}
