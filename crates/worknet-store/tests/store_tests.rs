//! Store integration tests over an in-memory SQLite database.
//!
//! Everything below exercises the same SQL the PostgreSQL path runs; the
//! shim rewrites placeholders there, so these tests pin the shared query
//! text and row mapping.

use chrono::NaiveDate;

use worknet_models::{CandidateProfile, CourseDraft, CourseFilter, JobDraft, JobFilter, UserRole};
use worknet_store::{
    init_schema, params, seed_default_plans, ApplicationRepository, CourseRepository, Database,
    JobRepository, PlanRepository, ProfileRepository, StoreError, SubscriptionRepository,
    UserRepository,
};
use worknet_models::SubscriptionStatus;

async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    init_schema(&db).await.unwrap();
    db
}

async fn register(db: &Database, email: &str, role: UserRole, name: &str) -> i64 {
    let user_id = UserRepository::new(db.clone())
        .create(email, "$argon2id$fake", role, name, None)
        .await
        .unwrap();
    ProfileRepository::new(db.clone())
        .create_empty(user_id, role)
        .await
        .unwrap();
    user_id
}

fn job_draft(title: &str, area: &str) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        description: Some("desc".to_string()),
        requirements: None,
        benefits: None,
        salary_range: None,
        location: Some("Lisbon".to_string()),
        work_modality: Some("remote".to_string()),
        job_type: None,
        area: Some(area.to_string()),
        level: None,
        expires_at: None,
    }
}

#[tokio::test]
async fn test_user_round_trip() {
    let db = test_db().await;
    let users = UserRepository::new(db.clone());

    let id = register(&db, "ana@example.com", UserRole::Candidate, "Ana").await;

    let by_id = users.get(id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "ana@example.com");
    assert_eq!(by_id.role, UserRole::Candidate);
    assert!(by_id.is_active);
    assert!(!by_id.is_verified);
    assert!(by_id.profile_public);

    let by_email = users.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, id);
    assert!(users.email_exists("ana@example.com").await.unwrap());
    assert!(!users.email_exists("nobody@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_is_unique_violation() {
    let db = test_db().await;
    let users = UserRepository::new(db.clone());

    register(&db, "dup@example.com", UserRole::Company, "Acme").await;
    let err = users
        .create("dup@example.com", "hash", UserRole::Candidate, "Other", None)
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "got: {err}");
}

#[tokio::test]
async fn test_candidate_profile_update() {
    let db = test_db().await;
    let profiles = ProfileRepository::new(db.clone());
    let user_id = register(&db, "cand@example.com", UserRole::Candidate, "Ana").await;

    let empty = profiles.candidate(user_id).await.unwrap().unwrap();
    assert_eq!(empty.user_id, user_id);
    assert!(empty.professional_title.is_none());

    let update = CandidateProfile {
        professional_title: Some("Backend Engineer".to_string()),
        experience_years: Some(6),
        salary_expectation: Some(8500.0),
        birth_date: NaiveDate::from_ymd_opt(1994, 4, 2),
        skills: Some("rust, sql".to_string()),
        ..CandidateProfile::default()
    };
    let affected = profiles.update_candidate(user_id, &update).await.unwrap();
    assert_eq!(affected, 1);

    let stored = profiles.candidate(user_id).await.unwrap().unwrap();
    assert_eq!(stored.professional_title.as_deref(), Some("Backend Engineer"));
    assert_eq!(stored.experience_years, Some(6));
    assert_eq!(stored.salary_expectation, Some(8500.0));
    assert_eq!(stored.birth_date, NaiveDate::from_ymd_opt(1994, 4, 2));
    // Fields not in the update were cleared by the full-column write
    assert!(stored.nationality.is_none());
}

#[tokio::test]
async fn test_profile_update_for_missing_user_touches_nothing() {
    let db = test_db().await;
    let profiles = ProfileRepository::new(db.clone());
    let affected = profiles
        .update_candidate(9999, &CandidateProfile::default())
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn test_job_listing_filters() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;

    let eng = jobs.create(company, &job_draft("Backend dev", "engineering")).await.unwrap();
    jobs.create(company, &job_draft("Designer", "design")).await.unwrap();

    let all = jobs.list(&JobFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|j| j.company_name.as_deref() == Some("Acme")));

    let filtered = jobs
        .list(&JobFilter {
            area: Some("engineering".to_string()),
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, eng);

    // Location is a substring match
    let by_location = jobs
        .list(&JobFilter {
            location: Some("isbo".to_string()),
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_location.len(), 2);

    let by_modality = jobs
        .list(&JobFilter {
            modality: Some("onsite".to_string()),
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert!(by_modality.is_empty());
}

#[tokio::test]
async fn test_featured_jobs_list_first() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;

    jobs.create(company, &job_draft("Plain", "engineering")).await.unwrap();
    let featured = jobs.create(company, &job_draft("Featured", "engineering")).await.unwrap();
    db.execute(
        "UPDATE jobs SET is_featured = ? WHERE id = ?",
        params![true, featured],
    )
    .await
    .unwrap();

    let listed = jobs.list(&JobFilter::default()).await.unwrap();
    assert_eq!(listed[0].id, featured);
    assert!(listed[0].is_featured);
}

#[tokio::test]
async fn test_inactive_jobs_hidden_from_listing() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;

    let id = jobs.create(company, &job_draft("Gone", "engineering")).await.unwrap();
    db.execute("UPDATE jobs SET is_active = ? WHERE id = ?", params![false, id])
        .await
        .unwrap();

    assert!(jobs.list(&JobFilter::default()).await.unwrap().is_empty());
    // Direct fetch still works; visibility is the API layer's call
    assert!(jobs.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_job_update_and_delete() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;
    let id = jobs.create(company, &job_draft("Old title", "engineering")).await.unwrap();

    let mut draft = job_draft("New title", "engineering");
    draft.expires_at = NaiveDate::from_ymd_opt(2027, 1, 1);
    assert_eq!(jobs.update(id, &draft).await.unwrap(), 1);

    let stored = jobs.get(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "New title");
    assert_eq!(stored.expires_at, NaiveDate::from_ymd_opt(2027, 1, 1));

    assert_eq!(jobs.delete(id).await.unwrap(), 1);
    assert!(jobs.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_application_unique_per_job_and_candidate() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let applications = ApplicationRepository::new(db.clone());

    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;
    let candidate = register(&db, "ana@example.com", UserRole::Candidate, "Ana").await;
    let job = jobs.create(company, &job_draft("Backend dev", "engineering")).await.unwrap();

    applications.create(job, candidate, Some("hello")).await.unwrap();
    assert!(applications.exists(job, candidate).await.unwrap());

    let err = applications.create(job, candidate, None).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)), "got: {err}");
}

#[tokio::test]
async fn test_application_listings_carry_join_columns() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let applications = ApplicationRepository::new(db.clone());

    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;
    let candidate = register(&db, "ana@example.com", UserRole::Candidate, "Ana").await;
    let job = jobs.create(company, &job_draft("Backend dev", "engineering")).await.unwrap();
    applications.create(job, candidate, Some("hi")).await.unwrap();

    let own = applications.list_for_candidate(candidate).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].job_title.as_deref(), Some("Backend dev"));
    assert_eq!(own[0].message.as_deref(), Some("hi"));

    let received = applications.list_for_company(company).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].candidate_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn test_deleting_job_cascades_to_applications() {
    let db = test_db().await;
    let jobs = JobRepository::new(db.clone());
    let applications = ApplicationRepository::new(db.clone());

    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;
    let candidate = register(&db, "ana@example.com", UserRole::Candidate, "Ana").await;
    let job = jobs.create(company, &job_draft("Backend dev", "engineering")).await.unwrap();
    applications.create(job, candidate, None).await.unwrap();

    jobs.delete(job).await.unwrap();
    assert!(applications
        .list_for_candidate(candidate)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_course_listing_filters() {
    let db = test_db().await;
    let courses = CourseRepository::new(db.clone());
    let institution = register(&db, "uni@example.com", UserRole::Institution, "Uni").await;

    let free = courses
        .create(
            institution,
            &CourseDraft {
                title: "Intro to SQL".to_string(),
                description: None,
                category: Some("data".to_string()),
                level: Some("beginner".to_string()),
                modality: Some("online".to_string()),
                duration: Some("4 weeks".to_string()),
                price: 0.0,
                is_free: false, // zero price wins
            },
        )
        .await
        .unwrap();
    courses
        .create(
            institution,
            &CourseDraft {
                title: "Advanced Rust".to_string(),
                description: None,
                category: Some("programming".to_string()),
                level: Some("advanced".to_string()),
                modality: Some("online".to_string()),
                duration: None,
                price: 249.9,
                is_free: false,
            },
        )
        .await
        .unwrap();

    let all = courses.list(&CourseFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|c| c.institution_name.as_deref() == Some("Uni")));

    let free_only = courses
        .list(&CourseFilter {
            is_free: Some(true),
            ..CourseFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(free_only.len(), 1);
    assert_eq!(free_only[0].id, free);
    assert!(free_only[0].is_free);

    let by_category = courses
        .list(&CourseFilter {
            category: Some("programming".to_string()),
            ..CourseFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].price, 249.9);
}

#[tokio::test]
async fn test_plan_seeding_is_idempotent() {
    let db = test_db().await;
    seed_default_plans(&db).await.unwrap();
    seed_default_plans(&db).await.unwrap();

    let plans = PlanRepository::new(db.clone());
    let all = plans.list_active(None).await.unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.iter().all(|p| p.is_active));
    assert!(all.iter().any(|p| !p.features.is_empty()));

    let company_plans = plans.list_active(Some(UserRole::Company)).await.unwrap();
    assert_eq!(company_plans.len(), 2);
    assert!(company_plans.iter().all(|p| p.plan_type == UserRole::Company));
    // Cheapest first
    assert!(company_plans[0].price <= company_plans[1].price);
}

#[tokio::test]
async fn test_subscription_lifecycle() {
    let db = test_db().await;
    seed_default_plans(&db).await.unwrap();

    let plans = PlanRepository::new(db.clone());
    let subscriptions = SubscriptionRepository::new(db.clone());
    let company = register(&db, "hr@acme.com", UserRole::Company, "Acme").await;
    let plan = plans.list_active(Some(UserRole::Company)).await.unwrap()[0].clone();

    let id = subscriptions
        .create(company, plan.id, NaiveDate::from_ymd_opt(2027, 12, 31))
        .await
        .unwrap();

    let mine = subscriptions.list_for_user(company).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, SubscriptionStatus::Active);
    assert_eq!(mine[0].plan_name.as_deref(), Some(plan.name.as_str()));
    assert_eq!(mine[0].expires_at, NaiveDate::from_ymd_opt(2027, 12, 31));

    subscriptions
        .set_status(id, SubscriptionStatus::Canceled)
        .await
        .unwrap();
    let updated = subscriptions.get(id).await.unwrap().unwrap();
    assert_eq!(updated.status, SubscriptionStatus::Canceled);
}

#[tokio::test]
async fn test_ping_and_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let url = format!("sqlite://{}", path.display());

    let db = Database::connect(&url).await.unwrap();
    init_schema(&db).await.unwrap();
    db.ping().await.unwrap();

    let id = register(&db, "file@example.com", UserRole::Candidate, "Ana").await;
    assert!(id > 0);
}
