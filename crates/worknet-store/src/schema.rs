//! Schema bootstrap and seed data.
//!
//! Both dialects get semantically identical tables: cascade deletes on
//! every child of `users`, a UNIQUE pair on applications, and a UNIQUE
//! `user_id` on each profile table. Ids are 64-bit on both backends.
//! Timestamps are set by application code, so SQLite stores them as
//! RFC 3339 text and PostgreSQL as `TIMESTAMPTZ`.

use tracing::info;

use crate::client::{Database, Dialect};
use crate::error::StoreResult;
use crate::params;

const SQLITE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL,
        name TEXT NOT NULL,
        phone TEXT,
        created_at TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        is_verified BOOLEAN NOT NULL DEFAULT 0,
        profile_public BOOLEAN NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS candidate_profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        birth_date TEXT,
        marital_status TEXT,
        nationality TEXT,
        linkedin_url TEXT,
        address_cep TEXT,
        address_street TEXT,
        address_number TEXT,
        address_complement TEXT,
        address_neighborhood TEXT,
        address_city TEXT,
        address_state TEXT,
        professional_title TEXT,
        experience_years INTEGER,
        sector TEXT,
        level TEXT,
        work_modality TEXT,
        salary_expectation REAL,
        summary TEXT,
        skills TEXT,
        languages TEXT,
        education_level TEXT,
        course TEXT,
        institution TEXT,
        graduation_year INTEGER,
        availability_status TEXT,
        start_availability TEXT
    )",
    "CREATE TABLE IF NOT EXISTS company_profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        cnpj TEXT,
        company_type TEXT,
        founded_year INTEGER,
        sector TEXT,
        employees_count TEXT,
        tagline TEXT,
        description TEXT,
        address_cep TEXT,
        address_street TEXT,
        address_number TEXT,
        address_complement TEXT,
        address_neighborhood TEXT,
        address_city TEXT,
        address_state TEXT,
        work_modality TEXT,
        company_culture TEXT,
        benefits TEXT,
        areas_of_operation TEXT,
        website TEXT,
        linkedin_url TEXT,
        responsible_name TEXT,
        responsible_email TEXT,
        responsible_phone TEXT
    )",
    "CREATE TABLE IF NOT EXISTS institution_profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        cnpj TEXT,
        institution_type TEXT,
        founded_year INTEGER,
        students_count INTEGER,
        mec_code TEXT,
        description TEXT,
        address_cep TEXT,
        address_street TEXT,
        address_number TEXT,
        address_complement TEXT,
        address_neighborhood TEXT,
        address_city TEXT,
        address_state TEXT,
        courses_offered TEXT,
        education_levels TEXT,
        modalities TEXT,
        specialization_areas TEXT,
        special_programs TEXT,
        website TEXT,
        linkedin_url TEXT,
        responsible_name TEXT,
        responsible_email TEXT,
        responsible_phone TEXT
    )",
    "CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT,
        requirements TEXT,
        benefits TEXT,
        salary_range TEXT,
        location TEXT,
        work_modality TEXT,
        job_type TEXT,
        area TEXT,
        level TEXT,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        is_featured BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        expires_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS applications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        job_id INTEGER NOT NULL REFERENCES jobs (id) ON DELETE CASCADE,
        candidate_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        status TEXT NOT NULL DEFAULT 'pending',
        applied_at TEXT NOT NULL,
        message TEXT,
        UNIQUE (job_id, candidate_id)
    )",
    "CREATE TABLE IF NOT EXISTS courses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        institution_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT,
        category TEXT,
        level TEXT,
        modality TEXT,
        duration TEXT,
        price REAL NOT NULL DEFAULT 0,
        is_free BOOLEAN NOT NULL DEFAULT 1,
        is_featured BOOLEAN NOT NULL DEFAULT 0,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS plans (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        price REAL NOT NULL,
        features TEXT,
        plan_type TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        plan_id INTEGER NOT NULL REFERENCES plans (id) ON DELETE CASCADE,
        status TEXT NOT NULL DEFAULT 'active',
        started_at TEXT NOT NULL,
        expires_at TEXT
    )",
];

const POSTGRES_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email VARCHAR(255) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(50) NOT NULL,
        name VARCHAR(255) NOT NULL,
        phone VARCHAR(50),
        created_at TIMESTAMPTZ NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        profile_public BOOLEAN NOT NULL DEFAULT TRUE
    )",
    "CREATE TABLE IF NOT EXISTS candidate_profiles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        birth_date DATE,
        marital_status VARCHAR(50),
        nationality VARCHAR(100),
        linkedin_url VARCHAR(255),
        address_cep VARCHAR(20),
        address_street VARCHAR(255),
        address_number VARCHAR(20),
        address_complement VARCHAR(100),
        address_neighborhood VARCHAR(100),
        address_city VARCHAR(100),
        address_state VARCHAR(50),
        professional_title VARCHAR(255),
        experience_years BIGINT,
        sector VARCHAR(100),
        level VARCHAR(50),
        work_modality VARCHAR(50),
        salary_expectation DOUBLE PRECISION,
        summary TEXT,
        skills TEXT,
        languages TEXT,
        education_level VARCHAR(100),
        course VARCHAR(255),
        institution VARCHAR(255),
        graduation_year BIGINT,
        availability_status VARCHAR(50),
        start_availability DATE
    )",
    "CREATE TABLE IF NOT EXISTS company_profiles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        cnpj VARCHAR(20),
        company_type VARCHAR(100),
        founded_year BIGINT,
        sector VARCHAR(100),
        employees_count VARCHAR(50),
        tagline VARCHAR(255),
        description TEXT,
        address_cep VARCHAR(20),
        address_street VARCHAR(255),
        address_number VARCHAR(20),
        address_complement VARCHAR(100),
        address_neighborhood VARCHAR(100),
        address_city VARCHAR(100),
        address_state VARCHAR(50),
        work_modality VARCHAR(50),
        company_culture TEXT,
        benefits TEXT,
        areas_of_operation TEXT,
        website VARCHAR(255),
        linkedin_url VARCHAR(255),
        responsible_name VARCHAR(255),
        responsible_email VARCHAR(255),
        responsible_phone VARCHAR(50)
    )",
    "CREATE TABLE IF NOT EXISTS institution_profiles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        cnpj VARCHAR(20),
        institution_type VARCHAR(100),
        founded_year BIGINT,
        students_count BIGINT,
        mec_code VARCHAR(50),
        description TEXT,
        address_cep VARCHAR(20),
        address_street VARCHAR(255),
        address_number VARCHAR(20),
        address_complement VARCHAR(100),
        address_neighborhood VARCHAR(100),
        address_city VARCHAR(100),
        address_state VARCHAR(50),
        courses_offered TEXT,
        education_levels TEXT,
        modalities TEXT,
        specialization_areas TEXT,
        special_programs TEXT,
        website VARCHAR(255),
        linkedin_url VARCHAR(255),
        responsible_name VARCHAR(255),
        responsible_email VARCHAR(255),
        responsible_phone VARCHAR(50)
    )",
    "CREATE TABLE IF NOT EXISTS jobs (
        id BIGSERIAL PRIMARY KEY,
        company_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        requirements TEXT,
        benefits TEXT,
        salary_range VARCHAR(100),
        location VARCHAR(255),
        work_modality VARCHAR(50),
        job_type VARCHAR(50),
        area VARCHAR(100),
        level VARCHAR(50),
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        is_featured BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL,
        expires_at DATE
    )",
    "CREATE TABLE IF NOT EXISTS applications (
        id BIGSERIAL PRIMARY KEY,
        job_id BIGINT NOT NULL REFERENCES jobs (id) ON DELETE CASCADE,
        candidate_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        status VARCHAR(50) NOT NULL DEFAULT 'pending',
        applied_at TIMESTAMPTZ NOT NULL,
        message TEXT,
        UNIQUE (job_id, candidate_id)
    )",
    "CREATE TABLE IF NOT EXISTS courses (
        id BIGSERIAL PRIMARY KEY,
        institution_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        category VARCHAR(100),
        level VARCHAR(50),
        modality VARCHAR(50),
        duration VARCHAR(100),
        price DOUBLE PRECISION NOT NULL DEFAULT 0,
        is_free BOOLEAN NOT NULL DEFAULT TRUE,
        is_featured BOOLEAN NOT NULL DEFAULT FALSE,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS plans (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        price DOUBLE PRECISION NOT NULL,
        features TEXT,
        plan_type VARCHAR(50) NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )",
    "CREATE TABLE IF NOT EXISTS subscriptions (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        plan_id BIGINT NOT NULL REFERENCES plans (id) ON DELETE CASCADE,
        status VARCHAR(50) NOT NULL DEFAULT 'active',
        started_at TIMESTAMPTZ NOT NULL,
        expires_at DATE
    )",
];

/// Index statements shared by both dialects.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_jobs_listing ON jobs (is_active, is_featured)",
    "CREATE INDEX IF NOT EXISTS idx_applications_candidate ON applications (candidate_id)",
    "CREATE INDEX IF NOT EXISTS idx_courses_listing ON courses (is_active, is_featured)",
];

/// Create all tables and indexes if they do not exist.
pub async fn init_schema(db: &Database) -> StoreResult<()> {
    let statements = match db.dialect() {
        Dialect::Sqlite => SQLITE_SCHEMA,
        Dialect::Postgres => POSTGRES_SCHEMA,
    };

    for statement in statements.iter().chain(INDEXES) {
        db.execute(statement, params![]).await?;
    }
    info!("Schema ready ({})", db.dialect().as_str());
    Ok(())
}

/// Stock plan catalog, inserted only when the plans table is empty.
pub async fn seed_default_plans(db: &Database) -> StoreResult<()> {
    let row = db
        .fetch_optional("SELECT COUNT(*) AS n FROM plans", params![])
        .await?;
    let count: i64 = match row {
        Some(row) => row.try_get("n")?,
        None => 0,
    };
    if count > 0 {
        return Ok(());
    }

    let catalog: &[(&str, &str, f64, &str, &str)] = &[
        (
            "Starter",
            "Apply to jobs and keep a public profile",
            0.0,
            r#"["Public profile","Unlimited applications"]"#,
            "candidate",
        ),
        (
            "Career Plus",
            "Stand out to recruiters",
            29.9,
            r#"["Featured profile","Application insights","Priority support"]"#,
            "candidate",
        ),
        (
            "Business",
            "Post jobs and review applications",
            99.9,
            r#"["10 active jobs","Applicant inbox"]"#,
            "company",
        ),
        (
            "Business Pro",
            "Scale your hiring pipeline",
            199.9,
            r#"["Unlimited jobs","Featured postings","Priority support"]"#,
            "company",
        ),
        (
            "Campus",
            "Publish course listings",
            149.9,
            r#"["20 active courses","Institution page"]"#,
            "institution",
        ),
        (
            "Campus Pro",
            "Grow your student reach",
            299.9,
            r#"["Unlimited courses","Featured listings","Priority support"]"#,
            "institution",
        ),
    ];

    for (name, description, price, features, plan_type) in catalog {
        db.insert(
            "INSERT INTO plans (name, description, price, features, plan_type, is_active)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![*name, *description, *price, *features, *plan_type, true],
        )
        .await?;
    }
    info!("Seeded {} default plans", catalog.len());
    Ok(())
}
