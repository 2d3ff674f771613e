//! Repositories for users and their role-specific profiles.

use chrono::Utc;
use tracing::info;

use worknet_models::{
    CandidateProfile, CompanyProfile, InstitutionProfile, User, UserRole,
};

use crate::client::Database;
use crate::error::{StoreError, StoreResult};
use crate::params;
use crate::types::SqlRow;

/// Repository for user account rows.
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new account. The unique email constraint surfaces as
    /// `StoreError::AlreadyExists`.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
        name: &str,
        phone: Option<&str>,
    ) -> StoreResult<i64> {
        let id = self
            .db
            .insert(
                "INSERT INTO users (email, password_hash, role, name, phone, created_at, \
                 is_active, is_verified, profile_public) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    email,
                    password_hash,
                    role.as_str(),
                    name,
                    phone,
                    Utc::now(),
                    true,
                    false,
                    true
                ],
            )
            .await?;
        info!(user_id = id, role = %role, "Registered user");
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<User>> {
        let row = self
            .db
            .fetch_optional("SELECT * FROM users WHERE id = ?", params![id])
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = self
            .db
            .fetch_optional("SELECT * FROM users WHERE email = ?", params![email])
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let row = self
            .db
            .fetch_optional("SELECT id FROM users WHERE email = ?", params![email])
            .await?;
        Ok(row.is_some())
    }
}

/// Repository for the three profile tables.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Database,
}

impl ProfileRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the empty profile row that extends a freshly registered
    /// user. The table is picked by role; the column list is identical.
    pub async fn create_empty(&self, user_id: i64, role: UserRole) -> StoreResult<i64> {
        let sql = format!("INSERT INTO {} (user_id) VALUES (?)", role.profile_table());
        self.db.insert(&sql, params![user_id]).await
    }

    pub async fn candidate(&self, user_id: i64) -> StoreResult<Option<CandidateProfile>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT * FROM candidate_profiles WHERE user_id = ?",
                params![user_id],
            )
            .await?;
        row.as_ref().map(row_to_candidate_profile).transpose()
    }

    pub async fn company(&self, user_id: i64) -> StoreResult<Option<CompanyProfile>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT * FROM company_profiles WHERE user_id = ?",
                params![user_id],
            )
            .await?;
        row.as_ref().map(row_to_company_profile).transpose()
    }

    pub async fn institution(&self, user_id: i64) -> StoreResult<Option<InstitutionProfile>> {
        let row = self
            .db
            .fetch_optional(
                "SELECT * FROM institution_profiles WHERE user_id = ?",
                params![user_id],
            )
            .await?;
        row.as_ref().map(row_to_institution_profile).transpose()
    }

    /// Full-column update of a candidate profile. Returns affected rows,
    /// zero when the profile row does not exist.
    pub async fn update_candidate(
        &self,
        user_id: i64,
        profile: &CandidateProfile,
    ) -> StoreResult<u64> {
        self.db
            .execute(
                "UPDATE candidate_profiles SET birth_date = ?, marital_status = ?, \
                 nationality = ?, linkedin_url = ?, address_cep = ?, address_street = ?, \
                 address_number = ?, address_complement = ?, address_neighborhood = ?, \
                 address_city = ?, address_state = ?, professional_title = ?, \
                 experience_years = ?, sector = ?, level = ?, work_modality = ?, \
                 salary_expectation = ?, summary = ?, skills = ?, languages = ?, \
                 education_level = ?, course = ?, institution = ?, graduation_year = ?, \
                 availability_status = ?, start_availability = ? WHERE user_id = ?",
                params![
                    profile.birth_date,
                    profile.marital_status.as_deref(),
                    profile.nationality.as_deref(),
                    profile.linkedin_url.as_deref(),
                    profile.address_cep.as_deref(),
                    profile.address_street.as_deref(),
                    profile.address_number.as_deref(),
                    profile.address_complement.as_deref(),
                    profile.address_neighborhood.as_deref(),
                    profile.address_city.as_deref(),
                    profile.address_state.as_deref(),
                    profile.professional_title.as_deref(),
                    profile.experience_years,
                    profile.sector.as_deref(),
                    profile.level.as_deref(),
                    profile.work_modality.as_deref(),
                    profile.salary_expectation,
                    profile.summary.as_deref(),
                    profile.skills.as_deref(),
                    profile.languages.as_deref(),
                    profile.education_level.as_deref(),
                    profile.course.as_deref(),
                    profile.institution.as_deref(),
                    profile.graduation_year,
                    profile.availability_status.as_deref(),
                    profile.start_availability,
                    user_id
                ],
            )
            .await
    }

    /// Full-column update of a company profile.
    pub async fn update_company(
        &self,
        user_id: i64,
        profile: &CompanyProfile,
    ) -> StoreResult<u64> {
        self.db
            .execute(
                "UPDATE company_profiles SET cnpj = ?, company_type = ?, founded_year = ?, \
                 sector = ?, employees_count = ?, tagline = ?, description = ?, \
                 address_cep = ?, address_street = ?, address_number = ?, \
                 address_complement = ?, address_neighborhood = ?, address_city = ?, \
                 address_state = ?, work_modality = ?, company_culture = ?, benefits = ?, \
                 areas_of_operation = ?, website = ?, linkedin_url = ?, responsible_name = ?, \
                 responsible_email = ?, responsible_phone = ? WHERE user_id = ?",
                params![
                    profile.cnpj.as_deref(),
                    profile.company_type.as_deref(),
                    profile.founded_year,
                    profile.sector.as_deref(),
                    profile.employees_count.as_deref(),
                    profile.tagline.as_deref(),
                    profile.description.as_deref(),
                    profile.address_cep.as_deref(),
                    profile.address_street.as_deref(),
                    profile.address_number.as_deref(),
                    profile.address_complement.as_deref(),
                    profile.address_neighborhood.as_deref(),
                    profile.address_city.as_deref(),
                    profile.address_state.as_deref(),
                    profile.work_modality.as_deref(),
                    profile.company_culture.as_deref(),
                    profile.benefits.as_deref(),
                    profile.areas_of_operation.as_deref(),
                    profile.website.as_deref(),
                    profile.linkedin_url.as_deref(),
                    profile.responsible_name.as_deref(),
                    profile.responsible_email.as_deref(),
                    profile.responsible_phone.as_deref(),
                    user_id
                ],
            )
            .await
    }

    /// Full-column update of an institution profile.
    pub async fn update_institution(
        &self,
        user_id: i64,
        profile: &InstitutionProfile,
    ) -> StoreResult<u64> {
        self.db
            .execute(
                "UPDATE institution_profiles SET cnpj = ?, institution_type = ?, \
                 founded_year = ?, students_count = ?, mec_code = ?, description = ?, \
                 address_cep = ?, address_street = ?, address_number = ?, \
                 address_complement = ?, address_neighborhood = ?, address_city = ?, \
                 address_state = ?, courses_offered = ?, education_levels = ?, \
                 modalities = ?, specialization_areas = ?, special_programs = ?, \
                 website = ?, linkedin_url = ?, responsible_name = ?, responsible_email = ?, \
                 responsible_phone = ? WHERE user_id = ?",
                params![
                    profile.cnpj.as_deref(),
                    profile.institution_type.as_deref(),
                    profile.founded_year,
                    profile.students_count,
                    profile.mec_code.as_deref(),
                    profile.description.as_deref(),
                    profile.address_cep.as_deref(),
                    profile.address_street.as_deref(),
                    profile.address_number.as_deref(),
                    profile.address_complement.as_deref(),
                    profile.address_neighborhood.as_deref(),
                    profile.address_city.as_deref(),
                    profile.address_state.as_deref(),
                    profile.courses_offered.as_deref(),
                    profile.education_levels.as_deref(),
                    profile.modalities.as_deref(),
                    profile.specialization_areas.as_deref(),
                    profile.special_programs.as_deref(),
                    profile.website.as_deref(),
                    profile.linkedin_url.as_deref(),
                    profile.responsible_name.as_deref(),
                    profile.responsible_email.as_deref(),
                    profile.responsible_phone.as_deref(),
                    user_id
                ],
            )
            .await
    }
}

fn row_to_user(row: &SqlRow) -> StoreResult<User> {
    let role_str: String = row.try_get("role")?;
    let role = UserRole::parse(&role_str)
        .ok_or_else(|| StoreError::decode("role", format!("unknown role '{role_str}'")))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        name: row.try_get("name")?,
        phone: row.get_opt("phone")?,
        created_at: row.try_get("created_at")?,
        is_active: row.try_get("is_active")?,
        is_verified: row.try_get("is_verified")?,
        profile_public: row.try_get("profile_public")?,
    })
}

fn row_to_candidate_profile(row: &SqlRow) -> StoreResult<CandidateProfile> {
    Ok(CandidateProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        birth_date: row.get_opt("birth_date")?,
        marital_status: row.get_opt("marital_status")?,
        nationality: row.get_opt("nationality")?,
        linkedin_url: row.get_opt("linkedin_url")?,
        address_cep: row.get_opt("address_cep")?,
        address_street: row.get_opt("address_street")?,
        address_number: row.get_opt("address_number")?,
        address_complement: row.get_opt("address_complement")?,
        address_neighborhood: row.get_opt("address_neighborhood")?,
        address_city: row.get_opt("address_city")?,
        address_state: row.get_opt("address_state")?,
        professional_title: row.get_opt("professional_title")?,
        experience_years: row.get_opt("experience_years")?,
        sector: row.get_opt("sector")?,
        level: row.get_opt("level")?,
        work_modality: row.get_opt("work_modality")?,
        salary_expectation: row.get_opt("salary_expectation")?,
        summary: row.get_opt("summary")?,
        skills: row.get_opt("skills")?,
        languages: row.get_opt("languages")?,
        education_level: row.get_opt("education_level")?,
        course: row.get_opt("course")?,
        institution: row.get_opt("institution")?,
        graduation_year: row.get_opt("graduation_year")?,
        availability_status: row.get_opt("availability_status")?,
        start_availability: row.get_opt("start_availability")?,
    })
}

fn row_to_company_profile(row: &SqlRow) -> StoreResult<CompanyProfile> {
    Ok(CompanyProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        cnpj: row.get_opt("cnpj")?,
        company_type: row.get_opt("company_type")?,
        founded_year: row.get_opt("founded_year")?,
        sector: row.get_opt("sector")?,
        employees_count: row.get_opt("employees_count")?,
        tagline: row.get_opt("tagline")?,
        description: row.get_opt("description")?,
        address_cep: row.get_opt("address_cep")?,
        address_street: row.get_opt("address_street")?,
        address_number: row.get_opt("address_number")?,
        address_complement: row.get_opt("address_complement")?,
        address_neighborhood: row.get_opt("address_neighborhood")?,
        address_city: row.get_opt("address_city")?,
        address_state: row.get_opt("address_state")?,
        work_modality: row.get_opt("work_modality")?,
        company_culture: row.get_opt("company_culture")?,
        benefits: row.get_opt("benefits")?,
        areas_of_operation: row.get_opt("areas_of_operation")?,
        website: row.get_opt("website")?,
        linkedin_url: row.get_opt("linkedin_url")?,
        responsible_name: row.get_opt("responsible_name")?,
        responsible_email: row.get_opt("responsible_email")?,
        responsible_phone: row.get_opt("responsible_phone")?,
    })
}

fn row_to_institution_profile(row: &SqlRow) -> StoreResult<InstitutionProfile> {
    Ok(InstitutionProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        cnpj: row.get_opt("cnpj")?,
        institution_type: row.get_opt("institution_type")?,
        founded_year: row.get_opt("founded_year")?,
        students_count: row.get_opt("students_count")?,
        mec_code: row.get_opt("mec_code")?,
        description: row.get_opt("description")?,
        address_cep: row.get_opt("address_cep")?,
        address_street: row.get_opt("address_street")?,
        address_number: row.get_opt("address_number")?,
        address_complement: row.get_opt("address_complement")?,
        address_neighborhood: row.get_opt("address_neighborhood")?,
        address_city: row.get_opt("address_city")?,
        address_state: row.get_opt("address_state")?,
        courses_offered: row.get_opt("courses_offered")?,
        education_levels: row.get_opt("education_levels")?,
        modalities: row.get_opt("modalities")?,
        specialization_areas: row.get_opt("specialization_areas")?,
        special_programs: row.get_opt("special_programs")?,
        website: row.get_opt("website")?,
        linkedin_url: row.get_opt("linkedin_url")?,
        responsible_name: row.get_opt("responsible_name")?,
        responsible_email: row.get_opt("responsible_email")?,
        responsible_phone: row.get_opt("responsible_phone")?,
    })
}
