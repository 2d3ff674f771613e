//! Role-specific profile models.
//!
//! Each profile is a 1:1 extension of a user row, keyed by `user_id`. The
//! descriptive columns are all optional: a profile row is created empty at
//! registration and filled in over time. The same structs double as the
//! `PUT /api/profile` payload, which is why `id` and `user_id` default and
//! unknown fields are rejected.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Candidate profile: personal data, address, and professional summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CandidateProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub birth_date: Option<NaiveDate>,
    pub marital_status: Option<String>,
    pub nationality: Option<String>,
    pub linkedin_url: Option<String>,
    pub address_cep: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub address_neighborhood: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub professional_title: Option<String>,
    pub experience_years: Option<i64>,
    pub sector: Option<String>,
    pub level: Option<String>,
    pub work_modality: Option<String>,
    pub salary_expectation: Option<f64>,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub education_level: Option<String>,
    pub course: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i64>,
    pub availability_status: Option<String>,
    pub start_availability: Option<NaiveDate>,
}

/// Company profile: legal identification, address, and culture fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CompanyProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub cnpj: Option<String>,
    pub company_type: Option<String>,
    pub founded_year: Option<i64>,
    pub sector: Option<String>,
    pub employees_count: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub address_cep: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub address_neighborhood: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub work_modality: Option<String>,
    pub company_culture: Option<String>,
    pub benefits: Option<String>,
    pub areas_of_operation: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_email: Option<String>,
    pub responsible_phone: Option<String>,
}

/// Institution profile: accreditation data and offered programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InstitutionProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub cnpj: Option<String>,
    pub institution_type: Option<String>,
    pub founded_year: Option<i64>,
    pub students_count: Option<i64>,
    pub mec_code: Option<String>,
    pub description: Option<String>,
    pub address_cep: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub address_neighborhood: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub courses_offered: Option<String>,
    pub education_levels: Option<String>,
    pub modalities: Option<String>,
    pub specialization_areas: Option<String>,
    pub special_programs: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_email: Option<String>,
    pub responsible_phone: Option<String>,
}
