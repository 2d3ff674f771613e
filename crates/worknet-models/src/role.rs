//! Account roles.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Account role. Determines which profile table extends the user row and
/// which resources the account may own (companies post jobs, institutions
/// publish courses, candidates apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidate,
    Company,
    Institution,
}

impl UserRole {
    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidate => "candidate",
            UserRole::Company => "company",
            UserRole::Institution => "institution",
        }
    }

    /// Parse from the wire/database representation. Unknown values are an
    /// error, not a fallback: a role-less account has no profile table.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "candidate" => Some(UserRole::Candidate),
            "company" => Some(UserRole::Company),
            "institution" => Some(UserRole::Institution),
            _ => None,
        }
    }

    /// Name of the table holding this role's profile row.
    pub fn profile_table(&self) -> &'static str {
        match self {
            UserRole::Candidate => "candidate_profiles",
            UserRole::Company => "company_profiles",
            UserRole::Institution => "institution_profiles",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
