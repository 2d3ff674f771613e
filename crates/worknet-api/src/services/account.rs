//! Account service: registration and credential checks.

use tracing::{info, warn};

use worknet_models::{User, UserRole};
use worknet_store::{Database, ProfileRepository, StoreError, UserRepository};

use crate::error::{ApiError, ApiResult};
use crate::security;

/// Registration and login orchestration over the user/profile tables.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
}

impl AccountService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create an account and its empty role-matching profile row.
    /// Returns the new user id.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        name: &str,
        phone: Option<&str>,
    ) -> ApiResult<i64> {
        let users = UserRepository::new(self.db.clone());

        if users.email_exists(email).await? {
            return Err(ApiError::conflict("This email is already registered"));
        }

        let password_hash = security::hash_password(password)?;

        // The unique constraint still backstops a registration race
        let user_id = match users
            .create(email, &password_hash, role, name, phone)
            .await
        {
            Ok(id) => id,
            Err(StoreError::AlreadyExists(_)) => {
                return Err(ApiError::conflict("This email is already registered"));
            }
            Err(e) => return Err(e.into()),
        };

        ProfileRepository::new(self.db.clone())
            .create_empty(user_id, role)
            .await?;

        info!(user_id, %role, "Account created");
        Ok(user_id)
    }

    /// Verify credentials and return the user. The error message never
    /// reveals whether the email or the password was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<User> {
        let users = UserRepository::new(self.db.clone());

        let Some(user) = users.find_by_email(email).await? else {
            return Err(ApiError::unauthorized("Invalid email or password"));
        };

        if !security::verify_password(&user.password_hash, password) {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }

        if !user.is_active {
            return Err(ApiError::forbidden("This account has been deactivated"));
        }

        Ok(user)
    }

    /// Load a user by id, erroring when the account vanished underneath a
    /// still-valid session.
    pub async fn get_user(&self, user_id: i64) -> ApiResult<User> {
        UserRepository::new(self.db.clone())
            .get(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))
    }
}
