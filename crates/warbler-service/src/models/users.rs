use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::ModelError;

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// The bcrypt hash of the user's password, never the plaintext.
    pub password: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Signup payload. The password here is still plaintext; it is hashed
/// before the row is staged for insertion.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

impl User {
    /// Uses bcrypt to verify a candidate password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password).unwrap_or(false)
    }

    /// Generates a salted bcrypt hash for a new password.
    ///
    /// An empty password is rejected here, before any storage access.
    pub fn hash_password(password: &str) -> Result<String, ModelError> {
        if password.is_empty() {
            return Err(ModelError::InvalidPassword);
        }
        Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
    }
}
