use thiserror::Error;

/// Model-layer error types.
///
/// Authentication failure is deliberately not represented here: an unknown
/// username and a wrong password both surface as `Ok(None)` from
/// `UserService::authenticate`, so callers cannot tell them apart.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Raised before any storage access when a signup password is empty.
    #[error("password must be a non-empty string")]
    InvalidPassword,

    #[error("user already followed")]
    AlreadyFollowing,

    /// A uniqueness, not-null or foreign-key constraint was violated at
    /// commit time. The message is the one reported by the store.
    #[error("integrity constraint violated: {0}")]
    Integrity(String),

    #[error("failed to hash password")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("an error occurred while accessing the database")]
    Database(sqlx::Error),
}

impl ModelError {
    pub fn is_integrity(&self) -> bool {
        matches!(self, ModelError::Integrity(_))
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // SQLSTATE class 23: integrity constraint violations
            // (23502 not-null, 23503 foreign key, 23505 unique).
            if db_err.code().is_some_and(|code| code.starts_with("23")) {
                return ModelError::Integrity(db_err.message().to_string());
            }
        }
        ModelError::Database(err)
    }
}

/// True iff the error is a Postgres unique violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code == "23505"),
        _ => false,
    }
}
