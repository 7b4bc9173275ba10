use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// `NotFound`, `Conflict` and `InvalidInput` carry user-facing messages;
/// `Database` wraps anything the pool reports that is not a unique violation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl AppError {
    /// Map a write error, turning unique violations into `Conflict`.
    pub fn on_write(err: sqlx::Error, conflict: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                tracing::warn!(error = %err, "unique constraint violated");
                return AppError::Conflict(conflict.into());
            }
        }
        AppError::Database(err)
    }

    /// Map a delete error, turning foreign key violations into `Conflict`.
    pub fn on_delete(err: sqlx::Error, conflict: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                tracing::warn!(error = %err, "row still referenced");
                return AppError::Conflict(conflict.into());
            }
        }
        AppError::Database(err)
    }

    /// Map a write error, turning foreign key violations into `InvalidInput`.
    ///
    /// Covers rows referenced by the write disappearing between validation
    /// and commit.
    pub fn on_reference(err: sqlx::Error, invalid: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                tracing::warn!(error = %err, "referenced row missing");
                return AppError::InvalidInput(invalid.into());
            }
        }
        AppError::Database(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDbError;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(AppError::NotFound("Profile").to_string(), "Profile not found");
        assert_eq!(
            AppError::Conflict("Profile already exists".into()).to_string(),
            "Profile already exists"
        );
    }

    #[test]
    fn unique_violation_on_write_is_conflict() {
        let err = AppError::on_write(FakeDbError::unique().into(), "Ingredient already exists");
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Ingredient already exists"));
    }

    #[test]
    fn foreign_key_violation_on_delete_is_conflict() {
        let err = AppError::on_delete(FakeDbError::foreign_key().into(), "Ingredient is used by a meal");
        assert!(matches!(err, AppError::Conflict(_)));
        // a unique violation is not what a delete guards against
        let err = AppError::on_delete(FakeDbError::unique().into(), "in use");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn foreign_key_violation_on_write_is_invalid_input() {
        let err = AppError::on_reference(FakeDbError::foreign_key().into(), "Unknown ingredient");
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Unknown ingredient"));
        let err = AppError::on_reference(FakeDbError::unique().into(), "Unknown ingredient");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn non_database_write_errors_stay_database() {
        let err = AppError::on_write(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
