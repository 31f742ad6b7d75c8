use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures surfaced by the client repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Referential constraint violated: {0}")]
    ReferentialConstraint(String),
    #[error("Connection failure: {0}")]
    Connection(String),
    #[error("Database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row not found".into()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::ForeignKeyViolation => {
                    RepositoryError::ReferentialConstraint(db_err.message().to_string())
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    RepositoryError::Validation(db_err.message().to_string())
                }
                _ => RepositoryError::Database(db_err.to_string()),
            },
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RepositoryError::Connection(err.to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}
