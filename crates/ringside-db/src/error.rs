//! Database error types

use ringside_types::RingsideError;
use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Boxer with name '{0}' already exists")]
    Duplicate(String),

    #[error(transparent)]
    Rejected(#[from] RingsideError),
}

impl DbError {
    /// Whether the failure came from the store itself rather than the request
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Migration(_) | Self::Query(_))
    }
}

impl From<DbError> for RingsideError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => RingsideError::NotFound { what },
            DbError::Duplicate(name) => RingsideError::DuplicateEntity { name },
            DbError::Rejected(inner) => inner,
            other => RingsideError::storage(other.to_string()),
        }
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mapping() {
        let err: RingsideError = DbError::Duplicate("Ali".to_string()).into();
        assert_eq!(err, RingsideError::DuplicateEntity { name: "Ali".to_string() });

        let err: RingsideError = DbError::NotFound("Boxer 'Ali'".to_string()).into();
        assert_eq!(err, RingsideError::boxer_not_found("Ali"));

        let err: RingsideError = DbError::Connection("refused".to_string()).into();
        assert!(matches!(err, RingsideError::StorageUnavailable { .. }));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_rejections_pass_through() {
        let inner = RingsideError::invalid_attribute("age", "0 must be greater than 0");
        let db: DbError = inner.clone().into();
        assert!(!db.is_storage());
        assert_eq!(RingsideError::from(db), inner);
    }
}
