// sqlx::Error -> AppError mapping
// (orphan rules: cannot implement From<sqlx::Error> for AppError here)

use giftstore_core::error::AppError;
use sqlx::error::{DatabaseError, ErrorKind};

/// Convert sqlx::Error to AppError with structured information
pub fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => map_database_error(db_err.as_ref()),
        sqlx::Error::RowNotFound => AppError::NotFound("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        sqlx::Error::ColumnDecode { index, source } => {
            AppError::Database(format!("Failed to decode column {}: {}", index, source))
        }
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

/// Constraint violations are classified by sqlx; everything else stays a
/// database error tagged with its SQLite result code
fn map_database_error(db_err: &dyn DatabaseError) -> AppError {
    let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();

    match db_err.kind() {
        ErrorKind::UniqueViolation => AppError::Conflict(format!(
            "Unique constraint violation: {} ({})",
            db_err.message(),
            code
        )),
        ErrorKind::ForeignKeyViolation => AppError::Conflict(format!(
            "Foreign key constraint violation: {} ({})",
            db_err.message(),
            code
        )),
        ErrorKind::NotNullViolation | ErrorKind::CheckViolation => AppError::Validation(format!(
            "Constraint violation: {} ({})",
            db_err.message(),
            code
        )),
        // SQLITE_BUSY - database is locked
        _ if code == "5" => AppError::Database(format!(
            "Database locked (SQLITE_BUSY): {}",
            db_err.message()
        )),
        _ if code.is_empty() => AppError::Database(format!("Database error: {}", db_err.message())),
        _ => AppError::Database(format!(
            "Database error [{}]: {}",
            code,
            db_err.message()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, DatabaseOptions};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    /// Driver error with a fixed result code and no constraint kind
    #[derive(Debug)]
    struct CodedError {
        code: &'static str,
        message: &'static str,
    }

    impl fmt::Display for CodedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for CodedError {}

    impl DatabaseError for CodedError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_column_not_found_keeps_column_name() {
        let err = map_sqlx_error(sqlx::Error::ColumnNotFound("price".into()));
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_io_lock_error_is_not_a_conflict() {
        // SQLITE_IOERR_LOCK
        let err = map_sqlx_error(sqlx::Error::Database(Box::new(CodedError {
            code: "3850",
            message: "disk I/O error",
        })));

        match err {
            AppError::Database(message) => assert!(message.contains("3850")),
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn test_busy_is_reported_as_locked() {
        let err = map_sqlx_error(sqlx::Error::Database(Box::new(CodedError {
            code: "5",
            message: "database is locked",
        })));
        assert!(err.to_string().contains("SQLITE_BUSY"));
    }

    #[tokio::test]
    async fn test_foreign_key_violation_is_conflict() {
        let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE parent (id INTEGER PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id))")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO child (parent_id) VALUES (1)")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(map_sqlx_error(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_syntax_error_is_database_error() {
        let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
        let err = sqlx::query("SELEC 1").execute(&pool).await.unwrap_err();
        assert!(matches!(map_sqlx_error(err), AppError::Database(_)));
    }
}
