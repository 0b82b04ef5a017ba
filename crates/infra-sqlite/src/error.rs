// sqlx::Error -> AppError

use schoolhouse_core::error::{AppError, ConstraintKind};
use sqlx::error::ErrorKind;

// SQLite result codes: https://www.sqlite.org/rescode.html
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_AUTH: i32 = 23;
const SQLITE_NOTADB: i32 = 26;

const CONSTRAINT_CHECK: i32 = 275;
const CONSTRAINT_FOREIGNKEY: i32 = 787;
const CONSTRAINT_NOTNULL: i32 = 1299;
const CONSTRAINT_PRIMARYKEY: i32 = 1555;
const CONSTRAINT_UNIQUE: i32 = 2067;

/// Convert sqlx::Error to AppError, classifying constraint failures by extended result code
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err
                .code()
                .and_then(|c| c.parse::<i32>().ok())
                .unwrap_or_default();

            let kind = match code {
                CONSTRAINT_UNIQUE => Some(ConstraintKind::Unique),
                CONSTRAINT_PRIMARYKEY => Some(ConstraintKind::PrimaryKey),
                CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
                CONSTRAINT_NOTNULL => Some(ConstraintKind::NotNull),
                CONSTRAINT_CHECK => Some(ConstraintKind::Check),
                _ => match db_err.kind() {
                    ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                    ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                    ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                    ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                    _ => None,
                },
            };

            if let Some(kind) = kind {
                return AppError::ConstraintViolation {
                    kind,
                    message: db_err.message().to_string(),
                };
            }

            // Primary code lives in the low byte
            match code & 0xff {
                SQLITE_CANTOPEN | SQLITE_AUTH | SQLITE_NOTADB => {
                    AppError::Connection(db_err.message().to_string())
                }
                _ => AppError::Database(format!("[{}] {}", code, db_err.message())),
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => AppError::Connection(err.to_string()),
        sqlx::Error::RowNotFound => AppError::NotFound("row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

/// Deferred foreign-key failure while committing a delete means a dependent row still exists
pub(crate) fn map_delete_commit_error(err: sqlx::Error, entity: &str, id: &str) -> AppError {
    match map_sqlx_error(err) {
        AppError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            message,
        } => AppError::ReferentialIntegrity {
            entity: entity.to_string(),
            id: id.to_string(),
            dependent: message,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            AppError::Connection(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            AppError::Connection(_)
        ));
    }

    #[test]
    fn test_row_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }
}
