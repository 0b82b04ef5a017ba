// Schema Bootstrap

use crate::error::map_sqlx_error;
use schoolhouse_core::error::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Full DDL; wrapped in BEGIN/COMMIT in the file so it also runs as a plain script
pub const SCHEMA_SQL: &str = include_str!("../schema/schema.sql");

/// Every schema table, parents before children
pub const SCHEMA_TABLES: [&str; 15] = [
    "State",
    "Address",
    "Student",
    "Guardian",
    "GuardianToStudent",
    "StaffType",
    "Staff",
    "Substitute",
    "Availability",
    "TimeOffRequest",
    "Room",
    "ClassType",
    "Class",
    "StaffToClass",
    "StudentToClass",
];

/// Column names of one schema table, in DDL order
pub fn table_columns(table: &str) -> Option<&'static [&'static str]> {
    let columns: &'static [&'static str] = match table {
        "State" => &["ID", "Name"],
        "Address" => &["ID", "Street", "City", "StateID", "Zip"],
        "Student" => &["ID", "Number", "FirstName", "LastName", "AddressID", "Grade"],
        "Guardian" => &[
            "ID",
            "Number",
            "FirstName",
            "LastName",
            "Email",
            "PhoneNumber",
            "AddressID",
        ],
        "GuardianToStudent" => &["StudentID", "GuardianID"],
        "StaffType" => &["ID", "Name", "AdminAccess"],
        "Staff" => &[
            "ID",
            "Number",
            "FirstName",
            "LastName",
            "PhoneNumber",
            "WorkEmail",
            "StaffTypeID",
            "AddressID",
        ],
        "Substitute" => &[
            "ID",
            "Number",
            "FirstName",
            "LastName",
            "PhoneNumber",
            "WorkEmail",
            "AddressID",
        ],
        "Availability" => &["ID", "SubstituteID", "StartDate", "EndDate"],
        "TimeOffRequest" => &["ID", "StartDate", "EndDate", "Reason", "StaffID", "SubstituteID"],
        "Room" => &["Number", "Capacity", "PhoneNumber"],
        "ClassType" => &["ID", "Name"],
        "Class" => &["ID", "Number", "ClassTypeID", "RoomNumber", "StartTime", "Duration"],
        "StaffToClass" => &["StaffID", "ClassID"],
        "StudentToClass" => &["StudentID", "ClassID"],
        _ => return None,
    };
    Some(columns)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    /// Create every table; fails if any already exists
    Create,
    /// Drop every table, then create
    Recreate,
}

/// DDL statements without comments and without the file's own BEGIN/COMMIT
pub fn schema_statements() -> Vec<String> {
    SCHEMA_SQL
        .split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| !line.trim().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| {
            !statement.is_empty()
                && !statement.eq_ignore_ascii_case("BEGIN")
                && !statement.eq_ignore_ascii_case("COMMIT")
        })
        .collect()
}

/// Apply the schema in a single transaction
///
/// Any failing statement rolls the whole transaction back, so the database is
/// either fully set up or untouched.
pub async fn apply_schema(pool: &SqlitePool, mode: SetupMode) -> Result<()> {
    info!(?mode, "Applying schema");

    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    if mode == SetupMode::Recreate {
        for table in SCHEMA_TABLES.iter().rev() {
            debug!(table, "Dropping table");
            sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
    }

    for statement in schema_statements() {
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }

    tx.commit().await.map_err(map_sqlx_error)?;

    info!(tables = SCHEMA_TABLES.len(), "Schema applied");
    Ok(())
}

/// True when every schema table is present
pub async fn schema_exists(pool: &SqlitePool) -> Result<bool> {
    let mut present = 0;
    for table in SCHEMA_TABLES {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_one(pool)
                .await
                .map_err(map_sqlx_error)?;
        present += count;
    }
    Ok(present == SCHEMA_TABLES.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_pool;
    use schoolhouse_core::AppError;

    #[test]
    fn test_statements_skip_transaction_control() {
        let statements = schema_statements();
        assert_eq!(statements.len(), SCHEMA_TABLES.len());
        assert!(statements.iter().all(|s| s.starts_with("CREATE TABLE")));
    }

    #[test]
    fn test_statements_follow_table_order() {
        for (statement, table) in schema_statements().iter().zip(SCHEMA_TABLES) {
            assert!(
                statement.starts_with(&format!("CREATE TABLE {} (", table)),
                "expected {} first in: {}",
                table,
                statement
            );
        }
    }

    #[tokio::test]
    async fn test_create_then_create_again_fails() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        apply_schema(&pool, SetupMode::Create).await.unwrap();
        assert!(schema_exists(&pool).await.unwrap());

        let err = apply_schema(&pool, SetupMode::Create).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("already exists"));

        // Failed run left the schema as it was
        assert!(schema_exists(&pool).await.unwrap());
    }

    #[tokio::test]
    async fn test_table_columns_match_ddl() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        apply_schema(&pool, SetupMode::Create).await.unwrap();

        for table in SCHEMA_TABLES {
            let actual: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
                    .bind(table)
                    .fetch_all(&pool)
                    .await
                    .unwrap();
            let expected = table_columns(table).unwrap();
            assert_eq!(actual, expected, "columns of {}", table);
        }
        assert!(table_columns("Teacher").is_none());
    }

    #[tokio::test]
    async fn test_recreate_is_idempotent() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        apply_schema(&pool, SetupMode::Recreate).await.unwrap();
        sqlx::query("INSERT INTO State (ID, Name) VALUES ('NE', 'Nebraska')")
            .execute(&pool)
            .await
            .unwrap();

        apply_schema(&pool, SetupMode::Recreate).await.unwrap();
        let states: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM State")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(states, 0);
    }
}
