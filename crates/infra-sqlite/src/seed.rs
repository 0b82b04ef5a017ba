// CSV Seed Import
// One `<Table>.csv` per table; the header row names the columns.

use crate::crud::bind_value;
use crate::error::map_sqlx_error;
use crate::schema::{table_columns, SCHEMA_TABLES};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use schoolhouse_core::domain::{parse_duration_minutes, DomainError, FieldValue};
use schoolhouse_core::error::{AppError, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedStatus {
    /// No CSV file for the table
    Missing,
    /// Header row read and every column is known
    Verified { headers: Vec<String> },
    Loaded { rows: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSeed {
    pub table: &'static str,
    pub path: PathBuf,
    pub status: SeedStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub tables: Vec<TableSeed>,
}

impl SeedReport {
    /// No table missing or failed
    pub fn is_clean(&self) -> bool {
        self.tables.iter().all(|t| {
            matches!(
                t.status,
                SeedStatus::Verified { .. } | SeedStatus::Loaded { .. }
            )
        })
    }

    pub fn loaded_rows(&self) -> u64 {
        self.tables
            .iter()
            .map(|t| match t.status {
                SeedStatus::Loaded { rows } => rows,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TableSeed> {
        self.tables
            .iter()
            .filter(|t| matches!(t.status, SeedStatus::Failed { .. }))
    }

    pub fn status_of(&self, table: &str) -> Option<&SeedStatus> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| &t.status)
    }
}

fn require_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(AppError::Config(format!(
            "seed directory {} not found",
            dir.display()
        )));
    }
    Ok(())
}

fn csv_error(path: &Path, err: csv::Error) -> AppError {
    AppError::Serialization(format!("{}: {}", path.display(), err))
}

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| csv_error(path, e))?;

    Ok((headers, records))
}

/// Every header must name a column of the table; headers are spliced into SQL
fn check_headers(table: &str, headers: &[String]) -> Result<()> {
    let columns = table_columns(table)
        .ok_or_else(|| AppError::Internal(format!("unknown table {}", table)))?;

    if headers.is_empty() {
        return Err(AppError::Serialization(format!(
            "{}.csv has no header row",
            table
        )));
    }
    if let Some(unknown) = headers.iter().find(|h| !columns.contains(&h.as_str())) {
        return Err(AppError::Serialization(format!(
            "{}.csv: unknown column '{}' (expected some of {})",
            table,
            unknown,
            columns.join(", ")
        )));
    }
    Ok(())
}

/// Convert one CSV cell; empty cells are NULL
fn csv_value(column: &str, raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Null);
    }

    match column {
        "AdminAccess" => match raw.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(FieldValue::Bool(true)),
            "false" | "f" | "0" | "no" | "n" => Ok(FieldValue::Bool(false)),
            _ => Err(DomainError::InvalidValue {
                field: "StaffType.AdminAccess",
                reason: format!("'{}' is not a boolean", raw),
            }
            .into()),
        },
        "Duration" => parse_duration_minutes(raw)
            .map(FieldValue::Integer)
            .ok_or_else(|| {
                DomainError::InvalidValue {
                    field: "Class.Duration",
                    reason: format!("'{}' is not a duration", raw),
                }
                .into()
            }),
        "StartDate" | "EndDate" => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(FieldValue::Date)
            .map_err(|_| {
                DomainError::InvalidValue {
                    field: "StartDate/EndDate",
                    reason: format!("'{}' is not a YYYY-MM-DD date", raw),
                }
                .into()
            }),
        "StartTime" => NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map(FieldValue::Time)
            .map_err(|_| {
                DomainError::InvalidValue {
                    field: "Class.StartTime",
                    reason: format!("'{}' is not a time of day", raw),
                }
                .into()
            }),
        _ => Ok(FieldValue::Text(raw.to_string())),
    }
}

fn seed_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.csv", table))
}

/// Report presence and header row of every table's CSV without touching the database
pub fn verify_csv_headers(dir: &Path) -> Result<SeedReport> {
    require_dir(dir)?;

    let mut report = SeedReport::default();
    for table in SCHEMA_TABLES {
        let path = seed_path(dir, table);
        let status = if !path.is_file() {
            warn!(table, path = %path.display(), "CSV file not found");
            SeedStatus::Missing
        } else {
            match read_csv(&path).and_then(|(headers, _)| {
                check_headers(table, &headers)?;
                Ok(headers)
            }) {
                Ok(headers) => SeedStatus::Verified { headers },
                Err(e) => {
                    warn!(table, error = %e, "CSV file rejected");
                    SeedStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };
        report.tables.push(TableSeed {
            table,
            path,
            status,
        });
    }
    Ok(report)
}

async fn load_table(pool: &SqlitePool, table: &str, path: &Path) -> Result<u64> {
    let (headers, records) = read_csv(path)?;
    check_headers(table, &headers)?;

    let columns: Vec<String> = headers.iter().map(|h| format!("\"{}\"", h)).collect();
    let sql = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        vec!["?"; headers.len()].join(", ")
    );

    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;
    for record in &records {
        let mut query = sqlx::query(&sql);
        for (header, raw) in headers.iter().zip(record.iter()) {
            query = bind_value(query, csv_value(header, raw)?);
        }
        query.execute(&mut *tx).await.map_err(map_sqlx_error)?;
    }
    tx.commit().await.map_err(map_sqlx_error)?;

    Ok(records.len() as u64)
}

/// Load every present CSV, parents first, one transaction per table
///
/// A failing table is rolled back and reported; the remaining tables still load.
pub async fn import_csv_dir(pool: &SqlitePool, dir: &Path) -> Result<SeedReport> {
    require_dir(dir)?;
    info!(dir = %dir.display(), "Importing seed data");

    let mut report = SeedReport::default();
    for table in SCHEMA_TABLES {
        let path = seed_path(dir, table);
        let status = if !path.is_file() {
            warn!(table, "No seed file, skipping");
            SeedStatus::Missing
        } else {
            match load_table(pool, table, &path).await {
                Ok(rows) => {
                    info!(table, rows, "Table loaded");
                    SeedStatus::Loaded { rows }
                }
                Err(e) => {
                    warn!(table, error = %e, "Table load failed");
                    SeedStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };
        report.tables.push(TableSeed {
            table,
            path,
            status,
        });
    }

    info!(
        rows = report.loaded_rows(),
        failed = report.failures().count(),
        "Seed import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{apply_schema, create_pool, SetupMode};
    use std::fs;

    fn write(dir: &Path, table: &str, body: &str) {
        fs::write(seed_path(dir, table), body).unwrap();
    }

    #[test]
    fn test_csv_value_conversions() {
        assert_eq!(csv_value("Email", "").unwrap(), FieldValue::Null);
        assert_eq!(
            csv_value("AdminAccess", "t").unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            csv_value("Duration", "01:00:00").unwrap(),
            FieldValue::Integer(60)
        );
        assert!(csv_value("AdminAccess", "maybe").is_err());
    }

    #[test]
    fn test_csv_dates_and_times_are_parsed() {
        assert_eq!(
            csv_value("StartDate", "2024-05-01").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(
            csv_value("StartTime", "08:30").unwrap(),
            FieldValue::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
        );
        assert!(csv_value("EndDate", "05/31/2024").is_err());
        assert!(csv_value("StartDate", "junk").is_err());
        assert!(csv_value("StartTime", "half past eight").is_err());
    }

    #[test]
    fn test_unknown_header_rejected() {
        let headers = vec!["ID".to_string(), "Name); DROP TABLE State; --".to_string()];
        let err = check_headers("State", &headers).unwrap_err();
        assert!(err.to_string().contains("unknown column"));
    }

    #[test]
    fn test_verify_reports_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "State", "ID,Name\nNE,Nebraska\n");

        let report = verify_csv_headers(dir.path()).unwrap();
        assert_eq!(report.tables.len(), SCHEMA_TABLES.len());
        assert_eq!(
            report.status_of("State"),
            Some(&SeedStatus::Verified {
                headers: vec!["ID".to_string(), "Name".to_string()]
            })
        );
        assert_eq!(report.status_of("Room"), Some(&SeedStatus::Missing));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_verify_missing_dir_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            verify_csv_headers(&missing),
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_import_loads_parents_first() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        apply_schema(&pool, SetupMode::Create).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        // Child file alongside its parent; order on disk does not matter
        write(
            dir.path(),
            "Address",
            "ID,Street,City,StateID,Zip\n1,123 Oak St,Lincoln,NE,68508\n",
        );
        write(dir.path(), "State", "ID,Name\nNE,Nebraska\nIA,Iowa\n");
        write(
            dir.path(),
            "StaffType",
            "ID,Name,AdminAccess\nTCH,Teacher,false\nADM,Administrator,true\n",
        );

        let report = import_csv_dir(&pool, dir.path()).await.unwrap();
        assert_eq!(report.status_of("State"), Some(&SeedStatus::Loaded { rows: 2 }));
        assert_eq!(report.status_of("Address"), Some(&SeedStatus::Loaded { rows: 1 }));
        assert_eq!(report.loaded_rows(), 5);

        let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM StaffType WHERE AdminAccess = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn test_import_failure_is_isolated_to_table() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        apply_schema(&pool, SetupMode::Create).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "State", "ID,Name\nNE,Nebraska\n");
        // References a state that does not exist; fails at commit
        write(
            dir.path(),
            "Address",
            "ID,Street,City,StateID,Zip\n1,1 Main St,Des Moines,IA,50309\n",
        );
        write(dir.path(), "Room", "Number,Capacity,PhoneNumber\n101,24,\n");

        let report = import_csv_dir(&pool, dir.path()).await.unwrap();
        assert!(matches!(
            report.status_of("Address"),
            Some(SeedStatus::Failed { .. })
        ));
        assert_eq!(report.status_of("Room"), Some(&SeedStatus::Loaded { rows: 1 }));
        assert_eq!(report.failures().count(), 1);

        let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Address")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(addresses, 0);
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_date() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        apply_schema(&pool, SetupMode::Create).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "State", "ID,Name\nNE,Nebraska\n");
        write(
            dir.path(),
            "Address",
            "ID,Street,City,StateID,Zip\n1,123 Oak St,Lincoln,NE,68508\n",
        );
        write(
            dir.path(),
            "Substitute",
            "ID,Number,FirstName,LastName,PhoneNumber,WorkEmail,AddressID\n\
             1,U001,Cara,Young,,cyoung@school.example.org,1\n",
        );
        write(
            dir.path(),
            "Availability",
            "ID,SubstituteID,StartDate,EndDate\n1,1,05/01/2024,2024-05-31\n",
        );

        let report = import_csv_dir(&pool, dir.path()).await.unwrap();
        assert_eq!(report.status_of("Substitute"), Some(&SeedStatus::Loaded { rows: 1 }));
        match report.status_of("Availability") {
            Some(SeedStatus::Failed { error }) => assert!(error.contains("05/01/2024")),
            other => panic!("expected failure, got {:?}", other),
        }

        let windows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Availability")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(windows, 0);
    }
}
