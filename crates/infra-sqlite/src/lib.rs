// Schoolhouse Infrastructure - SQLite Adapter
// Implements: SchoolQueries, TransactionalSchoolRepository; schema bootstrap and seed import

mod connection;
mod crud;
mod entity;
mod error;
mod queries;
mod repository;
mod schema;
mod seed;
mod transaction;

pub use connection::create_pool;
pub use entity::SqlEntity;
pub use repository::SqliteSchoolRepository;
pub use schema::{
    apply_schema, schema_exists, schema_statements, table_columns, SetupMode, SCHEMA_SQL,
    SCHEMA_TABLES,
};
pub use seed::{import_csv_dir, verify_csv_headers, SeedReport, SeedStatus, TableSeed};
pub use transaction::SqliteSchoolTransaction;

// Note: sqlx::Error conversion is handled by `error::map_sqlx_error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
