// Port Layer - Interfaces the engine adapter implements

pub mod queries;
pub mod transaction;

// Re-exports
pub use queries::SchoolQueries;
pub use transaction::{SchoolTransaction, Transaction, TransactionalSchoolRepository};
