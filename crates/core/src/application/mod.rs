// Application Layer - Administrative use cases

pub mod classes;
pub mod time_off;

// Re-exports
pub use classes::{AddClassRequest, ClassService, FillReport};
pub use time_off::{SubstituteSuggestion, TimeOffInput, TimeOffService};
