// Time Off Service - staff absences and substitute coverage

pub mod request;
pub mod suggest;

#[cfg(test)]
mod request_test;
#[cfg(test)]
mod suggest_test;

pub use request::TimeOffInput;
pub use suggest::SubstituteSuggestion;

use crate::domain::TimeOffDetails;
use crate::error::Result;
use crate::port::{SchoolQueries, TransactionalSchoolRepository};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct TimeOffService {
    repo: Arc<dyn TransactionalSchoolRepository>,
    queries: Arc<dyn SchoolQueries>,
}

impl TimeOffService {
    pub fn new(
        repo: Arc<dyn TransactionalSchoolRepository>,
        queries: Arc<dyn SchoolQueries>,
    ) -> Self {
        Self { repo, queries }
    }

    /// Record a time-off request, optionally with a covering substitute
    pub async fn request_time_off(&self, input: TimeOffInput) -> Result<TimeOffDetails> {
        request::execute(self.repo.as_ref(), self.queries.as_ref(), input).await
    }

    /// Existing coverage for the range, or substitutes free to cover it
    pub async fn suggest_substitutes(
        &self,
        staff_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SubstituteSuggestion> {
        suggest::execute(self.queries.as_ref(), staff_number, start, end).await
    }
}
