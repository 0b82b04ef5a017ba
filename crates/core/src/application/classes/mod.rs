// Class Service - scheduling classes and filling rosters

pub mod add_class;
pub mod fill_class;


pub use add_class::AddClassRequest;
pub use fill_class::FillReport;

use crate::domain::Class;
use crate::error::Result;
use crate::port::{SchoolQueries, TransactionalSchoolRepository};
use std::sync::Arc;

pub struct ClassService {
    repo: Arc<dyn TransactionalSchoolRepository>,
    queries: Arc<dyn SchoolQueries>,
}

impl ClassService {
    pub fn new(
        repo: Arc<dyn TransactionalSchoolRepository>,
        queries: Arc<dyn SchoolQueries>,
    ) -> Self {
        Self { repo, queries }
    }

    /// Create a class numbered after its new id
    pub async fn add_class(&self, req: AddClassRequest) -> Result<Class> {
        add_class::execute(self.repo.as_ref(), req).await
    }

    /// Assign a staff member to a class and enroll eligible students of its grade
    pub async fn fill_class(&self, class_number: &str, staff_number: &str) -> Result<FillReport> {
        fill_class::execute(
            self.repo.as_ref(),
            self.queries.as_ref(),
            class_number,
            staff_number,
        )
        .await
    }
}
