// Transaction port for atomic operations

use crate::domain::{
    Class, ClassId, Link, NewClass, NewTimeOffRequest, StaffId, StudentId, SubstituteId,
    TimeOffRequestId,
};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction; deferred foreign keys are checked here
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Repository able to open a school transaction
#[async_trait]
pub trait TransactionalSchoolRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn SchoolTransaction>>;
}

/// School operations within a transaction
#[async_trait]
pub trait SchoolTransaction: Transaction {
    async fn staff_id_by_number(&mut self, number: &str) -> Result<Option<StaffId>>;

    async fn substitute_id_by_number(&mut self, number: &str) -> Result<Option<SubstituteId>>;

    async fn class_by_number(&mut self, number: &str) -> Result<Option<Class>>;

    async fn room_exists(&mut self, number: &str) -> Result<bool>;

    async fn class_type_exists(&mut self, code: &str) -> Result<bool>;

    /// True when one availability window spans the whole range
    async fn substitute_covers(
        &mut self,
        substitute_id: SubstituteId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool>;

    async fn insert_time_off(&mut self, request: &NewTimeOffRequest) -> Result<TimeOffRequestId>;

    /// Next free class id (max + 1)
    async fn next_class_id(&mut self) -> Result<ClassId>;

    async fn insert_class(&mut self, id: ClassId, class: &NewClass) -> Result<()>;

    /// Insert a join row; false if the pair already existed
    async fn link_if_absent(&mut self, link: &Link) -> Result<bool>;

    /// Students of `grade` not in a homeroom other than `class_id`
    async fn homeroom_candidates(&mut self, grade: &str, class_id: ClassId)
        -> Result<Vec<StudentId>>;
}
