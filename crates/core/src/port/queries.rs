// School Queries Port (Interface)

use crate::domain::{
    AvailableSubstitute, ClassAssignment, ClassListing, GuardianContact, PersonLookup, Room,
    ScheduledClass, Staff, StaffId, Student, TimeOffDetails, TimeOffRequestId,
};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read-side queries over the school schema
#[async_trait]
pub trait SchoolQueries: Send + Sync {
    /// Substitutes with an availability window spanning [start, end], by last then first name
    async fn substitutes_available(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailableSubstitute>>;

    async fn students_in_class(&self, class_number: &str) -> Result<Vec<Student>>;

    async fn staff_in_class(&self, class_number: &str) -> Result<Vec<Staff>>;

    /// Students then staff assigned to a class
    async fn class_assignments(&self, class_number: &str) -> Result<Vec<ClassAssignment>>;

    async fn classes_for_student(&self, student_number: &str) -> Result<Vec<ScheduledClass>>;

    async fn guardians_of_student(&self, student_number: &str) -> Result<Vec<GuardianContact>>;

    async fn find_students(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>>;

    async fn find_staff(&self, lookup: &PersonLookup) -> Result<Vec<Staff>>;

    async fn find_guardians(&self, lookup: &PersonLookup) -> Result<Vec<GuardianContact>>;

    async fn staff_by_number(&self, number: &str) -> Result<Option<Staff>>;

    /// Rooms ordered by number, optionally only those seating at least `min_capacity`
    async fn list_rooms(&self, min_capacity: Option<i64>) -> Result<Vec<Room>>;

    /// Classes with their staff; `grade` matches the class type code prefix
    async fn list_classes(&self, grade: Option<&str>) -> Result<Vec<ClassListing>>;

    async fn time_off_details(&self, id: TimeOffRequestId) -> Result<Option<TimeOffDetails>>;

    /// Requests by one staff member overlapping [start, end]
    async fn time_off_for_staff(
        &self,
        staff_id: StaffId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeOffDetails>>;
}
