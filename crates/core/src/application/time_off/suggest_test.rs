//! Suggest-substitutes decisions against an in-memory query fake

use super::suggest::{execute, SubstituteSuggestion};
use crate::domain::{
    AvailableSubstitute, ClassAssignment, ClassListing, GuardianContact, PersonLookup, PersonRef,
    Room, ScheduledClass, Staff, StaffId, Student, TimeOffDetails, TimeOffRequestId,
};
use crate::error::{AppError, Result};
use crate::port::SchoolQueries;
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Default)]
struct FakeQueries {
    staff: Option<Staff>,
    requests: Vec<TimeOffDetails>,
    available: Vec<AvailableSubstitute>,
}

#[async_trait]
impl SchoolQueries for FakeQueries {
    async fn substitutes_available(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<AvailableSubstitute>> {
        Ok(self.available.clone())
    }

    async fn students_in_class(&self, _class_number: &str) -> Result<Vec<Student>> {
        Ok(Vec::new())
    }

    async fn staff_in_class(&self, _class_number: &str) -> Result<Vec<Staff>> {
        Ok(Vec::new())
    }

    async fn class_assignments(&self, _class_number: &str) -> Result<Vec<ClassAssignment>> {
        Ok(Vec::new())
    }

    async fn classes_for_student(&self, _student_number: &str) -> Result<Vec<ScheduledClass>> {
        Ok(Vec::new())
    }

    async fn guardians_of_student(&self, _student_number: &str) -> Result<Vec<GuardianContact>> {
        Ok(Vec::new())
    }

    async fn find_students(&self, _first_name: &str, _last_name: &str) -> Result<Vec<Student>> {
        Ok(Vec::new())
    }

    async fn find_staff(&self, _lookup: &PersonLookup) -> Result<Vec<Staff>> {
        Ok(self.staff.iter().cloned().collect())
    }

    async fn find_guardians(&self, _lookup: &PersonLookup) -> Result<Vec<GuardianContact>> {
        Ok(Vec::new())
    }

    async fn staff_by_number(&self, number: &str) -> Result<Option<Staff>> {
        Ok(self.staff.clone().filter(|s| s.number == number))
    }

    async fn list_rooms(&self, _min_capacity: Option<i64>) -> Result<Vec<Room>> {
        Ok(Vec::new())
    }

    async fn list_classes(&self, _grade: Option<&str>) -> Result<Vec<ClassListing>> {
        Ok(Vec::new())
    }

    async fn time_off_details(&self, id: TimeOffRequestId) -> Result<Option<TimeOffDetails>> {
        Ok(self.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn time_off_for_staff(
        &self,
        _staff_id: StaffId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeOffDetails>> {
        Ok(self
            .requests
            .iter()
            .filter(|r| r.start_date <= end && r.end_date >= start)
            .cloned()
            .collect())
    }
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn person(number: &str, first: &str, last: &str) -> PersonRef {
    PersonRef {
        number: number.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

fn teacher() -> Staff {
    Staff {
        id: 1,
        number: "T100".to_string(),
        first_name: "Maria".to_string(),
        last_name: "Diaz".to_string(),
        phone_number: "402-555-0101".to_string(),
        work_email: "mdiaz@nee.edu".to_string(),
        staff_type_id: "TCH".to_string(),
        address_id: 1,
    }
}

fn request(id: i64, start: u32, end: u32, substitute: Option<PersonRef>) -> TimeOffDetails {
    TimeOffDetails {
        id,
        start_date: date(start),
        end_date: date(end),
        reason: "Conference".to_string(),
        staff: person("T100", "Maria", "Diaz"),
        substitute,
    }
}

fn candidate() -> AvailableSubstitute {
    AvailableSubstitute {
        number: "SUB1".to_string(),
        first_name: "Joe".to_string(),
        last_name: "Park".to_string(),
        work_email: "jpark@nee.edu".to_string(),
        start_date: date(1),
        end_date: date(31),
    }
}

#[test]
fn test_unknown_staff_is_not_found() {
    let queries = FakeQueries::default();
    let result = tokio_test::block_on(execute(&queries, "T999", date(10), date(10)));
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn test_covered_request_short_circuits() {
    let queries = FakeQueries {
        staff: Some(teacher()),
        requests: vec![
            request(1, 9, 10, None),
            request(2, 10, 12, Some(person("SUB1", "Joe", "Park"))),
        ],
        available: vec![candidate()],
    };

    let result = tokio_test::block_on(execute(&queries, "T100", date(10), date(10))).unwrap();
    match result {
        SubstituteSuggestion::AlreadyCovered { request } => assert_eq!(request.id, 2),
        other => panic!("expected AlreadyCovered, got {:?}", other),
    }
}

#[test]
fn test_uncovered_range_lists_candidates() {
    let queries = FakeQueries {
        staff: Some(teacher()),
        requests: vec![request(1, 9, 10, None)],
        available: vec![candidate()],
    };

    let result = tokio_test::block_on(execute(&queries, "T100", date(10), date(11))).unwrap();
    match result {
        SubstituteSuggestion::Candidates { substitutes } => {
            assert_eq!(substitutes.len(), 1);
            assert_eq!(substitutes[0].number, "SUB1");
        }
        other => panic!("expected Candidates, got {:?}", other),
    }
}

#[test]
fn test_inverted_range_rejected_before_lookup() {
    let queries = FakeQueries::default();
    let result = tokio_test::block_on(execute(&queries, "T100", date(12), date(10)));
    assert!(matches!(result, Err(AppError::Validation(_))));
}
