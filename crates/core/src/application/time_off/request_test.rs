//! Unit tests for time-off input validation

use super::request::{validate_input, TimeOffInput};
use crate::domain::DomainError;
use crate::error::AppError;
use chrono::NaiveDate;

fn input(start: (i32, u32, u32), end: (i32, u32, u32)) -> TimeOffInput {
    TimeOffInput {
        staff_number: "T100".to_string(),
        start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        reason: "Conference".to_string(),
        substitute_number: None,
    }
}

#[test]
fn test_validate_single_day() {
    assert!(validate_input(&input((2024, 5, 10), (2024, 5, 10))).is_ok());
}

#[test]
fn test_validate_rejects_inverted_range() {
    let result = validate_input(&input((2024, 5, 12), (2024, 5, 10)));
    assert!(matches!(
        result,
        Err(AppError::Validation(DomainError::InvertedRange { .. }))
    ));
}

#[test]
fn test_validate_rejects_blank_reason() {
    let mut req = input((2024, 5, 10), (2024, 5, 11));
    req.reason = String::new();

    let result = validate_input(&req);
    assert!(result.unwrap_err().to_string().contains("Reason"));
}

#[test]
fn test_validate_rejects_blank_substitute_number() {
    let mut req = input((2024, 5, 10), (2024, 5, 11));
    req.substitute_number = Some(String::new());

    assert!(validate_input(&req).is_err());
}
