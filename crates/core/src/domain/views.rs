// Read models returned by the domain queries

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Number and name of a person, enough to identify them on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
}

/// How to look a person up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonLookup {
    ByName {
        first_name: String,
        last_name: String,
    },
    ByPhone(String),
}

/// Substitute with the availability window that matched the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSubstitute {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub work_email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Guardian with resolved mailing address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardianContact {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub street: String,
    pub city: String,
    pub state_name: String,
    pub zip: String,
}

/// Class row for the schedule listing; `staff_number` is empty for unstaffed classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassListing {
    pub number: String,
    pub class_type_name: String,
    pub room_number: String,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub staff_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledClass {
    pub number: String,
    pub class_type_name: String,
    pub room_number: String,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentRole {
    Student,
    Staff,
}

impl std::fmt::Display for AssignmentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentRole::Student => write!(f, "student"),
            AssignmentRole::Staff => write!(f, "staff"),
        }
    }
}

/// Person number assigned to a class, tagged by role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassAssignment {
    pub number: String,
    pub role: AssignmentRole,
}

/// Time-off request with staff and substitute resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOffDetails {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub staff: PersonRef,
    pub substitute: Option<PersonRef>,
}
