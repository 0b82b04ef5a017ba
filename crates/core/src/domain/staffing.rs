// Substitute availability windows & staff time-off requests

use super::entity::{Column, Draft, Entity, EntityKind};
use super::error::{require_range, require_text, Result};
use super::people::{StaffId, SubstituteId};
use super::value::FieldValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type AvailabilityId = i64;
pub type TimeOffRequestId = i64;

/// A window during which a substitute can cover; windows may overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub substitute_id: SubstituteId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAvailability {
    pub substitute_id: SubstituteId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityField {
    Id,
    SubstituteId,
    StartDate,
    EndDate,
}

impl Column for AvailabilityField {
    fn column(self) -> &'static str {
        match self {
            AvailabilityField::Id => "ID",
            AvailabilityField::SubstituteId => "SubstituteID",
            AvailabilityField::StartDate => "StartDate",
            AvailabilityField::EndDate => "EndDate",
        }
    }
}

impl Draft for NewAvailability {
    fn validate(&self) -> Result<()> {
        require_range(self.start_date, self.end_date)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("SubstituteID", self.substitute_id.into()),
            ("StartDate", self.start_date.into()),
            ("EndDate", self.end_date.into()),
        ]
    }
}

impl Entity for Availability {
    type Id = AvailabilityId;
    type Draft = NewAvailability;
    type Field = AvailabilityField;

    const KIND: EntityKind = EntityKind::Availability;

    fn id(&self) -> &AvailabilityId {
        &self.id
    }
}

/// A staff absence, optionally covered by a substitute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub id: TimeOffRequestId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub staff_id: StaffId,
    pub substitute_id: Option<SubstituteId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeOffRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub staff_id: StaffId,
    pub substitute_id: Option<SubstituteId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffRequestField {
    Id,
    StartDate,
    EndDate,
    Reason,
    StaffId,
    SubstituteId,
}

impl Column for TimeOffRequestField {
    fn column(self) -> &'static str {
        match self {
            TimeOffRequestField::Id => "ID",
            TimeOffRequestField::StartDate => "StartDate",
            TimeOffRequestField::EndDate => "EndDate",
            TimeOffRequestField::Reason => "Reason",
            TimeOffRequestField::StaffId => "StaffID",
            TimeOffRequestField::SubstituteId => "SubstituteID",
        }
    }
}

impl Draft for NewTimeOffRequest {
    fn validate(&self) -> Result<()> {
        require_range(self.start_date, self.end_date)?;
        require_text("TimeOffRequest.Reason", &self.reason)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("StartDate", self.start_date.into()),
            ("EndDate", self.end_date.into()),
            ("Reason", self.reason.clone().into()),
            ("StaffID", self.staff_id.into()),
            ("SubstituteID", self.substitute_id.into()),
        ]
    }
}

impl Entity for TimeOffRequest {
    type Id = TimeOffRequestId;
    type Draft = NewTimeOffRequest;
    type Field = TimeOffRequestField;

    const KIND: EntityKind = EntityKind::TimeOffRequest;

    fn id(&self) -> &TimeOffRequestId {
        &self.id
    }
}
