// Rooms, class types and scheduled classes

use super::entity::{Column, Draft, Entity, EntityKind};
use super::error::{require_text, DomainError, Result};
use super::value::FieldValue;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub type RoomNumber = String;
pub type ClassTypeCode = String;
pub type ClassId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub number: RoomNumber,
    pub capacity: i64,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Number,
    Capacity,
    PhoneNumber,
}

impl Column for RoomField {
    fn column(self) -> &'static str {
        match self {
            RoomField::Number => "Number",
            RoomField::Capacity => "Capacity",
            RoomField::PhoneNumber => "PhoneNumber",
        }
    }
}

impl Draft for Room {
    fn validate(&self) -> Result<()> {
        require_text("Room.Number", &self.number)?;
        if self.capacity < 0 {
            return Err(DomainError::InvalidValue {
                field: "Room.Capacity",
                reason: format!("{} is negative", self.capacity),
            });
        }
        Ok(())
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("Capacity", self.capacity.into()),
            ("PhoneNumber", self.phone_number.clone().into()),
        ]
    }
}

impl Entity for Room {
    type Id = RoomNumber;
    type Draft = Room;
    type Field = RoomField;

    const KIND: EntityKind = EntityKind::Room;

    fn id(&self) -> &RoomNumber {
        &self.number
    }
}

/// Kind of class; code is `<grade><subject>` (e.g. "3HR", "KART")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassType {
    pub id: ClassTypeCode,
    pub name: String,
}

impl ClassType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Grade taught, taken from the first character of the class type code
pub fn grade_of(class_type_code: &str) -> Option<String> {
    class_type_code
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
}

/// Minutes from either a plain count ("45") or a clock span ("01:15:00", "00:45")
///
/// Clock spans need minutes below 60 and zero seconds; anything that does not
/// fit in an `i64` is rejected.
pub fn parse_duration_minutes(text: &str) -> Option<i64> {
    let text = text.trim();
    if !text.contains(':') {
        return text.parse().ok();
    }

    let parts: Vec<u32> = text
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<Vec<_>>>()?;
    let (hours, minutes) = match parts.as_slice() {
        [h, m] | [h, m, 0] => (*h, *m),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    i64::from(hours)
        .checked_mul(60)?
        .checked_add(i64::from(minutes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTypeField {
    Id,
    Name,
}

impl Column for ClassTypeField {
    fn column(self) -> &'static str {
        match self {
            ClassTypeField::Id => "ID",
            ClassTypeField::Name => "Name",
        }
    }
}

impl Draft for ClassType {
    fn validate(&self) -> Result<()> {
        require_text("ClassType.ID", &self.id)?;
        require_text("ClassType.Name", &self.name)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("ID", self.id.clone().into()),
            ("Name", self.name.clone().into()),
        ]
    }
}

impl Entity for ClassType {
    type Id = ClassTypeCode;
    type Draft = ClassType;
    type Field = ClassTypeField;

    const KIND: EntityKind = EntityKind::ClassType;

    fn id(&self) -> &ClassTypeCode {
        &self.id
    }
}

/// One scheduled meeting of a class type in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub number: String,
    pub class_type_id: ClassTypeCode,
    pub room_number: RoomNumber,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

impl Class {
    /// Class numbers are derived from the id (`C17`)
    pub fn number_for(id: ClassId) -> String {
        format!("C{}", id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub number: String,
    pub class_type_id: ClassTypeCode,
    pub room_number: RoomNumber,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassField {
    Id,
    Number,
    ClassTypeId,
    RoomNumber,
    StartTime,
    Duration,
}

impl Column for ClassField {
    fn column(self) -> &'static str {
        match self {
            ClassField::Id => "ID",
            ClassField::Number => "Number",
            ClassField::ClassTypeId => "ClassTypeID",
            ClassField::RoomNumber => "RoomNumber",
            ClassField::StartTime => "StartTime",
            ClassField::Duration => "Duration",
        }
    }
}

impl Draft for NewClass {
    fn validate(&self) -> Result<()> {
        require_text("Class.Number", &self.number)?;
        require_text("Class.ClassTypeID", &self.class_type_id)?;
        require_text("Class.RoomNumber", &self.room_number)?;
        if self.duration_minutes <= 0 {
            return Err(DomainError::InvalidValue {
                field: "Class.Duration",
                reason: format!("{} minutes is not a positive duration", self.duration_minutes),
            });
        }
        Ok(())
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("ClassTypeID", self.class_type_id.clone().into()),
            ("RoomNumber", self.room_number.clone().into()),
            ("StartTime", self.start_time.into()),
            ("Duration", self.duration_minutes.into()),
        ]
    }
}

impl Entity for Class {
    type Id = ClassId;
    type Draft = NewClass;
    type Field = ClassField;

    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> &ClassId {
        &self.id
    }
}
