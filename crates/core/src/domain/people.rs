// People records: students, guardians, staff, substitutes

use super::entity::{Column, Draft, Entity, EntityKind};
use super::error::{require_email, require_text, DomainError, Result};
use super::location::AddressId;
use super::value::FieldValue;
use serde::{Deserialize, Serialize};

pub type StudentId = i64;
pub type GuardianId = i64;
pub type StaffId = i64;
pub type SubstituteId = i64;

/// Staff type code (e.g. "TCH", "ADM")
pub type StaffTypeCode = String;

/// Grade levels taught at the school
pub const GRADES: [&str; 6] = ["K", "1", "2", "3", "4", "5"];

fn require_grade(grade: &str) -> Result<()> {
    require_text("Student.Grade", grade)?;
    if !GRADES.contains(&grade) {
        return Err(DomainError::InvalidValue {
            field: "Student.Grade",
            reason: format!("'{}' is not one of {}", grade, GRADES.join(", ")),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub address_id: AddressId,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub address_id: AddressId,
    pub grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Id,
    Number,
    FirstName,
    LastName,
    AddressId,
    Grade,
}

impl Column for StudentField {
    fn column(self) -> &'static str {
        match self {
            StudentField::Id => "ID",
            StudentField::Number => "Number",
            StudentField::FirstName => "FirstName",
            StudentField::LastName => "LastName",
            StudentField::AddressId => "AddressID",
            StudentField::Grade => "Grade",
        }
    }
}

impl Draft for NewStudent {
    fn validate(&self) -> Result<()> {
        require_text("Student.Number", &self.number)?;
        require_text("Student.FirstName", &self.first_name)?;
        require_text("Student.LastName", &self.last_name)?;
        require_grade(&self.grade)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("FirstName", self.first_name.clone().into()),
            ("LastName", self.last_name.clone().into()),
            ("AddressID", self.address_id.into()),
            ("Grade", self.grade.clone().into()),
        ]
    }
}

impl Entity for Student {
    type Id = StudentId;
    type Draft = NewStudent;
    type Field = StudentField;

    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> &StudentId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub id: GuardianId,
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuardian {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardianField {
    Id,
    Number,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    AddressId,
}

impl Column for GuardianField {
    fn column(self) -> &'static str {
        match self {
            GuardianField::Id => "ID",
            GuardianField::Number => "Number",
            GuardianField::FirstName => "FirstName",
            GuardianField::LastName => "LastName",
            GuardianField::Email => "Email",
            GuardianField::PhoneNumber => "PhoneNumber",
            GuardianField::AddressId => "AddressID",
        }
    }
}

impl Draft for NewGuardian {
    fn validate(&self) -> Result<()> {
        require_text("Guardian.Number", &self.number)?;
        require_text("Guardian.FirstName", &self.first_name)?;
        require_text("Guardian.LastName", &self.last_name)?;
        require_text("Guardian.PhoneNumber", &self.phone_number)?;
        if let Some(email) = &self.email {
            require_email("Guardian.Email", email)?;
        }
        Ok(())
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("FirstName", self.first_name.clone().into()),
            ("LastName", self.last_name.clone().into()),
            ("Email", self.email.clone().into()),
            ("PhoneNumber", self.phone_number.clone().into()),
            ("AddressID", self.address_id.into()),
        ]
    }
}

impl Entity for Guardian {
    type Id = GuardianId;
    type Draft = NewGuardian;
    type Field = GuardianField;

    const KIND: EntityKind = EntityKind::Guardian;

    fn id(&self) -> &GuardianId {
        &self.id
    }
}

/// Staff category; `admin_access` grants administrative privilege
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffType {
    pub id: StaffTypeCode,
    pub name: String,
    pub admin_access: bool,
}

impl StaffType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, admin_access: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            admin_access,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffTypeField {
    Id,
    Name,
    AdminAccess,
}

impl Column for StaffTypeField {
    fn column(self) -> &'static str {
        match self {
            StaffTypeField::Id => "ID",
            StaffTypeField::Name => "Name",
            StaffTypeField::AdminAccess => "AdminAccess",
        }
    }
}

impl Draft for StaffType {
    fn validate(&self) -> Result<()> {
        require_text("StaffType.ID", &self.id)?;
        require_text("StaffType.Name", &self.name)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("ID", self.id.clone().into()),
            ("Name", self.name.clone().into()),
            ("AdminAccess", self.admin_access.into()),
        ]
    }
}

impl Entity for StaffType {
    type Id = StaffTypeCode;
    type Draft = StaffType;
    type Field = StaffTypeField;

    const KIND: EntityKind = EntityKind::StaffType;

    fn id(&self) -> &StaffTypeCode {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub work_email: String,
    pub staff_type_id: StaffTypeCode,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStaff {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub work_email: String,
    pub staff_type_id: StaffTypeCode,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffField {
    Id,
    Number,
    FirstName,
    LastName,
    PhoneNumber,
    WorkEmail,
    StaffTypeId,
    AddressId,
}

impl Column for StaffField {
    fn column(self) -> &'static str {
        match self {
            StaffField::Id => "ID",
            StaffField::Number => "Number",
            StaffField::FirstName => "FirstName",
            StaffField::LastName => "LastName",
            StaffField::PhoneNumber => "PhoneNumber",
            StaffField::WorkEmail => "WorkEmail",
            StaffField::StaffTypeId => "StaffTypeID",
            StaffField::AddressId => "AddressID",
        }
    }
}

impl Draft for NewStaff {
    fn validate(&self) -> Result<()> {
        require_text("Staff.Number", &self.number)?;
        require_text("Staff.FirstName", &self.first_name)?;
        require_text("Staff.LastName", &self.last_name)?;
        require_text("Staff.PhoneNumber", &self.phone_number)?;
        require_email("Staff.WorkEmail", &self.work_email)?;
        require_text("Staff.StaffTypeID", &self.staff_type_id)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("FirstName", self.first_name.clone().into()),
            ("LastName", self.last_name.clone().into()),
            ("PhoneNumber", self.phone_number.clone().into()),
            ("WorkEmail", self.work_email.clone().into()),
            ("StaffTypeID", self.staff_type_id.clone().into()),
            ("AddressID", self.address_id.into()),
        ]
    }
}

impl Entity for Staff {
    type Id = StaffId;
    type Draft = NewStaff;
    type Field = StaffField;

    const KIND: EntityKind = EntityKind::Staff;

    fn id(&self) -> &StaffId {
        &self.id
    }
}

/// Substitute teacher; not a member of regular staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitute {
    pub id: SubstituteId,
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub work_email: String,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubstitute {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub work_email: String,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteField {
    Id,
    Number,
    FirstName,
    LastName,
    PhoneNumber,
    WorkEmail,
    AddressId,
}

impl Column for SubstituteField {
    fn column(self) -> &'static str {
        match self {
            SubstituteField::Id => "ID",
            SubstituteField::Number => "Number",
            SubstituteField::FirstName => "FirstName",
            SubstituteField::LastName => "LastName",
            SubstituteField::PhoneNumber => "PhoneNumber",
            SubstituteField::WorkEmail => "WorkEmail",
            SubstituteField::AddressId => "AddressID",
        }
    }
}

impl Draft for NewSubstitute {
    fn validate(&self) -> Result<()> {
        require_text("Substitute.Number", &self.number)?;
        require_text("Substitute.FirstName", &self.first_name)?;
        require_text("Substitute.LastName", &self.last_name)?;
        require_email("Substitute.WorkEmail", &self.work_email)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Number", self.number.clone().into()),
            ("FirstName", self.first_name.clone().into()),
            ("LastName", self.last_name.clone().into()),
            ("PhoneNumber", self.phone_number.clone().into()),
            ("WorkEmail", self.work_email.clone().into()),
            ("AddressID", self.address_id.into()),
        ]
    }
}

impl Entity for Substitute {
    type Id = SubstituteId;
    type Draft = NewSubstitute;
    type Field = SubstituteField;

    const KIND: EntityKind = EntityKind::Substitute;

    fn id(&self) -> &SubstituteId {
        &self.id
    }
}
