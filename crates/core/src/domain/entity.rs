// Entity & Draft Traits
// Every keyed table is described once here; the data-access layer is generic over it.

use super::error::DomainError;
use super::value::FieldValue;
use std::fmt;

/// Keyed tables of the school schema (join tables are modelled by `Link`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    State,
    Address,
    Student,
    Guardian,
    StaffType,
    Staff,
    Substitute,
    Availability,
    TimeOffRequest,
    Room,
    ClassType,
    Class,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::State => "State",
            EntityKind::Address => "Address",
            EntityKind::Student => "Student",
            EntityKind::Guardian => "Guardian",
            EntityKind::StaffType => "StaffType",
            EntityKind::Staff => "Staff",
            EntityKind::Substitute => "Substitute",
            EntityKind::Availability => "Availability",
            EntityKind::TimeOffRequest => "TimeOffRequest",
            EntityKind::Room => "Room",
            EntityKind::ClassType => "ClassType",
            EntityKind::Class => "Class",
        }
    }

    pub fn key_column(self) -> &'static str {
        match self {
            EntityKind::Room => "Number",
            _ => "ID",
        }
    }

    /// Natural business codes are supplied by the caller; everything else is engine-assigned
    pub fn has_surrogate_key(self) -> bool {
        !matches!(
            self,
            EntityKind::State | EntityKind::StaffType | EntityKind::Room | EntityKind::ClassType
        )
    }

    /// (table, column) pairs holding a foreign key to this entity
    pub fn dependents(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityKind::State => &[("Address", "StateID")],
            EntityKind::Address => &[
                ("Student", "AddressID"),
                ("Guardian", "AddressID"),
                ("Staff", "AddressID"),
                ("Substitute", "AddressID"),
            ],
            EntityKind::Student => &[
                ("GuardianToStudent", "StudentID"),
                ("StudentToClass", "StudentID"),
            ],
            EntityKind::Guardian => &[("GuardianToStudent", "GuardianID")],
            EntityKind::StaffType => &[("Staff", "StaffTypeID")],
            EntityKind::Staff => &[("TimeOffRequest", "StaffID"), ("StaffToClass", "StaffID")],
            EntityKind::Substitute => &[
                ("Availability", "SubstituteID"),
                ("TimeOffRequest", "SubstituteID"),
            ],
            EntityKind::Availability | EntityKind::TimeOffRequest => &[],
            EntityKind::Room => &[("Class", "RoomNumber")],
            EntityKind::ClassType => &[("Class", "ClassTypeID")],
            EntityKind::Class => &[("StaffToClass", "ClassID"), ("StudentToClass", "ClassID")],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A filterable column of one entity
pub trait Column: Copy + Send + Sync + 'static {
    fn column(self) -> &'static str;
}

/// Field values used to create or fully update one row
pub trait Draft: Send + Sync {
    fn validate(&self) -> Result<(), DomainError>;

    /// Column/value pairs in insert order
    fn values(&self) -> Vec<(&'static str, FieldValue)>;
}

/// A persisted record with its own key
pub trait Entity: Sized + Send + Sync + 'static {
    type Id: Clone + fmt::Display + Into<FieldValue> + Send + Sync;
    type Draft: Draft;
    type Field: Column;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;
}
