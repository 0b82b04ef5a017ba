// Domain Layer - School records, drafts and validation rules

pub mod classroom;
pub mod entity;
pub mod error;
pub mod link;
pub mod location;
pub mod people;
pub mod staffing;
pub mod value;
pub mod views;

// Re-exports
pub use classroom::{
    grade_of, parse_duration_minutes, Class, ClassField, ClassId, ClassType, ClassTypeCode,
    ClassTypeField, NewClass, Room, RoomField, RoomNumber,
};
pub use entity::{Column, Draft, Entity, EntityKind};
pub use error::DomainError;
pub use link::Link;
pub use location::{
    Address, AddressField, AddressId, NewAddress, State, StateCode, StateField,
};
pub use people::{
    Guardian, GuardianField, GuardianId, NewGuardian, NewStaff, NewStudent, NewSubstitute,
    Staff, StaffField, StaffId, StaffType, StaffTypeCode, StaffTypeField, Student, StudentField,
    StudentId, Substitute, SubstituteField, SubstituteId, GRADES,
};
pub use staffing::{
    Availability, AvailabilityField, AvailabilityId, NewAvailability, NewTimeOffRequest, TimeOffRequest,
    TimeOffRequestField, TimeOffRequestId,
};
pub use value::{FieldValue, Filter};
pub use views::{
    AssignmentRole, AvailableSubstitute, ClassAssignment, ClassListing, GuardianContact,
    PersonLookup, PersonRef, ScheduledClass, TimeOffDetails,
};
