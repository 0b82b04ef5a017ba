// Row decoding for every keyed entity

use schoolhouse_core::domain::{
    Address, Availability, Class, ClassType, Entity, Guardian, Room, Staff, StaffType, State,
    Student, Substitute, TimeOffRequest,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// An entity the SQLite data-access layer can read back
pub trait SqlEntity: Entity {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self>;

    /// Key column of a RETURNING row
    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id>;
}

impl SqlEntity for State {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(State {
            id: row.try_get("ID")?,
            name: row.try_get("Name")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Address {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Address {
            id: row.try_get("ID")?,
            street: row.try_get("Street")?,
            city: row.try_get("City")?,
            state_id: row.try_get("StateID")?,
            zip: row.try_get("Zip")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Student {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Student {
            id: row.try_get("ID")?,
            number: row.try_get("Number")?,
            first_name: row.try_get("FirstName")?,
            last_name: row.try_get("LastName")?,
            address_id: row.try_get("AddressID")?,
            grade: row.try_get("Grade")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Guardian {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Guardian {
            id: row.try_get("ID")?,
            number: row.try_get("Number")?,
            first_name: row.try_get("FirstName")?,
            last_name: row.try_get("LastName")?,
            email: row.try_get("Email")?,
            phone_number: row.try_get("PhoneNumber")?,
            address_id: row.try_get("AddressID")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for StaffType {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(StaffType {
            id: row.try_get("ID")?,
            name: row.try_get("Name")?,
            admin_access: row.try_get("AdminAccess")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Staff {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Staff {
            id: row.try_get("ID")?,
            number: row.try_get("Number")?,
            first_name: row.try_get("FirstName")?,
            last_name: row.try_get("LastName")?,
            phone_number: row.try_get("PhoneNumber")?,
            work_email: row.try_get("WorkEmail")?,
            staff_type_id: row.try_get("StaffTypeID")?,
            address_id: row.try_get("AddressID")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Substitute {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Substitute {
            id: row.try_get("ID")?,
            number: row.try_get("Number")?,
            first_name: row.try_get("FirstName")?,
            last_name: row.try_get("LastName")?,
            phone_number: row.try_get("PhoneNumber")?,
            work_email: row.try_get("WorkEmail")?,
            address_id: row.try_get("AddressID")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Availability {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Availability {
            id: row.try_get("ID")?,
            substitute_id: row.try_get("SubstituteID")?,
            start_date: row.try_get("StartDate")?,
            end_date: row.try_get("EndDate")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for TimeOffRequest {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(TimeOffRequest {
            id: row.try_get("ID")?,
            start_date: row.try_get("StartDate")?,
            end_date: row.try_get("EndDate")?,
            reason: row.try_get("Reason")?,
            staff_id: row.try_get("StaffID")?,
            substitute_id: row.try_get("SubstituteID")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Room {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Room {
            number: row.try_get("Number")?,
            capacity: row.try_get("Capacity")?,
            phone_number: row.try_get("PhoneNumber")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("Number")
    }
}

impl SqlEntity for ClassType {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(ClassType {
            id: row.try_get("ID")?,
            name: row.try_get("Name")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}

impl SqlEntity for Class {
    fn decode(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Class {
            id: row.try_get("ID")?,
            number: row.try_get("Number")?,
            class_type_id: row.try_get("ClassTypeID")?,
            room_number: row.try_get("RoomNumber")?,
            start_time: row.try_get("StartTime")?,
            duration_minutes: row.try_get("Duration")?,
        })
    }

    fn decode_id(row: &SqliteRow) -> sqlx::Result<Self::Id> {
        row.try_get("ID")
    }
}
