// SQLite SchoolQueries Implementation

use crate::entity::SqlEntity;
use crate::error::map_sqlx_error;
use crate::repository::SqliteSchoolRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use schoolhouse_core::domain::{
    AssignmentRole, AvailableSubstitute, ClassAssignment, ClassListing, GuardianContact,
    PersonLookup, PersonRef, Room, ScheduledClass, Staff, StaffId, Student, TimeOffDetails,
    TimeOffRequestId,
};
use schoolhouse_core::error::Result;
use schoolhouse_core::port::SchoolQueries;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const GUARDIAN_CONTACT_SELECT: &str = r#"
    SELECT g.Number, g.FirstName, g.LastName, g.PhoneNumber, g.Email,
           a.Street, a.City, st.Name AS StateName, a.Zip
    FROM Guardian g
    JOIN Address a ON a.ID = g.AddressID
    JOIN State st ON st.ID = a.StateID
"#;

const TIME_OFF_SELECT: &str = r#"
    SELECT t.ID, t.StartDate, t.EndDate, t.Reason,
           s.Number AS StaffNumber, s.FirstName AS StaffFirstName, s.LastName AS StaffLastName,
           sub.Number AS SubNumber, sub.FirstName AS SubFirstName, sub.LastName AS SubLastName
    FROM TimeOffRequest t
    JOIN Staff s ON s.ID = t.StaffID
    LEFT JOIN Substitute sub ON sub.ID = t.SubstituteID
"#;

fn decode_all<T>(
    rows: Vec<SqliteRow>,
    decode: impl Fn(&SqliteRow) -> sqlx::Result<T>,
) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| decode(row).map_err(map_sqlx_error))
        .collect()
}

fn decode_available(row: &SqliteRow) -> sqlx::Result<AvailableSubstitute> {
    Ok(AvailableSubstitute {
        number: row.try_get("Number")?,
        first_name: row.try_get("FirstName")?,
        last_name: row.try_get("LastName")?,
        work_email: row.try_get("WorkEmail")?,
        start_date: row.try_get("StartDate")?,
        end_date: row.try_get("EndDate")?,
    })
}

fn decode_guardian_contact(row: &SqliteRow) -> sqlx::Result<GuardianContact> {
    Ok(GuardianContact {
        number: row.try_get("Number")?,
        first_name: row.try_get("FirstName")?,
        last_name: row.try_get("LastName")?,
        phone_number: row.try_get("PhoneNumber")?,
        email: row.try_get("Email")?,
        street: row.try_get("Street")?,
        city: row.try_get("City")?,
        state_name: row.try_get("StateName")?,
        zip: row.try_get("Zip")?,
    })
}

fn decode_scheduled(row: &SqliteRow) -> sqlx::Result<ScheduledClass> {
    Ok(ScheduledClass {
        number: row.try_get("Number")?,
        class_type_name: row.try_get("ClassTypeName")?,
        room_number: row.try_get("RoomNumber")?,
        start_time: row.try_get("StartTime")?,
        duration_minutes: row.try_get("Duration")?,
    })
}

fn decode_listing(row: &SqliteRow) -> sqlx::Result<ClassListing> {
    Ok(ClassListing {
        number: row.try_get("Number")?,
        class_type_name: row.try_get("ClassTypeName")?,
        room_number: row.try_get("RoomNumber")?,
        start_time: row.try_get("StartTime")?,
        duration_minutes: row.try_get("Duration")?,
        staff_number: row.try_get("StaffNumber")?,
    })
}

fn decode_assignment(row: &SqliteRow) -> sqlx::Result<ClassAssignment> {
    let role: String = row.try_get("Role")?;
    Ok(ClassAssignment {
        number: row.try_get("Number")?,
        role: if role == "staff" {
            AssignmentRole::Staff
        } else {
            AssignmentRole::Student
        },
    })
}

fn decode_time_off(row: &SqliteRow) -> sqlx::Result<TimeOffDetails> {
    let substitute = match row.try_get::<Option<String>, _>("SubNumber")? {
        Some(number) => Some(PersonRef {
            number,
            first_name: row.try_get("SubFirstName")?,
            last_name: row.try_get("SubLastName")?,
        }),
        None => None,
    };

    Ok(TimeOffDetails {
        id: row.try_get("ID")?,
        start_date: row.try_get("StartDate")?,
        end_date: row.try_get("EndDate")?,
        reason: row.try_get("Reason")?,
        staff: PersonRef {
            number: row.try_get("StaffNumber")?,
            first_name: row.try_get("StaffFirstName")?,
            last_name: row.try_get("StaffLastName")?,
        },
        substitute,
    })
}

#[async_trait]
impl SchoolQueries for SqliteSchoolRepository {
    async fn substitutes_available(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailableSubstitute>> {
        let rows = sqlx::query(
            r#"
            SELECT s.Number, s.FirstName, s.LastName, s.WorkEmail, a.StartDate, a.EndDate
            FROM Substitute s
            JOIN Availability a ON a.SubstituteID = s.ID
            WHERE a.StartDate <= ? AND a.EndDate >= ?
            ORDER BY s.LastName, s.FirstName, a.StartDate
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, decode_available)
    }

    async fn students_in_class(&self, class_number: &str) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"
            SELECT s.*
            FROM Student s
            JOIN StudentToClass stc ON stc.StudentID = s.ID
            JOIN Class c ON c.ID = stc.ClassID
            WHERE c.Number = ?
            ORDER BY s.LastName, s.FirstName
            "#,
        )
        .bind(class_number)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, Student::decode)
    }

    async fn staff_in_class(&self, class_number: &str) -> Result<Vec<Staff>> {
        let rows = sqlx::query(
            r#"
            SELECT st.*
            FROM Staff st
            JOIN StaffToClass sc ON sc.StaffID = st.ID
            JOIN Class c ON c.ID = sc.ClassID
            WHERE c.Number = ?
            ORDER BY st.LastName, st.FirstName
            "#,
        )
        .bind(class_number)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, Staff::decode)
    }

    async fn class_assignments(&self, class_number: &str) -> Result<Vec<ClassAssignment>> {
        let rows = sqlx::query(
            r#"
            SELECT Number, Role FROM (
                SELECT s.Number AS Number, 'student' AS Role, 0 AS RoleOrder
                FROM Student s
                JOIN StudentToClass stc ON stc.StudentID = s.ID
                JOIN Class c ON c.ID = stc.ClassID
                WHERE c.Number = ?
                UNION ALL
                SELECT st.Number AS Number, 'staff' AS Role, 1 AS RoleOrder
                FROM Staff st
                JOIN StaffToClass sc ON sc.StaffID = st.ID
                JOIN Class c ON c.ID = sc.ClassID
                WHERE c.Number = ?
            )
            ORDER BY RoleOrder, Number
            "#,
        )
        .bind(class_number)
        .bind(class_number)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, decode_assignment)
    }

    async fn classes_for_student(&self, student_number: &str) -> Result<Vec<ScheduledClass>> {
        let rows = sqlx::query(
            r#"
            SELECT c.Number, ct.Name AS ClassTypeName, c.RoomNumber, c.StartTime, c.Duration
            FROM Student s
            JOIN StudentToClass stc ON stc.StudentID = s.ID
            JOIN Class c ON c.ID = stc.ClassID
            JOIN ClassType ct ON ct.ID = c.ClassTypeID
            WHERE s.Number = ?
            ORDER BY c.StartTime, c.ID
            "#,
        )
        .bind(student_number)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, decode_scheduled)
    }

    async fn guardians_of_student(&self, student_number: &str) -> Result<Vec<GuardianContact>> {
        let sql = format!(
            "{} JOIN GuardianToStudent gts ON gts.GuardianID = g.ID \
             JOIN Student s ON s.ID = gts.StudentID \
             WHERE s.Number = ? ORDER BY g.LastName, g.FirstName",
            GUARDIAN_CONTACT_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(student_number)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        decode_all(rows, decode_guardian_contact)
    }

    async fn find_students(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM Student
            WHERE FirstName = ? AND LastName = ?
            ORDER BY Number
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, Student::decode)
    }

    async fn find_staff(&self, lookup: &PersonLookup) -> Result<Vec<Staff>> {
        let query = match lookup {
            PersonLookup::ByName {
                first_name,
                last_name,
            } => sqlx::query(
                "SELECT * FROM Staff WHERE FirstName = ? AND LastName = ? ORDER BY Number",
            )
            .bind(first_name)
            .bind(last_name),
            PersonLookup::ByPhone(phone) => {
                sqlx::query("SELECT * FROM Staff WHERE PhoneNumber = ? ORDER BY Number").bind(phone)
            }
        };

        let rows = query.fetch_all(self.pool()).await.map_err(map_sqlx_error)?;
        decode_all(rows, Staff::decode)
    }

    async fn find_guardians(&self, lookup: &PersonLookup) -> Result<Vec<GuardianContact>> {
        let (predicate, first, second) = match lookup {
            PersonLookup::ByName {
                first_name,
                last_name,
            } => (
                "g.FirstName = ? AND g.LastName = ?",
                first_name.as_str(),
                Some(last_name.as_str()),
            ),
            PersonLookup::ByPhone(phone) => ("g.PhoneNumber = ?", phone.as_str(), None),
        };

        let sql = format!(
            "{} WHERE {} ORDER BY g.Number",
            GUARDIAN_CONTACT_SELECT, predicate
        );
        let mut query = sqlx::query(&sql).bind(first);
        if let Some(second) = second {
            query = query.bind(second);
        }

        let rows = query.fetch_all(self.pool()).await.map_err(map_sqlx_error)?;
        decode_all(rows, decode_guardian_contact)
    }

    async fn staff_by_number(&self, number: &str) -> Result<Option<Staff>> {
        let row = sqlx::query("SELECT * FROM Staff WHERE Number = ?")
            .bind(number)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| Staff::decode(&r).map_err(map_sqlx_error))
            .transpose()
    }

    async fn list_rooms(&self, min_capacity: Option<i64>) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM Room
            WHERE (? IS NULL OR Capacity >= ?)
            ORDER BY Number
            "#,
        )
        .bind(min_capacity)
        .bind(min_capacity)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, Room::decode)
    }

    async fn list_classes(&self, grade: Option<&str>) -> Result<Vec<ClassListing>> {
        let rows = sqlx::query(
            r#"
            SELECT c.Number, ct.Name AS ClassTypeName, c.RoomNumber, c.StartTime, c.Duration,
                   st.Number AS StaffNumber
            FROM Class c
            JOIN ClassType ct ON ct.ID = c.ClassTypeID
            LEFT JOIN StaffToClass sc ON sc.ClassID = c.ID
            LEFT JOIN Staff st ON st.ID = sc.StaffID
            WHERE (? IS NULL OR UPPER(substr(ct.ID, 1, length(?))) = UPPER(?))
            ORDER BY c.ID, st.Number
            "#,
        )
        .bind(grade)
        .bind(grade)
        .bind(grade)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        decode_all(rows, decode_listing)
    }

    async fn time_off_details(&self, id: TimeOffRequestId) -> Result<Option<TimeOffDetails>> {
        let sql = format!("{} WHERE t.ID = ?", TIME_OFF_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| decode_time_off(&r).map_err(map_sqlx_error))
            .transpose()
    }

    async fn time_off_for_staff(
        &self,
        staff_id: StaffId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeOffDetails>> {
        let sql = format!(
            "{} WHERE t.StaffID = ? AND t.StartDate <= ? AND t.EndDate >= ? ORDER BY t.StartDate, t.ID",
            TIME_OFF_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(staff_id)
            .bind(end)
            .bind(start)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        decode_all(rows, decode_time_off)
    }
}
