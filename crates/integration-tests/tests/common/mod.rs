//! Shared fixtures: a small school in an in-memory database

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use schoolhouse_core::domain::{
    Address, AddressId, Availability, ClassType, Guardian, Link, NewAddress, NewAvailability,
    NewClass, NewGuardian, NewStaff, NewStudent, NewSubstitute, Room, Staff, StaffType, State,
    Student, Substitute,
};
use schoolhouse_infra_sqlite::{apply_schema, create_pool, SetupMode, SqliteSchoolRepository};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn empty_school() -> SqliteSchoolRepository {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    apply_schema(&pool, SetupMode::Create).await.unwrap();
    SqliteSchoolRepository::new(pool)
}

pub fn oak_street() -> NewAddress {
    NewAddress {
        street: "123 Oak St".to_string(),
        city: "Lincoln".to_string(),
        state_id: "NE".to_string(),
        zip: "68508".to_string(),
    }
}

pub fn student(number: &str, first: &str, last: &str, grade: &str, address_id: AddressId) -> NewStudent {
    NewStudent {
        number: number.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        address_id,
        grade: grade.to_string(),
    }
}

pub fn teacher(number: &str, first: &str, last: &str, email: &str, address_id: AddressId) -> NewStaff {
    NewStaff {
        number: number.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: format!("402-555-{}", &number[1..]),
        work_email: email.to_string(),
        staff_type_id: "TCH".to_string(),
        address_id,
    }
}

fn substitute(number: &str, first: &str, last: &str, address_id: AddressId) -> NewSubstitute {
    NewSubstitute {
        number: number.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: None,
        work_email: format!("{}@subs.example.org", first.to_lowercase()),
        address_id,
    }
}

/// Nebraska school with two teachers, three substitutes, three students and one guardian
///
/// Substitute windows (2024): U001 May 1-31, U002 May 10 only, U003 May 11-20.
/// Students S001 and S002 are grade 3, S003 is grade 4. No classes yet.
pub async fn seeded_school() -> SqliteSchoolRepository {
    let repo = empty_school().await;

    repo.create::<State>(&State::new("NE", "Nebraska")).await.unwrap();
    let home = repo.create::<Address>(&oak_street()).await.unwrap();
    repo.create::<StaffType>(&StaffType::new("TCH", "Teacher", false))
        .await
        .unwrap();

    for staff in [
        teacher("T001", "Ada", "Park", "apark@school.example.org", home),
        teacher("T002", "Ben", "Ortiz", "bortiz@school.example.org", home),
    ] {
        repo.create::<Staff>(&staff).await.unwrap();
    }

    let windows = [
        ("U001", "Cara", "Young", date(2024, 5, 1), date(2024, 5, 31)),
        ("U002", "Dan", "Baker", date(2024, 5, 10), date(2024, 5, 10)),
        ("U003", "Eve", "Adams", date(2024, 5, 11), date(2024, 5, 20)),
    ];
    for (number, first, last, start, end) in windows {
        let substitute_id = repo
            .create::<Substitute>(&substitute(number, first, last, home))
            .await
            .unwrap();
        repo.create::<Availability>(&NewAvailability {
            substitute_id,
            start_date: start,
            end_date: end,
        })
        .await
        .unwrap();
    }

    for (number, capacity, phone) in [("101", 24, Some("402-555-0201")), ("102", 12, None)] {
        repo.create::<Room>(&Room {
            number: number.to_string(),
            capacity,
            phone_number: phone.map(str::to_string),
        })
        .await
        .unwrap();
    }

    for (code, name) in [
        ("3HR", "Third Grade Homeroom"),
        ("3ART", "Third Grade Art"),
        ("4HR", "Fourth Grade Homeroom"),
    ] {
        repo.create::<ClassType>(&ClassType::new(code, name)).await.unwrap();
    }

    let ann = repo
        .create::<Student>(&student("S001", "Ann", "Lee", "3", home))
        .await
        .unwrap();
    for new in [
        student("S002", "Bo", "Kim", "3", home),
        student("S003", "Cy", "Diaz", "4", home),
    ] {
        repo.create::<Student>(&new).await.unwrap();
    }

    let gina = repo
        .create::<Guardian>(&NewGuardian {
            number: "G001".to_string(),
            first_name: "Gina".to_string(),
            last_name: "Lee".to_string(),
            email: Some("gina.lee@example.org".to_string()),
            phone_number: "402-555-0199".to_string(),
            address_id: home,
        })
        .await
        .unwrap();
    repo.link(&Link::GuardianToStudent {
        student_id: ann,
        guardian_id: gina,
    })
    .await
    .unwrap();

    repo
}

pub fn class_draft(number: &str, class_type: &str, room: &str, start: NaiveTime) -> NewClass {
    NewClass {
        number: number.to_string(),
        class_type_id: class_type.to_string(),
        room_number: room.to_string(),
        start_time: start,
        duration_minutes: 45,
    }
}
