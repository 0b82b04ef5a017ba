//! Read-side queries over a seeded school

mod common;

use common::{class_draft, date, seeded_school, time};
use schoolhouse_core::domain::{
    AssignmentRole, Availability, Class, Filter, Link, NewAvailability, PersonLookup, Staff,
    StaffField, Student, StudentField, Substitute, SubstituteField,
};
use schoolhouse_core::port::SchoolQueries;
use schoolhouse_infra_sqlite::SqliteSchoolRepository;

async fn student_id(repo: &SqliteSchoolRepository, number: &str) -> i64 {
    repo.read::<Student>(&Filter::all().eq(StudentField::Number, number))
        .await
        .unwrap()[0]
        .id
}

async fn staff_id(repo: &SqliteSchoolRepository, number: &str) -> i64 {
    repo.read::<Staff>(&Filter::all().eq(StaffField::Number, number))
        .await
        .unwrap()[0]
        .id
}

#[tokio::test]
async fn test_substitutes_available_on_single_day() {
    let repo = seeded_school().await;

    let available = repo
        .substitutes_available(date(2024, 5, 10), date(2024, 5, 10))
        .await
        .unwrap();

    let numbers: Vec<_> = available.iter().map(|s| s.number.as_str()).collect();
    // Baker before Young; Adams starts on the 11th
    assert_eq!(numbers, vec!["U002", "U001"]);
}

#[tokio::test]
async fn test_substitutes_available_needs_whole_range() {
    let repo = seeded_school().await;

    let available = repo
        .substitutes_available(date(2024, 5, 10), date(2024, 5, 12))
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].number, "U001");

    assert!(repo
        .substitutes_available(date(2024, 6, 1), date(2024, 6, 1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_substitute_listed_once_per_covering_window() {
    let repo = seeded_school().await;
    let young = repo
        .read::<Substitute>(&Filter::all().eq(SubstituteField::Number, "U001"))
        .await
        .unwrap()[0]
        .id;
    repo.create::<Availability>(&NewAvailability {
        substitute_id: young,
        start_date: date(2024, 5, 8),
        end_date: date(2024, 5, 12),
    })
    .await
    .unwrap();

    let available = repo
        .substitutes_available(date(2024, 5, 10), date(2024, 5, 10))
        .await
        .unwrap();

    let numbers: Vec<_> = available.iter().map(|s| s.number.as_str()).collect();
    assert_eq!(numbers, vec!["U002", "U001", "U001"]);

    let mut windows: Vec<_> = available[1..]
        .iter()
        .map(|s| (s.start_date, s.end_date))
        .collect();
    windows.sort();
    assert_eq!(
        windows,
        vec![
            (date(2024, 5, 1), date(2024, 5, 31)),
            (date(2024, 5, 8), date(2024, 5, 12)),
        ]
    );
}

#[tokio::test]
async fn test_rooms_filtered_by_capacity() {
    let repo = seeded_school().await;

    assert_eq!(repo.list_rooms(None).await.unwrap().len(), 2);

    let large = repo.list_rooms(Some(20)).await.unwrap();
    assert_eq!(large.len(), 1);
    assert_eq!(large[0].number, "101");
}

#[tokio::test]
async fn test_class_listing_includes_unstaffed_classes() {
    let repo = seeded_school().await;
    let homeroom = repo
        .create::<Class>(&class_draft("C1", "3HR", "101", time(8, 0)))
        .await
        .unwrap();
    repo.create::<Class>(&class_draft("C2", "4HR", "102", time(8, 0)))
        .await
        .unwrap();
    repo.link(&Link::StaffToClass {
        staff_id: staff_id(&repo, "T001").await,
        class_id: homeroom,
    })
    .await
    .unwrap();

    let all = repo.list_classes(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].staff_number.as_deref(), Some("T001"));
    assert_eq!(all[1].staff_number, None);
    assert_eq!(all[1].class_type_name, "Fourth Grade Homeroom");

    let fourth = repo.list_classes(Some("4")).await.unwrap();
    assert_eq!(fourth.len(), 1);
    assert_eq!(fourth[0].number, "C2");

    // Grade is matched literally, not as a pattern
    assert!(repo.list_classes(Some("%")).await.unwrap().is_empty());
    assert!(repo.list_classes(Some("_")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_roster_lists_students_then_staff() {
    let repo = seeded_school().await;
    let class_id = repo
        .create::<Class>(&class_draft("C1", "3ART", "102", time(13, 0)))
        .await
        .unwrap();

    for number in ["S002", "S001"] {
        repo.link(&Link::StudentToClass {
            student_id: student_id(&repo, number).await,
            class_id,
        })
        .await
        .unwrap();
    }
    repo.link(&Link::StaffToClass {
        staff_id: staff_id(&repo, "T002").await,
        class_id,
    })
    .await
    .unwrap();

    let roster = repo.class_assignments("C1").await.unwrap();
    let tagged: Vec<_> = roster.iter().map(|a| (a.number.as_str(), a.role)).collect();
    assert_eq!(
        tagged,
        vec![
            ("S001", AssignmentRole::Student),
            ("S002", AssignmentRole::Student),
            ("T002", AssignmentRole::Staff),
        ]
    );

    assert_eq!(repo.students_in_class("C1").await.unwrap().len(), 2);
    assert_eq!(repo.staff_in_class("C1").await.unwrap()[0].number, "T002");

    let schedule = repo.classes_for_student("S001").await.unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].class_type_name, "Third Grade Art");
    assert_eq!(schedule[0].start_time, time(13, 0));
}

#[tokio::test]
async fn test_guardians_resolve_address_and_state() {
    let repo = seeded_school().await;

    let guardians = repo.guardians_of_student("S001").await.unwrap();
    assert_eq!(guardians.len(), 1);
    assert_eq!(guardians[0].number, "G001");
    assert_eq!(guardians[0].state_name, "Nebraska");
    assert_eq!(guardians[0].city, "Lincoln");

    assert!(repo.guardians_of_student("S003").await.unwrap().is_empty());

    let by_phone = repo
        .find_guardians(&PersonLookup::ByPhone("402-555-0199".to_string()))
        .await
        .unwrap();
    assert_eq!(by_phone, guardians);
}

#[tokio::test]
async fn test_person_lookups() {
    let repo = seeded_school().await;

    let staff = repo
        .find_staff(&PersonLookup::ByName {
            first_name: "Ben".to_string(),
            last_name: "Ortiz".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].number, "T002");

    let by_phone = repo
        .find_staff(&PersonLookup::ByPhone(staff[0].phone_number.clone()))
        .await
        .unwrap();
    assert_eq!(by_phone, staff);

    let students = repo.find_students("Ann", "Lee").await.unwrap();
    assert_eq!(students.len(), 1);
    assert!(repo.find_students("Ann", "Park").await.unwrap().is_empty());

    assert!(repo.staff_by_number("T404").await.unwrap().is_none());
}
