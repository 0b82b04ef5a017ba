//! Schema bootstrap and CSV seed loading against a file-backed database

use schoolhouse_core::domain::{Filter, Link, Room, Staff, Student, StudentField};
use schoolhouse_core::port::SchoolQueries;
use schoolhouse_infra_sqlite::{
    apply_schema, create_pool, import_csv_dir, schema_exists, verify_csv_headers, SeedStatus,
    SetupMode, SqliteSchoolRepository, SCHEMA_TABLES,
};
use std::fs;
use std::path::Path;

const SEED: &[(&str, &str)] = &[
    ("State", "ID,Name\nNE,Nebraska\n"),
    ("Address", "ID,Street,City,StateID,Zip\n1,123 Oak St,Lincoln,NE,68508\n"),
    ("StaffType", "ID,Name,AdminAccess\nTCH,Teacher,f\nADM,Principal,t\n"),
    (
        "Staff",
        "ID,Number,FirstName,LastName,PhoneNumber,WorkEmail,StaffTypeID,AddressID\n\
         1,T001,Ada,Park,402-555-0101,apark@school.example.org,TCH,1\n",
    ),
    (
        "Student",
        "ID,Number,FirstName,LastName,AddressID,Grade\n\
         1,S001,Ann,Lee,1,3\n\
         2,S002,Bo,Kim,1,3\n",
    ),
    ("Room", "Number,Capacity,PhoneNumber\n101,24,402-555-0201\n"),
    ("ClassType", "ID,Name\n3HR,Third Grade Homeroom\n"),
    (
        "Class",
        "ID,Number,ClassTypeID,RoomNumber,StartTime,Duration\n\
         1,C1,3HR,101,08:00:00,01:00:00\n",
    ),
    ("StaffToClass", "StaffID,ClassID\n1,1\n"),
    ("StudentToClass", "StudentID,ClassID\n1,1\n"),
];

fn write_seed(dir: &Path) {
    for (table, body) in SEED {
        fs::write(dir.join(format!("{}.csv", table)), body).unwrap();
    }
}

fn database_url(dir: &Path) -> String {
    format!("sqlite://{}", dir.join("school.db").display())
}

#[tokio::test]
async fn test_create_twice_fails_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(&database_url(dir.path())).await.unwrap();

    apply_schema(&pool, SetupMode::Create).await.unwrap();
    let repo = SqliteSchoolRepository::new(pool.clone());
    repo.create::<Room>(&Room {
        number: "101".to_string(),
        capacity: 24,
        phone_number: None,
    })
    .await
    .unwrap();

    let err = apply_schema(&pool, SetupMode::Create).await.unwrap_err();
    assert!(err.to_string().contains("already exists"));

    assert!(schema_exists(&pool).await.unwrap());
    assert_eq!(repo.read::<Room>(&Filter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_recreate_drops_rows_and_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(&database_url(dir.path())).await.unwrap();

    apply_schema(&pool, SetupMode::Recreate).await.unwrap();
    let repo = SqliteSchoolRepository::new(pool.clone());
    repo.create::<Room>(&Room {
        number: "101".to_string(),
        capacity: 24,
        phone_number: None,
    })
    .await
    .unwrap();

    apply_schema(&pool, SetupMode::Recreate).await.unwrap();
    assert!(repo.read::<Room>(&Filter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seed_directory_loads_every_table() {
    let dir = tempfile::tempdir().unwrap();
    write_seed(dir.path());

    let verified = verify_csv_headers(dir.path()).unwrap();
    assert_eq!(verified.failures().count(), 0);

    let pool = create_pool(&database_url(dir.path())).await.unwrap();
    apply_schema(&pool, SetupMode::Create).await.unwrap();

    let report = import_csv_dir(&pool, dir.path()).await.unwrap();
    assert_eq!(report.tables.len(), SCHEMA_TABLES.len());
    assert_eq!(report.failures().count(), 0);
    assert_eq!(report.status_of("Student"), Some(&SeedStatus::Loaded { rows: 2 }));
    assert_eq!(report.status_of("Availability"), Some(&SeedStatus::Missing));

    let repo = SqliteSchoolRepository::new(pool);
    let ann = repo
        .read::<Student>(&Filter::all().eq(StudentField::Number, "S001"))
        .await
        .unwrap();
    assert_eq!(ann[0].grade, "3");

    let listing = repo.list_classes(Some("3")).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].duration_minutes, 60);
    assert_eq!(listing[0].staff_number.as_deref(), Some("T001"));

    let staff = repo.read::<Staff>(&Filter::all()).await.unwrap();
    assert_eq!(staff[0].staff_type_id, "TCH");

    // Seeded ids line up with the link rows
    assert!(!repo
        .link_if_absent(&Link::StudentToClass {
            student_id: 1,
            class_id: 1
        })
        .await
        .unwrap());
}

#[tokio::test]
async fn test_seed_with_bad_header_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Room.csv"), "Number,Seats\n101,24\n").unwrap();

    let report = verify_csv_headers(dir.path()).unwrap();
    assert!(matches!(
        report.status_of("Room"),
        Some(SeedStatus::Failed { .. })
    ));
    assert!(!report.is_clean());
}
