//! Terminal rendering: tables for people, `--json` for scripts

use anyhow::Result;
use colored::Colorize;
use schoolhouse_core::application::{FillReport, SubstituteSuggestion};
use schoolhouse_core::domain::{
    AvailableSubstitute, Class, ClassAssignment, ClassListing, GuardianContact, PersonRef, Room,
    ScheduledClass, Staff, Student, TimeOffDetails,
};
use schoolhouse_infra_sqlite::{SeedReport, SeedStatus};
use serde::Serialize;
use tabled::{Table, Tabled};

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print rows as a table, or a notice when there are none
fn table<R: Tabled>(rows: Vec<R>, empty: &str) {
    if rows.is_empty() {
        println!("{}", empty.yellow());
    } else {
        println!("{}", Table::new(rows));
    }
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn person(p: &PersonRef) -> String {
    format!("{} {} ({})", p.first_name, p.last_name, p.number)
}

#[derive(Tabled)]
struct RoomRow {
    number: String,
    capacity: i64,
    phone: String,
}

pub fn rooms(rooms: &[Room]) {
    table(
        rooms
            .iter()
            .map(|r| RoomRow {
                number: r.number.clone(),
                capacity: r.capacity,
                phone: opt(r.phone_number.as_deref()),
            })
            .collect(),
        "No rooms found",
    );
}

#[derive(Tabled)]
struct ClassRow {
    class: String,
    #[tabled(rename = "type")]
    class_type: String,
    room: String,
    start: String,
    minutes: i64,
    staff: String,
}

pub fn classes(classes: &[ClassListing]) {
    table(
        classes
            .iter()
            .map(|c| ClassRow {
                class: c.number.clone(),
                class_type: c.class_type_name.clone(),
                room: c.room_number.clone(),
                start: c.start_time.format("%H:%M").to_string(),
                minutes: c.duration_minutes,
                staff: opt(c.staff_number.as_deref()),
            })
            .collect(),
        "No classes found",
    );
}

#[derive(Tabled)]
struct ScheduleRow {
    class: String,
    #[tabled(rename = "type")]
    class_type: String,
    room: String,
    start: String,
    minutes: i64,
}

pub fn schedule(classes: &[ScheduledClass]) {
    table(
        classes
            .iter()
            .map(|c| ScheduleRow {
                class: c.number.clone(),
                class_type: c.class_type_name.clone(),
                room: c.room_number.clone(),
                start: c.start_time.format("%H:%M").to_string(),
                minutes: c.duration_minutes,
            })
            .collect(),
        "No classes found",
    );
}

#[derive(Tabled)]
struct StudentRow {
    number: String,
    first_name: String,
    last_name: String,
    grade: String,
}

pub fn students(students: &[Student]) {
    table(
        students
            .iter()
            .map(|s| StudentRow {
                number: s.number.clone(),
                first_name: s.first_name.clone(),
                last_name: s.last_name.clone(),
                grade: s.grade.clone(),
            })
            .collect(),
        "No students found",
    );
}

#[derive(Tabled)]
struct StaffRow {
    number: String,
    first_name: String,
    last_name: String,
    phone: String,
    work_email: String,
    #[tabled(rename = "type")]
    staff_type: String,
}

pub fn staff(staff: &[Staff]) {
    table(
        staff
            .iter()
            .map(|s| StaffRow {
                number: s.number.clone(),
                first_name: s.first_name.clone(),
                last_name: s.last_name.clone(),
                phone: s.phone_number.clone(),
                work_email: s.work_email.clone(),
                staff_type: s.staff_type_id.clone(),
            })
            .collect(),
        "No staff found",
    );
}

#[derive(Tabled)]
struct GuardianRow {
    number: String,
    name: String,
    phone: String,
    email: String,
    address: String,
}

pub fn guardians(guardians: &[GuardianContact]) {
    table(
        guardians
            .iter()
            .map(|g| GuardianRow {
                number: g.number.clone(),
                name: format!("{} {}", g.first_name, g.last_name),
                phone: g.phone_number.clone(),
                email: opt(g.email.as_deref()),
                address: format!("{}, {}, {} {}", g.street, g.city, g.state_name, g.zip),
            })
            .collect(),
        "No guardians found",
    );
}

#[derive(Tabled)]
struct AssignmentRow {
    number: String,
    role: String,
}

pub fn assignments(assignments: &[ClassAssignment]) {
    table(
        assignments
            .iter()
            .map(|a| AssignmentRow {
                number: a.number.clone(),
                role: a.role.to_string(),
            })
            .collect(),
        "Nobody is assigned to this class",
    );
}

#[derive(Tabled)]
struct SubstituteRow {
    number: String,
    first_name: String,
    last_name: String,
    work_email: String,
    available: String,
}

pub fn substitutes(substitutes: &[AvailableSubstitute]) {
    table(
        substitutes
            .iter()
            .map(|s| SubstituteRow {
                number: s.number.clone(),
                first_name: s.first_name.clone(),
                last_name: s.last_name.clone(),
                work_email: s.work_email.clone(),
                available: format!("{} to {}", s.start_date, s.end_date),
            })
            .collect(),
        "No substitutes available",
    );
}

pub fn fill_report(report: &FillReport) {
    println!(
        "{}",
        format!("✓ Class {} filled", report.class_number).green().bold()
    );
    if !report.staff_assigned {
        println!("  {} Staff member was already assigned", "•".bold());
    }
    println!(
        "  {} {} student(s) newly enrolled",
        "•".bold(),
        report.newly_enrolled
    );
    println!();
    assignments(&report.assignments);
}

pub fn class_created(class: &Class) {
    println!(
        "{}",
        format!("✓ Class {} created", class.number).green().bold()
    );
    println!("  {} {}", "Type:".bold(), class.class_type_id);
    println!("  {} {}", "Room:".bold(), class.room_number);
    println!("  {} {}", "Start:".bold(), class.start_time.format("%H:%M"));
    println!("  {} {} minutes", "Duration:".bold(), class.duration_minutes);
}

pub fn time_off(details: &TimeOffDetails) {
    println!("  {} {}", "Request:".bold(), details.id);
    println!("  {} {}", "Staff:".bold(), person(&details.staff));
    println!(
        "  {} {} to {}",
        "Dates:".bold(),
        details.start_date,
        details.end_date
    );
    println!("  {} {}", "Reason:".bold(), details.reason);
    match &details.substitute {
        Some(sub) => println!("  {} {}", "Substitute:".bold(), person(sub)),
        None => println!("  {} {}", "Substitute:".bold(), "none".yellow()),
    }
}

pub fn suggestion(suggestion: &SubstituteSuggestion) {
    match suggestion {
        SubstituteSuggestion::AlreadyCovered { request } => {
            println!("{}", "Already covered by an existing request".green().bold());
            println!();
            time_off(request);
        }
        SubstituteSuggestion::Candidates { substitutes: subs } => {
            println!("{}", "Available substitutes".cyan().bold());
            println!();
            substitutes(subs);
        }
    }
}

pub fn seed_report(report: &SeedReport) {
    for seed in &report.tables {
        match &seed.status {
            SeedStatus::Missing => {
                println!("  {} {:<18} no {}", "○".yellow(), seed.table, seed.path.display())
            }
            SeedStatus::Verified { headers } => {
                println!("  {} {:<18} {}", "✓".green(), seed.table, headers.join(", "))
            }
            SeedStatus::Loaded { rows } => {
                println!("  {} {:<18} {} rows", "✓".green(), seed.table, rows)
            }
            SeedStatus::Failed { error } => {
                println!("  {} {:<18} {}", "✗".red(), seed.table, error)
            }
        }
    }
}
