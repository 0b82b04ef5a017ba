// Fill Class Use Case

use crate::domain::{grade_of, ClassAssignment, Link};
use crate::error::{AppError, Result};
use crate::port::{SchoolQueries, TransactionalSchoolRepository};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of filling a class
#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    pub class_number: String,
    /// False when the staff member was already assigned
    pub staff_assigned: bool,
    pub newly_enrolled: usize,
    pub assignments: Vec<ClassAssignment>,
}

/// Execute fill-class use case
///
/// The staff link and all student links are written in one transaction; both
/// are idempotent, so filling twice changes nothing. Eligible students have the
/// grade of the class type and no homeroom other than this class.
pub async fn execute(
    repo: &dyn TransactionalSchoolRepository,
    queries: &dyn SchoolQueries,
    class_number: &str,
    staff_number: &str,
) -> Result<FillReport> {
    let mut tx = repo.begin_transaction().await?;

    let class = tx
        .class_by_number(class_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Class {}", class_number)))?;
    let staff_id = tx
        .staff_id_by_number(staff_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff {}", staff_number)))?;

    let staff_assigned = tx
        .link_if_absent(&Link::StaffToClass {
            staff_id,
            class_id: class.id,
        })
        .await?;

    let mut newly_enrolled = 0;
    if let Some(grade) = grade_of(&class.class_type_id) {
        let candidates = tx.homeroom_candidates(&grade, class.id).await?;
        debug!(class = %class.number, grade = %grade, candidates = candidates.len(), "Enrolling students");

        for student_id in candidates {
            let inserted = tx
                .link_if_absent(&Link::StudentToClass {
                    student_id,
                    class_id: class.id,
                })
                .await?;
            if inserted {
                newly_enrolled += 1;
            }
        }
    }

    tx.commit().await?;

    info!(
        class = %class.number,
        staff = %staff_number,
        newly_enrolled,
        "Class filled"
    );

    let assignments = queries.class_assignments(&class.number).await?;

    Ok(FillReport {
        class_number: class.number,
        staff_assigned,
        newly_enrolled,
        assignments,
    })
}
