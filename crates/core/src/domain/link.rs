// Join-table rows (many-to-many associations)

use super::classroom::ClassId;
use super::people::{GuardianId, StaffId, StudentId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a join table; the pair is the composite key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Link {
    GuardianToStudent {
        student_id: StudentId,
        guardian_id: GuardianId,
    },
    StaffToClass {
        staff_id: StaffId,
        class_id: ClassId,
    },
    StudentToClass {
        student_id: StudentId,
        class_id: ClassId,
    },
}

impl Link {
    pub fn table(&self) -> &'static str {
        match self {
            Link::GuardianToStudent { .. } => "GuardianToStudent",
            Link::StaffToClass { .. } => "StaffToClass",
            Link::StudentToClass { .. } => "StudentToClass",
        }
    }

    /// Key columns with their values, in key order
    pub fn columns(&self) -> [(&'static str, i64); 2] {
        match *self {
            Link::GuardianToStudent {
                student_id,
                guardian_id,
            } => [("StudentID", student_id), ("GuardianID", guardian_id)],
            Link::StaffToClass { staff_id, class_id } => {
                [("StaffID", staff_id), ("ClassID", class_id)]
            }
            Link::StudentToClass {
                student_id,
                class_id,
            } => [("StudentID", student_id), ("ClassID", class_id)],
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [(a, x), (b, y)] = self.columns();
        write!(f, "{}({}={}, {}={})", self.table(), a, x, b, y)
    }
}
