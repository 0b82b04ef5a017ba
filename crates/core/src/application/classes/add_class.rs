// Add Class Use Case

use crate::domain::error::require_text;
use crate::domain::{Class, Draft, DomainError, NewClass};
use crate::error::{AppError, Result};
use crate::port::TransactionalSchoolRepository;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::info;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddClassRequest {
    pub class_type_id: String,
    pub room_number: String,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

/// Reject empty codes and durations that are non-positive or run past midnight
pub(crate) fn validate_request(req: &AddClassRequest) -> Result<()> {
    require_text("Class.ClassTypeID", &req.class_type_id)?;
    require_text("Class.RoomNumber", &req.room_number)?;

    if req.duration_minutes <= 0 {
        return Err(DomainError::InvalidValue {
            field: "Class.Duration",
            reason: format!("{} minutes is not a positive duration", req.duration_minutes),
        }
        .into());
    }

    let end = req
        .duration_minutes
        .checked_mul(60)
        .and_then(|secs| secs.checked_add(i64::from(req.start_time.num_seconds_from_midnight())));
    if end.map_or(true, |end| end > SECONDS_PER_DAY) {
        return Err(DomainError::InvalidValue {
            field: "Class.Duration",
            reason: format!(
                "class starting at {} for {} minutes runs past midnight",
                req.start_time, req.duration_minutes
            ),
        }
        .into());
    }

    Ok(())
}

/// Execute add-class use case (single transaction)
///
/// Room and class type must already exist. The id is allocated inside the
/// transaction and the class number is `C<id>`.
pub async fn execute(repo: &dyn TransactionalSchoolRepository, req: AddClassRequest) -> Result<Class> {
    validate_request(&req)?;

    let mut tx = repo.begin_transaction().await?;

    if !tx.room_exists(&req.room_number).await? {
        return Err(AppError::NotFound(format!("Room {}", req.room_number)));
    }
    if !tx.class_type_exists(&req.class_type_id).await? {
        return Err(AppError::NotFound(format!("ClassType {}", req.class_type_id)));
    }

    let id = tx.next_class_id().await?;
    let draft = NewClass {
        number: Class::number_for(id),
        class_type_id: req.class_type_id,
        room_number: req.room_number,
        start_time: req.start_time,
        duration_minutes: req.duration_minutes,
    };
    draft.validate()?;

    tx.insert_class(id, &draft).await?;
    tx.commit().await?;

    info!(
        class = %draft.number,
        room = %draft.room_number,
        class_type = %draft.class_type_id,
        "Class created"
    );

    Ok(Class {
        id,
        number: draft.number,
        class_type_id: draft.class_type_id,
        room_number: draft.room_number,
        start_time: draft.start_time,
        duration_minutes: draft.duration_minutes,
    })
}
