// Request Time Off Use Case

use crate::domain::error::{require_range, require_text};
use crate::domain::{DomainError, NewTimeOffRequest, TimeOffDetails};
use crate::error::{AppError, Result};
use crate::port::{SchoolQueries, TransactionalSchoolRepository};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffInput {
    pub staff_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,

    #[serde(default)]
    pub substitute_number: Option<String>,
}

pub(crate) fn validate_input(input: &TimeOffInput) -> Result<()> {
    require_text("Staff.Number", &input.staff_number)?;
    require_range(input.start_date, input.end_date)?;
    require_text("TimeOffRequest.Reason", &input.reason)?;
    if let Some(number) = &input.substitute_number {
        require_text("Substitute.Number", number)?;
    }
    Ok(())
}

/// Execute request-time-off use case (single transaction)
///
/// A named substitute must have one availability window covering the whole
/// range; otherwise the request is rejected and nothing is written.
pub async fn execute(
    repo: &dyn TransactionalSchoolRepository,
    queries: &dyn SchoolQueries,
    input: TimeOffInput,
) -> Result<TimeOffDetails> {
    validate_input(&input)?;

    let mut tx = repo.begin_transaction().await?;

    let staff_id = tx
        .staff_id_by_number(&input.staff_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff {}", input.staff_number)))?;

    let substitute_id = match &input.substitute_number {
        Some(number) => {
            let id = tx
                .substitute_id_by_number(number)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Substitute {}", number)))?;

            if !tx
                .substitute_covers(id, input.start_date, input.end_date)
                .await?
            {
                return Err(DomainError::InvalidValue {
                    field: "TimeOffRequest.SubstituteID",
                    reason: format!(
                        "substitute {} is not available from {} to {}",
                        number, input.start_date, input.end_date
                    ),
                }
                .into());
            }
            Some(id)
        }
        None => None,
    };

    let request_id = tx
        .insert_time_off(&NewTimeOffRequest {
            start_date: input.start_date,
            end_date: input.end_date,
            reason: input.reason,
            staff_id,
            substitute_id,
        })
        .await?;
    tx.commit().await?;

    info!(
        request_id,
        staff = %input.staff_number,
        start = %input.start_date,
        end = %input.end_date,
        covered = substitute_id.is_some(),
        "Time off recorded"
    );

    queries
        .time_off_details(request_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("time off request {} vanished after commit", request_id)))
}
