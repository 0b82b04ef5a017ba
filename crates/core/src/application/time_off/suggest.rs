// Suggest Substitutes Use Case

use crate::domain::error::require_range;
use crate::domain::{AvailableSubstitute, TimeOffDetails};
use crate::error::{AppError, Result};
use crate::port::SchoolQueries;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubstituteSuggestion {
    /// An overlapping request already has a substitute
    AlreadyCovered { request: TimeOffDetails },
    Candidates { substitutes: Vec<AvailableSubstitute> },
}

pub async fn execute(
    queries: &dyn SchoolQueries,
    staff_number: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<SubstituteSuggestion> {
    require_range(start, end)?;

    let staff = queries
        .staff_by_number(staff_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff {}", staff_number)))?;

    let covered = queries
        .time_off_for_staff(staff.id, start, end)
        .await?
        .into_iter()
        .find(|request| request.substitute.is_some());

    if let Some(request) = covered {
        return Ok(SubstituteSuggestion::AlreadyCovered { request });
    }

    Ok(SubstituteSuggestion::Candidates {
        substitutes: queries.substitutes_available(start, end).await?,
    })
}
