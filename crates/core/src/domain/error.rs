// Domain Error Types

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Reject empty or whitespace-only text
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn require_email(field: &'static str, value: &str) -> Result<()> {
    require_text(field, value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::InvalidValue {
            field,
            reason: format!("'{}' is not an email address", value),
        }),
    }
}

pub(crate) fn require_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(DomainError::InvertedRange { start, end });
    }
    Ok(())
}
